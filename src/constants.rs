/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration file the build consumes when present
pub const CONFIG_FILE: &str = "cfg.toml";

/// Longest SSID allowed by 802.11
pub const MAX_SSID_LEN: usize = 32;
/// Shortest WPA2 passphrase
pub const MIN_PSK_LEN: usize = 8;
/// Longest WPA2 passphrase; a 64 character key must be raw hex
pub const MAX_PASSPHRASE_LEN: usize = 63;
/// Length of a raw hex pre-shared key
pub const HEX_PSK_LEN: usize = 64;
/// Longest device ID, bounded by the DHCP hostname buffer
pub const MAX_DEVICE_ID_LEN: usize = 32;

/// Maximum number of problems reported by a preflight check (one per field)
pub const MAX_FINDINGS: usize = 6;
