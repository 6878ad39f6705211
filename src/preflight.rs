//! Startup checks run by the application before it touches the network.
//!
//! The bundle itself never validates anything. A consumer calls [`check`]
//! right after loading it so that an unfilled template fails loudly at boot
//! instead of as a silent join or authentication failure later on.

use core::fmt;

use heapless::Vec;

use crate::config::Config;
use crate::constants::{
    HEX_PSK_LEN, MAX_DEVICE_ID_LEN, MAX_FINDINGS, MAX_PASSPHRASE_LEN, MAX_SSID_LEN, MIN_PSK_LEN,
};
use crate::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Placeholder(Field),
    Empty(Field),
    TooLong { field: Field, max: usize },
    PskLength(usize),
    PskNotHex,
    PskNotPrintable,
    UnsupportedScheme,
    MissingHost,
    InvalidDeviceId,
}

impl Error {
    /// Field the problem was found in.
    pub fn field(&self) -> Field {
        match *self {
            Error::Placeholder(field) | Error::Empty(field) => field,
            Error::TooLong { field, .. } => field,
            Error::PskLength(_) | Error::PskNotHex | Error::PskNotPrintable => Field::WifiPsk,
            Error::UnsupportedScheme | Error::MissingHost => Field::ServerUrl,
            Error::InvalidDeviceId => Field::DeviceId,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Placeholder(field) => write!(
                f,
                "{} still holds the placeholder {:?}, fill it in before deploying",
                field,
                field.placeholder()
            ),
            Error::Empty(field) => write!(f, "{} must not be empty", field),
            Error::TooLong { field, max } => {
                write!(f, "{} is longer than {} bytes", field, max)
            }
            Error::PskLength(len) => write!(
                f,
                "wifi_psk is {} bytes, expected {}..={} or a {} digit hex key (empty for an open network)",
                len, MIN_PSK_LEN, MAX_PASSPHRASE_LEN, HEX_PSK_LEN
            ),
            Error::PskNotHex => write!(f, "a {} byte wifi_psk must be hexadecimal", HEX_PSK_LEN),
            Error::PskNotPrintable => {
                f.write_str("a wifi_psk passphrase may only contain printable ASCII characters")
            }
            Error::UnsupportedScheme => {
                f.write_str("server_url must start with http:// or https://")
            }
            Error::MissingHost => f.write_str("server_url has no host"),
            Error::InvalidDeviceId => {
                f.write_str("device_id may only contain ASCII letters, digits, '-' and '_'")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Returns the first problem found, in field declaration order.
pub fn check(config: &Config<'_>) -> Result<(), Error> {
    match Field::ALL.into_iter().find_map(|field| check_field(config, field)) {
        Some(err) => {
            log::error!("Configuration rejected: {}", err);
            Err(err)
        }
        None => {
            log::debug!("Configuration passed preflight");
            Ok(())
        }
    }
}

/// Every problem found, at most one per field.
pub fn findings(config: &Config<'_>) -> Vec<Error, MAX_FINDINGS> {
    let mut found = Vec::new();
    for field in Field::ALL {
        if let Some(err) = check_field(config, field) {
            // capacity matches the number of fields
            found.push(err).ok();
        }
    }
    found
}

fn check_field(config: &Config<'_>, field: Field) -> Option<Error> {
    let value = config.get(field);

    if value == field.placeholder() {
        return Some(Error::Placeholder(field));
    }

    match field {
        Field::WifiSsid => check_ssid(value),
        Field::WifiPsk => check_psk(value),
        Field::ServerUrl => check_url(value),
        Field::DeviceId => check_device_id(value),
        Field::ApiKey if value.is_empty() => Err(Error::Empty(field)),
        Field::ApiKey | Field::Location => Ok(()),
    }
    .err()
}

fn check_ssid(ssid: &str) -> Result<(), Error> {
    if ssid.is_empty() {
        return Err(Error::Empty(Field::WifiSsid));
    }
    if ssid.len() > MAX_SSID_LEN {
        return Err(Error::TooLong {
            field: Field::WifiSsid,
            max: MAX_SSID_LEN,
        });
    }
    Ok(())
}

fn check_psk(psk: &str) -> Result<(), Error> {
    match psk.len() {
        // open network
        0 => Ok(()),
        MIN_PSK_LEN..=MAX_PASSPHRASE_LEN if psk.bytes().all(|b| (0x20..=0x7e).contains(&b)) => {
            Ok(())
        }
        MIN_PSK_LEN..=MAX_PASSPHRASE_LEN => Err(Error::PskNotPrintable),
        HEX_PSK_LEN if psk.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(()),
        HEX_PSK_LEN => Err(Error::PskNotHex),
        len => Err(Error::PskLength(len)),
    }
}

fn check_url(url: &str) -> Result<(), Error> {
    let (scheme, rest) = url.split_once("://").ok_or(Error::UnsupportedScheme)?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return Err(Error::UnsupportedScheme);
    }

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = match host.rsplit_once(':') {
        Some((host, port)) if !host.ends_with(']') && port.bytes().all(|b| b.is_ascii_digit()) => {
            host
        }
        _ => host,
    };

    if host.trim().is_empty() {
        return Err(Error::MissingHost);
    }
    Ok(())
}

fn check_device_id(id: &str) -> Result<(), Error> {
    if id.is_empty() {
        return Err(Error::Empty(Field::DeviceId));
    }
    if id.len() > MAX_DEVICE_ID_LEN {
        return Err(Error::TooLong {
            field: Field::DeviceId,
            max: MAX_DEVICE_ID_LEN,
        });
    }
    if !id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(Error::InvalidDeviceId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Config<'static> {
        Config {
            wifi_ssid: "garden",
            wifi_psk: "correct horse battery",
            server_url: "https://sensors.example.com/api/sensor-data/",
            device_id: "greenhouse-1",
            api_key: "0f3c9a",
            location: "Greenhouse",
        }
    }

    fn template() -> Config<'static> {
        Config {
            wifi_ssid: Field::WifiSsid.placeholder(),
            wifi_psk: Field::WifiPsk.placeholder(),
            server_url: Field::ServerUrl.placeholder(),
            device_id: Field::DeviceId.placeholder(),
            api_key: Field::ApiKey.placeholder(),
            location: Field::Location.placeholder(),
        }
    }

    #[test]
    fn filled_bundle_passes() {
        assert_eq!(check(&filled()), Ok(()));
        assert!(findings(&filled()).is_empty());
    }

    #[test]
    fn template_fails_on_first_field() {
        assert_eq!(check(&template()), Err(Error::Placeholder(Field::WifiSsid)));
    }

    #[test]
    fn template_reports_every_placeholder() {
        let found = findings(&template());
        assert_eq!(found.len(), Field::ALL.len());
        for (err, field) in found.iter().zip(Field::ALL) {
            assert_eq!(*err, Error::Placeholder(field));
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn placeholder_location_is_flagged() {
        let config = Config {
            location: "Lokasjon",
            ..filled()
        };
        assert_eq!(check(&config), Err(Error::Placeholder(Field::Location)));
    }

    #[test]
    fn empty_location_is_allowed() {
        let config = Config {
            location: "",
            ..filled()
        };
        assert_eq!(check(&config), Ok(()));
    }

    #[test]
    fn ssid_rules() {
        assert_eq!(check_ssid(""), Err(Error::Empty(Field::WifiSsid)));
        assert_eq!(check_ssid(&"s".repeat(32)), Ok(()));
        assert_eq!(
            check_ssid(&"s".repeat(33)),
            Err(Error::TooLong {
                field: Field::WifiSsid,
                max: 32
            })
        );
    }

    #[test]
    fn psk_rules() {
        assert_eq!(check_psk(""), Ok(()));
        assert_eq!(check_psk("short"), Err(Error::PskLength(5)));
        assert_eq!(check_psk("12345678"), Ok(()));
        assert_eq!(check_psk(&"p".repeat(63)), Ok(()));
        assert_eq!(check_psk(&"a1".repeat(32)), Ok(()));
        assert_eq!(check_psk(&"z".repeat(64)), Err(Error::PskNotHex));
        assert_eq!(check_psk(&"p".repeat(65)), Err(Error::PskLength(65)));
        assert_eq!(check_psk("pass\tword"), Err(Error::PskNotPrintable));
        assert_eq!(check_psk("blåbærsyltetøy"), Err(Error::PskNotPrintable));
        assert_eq!(check_psk("~ !\"#$%&'()*+,-./"), Ok(()));
    }

    #[test]
    fn url_rules() {
        assert_eq!(check_url("https://example.com/api/"), Ok(()));
        assert_eq!(check_url("http://192.168.1.10:8080/ingest"), Ok(()));
        assert_eq!(check_url("http://user:pw@example.com"), Ok(()));
        assert_eq!(check_url("HTTPS://example.com/api/"), Ok(()));
        assert_eq!(check_url("Http://example.com/api/"), Ok(()));
        assert_eq!(check_url("https:// /api/"), Err(Error::MissingHost));
        assert_eq!(check_url("httpx://example.com"), Err(Error::UnsupportedScheme));
        assert_eq!(check_url("ftp://example.com"), Err(Error::UnsupportedScheme));
        assert_eq!(check_url("example.com/api"), Err(Error::UnsupportedScheme));
        assert_eq!(check_url("https:///api"), Err(Error::MissingHost));
        assert_eq!(check_url("https://:443/api"), Err(Error::MissingHost));
    }

    #[test]
    fn device_id_rules() {
        assert_eq!(check_device_id("esp32_kitchen-2"), Ok(()));
        assert_eq!(check_device_id(""), Err(Error::Empty(Field::DeviceId)));
        assert_eq!(check_device_id("kitchen sensor"), Err(Error::InvalidDeviceId));
        assert_eq!(
            check_device_id(&"d".repeat(33)),
            Err(Error::TooLong {
                field: Field::DeviceId,
                max: 32
            })
        );
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let config = Config {
            api_key: "",
            ..filled()
        };
        assert_eq!(check(&config), Err(Error::Empty(Field::ApiKey)));
    }

    #[test]
    fn findings_keep_field_order() {
        let config = Config {
            wifi_ssid: "",
            device_id: "bad id",
            ..filled()
        };
        let found = findings(&config);
        assert_eq!(
            found.as_slice(),
            &[Error::Empty(Field::WifiSsid), Error::InvalidDeviceId]
        );
    }
}
