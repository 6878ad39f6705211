use core::fmt;

use crate::field::Field;

const MASK: &str = "********";

/// Immutable configuration bundle handed to everything that needs network or
/// backend access.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Config<'a> {
    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'a str,

    // Wi-Fi pre-shared key (password)
    pub wifi_psk: &'a str,

    // Base URL sensor data is submitted to
    pub server_url: &'a str,

    // Device ID (presented to the backend and used as DHCP hostname)
    pub device_id: &'a str,

    // API key for backend authentication
    pub api_key: &'a str,

    // Location identifier (attached to submitted data)
    pub location: &'a str,
}

impl<'a> Config<'a> {
    pub fn get(&self, field: Field) -> &'a str {
        match field {
            Field::WifiSsid => self.wifi_ssid,
            Field::WifiPsk => self.wifi_psk,
            Field::ServerUrl => self.server_url,
            Field::DeviceId => self.device_id,
            Field::ApiKey => self.api_key,
            Field::Location => self.location,
        }
    }

    /// Every field paired with its value, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &'a str)> {
        let config = *self;
        Field::ALL.into_iter().map(move |field| (field, config.get(field)))
    }

    /// Value safe to print: secrets are masked unless `reveal` is set.
    pub fn display_value(&self, field: Field, reveal: bool) -> &'a str {
        let value = self.get(field);
        if field.is_secret() && !reveal && !value.is_empty() {
            MASK
        } else {
            value
        }
    }
}

impl fmt::Debug for Config<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Config");
        for field in Field::ALL {
            s.field(field.key(), &self.display_value(field, false));
        }
        s.finish()
    }
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config<'static> {
        Config {
            wifi_ssid: "garden",
            wifi_psk: "hunter22",
            server_url: "https://sensors.example.com/api/sensor-data/",
            device_id: "greenhouse-1",
            api_key: "k3y",
            location: "Greenhouse",
        }
    }

    #[test]
    fn get_matches_fields() {
        let config = sample();
        assert_eq!(config.get(Field::WifiSsid), config.wifi_ssid);
        assert_eq!(config.get(Field::WifiPsk), config.wifi_psk);
        assert_eq!(config.get(Field::ServerUrl), config.server_url);
        assert_eq!(config.get(Field::DeviceId), config.device_id);
        assert_eq!(config.get(Field::ApiKey), config.api_key);
        assert_eq!(config.get(Field::Location), config.location);
    }

    #[test]
    fn repeated_reads_are_identical() {
        let config = sample();
        let first: heapless::Vec<(Field, &str), 6> = config.fields().collect();
        let second: heapless::Vec<(Field, &str), 6> = config.fields().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), Field::ALL.len());
    }

    #[test]
    fn compiled_bundle_exposes_every_field() {
        assert_eq!(CONFIG.fields().count(), 6);
        assert!(!CONFIG_SOURCE.is_empty());
    }

    #[test]
    fn debug_masks_secrets() {
        let mut out: heapless::String<512> = heapless::String::new();
        core::fmt::write(&mut out, format_args!("{:?}", sample())).unwrap();
        assert!(out.contains("garden"));
        assert!(out.contains("Greenhouse"));
        assert!(!out.contains("hunter22"));
        assert!(!out.contains("k3y"));
    }

    #[test]
    fn display_value_reveals_on_request() {
        let config = sample();
        assert_eq!(config.display_value(Field::ApiKey, false), MASK);
        assert_eq!(config.display_value(Field::ApiKey, true), "k3y");
        assert_eq!(config.display_value(Field::Location, false), "Greenhouse");
    }

    #[test]
    fn empty_secret_is_not_masked() {
        let config = Config { wifi_psk: "", ..sample() };
        assert_eq!(config.display_value(Field::WifiPsk, false), "");
    }
}
