use core::fmt;
use core::str::FromStr;

/// One of the six named values of the configuration bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WifiSsid,
    WifiPsk,
    ServerUrl,
    DeviceId,
    ApiKey,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownField;

impl Field {
    /// All fields, in declaration order.
    pub const ALL: [Field; 6] = [
        Field::WifiSsid,
        Field::WifiPsk,
        Field::ServerUrl,
        Field::DeviceId,
        Field::ApiKey,
        Field::Location,
    ];

    /// Key used in `cfg.toml` and provisioning files.
    pub const fn key(self) -> &'static str {
        match self {
            Field::WifiSsid => "wifi_ssid",
            Field::WifiPsk => "wifi_psk",
            Field::ServerUrl => "server_url",
            Field::DeviceId => "device_id",
            Field::ApiKey => "api_key",
            Field::Location => "location",
        }
    }

    // camelCase alias accepted on lookup
    const fn alias(self) -> &'static str {
        match self {
            Field::WifiSsid => "networkName",
            Field::WifiPsk => "networkSecret",
            Field::ServerUrl => "serviceEndpoint",
            Field::DeviceId => "deviceIdentifier",
            Field::ApiKey => "accessToken",
            Field::Location => "siteLabel",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Field::WifiSsid => "Wireless network SSID",
            Field::WifiPsk => "Wireless network password",
            Field::ServerUrl => "Base URL for sensor-data submission API",
            Field::DeviceId => "Identifier the device presents to the backend",
            Field::ApiKey => "API key for backend authentication",
            Field::Location => "Free-text location name attached to submitted data",
        }
    }

    /// Secret values are masked in `Debug` output and by the provisioning tool.
    pub const fn is_secret(self) -> bool {
        matches!(self, Field::WifiPsk | Field::ApiKey)
    }

    /// Value shipped in `cfg.toml.example`; a bundle still holding it was
    /// never filled in.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Field::WifiSsid => "SSID_HER",
            Field::WifiPsk => "PASSORD_HER",
            Field::ServerUrl => "https://din-backend-url.no/api/sensor-data/",
            Field::DeviceId => "ESP_ID_HER",
            Field::ApiKey => "API_KEY_HER",
            Field::Location => "Lokasjon",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s || field.alias() == s)
            .ok_or(UnknownField)
    }
}

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown configuration field")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownField {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_aliases() {
        assert_eq!("wifi_ssid".parse(), Ok(Field::WifiSsid));
        assert_eq!("networkName".parse(), Ok(Field::WifiSsid));
        assert_eq!("accessToken".parse(), Ok(Field::ApiKey));
        assert_eq!("siteLabel".parse(), Ok(Field::Location));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!("WIFI_SSID".parse::<Field>(), Err(UnknownField));
        assert_eq!("".parse::<Field>(), Err(UnknownField));
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in Field::ALL.iter().enumerate() {
            for b in &Field::ALL[i + 1..] {
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn only_credentials_are_secret() {
        let secret: heapless::Vec<Field, 6> =
            Field::ALL.into_iter().filter(|f| f.is_secret()).collect();
        assert_eq!(secret.as_slice(), &[Field::WifiPsk, Field::ApiKey]);
    }
}
