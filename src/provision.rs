//! Provisioning files: the configuration bundle stored as a flat TOML table.
//!
//! Values are written and read back verbatim. Nothing is trimmed, normalized
//! or case-folded, so a bundle read from a file is exactly the one a
//! provisioning tool wrote.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::field::Field;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "provisioning file I/O failed: {}", e),
            Error::Parse(e) => write!(f, "invalid provisioning file: {}", e),
            Error::Serialize(e) => write!(f, "failed to encode provisioning file: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Serialize(e)
    }
}

/// Owned configuration bundle, as loaded from or written to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Provisioned {
    pub wifi_ssid: String,
    pub wifi_psk: String,
    pub server_url: String,
    pub device_id: String,
    pub api_key: String,
    pub location: String,
}

impl Provisioned {
    /// Bundle holding every field's placeholder, as in `cfg.toml.example`.
    pub fn template() -> Self {
        Self {
            wifi_ssid: Field::WifiSsid.placeholder().into(),
            wifi_psk: Field::WifiPsk.placeholder().into(),
            server_url: Field::ServerUrl.placeholder().into(),
            device_id: Field::DeviceId.placeholder().into(),
            api_key: Field::ApiKey.placeholder().into(),
            location: Field::Location.placeholder().into(),
        }
    }

    pub fn config(&self) -> Config<'_> {
        Config {
            wifi_ssid: &self.wifi_ssid,
            wifi_psk: &self.wifi_psk,
            server_url: &self.server_url,
            device_id: &self.device_id,
            api_key: &self.api_key,
            location: &self.location,
        }
    }

    /// Replaces one value. Only meant for tools building a bundle before it
    /// is written out; a loaded bundle is read through [`Provisioned::config`].
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::WifiSsid => &mut self.wifi_ssid,
            Field::WifiPsk => &mut self.wifi_psk,
            Field::ServerUrl => &mut self.server_url,
            Field::DeviceId => &mut self.device_id,
            Field::ApiKey => &mut self.api_key,
            Field::Location => &mut self.location,
        };
        *slot = value.into();
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, Error> {
        Ok(toml::to_string(self)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let provisioned = Self::from_toml_str(&raw)?;
        log::debug!("Read provisioning file {}", path.display());
        Ok(provisioned)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?)?;
        log::info!("Wrote provisioning file {}", path.display());
        Ok(())
    }

    /// Like [`Provisioned::write`], but fails with
    /// [`io::ErrorKind::AlreadyExists`] instead of replacing an existing file.
    pub fn create(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let contents = self.to_toml_string()?;
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(contents.as_bytes())?;
        log::info!("Created provisioning file {}", path.display());
        Ok(())
    }

    /// Rust source declaring this bundle as `CONFIG`, the same form the build
    /// script compiles in.
    pub fn to_rust_source(&self, source: &str) -> Result<String, fmt::Error> {
        let config = self.config();
        let mut fields = Vec::with_capacity(Field::ALL.len());
        fields.extend(config.fields().map(|(field, value)| (field.key(), value)));
        crate::codegen::render_config(source, &fields)
    }
}

impl From<Config<'_>> for Provisioned {
    fn from(config: Config<'_>) -> Self {
        Self {
            wifi_ssid: config.wifi_ssid.into(),
            wifi_psk: config.wifi_psk.into(),
            server_url: config.server_url.into(),
            device_id: config.device_id.into(),
            api_key: config.api_key.into(),
            location: config.location.into(),
        }
    }
}
