use std::fmt;
use std::path::Path;

use static_cell::StaticCell;

use crate::config::{Config, CONFIG, CONFIG_SOURCE};
use crate::provision::{self, Provisioned};

static INSTALLED: StaticCell<Provisioned> = StaticCell::new();

#[derive(Debug)]
pub enum Error {
    AlreadyInstalled,
    Provision(provision::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlreadyInstalled => f.write_str("a configuration bundle is already installed"),
            Error::Provision(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::AlreadyInstalled => None,
            Error::Provision(e) => Some(e),
        }
    }
}

impl From<provision::Error> for Error {
    fn from(e: provision::Error) -> Self {
        Error::Provision(e)
    }
}

/// Moves a loaded bundle into process-wide storage and returns a read-only
/// view valid for the rest of the program. Only the first call succeeds.
pub fn install(provisioned: Provisioned) -> Result<Config<'static>, Error> {
    install_in(&INSTALLED, provisioned)
}

pub fn install_in(
    cell: &'static StaticCell<Provisioned>,
    provisioned: Provisioned,
) -> Result<Config<'static>, Error> {
    let installed: &'static Provisioned = cell
        .try_init(provisioned)
        .ok_or(Error::AlreadyInstalled)?;
    Ok(installed.config())
}

/// Loads the bundle the application runs with: the given provisioning file
/// if any, otherwise the one compiled in.
pub fn load(path: Option<&Path>) -> Result<Config<'static>, Error> {
    match path {
        Some(path) => {
            let provisioned = Provisioned::read(path)?;
            let config = install(provisioned)?;
            log::info!("Using configuration from {}", path.display());
            Ok(config)
        }
        None => {
            log::info!("Using compiled-in configuration from {}", CONFIG_SOURCE);
            Ok(CONFIG)
        }
    }
}
