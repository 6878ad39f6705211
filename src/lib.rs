//! Configuration bundle for a sensor node: the Wi-Fi credentials, backend
//! endpoint, device identity, API key and location label the firmware needs
//! before it can report anything.
//!
//! The bundle is compiled in from `cfg.toml` by the build script and exposed
//! as [`CONFIG`], or loaded once from a provisioning file with
//! [`bundle::load`]. Either way consumers receive a read-only [`Config`] and
//! should run [`preflight::check`] on it before joining the network.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod config;
pub mod constants;
pub mod field;
pub mod preflight;

#[cfg(feature = "std")]
pub mod bundle;
#[cfg(feature = "std")]
pub mod codegen;
#[cfg(feature = "std")]
pub mod provision;

pub use config::{Config, CONFIG, CONFIG_SOURCE};
pub use field::Field;
