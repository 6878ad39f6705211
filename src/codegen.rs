//! Rust source generation for the compiled-in configuration bundle.
//!
//! This module is also compiled into `build.rs` through `#[path]`, so it may
//! only depend on `std`.

use std::fmt::Write;

/// Renders `CONFIG_SOURCE` and `CONFIG` for the given `(field, value)` pairs.
///
/// Values are emitted as escaped string literals, so whatever text the source
/// file held is compiled in byte-for-byte.
pub fn render_config(source: &str, fields: &[(&str, &str)]) -> Result<String, std::fmt::Error> {
    let mut code = String::new();

    writeln!(code, "pub const CONFIG_SOURCE: &str = {:?};", source)?;
    writeln!(code, "pub const CONFIG: Config<'static> = Config {{")?;
    for (key, value) in fields {
        writeln!(code, "    {}: {:?},", key, value)?;
    }
    writeln!(code, "}};")?;

    Ok(code)
}
