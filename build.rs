use std::{
    env,
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

#[allow(dead_code)]
#[path = "src/codegen.rs"]
mod codegen;

const CONFIG_PATH_ENV: &str = "SENSOR_CONFIG";
const CONFIG_FILE: &str = "cfg.toml";
const CONFIG_TEMPLATE_FILE: &str = "cfg.toml.example";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    wifi_ssid: String,
    wifi_psk: String,
    server_url: String,
    device_id: String,
    api_key: String,
    location: String,
}

impl RawConfig {
    fn fields(&self) -> [(&'static str, &str, &'static str); 6] {
        [
            ("wifi_ssid", self.wifi_ssid.as_str(), "SSID_HER"),
            ("wifi_psk", self.wifi_psk.as_str(), "PASSORD_HER"),
            (
                "server_url",
                self.server_url.as_str(),
                "https://din-backend-url.no/api/sensor-data/",
            ),
            ("device_id", self.device_id.as_str(), "ESP_ID_HER"),
            ("api_key", self.api_key.as_str(), "API_KEY_HER"),
            ("location", self.location.as_str(), "Lokasjon"),
        ]
    }
}

fn config_path(manifest_dir: &Path) -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return manifest_dir.join(path);
    }

    let local = manifest_dir.join(CONFIG_FILE);
    if local.exists() {
        local
    } else {
        manifest_dir.join(CONFIG_TEMPLATE_FILE)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if the configuration changes
    println!("cargo:rerun-if-env-changed={}", CONFIG_PATH_ENV);
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);
    println!("cargo:rerun-if-changed={}", CONFIG_TEMPLATE_FILE);

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let path = config_path(&manifest_dir);
    println!("cargo:rerun-if-changed={}", path.display());

    // Read and parse
    let toml_str = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let raw: RawConfig = toml::from_str(&toml_str)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;

    let fields = raw.fields();
    for (key, value, placeholder) in &fields {
        if value == placeholder {
            println!(
                "cargo:warning={} in {} is still the placeholder {:?}",
                key,
                path.display(),
                placeholder
            );
        }
    }

    // Generate Rust code
    let pairs: Vec<(&str, &str)> = fields.iter().map(|(key, value, _)| (*key, *value)).collect();
    let source = path.to_string_lossy();
    let code = codegen::render_config(&source, &pairs)?;

    let out_dir = env::var("OUT_DIR")?;
    fs::write(Path::new(&out_dir).join("config.rs"), code)?;
    Ok(())
}
