use harmonia::album::with_extension;
use harmonia::ResonanceSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATHS: [&str; 2] = ["configs/harmonia.toml", "../../configs/harmonia.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub resonance: ResonanceSettings,
    pub autosave: bool,
    pub autoload_file: String,
    pub autoload_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resonance: ResonanceSettings::default(),
            autosave: false,
            autoload_file: default_autoload_file(),
            autoload_enabled: true,
        }
    }
}

impl AppConfig {
    /// Album loaded at startup, if autoloading is on.
    pub fn autoload_album(&self) -> Option<&str> {
        self.autoload_enabled.then_some(self.autoload_file.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct AppConfigToml {
    #[serde(default)]
    autosave: bool,
    #[serde(default = "default_autoload_file")]
    autoload_file: String,
    #[serde(default = "default_true")]
    autoload_enabled: bool,
    // tables after plain values
    #[serde(default)]
    resonance: ResonanceSettings,
}

fn default_autoload_file() -> String {
    "autosave.daw".to_string()
}

fn default_true() -> bool {
    true
}

/// Try the common relative locations of `configs/harmonia.toml`.
pub fn find_config_path() -> Option<PathBuf> {
    CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

pub fn parse_config(text: &str) -> anyhow::Result<AppConfig> {
    let raw: AppConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse harmonia config: {e}"))?;
    raw.resonance
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [resonance] settings: {e}"))?;
    Ok(AppConfig {
        resonance: raw.resonance,
        autosave: raw.autosave,
        autoload_file: with_extension(&raw.autoload_file),
        autoload_enabled: raw.autoload_enabled,
    })
}

/// Load the config from `path`, or from the first default location found.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match find_config_path() {
            Some(p) => p,
            None => anyhow::bail!("Could not find harmonia.toml in {:?}", CONFIG_PATHS),
        },
    };
    let text = fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_config(&text)
}

/// Like [`load_config`], but a missing default config yields the defaults.
/// An explicitly given path must exist.
pub fn load_config_or_default(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    if path.is_none() && find_config_path().is_none() {
        return Ok(AppConfig::default());
    }
    load_config(path)
}

pub fn save_config(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let raw = AppConfigToml {
        autosave: config.autosave,
        autoload_file: config.autoload_file.clone(),
        autoload_enabled: config.autoload_enabled,
        resonance: config.resonance,
    };
    let text = toml::to_string_pretty(&raw)
        .map_err(|e| anyhow::anyhow!("Failed to serialize harmonia config: {e}"))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text).map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
    Ok(())
}
