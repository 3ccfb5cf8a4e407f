use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default TCP port the upload service listens on.
pub const DEFAULT_PORT: u16 = 3000;

/// Default base directory uploads are written under.
pub const DEFAULT_STORAGE_ROOT: &str = "/data";

/// Global configuration loaded from `~/.config/filedrop/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiledropConfig {
    /// TCP port to listen on (no TLS, all interfaces).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base directory under which all uploads are placed. The request
    /// path is appended verbatim to form the destination directory.
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_storage_root() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_ROOT)
}

impl Default for FiledropConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            storage_root: default_storage_root(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("filedrop")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FiledropConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FiledropConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FiledropConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FiledropConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.storage_root, PathBuf::from("/data"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FiledropConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FiledropConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.port, cfg.port);
        assert_eq!(parsed.storage_root, cfg.storage_root);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            port = 8080
            storage_root = "/srv/uploads"
        "#;
        let cfg: FiledropConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.storage_root, PathBuf::from("/srv/uploads"));
    }

    #[test]
    fn config_toml_missing_fields_use_defaults() {
        let toml = r#"
            port = 8080
        "#;
        let cfg: FiledropConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.storage_root, PathBuf::from("/data"));

        let cfg: FiledropConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.port, 3000);
    }
}
