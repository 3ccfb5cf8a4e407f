//! `filedrop config` – print the effective configuration.

use anyhow::Result;
use filedrop_core::config::{self, FiledropConfig};

pub fn run_config(cfg: &FiledropConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("config file: {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
