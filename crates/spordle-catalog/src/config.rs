use spordle_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogConfig {
  /// Ficheros de catálogo, en orden de prioridad. Ante ids repetidos gana el primero.
  pub sources: Vec<PathBuf>,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    CatalogConfig { sources: vec![PATHS.data_dir.join("catalog.toml")] }
  }
}

impl CatalogConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("catalog")?;
    CONFIG_BACKEND.save_section("catalog", &cfg)?;
    Ok(cfg)
  }
}
