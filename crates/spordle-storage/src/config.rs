use spordle_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const JOURNAL_MODES: [&str; 6] = ["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
  /// Fichero SQLite con el historial de rondas. `":memory:"` para no persistir.
  pub db_path: PathBuf,
  /// `PRAGMA journal_mode` a aplicar al abrir; `None` deja el de SQLite.
  pub journal_mode: Option<String>,
}

impl Default for StorageConfig {
  fn default() -> Self {
    let db_path = PATHS.data_dir.join("spordle.db");
    StorageConfig { db_path, journal_mode: Some("WAL".to_string()) }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("storage")?;
    CONFIG_BACKEND.save_section("storage", &cfg)?;
    Ok(cfg)
  }

  pub fn database_url(&self) -> String {
    self.db_path.to_string_lossy().into_owned()
  }

  /// Modo de journal validado y en mayúsculas. Se interpola en un PRAGMA, así
  /// que solo pasan los valores que SQLite conoce.
  pub fn journal_mode(&self) -> Result<Option<String>, ConfigError> {
    let Some(mode) = &self.journal_mode else {
      return Ok(None);
    };

    let upper = mode.trim().to_ascii_uppercase();
    if !JOURNAL_MODES.contains(&upper.as_str()) {
      return Err(ConfigError::Other(format!("unknown journal_mode {mode:?}, expected one of {JOURNAL_MODES:?}")));
    }
    Ok(Some(upper))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cfg(mode: Option<&str>) -> StorageConfig {
    StorageConfig { db_path: PathBuf::from("x.db"), journal_mode: mode.map(str::to_owned) }
  }

  #[test]
  fn journal_mode_is_validated() {
    assert_eq!(cfg(Some("wal")).journal_mode().unwrap().as_deref(), Some("WAL"));
    assert_eq!(cfg(None).journal_mode().unwrap(), None);
    assert!(cfg(Some("WAL; DROP TABLE rounds")).journal_mode().is_err());
  }
}
