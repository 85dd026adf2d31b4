use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

pub const BASE_DIR_ENV: &str = "SPORDLE_BASE_DIR";
const CONFIG_FILE_NAME: &str = "spordle.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

/// Directorios de Spordle: config, datos (base de datos, catálogos) y caché.
#[derive(Debug, Clone)]
pub struct SpordlePaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl SpordlePaths {
  /// Modo portable si `SPORDLE_BASE_DIR` está definido; si no, rutas del sistema.
  /// Crea los directorios si no existen.
  pub fn detect() -> Result<Self, ConfigError> {
    let paths = match std::env::var_os(BASE_DIR_ENV) {
      Some(base) => Self::portable(PathBuf::from(base)),
      None => {
        let dirs = ProjectDirs::from("com", "spordle", "spordle").ok_or(ConfigError::Directories)?;
        Self {
          base_dir: dirs.config_dir().to_path_buf(),
          config_dir: dirs.config_dir().to_path_buf(),
          data_dir: dirs.data_dir().to_path_buf(),
          cache_dir: dirs.cache_dir().to_path_buf(),
        }
      }
    };

    paths.ensure_dirs()?;
    tracing::debug!(config_dir = %paths.config_dir.display(), data_dir = %paths.data_dir.display(), "paths ready");
    Ok(paths)
  }

  /// Todo cuelga de `base`: `config/`, `data/`, `cache/`.
  pub fn portable(base: PathBuf) -> Self {
    Self {
      config_dir: base.join("config"),
      data_dir: base.join("data"),
      cache_dir: base.join("cache"),
      base_dir: base,
    }
  }

  pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    std::fs::create_dir_all(&self.cache_dir)?;
    Ok(())
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}
