mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{ConfigError, SpordlePaths};

use once_cell::sync::Lazy;

// Singleton de paths (portable con SPORDLE_BASE_DIR / rutas del sistema)
pub static PATHS: Lazy<SpordlePaths> = Lazy::new(|| SpordlePaths::detect().expect("failed to init SpordlePaths"));

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(&PATHS));
