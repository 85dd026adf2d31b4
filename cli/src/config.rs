use serde::{Deserialize, Serialize};
use std::time::Duration;

use spordle_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use spordle_core::domain::GameRules;
use spordle_core::errors::RoundError;
use spordle_core::matching::{DEFAULT_THRESHOLD, GuessMatcher, SimilarityMetric};

/// Sección `[game]` del fichero de config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  /// Duración (segundos) del fragmento en cada intento.
  pub ladder_secs: Vec<u32>,
  pub max_attempts: u32,
  pub threshold: f64,
  pub metric: SimilarityMetric,
  /// Títulos de hasta N caracteres usan `short_title_threshold`.
  pub short_title_max_chars: Option<usize>,
  pub short_title_threshold: Option<f64>,
  /// Pausa tras revelar el título, antes de la siguiente pista.
  pub reveal_pause_secs: u64,
}

impl Default for GameConfig {
  fn default() -> Self {
    GameConfig {
      ladder_secs: GameRules::DEFAULT_LADDER.to_vec(),
      max_attempts: GameRules::DEFAULT_MAX_ATTEMPTS,
      threshold: DEFAULT_THRESHOLD,
      metric: SimilarityMetric::default(),
      short_title_max_chars: None,
      short_title_threshold: None,
      reveal_pause_secs: 3,
    }
  }
}

impl GameConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("game")?;
    CONFIG_BACKEND.save_section("game", &cfg)?;
    Ok(cfg)
  }

  pub fn reveal_pause(&self) -> Duration {
    Duration::from_secs(self.reveal_pause_secs)
  }

  pub fn to_rules(&self) -> Result<GameRules, RoundError> {
    let mut matcher = GuessMatcher::new(self.threshold)?.with_metric(self.metric);

    matcher = match (self.short_title_max_chars, self.short_title_threshold) {
      (Some(max_chars), Some(threshold)) => matcher.with_short_title(max_chars, threshold)?,
      (None, None) => matcher,
      _ => {
        return Err(RoundError::Configuration(
          "short_title_max_chars and short_title_threshold must be set together".into(),
        ));
      }
    };

    GameRules::new(&self.ladder_secs, self.max_attempts, matcher)
  }
}
