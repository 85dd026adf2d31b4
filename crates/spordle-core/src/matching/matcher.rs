use serde::{Deserialize, Serialize};
use strsim::normalized_damerau_levenshtein;

use crate::errors::RoundError;
use crate::matching::normalize::normalize;

/// Umbral por defecto a partir del cual un intento no exacto se acepta.
pub const DEFAULT_THRESHOLD: f64 = 0.82;

/// Métrica usada para puntuar intentos no exactos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
  /// Damerau-Levenshtein normalizado sobre la clave de comparación.
  #[default]
  Levenshtein,
  /// Igual, pero con las palabras ordenadas: tolera cambios de orden.
  TokenSort,
}

/// Umbral alternativo para títulos cortos, donde un solo error pesa mucho.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortTitleRule {
  /// Longitud máxima (en caracteres, del título normalizado) que se considera "corto".
  pub max_chars: usize,
  pub threshold: f64,
}

/// Decisión sobre un intento.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
  pub accepted: bool,
  /// Puntuación en `[0, 1]`.
  pub similarity: f64,
}

/// Resultado completo de evaluar un intento, con la forma normalizada que
/// el controlador de ronda guarda en su log.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
  pub normalized_guess: String,
  pub result: MatchResult,
}

/// Compara intentos contra el título objetivo.
///
/// Es configuración pura (umbral + métrica), sin estado; se puede compartir
/// entre rondas y sesiones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessMatcher {
  threshold: f64,
  metric: SimilarityMetric,
  short_title: Option<ShortTitleRule>,
}

impl Default for GuessMatcher {
  fn default() -> Self {
    Self { threshold: DEFAULT_THRESHOLD, metric: SimilarityMetric::default(), short_title: None }
  }
}

impl GuessMatcher {
  /// Crea un matcher con el umbral dado, limitado a `[0, 1]`.
  ///
  /// Un umbral no finito (`NaN`, `inf`) es un error de configuración.
  pub fn new(threshold: f64) -> Result<Self, RoundError> {
    Ok(Self { threshold: checked_threshold(threshold)?, ..Self::default() })
  }

  pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
    self.metric = metric;
    self
  }

  pub fn with_short_title(mut self, max_chars: usize, threshold: f64) -> Result<Self, RoundError> {
    self.short_title = Some(ShortTitleRule { max_chars, threshold: checked_threshold(threshold)? });
    Ok(self)
  }

  pub fn threshold(&self) -> f64 {
    self.threshold
  }

  pub fn metric(&self) -> SimilarityMetric {
    self.metric
  }

  pub fn short_title(&self) -> Option<ShortTitleRule> {
    self.short_title
  }

  /// Umbral efectivo para un título objetivo ya normalizado.
  pub fn threshold_for(&self, normalized_target: &str) -> f64 {
    match self.short_title {
      Some(rule) if normalized_target.chars().count() <= rule.max_chars => rule.threshold,
      _ => self.threshold,
    }
  }

  pub fn evaluate(&self, raw_guess: &str, raw_target: &str) -> MatchResult {
    self.assess(raw_guess, raw_target).result
  }

  /// Normaliza ambos textos, puntúa y decide.
  ///
  /// Un intento que queda vacío tras normalizar nunca se acepta, ni siquiera
  /// contra un título que también queda vacío.
  pub fn assess(&self, raw_guess: &str, raw_target: &str) -> Assessment {
    let normalized_guess = normalize(raw_guess);
    let normalized_target = normalize(raw_target);

    if normalized_guess.is_empty() {
      return Assessment { normalized_guess, result: MatchResult { accepted: false, similarity: 0.0 } };
    }

    let exact = normalized_guess == normalized_target;
    let similarity = if exact { 1.0 } else { self.similarity(&normalized_guess, &normalized_target) };
    let accepted = exact || similarity >= self.threshold_for(&normalized_target);

    tracing::debug!(
      guess = %normalized_guess,
      target = %normalized_target,
      similarity,
      accepted,
      "guess evaluated"
    );

    Assessment { normalized_guess, result: MatchResult { accepted, similarity } }
  }

  fn similarity(&self, normalized_guess: &str, normalized_target: &str) -> f64 {
    let mut guess = comparison_key(normalized_guess);
    let mut target = comparison_key(normalized_target);

    if guess.is_empty() || target.is_empty() {
      // solo puntuación en alguno de los lados: no hay nada que comparar
      return 0.0;
    }

    if self.metric == SimilarityMetric::TokenSort {
      guess = sort_tokens(&guess);
      target = sort_tokens(&target);
    }

    normalized_damerau_levenshtein(&guess, &target).clamp(0.0, 1.0)
  }
}

/// Contrato simple: evalúa `raw_guess` contra `raw_target` con la métrica por
/// defecto y el umbral dado. Nunca falla; un umbral `NaN` solo deja pasar
/// coincidencias exactas.
pub fn evaluate(raw_guess: &str, raw_target: &str, threshold: f64) -> MatchResult {
  GuessMatcher { threshold, ..GuessMatcher::default() }.evaluate(raw_guess, raw_target)
}

fn checked_threshold(threshold: f64) -> Result<f64, RoundError> {
  if !threshold.is_finite() {
    return Err(RoundError::Configuration(format!("threshold must be a finite number, got {threshold}")));
  }
  Ok(threshold.clamp(0.0, 1.0))
}

/// Clave de comparación: apóstrofes fuera, resto de puntuación como espacio.
/// "Don't Stop!" y "dont stop" dan la misma clave.
fn comparison_key(normalized: &str) -> String {
  let folded: String = normalized
    .chars()
    .filter(|c| !matches!(c, '\'' | '’' | '`'))
    .map(|c| if c.is_alphanumeric() { c } else { ' ' })
    .collect();

  folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn sort_tokens(key: &str) -> String {
  let mut tokens: Vec<&str> = key.split(' ').collect();
  tokens.sort_unstable();
  tokens.join(" ")
}
