use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::track::Track;
use crate::errors::RoundError;
use crate::matching::GuessMatcher;

/// Estado de una ronda. `Won` y `Lost` son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
  InProgress,
  Won,
  Lost,
}

impl RoundOutcome {
  pub fn is_terminal(&self) -> bool {
    !matches!(self, RoundOutcome::InProgress)
  }

  /// El veredicto final, si la ronda terminó.
  pub fn verdict(&self) -> Option<Verdict> {
    match self {
      RoundOutcome::InProgress => None,
      RoundOutcome::Won => Some(Verdict::Won),
      RoundOutcome::Lost => Some(Verdict::Lost),
    }
  }
}

impl fmt::Display for RoundOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RoundOutcome::InProgress => f.write_str("in progress"),
      RoundOutcome::Won => f.write_str("won"),
      RoundOutcome::Lost => f.write_str("lost"),
    }
  }
}

/// Resultado de una ronda terminada.
///
/// Es el subconjunto terminal de [`RoundOutcome`]; lo usan las estadísticas y
/// el historial, donde una ronda "en curso" no tiene sentido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
  Won,
  Lost,
}

impl Verdict {
  pub fn as_str(&self) -> &'static str {
    match self {
      Verdict::Won => "won",
      Verdict::Lost => "lost",
    }
  }
}

impl From<Verdict> for RoundOutcome {
  fn from(v: Verdict) -> Self {
    match v {
      Verdict::Won => RoundOutcome::Won,
      Verdict::Lost => RoundOutcome::Lost,
    }
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Verdict {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "won" => Ok(Verdict::Won),
      "lost" => Ok(Verdict::Lost),
      other => Err(format!("unknown verdict: {other}")),
    }
  }
}

/// Escalera de duraciones (segundos) que se ofrecen intento tras intento.
///
/// Nunca vacía, no decreciente, sin peldaños de cero segundos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SnippetLadder(Vec<u32>);

impl SnippetLadder {
  pub fn new(secs: &[u32]) -> Result<Self, RoundError> {
    if secs.is_empty() {
      return Err(RoundError::Configuration("snippet ladder is empty".into()));
    }
    if secs.contains(&0) {
      return Err(RoundError::Configuration("snippet ladder has a zero-second rung".into()));
    }
    if secs.windows(2).any(|w| w[0] > w[1]) {
      return Err(RoundError::Configuration(format!("snippet ladder must be non-decreasing: {secs:?}")));
    }

    Ok(Self(secs.to_vec()))
  }

  /// Peldaño para el intento `index` (base 0). Pasado el final se queda en el
  /// último peldaño.
  pub fn rung(&self, index: u32) -> u32 {
    let last = self.0.len() - 1;
    self.0[(index as usize).min(last)]
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn as_secs(&self) -> &[u32] {
    &self.0
  }
}

/// Una entrada del log de intentos, en orden de envío.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessEntry {
  pub guess_text: String,
  pub normalized_guess: String,
  pub accepted: bool,
  pub similarity: f64,
}

/// Lo que se devuelve al front end tras cada intento.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessResult {
  pub accepted: bool,
  pub similarity: f64,
  pub outcome: RoundOutcome,
  pub attempts_used: u32,
  pub attempts_remaining: u32,
  /// Título crudo (no normalizado). Solo presente cuando la ronda terminó.
  pub revealed_title: Option<String>,
}

/// Estado mutable de una ronda para una pista.
///
/// Solo cambia a través de [`RoundState::submit_guess`]. Una ronda nueva
/// reemplaza a la anterior por completo; no existe un estado "abortado".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundState {
  track: Track,
  attempt_index: u32,
  ladder: SnippetLadder,
  max_attempts: u32,
  guess_log: Vec<GuessEntry>,
  outcome: RoundOutcome,
}

impl RoundState {
  /// Arranca una ronda `InProgress` para `track`.
  pub fn start(track: Track, ladder: &[u32], max_attempts: u32) -> Result<Self, RoundError> {
    let ladder = SnippetLadder::new(ladder)?;
    if max_attempts == 0 {
      return Err(RoundError::Configuration("max_attempts must be at least 1".into()));
    }

    tracing::info!(track_id = %track.id(), max_attempts, ladder = ?ladder.as_secs(), "round started");

    Ok(Self {
      track,
      attempt_index: 0,
      ladder,
      max_attempts,
      guess_log: Vec::new(),
      outcome: RoundOutcome::InProgress,
    })
  }

  /// Duración del fragmento a reproducir ahora.
  ///
  /// Solo avanza tras un intento fallido completo; si `max_attempts` supera la
  /// longitud de la escalera se repite el último peldaño.
  pub fn current_snippet_duration(&self) -> Duration {
    Duration::from_secs(u64::from(self.ladder.rung(self.attempt_index)))
  }

  /// Procesa un intento.
  ///
  /// Orden: estado terminal → `InvalidState`; texto vacío tras recortar →
  /// `EmptyGuess` (no consume intento ni deja entrada en el log). Si no, se
  /// evalúa, se registra y se avanza el contador; acertar gana incluso en el
  /// último intento.
  pub fn submit_guess(&mut self, raw_guess: &str, matcher: &GuessMatcher) -> Result<GuessResult, RoundError> {
    if self.outcome.is_terminal() {
      return Err(RoundError::InvalidState(self.outcome));
    }
    if raw_guess.trim().is_empty() {
      return Err(RoundError::EmptyGuess);
    }

    let assessment = matcher.assess(raw_guess, self.track.title());
    let accepted = assessment.result.accepted;
    let similarity = assessment.result.similarity;

    self.guess_log.push(GuessEntry {
      guess_text: raw_guess.to_owned(),
      normalized_guess: assessment.normalized_guess,
      accepted,
      similarity,
    });
    self.attempt_index += 1;

    if accepted {
      self.outcome = RoundOutcome::Won;
    } else if self.attempt_index >= self.max_attempts {
      self.outcome = RoundOutcome::Lost;
    }

    if self.outcome.is_terminal() {
      tracing::info!(
        track_id = %self.track.id(),
        outcome = %self.outcome,
        attempts = self.attempt_index,
        "round finished"
      );
    }

    Ok(GuessResult {
      accepted,
      similarity,
      outcome: self.outcome,
      attempts_used: self.attempt_index,
      attempts_remaining: self.attempts_remaining(),
      revealed_title: self.outcome.is_terminal().then(|| self.track.title().to_owned()),
    })
  }

  pub fn track(&self) -> &Track {
    &self.track
  }

  pub fn outcome(&self) -> RoundOutcome {
    self.outcome
  }

  /// Intentos ya consumidos (base 0 para el siguiente intento).
  pub fn attempt_index(&self) -> u32 {
    self.attempt_index
  }

  pub fn max_attempts(&self) -> u32 {
    self.max_attempts
  }

  pub fn attempts_remaining(&self) -> u32 {
    self.max_attempts.saturating_sub(self.attempt_index)
  }

  pub fn ladder(&self) -> &SnippetLadder {
    &self.ladder
  }

  pub fn guess_log(&self) -> &[GuessEntry] {
    &self.guess_log
  }
}
