// crates/spordle-core/src/errors.rs
use thiserror::Error;

use crate::domain::round::{GuessResult, RoundOutcome};

/// Errores del controlador de ronda.
///
/// - `Configuration`: escalera vacía, `max_attempts == 0`, etc. Fatal para esa
///   llamada a `start`, nunca se corrige en silencio.
/// - `InvalidState`: se envió un intento a una ronda ya terminada. Es un bug
///   del llamador, no un mensaje para el jugador.
/// - `EmptyGuess`: recuperable; el llamador vuelve a preguntar sin penalizar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoundError {
  #[error("invalid round configuration: {0}")]
  Configuration(String),

  #[error("round already finished ({0})")]
  InvalidState(RoundOutcome),

  #[error("empty guess")]
  EmptyGuess,
}

/// Una pista que no cumple sus invariantes mínimos.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
  #[error("track title is empty")]
  EmptyTitle,

  #[error("track has no artists")]
  NoArtists,
}

/// Error genérico del núcleo de Spordle.
///
/// Las capas superiores (CLI, etc.) deberían mapear este error
/// a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error(transparent)]
  Round(#[from] RoundError),

  #[error("track source error: {0}")]
  TrackSource(String),

  #[error("repository error: {0}")]
  Repository(String),

  /// La ronda terminó pero no se pudo guardar. Las estadísticas no la
  /// cuentan; `result` lleva el veredicto y el título revelado.
  #[error("round finished but was not recorded: {reason}")]
  RoundNotRecorded { result: Box<GuessResult>, reason: String },

  #[error("no more tracks left for this session")]
  NoMoreTracks,

  #[error("no round in progress")]
  NoActiveRound,
}
