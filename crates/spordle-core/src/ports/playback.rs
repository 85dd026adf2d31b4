use std::time::Duration;

use crate::domain::Track;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
  #[error("no playback device available")]
  Unavailable,
}

/// Port de reproducción de fragmentos.
///
/// El núcleo nunca lo llama: solo calcula `current_snippet_duration` y el
/// front end decide cómo (y si) reproducir. Tampoco sabe si la reproducción
/// funcionó.
pub trait SnippetPlayer {
  fn play(&self, track: &Track, duration: Duration) -> Result<(), PlaybackError>;
}
