use std::time::Duration;

use spordle_core::domain::Track;
use spordle_core::ports::{PlaybackError, SnippetPlayer};

/// Reproductor de terminal.
///
/// No controla ningún dispositivo: registra la petición y, si `wait` está
/// activo, espera lo que dura el fragmento para que el ritmo del juego sea el
/// mismo que con un reproductor real.
pub struct SimulatedPlayer {
  wait: bool,
}

impl SimulatedPlayer {
  pub fn new(wait: bool) -> Self {
    Self { wait }
  }
}

impl SnippetPlayer for SimulatedPlayer {
  fn play(&self, track: &Track, duration: Duration) -> Result<(), PlaybackError> {
    tracing::info!(playable = %track.playable_ref(), secs = duration.as_secs(), "playing snippet");
    if self.wait {
      std::thread::sleep(duration);
    }
    Ok(())
  }
}
