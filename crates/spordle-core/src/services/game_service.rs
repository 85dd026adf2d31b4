use std::collections::HashSet;
use std::time::Duration;

use crate::domain::{GameRules, GuessResult, RoundId, RoundState, SessionId, SessionStats, TrackId};
use crate::errors::CoreError;
use crate::ports::{RoundHistory, RoundRecord, TrackSource};

/// Orquesta una sesión de un jugador.
///
/// Guarda explícitamente la ronda actual, las estadísticas y las pistas ya
/// jugadas; no hay estado global. Para varias sesiones concurrentes, una
/// instancia por sesión y el llamador serializa el acceso a cada una.
pub struct GameService<T, H>
where
  T: TrackSource,
  H: RoundHistory,
{
  tracks: T,
  history: H,
  rules: GameRules,
  session_id: SessionId,
  stats: SessionStats,
  played: HashSet<TrackId>,
  round: Option<RoundState>,
}

impl<T, H> GameService<T, H>
where
  T: TrackSource,
  H: RoundHistory,
{
  /// Sesión nueva: estadísticas a cero y ninguna pista jugada.
  pub fn new(tracks: T, history: H, rules: GameRules) -> Self {
    let session_id = SessionId::new();
    tracing::info!(%session_id, "new game session");

    Self {
      tracks,
      history,
      rules,
      session_id,
      stats: SessionStats::new(),
      played: HashSet::new(),
      round: None,
    }
  }

  /// Retoma una sesión guardada: recupera estadísticas y pistas jugadas.
  pub fn resume(tracks: T, history: H, rules: GameRules, session_id: SessionId) -> Result<Self, CoreError> {
    let stats = history.load_stats(session_id).map_err(|e| CoreError::Repository(e.to_string()))?;
    let played: HashSet<TrackId> = history
      .played_track_ids(session_id)
      .map_err(|e| CoreError::Repository(e.to_string()))?
      .into_iter()
      .collect();

    tracing::info!(%session_id, played = played.len(), rounds = stats.rounds_played(), "game session resumed");

    Ok(Self { tracks, history, rules, session_id, stats, played, round: None })
  }

  /// Siembra la siguiente pista y arranca su ronda.
  ///
  /// Si había una ronda en curso se descarta entera (sin estadísticas ni
  /// historial): empezar otra ronda es el mecanismo de cancelación.
  pub fn next_round(&mut self) -> Result<&RoundState, CoreError> {
    if let Some(prev) = &self.round {
      if !prev.outcome().is_terminal() {
        tracing::info!(track_id = %prev.track().id(), "discarding unfinished round");
      }
    }
    self.round = None;

    // 1) Pedir una pista no jugada
    let track = self
      .tracks
      .pick(&self.played)
      .map_err(|e| CoreError::TrackSource(e.to_string()))?
      .ok_or(CoreError::NoMoreTracks)?;

    if self.played.contains(track.id()) {
      return Err(CoreError::TrackSource(format!("source returned an excluded track: {}", track.id())));
    }

    // 2) Arrancar la ronda antes de marcarla: una configuración inválida no
    //    debe "gastar" la pista
    let round = self.rules.start_round(track)?;

    // 3) Marcar como jugada
    let track_id = round.track().id().clone();
    self.history.mark_played(self.session_id, &track_id).map_err(|e| CoreError::Repository(e.to_string()))?;
    self.played.insert(track_id);

    Ok(&*self.round.insert(round))
  }

  /// Envía un intento a la ronda actual.
  ///
  /// Al terminar la ronda guarda el registro en el historial y, solo si se
  /// guardó, lo suma a las estadísticas. Así las estadísticas en memoria y
  /// las reconstruidas al retomar la sesión siempre coinciden.
  ///
  /// Si el guardado falla se devuelve [`CoreError::RoundNotRecorded`] con el
  /// resultado dentro: la ronda ya es terminal y el llamador aún necesita el
  /// título revelado.
  pub fn submit_guess(&mut self, raw_guess: &str) -> Result<GuessResult, CoreError> {
    let round = self.round.as_mut().ok_or(CoreError::NoActiveRound)?;
    let result = round.submit_guess(raw_guess, self.rules.matcher())?;

    let Some(verdict) = result.outcome.verdict() else {
      return Ok(result);
    };

    let record = RoundRecord {
      round_id: RoundId::new(),
      session_id: self.session_id,
      track_id: round.track().id().clone(),
      track_title: round.track().title().to_owned(),
      verdict,
      attempts_used: result.attempts_used,
    };

    if let Err(e) = self.history.record_round(&record) {
      tracing::error!(error = %e, round_id = %record.round_id, "could not record finished round");
      return Err(CoreError::RoundNotRecorded { result: Box::new(result), reason: e.to_string() });
    }

    self.stats.record(verdict, result.attempts_used);
    Ok(result)
  }

  /// Duración del fragmento de la ronda actual, si hay una.
  pub fn snippet_duration(&self) -> Option<Duration> {
    self.round.as_ref().map(RoundState::current_snippet_duration)
  }

  pub fn current_round(&self) -> Option<&RoundState> {
    self.round.as_ref()
  }

  pub fn stats(&self) -> &SessionStats {
    &self.stats
  }

  pub fn session_id(&self) -> SessionId {
    self.session_id
  }

  pub fn rules(&self) -> &GameRules {
    &self.rules
  }

  pub fn played_count(&self) -> usize {
    self.played.len()
  }
}
