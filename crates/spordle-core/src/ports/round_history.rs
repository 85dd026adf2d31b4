use serde::{Deserialize, Serialize};

use crate::domain::{RoundId, SessionId, SessionStats, TrackId, Verdict};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("storage error: {0}")]
  Storage(String),
}

/// Lo que se guarda de cada ronda terminada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
  pub round_id: RoundId,
  pub session_id: SessionId,
  pub track_id: TrackId,
  pub track_title: String,
  pub verdict: Verdict,
  pub attempts_used: u32,
}

/// Port de persistencia del historial de rondas.
///
/// El formato de almacenamiento (memoria, fichero, base de datos) es cosa del
/// adapter. Los registros se devuelven en el orden en que se guardaron.
///
/// Una pista cuenta como jugada desde que se siembra la ronda, aunque la
/// ronda se descarte sin terminar: por eso `mark_played` va aparte de
/// `record_round`.
pub trait RoundHistory {
  fn mark_played(&self, session: SessionId, track_id: &TrackId) -> Result<(), RepoError>;

  fn played_track_ids(&self, session: SessionId) -> Result<Vec<TrackId>, RepoError>;

  fn record_round(&self, record: &RoundRecord) -> Result<(), RepoError>;

  fn load_records(&self, session: SessionId) -> Result<Vec<RoundRecord>, RepoError>;

  fn load_stats(&self, session: SessionId) -> Result<SessionStats, RepoError> {
    let records = self.load_records(session)?;
    Ok(SessionStats::from_records(records.into_iter().map(|r| (r.verdict, r.attempts_used))))
  }
}
