pub mod config;
pub mod models;
pub mod schema;

use std::cell::RefCell;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use uuid::Uuid;

use spordle_core::domain::{RoundId, SessionId, TrackId, Verdict};
use spordle_core::ports::{RepoError, RoundHistory, RoundRecord};

use crate::config::StorageConfig;
use crate::models::{NewPlayedTrackRow, NewRoundRow, RoundRow};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Historial de rondas sobre SQLite.
///
/// Una sola conexión; pensado para una sesión en un hilo (no es `Sync`).
pub struct SqliteRoundHistory {
  conn: RefCell<SqliteConnection>,
}

impl SqliteRoundHistory {
  /// Abre (o crea) la base de datos y aplica las migraciones pendientes.
  pub fn new(database_url: &str) -> Result<Self, RepoError> {
    let mut conn = SqliteConnection::establish(database_url).map_err(storage_err)?;
    conn.run_pending_migrations(MIGRATIONS).map_err(|e| RepoError::Storage(e.to_string()))?;

    tracing::info!(database_url, "round history opened");
    Ok(Self { conn: RefCell::new(conn) })
  }

  /// Base de datos efímera: nada sobrevive al proceso.
  pub fn in_memory() -> Result<Self, RepoError> {
    Self::new(":memory:")
  }

  /// Usa la sección `[storage]` del fichero de config.
  pub fn new_from_config() -> Result<Self, RepoError> {
    let cfg = StorageConfig::load().map_err(|e| RepoError::Storage(e.to_string()))?;
    Self::with_config(&cfg)
  }

  pub fn with_config(cfg: &StorageConfig) -> Result<Self, RepoError> {
    let journal_mode = cfg.journal_mode().map_err(|e| RepoError::Storage(e.to_string()))?;
    let repo = Self::new(&cfg.database_url())?;

    if let Some(mode) = journal_mode {
      repo.conn.borrow_mut().batch_execute(&format!("PRAGMA journal_mode = {mode};")).map_err(storage_err)?;
    }

    Ok(repo)
  }
}

fn storage_err(e: impl std::fmt::Display) -> RepoError {
  RepoError::Storage(e.to_string())
}

fn record_to_new_row(record: &RoundRecord) -> Result<NewRoundRow, RepoError> {
  let attempts_used =
    i32::try_from(record.attempts_used).map_err(|_| storage_err("attempts_used out of range"))?;

  Ok(NewRoundRow {
    round_id: record.round_id.to_string(),
    session_id: record.session_id.to_string(),
    track_id: record.track_id.to_string(),
    track_title: record.track_title.clone(),
    verdict: record.verdict.as_str().to_string(),
    attempts_used,
  })
}

fn row_to_record(row: RoundRow) -> Result<RoundRecord, RepoError> {
  let round_id = Uuid::parse_str(&row.round_id).map_err(|e| storage_err(format!("bad round_id in DB: {e}")))?;
  let session_id =
    Uuid::parse_str(&row.session_id).map_err(|e| storage_err(format!("bad session_id in DB: {e}")))?;
  let verdict: Verdict = row.verdict.parse().map_err(storage_err)?;
  let attempts_used = u32::try_from(row.attempts_used).map_err(|_| storage_err("negative attempts_used in DB"))?;

  Ok(RoundRecord {
    round_id: RoundId::from_uuid(round_id),
    session_id: SessionId::from_uuid(session_id),
    track_id: TrackId::new(row.track_id),
    track_title: row.track_title,
    verdict,
    attempts_used,
  })
}

impl RoundHistory for SqliteRoundHistory {
  fn mark_played(&self, session: SessionId, track: &TrackId) -> Result<(), RepoError> {
    use crate::schema::played_tracks::dsl::*;

    let row = NewPlayedTrackRow { session_id: session.to_string(), track_id: track.to_string() };
    let mut conn = self.conn.borrow_mut();

    // (session, track) es único: volver a marcar es un no-op
    diesel::insert_or_ignore_into(played_tracks).values(&row).execute(&mut *conn).map_err(storage_err)?;

    Ok(())
  }

  fn played_track_ids(&self, session: SessionId) -> Result<Vec<TrackId>, RepoError> {
    use crate::schema::played_tracks::dsl::*;

    let mut conn = self.conn.borrow_mut();
    let ids = played_tracks
      .filter(session_id.eq(session.to_string()))
      .order(id.asc())
      .select(track_id)
      .load::<String>(&mut *conn)
      .map_err(storage_err)?;

    Ok(ids.into_iter().map(TrackId::new).collect())
  }

  fn record_round(&self, record: &RoundRecord) -> Result<(), RepoError> {
    use crate::schema::rounds::dsl::*;

    let new_row = record_to_new_row(record)?;
    let mut conn = self.conn.borrow_mut();

    diesel::insert_into(rounds).values(&new_row).execute(&mut *conn).map_err(storage_err)?;
    tracing::debug!(round_id = %record.round_id, verdict = %record.verdict, "round recorded");

    Ok(())
  }

  fn load_records(&self, session: SessionId) -> Result<Vec<RoundRecord>, RepoError> {
    use crate::schema::rounds::dsl::*;

    let mut conn = self.conn.borrow_mut();
    let rows = rounds
      .filter(session_id.eq(session.to_string()))
      .order(id.asc())
      .select(RoundRow::as_select())
      .load(&mut *conn)
      .map_err(storage_err)?;

    rows.into_iter().map(row_to_record).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn record(session: SessionId, track: &str, verdict: Verdict, attempts: u32) -> RoundRecord {
    RoundRecord {
      round_id: RoundId::new(),
      session_id: session,
      track_id: TrackId::from(track),
      track_title: format!("Title of {track}"),
      verdict,
      attempts_used: attempts,
    }
  }

  #[test]
  fn records_round_trip_in_order() {
    let repo = SqliteRoundHistory::in_memory().unwrap();
    let session = SessionId::new();
    let other = SessionId::new();

    let first = record(session, "a", Verdict::Won, 3);
    let second = record(session, "b", Verdict::Lost, 5);
    repo.record_round(&first).unwrap();
    repo.record_round(&record(other, "z", Verdict::Won, 1)).unwrap();
    repo.record_round(&second).unwrap();

    assert_eq!(repo.load_records(session).unwrap(), vec![first, second]);
    assert_eq!(repo.load_records(other).unwrap().len(), 1);
  }

  #[test]
  fn stats_are_rebuilt_from_history() {
    let repo = SqliteRoundHistory::in_memory().unwrap();
    let session = SessionId::new();
    repo.record_round(&record(session, "a", Verdict::Won, 2)).unwrap();
    repo.record_round(&record(session, "b", Verdict::Lost, 5)).unwrap();
    repo.record_round(&record(session, "c", Verdict::Won, 4)).unwrap();

    let stats = repo.load_stats(session).unwrap();
    assert_eq!(stats.rounds_won(), 2);
    assert_eq!(stats.rounds_lost(), 1);
    assert_eq!(stats.attempts_on_win(), &[2, 4]);
    assert_eq!(stats.average_attempts_on_win(), Some(3.0));

    assert_eq!(repo.load_stats(SessionId::new()).unwrap().average_attempts_on_win(), None);
  }

  #[test]
  fn played_tracks_are_unique_per_session() {
    let repo = SqliteRoundHistory::in_memory().unwrap();
    let session = SessionId::new();

    repo.mark_played(session, &TrackId::from("a")).unwrap();
    repo.mark_played(session, &TrackId::from("b")).unwrap();
    repo.mark_played(session, &TrackId::from("a")).unwrap();
    repo.mark_played(SessionId::new(), &TrackId::from("c")).unwrap();

    assert_eq!(repo.played_track_ids(session).unwrap(), vec![TrackId::from("a"), TrackId::from("b")]);
  }

  #[test]
  fn history_survives_reopening_the_file() {
    let dir = tempdir().unwrap();
    let cfg = StorageConfig { db_path: dir.path().join("spordle.db"), journal_mode: Some("wal".into()) };
    let session = SessionId::new();

    {
      let repo = SqliteRoundHistory::with_config(&cfg).unwrap();
      repo.mark_played(session, &TrackId::from("a")).unwrap();
      repo.record_round(&record(session, "a", Verdict::Won, 1)).unwrap();
    }

    let reopened = SqliteRoundHistory::with_config(&cfg).unwrap();
    assert_eq!(reopened.played_track_ids(session).unwrap(), vec![TrackId::from("a")]);
    assert_eq!(reopened.load_stats(session).unwrap().rounds_won(), 1);
  }
}
