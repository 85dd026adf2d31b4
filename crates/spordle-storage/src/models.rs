use crate::schema::played_tracks;
use crate::schema::rounds;

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = rounds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RoundRow {
  pub id: i32,
  pub round_id: String,
  pub session_id: String,
  pub track_id: String,
  pub track_title: String,
  pub verdict: String,
  pub attempts_used: i32,
  pub finished_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = rounds)]
pub struct NewRoundRow {
  pub round_id: String,
  pub session_id: String,
  pub track_id: String,
  pub track_title: String,
  pub verdict: String,
  pub attempts_used: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = played_tracks)]
pub struct NewPlayedTrackRow {
  pub session_id: String,
  pub track_id: String,
}
