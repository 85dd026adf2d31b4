use std::collections::HashSet;

use crate::domain::{Track, TrackId};

#[derive(Debug, thiserror::Error)]
pub enum TrackSourceError {
  #[error("internal error: {0}")]
  Internal(String),
}

/// Port de suministro de pistas.
///
/// La política de selección (pista actual, recientes, top, azar...) vive
/// entera en el adapter. El núcleo solo pide "una pista que no esté en
/// `exclude`"; `Ok(None)` significa que no quedan candidatas.
pub trait TrackSource {
  fn pick(&self, exclude: &HashSet<TrackId>) -> Result<Option<Track>, TrackSourceError>;
}
