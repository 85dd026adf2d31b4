use serde::Serialize;

use crate::domain::ids::{PlayableRef, TrackId};
use crate::errors::TrackError;

/// La pista (Track) que hay que adivinar en una ronda.
///
/// La crea el colaborador externo que elige pistas; es inmutable mientras
/// dura la ronda.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
  id: TrackId,
  /// Título tal como lo muestra el proveedor, con anotaciones "(feat. X)" incluidas.
  title: String,
  /// Intérpretes en el orden del proveedor. Nunca vacío.
  artists: Vec<String>,
  playable_ref: PlayableRef,
}

impl Track {
  pub fn new(
    id: impl Into<TrackId>,
    title: impl Into<String>,
    artists: Vec<String>,
    playable_ref: PlayableRef,
  ) -> Result<Self, TrackError> {
    let title = title.into();
    if title.trim().is_empty() {
      return Err(TrackError::EmptyTitle);
    }
    if artists.is_empty() {
      return Err(TrackError::NoArtists);
    }

    Ok(Self { id: id.into(), title, artists, playable_ref })
  }

  pub fn id(&self) -> &TrackId {
    &self.id
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn artists(&self) -> &[String] {
    &self.artists
  }

  pub fn playable_ref(&self) -> &PlayableRef {
    &self.playable_ref
  }

  /// "Artist A, Artist B"
  pub fn artists_display(&self) -> String {
    self.artists.join(", ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_blank_title() {
    let err = Track::new("t1", "   ", vec!["A".into()], PlayableRef::new("uri")).unwrap_err();
    assert_eq!(err, TrackError::EmptyTitle);
  }

  #[test]
  fn rejects_missing_artists() {
    let err = Track::new("t1", "Song", vec![], PlayableRef::new("uri")).unwrap_err();
    assert_eq!(err, TrackError::NoArtists);
  }

  #[test]
  fn keeps_raw_title_and_artist_order() {
    let track = Track::new(
      "t1",
      "Bad Romance (Remix)",
      vec!["Lady Gaga".into(), "Kanye West".into()],
      PlayableRef::new("spotify:track:t1"),
    )
    .unwrap();

    assert_eq!(track.title(), "Bad Romance (Remix)");
    assert_eq!(track.artists_display(), "Lady Gaga, Kanye West");
    assert_eq!(track.id().as_str(), "t1");
  }
}
