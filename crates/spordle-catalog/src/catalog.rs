use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use spordle_core::domain::{PlayableRef, Track, TrackId};

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("io error reading {path:?}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("parse error in {path:?}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("config error: {0}")]
  Config(#[from] spordle_config::ConfigError),
}

/// Una pista tal como aparece en un fichero de catálogo:
///
/// ```toml
/// [[tracks]]
/// id = "0e7ipj03S05BNilyu5bRzt"
/// title = "rockstar (feat. 21 Savage)"
/// artists = ["Post Malone", "21 Savage"]
/// uri = "spotify:track:0e7ipj03S05BNilyu5bRzt"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub artists: Vec<String>,
  pub uri: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
  #[serde(default)]
  tracks: Vec<CatalogEntry>,
}

/// Conjunto de pistas candidatas, sin ids repetidos.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  tracks: Vec<Track>,
}

impl Catalog {
  /// Construye el catálogo respetando el orden de entrada.
  ///
  /// - ids repetidos: gana la primera aparición;
  /// - entradas que no forman una `Track` válida (título vacío, sin artistas)
  ///   se descartan con un warning.
  pub fn from_entries<I>(entries: I) -> Self
  where
    I: IntoIterator<Item = CatalogEntry>,
  {
    let mut seen: HashSet<TrackId> = HashSet::new();
    let mut tracks = Vec::new();

    for entry in entries {
      let id = TrackId::new(entry.id.trim());
      if id.as_str().is_empty() {
        tracing::warn!(title = %entry.title, "catalog entry without id skipped");
        continue;
      }
      if seen.contains(&id) {
        continue;
      }

      match Track::new(id.clone(), entry.title, entry.artists, PlayableRef::new(entry.uri)) {
        Ok(track) => {
          seen.insert(id);
          tracks.push(track);
        }
        Err(e) => tracing::warn!(track_id = %id, error = %e, "invalid catalog entry skipped"),
      }
    }

    Self { tracks }
  }

  pub fn parse(path: &Path, text: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let file: CatalogFile =
      toml::from_str(text).map_err(|source| CatalogError::Parse { path: path.to_path_buf(), source })?;
    Ok(file.tracks)
  }

  /// Lee y fusiona varios ficheros en orden.
  ///
  /// Un fichero inexistente se ignora (con warning): cada fuente es opcional.
  /// Cualquier otro error de lectura o de formato se devuelve.
  pub fn load(sources: &[PathBuf]) -> Result<Self, CatalogError> {
    let mut entries = Vec::new();

    for path in sources {
      let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
          tracing::warn!(path = %path.display(), "catalog source not found, skipping");
          continue;
        }
        Err(source) => return Err(CatalogError::Io { path: path.clone(), source }),
      };

      let parsed = Self::parse(path, &text)?;
      tracing::debug!(path = %path.display(), entries = parsed.len(), "catalog source read");
      entries.extend(parsed);
    }

    let catalog = Self::from_entries(entries);
    tracing::info!(tracks = catalog.len(), sources = sources.len(), "catalog loaded");
    Ok(catalog)
  }

  pub fn tracks(&self) -> &[Track] {
    &self.tracks
  }

  pub fn len(&self) -> usize {
    self.tracks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tracks.is_empty()
  }
}
