use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cell::RefCell;
use std::collections::HashSet;

use spordle_core::domain::{Track, TrackId};
use spordle_core::ports::{TrackSource, TrackSourceError};

use crate::catalog::{Catalog, CatalogError};
use crate::config::CatalogConfig;

/// Implementación de `TrackSource` sobre un catálogo en memoria.
///
/// Elige al azar, de forma uniforme, entre las pistas no excluidas.
pub struct CatalogTrackSource {
  catalog: Catalog,
  rng: RefCell<StdRng>,
}

impl CatalogTrackSource {
  pub fn new(catalog: Catalog) -> Self {
    Self { catalog, rng: RefCell::new(StdRng::from_entropy()) }
  }

  /// Misma secuencia de elecciones para la misma semilla.
  pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
    Self { catalog, rng: RefCell::new(StdRng::seed_from_u64(seed)) }
  }

  /// Carga las fuentes de la sección `[catalog]` del fichero de config.
  pub fn from_config() -> Result<Self, CatalogError> {
    let cfg = CatalogConfig::load()?;
    Ok(Self::new(Catalog::load(&cfg.sources)?))
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }
}

impl TrackSource for CatalogTrackSource {
  fn pick(&self, exclude: &HashSet<TrackId>) -> Result<Option<Track>, TrackSourceError> {
    let candidates: Vec<&Track> = self.catalog.tracks().iter().filter(|t| !exclude.contains(t.id())).collect();

    let mut rng = self
      .rng
      .try_borrow_mut()
      .map_err(|_| TrackSourceError::Internal("track source rng already in use".to_string()))?;

    let picked = candidates.choose(&mut *rng).map(|t| (*t).clone());
    tracing::debug!(candidates = candidates.len(), picked = ?picked.as_ref().map(|t| t.id()), "track picked");
    Ok(picked)
  }
}
