use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identificador de una sesión de juego (una secuencia de rondas de un jugador).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    SessionId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    SessionId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for SessionId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for SessionId {
  fn from(u: Uuid) -> Self {
    SessionId(u)
  }
}

impl From<SessionId> for Uuid {
  fn from(id: SessionId) -> Self {
    id.0
  }
}

impl fmt::Display for SessionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador de una ronda terminada, tal como se guarda en el historial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundId(Uuid);

impl RoundId {
  pub fn new() -> Self {
    RoundId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    RoundId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for RoundId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for RoundId {
  fn from(u: Uuid) -> Self {
    RoundId(u)
  }
}

impl fmt::Display for RoundId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador opaco y estable de una pista.
///
/// Lo asigna la fuente de pistas (p. ej. el id del proveedor de streaming);
/// el núcleo solo lo compara por igualdad.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
  pub fn new(id: impl Into<String>) -> Self {
    TrackId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for TrackId {
  fn from(s: &str) -> Self {
    TrackId(s.to_owned())
  }
}

impl From<String> for TrackId {
  fn from(s: String) -> Self {
    TrackId(s)
  }
}

impl fmt::Display for TrackId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Handle opaco que se entrega al reproductor externo (URI, ruta, ...).
/// El núcleo nunca lo interpreta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayableRef(String);

impl PlayableRef {
  pub fn new(reference: impl Into<String>) -> Self {
    PlayableRef(reference.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for PlayableRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
