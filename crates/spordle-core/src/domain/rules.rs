use serde::Serialize;

use crate::domain::round::{RoundState, SnippetLadder};
use crate::domain::track::Track;
use crate::errors::RoundError;
use crate::matching::GuessMatcher;

/// Constantes de una partida: escalera, límite de intentos y matcher.
///
/// Se validan una vez al construirlas, así un error de configuración aparece
/// al arrancar y no a mitad de la sesión.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRules {
  ladder: SnippetLadder,
  max_attempts: u32,
  matcher: GuessMatcher,
}

impl Default for GameRules {
  fn default() -> Self {
    Self {
      ladder: SnippetLadder::new(&Self::DEFAULT_LADDER).expect("default ladder is valid"),
      max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
      matcher: GuessMatcher::default(),
    }
  }
}

impl GameRules {
  pub const DEFAULT_LADDER: [u32; 5] = [1, 2, 5, 7, 10];
  pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

  pub fn new(ladder: &[u32], max_attempts: u32, matcher: GuessMatcher) -> Result<Self, RoundError> {
    let ladder = SnippetLadder::new(ladder)?;
    if max_attempts == 0 {
      return Err(RoundError::Configuration("max_attempts must be at least 1".into()));
    }
    Ok(Self { ladder, max_attempts, matcher })
  }

  pub fn start_round(&self, track: Track) -> Result<RoundState, RoundError> {
    RoundState::start(track, self.ladder.as_secs(), self.max_attempts)
  }

  pub fn ladder(&self) -> &SnippetLadder {
    &self.ladder
  }

  pub fn max_attempts(&self) -> u32 {
    self.max_attempts
  }

  pub fn matcher(&self) -> &GuessMatcher {
    &self.matcher
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ids::PlayableRef;

  #[test]
  fn defaults_match_the_classic_game() {
    let rules = GameRules::default();
    assert_eq!(rules.ladder().as_secs(), &[1, 2, 5, 7, 10]);
    assert_eq!(rules.max_attempts(), 5);
    assert_eq!(rules.matcher().threshold(), 0.82);
  }

  #[test]
  fn invalid_rules_fail_early() {
    assert!(GameRules::new(&[], 3, GuessMatcher::default()).is_err());
    assert!(GameRules::new(&[1], 0, GuessMatcher::default()).is_err());
  }

  #[test]
  fn max_attempts_may_exceed_ladder_length() {
    let rules = GameRules::new(&[3], 4, GuessMatcher::default()).unwrap();
    let track = Track::new("t", "Song", vec!["A".into()], PlayableRef::new("u")).unwrap();
    let round = rules.start_round(track).unwrap();
    assert_eq!(round.max_attempts(), 4);
    assert_eq!(round.current_snippet_duration().as_secs(), 3);
  }
}
