use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::round::Verdict;

/// Contadores acumulados de una sesión.
///
/// Solo cambian al terminar una ronda ([`SessionStats::record`]). Se
/// reinician creando una sesión nueva, nunca en medio de una.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
  rounds_won: u32,
  rounds_lost: u32,
  /// Número de intento (base 1) de cada victoria, en orden cronológico.
  attempts_on_win: Vec<u32>,
}

impl SessionStats {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reconstruye las estadísticas a partir de rondas ya guardadas, en orden.
  pub fn from_records<I>(records: I) -> Self
  where
    I: IntoIterator<Item = (Verdict, u32)>,
  {
    let mut stats = Self::new();
    for (verdict, attempts_used) in records {
      stats.record(verdict, attempts_used);
    }
    stats
  }

  pub fn record(&mut self, verdict: Verdict, attempts_used: u32) {
    match verdict {
      Verdict::Won => {
        self.rounds_won += 1;
        self.attempts_on_win.push(attempts_used);
      }
      Verdict::Lost => self.rounds_lost += 1,
    }
  }

  pub fn rounds_won(&self) -> u32 {
    self.rounds_won
  }

  pub fn rounds_lost(&self) -> u32 {
    self.rounds_lost
  }

  pub fn rounds_played(&self) -> u32 {
    self.rounds_won + self.rounds_lost
  }

  pub fn attempts_on_win(&self) -> &[u32] {
    &self.attempts_on_win
  }

  /// Media de intentos en las victorias; `None` si aún no hay ninguna
  /// (el consumidor lo muestra como "—", nunca como 0 ni NaN).
  pub fn average_attempts_on_win(&self) -> Option<f64> {
    if self.rounds_won == 0 {
      return None;
    }
    let total: u64 = self.attempts_on_win.iter().map(|&a| u64::from(a)).sum();
    Some(total as f64 / f64::from(self.rounds_won))
  }

  /// Victorias por número de intento.
  pub fn attempt_distribution(&self) -> BTreeMap<u32, u32> {
    let mut dist = BTreeMap::new();
    for &attempt in &self.attempts_on_win {
      *dist.entry(attempt).or_insert(0) += 1;
    }
    dist
  }

  pub fn snapshot(&self) -> StatsSnapshot {
    StatsSnapshot {
      rounds_won: self.rounds_won,
      rounds_lost: self.rounds_lost,
      average_attempts_on_win: self.average_attempts_on_win(),
    }
  }
}

/// Vista de solo lectura para mostrar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSnapshot {
  pub rounds_won: u32,
  pub rounds_lost: u32,
  pub average_attempts_on_win: Option<f64>,
}

impl fmt::Display for StatsSnapshot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "won {} · lost {} · avg attempts ", self.rounds_won, self.rounds_lost)?;
    match self.average_attempts_on_win {
      Some(avg) => write!(f, "{avg:.2}"),
      None => f.write_str("—"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_wins_means_no_average() {
    let mut stats = SessionStats::new();
    assert_eq!(stats.average_attempts_on_win(), None);

    stats.record(Verdict::Lost, 5);
    assert_eq!(stats.average_attempts_on_win(), None);
    assert_eq!(stats.snapshot().to_string(), "won 0 · lost 1 · avg attempts —");
  }

  #[test]
  fn wins_track_attempts_in_order() {
    let mut stats = SessionStats::new();
    stats.record(Verdict::Won, 3);
    stats.record(Verdict::Lost, 5);
    stats.record(Verdict::Won, 1);

    assert_eq!(stats.rounds_won(), 2);
    assert_eq!(stats.rounds_lost(), 1);
    assert_eq!(stats.rounds_played(), 3);
    assert_eq!(stats.attempts_on_win(), &[3, 1]);
    assert_eq!(stats.attempts_on_win().len() as u32, stats.rounds_won());
    assert_eq!(stats.average_attempts_on_win(), Some(2.0));
    assert_eq!(stats.snapshot().to_string(), "won 2 · lost 1 · avg attempts 2.00");
  }

  #[test]
  fn distribution_counts_wins_per_attempt() {
    let stats =
      SessionStats::from_records([(Verdict::Won, 1), (Verdict::Won, 3), (Verdict::Won, 1), (Verdict::Lost, 5)]);

    let dist = stats.attempt_distribution();
    assert_eq!(dist.get(&1), Some(&2));
    assert_eq!(dist.get(&3), Some(&1));
    assert_eq!(dist.get(&5), None);
  }
}
