use std::io::{self, Write};
use std::time::Duration;

use spordle_core::domain::{GuessResult, RoundOutcome, RoundState, SessionStats};

pub fn round_header<W: Write>(out: &mut W, number: u32, round: &RoundState) -> io::Result<()> {
  writeln!(out)?;
  writeln!(out, "── Round {number} ── {} attempts", round.max_attempts())
}

pub fn snippet<W: Write>(out: &mut W, round: &RoundState, duration: Duration) -> io::Result<()> {
  writeln!(
    out,
    "▶ {}s snippet (attempt {}/{})",
    duration.as_secs(),
    round.attempt_index() + 1,
    round.max_attempts()
  )
}

pub fn guess_result<W: Write>(out: &mut W, result: &GuessResult) -> io::Result<()> {
  if result.accepted {
    writeln!(out, "✅ Correct! (similarity {:.2})", result.similarity)?;
  } else {
    let left = match result.attempts_remaining {
      1 => "1 attempt left".to_string(),
      n => format!("{n} attempts left"),
    };
    writeln!(out, "❌ Not quite (similarity {:.2}) · {left}", result.similarity)?;
  }

  if let Some(title) = &result.revealed_title {
    let verdict = match result.outcome {
      RoundOutcome::Won => format!("Solved in {}", plural(result.attempts_used, "attempt")),
      _ => "Out of attempts".to_string(),
    };
    writeln!(out, "🎵 {verdict}. It was \"{title}\"")?;
  }

  Ok(())
}

pub fn artists<W: Write>(out: &mut W, round: &RoundState) -> io::Result<()> {
  writeln!(out, "   by {}", round.track().artists_display())
}

/// Resumen de la sesión con la distribución de victorias por intento.
pub fn stats<W: Write>(out: &mut W, stats: &SessionStats) -> io::Result<()> {
  writeln!(out, "{}", stats.snapshot())?;

  let dist = stats.attempt_distribution();
  let widest = dist.values().copied().max().unwrap_or(0);
  for (attempt, wins) in dist {
    let bar = "█".repeat(scaled(wins, widest, 20));
    writeln!(out, "  {attempt:>2} │ {bar} {wins}")?;
  }
  Ok(())
}

fn scaled(value: u32, max: u32, width: u32) -> usize {
  if max == 0 {
    return 0;
  }
  // al menos un bloque para cualquier valor > 0
  (value * width).div_ceil(max) as usize
}

fn plural(n: u32, word: &str) -> String {
  if n == 1 { format!("{n} {word}") } else { format!("{n} {word}s") }
}

#[cfg(test)]
mod tests {
  use super::*;
  use spordle_core::domain::Verdict;

  fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
  }

  #[test]
  fn wrong_guess_shows_remaining_attempts() {
    let result = GuessResult {
      accepted: false,
      similarity: 0.4,
      outcome: RoundOutcome::InProgress,
      attempts_used: 4,
      attempts_remaining: 1,
      revealed_title: None,
    };

    let text = render(|out| guess_result(out, &result));
    assert!(text.contains("❌"));
    assert!(text.contains("1 attempt left"));
    assert!(!text.contains("It was"));
  }

  #[test]
  fn finished_round_reveals_raw_title() {
    let result = GuessResult {
      accepted: true,
      similarity: 1.0,
      outcome: RoundOutcome::Won,
      attempts_used: 2,
      attempts_remaining: 3,
      revealed_title: Some("Bad Romance (Remix)".into()),
    };

    let text = render(|out| guess_result(out, &result));
    assert!(text.contains("✅"));
    assert!(text.contains("Solved in 2 attempts"));
    assert!(text.contains("\"Bad Romance (Remix)\""));
  }

  #[test]
  fn stats_without_wins_show_dash() {
    let stats = SessionStats::from_records([(Verdict::Lost, 5)]);
    let text = render(|out| super::stats(out, &stats));
    assert!(text.contains("avg attempts —"));
  }

  #[test]
  fn distribution_bars_scale_to_widest() {
    let stats = SessionStats::from_records([(Verdict::Won, 1), (Verdict::Won, 1), (Verdict::Won, 3)]);
    let text = render(|out| super::stats(out, &stats));
    assert!(text.contains(&format!(" 1 │ {} 2", "█".repeat(20))));
    assert!(text.contains(&format!(" 3 │ {} 1", "█".repeat(10))));
  }
}
