use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Duration;

use spordle_core::errors::{CoreError, RoundError};
use spordle_core::ports::{RoundHistory, SnippetPlayer, TrackSource};
use spordle_core::services::GameService;

use crate::render;

const QUIT: &str = ":quit";
const REPLAY: &str = ":replay";

#[derive(Debug, Clone)]
pub struct PlayOptions {
  /// Máximo de rondas en esta ejecución; `None` hasta agotar el catálogo.
  pub rounds: Option<u32>,
  pub reveal_pause: Duration,
}

/// Por qué terminó el bucle de juego.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
  Quit,
  InputClosed,
  NoMoreTracks,
  RoundLimit,
}

enum Prompt {
  Guess(String),
  Replay,
  Quit,
  Closed,
}

/// Bucle interactivo: una ronda tras otra hasta que el jugador sale, se
/// acaban las pistas o se llega al límite de rondas.
///
/// Los intentos vacíos vuelven a preguntar sin gastar intento; `:replay`
/// repite el fragmento actual.
pub fn run<T, H, P, R, W>(
  game: &mut GameService<T, H>,
  player: &P,
  input: &mut R,
  out: &mut W,
  opts: &PlayOptions,
) -> Result<SessionEnd>
where
  T: TrackSource,
  H: RoundHistory,
  P: SnippetPlayer,
  R: BufRead,
  W: Write,
{
  writeln!(out, "Type the song title. {REPLAY} plays the snippet again, {QUIT} leaves.")?;
  let mut played = 0u32;

  loop {
    if opts.rounds.is_some_and(|limit| played >= limit) {
      return Ok(SessionEnd::RoundLimit);
    }

    match game.next_round() {
      Ok(round) => {
        played += 1;
        render::round_header(out, played, round)?;
      }
      Err(CoreError::NoMoreTracks) => {
        writeln!(out, "No more tracks left in the catalog.")?;
        return Ok(SessionEnd::NoMoreTracks);
      }
      Err(e) => return Err(e).context("could not start the next round"),
    }

    'attempt: loop {
      let round = game.current_round().context("round vanished mid-play")?;
      let duration = round.current_snippet_duration();
      render::snippet(out, round, duration)?;
      out.flush()?;

      if let Err(e) = player.play(round.track(), duration) {
        tracing::warn!(error = %e, "snippet playback failed");
        writeln!(out, "(playback failed: {e})")?;
      }

      loop {
        let guess = match prompt(input, out)? {
          Prompt::Guess(g) => g,
          Prompt::Replay => continue 'attempt,
          Prompt::Quit => return Ok(SessionEnd::Quit),
          Prompt::Closed => return Ok(SessionEnd::InputClosed),
        };

        let (result, unsaved) = match game.submit_guess(&guess) {
          Ok(r) => (r, None),
          Err(CoreError::Round(RoundError::EmptyGuess)) => continue,
          Err(CoreError::RoundNotRecorded { result, reason }) => (*result, Some(reason)),
          Err(e) => return Err(e).context("guess rejected"),
        };

        render::guess_result(out, &result)?;
        if let Some(reason) = unsaved {
          writeln!(out, "(this round could not be saved and does not count: {reason})")?;
        }
        if !result.outcome.is_terminal() {
          continue 'attempt;
        }

        if let Some(round) = game.current_round() {
          render::artists(out, round)?;
        }
        out.flush()?;
        if !opts.reveal_pause.is_zero() {
          std::thread::sleep(opts.reveal_pause);
        }
        break 'attempt;
      }
    }
  }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Prompt> {
  write!(out, "guess> ")?;
  out.flush()?;

  let mut line = String::new();
  if input.read_line(&mut line).context("reading guess")? == 0 {
    return Ok(Prompt::Closed);
  }

  let line = line.trim_end_matches(['\r', '\n']);
  Ok(match line.trim() {
    QUIT => Prompt::Quit,
    REPLAY => Prompt::Replay,
    _ => Prompt::Guess(line.to_string()),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use spordle_catalog::{Catalog, CatalogEntry, CatalogTrackSource};
  use spordle_core::domain::{GameRules, SessionId, Track, TrackId};
  use spordle_core::ports::{PlaybackError, RepoError, RoundRecord};
  use spordle_storage::SqliteRoundHistory;
  use std::cell::RefCell;
  use std::io::Cursor;

  #[derive(Default)]
  struct RecordingPlayer(RefCell<Vec<u64>>);

  impl SnippetPlayer for RecordingPlayer {
    fn play(&self, _track: &Track, duration: Duration) -> Result<(), PlaybackError> {
      self.0.borrow_mut().push(duration.as_secs());
      Ok(())
    }
  }

  fn game(titles: &[&str]) -> TestGame {
    let catalog = Catalog::from_entries(titles.iter().enumerate().map(|(i, title)| CatalogEntry {
      id: format!("t{i}"),
      title: title.to_string(),
      artists: vec!["Band".into()],
      uri: format!("uri:{i}"),
    }));
    let tracks = CatalogTrackSource::with_seed(catalog, 1);
    GameService::new(tracks, SqliteRoundHistory::in_memory().unwrap(), GameRules::default())
  }

  fn opts(rounds: Option<u32>) -> PlayOptions {
    PlayOptions { rounds, reveal_pause: Duration::ZERO }
  }

  type TestGame = GameService<CatalogTrackSource, SqliteRoundHistory>;

  fn play(game: &mut TestGame, script: &str, rounds: Option<u32>) -> (SessionEnd, String, Vec<u64>) {
    let player = RecordingPlayer::default();
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    let end = run(game, &player, &mut input, &mut out, &opts(rounds)).unwrap();
    (end, String::from_utf8(out).unwrap(), player.0.into_inner())
  }

  #[test]
  fn solving_on_second_attempt_plays_longer_snippet() {
    let mut g = game(&["Bad Romance (Remix)"]);
    let (end, text, snippets) = play(&mut g, "wrong\nbad romance\n", None);

    assert_eq!(end, SessionEnd::NoMoreTracks);
    assert_eq!(snippets, vec![1, 2]);
    assert!(text.contains("✅"));
    assert!(text.contains("\"Bad Romance (Remix)\""));
    assert_eq!(g.stats().rounds_won(), 1);
  }

  #[test]
  fn blank_lines_and_replay_do_not_cost_attempts() {
    let mut g = game(&["Yesterday"]);
    let (_, _, snippets) = play(&mut g, "\n   \n:replay\nyesterday\n", None);

    assert_eq!(snippets, vec![1, 1]);
    assert_eq!(g.stats().attempts_on_win(), &[1]);
  }

  #[test]
  fn running_out_of_attempts_reveals_title() {
    let mut g = game(&["Shape of You"]);
    let (_, text, snippets) = play(&mut g, "a\nb\nc\nd\ne\n", None);

    assert_eq!(snippets, vec![1, 2, 5, 7, 10]);
    assert!(text.contains("Out of attempts. It was \"Shape of You\""));
    assert_eq!(g.stats().rounds_lost(), 1);
  }

  #[test]
  fn quit_and_closed_input_end_the_session() {
    let mut g = game(&["One", "Two"]);
    assert_eq!(play(&mut g, ":quit\n", None).0, SessionEnd::Quit);

    let mut g = game(&["One", "Two"]);
    assert_eq!(play(&mut g, "", None).0, SessionEnd::InputClosed);
  }

  #[test]
  fn round_limit_stops_before_next_track() {
    let mut g = game(&["One", "Two", "Three"]);
    let (end, _, _) = play(&mut g, "one\ntwo\nthree\n", Some(1));

    assert_eq!(end, SessionEnd::RoundLimit);
    assert_eq!(g.played_count(), 1);
  }

  /// Historial que acepta pistas pero no puede guardar rondas.
  struct FullDisk;

  impl RoundHistory for FullDisk {
    fn mark_played(&self, _session: SessionId, _track_id: &TrackId) -> Result<(), RepoError> {
      Ok(())
    }

    fn played_track_ids(&self, _session: SessionId) -> Result<Vec<TrackId>, RepoError> {
      Ok(Vec::new())
    }

    fn record_round(&self, _record: &RoundRecord) -> Result<(), RepoError> {
      Err(RepoError::Storage("disk full".into()))
    }

    fn load_records(&self, _session: SessionId) -> Result<Vec<RoundRecord>, RepoError> {
      Ok(Vec::new())
    }
  }

  #[test]
  fn unsaved_round_still_reveals_title_and_moves_on() {
    let catalog = Catalog::from_entries([CatalogEntry {
      id: "t0".into(),
      title: "Yesterday".into(),
      artists: vec!["The Beatles".into()],
      uri: "uri:0".into(),
    }]);
    let mut game = GameService::new(CatalogTrackSource::with_seed(catalog, 1), FullDisk, GameRules::default());
    let player = RecordingPlayer::default();
    let mut input = Cursor::new(b"yesterday\n".to_vec());
    let mut out = Vec::new();

    let end = run(&mut game, &player, &mut input, &mut out, &opts(None)).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(end, SessionEnd::NoMoreTracks);
    assert!(text.contains("It was \"Yesterday\""));
    assert!(text.contains("could not be saved"));
    assert_eq!(game.stats().rounds_played(), 0);
  }

  struct NoDevice;

  impl SnippetPlayer for NoDevice {
    fn play(&self, _track: &Track, _duration: Duration) -> Result<(), PlaybackError> {
      Err(PlaybackError::Unavailable)
    }
  }

  #[test]
  fn playback_failure_does_not_stop_the_round() {
    let mut g = game(&["Yesterday"]);
    let mut input = Cursor::new(b"yesterday\n".to_vec());
    let mut out = Vec::new();

    let end = run(&mut g, &NoDevice, &mut input, &mut out, &opts(None)).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(end, SessionEnd::NoMoreTracks);
    assert!(text.contains("(playback failed: no playback device available)"));
    assert_eq!(g.stats().rounds_won(), 1);
  }
}
