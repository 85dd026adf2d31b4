mod config;
mod play;
mod player;
mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use spordle_catalog::{Catalog, CatalogConfig, CatalogTrackSource};
use spordle_config::CONFIG_BACKEND;
use spordle_core::domain::SessionId;
use spordle_core::ports::RoundHistory;
use spordle_core::services::GameService;
use spordle_storage::SqliteRoundHistory;
use spordle_storage::config::StorageConfig;

use crate::config::GameConfig;
use crate::play::{PlayOptions, SessionEnd};
use crate::player::SimulatedPlayer;

/// Guess the song from ever longer snippets.
#[derive(Parser, Debug)]
#[command(name = "spordle", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
  #[command(subcommand)]
  command: Option<Command>,

  // sin subcomando se juega con estas opciones
  #[command(flatten)]
  play: PlayArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Play rounds until you quit or the catalog runs out (default)
  Play(PlayArgs),
  /// Show stored stats for a session
  Stats {
    #[arg(long)]
    session: Uuid,
  },
  /// Print the effective configuration (writes defaults on first run)
  Config,
}

#[derive(Args, Debug)]
struct PlayArgs {
  /// Resume an earlier session instead of starting a new one
  #[arg(long, env = "SPORDLE_SESSION")]
  session: Option<Uuid>,

  /// Stop after this many rounds
  #[arg(long)]
  rounds: Option<u32>,

  /// Do not wait for snippets or reveal pauses
  #[arg(long)]
  no_wait: bool,

  /// Keep the history in memory only
  #[arg(long)]
  ephemeral: bool,

  /// Catalog files to use instead of the configured ones
  #[arg(long = "catalog", value_name = "FILE")]
  catalogs: Vec<PathBuf>,
}

fn main() -> Result<()> {
  // Logs a stderr para no mezclarse con la partida
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "spordle=warn,spordle_core=warn,spordle_storage=warn,spordle_catalog=warn".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  let cli = Cli::parse();

  match cli.command.unwrap_or(Command::Play(cli.play)) {
    Command::Play(args) => play(args),
    Command::Stats { session } => stats(SessionId::from_uuid(session)),
    Command::Config => show_config(),
  }
}

fn open_history(ephemeral: bool) -> Result<SqliteRoundHistory> {
  let history = if ephemeral { SqliteRoundHistory::in_memory() } else { SqliteRoundHistory::new_from_config() };
  history.context("opening round history")
}

fn play(args: PlayArgs) -> Result<()> {
  let game_cfg = GameConfig::load().context("loading [game] config")?;
  let rules = game_cfg.to_rules().context("invalid [game] config")?;

  let sources = if args.catalogs.is_empty() {
    CatalogConfig::load().context("loading [catalog] config")?.sources
  } else {
    args.catalogs.clone()
  };
  let catalog = Catalog::load(&sources).context("loading track catalog")?;
  if catalog.is_empty() {
    anyhow::bail!("the track catalog is empty; add tracks to {:?}", sources);
  }
  let tracks = CatalogTrackSource::new(catalog);
  let history = open_history(args.ephemeral)?;

  let mut game = match args.session {
    Some(id) => GameService::resume(tracks, history, rules, SessionId::from_uuid(id))
      .context("resuming session")?,
    None => GameService::new(tracks, history, rules),
  };

  println!("Session {}", game.session_id());

  let opts = PlayOptions {
    rounds: args.rounds,
    reveal_pause: if args.no_wait { Default::default() } else { game_cfg.reveal_pause() },
  };
  let player = SimulatedPlayer::new(!args.no_wait);

  let stdin = io::stdin();
  let mut input = stdin.lock();
  let mut out = io::stdout().lock();
  let end = play::run(&mut game, &player, &mut input, &mut out, &opts)?;
  tracing::info!(?end, session_id = %game.session_id(), "session ended");

  writeln!(out)?;
  render::stats(&mut out, game.stats())?;
  if end != SessionEnd::NoMoreTracks {
    writeln!(out, "Resume later with: spordle play --session {}", game.session_id())?;
  }

  Ok(())
}

fn stats(session: SessionId) -> Result<()> {
  let history = open_history(false)?;
  let stats = history.load_stats(session).context("loading stats")?;

  println!("Session {session}");
  render::stats(&mut io::stdout().lock(), &stats)?;
  Ok(())
}

fn show_config() -> Result<()> {
  let game = GameConfig::load()?;
  let catalog = CatalogConfig::load()?;
  let storage = StorageConfig::load()?;

  println!("# {}", CONFIG_BACKEND.path().display());
  println!("[game]\n{}", toml::to_string(&game)?);
  println!("[catalog]\n{}", toml::to_string(&catalog)?);
  println!("[storage]\n{}", toml::to_string(&storage)?);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn bare_invocation_parses_play_options() {
    let session = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
    let cli = Cli::try_parse_from(["spordle", "--session", &session.to_string(), "--rounds", "2"]).unwrap();

    assert!(cli.command.is_none());
    assert_eq!(cli.play.session, Some(session));
    assert_eq!(cli.play.rounds, Some(2));
  }

  #[test]
  fn play_options_do_not_mix_with_other_subcommands() {
    assert!(Cli::try_parse_from(["spordle", "--rounds", "2", "config"]).is_err());

    let cli = Cli::try_parse_from(["spordle", "play", "--no-wait"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Play(PlayArgs { no_wait: true, .. }))));
  }
}
