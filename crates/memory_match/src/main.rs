//! Memory Match - command-line entry point.

use anyhow::Result;
use clap::Parser;
use memory_match::cli::{Cli, Command};
use memory_match::report::{format_clock, history_table, leaderboard_table, summary_line};
use memory_match::{
    AppConfig, GameRepository, GameRunner, PlayerKind, ScoreService, play_and_record,
};
use memory_match_engine::{BoardSize, OwnerRef};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    info!(db_path = %config.db_path(), "Configuration loaded");

    match cli.command {
        Command::Play {
            owner,
            board_size,
            player,
            verbose,
        } => run_play(&config, OwnerRef::from(owner), board_size, player, verbose).await,
        Command::Leaderboard {
            board_size,
            limit,
            json,
        } => {
            let service = open_service(&config)?;
            let limit = limit.unwrap_or(*config.leaderboard_limit());
            let leaderboard = service.leaderboard(board_size, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&leaderboard)?);
            } else {
                print!("{}", leaderboard_table(&leaderboard));
            }
            Ok(())
        }
        Command::History { owner, json } => {
            let service = open_service(&config)?;
            let profile = service.profile(&OwnerRef::from(owner))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print!("{}", history_table(profile.history()));
                for summary in profile.summaries() {
                    println!("{}", summary_line(summary));
                }
            }
            Ok(())
        }
        Command::Best {
            owner,
            board_size,
            json,
        } => {
            let service = open_service(&config)?;
            let best = service.best_for(&OwnerRef::from(owner), board_size)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&best)?);
            } else {
                match best {
                    Some(result) => println!(
                        "{} best on {}: {} moves in {}",
                        result.owner_ref(),
                        board_size,
                        result.moves_made(),
                        format_clock(result.elapsed_time())
                    ),
                    None => println!("no {} games yet", board_size),
                }
            }
            Ok(())
        }
    }
}

/// Opens the store and brings its schema up to date.
fn open_service(config: &AppConfig) -> Result<ScoreService> {
    let repository = GameRepository::new(config.db_path().clone())?;
    repository.run_migrations()?;
    Ok(ScoreService::new(repository))
}

/// Plays one game; storage problems are reported but never abort the game.
async fn run_play(
    config: &AppConfig,
    owner_ref: OwnerRef,
    board_size: BoardSize,
    player: PlayerKind,
    verbose: bool,
) -> Result<()> {
    let repository = GameRepository::new(config.db_path().clone())?;
    if let Err(e) = repository.run_migrations() {
        warn!(error = %e, "Store unavailable, result will not be saved");
    }
    let service = ScoreService::new(repository);

    let mut runner = GameRunner::from_config(config)?;
    let printer = if verbose {
        let (tx, mut rx) = mpsc::unbounded_channel();
        runner = runner.with_events(tx);
        Some(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!(error = %e, "Could not encode event"),
                }
            }
        }))
    } else {
        None
    };

    let mut bot = player.build(*config.seed());
    let report =
        play_and_record(&mut runner, &mut *bot, &service, &owner_ref, board_size).await;
    // Dropping the runner closes the event channel.
    drop(runner);
    if let Some(printer) = printer {
        printer.await?;
    }
    let report = report?;

    println!(
        "{} finished {} in {} moves, {}",
        bot.name(),
        board_size,
        report.game().moves_made(),
        format_clock(report.game().elapsed_time())
    );
    match report.saved() {
        Ok(stored) => println!("saved as result #{} for {}", stored.id(), stored.owner_ref()),
        Err(e) => println!("result not saved: {}", e.message),
    }
    Ok(())
}
