//! Game loop driving a session with a player and a clock.

use std::time::Duration;

use anyhow::Result;
use derive_getters::Getters;
use memory_match_engine::{
    Action, BoardError, BoardGenerator, BoardSize, CompletedGame, CompletedResult, OwnerRef,
    SelectOutcome, Session, SessionEvent,
};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::{AppConfig, PersistenceError, ScoreService, players::Player};

/// Consecutive ignored selections tolerated before a run is abandoned.
const MAX_IGNORED_IN_A_ROW: u32 = 64;

/// Runs one session at a time on a cooperative loop.
///
/// The clock ticks every `tick_interval` and the player is asked for a card
/// every `think_delay`. Both are driven from the same task, so the session
/// is never touched concurrently.
#[derive(Debug)]
pub struct GameRunner {
    session: Session,
    tick_interval: Duration,
    think_delay: Duration,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl GameRunner {
    /// Creates a runner dealing boards from `generator`.
    pub fn new(generator: BoardGenerator, tick_interval: Duration, think_delay: Duration) -> Self {
        Self {
            session: Session::with_generator(generator),
            tick_interval,
            think_delay,
            events: None,
        }
    }

    /// Creates a runner from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the configured symbol pool is invalid.
    #[instrument(skip(config))]
    pub fn from_config(config: &AppConfig) -> Result<Self, BoardError> {
        Ok(Self::new(
            config.board_generator()?,
            config.tick_interval(),
            config.think_delay(),
        ))
    }

    /// Sends every session event to `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The session of the last run.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events
            && tx.send(event).is_err()
        {
            debug!("Event receiver dropped");
        }
    }

    /// Plays a full game of `board_size` with `player`.
    ///
    /// # Errors
    ///
    /// Fails if the board cannot be dealt, the tick interval is zero, the
    /// player errors, or the player keeps choosing cards that are ignored.
    #[instrument(skip(self, player), fields(player = %player.name()))]
    pub async fn run(
        &mut self,
        player: &mut dyn Player,
        board_size: BoardSize,
    ) -> Result<CompletedGame> {
        anyhow::ensure!(!self.tick_interval.is_zero(), "Tick interval must be positive");

        let started = self.session.apply(Action::StartGame { size: board_size })?;
        self.emit(started);
        info!("Game started");

        let mut ticker =
            tokio::time::interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let think = tokio::time::sleep(self.think_delay);
        tokio::pin!(think);
        let mut ignored_in_a_row = 0;

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    let ticked = self.session.apply(Action::Tick)?;
                    self.emit(ticked);
                }
                () = &mut think => {
                    let card_id = player.choose_card(&self.session).await?;
                    let selected = self.session.apply(Action::SelectCard { card_id })?;
                    if let SessionEvent::Selected(outcome) = &selected {
                        player.observe(outcome);
                        if let SelectOutcome::Ignored { reason, .. } = outcome {
                            ignored_in_a_row += 1;
                            warn!(card_id, %reason, "Player chose an unselectable card");
                            anyhow::ensure!(
                                ignored_in_a_row < MAX_IGNORED_IN_A_ROW,
                                "Player made no progress after {} selections",
                                ignored_in_a_row
                            );
                        } else {
                            ignored_in_a_row = 0;
                        }
                    }
                    self.emit(selected);

                    if let Some(result) = self.session.completed_result() {
                        info!(
                            moves_made = result.moves_made(),
                            elapsed_time = result.elapsed_time(),
                            "Game finished"
                        );
                        return Ok(*result);
                    }
                    think.as_mut().reset(Instant::now() + self.think_delay);
                }
            }
        }
    }
}

/// A finished game and what happened when it was saved.
#[derive(Debug, Getters)]
pub struct PlayReport {
    game: CompletedGame,
    saved: Result<CompletedResult, PersistenceError>,
}

/// Plays a game, then makes one attempt to store the result.
///
/// A failed save is logged and reported but never undoes the game.
///
/// # Errors
///
/// Returns the error of [`GameRunner::run`]; storage failures are inside the report.
#[instrument(skip(runner, player, service), fields(owner = %owner_ref))]
pub async fn play_and_record(
    runner: &mut GameRunner,
    player: &mut dyn Player,
    service: &ScoreService,
    owner_ref: &OwnerRef,
    board_size: BoardSize,
) -> Result<PlayReport> {
    let game = runner.run(player, board_size).await?;
    let saved = service.record_result(owner_ref, &game);
    match &saved {
        Ok(stored) => info!(result_id = stored.id(), "Result saved"),
        Err(e) => warn!(error = %e, "Result could not be saved"),
    }
    Ok(PlayReport { game, saved })
}
