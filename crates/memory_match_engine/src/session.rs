//! Session state machine for a single player's game.
//!
//! A session moves `NotStarted -> InProgress -> Completed`. Selections resolve
//! synchronously: the second card of a turn is compared immediately and the
//! turn's cards are either resolved or turned face down before `select`
//! returns. Any flip-back delay belongs to whoever draws the cards.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use crate::invariants::assert_invariants;
use crate::{
    Action, Board, BoardError, BoardGenerator, BoardSize, CardId, CompletedGame, IgnoredSelection,
    SelectOutcome, SessionEvent,
};

/// Lifecycle status of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum SessionStatus {
    /// No board has been dealt.
    #[default]
    NotStarted,
    /// Cards can be selected.
    InProgress,
    /// Every pair has been matched.
    Completed,
}

/// One player's game.
///
/// Owned by a single control thread; every operation takes `&mut self` and
/// leaves the session in a consistent state when it returns.
#[derive(Debug, Clone, Default)]
pub struct Session {
    generator: BoardGenerator,
    board: Option<Board>,
    active_selection: Vec<CardId>,
    moves_made: u32,
    matched_pairs: u32,
    elapsed_time: u32,
    status: SessionStatus,
    result: Option<CompletedGame>,
}

impl Session {
    /// Creates an unstarted session that deals from the default pool.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unstarted session that deals from `generator`.
    #[instrument(skip(generator))]
    pub fn with_generator(generator: BoardGenerator) -> Self {
        Self {
            generator,
            ..Self::default()
        }
    }

    /// Deals a new board and resets all counters.
    ///
    /// Any previous game, finished or not, is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the board cannot be generated. The previous
    /// session is left untouched in that case.
    #[instrument(skip(self), fields(previous = %self.status))]
    pub fn start(&mut self, size: BoardSize) -> Result<(), BoardError> {
        let board = self.generator.generate(size)?;

        if self.status == SessionStatus::InProgress {
            debug!(
                moves_made = self.moves_made,
                matched_pairs = self.matched_pairs,
                "Discarding unfinished session"
            );
        }

        self.board = Some(board);
        self.active_selection.clear();
        self.moves_made = 0;
        self.matched_pairs = 0;
        self.elapsed_time = 0;
        self.status = SessionStatus::InProgress;
        self.result = None;

        info!(%size, cards = size.card_count(), "Session started");
        assert_invariants(self);
        Ok(())
    }

    /// Turns a card face up and, on the second card of a turn, resolves it.
    ///
    /// Selections that cannot apply (no game running, two cards already up,
    /// unknown card, card already up or matched) are ignored and reported as
    /// [`SelectOutcome::Ignored`] without touching the session.
    #[instrument(skip(self), fields(status = %self.status, moves = self.moves_made))]
    pub fn select(&mut self, card_id: CardId) -> SelectOutcome {
        let board = match (self.status, self.board.as_mut()) {
            (SessionStatus::InProgress, Some(board)) => board,
            _ => return ignored(card_id, IgnoredSelection::NotInProgress),
        };
        if self.active_selection.len() >= 2 {
            return ignored(card_id, IgnoredSelection::SelectionFull);
        }

        // The card already face up this turn, if any.
        let pending = self
            .active_selection
            .first()
            .and_then(|&first| board.get(first).map(|card| (first, card.symbol().clone())));

        let Some(card) = board.card_mut(card_id) else {
            return ignored(card_id, IgnoredSelection::UnknownCard);
        };
        if card.is_resolved() {
            return ignored(card_id, IgnoredSelection::AlreadyResolved);
        }
        if card.is_revealed() {
            return ignored(card_id, IgnoredSelection::AlreadyRevealed);
        }

        card.reveal();
        let symbol = card.symbol().clone();

        let Some((first, first_symbol)) = pending else {
            self.active_selection.push(card_id);
            debug!(card_id, %symbol, "First card revealed");
            assert_invariants(self);
            return SelectOutcome::Revealed { card_id, symbol };
        };

        // Second card: the turn is over either way.
        let second = card_id;
        self.moves_made += 1;
        self.active_selection.clear();

        let outcome = if first_symbol == symbol {
            board.resolve_pair(first, second);
            self.matched_pairs += 1;
            info!(first, second, %symbol, matched_pairs = self.matched_pairs, "Pair matched");
            SelectOutcome::Matched {
                first,
                second,
                symbol,
            }
        } else {
            board.conceal_pair(first, second);
            debug!(first, second, %first_symbol, second_symbol = %symbol, "No match");
            SelectOutcome::Mismatched {
                first,
                first_symbol,
                second,
                second_symbol: symbol,
            }
        };

        let size = board.size();
        let outcome = if self.matched_pairs as usize == size.pair_count() {
            self.complete(size, outcome)
        } else {
            outcome
        };

        assert_invariants(self);
        outcome
    }

    /// Advances the clock by one second while a game is in progress.
    ///
    /// Returns whether the clock moved.
    pub fn tick(&mut self) -> bool {
        if self.status != SessionStatus::InProgress {
            trace!(status = %self.status, "Tick ignored");
            return false;
        }
        self.elapsed_time = self.elapsed_time.saturating_add(1);
        trace!(elapsed_time = self.elapsed_time, "Tick");
        true
    }

    /// Dispatches an inbound action.
    ///
    /// # Errors
    ///
    /// Only [`Action::StartGame`] can fail, with the errors of [`Session::start`].
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) -> Result<SessionEvent, BoardError> {
        match action {
            Action::StartGame { size } => {
                self.start(size)?;
                Ok(SessionEvent::Started { size })
            }
            Action::SelectCard { card_id } => Ok(SessionEvent::Selected(self.select(card_id))),
            Action::Tick => {
                let counted = self.tick();
                Ok(SessionEvent::Ticked {
                    counted,
                    elapsed_time: self.elapsed_time,
                })
            }
        }
    }

    fn complete(&mut self, size: BoardSize, outcome: SelectOutcome) -> SelectOutcome {
        let result = CompletedGame::new(self.moves_made, self.elapsed_time, size);
        self.status = SessionStatus::Completed;
        self.result = Some(result);
        info!(
            moves_made = self.moves_made,
            elapsed_time = self.elapsed_time,
            %size,
            "Session completed"
        );

        match outcome {
            SelectOutcome::Matched {
                first,
                second,
                symbol,
            } => SelectOutcome::Completed {
                first,
                second,
                symbol,
                result,
            },
            other => other,
        }
    }

    /// The dealt board, if a game has been started.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Layout of the current board.
    pub fn board_size(&self) -> Option<BoardSize> {
        self.board.as_ref().map(Board::size)
    }

    /// Cards revealed in the current turn.
    pub fn active_selection(&self) -> &[CardId] {
        &self.active_selection
    }

    /// Turns completed so far.
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Pairs matched so far.
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Seconds on the clock.
    pub fn elapsed_time(&self) -> u32 {
        self.elapsed_time
    }

    /// Lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// True once every pair has been matched.
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// The final result, once the session is completed.
    pub fn completed_result(&self) -> Option<&CompletedGame> {
        self.result.as_ref()
    }

    /// Cards that may be picked right now.
    pub fn selectable_cards(&self) -> Vec<CardId> {
        match (&self.board, self.status) {
            (Some(board), SessionStatus::InProgress) => board.selectable_ids(),
            _ => Vec::new(),
        }
    }
}

fn ignored(card_id: CardId, reason: IgnoredSelection) -> SelectOutcome {
    debug!(card_id, %reason, "Selection ignored");
    SelectOutcome::Ignored { card_id, reason }
}
