//! Ranking and aggregate statistics over completed results.
//!
//! The ranking rule is fewest moves first, then fastest time. Equal keys keep
//! their input order. Everything here is a pure function of its input.

use std::cmp::Ordering;

use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{BoardSize, CompletedGame, CompletedResult};

/// A record that can be ranked.
pub trait Scored {
    /// Board the game was played on.
    fn board_size(&self) -> BoardSize;
    /// Turns taken.
    fn moves_made(&self) -> u32;
    /// Seconds elapsed.
    fn elapsed_time(&self) -> u32;
}

impl Scored for CompletedGame {
    fn board_size(&self) -> BoardSize {
        CompletedGame::board_size(self)
    }

    fn moves_made(&self) -> u32 {
        CompletedGame::moves_made(self)
    }

    fn elapsed_time(&self) -> u32 {
        CompletedGame::elapsed_time(self)
    }
}

impl Scored for CompletedResult {
    fn board_size(&self) -> BoardSize {
        CompletedResult::board_size(self)
    }

    fn moves_made(&self) -> u32 {
        CompletedResult::moves_made(self)
    }

    fn elapsed_time(&self) -> u32 {
        CompletedResult::elapsed_time(self)
    }
}

/// Orders two records by the ranking rule.
pub fn compare<A: Scored, B: Scored>(a: &A, b: &B) -> Ordering {
    a.moves_made()
        .cmp(&b.moves_made())
        .then_with(|| a.elapsed_time().cmp(&b.elapsed_time()))
}

/// Filters `results` to `board_size`, sorts them by the ranking rule, and
/// keeps the first `limit` entries.
///
/// The sort is stable, so ranking an already ranked sequence returns it
/// unchanged.
#[instrument(skip(results), fields(input = results.len()))]
pub fn rank<T>(results: &[T], board_size: BoardSize, limit: Option<usize>) -> Vec<T>
where
    T: Scored + Clone,
{
    let mut ranked: Vec<T> = results
        .iter()
        .filter(|result| result.board_size() == board_size)
        .cloned()
        .collect();
    ranked.sort_by(compare);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    debug!(ranked = ranked.len(), "Results ranked");
    ranked
}

/// Aggregate statistics for one board size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct ResultSummary<T> {
    board_size: BoardSize,
    games_played: usize,
    best_result: Option<T>,
    average_moves: Option<u32>,
    average_time: Option<u32>,
}

/// Computes games played, best result and rounded averages for `board_size`.
///
/// Averages round to the nearest integer with halves rounding up; they are
/// `None` when there is no matching result.
#[instrument(skip(results), fields(input = results.len()))]
pub fn summarize<T>(results: &[T], board_size: BoardSize) -> ResultSummary<T>
where
    T: Scored + Clone,
{
    let matching: Vec<&T> = results
        .iter()
        .filter(|result| result.board_size() == board_size)
        .collect();
    let count = matching.len() as u64;

    let best_result = matching
        .iter()
        .copied()
        .reduce(|best, next| {
            if compare(next, best) == Ordering::Less {
                next
            } else {
                best
            }
        })
        .cloned();
    let total_moves: u64 = matching.iter().map(|r| u64::from(r.moves_made())).sum();
    let total_time: u64 = matching.iter().map(|r| u64::from(r.elapsed_time())).sum();

    ResultSummary {
        board_size,
        games_played: matching.len(),
        best_result,
        average_moves: rounded_mean(total_moves, count),
        average_time: rounded_mean(total_time, count),
    }
}

fn rounded_mean(total: u64, count: u64) -> Option<u32> {
    if count == 0 {
        return None;
    }
    u32::try_from((2 * total + count) / (2 * count)).ok()
}

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct LeaderboardEntry<T> {
    place: usize,
    result: T,
}

/// A ranked, truncated view of results for one board size.
///
/// Derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Leaderboard<T> {
    board_size: BoardSize,
    entries: Vec<LeaderboardEntry<T>>,
}

impl<T: Scored + Clone> Leaderboard<T> {
    /// Ranks `results` and numbers the first `limit` of them from 1.
    #[instrument(skip(results), fields(input = results.len()))]
    pub fn build(results: &[T], board_size: BoardSize, limit: usize) -> Self {
        let entries = rank(results, board_size, Some(limit))
            .into_iter()
            .enumerate()
            .map(|(i, result)| LeaderboardEntry {
                place: i + 1,
                result,
            })
            .collect();
        Self {
            board_size,
            entries,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no result qualified.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
