//! Plain-text rendering of results for the terminal.

use std::fmt::Write;

use memory_match_engine::{CompletedResult, Leaderboard, ResultSummary};

/// Formats seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Renders a leaderboard as an aligned table.
pub fn leaderboard_table(leaderboard: &Leaderboard<CompletedResult>) -> String {
    let mut out = format!("Leaderboard {}\n", leaderboard.board_size());
    if leaderboard.is_empty() {
        out.push_str("  no results yet\n");
        return out;
    }
    let _ = writeln!(out, "{:>4}  {:<16} {:>5} {:>6}", "#", "player", "moves", "time");
    for entry in leaderboard.entries() {
        let result = entry.result();
        let _ = writeln!(
            out,
            "{:>4}  {:<16} {:>5} {:>6}",
            entry.place(),
            result.owner_ref(),
            result.moves_made(),
            format_clock(result.elapsed_time())
        );
    }
    out
}

/// Renders an owner's results, one line each.
pub fn history_table(results: &[CompletedResult]) -> String {
    if results.is_empty() {
        return "no games played\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:<19}  {:<4} {:>5} {:>6}", "completed", "size", "moves", "time");
    for result in results {
        let _ = writeln!(
            out,
            "{:<19}  {:<4} {:>5} {:>6}",
            result.completed_at().format("%Y-%m-%d %H:%M:%S"),
            result.board_size(),
            result.moves_made(),
            format_clock(result.elapsed_time())
        );
    }
    out
}

/// Renders a per-size summary.
pub fn summary_line(summary: &ResultSummary<CompletedResult>) -> String {
    let best = summary
        .best_result()
        .as_ref()
        .map(|r| format!("{} moves in {}", r.moves_made(), format_clock(r.elapsed_time())))
        .unwrap_or_else(|| "-".to_string());
    let average_moves = (*summary.average_moves())
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());
    let average_time = (*summary.average_time())
        .map(format_clock)
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}: {} games, best {}, average {} moves in {}",
        summary.board_size(),
        summary.games_played(),
        best,
        average_moves,
        average_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use memory_match_engine::{BoardSize, OwnerRef, summarize};

    fn result(id: i32, owner: &str, moves: u32, time: u32) -> CompletedResult {
        CompletedResult::new(
            id,
            OwnerRef::from(owner),
            moves,
            time,
            BoardSize::FourByFour,
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn test_leaderboard_rows_in_rank_order() {
        let results = vec![result(1, "kim", 12, 80), result(2, "yul", 9, 65)];
        let board = Leaderboard::build(&results, BoardSize::FourByFour, 10);
        let table = leaderboard_table(&board);
        let yul = table.find("yul").expect("yul listed");
        let kim = table.find("kim").expect("kim listed");
        assert!(yul < kim);
        assert!(table.contains("1:05"));
    }

    #[test]
    fn test_empty_leaderboard() {
        let board = Leaderboard::<CompletedResult>::build(&[], BoardSize::SixBySix, 10);
        assert!(leaderboard_table(&board).contains("no results yet"));
    }

    #[test]
    fn test_history_shows_date_and_size() {
        let table = history_table(&[result(1, "ann", 12, 80)]);
        assert!(table.contains("2026-03-01 12:00:00"));
        assert!(table.contains("4x4"));
        assert!(table.contains("1:20"));
    }

    #[test]
    fn test_summary_without_games() {
        let summary = summarize::<CompletedResult>(&[], BoardSize::SixBySix);
        assert_eq!(
            summary_line(&summary),
            "6x6: 0 games, best -, average - moves in -"
        );
    }
}
