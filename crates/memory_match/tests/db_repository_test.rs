//! Tests for database repository operations.

use chrono::{DateTime, NaiveDateTime};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tempfile::NamedTempFile;

use memory_match::{GameRepository, NewResultRow};
use memory_match_engine::{BoardSize, CompletedGame, OwnerRef};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

fn at(seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(1_767_225_600 + seconds, 0)
        .expect("Valid timestamp")
        .naive_utc()
}

fn row(owner: &str, moves: u32, time: u32, size: BoardSize, seconds: i64) -> NewResultRow {
    NewResultRow::from_game(
        &OwnerRef::from(owner),
        &CompletedGame::new(moves, time, size),
        at(seconds),
    )
    .expect("Valid row")
}

#[test]
fn test_empty_path_rejected() {
    assert!(GameRepository::new("  ".to_string()).is_err());
}

#[test]
fn test_migrations_are_idempotent() {
    let (_db, repo) = setup_test_db();
    repo.run_migrations().expect("Second run failed");
}

#[test]
fn test_insert_assigns_id_and_keeps_values() {
    let (_db, repo) = setup_test_db();
    let stored = repo
        .insert_result(row("Alice", 9, 42, BoardSize::FourByFour, 0))
        .expect("Insert failed");

    assert!(stored.id() > 0);
    assert_eq!(stored.owner_ref().as_str(), "Alice");
    assert_eq!(stored.moves_made(), 9);
    assert_eq!(stored.elapsed_time(), 42);
    assert_eq!(stored.board_size(), BoardSize::FourByFour);
    assert_eq!(stored.completed_at().naive_utc(), at(0));
}

#[test]
fn test_ids_increase() {
    let (_db, repo) = setup_test_db();
    let first = repo
        .insert_result(row("Alice", 9, 42, BoardSize::FourByFour, 0))
        .expect("Insert failed");
    let second = repo
        .insert_result(row("Alice", 9, 42, BoardSize::FourByFour, 0))
        .expect("Insert failed");
    assert!(second.id() > first.id());
}

#[test]
fn test_fetch_by_board_size_orders_and_limits() {
    let (_db, repo) = setup_test_db();
    repo.insert_result(row("A", 12, 30, BoardSize::FourByFour, 0))
        .expect("Insert failed");
    repo.insert_result(row("B", 9, 80, BoardSize::FourByFour, 1))
        .expect("Insert failed");
    repo.insert_result(row("C", 9, 40, BoardSize::FourByFour, 2))
        .expect("Insert failed");
    repo.insert_result(row("D", 1, 1, BoardSize::SixBySix, 3))
        .expect("Insert failed");

    let rows = repo
        .fetch_by_board_size(BoardSize::FourByFour, 2)
        .expect("Query failed");
    let owners: Vec<&str> = rows.iter().map(|r| r.owner_ref().as_str()).collect();
    assert_eq!(owners, vec!["C", "B"]);

    let six = repo
        .fetch_by_board_size(BoardSize::SixBySix, 10)
        .expect("Query failed");
    assert_eq!(six.len(), 1);
}

#[test]
fn test_fetch_by_owner_most_recent_first() {
    let (_db, repo) = setup_test_db();
    repo.insert_result(row("Carol", 10, 50, BoardSize::FourByFour, 10))
        .expect("Insert failed");
    repo.insert_result(row("Carol", 25, 200, BoardSize::SixBySix, 30))
        .expect("Insert failed");
    repo.insert_result(row("Dave", 8, 20, BoardSize::FourByFour, 40))
        .expect("Insert failed");
    repo.insert_result(row("Carol", 11, 60, BoardSize::FourByFour, 20))
        .expect("Insert failed");

    let history = repo
        .fetch_by_owner(&OwnerRef::from("Carol"))
        .expect("Query failed");
    let moves: Vec<u32> = history.iter().map(|r| r.moves_made()).collect();
    assert_eq!(moves, vec![25, 11, 10]);

    let four = repo
        .fetch_by_owner_and_size(&OwnerRef::from("Carol"), BoardSize::FourByFour)
        .expect("Query failed");
    let moves: Vec<u32> = four.iter().map(|r| r.moves_made()).collect();
    assert_eq!(moves, vec![11, 10]);
}

#[test]
fn test_unknown_owner_has_no_history() {
    let (_db, repo) = setup_test_db();
    let history = repo
        .fetch_by_owner(&OwnerRef::from("Nobody"))
        .expect("Query failed");
    assert!(history.is_empty());
}

#[test]
fn test_insert_without_schema_fails() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = GameRepository::new(db_path).expect("Failed to create repository");

    let result = repo.insert_result(row("Eve", 9, 42, BoardSize::FourByFour, 0));
    assert!(result.is_err());
}

#[test]
fn test_check_constraint_rejects_zero_moves() {
    let (db, _repo) = setup_test_db();
    let db_path = db.path().to_str().expect("Invalid path");
    let mut conn = SqliteConnection::establish(db_path).expect("Failed to connect");

    let inserted = diesel::sql_query(
        "INSERT INTO completed_results (owner_ref, moves_made, elapsed_time, board_size) \
         VALUES ('Eve', 0, 10, '4x4')",
    )
    .execute(&mut conn);
    assert!(inserted.is_err());

    let bad_size = diesel::sql_query(
        "INSERT INTO completed_results (owner_ref, moves_made, elapsed_time, board_size) \
         VALUES ('Eve', 8, 10, '5x5')",
    )
    .execute(&mut conn);
    assert!(bad_size.is_err());
}
