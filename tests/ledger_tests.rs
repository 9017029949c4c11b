use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_game, init_with_evening, mjl, setup_test_db, setup_test_sheet, with_store};

#[test]
fn test_add_reports_game_and_set() {
    let db = setup_test_db("add_reports");
    init_with_evening(&db);

    let mut args = with_store(&db, &["add", "--table", "1", "--new-set"]);
    args.extend(
        ["--at", "2026-01-11 03:00", "--seat", "X:A:1", "--seat", "Y:B:2", "--seat", "Z:C:3"]
            .map(String::from),
    );

    mjl()
        .args(&args)
        .assert()
        .success()
        .stdout(contains("Game 4 recorded: table 1, set 2, day 2026-01-10"));
}

#[test]
fn test_add_rejects_duplicate_ranks() {
    let db = setup_test_db("add_dup_ranks");
    init_with_evening(&db);

    let mut args = with_store(&db, &["add", "--at", "2026-01-10 22:00"]);
    args.extend(["--seat", "X:A:1", "--seat", "Y:B:1", "--seat", "Z:C:3"].map(String::from));

    mjl()
        .args(&args)
        .assert()
        .failure()
        .stderr(contains("Invalid record"));

    mjl()
        .args(with_store(&db, &["list"]))
        .assert()
        .success()
        .stdout(contains("22:00").not());
}

#[test]
fn test_list_numbers_games_per_logical_day() {
    let sheet = setup_test_sheet("list_numbering");
    init_with_evening(&sheet);
    add_game(&sheet, "1", "2026-01-11 12:00", "", ["X:A:1", "Y:B:2", "Z:C:3"]);

    mjl()
        .args(with_store(&sheet, &["list", "--period", "2026-01-10"]))
        .assert()
        .success()
        .stdout(contains("2026-01-11 02:10:00"))
        .stdout(contains("X(A)1 Y(B)2 Z(C)3"))
        .stdout(contains("2026-01-11 12:00:00").not());

    mjl()
        .args(with_store(&sheet, &["list", "--period", "2026-01-11"]))
        .assert()
        .success()
        .stdout(contains("2026-01-11 12:00:00"))
        .stdout(contains("２人飛ばし").not());
}

#[test]
fn test_fees_for_logical_day() {
    let db = setup_test_db("fees_day");
    init_with_evening(&db);

    mjl()
        .args(with_store(&db, &["fees", "--date", "2026-01-10"]))
        .assert()
        .success()
        .stdout(contains("Fees for 2026-01-10"))
        .stdout(contains("Day total: 7"));

    mjl()
        .args(with_store(&db, &["fees", "--date", "2026-02-01"]))
        .assert()
        .success()
        .stdout(contains("No games on 2026-02-01"));
}

#[test]
fn test_sheet_view_shows_fee_summary() {
    let sheet = setup_test_sheet("sheet_view");
    init_with_evening(&sheet);

    mjl()
        .args(with_store(&sheet, &["list", "--sheet", "--date", "2026-01-10"]))
        .assert()
        .success()
        .stdout(contains("table 1 | set 1"))
        .stdout(contains("Fee total: 7"))
        .stdout(contains("A:1 B:1 C:1 D:0"));
}

#[test]
fn test_ranking_views() {
    let db = setup_test_db("ranking_views");
    init_with_evening(&db);

    mjl()
        .args(with_store(&db, &["ranking", "--min-games", "3"]))
        .assert()
        .success()
        .stdout(contains("Most games"))
        .stdout(contains("Best average rank"))
        .stdout(contains("Last-place avoidance"))
        .stdout(contains("2.00"));

    mjl()
        .args(with_store(&db, &["ranking"]))
        .assert()
        .success()
        .stdout(contains("No player has 5 or more games"));
}

#[test]
fn test_edit_and_delete() {
    let db = setup_test_db("edit_delete");
    init_with_evening(&db);

    mjl()
        .args(with_store(&db, &["edit", "1", "--note", "役満"]))
        .assert()
        .success()
        .stdout(contains("Game 1 updated"));

    mjl()
        .args(with_store(&db, &["fees", "--date", "2026-01-10"]))
        .assert()
        .success()
        .stdout(contains("Day total: 2"));

    mjl()
        .args(with_store(&db, &["del", "3", "--force"]))
        .assert()
        .success()
        .stdout(contains("Game 3"));

    mjl()
        .args(with_store(&db, &["del", "3", "--force"]))
        .assert()
        .failure()
        .stderr(contains("No game with id 3"));

    // deleted ids are never handed out again
    add_game(&db, "2", "2026-01-10 23:00", "", ["P:A:1", "Q:B:2", "R:C:3"]);
    mjl()
        .args(with_store(&db, &["list", "--table", "2"]))
        .assert()
        .success()
        .stdout(contains("P(A)1"));

    mjl()
        .args(with_store(&db, &["log", "--print"]))
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("game 4"));
}

#[test]
fn test_delete_without_confirmation_is_cancelled() {
    let db = setup_test_db("delete_cancel");
    init_with_evening(&db);

    mjl()
        .args(with_store(&db, &["del", "1"]))
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    mjl()
        .args(with_store(&db, &["list"]))
        .assert()
        .success()
        .stdout(contains("2026-01-10 20:00:00"));
}

#[test]
fn test_bad_period_fails() {
    let db = setup_test_db("bad_period");
    init_with_evening(&db);

    mjl()
        .args(with_store(&db, &["list", "--period", "2026-01:2026"]))
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}
