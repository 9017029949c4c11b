#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn mjl() -> Command {
    cargo_bin_cmd!("mjledger")
}

fn fresh(path: PathBuf) -> String {
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    fs::remove_file(format!("{p}.seq")).ok();
    p
}

/// Unique SQLite store path inside the system temp dir, removed first.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_mjledger.sqlite"));
    fresh(path)
}

/// Unique CSV store path inside the system temp dir, removed first (with
/// its id sidecar).
pub fn setup_test_sheet(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_mjledger.csv"));
    fresh(path)
}

/// Temporary output file path inside the temp dir, removed first.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_out.{ext}"));
    fresh(path)
}

/// Arguments selecting a store: `--store <path>` plus the backend implied
/// by the extension.
pub fn store_args(path: &str) -> Vec<String> {
    let backend = if path.ends_with(".csv") { "csv" } else { "sqlite" };
    vec![
        "--store".into(),
        path.into(),
        "--backend".into(),
        backend.into(),
        "--test".into(),
    ]
}

pub fn add_game(store: &str, table: &str, at: &str, note: &str, seats: [&str; 3]) {
    let mut args = store_args(store);
    args.extend(["add", "--table", table, "--at", at].map(String::from));
    if !note.is_empty() {
        args.extend(["--note".to_string(), note.to_string()]);
    }
    for s in seats {
        args.extend(["--seat".to_string(), s.to_string()]);
    }
    mjl().args(&args).assert().success();
}

/// Three games at table 1 on logical day 2026-01-10 (the last one after
/// midnight), set 1. Fees: A 3 + (B 5 - 2) + C 1 = 7.
pub fn init_with_evening(store: &str) {
    let mut init = store_args(store);
    init.push("init".into());
    mjl().args(&init).assert().success();

    add_game(store, "1", "2026-01-10 20:00", "", ["X:A:1", "Y:B:2", "Z:C:3"]);
    add_game(store, "1", "2026-01-10 20:40", "２人飛ばし", ["X:A:3", "Y:B:1", "Z:C:2"]);
    add_game(store, "1", "2026-01-11 02:10", "", ["X:A:2", "Y:B:3", "Z:C:1"]);
}

pub fn with_store<'a>(store: &str, rest: &[&'a str]) -> Vec<String> {
    let mut args = store_args(store);
    args.extend(rest.iter().map(|s| s.to_string()));
    args
}
