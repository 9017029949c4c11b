use crate::db::log::LogEntry;
use crate::errors::AppResult;
use crate::store::SqliteStore;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;

const OP_TARGET_MAX: usize = 60;

fn strip_ansi(s: &str) -> String {
    Regex::new(r"\x1B\[[0-9;]*[mK]")
        .map(|re| re.replace_all(s, "").into_owned())
        .unwrap_or_else(|_| s.to_string())
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "import" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

/// `operation (target)`, cut to the column limit, with only the operation
/// word coloured.
fn render_op_target(e: &LogEntry) -> String {
    let visible = if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    };

    let visible = if visible.chars().count() > OP_TARGET_MAX {
        let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    let color = color_for_operation(&e.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &SqliteStore) -> AppResult<()> {
        let entries = store.log_entries()?;
        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        let rendered: Vec<String> = entries.iter().map(render_op_target).collect();
        let op_w = rendered
            .iter()
            .map(|s| strip_ansi(s).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_MAX);

        println!("📜 Internal log:\n");

        for (e, op_target) in entries.iter().zip(rendered) {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());
            let padding =
                " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, date, op_target, padding, e.message
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: "2026-01-10T21:00:00+09:00".into(),
            operation: op.into(),
            target: target.into(),
            message: String::new(),
        }
    }

    #[test]
    fn long_targets_are_cut() {
        let long = "x".repeat(100);
        let out = strip_ansi(&render_op_target(&entry("add", &long)));
        assert_eq!(out.chars().count(), OP_TARGET_MAX);
        assert!(out.starts_with("add ("));
        assert!(out.ends_with("..."));
    }

    #[test]
    fn empty_target_shows_operation_only() {
        assert_eq!(strip_ansi(&render_op_target(&entry("init", ""))), "init");
    }
}
