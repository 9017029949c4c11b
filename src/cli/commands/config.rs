use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{missing_fields, run_config_migrations};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn edit(path: &std::path::Path, requested: Option<String>) {
    let fallback = default_editor();
    let editor = requested.unwrap_or_else(|| fallback.clone());

    if matches!(Command::new(&editor).arg(path).status(), Ok(s) if s.success()) {
        success(format!("Configuration file edited using '{editor}'"));
        return;
    }

    warning(format!(
        "Editor '{editor}' not available, falling back to '{fallback}'"
    ));
    if matches!(Command::new(&fallback).arg(path).status(), Ok(s) if s.success()) {
        success(format!("Configuration file edited using '{fallback}'"));
    } else {
        error(format!("Failed to edit configuration file using '{fallback}'"));
    }
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        if *check {
            if !path.exists() {
                info(format!("No configuration file at {}", path.display()));
            } else {
                let missing = missing_fields(&path)?;
                if missing.is_empty() {
                    success("Configuration file is up to date.");
                } else {
                    warning(format!(
                        "Missing fields: {} (run `config --migrate`)",
                        missing.join(", ")
                    ));
                }
            }
        }

        if *migrate && !run_config_migrations(&path)? {
            info("Nothing to migrate.");
        }

        if *edit_config {
            edit(&path, editor.clone());
        }
    }

    Ok(())
}
