use crate::config::StoreBackend;
use crate::export::ExportFormat;
use crate::models::Seat;
use crate::utils::number::parse_rank;
use clap::{Parser, Subcommand};

/// Command-line interface definition for mjledger
#[derive(Parser)]
#[command(
    name = "mjledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A mahjong table ledger: per-day game numbering, per-set fees and player rankings",
    long_about = None
)]
pub struct Cli {
    /// Override the store path (useful for tests or a second ledger)
    #[arg(global = true, long = "store")]
    pub store: Option<String>,

    /// Override the store backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<StoreBackend>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// `NAME:CATEGORY:RANK`. The name may itself contain colons.
pub fn parse_seat(raw: &str) -> Result<Seat, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(rank), Some(category), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected NAME:CATEGORY:RANK, got '{raw}'"));
    };

    let rank = parse_rank(rank).map_err(|e| e.to_string())?;
    Ok(Seat::new(name.trim(), category.trim(), rank))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the store and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a finished game
    Add {
        #[arg(long = "table", default_value_t = 1, help = "Table number")]
        table: u32,

        #[arg(long = "new-set", help = "Start a new set at this table with this game")]
        new_set: bool,

        #[arg(long = "at", help = "Finish time (YYYY-MM-DD HH:MM[:SS]), default now")]
        at: Option<String>,

        #[arg(long = "note", default_value = "", help = "Special note, e.g. ２人飛ばし")]
        note: String,

        #[arg(
            long = "seat",
            value_parser = parse_seat,
            required = true,
            help = "Seat as NAME:CATEGORY:RANK, once per seat in seat order"
        )]
        seats: Vec<Seat>,
    },

    /// Edit a recorded game
    Edit {
        game_id: u64,

        #[arg(long = "table")]
        table: Option<u32>,

        #[arg(long = "set")]
        set: Option<u32>,

        #[arg(long = "at", help = "Finish time (YYYY-MM-DD HH:MM[:SS])")]
        at: Option<String>,

        #[arg(long = "note")]
        note: Option<String>,

        #[arg(
            long = "seat",
            value_parser = parse_seat,
            help = "Replace all seats; NAME:CATEGORY:RANK, once per seat"
        )]
        seats: Vec<Seat>,
    },

    /// Delete a game by number
    Del {
        game_id: u64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// List games with their day numbering
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "table", help = "Only this table")]
        table: Option<u32>,

        #[arg(long = "sheet", help = "Show one logical day as per-set sheets")]
        sheet: bool,

        #[arg(long = "date", help = "Logical day for --sheet (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "page", default_value_t = 1, help = "Page to show")]
        page: usize,
    },

    /// Per-set fee totals for one logical day
    Fees {
        #[arg(long = "date", help = "Logical day (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "table", help = "Only this table")]
        table: Option<u32>,
    },

    /// Player rankings
    Ranking {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "min-games", help = "Minimum games to be ranked")]
        min_games: Option<u32>,

        #[arg(long = "top", default_value_t = 5, help = "Rows per view (0 = all)")]
        top: usize,
    },

    /// Export games with their day numbering
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Append the games of another CSV sheet
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_argument() {
        assert_eq!(parse_seat("X:A:1").unwrap(), Seat::new("X", "A", 1));
        assert_eq!(parse_seat("a:b:C:2.0").unwrap(), Seat::new("a:b", "C", 2));
        assert!(parse_seat("X:A").is_err());
        assert!(parse_seat("X:A:first").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
