use crate::cli::parser::Cli;
use crate::config::{Config, StoreBackend};
use crate::errors::AppResult;
use crate::store::{self, SqliteStore, Store};
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// Creates the config directory and file (unless `--test`) and the store.
/// A SQLite store gets its tables and pending migrations; a CSV store is
/// created empty with its header.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.store.clone(), cli.backend, cli.test)?;

    println!("⚙️  Initializing mjledger…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Store       : {} ({:?})", cfg.store, cfg.backend);

    match cfg.backend {
        StoreBackend::Sqlite => {
            let mut db = SqliteStore::open(&cfg.store)?;
            if let Err(e) = db.audit("init", "", &format!("Store initialized at {}", cfg.store)) {
                warning(format!("Failed to write internal log: {e}"));
            }
        }
        StoreBackend::Csv => {
            let mut sheet = store::open(&cfg)?;
            let records = sheet.list_all()?;
            sheet.replace_all(&records)?;
        }
    }

    success(format!("Store initialized at {}", cfg.store));
    Ok(())
}
