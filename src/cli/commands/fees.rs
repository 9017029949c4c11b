use crate::cli::commands::day_or_today;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sequencer::Sequencer;
use crate::core::sheet::sheets_for_day;
use crate::errors::AppResult;
use crate::store::{self, Store};
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Fees { date, table } = cmd {
        let day = day_or_today(date.as_deref())?;

        let mut store = store::open(cfg)?;
        let rows = Sequencer::sequence(&store.list_all()?);
        let sheets = sheets_for_day(&rows, &cfg.rules, day, *table);

        if sheets.is_empty() {
            info(format!("No games on {day}."));
            return Ok(());
        }

        let mut columns = vec![
            Column::right("Table"),
            Column::right("Set"),
            Column::right("Games"),
        ];
        columns.extend(cfg.rules.category_tokens().map(Column::right));
        columns.push(Column::right("Fee"));

        let mut out = Table::new(columns);
        let mut day_total = 0;
        for s in &sheets {
            let mut row = vec![
                s.table_no.to_string(),
                s.set_no.to_string(),
                s.rows.len().to_string(),
            ];
            row.extend(cfg.rules.category_tokens().map(|token| {
                s.fees
                    .category_counts
                    .get(token)
                    .copied()
                    .unwrap_or(0)
                    .to_string()
            }));
            row.push(s.fees.total_fee.to_string());
            out.add_row(row);
            day_total += s.fees.total_fee;
        }

        header(format!("Fees for {day}"));
        print!("{}", out.render());
        println!("\nDay total: {day_total}");
    }

    Ok(())
}
