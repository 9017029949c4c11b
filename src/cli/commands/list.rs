use crate::cli::commands::{day_or_today, describe_seats};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sequencer::Sequencer;
use crate::core::sheet::{SetSheet, paginate, sheets_for_day};
use crate::errors::AppResult;
use crate::models::SequencedRecord;
use crate::store::{self, Store};
use crate::ui::messages::{header, info};
use crate::utils::period::{self, parse_optional_period};
use crate::utils::table::{Column, Table};

fn games_table(rows: &[SequencedRecord], with_day: bool) -> Table {
    let mut columns = Vec::new();
    if with_day {
        columns.push(Column::left("Day"));
    }
    columns.extend([
        Column::right("#"),
        Column::right("Game"),
        Column::right("Table"),
        Column::right("Set"),
        Column::left("Time"),
        Column::left("Seats"),
        Column::left("Note"),
    ]);

    let mut table = Table::new(columns);
    for s in rows {
        let mut row = Vec::new();
        if with_day {
            row.push(s.logical_date.to_string());
        }
        row.extend([
            s.daily_sequence.to_string(),
            s.record.game_id.to_string(),
            s.record.table_no.to_string(),
            s.record.set_no.to_string(),
            s.record.timestamp.clone(),
            describe_seats(&s.record),
            s.record.note.clone(),
        ]);
        table.add_row(row);
    }
    table
}

fn print_sheet(sheet: &SetSheet, page: usize, total_pages: usize) {
    header(format!(
        "{} | table {} | set {}  (sheet {page}/{total_pages})",
        sheet.logical_date, sheet.table_no, sheet.set_no
    ));
    print!("{}", games_table(&sheet.rows, false).render());

    let counts: Vec<String> = sheet
        .fees
        .category_counts
        .iter()
        .map(|(token, n)| format!("{token}:{n}"))
        .collect();
    println!(
        "\nFee total: {}   Wins by category: {}\n",
        sheet.fees.total_fee,
        counts.join(" ")
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        table,
        sheet,
        date,
        page,
    } = cmd
    {
        let mut store = store::open(cfg)?;
        let records = store.list_all()?;
        let rows = Sequencer::sorted(Sequencer::sequence(&records));

        if *sheet {
            let day = day_or_today(date.as_deref())?;
            let sheets = sheets_for_day(&rows, &cfg.rules, day, *table);
            if sheets.is_empty() {
                info(format!("No games on {day}."));
                return Ok(());
            }

            let p = paginate(&sheets, *page, 1);
            for s in &p.items {
                print_sheet(s, p.page, p.total_pages);
            }
            return Ok(());
        }

        let bounds = parse_optional_period(period.as_deref())?;
        let selected: Vec<SequencedRecord> = rows
            .into_iter()
            .filter(|s| period::contains(&bounds, s.logical_date))
            .filter(|s| table.is_none_or(|t| s.record.table_no == t))
            .collect();

        if selected.is_empty() {
            info("No games found.");
            return Ok(());
        }

        let p = paginate(&selected, *page, cfg.page_size);
        print!("{}", games_table(&p.items, true).render());
        if p.total_pages > 1 {
            println!(
                "\nPage {}/{} ({} games)",
                p.page, p.total_pages, p.total_items
            );
        }

        let current: Vec<String> = Sequencer::max_set_per_table(&records)
            .iter()
            .map(|(t, s)| format!("table {t} set {s}"))
            .collect();
        println!("\nCurrent sets: {}", current.join(", "));
    }

    Ok(())
}
