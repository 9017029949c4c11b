use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ranking::{PlayerStats, RankingEngine};
use crate::errors::AppResult;
use crate::store::{self, Store};
use crate::ui::messages::{header, info};
use crate::utils::period::parse_optional_period;
use crate::utils::table::{Column, Table};

fn print_view(title: &str, rows: &[PlayerStats], top: usize) {
    let mut t = Table::new(vec![
        Column::right("#"),
        Column::left("Player"),
        Column::right("Games"),
        Column::right("Avg"),
        Column::right("1st"),
        Column::right("Last"),
        Column::right("Top%"),
        Column::right("Avoid%"),
    ]);

    let limit = if top == 0 { rows.len() } else { top };
    for (i, p) in rows.iter().take(limit).enumerate() {
        t.add_row(vec![
            (i + 1).to_string(),
            p.name.clone(),
            p.games.to_string(),
            format!("{:.2}", p.avg_rank),
            p.first_count.to_string(),
            p.last_count.to_string(),
            format!("{:.1}", p.top_rate),
            format!("{:.1}", p.last_avoid_rate),
        ]);
    }

    header(title);
    println!("{}", t.render());
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ranking {
        period,
        min_games,
        top,
    } = cmd
    {
        let bounds = parse_optional_period(period.as_deref())?;
        let min_games = min_games.unwrap_or(cfg.min_games);

        let mut store = store::open(cfg)?;
        let records = store.list_all()?;
        let r = RankingEngine::rankings_in(&records, &cfg.rules, min_games, &bounds);

        if r.is_empty() {
            info(format!("No player has {min_games} or more games."));
            return Ok(());
        }

        print_view("Most games", &r.by_games, *top);
        print_view("Best average rank", &r.by_avg_rank, *top);
        print_view("Top rate", &r.by_top_rate, *top);
        print_view("Last-place avoidance", &r.by_last_avoid, *top);
    }

    Ok(())
}
