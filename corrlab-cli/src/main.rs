//! CorrLab CLI — run the fetch + correlate pipeline once and print the
//! matrix as JSON. Skip notices go to stderr, the matrix to stdout, so the
//! output can be piped straight into other tools.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use corrlab_core::data::fetch::FetchWindow;
use corrlab_core::data::yahoo::YahooProvider;
use corrlab_core::{run, TickerBasket};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "corrlab",
    about = "Correlation matrix of daily returns for a basket of equity indices"
)]
struct Cli {
    /// Path to a TOML basket file. Defaults to the built-in six indices.
    #[arg(long)]
    basket: Option<PathBuf>,

    /// Trailing fetch window in calendar years.
    #[arg(long, default_value_t = 5)]
    years: u32,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let basket = match &cli.basket {
        Some(path) => TickerBasket::from_file(path)?,
        None => TickerBasket::default_indices(),
    };

    let end = cli
        .end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let provider = YahooProvider::new()?;
    let window = FetchWindow::trailing_years(end, cli.years.max(1));

    let report = run(&provider, &basket, window);

    for skip in &report.skipped {
        eprintln!("Skipped {} ({}): {}", skip.name, skip.symbol, skip.reason);
    }
    if report.matrix.is_empty() {
        eprintln!("No data fetched.");
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report.matrix)?
    } else {
        serde_json::to_string(&report.matrix)?
    };
    println!("{json}");

    Ok(())
}
