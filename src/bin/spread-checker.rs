//! spread-checker CLI - compare FX quotes and browse synthetic rate history
//!
//! ## Example Usage
//!
//! ```bash
//! # Compare your rate with a competitor's
//! spread-checker compare --your-rate 1.3550 --competitor-rate 1.3540 --amount 500000 --trades 52
//!
//! # Last five days of GBP/USD
//! spread-checker history --pair GBPUSD --timeframe 5D
//!
//! # Rate at a past date and time
//! spread-checker lookup --pair GBPUSD --date 2024-06-01 --time "1pm"
//! ```

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spread_checker::clock::{Clock, SystemClock};
use spread_checker::comparison::{validate, ComparisonRecord, RawComparisonInput, MARGIN_PIP_OPTIONS};
use spread_checker::config::Config;
use spread_checker::data::{lookup, summarize, write_series_csv, SeriesStore, Timeframe};
use spread_checker::format::to_fixed;
use spread_checker::live::LiveRateTicker;
use spread_checker::types::millis_to_datetime;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

/// spread-checker: FX rate comparison and savings calculator
#[derive(Parser)]
#[command(name = "spread-checker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FX rate comparison and savings calculator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare your rate with a competitor's rate
    Compare {
        /// Your quoted rate
        #[arg(long)]
        your_rate: String,

        /// Competitor's quoted rate
        #[arg(long)]
        competitor_rate: String,

        /// Notional per trade
        #[arg(short = 'a', long)]
        amount: String,

        /// Trades per year
        #[arg(short = 't', long)]
        trades: String,

        /// Margin added to your rate, in pips
        #[arg(short = 'm', long, default_value_t = 0, allow_hyphen_values = true)]
        margin_pips: i32,

        /// Competitor name for the comparison record
        #[arg(long)]
        competitor_name: Option<String>,

        /// Print the comparison record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured currency pairs
    Pairs,

    /// Show the synthetic rate history for a pair
    History {
        /// Pair symbol (GBPUSD or GBP/USD)
        #[arg(short, long)]
        pair: Option<String>,

        /// Timeframe (1D, 5D, 1M, 3M)
        #[arg(short, long, default_value = "1M")]
        timeframe: String,

        /// Seed for a reproducible history
        #[arg(long)]
        seed: Option<u64>,

        /// Write the window to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Find the rate at a past date and time
    Lookup {
        /// Pair symbol (GBPUSD or GBP/USD)
        #[arg(short, long)]
        pair: Option<String>,

        /// Date (YYYY-MM-DD, UTC)
        #[arg(short, long)]
        date: String,

        /// Time of day (13:00, 1:00 PM, 1pm)
        #[arg(long)]
        time: String,

        /// Seed for a reproducible history
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Stream live display rates for a pair
    Ticker {
        /// Pair symbol (GBPUSD or GBP/USD)
        #[arg(short, long)]
        pair: Option<String>,

        /// Number of updates before exiting
        #[arg(short = 'n', long, default_value_t = 5)]
        ticks: usize,
    },
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".spread-checker")
}

/// Explicit path, then ~/.spread-checker/config.toml, then defaults
fn load_config(path: Option<&Path>) -> Config {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_dir().join("config.toml"),
    };
    if !path.exists() {
        return Config::default();
    }

    match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{} Failed to load config {}: {}",
                "Warning:".yellow(),
                path.display(),
                e
            );
            log::warn!("falling back to default config: {}", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    if cli.verbose {
        println!(
            "{} v{}",
            "spread-checker".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "Pairs: {}",
            config
                .pairs
                .iter()
                .map(|p| p.symbol.as_str())
                .collect::<Vec<_>>()
                .join(", ")
                .dimmed()
        );
    }

    let result = match cli.command {
        Commands::Compare {
            your_rate,
            competitor_rate,
            amount,
            trades,
            margin_pips,
            competitor_name,
            json,
        } => {
            let raw = RawComparisonInput::new(your_rate, competitor_rate, amount, trades)
                .with_margin_pips(margin_pips);
            run_compare(raw, competitor_name.as_deref(), json, cli.verbose)
        }
        Commands::Pairs => show_pairs(&config),
        Commands::History {
            pair,
            timeframe,
            seed,
            csv,
        } => show_history(&config, pair, &timeframe, seed, csv),
        Commands::Lookup {
            pair,
            date,
            time,
            seed,
        } => run_lookup(&config, pair, &date, &time, seed),
        Commands::Ticker { pair, ticks } => run_ticker(&config, pair, ticks),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run_compare(
    raw: RawComparisonInput,
    competitor_name: Option<&str>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let input = match validate(&raw) {
        Ok(input) => input,
        Err(errors) => {
            for message in errors.messages() {
                eprintln!("  {} {}", "✗".red(), message);
            }
            bail!("{} invalid field(s)", errors.len());
        }
    };

    if !MARGIN_PIP_OPTIONS.contains(&input.margin_pips) {
        log::warn!("margin of {} pips is outside the usual options", input.margin_pips);
    }

    let record = ComparisonRecord::capture(&input, competitor_name)?;
    record.log()?;

    if json {
        println!("{}", record.to_json()?);
        return Ok(());
    }

    let r = &record.results;
    let headline = if r.is_advantage {
        format!("You are {} pips better", r.pips_advantage).green().bold()
    } else {
        format!("Competitor is {} pips better", r.pips_advantage)
            .yellow()
            .bold()
    };

    println!("{}", headline);
    println!();
    if verbose {
        println!("  {:<24} {}", "Your effective rate:".bold(), record.your_rate);
        println!(
            "  {:<24} {}",
            "Competitor rate:".bold(),
            to_fixed(record.competitor_rate, 4)
        );
    }
    println!("  {:<24} {}", "Price difference:".bold(), r.price_difference);
    println!(
        "  {:<24} {:.2}",
        "Cost at competitor rate:".bold(),
        r.cost_at_competitor_rate
    );
    println!("  {:<24} {:.2}", "Cost at your rate:".bold(), r.cost_at_your_rate);
    println!("  {:<24} {}", "Savings per trade:".bold(), r.savings_per_trade);
    println!("  {:<24} {}", "Annual savings:".bold(), r.annual_savings);
    println!("  {:<24} {}%", "Percentage:".bold(), r.percentage_savings);
    Ok(())
}

fn show_pairs(config: &Config) -> Result<()> {
    let default = config.pair(&config.default_pair)?;
    println!("{}", "Currency pairs".cyan().bold());
    for pair in config.fx_pairs()? {
        let marker = if pair.pair == default.pair {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            " {} {:<8} {}",
            marker,
            pair.label(),
            to_fixed(pair.base_rate, 4)
        );
    }
    Ok(())
}

fn store_for(config: &Config, seed: Option<u64>) -> Result<SeriesStore> {
    let mut config = config.clone();
    if seed.is_some() {
        config.seed = seed;
    }
    SeriesStore::from_config(&config).context("failed to build series store")
}

fn show_history(
    config: &Config,
    pair: Option<String>,
    timeframe: &str,
    seed: Option<u64>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let symbol = pair.unwrap_or_else(|| config.default_pair.clone());
    let timeframe: Timeframe = timeframe.parse()?;
    let mut store = store_for(config, seed)?;
    let window = store.chart(&symbol, timeframe)?;

    let Some(summary) = summarize(&window) else {
        bail!("no data for {} over {}", symbol, timeframe);
    };

    println!(
        "{} {} ({} points)",
        symbol.to_uppercase().cyan().bold(),
        timeframe,
        summary.points
    );
    println!(
        "  {} {} → {}",
        "Range:".bold(),
        millis_to_datetime(summary.start).format("%d %b %Y %H:%M"),
        millis_to_datetime(summary.end).format("%d %b %Y %H:%M")
    );
    println!("  {} {:.4}", "Open:".bold(), summary.first);
    println!("  {} {:.4}", "Last:".bold(), summary.last);
    println!("  {} {:.4} / {:.4}", "Low/High:".bold(), summary.min, summary.max);
    println!("  {} {:.4} (σ {:.5})", "Mean:".bold(), summary.mean, summary.std_dev);
    let change = format!("{:+.4} ({:+.2}%)", summary.change, summary.change_pct);
    println!(
        "  {} {}",
        "Change:".bold(),
        if summary.change >= 0.0 {
            change.green()
        } else {
            change.red()
        }
    );

    if let Some(path) = csv {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_series_csv(&window, file)?;
        println!("  {} {}", "Wrote".green(), path.display());
    }
    Ok(())
}

fn run_lookup(
    config: &Config,
    pair: Option<String>,
    date: &str,
    time: &str,
    seed: Option<u64>,
) -> Result<()> {
    let symbol = pair.unwrap_or_else(|| config.default_pair.clone());
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", date))?;
    let mut store = store_for(config, seed)?;

    match lookup(&mut store, &symbol, date, time)? {
        Some(found) => {
            println!(
                "{} at {}: {}",
                symbol.to_uppercase().cyan().bold(),
                millis_to_datetime(found.point.timestamp).format("%d %b %Y %H:%M"),
                to_fixed(found.point.price, 4).bold()
            );
            if let Some(summary) = summarize(&found.window) {
                println!(
                    "  {} {:.4} / {:.4} over {} points",
                    "5D low/high:".bold(),
                    summary.min,
                    summary.max,
                    summary.points
                );
            }
            Ok(())
        }
        None => bail!("no data available for the selected date/time"),
    }
}

fn run_ticker(config: &Config, pair: Option<String>, ticks: usize) -> Result<()> {
    let symbol = pair.unwrap_or_else(|| config.default_pair.clone());
    let fx_pair = config.pair(&symbol)?;
    let clock = SystemClock;
    let mut rng = StdRng::from_entropy();
    let interval = config.ticker_interval()?;
    let mut ticker =
        LiveRateTicker::new(fx_pair, interval).with_max_fluctuation(config.ticker_max_fluctuation);

    let start = ticker.set_pair(fx_pair, &clock);
    println!("{} {}", fx_pair.label().cyan().bold(), start.formatted());

    let sleep = interval
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(1));
    let mut emitted = 0;
    while emitted < ticks {
        std::thread::sleep(sleep);
        if let Some(quote) = ticker.poll(&clock, &mut rng) {
            let time = clock.now().format("%H:%M:%S");
            println!("  {} {}", time.to_string().dimmed(), quote.formatted());
            emitted += 1;
        }
    }
    Ok(())
}
