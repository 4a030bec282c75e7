use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dcf_valuation::config::StoreConfig;
use dcf_valuation::models::*;
use dcf_valuation::{engine, report, store::ResultStore};

#[derive(Parser)]
#[command(name = "dcfv")]
#[command(about = "DCF Valuation Calculator")]
struct Cli {
    /// Company Name
    #[arg(long)]
    company: String,

    /// Operating Cash Flow (₹ million)
    #[arg(long, allow_negative_numbers = true)]
    ocf: f64,

    /// Capital Expenditures (₹ million)
    #[arg(long, allow_negative_numbers = true)]
    capex: f64,

    /// Total Shares Outstanding (million)
    #[arg(long, allow_negative_numbers = true)]
    shares: f64,

    /// Annual FCF Growth Rate
    #[arg(long, default_value_t = DEFAULT_GROWTH_RATE, allow_negative_numbers = true)]
    growth: f64,

    /// Discount Rate
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE, allow_negative_numbers = true)]
    discount: f64,

    /// Terminal Growth Rate
    #[arg(long, default_value_t = DEFAULT_TERMINAL_GROWTH_RATE, allow_negative_numbers = true)]
    terminal: f64,

    /// Result file to update (overrides DCF_STORE)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Print the valuation as JSON instead of the step-by-step report
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a ValuationInput,
    result: &'a ValuationResult,
}

/// Initialize tracing on stderr so stdout carries only the report
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "dcf_valuation=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let input = ValuationInput::new(cli.company, cli.ocf, cli.capex, cli.shares)
        .with_rates(cli.growth, cli.discount, cli.terminal);

    let result = engine::compute(&input).context("Valuation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&JsonOutput {
            input: &input,
            result: &result,
        })?;
        println!("{}", json);
    } else {
        println!();
        print!("{}", report::render_report(&input, &result));
        println!();
    }

    let config = StoreConfig::from_env(cli.store);
    let store = ResultStore::open(config.path);
    store
        .upsert(&input.company_name, result.intrinsic_value_per_share)
        .with_context(|| format!("Failed to save result to {}", store.path().display()))?;

    let confirmation = format!("Valuation result saved to {}", store.path().display());
    if cli.json {
        eprintln!("{}", confirmation);
    } else {
        println!("{}", confirmation);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_shares_reach_validation() {
        let cli = Cli::try_parse_from([
            "dcfv", "--company", "Acme", "--ocf", "1000", "--capex", "200", "--shares", "-5",
        ])
        .expect("negative shares should parse");
        assert_eq!(cli.shares, -5.0);

        let input = ValuationInput::new(cli.company, cli.ocf, cli.capex, cli.shares);
        assert!(matches!(
            engine::compute(&input),
            Err(engine::ValuationError::InvalidInput(_))
        ));
    }
}
