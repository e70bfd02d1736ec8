//! Compare the base plan with each what-if event of a household
//!
//! Usage: cargo run --bin compare_scenarios -- household.json [--json]
//!
//! Every event is run on its own against the base plan, plus one run with all
//! events together. Runs execute in parallel.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use household_projection::household::load_household;
use household_projection::{MarketAssumptions, ProjectionConfig, ScenarioComparison, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "compare_scenarios", about = "Base plan vs what-if events, one event at a time")]
struct Args {
    /// Household JSON file
    household: PathBuf,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Years to project; defaults to the years left to life expectancy
    #[arg(long)]
    years: Option<u32>,

    #[arg(long, default_value_t = 5.0)]
    return_pct: f64,

    #[arg(long, default_value_t = 3.0)]
    inflation_pct: f64,

    /// Emit the comparisons as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct EventImpact {
    event: String,
    base_lasts_until: f64,
    what_if_lasts_until: f64,
    years_difference: f64,
    final_difference: f64,
    base_ran_out: bool,
    what_if_ran_out: bool,
}

impl EventImpact {
    fn new(event: impl Into<String>, comparison: &ScenarioComparison) -> Self {
        Self {
            event: event.into(),
            base_lasts_until: comparison.base_lasts_until,
            what_if_lasts_until: comparison.what_if_lasts_until,
            years_difference: comparison.years_difference,
            final_difference: comparison.final_difference,
            base_ran_out: comparison.base.ran_out,
            what_if_ran_out: comparison.what_if.ran_out,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let household =
        load_household(&args.household).with_context(|| format!("failed to load {}", args.household.display()))?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let market = MarketAssumptions::new(args.return_pct, args.inflation_pct);
    let horizon = args.years.unwrap_or_else(|| household.horizon_years(today));
    let runner = ScenarioRunner::new(ProjectionConfig::new(horizon));

    let base_input = household.projection_input(today, market);
    log::info!(
        "comparing {} what-if events over {} years",
        household.scenarios.len(),
        horizon
    );

    let mut impacts: Vec<EventImpact> = household
        .scenarios
        .par_iter()
        .map(|scenario| {
            let input = base_input.clone().with_scenarios(vec![scenario.clone()]);
            EventImpact::new(scenario.name.clone(), &runner.compare(&input))
        })
        .collect();

    if household.scenarios.len() > 1 {
        let combined = runner.compare(&household.what_if_input(today, market));
        impacts.push(EventImpact::new("All events", &combined));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&impacts)?);
        return Ok(());
    }

    println!(
        "{:<28} {:>10} {:>10} {:>10} {:>16}",
        "Event", "Base Age", "What-if", "Diff (y)", "Final Diff"
    );
    println!("{}", "-".repeat(78));
    for impact in &impacts {
        println!(
            "{:<28} {:>10.1} {:>10.1} {:>+10.1} {:>16.2}",
            impact.event,
            impact.base_lasts_until,
            impact.what_if_lasts_until,
            impact.years_difference,
            impact.final_difference
        );
    }

    Ok(())
}
