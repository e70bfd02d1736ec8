//! Household Projection CLI
//!
//! Runs the cash runway projection, goal solvers and net worth snapshot for a
//! household JSON file.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use household_projection::household::{load_accounts, load_budget, load_household, save_household};
use household_projection::networth::breakdown_by_type;
use household_projection::projection::{Depletion, ProjectionResult};
use household_projection::solvers::{sustainable_spend, GoalOption, RetirementOutlook, RetirementTimeline, SavingsPlan};
use household_projection::{
    Household, MarketAssumptions, PlanningAssumptions, ProjectionConfig, ProjectionEngine, ScenarioRunner,
};

#[derive(Parser, Debug)]
#[command(
    name = "household_projection",
    about = "Month-by-month cash runway, retirement goals and net worth for a household"
)]
struct Cli {
    /// Household JSON file
    #[arg(long, default_value = "household.json")]
    household: PathBuf,

    /// Replace the household's accounts with this CSV
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Replace the household's budget with this CSV
    #[arg(long)]
    budget: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    #[arg(long, default_value_t = 5.0, help = "Expected annual return in percent, e.g. 5")]
    return_pct: f64,

    #[arg(long, default_value_t = 3.0, help = "Expected annual inflation in percent, e.g. 3")]
    inflation_pct: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the liquid balance month by month
    Project {
        /// Years to project; defaults to the years left to life expectancy
        #[arg(long)]
        years: Option<u32>,

        /// Keep reporting zero balances after the money runs out
        #[arg(long)]
        fill: bool,

        /// Write every monthly row to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Retirement outlook and the reverse calculator
    Solve {
        /// How long savings should last for the reverse calculator
        #[arg(long, default_value_t = 30)]
        years: u32,
    },
    /// Net worth totals by account type
    Networth {
        /// Upsert today's liquid net worth into the history and save the file
        #[arg(long)]
        record: bool,
    },
    /// Compare the base plan with the household's what-if events
    WhatIf {
        #[arg(long)]
        years: Option<u32>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut household = read_household(&cli)?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let market = MarketAssumptions::new(cli.return_pct, cli.inflation_pct);

    match cli.command {
        Command::Project { years, fill, csv, json } => {
            let input = household.projection_input(today, market);
            let mut config = match years {
                Some(years) => ProjectionConfig::new(years),
                None => ProjectionConfig::new(household.horizon_years(today)),
            };
            config.fill_to_horizon = fill;
            config.detailed_output = csv.is_some();

            let result = ProjectionEngine::new(config).project(&input);
            if let Some(path) = csv {
                write_rows_csv(&path, &result)?;
                println!("Monthly rows written to: {}", path.display());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result.summary())?);
            } else {
                print_projection(&household, &result);
            }
        }
        Command::Solve { years } => {
            let assumptions = PlanningAssumptions::from_env().context("invalid planning assumptions")?;
            let plan = SavingsPlan::from_household(&household, today);
            print_outlook(&plan, &RetirementOutlook::evaluate(&plan, &assumptions));

            let spend = sustainable_spend(&household.projection_input(today, market), years, &assumptions);
            println!("\nReverse Calculator:");
            println!(
                "  To last {} years you can withdraw an additional ${:.2}/month",
                spend.horizon_years, spend.extra_withdrawal
            );
            println!("  (Total allowable monthly spending: ${:.2})", spend.total_monthly_spend);
        }
        Command::Networth { record } => {
            let totals = household.net_worth();
            println!("{:<14} {:>16} {:>16}", "Type", "Assets", "Liabilities");
            println!("{}", "-".repeat(48));
            for (account_type, by_type) in breakdown_by_type(&household.accounts) {
                println!(
                    "{:<14} {:>16.2} {:>16.2}",
                    account_type.as_str(),
                    by_type.total_assets,
                    by_type.total_liabilities
                );
            }
            println!("{}", "-".repeat(48));
            println!("  Total Assets:      ${:.2}", totals.total_assets);
            println!("  Total Liabilities: ${:.2}", totals.total_liabilities);
            println!("  Net Worth:         ${:.2}", totals.total_net_worth());
            println!("  Liquid Net Worth:  ${:.2}", totals.liquid_net_worth);

            if record {
                if household.record_net_worth(today) {
                    save_household(&cli.household, &household)
                        .with_context(|| format!("failed to save {}", cli.household.display()))?;
                    println!("\nHistory updated for {}", today);
                } else {
                    println!("\nHistory already current for {}", today);
                }
            }
        }
        Command::WhatIf { years } => {
            let horizon = years.unwrap_or_else(|| household.horizon_years(today));
            let runner = ScenarioRunner::new(ProjectionConfig::new(horizon));
            let comparison = runner.compare(&household.what_if_input(today, market));

            println!("What-if events: {}", household.scenarios.len());
            for scenario in &household.scenarios {
                println!(
                    "  {:<24} age {:>3} {:>12.2} {:?}",
                    scenario.name, scenario.age, scenario.impact, scenario.frequency
                );
            }
            println!("\n  Base plan lasts until age:    {:.1}", comparison.base_lasts_until);
            println!("  What-if plan lasts until age: {:.1}", comparison.what_if_lasts_until);
            println!("  Difference: {:+.1} years", comparison.years_difference);
            println!("  Final balance difference: ${:+.2}", comparison.final_difference);
        }
    }

    Ok(())
}

fn read_household(cli: &Cli) -> Result<Household> {
    let mut household =
        load_household(&cli.household).with_context(|| format!("failed to load {}", cli.household.display()))?;
    if let Some(path) = &cli.accounts {
        household.accounts = load_accounts(path).with_context(|| format!("failed to load {}", path.display()))?;
    }
    if let Some(path) = &cli.budget {
        household.budget = load_budget(path).with_context(|| format!("failed to load {}", path.display()))?;
    }
    Ok(household)
}

fn write_rows_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &result.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_projection(household: &Household, result: &ProjectionResult) {
    println!("Hi {}, here is your cash runway:", household.profile.first_name());
    println!("{:>6} {:>16}", "Age", "Balance");
    println!("{}", "-".repeat(23));
    for (age, balance) in result.yearly_points() {
        println!("{:>6.1} {:>16.2}", age, balance);
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Months Projected: {}", summary.total_months);
    println!("  Starting Balance: ${:.2}", summary.starting_balance);
    println!("  Peak Balance: ${:.2}", summary.peak_balance);
    println!("  Final Balance: ${:.2}", summary.final_balance);
    match summary.depletion {
        Depletion::Never => println!("  Your money lasts the whole plan (age {:.0}).", summary.lasts_until_age),
        Depletion::Immediately => println!("  Your money runs out within the first year."),
        Depletion::After { years, months } => println!(
            "  Your money runs out in {} years {} months (age {:.1}).",
            years, months, summary.lasts_until_age
        ),
    }
}

fn print_outlook(plan: &SavingsPlan, outlook: &RetirementOutlook) {
    println!("Will It Last?");
    println!("  Nest egg needed: ${:.0}", outlook.target_nest_egg);
    println!("  Projected wealth at {}: ${:.0}", plan.retirement_age, outlook.future_wealth);
    if outlook.needs_budget {
        println!("  Enter income and expenses in the budget to see personalized projections.");
    }

    match outlook.timeline {
        RetirementTimeline::AlreadyRetired => println!("  You've already stopped working."),
        RetirementTimeline::NeedsData => {
            println!("  Enter your monthly expenses in the budget to see when you can retire.")
        }
        RetirementTimeline::NegativeCashflow => println!("  Your expenses currently exceed your income."),
        RetirementTimeline::TargetMet => println!("  You have already reached your financial independence number."),
        RetirementTimeline::Reached { years, age } => {
            println!("  You can retire in approximately {} years (at age {}).", years, age)
        }
        RetirementTimeline::Unreachable => println!("  You are working toward your retirement goal."),
    }

    let Some(options) = outlook.options else {
        return;
    };
    println!(
        "\nTo retire in {} years (at age {}) you could:",
        options.target_years, options.target_age
    );
    print_option("Invest a lump sum today", &options.lump_sum, |v| format!("${:.0}", v));
    print_option("Save an extra", &options.extra_monthly, |v| format!("${:.0}/mo", v));
    print_option("Retire later, at age", &options.retire_later, |v| v.to_string());
    print_option("Spend at most", &options.safe_monthly_spend, |v| format!("${:.0}/mo", v));
}

fn print_option<T>(label: &str, option: &GoalOption<T>, format: impl Fn(&T) -> String) {
    match option {
        GoalOption::OnTrack => println!("  {:<26} ON TRACK", label),
        GoalOption::NeedsData => println!("  {:<26} (enter expenses first)", label),
        GoalOption::Needs(value) => println!("  {:<26} {}", label, format(value)),
        GoalOption::Unreachable => println!("  {:<26} not before the age limit", label),
    }
}
