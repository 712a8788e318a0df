//! Loan Strategy CLI
//!
//! Sweeps loan payment percentages and reports how each split of monthly
//! savings between extra loan payment and investment plays out.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process;

use loan_strategy::config::validate_percentage;
use loan_strategy::investment::{default_portfolio, portfolio_annual_return, DEFAULT_PORTFOLIO_YEARS};
use loan_strategy::report::{render_table, timestamp};
use loan_strategy::{simulate, ReportWriter, ScenarioRunner, SimulationInputs};

#[derive(Parser)]
#[command(
    name = "loan-strategy",
    version,
    about = "Compare paying down a loan early against investing the difference"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with simulation inputs; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory under which reports/ and figures/ are created
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep loan payment percentages and write the report files
    Sweep(InputArgs),
    /// Simulate a single loan payment percentage and print the result as JSON
    Simulate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Share of monthly savings paid into the loan, in percent (0-100)
        #[arg(long)]
        percentage: f64,
    },
    /// Print the annual return of the reference two-fund portfolio
    PortfolioReturn,
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Loan balance in the loan's currency
    #[arg(long)]
    loan_balance: Option<f64>,

    /// Loan interest rate in percent (e.g. 7.9)
    #[arg(long)]
    loan_rate: Option<f64>,

    /// Loan-currency units per CHF (default 1/1.14)
    #[arg(long)]
    conversion_rate: Option<f64>,

    /// Minimum monthly loan payment in CHF
    #[arg(long)]
    min_payment: Option<f64>,

    /// Monthly savings in CHF
    #[arg(long)]
    monthly_savings: Option<f64>,

    /// Number of years to simulate
    #[arg(long)]
    total_years: Option<u32>,

    /// Years until the remaining balance is forgiven
    #[arg(long)]
    forgiveness_years: Option<u32>,

    /// Starting investment value in CHF
    #[arg(long)]
    starting_investment: Option<f64>,

    /// Average investment return in percent (e.g. 5.43)
    #[arg(long, allow_hyphen_values = true)]
    investment_return: Option<f64>,

    /// Step between swept percentages
    #[arg(long)]
    step: Option<u32>,

    /// Tag appended to output file names
    #[arg(long)]
    identifier: Option<String>,
}

impl InputArgs {
    fn apply(&self, inputs: &mut SimulationInputs) {
        if let Some(v) = self.loan_balance {
            inputs.loan_balance = v;
        }
        if let Some(v) = self.loan_rate {
            inputs.loan_interest_rate_pct = v;
        }
        if let Some(v) = self.conversion_rate {
            inputs.conversion_rate = v;
        }
        if let Some(v) = self.min_payment {
            inputs.min_loan_payment = v;
        }
        if let Some(v) = self.monthly_savings {
            inputs.monthly_savings = v;
        }
        if let Some(v) = self.total_years {
            inputs.total_years = v;
        }
        if let Some(v) = self.forgiveness_years {
            inputs.years_until_forgiveness = v;
        }
        if let Some(v) = self.starting_investment {
            inputs.starting_investment_value = v;
        }
        if let Some(v) = self.investment_return {
            inputs.investment_return_pct = v;
        }
        if let Some(v) = self.step {
            inputs.percentage_step = v;
        }
        if let Some(ref v) = self.identifier {
            inputs.identifier = v.clone();
        }
    }
}

fn load_inputs(config: &Option<PathBuf>, args: &InputArgs) -> Result<SimulationInputs> {
    let mut inputs = match config {
        Some(path) => SimulationInputs::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SimulationInputs::default(),
    };
    args.apply(&mut inputs);
    inputs.validate().context("Invalid simulation inputs")?;
    Ok(inputs)
}

fn run_sweep(inputs: SimulationInputs, output_dir: PathBuf) -> Result<()> {
    info!("Loan balance {:.2} -> CHF {:.2}", inputs.loan_balance, inputs.loan_balance_chf());

    let runner = ScenarioRunner::new(inputs);
    let rows = runner.run().context("Scenario sweep failed")?;

    println!("{}", render_table(&rows));

    let paths = ReportWriter::new(output_dir)
        .write_all(runner.inputs(), &rows, &timestamp())
        .context("Failed to write reports")?;

    println!("Data has been saved to {}", paths.table.display());
    println!("CSV: {}", paths.csv.display());
    println!("Chart series: {}", paths.chart.display());
    Ok(())
}

fn run_simulate(inputs: SimulationInputs, percentage: f64) -> Result<()> {
    let loan_payment_percentage = percentage / 100.0;
    validate_percentage(loan_payment_percentage)?;

    let result = simulate(&inputs.parameters(loan_payment_percentage));
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sweep(args) => run_sweep(load_inputs(&cli.config, &args)?, cli.output_dir),
        Commands::Simulate { inputs, percentage } => {
            run_simulate(load_inputs(&cli.config, &inputs)?, percentage)
        }
        Commands::PortfolioReturn => {
            let annual_return = portfolio_annual_return(&default_portfolio(), DEFAULT_PORTFOLIO_YEARS);
            println!("The annual return of the portfolio is: {:.2}%", annual_return * 100.0);
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
