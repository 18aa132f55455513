//! Rental ROI CLI
//!
//! Command-line interface for running rental property projections

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rental_roi::inputs::{load_scenarios, read_json};
use rental_roi::projection::{
    amortization_schedule, analyze_brrrr, calculate_depreciation, BrrrrDeal, DepreciationInputs,
    PaymentBreakdown,
};
use rental_roi::report::{write_batch_csv, write_yearly_csv_path, SavedCalculationPayload};
use rental_roi::{CalculatedMetrics, ProjectionEngine, ProjectionInputs, ScenarioRunner, SweepField};

/// Multi-year return-on-investment projections for rental property
#[derive(Parser)]
#[command(name = "rental-roi", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project one property (calculator defaults unless --input is given)
    Project {
        /// JSON file with loan, expenses, income and settings
        #[arg(long)]
        input: Option<PathBuf>,

        /// Also write the yearly table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the saved-calculation JSON payload instead of tables
        #[arg(long)]
        json: bool,

        /// Name stored with the JSON payload
        #[arg(long)]
        name: Option<String>,

        /// Print the month-by-month amortization schedule
        #[arg(long)]
        schedule: bool,

        /// Print the first year month by month
        #[arg(long)]
        breakdown: bool,
    },

    /// Project every scenario in a CSV file
    Batch {
        /// Scenario CSV, one property per row
        #[arg(long)]
        input: PathBuf,

        /// Summary CSV destination (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Vary one input over a list of values
    Sweep {
        /// Field to vary: interest-rate, down-payment, monthly-rent,
        /// rent-increase, vacancy-rate or appreciation
        #[arg(long)]
        field: SweepField,

        /// Comma-separated values, e.g. 5.5,6.5,7.5
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f64>,

        /// Base inputs JSON (calculator defaults if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Analyze a buy-rehab-rent-refinance deal
    Brrrr {
        /// Deal JSON (calculator defaults if omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Straight-line depreciation of the building
    Depreciation {
        /// Inputs JSON (calculator defaults if omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project { input, csv, json, name, schedule, breakdown } => {
            let inputs = read_inputs(input.as_ref())?;
            run_project(&inputs, csv, json, name, schedule, breakdown)
        }
        Commands::Batch { input, output } => run_batch(input, output),
        Commands::Sweep { field, values, input } => {
            let inputs = read_inputs(input.as_ref())?;
            run_sweep(inputs, field, &values)
        }
        Commands::Brrrr { input, json } => run_brrrr(input.as_ref(), json),
        Commands::Depreciation { input, json } => run_depreciation(input.as_ref(), json),
    }
}

fn read_inputs(path: Option<&PathBuf>) -> Result<ProjectionInputs> {
    match path {
        Some(path) => ProjectionInputs::from_json_path(path)
            .with_context(|| format!("Failed to read inputs from {}", path.display())),
        None => Ok(ProjectionInputs::default()),
    }
}

fn run_project(
    inputs: &ProjectionInputs,
    csv: Option<PathBuf>,
    json: bool,
    name: Option<String>,
    schedule: bool,
    breakdown: bool,
) -> Result<()> {
    let engine = ProjectionEngine::default();
    let metrics = engine.compute_inputs(inputs)?;

    if let Some(path) = &csv {
        write_yearly_csv_path(path, &metrics)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if json {
        let payload = SavedCalculationPayload::new(name, inputs, Some(&metrics));
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Rental ROI v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");

    let loan = &inputs.loan;
    println!("Property:");
    println!("  Purchase Price: ${:.2}", loan.purchase_price);
    println!("  Down Payment: ${:.2} ({:.1}%)", loan.down_payment, loan.down_payment_percent());
    println!("  Loan Amount: ${:.2}", loan.loan_amount());
    println!("  Interest Rate: {}% over {} years", loan.interest_rate, loan.loan_term_years);
    println!("  Monthly Rent: ${:.2}", inputs.income.monthly_rent);
    println!();

    let payment = PaymentBreakdown::from_inputs(loan, &inputs.expenses);
    println!("Monthly Payment:");
    println!("  Principal & Interest: ${:.2}", payment.principal_and_interest);
    println!("  Property Tax: ${:.2}", payment.property_tax);
    println!("  Insurance: ${:.2}", payment.insurance);
    println!("  HOA: ${:.2}", payment.hoa);
    println!("  Total: ${:.2}", payment.total);
    println!();

    print_metrics(&metrics);

    if breakdown {
        let months = engine.monthly_breakdown(&inputs.loan, &inputs.expenses, &inputs.income, &inputs.settings)?;
        println!("\nFirst Year by Month:");
        println!("{:<10} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Month", "Income", "Expenses", "Mortgage", "Interest", "Net CF");
        println!("{}", "-".repeat(75));
        for month in &months {
            println!("{:<10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                month.month, month.income, month.expenses, month.mortgage, month.interest, month.net_cash_flow);
        }
    }

    if schedule {
        let rows = amortization_schedule(loan);
        println!("\nAmortization Schedule ({} payments):", rows.len());
        println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Interest", "Principal", "Balance");
        println!("{}", "-".repeat(60));
        for row in &rows {
            println!("{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                row.month, row.payment, row.interest, row.principal, row.balance);
        }
    }

    if let Some(path) = &csv {
        println!("\nYearly projections written to: {}", path.display());
    }

    Ok(())
}

fn print_metrics(metrics: &CalculatedMetrics) {
    println!("Key Metrics:");
    println!("  Total Cash Invested: ${:.2}", metrics.total_cash_invested);
    println!("  Monthly Mortgage: ${:.2}", metrics.monthly_mortgage_payment);
    println!("  Net Monthly Cash Flow: ${:.2}", metrics.net_monthly_cash_flow);
    println!("  Annual NOI: ${:.2}", metrics.annual_noi);
    println!("  Cash-on-Cash Return: {}", format_pct(metrics.cash_on_cash_return_pct));
    println!("  Cap Rate: {}", format_pct(metrics.cap_rate_pct));
    println!("  DSCR: {}", metrics.dscr.map(|d| format!("{:.2}", d)).unwrap_or_else(|| "n/a".into()));
    println!("  IRR: {}", format_pct(metrics.irr_pct));
    for warning in &metrics.warnings {
        println!("  Warning: {}", warning);
    }

    println!("\nProjections ({} years):", metrics.yearly_projections.len());
    println!("{:>4} {:>12} {:>12} {:>12} {:>12} {:>14} {:>14} {:>14} {:>10}",
        "Year", "Income", "Expenses", "NOI", "Cash Flow", "Loan Balance", "Value", "Equity", "ROI");
    println!("{}", "-".repeat(112));

    for year in &metrics.yearly_projections {
        println!("{:>4} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2} {:>14.2} {:>9.2}%",
            year.year,
            year.effective_income,
            year.operating_expenses,
            year.net_operating_income,
            year.cash_flow,
            year.loan_balance,
            year.property_value,
            year.equity,
            year.roi_pct,
        );
    }
}

fn format_pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}%", v)).unwrap_or_else(|| "n/a".into())
}

fn run_batch(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let scenarios = load_scenarios(&input)
        .with_context(|| format!("Failed to load scenarios from {}", input.display()))?;
    log::info!("Loaded {} scenarios from {}", scenarios.len(), input.display());

    let results = ScenarioRunner::new().run_batch(&scenarios);

    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_batch_csv(file, &results)?;
            println!("Summary for {} scenarios written to {}", results.len(), path.display());
        }
        None => write_batch_csv(io::stdout().lock(), &results)?,
    }

    Ok(())
}

fn run_sweep(inputs: ProjectionInputs, field: SweepField, values: &[f64]) -> Result<()> {
    let runner = ScenarioRunner::with_inputs(inputs);
    let results = runner.sweep(field, values);

    println!("{:<28} {:>12} {:>12} {:>10} {:>10} {:>8} {:>10}",
        "Scenario", "Payment", "Annual CF", "CoC", "Cap", "DSCR", "IRR");
    println!("{}", "-".repeat(96));

    for scenario in &results {
        match &scenario.result {
            Ok(m) => println!("{:<28} {:>12.2} {:>12.2} {:>10} {:>10} {:>8} {:>10}",
                scenario.name,
                m.monthly_mortgage_payment,
                m.annual_cash_flow,
                format_pct(m.cash_on_cash_return_pct),
                format_pct(m.cap_rate_pct),
                m.dscr.map(|d| format!("{:.2}", d)).unwrap_or_else(|| "n/a".into()),
                format_pct(m.irr_pct),
            ),
            Err(err) => println!("{:<28} {}", scenario.name, err),
        }
    }

    Ok(())
}

fn run_brrrr(input: Option<&PathBuf>, json: bool) -> Result<()> {
    let deal: BrrrrDeal = match input {
        Some(path) => read_json(path)
            .with_context(|| format!("Failed to read deal from {}", path.display()))?,
        None => BrrrrDeal::default(),
    };
    let analysis = analyze_brrrr(&deal)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("BRRRR Analysis:");
    println!("  Total Initial Cash: ${:.2}", analysis.total_initial_cash);
    println!("  Total Project Cost: ${:.2}", analysis.total_project_cost);
    println!("  Refinance Loan: ${:.2}", analysis.new_loan_amount);
    println!("  Cash Out at Refinance: ${:.2}", analysis.cash_out_refinance);
    println!("  Cash Left in Deal: ${:.2}", analysis.cash_left_in_deal);
    println!("  Cash Recouped: ${:.2} ({})", analysis.cash_recouped, format_pct(analysis.cash_recouped_pct));
    println!("  New Monthly Mortgage: ${:.2}", analysis.monthly_mortgage);
    println!("  Monthly Cash Flow: ${:.2}", analysis.monthly_cash_flow);
    println!("  Cash-on-Cash Return: {}", analysis
        .cash_on_cash_return_pct
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| "infinite".into()));
    println!("  Equity: ${:.2}", analysis.equity);
    for warning in &analysis.warnings {
        println!("  Warning: {}", warning);
    }

    Ok(())
}

fn run_depreciation(input: Option<&PathBuf>, json: bool) -> Result<()> {
    let inputs: DepreciationInputs = match input {
        Some(path) => read_json(path)
            .with_context(|| format!("Failed to read inputs from {}", path.display()))?,
        None => DepreciationInputs::default(),
    };
    let result = calculate_depreciation(&inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Depreciation:");
    println!("  Depreciable Basis: ${:.2}", result.depreciable_basis);
    println!("  Recovery Period: {} years", result.recovery_period_years);
    println!("  Annual Deduction: ${:.2}", result.annual_depreciation);
    println!("  Monthly Deduction: ${:.2}", result.monthly_depreciation);

    println!("\n{:>4} {:>12} {:>14} {:>14}", "Year", "Deduction", "Accumulated", "Remaining");
    println!("{}", "-".repeat(47));
    for year in &result.schedule {
        println!("{:>4} {:>12.2} {:>14.2} {:>14.2}",
            year.year, year.deduction, year.accumulated, year.remaining_basis);
    }

    Ok(())
}
