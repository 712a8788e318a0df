//! User-facing simulation inputs
//!
//! Inputs arrive as a user would state them: loan balance in the loan's own
//! currency, rates as percentages. They are validated and converted once
//! here before any simulation runs; the simulation core accepts anything.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, StrategyError};
use crate::strategy::{StrategyParameters, DEFAULT_TOTAL_YEARS, DEFAULT_YEARS_UNTIL_FORGIVENESS};

/// Loan-currency units per CHF (SLC reference rate 1 / 1.14)
pub const DEFAULT_CONVERSION_RATE: f64 = 1.0 / 1.14;

/// Longest horizon accepted from user input
pub const MAX_TOTAL_YEARS: u32 = 100;

/// Step between swept loan payment percentages
pub const DEFAULT_PERCENTAGE_STEP: u32 = 5;

/// Inputs for a sweep, before currency and percentage conversion.
///
/// Missing JSON fields fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInputs {
    /// Outstanding loan balance in the loan's currency
    pub loan_balance: f64,

    /// Annual loan interest rate in percent (7.9 = 7.9%)
    pub loan_interest_rate_pct: f64,

    /// Loan-currency units per CHF; the balance is divided by this
    pub conversion_rate: f64,

    /// Required monthly loan payment in CHF
    pub min_loan_payment: f64,

    /// Monthly savings available for extra payment or investment, in CHF
    pub monthly_savings: f64,

    /// Simulated horizon in years
    pub total_years: u32,

    /// Years until any remaining balance is forgiven
    pub years_until_forgiveness: u32,

    /// Investment value at the start, in CHF
    pub starting_investment_value: f64,

    /// Expected annual investment return in percent (5.43 = 5.43%)
    pub investment_return_pct: f64,

    /// Percentage step for the sweep (5 gives 0, 5, ..., 100)
    pub percentage_step: u32,

    /// Optional tag appended to output file names
    pub identifier: String,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            loan_balance: 0.0,
            loan_interest_rate_pct: 0.0,
            conversion_rate: DEFAULT_CONVERSION_RATE,
            min_loan_payment: 0.0,
            monthly_savings: 0.0,
            total_years: DEFAULT_TOTAL_YEARS,
            years_until_forgiveness: DEFAULT_YEARS_UNTIL_FORGIVENESS,
            starting_investment_value: 0.0,
            investment_return_pct: 0.0,
            percentage_step: DEFAULT_PERCENTAGE_STEP,
            identifier: String::new(),
        }
    }
}

impl SimulationInputs {
    /// Load inputs from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let inputs = serde_json::from_reader(BufReader::new(file))?;
        Ok(inputs)
    }

    /// Reject values the simulation would accept but that make no sense
    pub fn validate(&self) -> Result<()> {
        non_negative("loan_balance", self.loan_balance)?;
        non_negative("loan_interest_rate_pct", self.loan_interest_rate_pct)?;
        non_negative("min_loan_payment", self.min_loan_payment)?;
        non_negative("monthly_savings", self.monthly_savings)?;
        non_negative("starting_investment_value", self.starting_investment_value)?;

        if !self.investment_return_pct.is_finite() {
            return Err(StrategyError::invalid_input(
                "investment_return_pct",
                "must be a finite number",
            ));
        }
        if !(self.conversion_rate.is_finite() && self.conversion_rate > 0.0) {
            return Err(StrategyError::invalid_input(
                "conversion_rate",
                format!("must be positive, got {}", self.conversion_rate),
            ));
        }
        if self.total_years == 0 || self.total_years > MAX_TOTAL_YEARS {
            return Err(StrategyError::invalid_input(
                "total_years",
                format!("must be between 1 and {}, got {}", MAX_TOTAL_YEARS, self.total_years),
            ));
        }
        if self.years_until_forgiveness == 0 {
            return Err(StrategyError::invalid_input(
                "years_until_forgiveness",
                "must be at least 1",
            ));
        }
        if self.percentage_step == 0 || self.percentage_step > 100 {
            return Err(StrategyError::invalid_input(
                "percentage_step",
                format!("must be between 1 and 100, got {}", self.percentage_step),
            ));
        }
        Ok(())
    }

    /// Loan balance converted to CHF
    pub fn loan_balance_chf(&self) -> f64 {
        self.loan_balance / self.conversion_rate
    }

    pub fn annual_loan_rate(&self) -> f64 {
        self.loan_interest_rate_pct / 100.0
    }

    pub fn investment_annual_return(&self) -> f64 {
        self.investment_return_pct / 100.0
    }

    /// Swept percentages as whole numbers: 0, step, 2*step, ... up to 100
    pub fn percentages(&self) -> Vec<u32> {
        (0..=100).step_by(self.percentage_step.max(1) as usize).collect()
    }

    /// Strategy parameters for one loan payment percentage (fraction, 0..1)
    pub fn parameters(&self, loan_payment_percentage: f64) -> StrategyParameters {
        StrategyParameters::new(
            self.loan_balance_chf(),
            self.annual_loan_rate(),
            self.min_loan_payment,
            self.monthly_savings,
            loan_payment_percentage,
            self.investment_annual_return(),
        )
        .with_starting_investment(self.starting_investment_value)
        .with_horizon(self.total_years, self.years_until_forgiveness)
    }

    /// Human-readable assumption lines for report headers
    pub fn assumption_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Loan Balance: {:.2} | CHF {:.2}",
                self.loan_balance,
                self.loan_balance_chf()
            ),
            format!("Loan Interest Rate: {:.2}%", self.loan_interest_rate_pct),
            format!("Starting Investment Value: CHF {:.2}", self.starting_investment_value),
            format!("Investment Return: {:.2}%", self.investment_return_pct),
            format!("Min Loan Payment: CHF {:.2}", self.min_loan_payment),
            format!("Max Monthly Savings: CHF {:.2}", self.monthly_savings),
            format!("Total Years: {}", self.total_years),
            format!("Years Until Forgiveness: {}", self.years_until_forgiveness),
            format!("Conversion Rate: {:.6}", self.conversion_rate),
        ]
    }
}

/// Check a single loan payment percentage given as a fraction
pub fn validate_percentage(loan_payment_percentage: f64) -> Result<()> {
    if (0.0..=1.0).contains(&loan_payment_percentage) {
        Ok(())
    } else {
        Err(StrategyError::invalid_input(
            "loan_payment_percentage",
            format!("must be within [0, 1], got {}", loan_payment_percentage),
        ))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StrategyError::invalid_input(
            field,
            format!("must be a non-negative number, got {}", value),
        ))
    }
}
