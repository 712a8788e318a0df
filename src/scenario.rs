//! Scenario sweep across loan payment percentages
//!
//! Runs one strategy simulation per percentage (in parallel) and derives the
//! comparison columns used by the report.

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{validate_percentage, SimulationInputs};
use crate::error::Result;
use crate::strategy::{simulate, StrategyResult};

/// One row of the sweep: a strategy result plus derived comparison columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    #[serde(rename = "Loan Payment Percentage")]
    pub loan_payment_percentage: f64,

    #[serde(rename = "Months Until Loan Paid")]
    pub months_until_loan_paid: u32,

    #[serde(rename = "Total Interest Paid CHF")]
    pub total_interest_paid: f64,

    #[serde(rename = "Final Investment Value CHF")]
    pub final_investment_value: f64,

    #[serde(rename = "Investment Value at Loan Paid CHF")]
    pub investment_value_at_loan_paid: f64,

    /// Change vs the 0% scenario, in percent. None when the baseline is zero
    #[serde(rename = "Change (%) in Final Investment Value CHF")]
    pub change_in_final_investment_pct: Option<f64>,

    #[serde(rename = "Monthly Investment CHF")]
    pub monthly_investment: f64,

    #[serde(rename = "Extra Loan Payment CHF")]
    pub extra_loan_payment: f64,
}

impl ScenarioRow {
    fn from_result(
        loan_payment_percentage: f64,
        monthly_savings: f64,
        result: &StrategyResult,
        baseline_final_value: f64,
    ) -> Self {
        let change_in_final_investment_pct = if baseline_final_value != 0.0 {
            Some(
                (result.final_investment_value - baseline_final_value) / baseline_final_value
                    * 100.0,
            )
        } else {
            None
        };

        Self {
            loan_payment_percentage,
            months_until_loan_paid: result.months_until_loan_paid,
            total_interest_paid: result.total_interest_paid,
            final_investment_value: result.final_investment_value,
            investment_value_at_loan_paid: result.investment_value_at_loan_paid,
            change_in_final_investment_pct,
            monthly_investment: monthly_savings - loan_payment_percentage * monthly_savings,
            extra_loan_payment: loan_payment_percentage * monthly_savings,
        }
    }
}

/// Runs the percentage sweep for one set of inputs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(inputs);
/// for row in runner.run()? {
///     println!("{} -> {:.2}", row.loan_payment_percentage, row.final_investment_value);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    inputs: SimulationInputs,
}

impl ScenarioRunner {
    pub fn new(inputs: SimulationInputs) -> Self {
        Self { inputs }
    }

    /// Run the sweep over `inputs.percentages()`
    pub fn run(&self) -> Result<Vec<ScenarioRow>> {
        let percentages: Vec<f64> = self
            .inputs
            .percentages()
            .into_iter()
            .map(|p| p as f64 / 100.0)
            .collect();
        self.run_percentages(&percentages)
    }

    /// Run the sweep over explicit percentages (fractions, 0..1).
    ///
    /// The first percentage is the baseline for the change column; rows keep
    /// the order given.
    pub fn run_percentages(&self, percentages: &[f64]) -> Result<Vec<ScenarioRow>> {
        self.inputs.validate()?;
        for &pct in percentages {
            validate_percentage(pct)?;
        }

        info!(
            "Running {} scenarios over {} years",
            percentages.len(),
            self.inputs.total_years
        );

        let results: Vec<StrategyResult> = percentages
            .par_iter()
            .map(|&pct| {
                let result = self.run_single(pct);
                debug!(
                    "Scenario {:.2}: loan paid month {}, final investment {:.2}",
                    pct, result.months_until_loan_paid, result.final_investment_value
                );
                result
            })
            .collect();

        let baseline_final_value = results
            .first()
            .map(|r| r.final_investment_value)
            .unwrap_or(0.0);

        Ok(percentages
            .iter()
            .zip(&results)
            .map(|(&pct, result)| {
                ScenarioRow::from_result(
                    pct,
                    self.inputs.monthly_savings,
                    result,
                    baseline_final_value,
                )
            })
            .collect())
    }

    /// Simulate a single percentage without validation
    pub fn run_single(&self, loan_payment_percentage: f64) -> StrategyResult {
        simulate(&self.inputs.parameters(loan_payment_percentage))
    }

    pub fn inputs(&self) -> &SimulationInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut SimulationInputs {
        &mut self.inputs
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(SimulationInputs::default())
    }
}
