//! Standalone amortization of a single loan with end-of-term forgiveness

use serde::{Deserialize, Serialize};

use super::interest::{calculate_monthly_interest, update_loan_balance};

/// Outcome of amortizing a loan on its own, without any investment side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Month in which the balance reached zero (by payment or forgiveness)
    pub months_until_paid: u32,
    /// Interest accrued, including the extra month charged at forgiveness
    pub total_interest_paid: f64,
}

/// Amortize `initial_loan_amount` with a level payment for up to `years`.
///
/// Stops as soon as the balance is cleared. If a balance remains after the
/// final month of the term, one more month of interest is charged on it and
/// the remainder is forgiven.
pub fn loan_summary(
    initial_loan_amount: f64,
    monthly_payment: f64,
    annual_rate: f64,
    years: u32,
) -> LoanSummary {
    let months = years.saturating_mul(12);
    let mut total_interest_paid = 0.0;
    let mut current_balance = initial_loan_amount;
    let mut months_until_paid = months;

    for month in 1..=months {
        if current_balance <= 0.0 {
            break;
        }
        let interest = calculate_monthly_interest(current_balance, annual_rate);
        total_interest_paid += interest;
        current_balance = update_loan_balance(current_balance, monthly_payment, interest);

        if month == months && current_balance > 0.0 {
            total_interest_paid += calculate_monthly_interest(current_balance, annual_rate);
            current_balance = 0.0;
        }

        // Reports the clearing month itself, not the month after it, so the
        // count lines up with the strategy simulation
        if current_balance <= 0.0 {
            months_until_paid = month;
        }
    }

    LoanSummary {
        months_until_paid,
        total_interest_paid,
    }
}
