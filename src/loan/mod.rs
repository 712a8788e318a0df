//! Loan interest accrual and amortization

mod interest;
mod amortization;

pub use interest::{calculate_monthly_interest, update_loan_balance};
pub use amortization::{loan_summary, LoanSummary};
