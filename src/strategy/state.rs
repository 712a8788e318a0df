//! Simulation state carried from month to month

use super::engine::{StrategyParameters, StrategyResult};

/// Where the loan stands at the start of a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoanPhase {
    /// Balance still outstanding (always strictly positive)
    Active { balance: f64 },
    /// Repaid or forgiven. Terminal: the loan payment now goes to investment
    Resolved,
}

impl LoanPhase {
    /// Any balance that is not strictly positive counts as resolved
    pub fn from_balance(balance: f64) -> Self {
        if balance > 0.0 {
            LoanPhase::Active { balance }
        } else {
            LoanPhase::Resolved
        }
    }

    pub fn balance(&self) -> f64 {
        match self {
            LoanPhase::Active { balance } => *balance,
            LoanPhase::Resolved => 0.0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LoanPhase::Resolved)
    }
}

/// Joint loan and investment state during a strategy simulation
#[derive(Debug, Clone)]
pub struct StrategyState {
    /// Current month (1-indexed, 0 before the first month)
    pub month: u32,

    /// Loan balance / phase at the start of the month
    pub loan: LoanPhase,

    /// Investment value at the start of the month
    pub investment_value: f64,

    /// Interest accrued so far, including any forgiveness month
    pub total_interest_paid: f64,

    /// Last month the loan entered with a positive balance
    pub months_until_loan_paid: u32,

    /// Investment value at the start of `months_until_loan_paid`
    pub investment_value_at_loan_paid: f64,
}

impl StrategyState {
    /// Initialize state from the parameters at simulation start
    pub fn from_parameters(params: &StrategyParameters) -> Self {
        Self {
            month: 0,
            loan: LoanPhase::from_balance(params.initial_loan_amount),
            investment_value: params.starting_investment_value,
            total_interest_paid: 0.0,
            months_until_loan_paid: 1,
            investment_value_at_loan_paid: params.starting_investment_value,
        }
    }

    /// Record that the loan entered this month with a positive balance
    pub fn mark_loan_month(&mut self) {
        self.months_until_loan_paid = self.month;
        self.investment_value_at_loan_paid = self.investment_value;
    }

    pub fn into_result(self) -> StrategyResult {
        StrategyResult {
            months_until_loan_paid: self.months_until_loan_paid,
            total_interest_paid: self.total_interest_paid,
            final_investment_value: self.investment_value,
            investment_value_at_loan_paid: self.investment_value_at_loan_paid,
        }
    }
}
