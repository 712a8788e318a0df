//! Annualized fund returns and blended portfolio return
//!
//! Used to pick the `investment_annual_return` input from published
//! cumulative fund performance.

use serde::{Deserialize, Serialize};

/// Cumulative return of one fund and its weight in the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundReturn {
    /// Cumulative return over the measurement period (0.7852 = 78.52%)
    pub total_return: f64,
    /// Portfolio weight (fraction)
    pub weight: f64,
}

/// Measurement period of the reference portfolio, in years
pub const DEFAULT_PORTFOLIO_YEARS: f64 = 10.0;

/// Reference two-fund blend: 80% at 78.52% and 20% at 38.36% over 10 years
pub fn default_portfolio() -> Vec<FundReturn> {
    vec![
        FundReturn {
            total_return: 0.7852,
            weight: 0.8,
        },
        FundReturn {
            total_return: 0.3836,
            weight: 0.2,
        },
    ]
}

/// Compound annual return equivalent to `total_return` earned over `years`.
pub fn calculate_annual_return(total_return: f64, years: f64) -> f64 {
    (1.0 + total_return).powf(1.0 / years) - 1.0
}

/// Weighted average of each fund's annualized return.
///
/// Weights are used as given; they are not normalized.
pub fn portfolio_annual_return(funds: &[FundReturn], years: f64) -> f64 {
    funds
        .iter()
        .map(|fund| calculate_annual_return(fund.total_return, years) * fund.weight)
        .sum()
}
