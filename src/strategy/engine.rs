//! Month-by-month loan repayment and investment simulation

use log::debug;
use serde::{Deserialize, Serialize};

use super::state::{LoanPhase, StrategyState};
use crate::investment::calculate_investment_growth;
use crate::loan::{calculate_monthly_interest, update_loan_balance};

/// Default simulated horizon in years
pub const DEFAULT_TOTAL_YEARS: u32 = 35;

/// Default number of years after which any remaining balance is forgiven
pub const DEFAULT_YEARS_UNTIL_FORGIVENESS: u32 = 27;

/// Inputs for one strategy run. Amounts are monthly and in a single currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParameters {
    /// Outstanding loan balance at month 0
    pub initial_loan_amount: f64,

    /// Annual loan interest rate (fraction, e.g. 0.079)
    pub annual_loan_rate: f64,

    /// Required monthly loan payment
    pub monthly_payment: f64,

    /// Monthly income available on top of the required payment
    pub excess_income: f64,

    /// Share of excess income paid into the loan (0..1); the rest is invested
    pub loan_payment_percentage: f64,

    /// Expected annual investment return (fraction), compounded monthly
    pub investment_annual_return: f64,

    /// Investment value at month 0
    pub starting_investment_value: f64,

    /// Simulated horizon in years
    pub total_years: u32,

    /// Years until the remaining balance is forgiven
    pub years_until_forgiveness: u32,
}

impl StrategyParameters {
    /// Create parameters with no starting investment and the default
    /// 35-year horizon / 27-year forgiveness
    pub fn new(
        initial_loan_amount: f64,
        annual_loan_rate: f64,
        monthly_payment: f64,
        excess_income: f64,
        loan_payment_percentage: f64,
        investment_annual_return: f64,
    ) -> Self {
        Self {
            initial_loan_amount,
            annual_loan_rate,
            monthly_payment,
            excess_income,
            loan_payment_percentage,
            investment_annual_return,
            starting_investment_value: 0.0,
            total_years: DEFAULT_TOTAL_YEARS,
            years_until_forgiveness: DEFAULT_YEARS_UNTIL_FORGIVENESS,
        }
    }

    pub fn with_starting_investment(mut self, value: f64) -> Self {
        self.starting_investment_value = value;
        self
    }

    pub fn with_horizon(mut self, total_years: u32, years_until_forgiveness: u32) -> Self {
        self.total_years = total_years;
        self.years_until_forgiveness = years_until_forgiveness;
        self
    }

    pub fn with_loan_payment_percentage(mut self, loan_payment_percentage: f64) -> Self {
        self.loan_payment_percentage = loan_payment_percentage;
        self
    }

    pub fn total_months(&self) -> u32 {
        self.total_years.saturating_mul(12)
    }

    /// Month index at which forgiveness applies. Beyond the horizon it never
    /// fires; saturates instead of wrapping for very large year counts
    pub fn forgiveness_month(&self) -> u32 {
        self.years_until_forgiveness.saturating_mul(12)
    }

    /// Extra loan payment taken from excess income each month
    pub fn additional_loan_payment(&self) -> f64 {
        self.excess_income * self.loan_payment_percentage
    }

    /// Investment contribution while the loan is outstanding
    pub fn monthly_investment(&self) -> f64 {
        self.excess_income - self.additional_loan_payment()
    }

    /// Investment contribution once the loan is resolved
    pub fn redirected_investment(&self) -> f64 {
        self.excess_income + self.monthly_payment
    }
}

/// Summary of one strategy run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Last month the loan started with a positive balance (1 if never)
    pub months_until_loan_paid: u32,

    /// Interest accrued over the life of the loan, including forgiveness
    pub total_interest_paid: f64,

    /// Investment value at the end of the horizon
    pub final_investment_value: f64,

    /// Investment value at the start of `months_until_loan_paid`
    pub investment_value_at_loan_paid: f64,
}

/// Simulate `total_years * 12` months of loan repayment and investment.
///
/// While the loan is outstanding, the required payment plus the allocated
/// share of excess income goes to the loan and the remainder is invested.
/// Once the loan is resolved (repaid or forgiven) the whole excess income
/// plus the former payment is invested. The loop always runs the full
/// horizon.
pub fn simulate(params: &StrategyParameters) -> StrategyResult {
    let forgiveness_month = params.forgiveness_month();
    let loan_payment = params.monthly_payment + params.additional_loan_payment();
    let monthly_investment = params.monthly_investment();
    let redirected_investment = params.redirected_investment();

    let mut state = StrategyState::from_parameters(params);

    for month in 1..=params.total_months() {
        state.month = month;

        let contribution = match state.loan {
            LoanPhase::Active { balance } => {
                let interest = calculate_monthly_interest(balance, params.annual_loan_rate);
                state.total_interest_paid += interest;
                let mut balance = update_loan_balance(balance, loan_payment, interest);

                if month == forgiveness_month && balance > 0.0 {
                    state.total_interest_paid +=
                        calculate_monthly_interest(balance, params.annual_loan_rate);
                    debug!("Month {}: forgiving remaining balance {:.2}", month, balance);
                    balance = 0.0;
                }

                // Snapshot is taken before this month's investment growth
                state.mark_loan_month();
                state.loan = LoanPhase::from_balance(balance);
                if state.loan.is_resolved() {
                    debug!("Month {}: loan resolved", month);
                }

                monthly_investment
            }
            LoanPhase::Resolved => redirected_investment,
        };

        state.investment_value = calculate_investment_growth(
            state.investment_value,
            contribution,
            params.investment_annual_return,
            1,
        );
    }

    state.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn sample_params() -> StrategyParameters {
        StrategyParameters::new(10_000.0, 0.06, 500.0, 100.0, 0.5, 0.12)
            .with_starting_investment(1_000.0)
            .with_horizon(3, 100)
    }

    #[test]
    fn test_amortization_example() {
        let params = StrategyParameters::new(10_000.0, 0.06, 500.0, 0.0, 0.0, 0.0)
            .with_horizon(5, 100);
        let result = simulate(&params);

        // Independent check: n = -ln(1 - rP/A) / ln(1 + r)
        let r: f64 = 0.06 / 12.0;
        let n = -(1.0 - r * 10_000.0 / 500.0).ln() / (1.0 + r).ln();
        assert_eq!(result.months_until_loan_paid, n.ceil() as u32);
        assert_eq!(result.months_until_loan_paid, 22);
        assert!(result.total_interest_paid > 0.0);

        // Nothing invested while repaying; the freed payment is invested afterwards
        assert_eq!(result.investment_value_at_loan_paid, 0.0);
        assert_relative_eq!(result.final_investment_value, 500.0 * (60.0 - 22.0));
    }

    #[test]
    fn test_interest_matches_standalone_amortization() {
        let params = StrategyParameters::new(10_000.0, 0.06, 500.0, 0.0, 0.0, 0.0)
            .with_horizon(5, 100);
        let result = simulate(&params);
        let summary = crate::loan::loan_summary(10_000.0, 500.0, 0.06, 5);

        assert_eq!(result.months_until_loan_paid, summary.months_until_paid);
        assert_relative_eq!(result.total_interest_paid, summary.total_interest_paid);
    }

    #[test]
    fn test_reference_scenario() {
        let result = simulate(&sample_params());

        assert_eq!(result.months_until_loan_paid, 20);
        assert_abs_diff_eq!(result.total_interest_paid, 510.442_281_326_921, epsilon = 1e-6);
        assert_abs_diff_eq!(result.final_investment_value, 13_076.438_172_352_9, epsilon = 1e-6);
        assert_abs_diff_eq!(
            result.investment_value_at_loan_paid,
            2_248.653_702_661_19,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_forgiveness_with_zero_rate_accrues_no_interest() {
        let params = StrategyParameters::new(120_000.0, 0.0, 0.0, 0.0, 0.0, 0.0)
            .with_horizon(2, 1);
        let result = simulate(&params);

        assert_eq!(result.months_until_loan_paid, 12);
        assert_eq!(result.total_interest_paid, 0.0);
        assert_eq!(result.final_investment_value, 0.0);
    }

    #[test]
    fn test_forgiveness_charges_one_extra_month() {
        // Interest-only payment: balance stays at 12_000 until forgiven
        let params = StrategyParameters::new(12_000.0, 0.06, 60.0, 0.0, 0.0, 0.0)
            .with_horizon(2, 1);
        let result = simulate(&params);

        assert_eq!(result.months_until_loan_paid, 12);
        assert_relative_eq!(result.total_interest_paid, 13.0 * 60.0, epsilon = 1e-9);
        // Months 13..=24 invest the freed 60/month
        assert_relative_eq!(result.final_investment_value, 12.0 * 60.0);
    }

    #[test]
    fn test_forgiveness_beyond_horizon_never_fires() {
        let params = StrategyParameters::new(12_000.0, 0.06, 60.0, 0.0, 0.0, 0.0)
            .with_horizon(1, 2);
        let result = simulate(&params);

        assert_eq!(result.months_until_loan_paid, 12);
        assert_relative_eq!(result.total_interest_paid, 12.0 * 60.0, epsilon = 1e-9);
        assert_eq!(result.final_investment_value, 0.0);
    }

    #[test]
    fn test_far_forgiveness_saturates_instead_of_wrapping() {
        // 400_000_000 * 12 overflows u32; wrapping would land inside the horizon
        let params = StrategyParameters::new(12_000.0, 0.06, 60.0, 0.0, 0.0, 0.0)
            .with_horizon(1, 400_000_000);
        assert_eq!(params.forgiveness_month(), u32::MAX);

        let result = simulate(&params);
        assert_eq!(result.months_until_loan_paid, 12);
        assert_relative_eq!(result.total_interest_paid, 12.0 * 60.0, epsilon = 1e-9);
        assert_eq!(result.final_investment_value, 0.0);

        let wrapping = StrategyParameters::new(12_000.0, 0.06, 60.0, 0.0, 0.0, 0.0)
            .with_horizon(1, 357_913_942);
        assert_eq!(simulate(&wrapping), result);
    }

    #[test]
    fn test_exact_payoff_in_forgiveness_month_adds_no_interest() {
        let params = StrategyParameters::new(1_200.0, 0.0, 100.0, 0.0, 0.0, 0.0)
            .with_horizon(2, 1);
        let result = simulate(&params);

        assert_eq!(result.months_until_loan_paid, 12);
        assert_eq!(result.total_interest_paid, 0.0);
        // Months 13..=24 invest the freed 100/month
        assert_relative_eq!(result.final_investment_value, 12.0 * 100.0);
    }

    #[test]
    fn test_payoff_before_forgiveness_adds_no_extra_month() {
        // Paid in month 22, forgiveness would be month 24
        let params = StrategyParameters::new(10_000.0, 0.06, 500.0, 0.0, 0.0, 0.0)
            .with_horizon(5, 2);
        let result = simulate(&params);
        let summary = crate::loan::loan_summary(10_000.0, 500.0, 0.06, 5);

        assert_eq!(result.months_until_loan_paid, 22);
        assert_relative_eq!(result.total_interest_paid, summary.total_interest_paid);
        assert_eq!(simulate(&params.clone().with_horizon(5, 100)), result);
    }

    #[test]
    fn test_zero_horizon_keeps_initial_values() {
        let params = StrategyParameters::new(50_000.0, 0.05, 400.0, 200.0, 0.5, 0.07)
            .with_starting_investment(2_500.0)
            .with_horizon(0, 27);
        let result = simulate(&params);

        assert_eq!(
            result,
            StrategyResult {
                months_until_loan_paid: 1,
                total_interest_paid: 0.0,
                final_investment_value: 2_500.0,
                investment_value_at_loan_paid: 2_500.0,
            }
        );
    }

    #[test]
    fn test_no_loan_invests_everything_from_month_one() {
        let params = StrategyParameters::new(0.0, 0.06, 300.0, 200.0, 0.5, 0.0)
            .with_horizon(1, 27);
        let result = simulate(&params);

        assert_eq!(result.months_until_loan_paid, 1);
        assert_eq!(result.total_interest_paid, 0.0);
        assert_relative_eq!(result.final_investment_value, 12.0 * 500.0);
    }

    #[test]
    fn test_zero_percentage_invests_all_excess_while_repaying() {
        let params = StrategyParameters::new(30_000.0, 0.05, 400.0, 250.0, 0.0, 0.0)
            .with_starting_investment(1_000.0)
            .with_horizon(35, 27);
        let result = simulate(&params);

        // Zero return: value at the start of month m is start + excess * (m - 1)
        let months_invested = (result.months_until_loan_paid - 1) as f64;
        assert_relative_eq!(
            result.investment_value_at_loan_paid,
            1_000.0 + 250.0 * months_invested
        );
    }

    #[test]
    fn test_full_percentage_only_grows_existing_investment() {
        let params = StrategyParameters::new(30_000.0, 0.05, 400.0, 250.0, 1.0, 0.06)
            .with_starting_investment(1_000.0)
            .with_horizon(35, 27);
        let result = simulate(&params);

        let months_grown = (result.months_until_loan_paid - 1) as i32;
        assert_relative_eq!(
            result.investment_value_at_loan_paid,
            1_000.0 * (1.0 + 0.06 / 12.0_f64).powi(months_grown),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_parameter_defaults() {
        let params = StrategyParameters::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(params.starting_investment_value, 0.0);
        assert_eq!(params.total_months(), 420);
        assert_eq!(params.forgiveness_month(), 324);
    }

    #[test]
    fn test_allocation_split() {
        let params = StrategyParameters::new(1.0, 0.0, 300.0, 1_000.0, 0.25, 0.0);
        assert_relative_eq!(params.additional_loan_payment(), 250.0);
        assert_relative_eq!(params.monthly_investment(), 750.0);
        assert_relative_eq!(params.redirected_investment(), 1_300.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_simulation_is_deterministic(
            loan in 0.0f64..200_000.0,
            rate in 0.0f64..0.15,
            payment in 0.0f64..2_000.0,
            excess in 0.0f64..2_000.0,
            pct in 0.0f64..=1.0,
            ret in 0.0f64..0.12,
            years in 0u32..40,
            forgiveness in 1u32..40,
        ) {
            let params = StrategyParameters::new(loan, rate, payment, excess, pct, ret)
                .with_horizon(years, forgiveness);
            let first = simulate(&params);
            let second = simulate(&params);

            prop_assert_eq!(first.months_until_loan_paid, second.months_until_loan_paid);
            prop_assert_eq!(first.total_interest_paid.to_bits(), second.total_interest_paid.to_bits());
            prop_assert_eq!(first.final_investment_value.to_bits(), second.final_investment_value.to_bits());
            prop_assert_eq!(
                first.investment_value_at_loan_paid.to_bits(),
                second.investment_value_at_loan_paid.to_bits()
            );
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_more_extra_payment_does_not_increase_interest(
            loan in 1_000.0f64..50_000.0,
            rate in 0.01f64..0.10,
            excess in 0.0f64..1_000.0,
            pct_a in 0.0f64..=1.0,
            pct_b in 0.0f64..=1.0,
        ) {
            let (low, high) = if pct_a <= pct_b { (pct_a, pct_b) } else { (pct_b, pct_a) };
            // Pays off within ten years, well before forgiveness at 27
            let payment = loan * rate / 12.0 + loan / 120.0;
            let base = StrategyParameters::new(loan, rate, payment, excess, low, 0.05);

            let low_result = simulate(&base);
            let high_result = simulate(&base.clone().with_loan_payment_percentage(high));

            prop_assert!(high_result.total_interest_paid <= low_result.total_interest_paid + 1e-9);
            prop_assert!(high_result.months_until_loan_paid <= low_result.months_until_loan_paid);
        }
    }
}
