//! Monthly compounding of an investment balance with contributions

/// Grow `initial_amount` for `months`, compounding monthly at
/// `annual_return_rate / 12` and adding `monthly_contribution` after each
/// month's growth.
///
/// Negative contributions act as withdrawals.
pub fn calculate_investment_growth(
    initial_amount: f64,
    monthly_contribution: f64,
    annual_return_rate: f64,
    months: u32,
) -> f64 {
    let monthly_return_rate = annual_return_rate / 12.0;
    (0..months).fold(initial_amount, |value, _| {
        value * (1.0 + monthly_return_rate) + monthly_contribution
    })
}
