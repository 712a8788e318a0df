//! Monthly interest accrual and balance roll-forward

/// Interest accrued on `loan_amount` over one month at `annual_rate`.
///
/// Expects a non-negative `loan_amount`; this is not checked.
pub fn calculate_monthly_interest(loan_amount: f64, annual_rate: f64) -> f64 {
    loan_amount * (annual_rate / 12.0)
}

/// Roll a balance forward one month: add interest, subtract the payment.
///
/// The balance is floored at zero. Any overpayment is not carried forward.
pub fn update_loan_balance(loan_amount: f64, monthly_payment: f64, interest: f64) -> f64 {
    let new_balance = loan_amount + interest - monthly_payment;
    if new_balance < 0.0 {
        return 0.0;
    }
    new_balance
}
