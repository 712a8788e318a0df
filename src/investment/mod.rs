//! Investment growth and return assumptions

mod growth;
mod returns;

pub use growth::calculate_investment_growth;
pub use returns::{
    calculate_annual_return, default_portfolio, portfolio_annual_return, FundReturn,
    DEFAULT_PORTFOLIO_YEARS,
};
