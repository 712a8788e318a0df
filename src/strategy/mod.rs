//! Joint loan repayment / investment strategy simulation

mod state;
mod engine;

pub use state::{LoanPhase, StrategyState};
pub use engine::{
    simulate, StrategyParameters, StrategyResult, DEFAULT_TOTAL_YEARS,
    DEFAULT_YEARS_UNTIL_FORGIVENESS,
};
