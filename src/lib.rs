//! Loan Strategy - month-by-month loan repayment vs investment simulator
//!
//! This library provides:
//! - Monthly loan interest accrual and standalone amortization
//! - Monthly investment compounding and blended portfolio returns
//! - The joint strategy simulation with end-of-term loan forgiveness
//! - A parallel sweep across loan payment percentages
//! - Text, CSV and chart-series reports of a sweep

pub mod error;
pub mod loan;
pub mod investment;
pub mod strategy;
pub mod config;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{Result, StrategyError};
pub use strategy::{simulate, StrategyParameters, StrategyResult};
pub use config::SimulationInputs;
pub use scenario::{ScenarioRow, ScenarioRunner};
pub use report::ReportWriter;
