//! Sweep output: text table, CSV export and chart series
//!
//! Files are named `<prefix>_<YYYYmmdd_HHMMSS>[_<identifier>].<ext>` so that
//! repeated runs never overwrite each other.

use chrono::Local;
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SimulationInputs;
use crate::error::Result;
use crate::scenario::ScenarioRow;

pub const REPORTS_DIR: &str = "reports";
pub const FIGURES_DIR: &str = "figures";

/// Paths of the files produced for one sweep
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub table: PathBuf,
    pub csv: PathBuf,
    pub chart: PathBuf,
}

/// Current local time formatted for file names
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Build a file name from a prefix, timestamp and optional identifier
pub fn output_file_name(prefix: &str, timestamp: &str, identifier: &str, extension: &str) -> String {
    if identifier.is_empty() {
        format!("{}_{}.{}", prefix, timestamp, extension)
    } else {
        format!("{}_{}_{}.{}", prefix, timestamp, identifier, extension)
    }
}

/// Render rows as a fixed-width text table
pub fn render_table(rows: &[ScenarioRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>8} {:>8} {:>14} {:>16} {:>16} {:>10} {:>12} {:>12}\n",
        "LoanPct", "Months", "InterestCHF", "FinalInvestCHF", "AtPayoffCHF", "Change%", "InvestCHF", "ExtraCHF"
    ));
    out.push_str(&"-".repeat(103));
    out.push('\n');

    for row in rows {
        let change = row
            .change_in_final_investment_pct
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "{:>8.2} {:>8} {:>14.2} {:>16.2} {:>16.2} {:>10} {:>12.2} {:>12.2}\n",
            row.loan_payment_percentage,
            row.months_until_loan_paid,
            row.total_interest_paid,
            row.final_investment_value,
            row.investment_value_at_loan_paid,
            change,
            row.monthly_investment,
            row.extra_loan_payment,
        ));
    }
    out
}

/// Write the rendered table to a text file
pub fn write_text_report(path: &Path, rows: &[ScenarioRow]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render_table(rows).as_bytes())?;
    Ok(())
}

/// Write rows as CSV with one header line
pub fn write_csv(path: &Path, rows: &[ScenarioRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ChartPoint {
    #[serde(rename = "Loan Payment Percentage")]
    loan_payment_percentage: f64,
    #[serde(rename = "Final Investment Value CHF")]
    final_investment_value: f64,
}

/// Write the final-investment-vs-percentage series, preceded by the
/// assumptions as `#` comment lines
pub fn write_chart_series(path: &Path, inputs: &SimulationInputs, rows: &[ScenarioRow]) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "# Effect of Additional Loan Payment on Investment Value")?;
    for line in inputs.assumption_lines() {
        writeln!(file, "# {}", line)?;
    }

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(ChartPoint {
            loan_payment_percentage: row.loan_payment_percentage,
            final_investment_value: row.final_investment_value,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes all sweep outputs under one base directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    base_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Write table, CSV and chart series, stamped with `timestamp`
    pub fn write_all(
        &self,
        inputs: &SimulationInputs,
        rows: &[ScenarioRow],
        timestamp: &str,
    ) -> Result<ReportPaths> {
        let reports_dir = self.base_dir.join(REPORTS_DIR);
        let figures_dir = self.base_dir.join(FIGURES_DIR);
        fs::create_dir_all(&reports_dir)?;
        fs::create_dir_all(&figures_dir)?;

        let id = inputs.identifier.as_str();
        let paths = ReportPaths {
            table: reports_dir.join(output_file_name("payment_scenarios", timestamp, id, "txt")),
            csv: reports_dir.join(output_file_name("payment_scenarios", timestamp, id, "csv")),
            chart: figures_dir.join(output_file_name("loan_strategy", timestamp, id, "csv")),
        };

        write_text_report(&paths.table, rows)?;
        info!("Report written to {}", paths.table.display());
        write_csv(&paths.csv, rows)?;
        info!("CSV written to {}", paths.csv.display());
        write_chart_series(&paths.chart, inputs, rows)?;
        info!("Chart series written to {}", paths.chart.display());

        Ok(paths)
    }
}
