//! Report generation port trait.

use std::path::{Path, PathBuf};

use crate::domain::backtest::BacktestResult;
use crate::domain::error::MacrossError;

/// Port for persisting a backtest result.
pub trait ReportPort {
    /// Writes the report for `ticker` under `output_dir` and returns the
    /// paths of the files written.
    fn write(
        &self,
        result: &BacktestResult,
        ticker: &str,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, MacrossError>;
}
