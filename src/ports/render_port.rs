//! Renderer port trait.

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::StocklensError;

/// Consumes a finished report and draws it. The computation core never
/// formats anything itself.
pub trait RenderPort {
    fn render(&self, report: &AnalysisReport) -> Result<(), StocklensError>;
}
