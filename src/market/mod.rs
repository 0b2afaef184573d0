pub mod analysis;
pub mod binder;
pub mod counter;
pub mod extract;
pub mod ranking;
pub mod tags;
pub mod taxonomy;

pub use analysis::{AnalysisSummary, CustomTermOutcome, KeywordAnalysisState};
pub use taxonomy::CategoryKey;

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Unsupported market data file '{file_name}': expected .xlsx, .xls or .csv")]
    UnsupportedFormat { file_name: String },
    #[error("Failed to parse market data: {0}")]
    Parse(String),
}

impl MarketError {
    /// Message shown to the user when an upload cannot be analyzed.
    pub fn user_message(&self) -> &'static str {
        "文件解析失败，请确保上传有效的 Excel 或 CSV 文件。"
    }
}
