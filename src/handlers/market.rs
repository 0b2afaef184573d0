use std::path::Path;

use tracing::{error, info, warn};

use crate::market::binder::{is_active, toggle};
use crate::market::{AnalysisSummary, CategoryKey, CustomTermOutcome, MarketError};
use crate::state::Session;
use crate::utils::timing::{complete_operation_timer, start_operation_timer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Analyzed(AnalysisSummary),
    /// The document could not be analyzed; carries the message for the user.
    Rejected(String),
    Busy,
}

/// Reads and analyzes a market data file. Failures are reported, never raised,
/// and leave the keyword categories as they were.
pub async fn upload_handler(session: &mut Session, path: &Path) -> UploadOutcome {
    if session.market.is_analyzing() {
        warn!("Upload of {} ignored: analysis already running", path.display());
        return UploadOutcome::Busy;
    }

    let path_label = path.display().to_string();
    let mut timer = start_operation_timer("market_upload", Some(&path_label));
    session.market.begin_analysis();

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_label.clone());

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Failed to read market data {}: {}", path_label, err);
            session.market.abort_analysis();
            complete_operation_timer(&mut timer, "error", Some(err.to_string()));
            return UploadOutcome::Rejected(MarketError::Parse(err.to_string()).user_message().to_string());
        }
    };

    match session.market.analyze_document(&file_name, &bytes) {
        Ok(summary) => {
            complete_operation_timer(
                &mut timer,
                "success",
                Some(format!(
                    "found={} total={} corpus_bytes={}",
                    summary.found_terms, summary.total_terms, summary.corpus_bytes
                )),
            );
            UploadOutcome::Analyzed(summary)
        }
        Err(err) => {
            error!("Market analysis of {} failed: {}", path_label, err);
            complete_operation_timer(&mut timer, "error", Some(err.to_string()));
            UploadOutcome::Rejected(err.user_message().to_string())
        }
    }
}

pub fn add_keyword_handler(session: &mut Session, key: CategoryKey, term: &str) -> CustomTermOutcome {
    let outcome = session.market.add_custom_keyword(key, term);
    info!("Custom keyword '{}' in {}: {:?}", term.trim(), key, outcome);
    outcome
}

/// Toggles a keyword into or out of its configuration field; returns whether it
/// is active afterwards.
pub fn toggle_keyword_handler(session: &mut Session, key: CategoryKey, keyword: &str) -> bool {
    toggle(&mut session.design, key, keyword);
    let active = is_active(&session.design, key, keyword, session.active_match);
    info!("Toggled keyword '{}' in {}: active={}", keyword, key, active);
    active
}
