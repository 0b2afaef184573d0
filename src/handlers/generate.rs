use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::design::model::ImageAnalysis;
use crate::llm::media::load_reference_image;
use crate::llm::{analyze_reference_image, generate_design_image};
use crate::market::tags::derive_active_tags;
use crate::state::{ReferenceImage, Session};
use crate::utils::timing::{complete_operation_timer, start_operation_timer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Completed { id: String, url: String },
    Failed { message: String },
    CoolingDown { remaining: Duration },
}

pub async fn reference_handler(session: &mut Session, path: &Path) -> Result<()> {
    let bytes = load_reference_image(path).await?;
    session.reference = Some(ReferenceImage {
        bytes,
        analysis: None,
    });
    info!("Reference image set from {}", path.display());
    Ok(())
}

/// Describes the reference image, if any, and keeps the result on the session.
pub async fn analyze_handler(session: &mut Session) -> Option<ImageAnalysis> {
    let bytes = session.reference_bytes()?.to_vec();
    let mut timer = start_operation_timer("analyze_reference", None);
    let analysis = analyze_reference_image(session.prompts.config(), &bytes).await;
    let failed = analysis == ImageAnalysis::failed();
    complete_operation_timer(
        &mut timer,
        if failed { "fallback" } else { "success" },
        None,
    );
    if let Some(reference) = session.reference.as_mut() {
        reference.analysis = Some(analysis.clone());
    }
    Some(analysis)
}

/// Renders one design from the current configuration. Requests inside the
/// cooldown window are turned away before the gallery is touched.
pub async fn generate_handler(session: &mut Session) -> GenerateOutcome {
    if let Err(remaining) = session.cooldown.try_acquire() {
        return GenerateOutcome::CoolingDown { remaining };
    }

    let mut timer = start_operation_timer("generate_design", Some(&session.design.misc_prompts));
    let tags = derive_active_tags(&session.design);
    let id = session.gallery.begin(&session.design, tags);

    let result = generate_design_image(
        session.prompts.config(),
        &session.design,
        session.reference_bytes(),
    )
    .await;

    match result {
        Ok(url) => {
            session.gallery.complete(&id, url.clone());
            complete_operation_timer(&mut timer, "success", Some(id.clone()));
            GenerateOutcome::Completed { id, url }
        }
        Err(err) => {
            error!("Design generation failed: {}", err);
            session.gallery.fail(&id);
            complete_operation_timer(&mut timer, "error", Some(err.to_string()));
            GenerateOutcome::Failed {
                message: err.user_message(),
            }
        }
    }
}
