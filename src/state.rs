use crate::config::CONFIG;
use crate::design::model::{DesignConfig, ImageAnalysis};
use crate::design::gallery::Gallery;
use crate::handlers::access::GenerationCooldown;
use crate::market::binder::ActiveMatch;
use crate::market::KeywordAnalysisState;
use crate::prompts::PromptStore;

/// A reference image and, once analyzed, its description.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub bytes: Vec<u8>,
    pub analysis: Option<ImageAnalysis>,
}

/// Everything one configurator session works on.
#[derive(Debug)]
pub struct Session {
    pub market: KeywordAnalysisState,
    pub design: DesignConfig,
    pub prompts: PromptStore,
    pub gallery: Gallery,
    pub cooldown: GenerationCooldown,
    pub active_match: ActiveMatch,
    pub reference: Option<ReferenceImage>,
}

impl Session {
    pub fn new(prompts: PromptStore) -> Self {
        Session::with_settings(prompts, GenerationCooldown::default(), CONFIG.keyword_active_match)
    }

    pub fn with_settings(
        prompts: PromptStore,
        cooldown: GenerationCooldown,
        active_match: ActiveMatch,
    ) -> Self {
        Session {
            market: KeywordAnalysisState::new(),
            design: DesignConfig::default(),
            prompts,
            gallery: Gallery::default(),
            cooldown,
            active_match,
            reference: None,
        }
    }

    pub fn reference_bytes(&self) -> Option<&[u8]> {
        self.reference.as_ref().map(|reference| reference.bytes.as_slice())
    }

    pub fn reference_analysis(&self) -> Option<&ImageAnalysis> {
        self.reference
            .as_ref()
            .and_then(|reference| reference.analysis.as_ref())
    }
}
