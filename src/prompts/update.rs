use crate::prompts::{PromptConfig, PromptPreset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisField {
    DesignConcept,
    Style,
    Audience,
    EmotionalPoint,
    Scenario,
    CorePoint,
}

impl AnalysisField {
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "designconcept" => Some(AnalysisField::DesignConcept),
            "style" => Some(AnalysisField::Style),
            "audience" => Some(AnalysisField::Audience),
            "emotionalpoint" => Some(AnalysisField::EmotionalPoint),
            "scenario" => Some(AnalysisField::Scenario),
            "corepoint" => Some(AnalysisField::CorePoint),
            _ => None,
        }
    }
}

/// Named edits to a [`PromptConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptUpdate {
    UsePreset(PromptPreset),
    SetProductType(String),
    SetAnalysisSystemRole(String),
    SetAnalysisField(AnalysisField, String),
    SetGenerationSystemRole(String),
    SetOutputRequirements(String),
    SetProductGuidelines(String),
}

impl PromptUpdate {
    /// Parses the `prompts set <name> <text>` command form.
    pub fn parse(name: &str, text: &str) -> Option<Self> {
        let text = text.to_string();
        let update = match name.trim().to_lowercase().as_str() {
            "product-type" => PromptUpdate::SetProductType(text),
            "analysis-role" => PromptUpdate::SetAnalysisSystemRole(text),
            "generation-role" => PromptUpdate::SetGenerationSystemRole(text),
            "output-requirements" => PromptUpdate::SetOutputRequirements(text),
            "guidelines" => PromptUpdate::SetProductGuidelines(text),
            other => {
                let field = other.strip_prefix("analysis.")?;
                PromptUpdate::SetAnalysisField(AnalysisField::parse(field)?, text)
            }
        };
        Some(update)
    }
}

/// Applies one update; returns whether the result no longer matches a preset.
pub fn reduce(config: &mut PromptConfig, update: PromptUpdate) -> bool {
    match update {
        PromptUpdate::UsePreset(preset) => {
            *config = preset.config();
            return false;
        }
        PromptUpdate::SetProductType(text) => config.product_type = text,
        PromptUpdate::SetAnalysisSystemRole(text) => config.analysis_prompt.system_role = text,
        PromptUpdate::SetAnalysisField(field, text) => {
            let fields = &mut config.analysis_prompt.fields;
            let slot = match field {
                AnalysisField::DesignConcept => &mut fields.design_concept,
                AnalysisField::Style => &mut fields.style,
                AnalysisField::Audience => &mut fields.audience,
                AnalysisField::EmotionalPoint => &mut fields.emotional_point,
                AnalysisField::Scenario => &mut fields.scenario,
                AnalysisField::CorePoint => &mut fields.core_point,
            };
            *slot = text;
        }
        PromptUpdate::SetGenerationSystemRole(text) => config.generation_prompt.system_role = text,
        PromptUpdate::SetOutputRequirements(text) => {
            config.generation_prompt.output_requirements = text
        }
        PromptUpdate::SetProductGuidelines(text) => {
            config.generation_prompt.product_specific_guidelines = text
        }
    }
    true
}
