pub mod store;
pub mod update;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use store::PromptStore;
pub use update::PromptUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPreset {
    Jewelry,
    Generic,
    Fashion,
}

impl PromptPreset {
    pub const ALL: [PromptPreset; 3] = [
        PromptPreset::Jewelry,
        PromptPreset::Generic,
        PromptPreset::Fashion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PromptPreset::Jewelry => "jewelry",
            PromptPreset::Generic => "generic",
            PromptPreset::Fashion => "fashion",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.trim().to_lowercase();
        PromptPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == lowered)
    }

    pub fn config(self) -> PromptConfig {
        match self {
            PromptPreset::Jewelry => jewelry_prompt_config(),
            PromptPreset::Generic => generic_prompt_config(),
            PromptPreset::Fashion => fashion_prompt_config(),
        }
    }
}

impl fmt::Display for PromptPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFields {
    pub design_concept: String,
    pub style: String,
    pub audience: String,
    pub emotional_point: String,
    pub scenario: String,
    pub core_point: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPrompt {
    pub system_role: String,
    pub fields: AnalysisFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPrompt {
    pub system_role: String,
    pub output_requirements: String,
    pub product_specific_guidelines: String,
}

/// Prompt text used by the analysis and render models. Passed explicitly to
/// whatever builds a model request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    pub product_type: String,
    pub analysis_prompt: AnalysisPrompt,
    pub generation_prompt: GenerationPrompt,
}

fn analysis_fields(style_hint: &str, audience_hint: &str, scenario_hint: &str, core_hint: &str) -> AnalysisFields {
    AnalysisFields {
        design_concept: "Brief design idea/inspiration (用中文回答)".to_string(),
        style: format!("{style_hint} (用中文回答)"),
        audience: format!("{audience_hint} (用中文回答)"),
        emotional_point: "Why would a customer buy this? (Emotional hook) (用中文回答)".to_string(),
        scenario: format!("{scenario_hint} (用中文回答)"),
        core_point: format!("{core_hint} (用中文回答)"),
    }
}

pub fn jewelry_prompt_config() -> PromptConfig {
    PromptConfig {
        product_type: "珠宝设计".to_string(),
        analysis_prompt: AnalysisPrompt {
            system_role: "Analyze this jewelry design image. Provide a structured analysis.".to_string(),
            fields: analysis_fields(
                "The aesthetic style (e.g. Vintage, Modern)",
                "Target demographic",
                "Where would this be worn?",
                "The single most important feature to replicate or focus on during development.",
            ),
        },
        generation_prompt: GenerationPrompt {
            system_role: "Act as a world-class high-jewelry designer.".to_string(),
            output_requirements: [
                "CRITICAL OUTPUT REQUIREMENTS (AMAZON MAIN IMAGE STANDARD):",
                "- Background: PURE WHITE background (Hex #FFFFFF). No shadows, no gradients, no props.",
                "- Composition: The jewelry piece must occupy exactly 85% of the image frame.",
                "- The entire product must be clearly visible and centered.",
                "- Lighting: High-resolution, professional studio photography lighting with softbox reflections.",
                "- SURFACE FINISH (CRITICAL): ULTRA-HIGH POLISH, Mirror Finish. All metal surfaces must be perfectly smooth, reflective, and free of noise or grain.",
                "- DETAILS: Exquisite macro details. Gemstones must have perfect cut, clarity, and brilliance. Museum-quality rendering.",
            ]
            .join("\n"),
            product_specific_guidelines: "Create a photorealistic, high-quality jewelry design rendering.".to_string(),
        },
    }
}

pub fn generic_prompt_config() -> PromptConfig {
    PromptConfig {
        product_type: "产品设计".to_string(),
        analysis_prompt: AnalysisPrompt {
            system_role: "Analyze this product design image. Provide a structured analysis.".to_string(),
            fields: analysis_fields(
                "The aesthetic style (e.g. Modern, Minimalist, Industrial)",
                "Target demographic and use case",
                "Where/how would this be used?",
                "The single most important feature to replicate or focus on during development.",
            ),
        },
        generation_prompt: GenerationPrompt {
            system_role: "Act as a world-class product designer.".to_string(),
            output_requirements: [
                "CRITICAL OUTPUT REQUIREMENTS (E-COMMERCE STANDARD):",
                "- Background: PURE WHITE background (Hex #FFFFFF). No shadows, no gradients, no props.",
                "- Composition: The product must occupy exactly 85% of the image frame.",
                "- The entire product must be clearly visible and centered.",
                "- Lighting: High-resolution, professional studio photography lighting.",
                "- SURFACE FINISH: Clean, professional finish appropriate for the product type.",
                "- DETAILS: High-quality rendering with accurate materials and textures.",
            ]
            .join("\n"),
            product_specific_guidelines: "Create a photorealistic, high-quality product design rendering.".to_string(),
        },
    }
}

pub fn fashion_prompt_config() -> PromptConfig {
    let mut fields = analysis_fields(
        "Fashion style (e.g. Streetwear, Haute Couture, Casual)",
        "Target demographic and occasion",
        "Where would this be worn?",
        "The single most important design element to focus on.",
    );
    fields.design_concept = "Brief design concept/inspiration (用中文回答)".to_string();
    fields.emotional_point = "Why would a customer buy this? (Emotional appeal) (用中文回答)".to_string();

    PromptConfig {
        product_type: "服装设计".to_string(),
        analysis_prompt: AnalysisPrompt {
            system_role: "Analyze this fashion design image. Provide a structured analysis.".to_string(),
            fields,
        },
        generation_prompt: GenerationPrompt {
            system_role: "Act as a world-class fashion designer.".to_string(),
            output_requirements: [
                "CRITICAL OUTPUT REQUIREMENTS (FASHION E-COMMERCE STANDARD):",
                "- Background: PURE WHITE background (Hex #FFFFFF). Clean and minimal.",
                "- Composition: The garment must be clearly visible, either on a model or flat lay.",
                "- Lighting: Professional fashion photography lighting.",
                "- DETAILS: Accurate fabric textures, colors, and draping.",
            ]
            .join("\n"),
            product_specific_guidelines: "Create a photorealistic, high-quality fashion design rendering.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_round_trip_through_names() {
        for preset in PromptPreset::ALL {
            assert_eq!(PromptPreset::parse(preset.as_str()), Some(preset));
        }
        assert_eq!(PromptPreset::parse("furniture"), None);
    }

    #[test]
    fn presets_differ_by_product_type() {
        assert_eq!(PromptPreset::Jewelry.config().product_type, "珠宝设计");
        assert_eq!(PromptPreset::Fashion.config().product_type, "服装设计");
        assert!(PromptPreset::Fashion
            .config()
            .analysis_prompt
            .fields
            .emotional_point
            .contains("Emotional appeal"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(jewelry_prompt_config()).expect("serializes");
        assert!(value["analysisPrompt"]["fields"]["designConcept"].is_string());
        assert!(value["generationPrompt"]["productSpecificGuidelines"].is_string());
    }
}
