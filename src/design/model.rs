use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "16:9")]
    Wide,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
            AspectRatio::Wide => "16:9",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1:1" => Some(AspectRatio::Square),
            "3:4" => Some(AspectRatio::Portrait),
            "4:3" => Some(AspectRatio::Landscape),
            "9:16" => Some(AspectRatio::Tall),
            "16:9" => Some(AspectRatio::Wide),
            _ => None,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageResolution {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageResolution {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageResolution::OneK => "1K",
            ImageResolution::TwoK => "2K",
            ImageResolution::FourK => "4K",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "1K" => Some(ImageResolution::OneK),
            "2K" => Some(ImageResolution::TwoK),
            "4K" => Some(ImageResolution::FourK),
            _ => None,
        }
    }
}

impl fmt::Display for ImageResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The free-text fields of a [`DesignConfig`], in tag-derivation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Material,
    Craftsmanship,
    ChainType,
    ExtraElements,
    Audience,
    MiscPrompts,
}

impl TextField {
    pub const ALL: [TextField; 6] = [
        TextField::Material,
        TextField::Craftsmanship,
        TextField::ChainType,
        TextField::ExtraElements,
        TextField::Audience,
        TextField::MiscPrompts,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "material" => Some(TextField::Material),
            "craftsmanship" => Some(TextField::Craftsmanship),
            "chaintype" => Some(TextField::ChainType),
            "extraelements" => Some(TextField::ExtraElements),
            "audience" => Some(TextField::Audience),
            "miscprompts" => Some(TextField::MiscPrompts),
            _ => None,
        }
    }
}

/// Structured generation parameters handed to the render model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignConfig {
    pub material: String,
    pub craftsmanship: String,
    pub chain_type: String,
    pub extra_elements: String,
    pub audience: String,
    pub misc_prompts: String,
    pub creativity_strength: u8,
    pub aspect_ratio: AspectRatio,
    pub resolution: ImageResolution,
    pub min_ranking: u32,
    pub min_search_volume: u32,
    pub min_sales: u32,
    #[serde(rename = "maxPPC")]
    pub max_ppc: f64,
}

impl Default for DesignConfig {
    fn default() -> Self {
        DesignConfig {
            material: String::new(),
            craftsmanship: String::new(),
            chain_type: String::new(),
            extra_elements: String::new(),
            audience: String::new(),
            misc_prompts: String::new(),
            creativity_strength: 40,
            aspect_ratio: AspectRatio::Square,
            resolution: ImageResolution::OneK,
            min_ranking: 50_000,
            min_search_volume: 1_000,
            min_sales: 50,
            max_ppc: 5.0,
        }
    }
}

impl DesignConfig {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Material => &self.material,
            TextField::Craftsmanship => &self.craftsmanship,
            TextField::ChainType => &self.chain_type,
            TextField::ExtraElements => &self.extra_elements,
            TextField::Audience => &self.audience,
            TextField::MiscPrompts => &self.misc_prompts,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Material => &mut self.material,
            TextField::Craftsmanship => &mut self.craftsmanship,
            TextField::ChainType => &mut self.chain_type,
            TextField::ExtraElements => &mut self.extra_elements,
            TextField::Audience => &mut self.audience,
            TextField::MiscPrompts => &mut self.misc_prompts,
        }
    }

    pub fn set_creativity_strength(&mut self, value: u8) {
        self.creativity_strength = value.min(100);
    }
}

/// Structured description of a reference image returned by the analysis model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub design_concept: String,
    pub style: String,
    pub audience: String,
    pub emotional_point: String,
    pub scenario: String,
    pub core_point: String,
}

impl ImageAnalysis {
    pub fn failed() -> Self {
        ImageAnalysis {
            design_concept: "无法分析 (Analysis Failed)".to_string(),
            style: "未知".to_string(),
            audience: "未知".to_string(),
            emotional_point: "未知".to_string(),
            scenario: "未知".to_string(),
            core_point: "Please try another image".to_string(),
        }
    }
}

/// Partial configuration applied over the current one before generating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub material: Option<String>,
    pub craftsmanship: Option<String>,
    pub extra_elements: Option<String>,
    pub audience: Option<String>,
    pub misc_prompts: Option<String>,
}

impl ConfigPatch {
    pub fn apply_to(&self, config: &DesignConfig) -> DesignConfig {
        let mut merged = config.clone();
        let pairs = [
            (TextField::Material, &self.material),
            (TextField::Craftsmanship, &self.craftsmanship),
            (TextField::ExtraElements, &self.extra_elements),
            (TextField::Audience, &self.audience),
            (TextField::MiscPrompts, &self.misc_prompts),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                *merged.text_mut(field) = value.clone();
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_external_field_names() {
        let value = serde_json::to_value(DesignConfig::default()).expect("serializes");
        assert_eq!(value["chainType"], "");
        assert_eq!(value["creativityStrength"], 40);
        assert_eq!(value["aspectRatio"], "1:1");
        assert_eq!(value["resolution"], "1K");
        assert_eq!(value["minRanking"], 50000);
        assert_eq!(value["maxPPC"], 5.0);
    }

    #[test]
    fn text_field_names_accept_common_spellings() {
        assert_eq!(TextField::parse("chainType"), Some(TextField::ChainType));
        assert_eq!(TextField::parse("extra_elements"), Some(TextField::ExtraElements));
        assert_eq!(TextField::parse("misc-prompts"), Some(TextField::MiscPrompts));
        assert_eq!(TextField::parse("resolution"), None);
    }

    #[test]
    fn patch_overrides_only_provided_fields() {
        let base = DesignConfig {
            chain_type: "Box chain".to_string(),
            material: "Brass".to_string(),
            ..DesignConfig::default()
        };
        let patch = ConfigPatch {
            material: Some("Platinum".to_string()),
            audience: Some("Collectors".to_string()),
            ..ConfigPatch::default()
        };
        let merged = patch.apply_to(&base);
        assert_eq!(merged.material, "Platinum");
        assert_eq!(merged.audience, "Collectors");
        assert_eq!(merged.chain_type, "Box chain");
        assert_eq!(base.material, "Brass");
    }

    #[test]
    fn creativity_is_clamped() {
        let mut config = DesignConfig::default();
        config.set_creativity_strength(180);
        assert_eq!(config.creativity_strength, 100);
    }
}
