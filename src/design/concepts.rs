use crate::design::model::{ConfigPatch, ImageAnalysis};

const DEFAULT_CORE: &str = "Jewelry Piece";
const DEFAULT_STYLE: &str = "Classic";

#[derive(Debug, Clone, PartialEq)]
pub struct CreativeConcept {
    pub title: String,
    pub reasoning: String,
    pub patch: ConfigPatch,
}

struct ConceptSeed<'a> {
    title: String,
    reasoning: String,
    style: &'a str,
    audience: &'a str,
    material: &'a str,
    extra: &'a str,
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Ten preset design directions derived from the reference analysis, or from the
/// free-text idea when no analysis is available.
pub fn generate_concepts(idea: &str, analysis: Option<&ImageAnalysis>) -> Vec<CreativeConcept> {
    let (core, base_style) = match analysis {
        Some(analysis) => (
            non_empty(&analysis.core_point)
                .unwrap_or(analysis.design_concept.as_str())
                .to_string(),
            non_empty(&analysis.style).unwrap_or(DEFAULT_STYLE).to_string(),
        ),
        None => (
            non_empty(idea).unwrap_or(DEFAULT_CORE).to_string(),
            DEFAULT_STYLE.to_string(),
        ),
    };

    let deep_style = format!("Extreme {base_style}");
    let deep_audience = format!("Hardcore {base_style} Lovers");
    let seeds = vec![
        ConceptSeed {
            title: format!("🔥 极致风格 (Deep {base_style})"),
            reasoning: format!("Maximizing \"{base_style}\" aesthetic."),
            style: &deep_style,
            audience: &deep_audience,
            material: "Premium Metal",
            extra: "Intricate Details",
        },
        ConceptSeed {
            title: "✨ 极简通勤 (Minimalist)".to_string(),
            reasoning: format!("Stripping \"{core}\" to essence."),
            style: "Minimalist, Geometric, Bauhaus",
            audience: "Office Ladies",
            material: "18K Gold, Plain",
            extra: "None",
        },
        ConceptSeed {
            title: "💎 奢华高定 (Haute Couture)".to_string(),
            reasoning: "Elevating concept with diamonds.".to_string(),
            style: "High Jewelry, Pave setting",
            audience: "High Net Worth",
            material: "Platinum, VVS Diamonds",
            extra: "Halo, Pave",
        },
        ConceptSeed {
            title: "🪐 千禧辣妹 (Y2K Cyber)".to_string(),
            reasoning: "Fluid metal & chunky aesthetics.".to_string(),
            style: "Y2K, Cyberpunk, Liquid Metal",
            audience: "Gen Z",
            material: "Liquid Silver, Chrome",
            extra: "Molten Texture",
        },
        ConceptSeed {
            title: "🕰️ 复古名伶 (Vintage)".to_string(),
            reasoning: "Historical elegance.".to_string(),
            style: "Vintage, Art Deco, Great Gatsby",
            audience: "Collectors",
            material: "Rose Gold, Oxidized",
            extra: "Filigree",
        },
        ConceptSeed {
            title: "🖤 暗黑美学 (Gothic)".to_string(),
            reasoning: "Darker, edgier take.".to_string(),
            style: "Gothic, Dark, Vampire aesthetic",
            audience: "Alternative",
            material: "Black Gold, Onyx",
            extra: "Thorns",
        },
        ConceptSeed {
            title: "🌈 多巴胺色彩 (Dopamine)".to_string(),
            reasoning: "Vivid enamel & colors.".to_string(),
            style: "Pop Art, Vivid, Candy-colored",
            audience: "Fashion Youth",
            material: "Gold, Enamel",
            extra: "Color blocking",
        },
        ConceptSeed {
            title: "🌿 自然有机 (Organic)".to_string(),
            reasoning: "Raw textures & nature.".to_string(),
            style: "Organic, Wabi-sabi, Botanical",
            audience: "Eco-conscious",
            material: "Recycled Gold",
            extra: "Vine texture",
        },
        ConceptSeed {
            title: "⚖️ 无性别主义 (Unisex)".to_string(),
            reasoning: "Bolder, simpler, gender-neutral.".to_string(),
            style: "Unisex, Brutalist, Chunky",
            audience: "Streetwear",
            material: "Heavy Silver",
            extra: "Industrial Hardware",
        },
        ConceptSeed {
            title: "🎨 艺术雕塑 (Avant-Garde)".to_string(),
            reasoning: "Wearable sculpture.".to_string(),
            style: "Avant-Garde, Abstract, Surrealist",
            audience: "Art Collectors",
            material: "Mixed Metals",
            extra: "Abstract Forms",
        },
    ];

    seeds
        .into_iter()
        .map(|seed| CreativeConcept {
            patch: ConfigPatch {
                material: Some(seed.material.to_string()),
                craftsmanship: Some("High Quality".to_string()),
                extra_elements: Some(seed.extra.to_string()),
                audience: Some(seed.audience.to_string()),
                misc_prompts: Some(format!(
                    "Keep Core Feature: \"{core}\". Apply Style: {}. Context: {}",
                    seed.style, seed.reasoning
                )),
            },
            title: seed.title,
            reasoning: seed.reasoning,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_text_drives_concepts_without_analysis() {
        let concepts = generate_concepts("  ", None);
        assert_eq!(concepts.len(), 10);
        assert_eq!(concepts[0].title, "🔥 极致风格 (Deep Classic)");
        assert_eq!(
            concepts[1].patch.misc_prompts.as_deref(),
            Some("Keep Core Feature: \"Jewelry Piece\". Apply Style: Minimalist, Geometric, Bauhaus. Context: Stripping \"Jewelry Piece\" to essence.")
        );
    }

    #[test]
    fn analysis_core_point_wins_over_idea() {
        let analysis = ImageAnalysis {
            design_concept: "Snake wrap".to_string(),
            style: "Baroque".to_string(),
            audience: "".to_string(),
            emotional_point: "".to_string(),
            scenario: "".to_string(),
            core_point: "".to_string(),
        };
        let concepts = generate_concepts("ignored", Some(&analysis));
        assert_eq!(concepts[0].patch.audience.as_deref(), Some("Hardcore Baroque Lovers"));
        assert!(concepts[0]
            .patch
            .misc_prompts
            .as_deref()
            .unwrap_or_default()
            .starts_with("Keep Core Feature: \"Snake wrap\""));
        assert!(concepts
            .iter()
            .all(|concept| concept.patch.craftsmanship.as_deref() == Some("High Quality")));
    }
}
