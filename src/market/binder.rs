//! Maps keyword toggles from the market panel onto design configuration fields.

use crate::design::model::{DesignConfig, TextField};
use crate::market::counter::primary_label;
use crate::market::taxonomy::CategoryKey;

pub const COLOR_TONE_PREFIX: &str = "Color Tone: ";
pub const STYLE_PREFIX: &str = "Style: ";

/// How `is_active` decides membership of a keyword in its target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMatch {
    /// The rendered value must equal one comma-separated token.
    ExactToken,
    /// The rendered value may appear anywhere in the raw field text.
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub field: TextField,
    pub prefix: Option<&'static str>,
}

pub fn route(key: CategoryKey) -> Route {
    match key {
        CategoryKey::Color => Route {
            field: TextField::MiscPrompts,
            prefix: Some(COLOR_TONE_PREFIX),
        },
        CategoryKey::Material | CategoryKey::Stone => Route {
            field: TextField::Material,
            prefix: None,
        },
        CategoryKey::Craftsmanship => Route {
            field: TextField::Craftsmanship,
            prefix: None,
        },
        CategoryKey::Style => Route {
            field: TextField::MiscPrompts,
            prefix: Some(STYLE_PREFIX),
        },
        CategoryKey::Element => Route {
            field: TextField::ExtraElements,
            prefix: None,
        },
    }
}

/// A keyword value tagged with the category that produced it. Several categories
/// share one field, so the prefix is the only thing telling their tokens apart once
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedValue {
    pub source: CategoryKey,
    pub raw: String,
}

impl TaggedValue {
    pub fn from_keyword(source: CategoryKey, keyword: &str) -> Self {
        TaggedValue {
            source,
            raw: primary_label(keyword).to_string(),
        }
    }

    pub fn field(&self) -> TextField {
        route(self.source).field
    }

    pub fn render(&self) -> String {
        match route(self.source).prefix {
            Some(prefix) => format!("{prefix}{}", self.raw),
            None => self.raw.clone(),
        }
    }
}

pub fn split_tokens(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Reads the field as a token set, adds or removes `value`, and writes it back
/// joined with `", "`.
fn toggle_token(current: &str, value: &str) -> String {
    let mut tokens = split_tokens(current);
    if tokens.contains(&value) {
        tokens.retain(|token| *token != value);
    } else {
        tokens.push(value);
    }
    tokens.join(", ")
}

/// Adds the keyword to its target field, or removes it if already present.
pub fn toggle(config: &mut DesignConfig, key: CategoryKey, keyword: &str) {
    let value = TaggedValue::from_keyword(key, keyword);
    let rendered = value.render();
    if value.raw.is_empty() {
        return;
    }
    let field = config.text_mut(value.field());
    let updated = toggle_token(field.as_str(), &rendered);
    *field = updated;
}

pub fn is_active(config: &DesignConfig, key: CategoryKey, keyword: &str, mode: ActiveMatch) -> bool {
    let value = TaggedValue::from_keyword(key, keyword);
    if value.raw.is_empty() {
        return false;
    }
    let rendered = value.render();
    let field = config.text(value.field());
    match mode {
        ActiveMatch::ExactToken => split_tokens(field).contains(&rendered.as_str()),
        ActiveMatch::Substring => field.contains(&rendered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_toggle_round_trips_misc_prompts() {
        let mut config = DesignConfig::default();
        config.misc_prompts = "Style: Vintage".to_string();

        toggle(&mut config, CategoryKey::Color, "Rose Gold (玫瑰金)");
        assert_eq!(config.misc_prompts, "Style: Vintage, Color Tone: Rose Gold");
        assert!(is_active(&config, CategoryKey::Color, "Rose Gold (玫瑰金)", ActiveMatch::ExactToken));

        toggle(&mut config, CategoryKey::Color, "Rose Gold (玫瑰金)");
        assert_eq!(config.misc_prompts, "Style: Vintage");
    }

    #[test]
    fn color_toggle_on_empty_field() {
        let mut config = DesignConfig::default();
        toggle(&mut config, CategoryKey::Color, "Rose Gold (玫瑰金)");
        assert_eq!(config.misc_prompts, "Color Tone: Rose Gold");
        toggle(&mut config, CategoryKey::Color, "Rose Gold (玫瑰金)");
        assert_eq!(config.misc_prompts, "");
    }

    #[test]
    fn every_category_round_trips() {
        for key in CategoryKey::ALL {
            for mode in [ActiveMatch::ExactToken, ActiveMatch::Substring] {
                let mut config = DesignConfig::default();
                let original = config.clone();
                assert!(!is_active(&config, key, "Heart (心形)", mode));
                toggle(&mut config, key, "Heart (心形)");
                assert!(is_active(&config, key, "Heart (心形)", mode));
                toggle(&mut config, key, "Heart (心形)");
                assert!(!is_active(&config, key, "Heart (心形)", mode));
                assert_eq!(config, original);
            }
        }
    }

    #[test]
    fn shared_material_field_keeps_unrelated_tokens() {
        let mut config = DesignConfig::default();
        config.material = "Recycled Gold".to_string();
        config.misc_prompts = "Style: Gothic".to_string();

        toggle(&mut config, CategoryKey::Material, "925 Silver (925银)");
        toggle(&mut config, CategoryKey::Stone, "Onyx (玛瑙)");
        assert_eq!(config.material, "Recycled Gold, 925 Silver, Onyx");
        assert_eq!(config.misc_prompts, "Style: Gothic");

        toggle(&mut config, CategoryKey::Material, "925 Silver (925银)");
        assert_eq!(config.material, "Recycled Gold, Onyx");
        assert_eq!(config.misc_prompts, "Style: Gothic");
    }

    #[test]
    fn prefixes_keep_shared_misc_prompts_apart() {
        let mut config = DesignConfig::default();
        toggle(&mut config, CategoryKey::Style, "Gothic");
        toggle(&mut config, CategoryKey::Color, "Gothic");
        assert_eq!(config.misc_prompts, "Style: Gothic, Color Tone: Gothic");

        toggle(&mut config, CategoryKey::Style, "Gothic");
        assert_eq!(config.misc_prompts, "Color Tone: Gothic");
        assert!(!is_active(&config, CategoryKey::Style, "Gothic", ActiveMatch::ExactToken));
        assert!(is_active(&config, CategoryKey::Color, "Gothic", ActiveMatch::ExactToken));
    }

    #[test]
    fn substring_mode_reports_overlapping_labels() {
        let mut config = DesignConfig::default();
        toggle(&mut config, CategoryKey::Color, "Rose Gold (玫瑰金)");
        assert!(is_active(&config, CategoryKey::Color, "Rose", ActiveMatch::Substring));
        assert!(!is_active(&config, CategoryKey::Color, "Rose", ActiveMatch::ExactToken));
    }

    #[test]
    fn toggle_normalizes_irregular_fields() {
        let mut config = DesignConfig::default();
        config.material = "Gold,Silver".to_string();
        toggle(&mut config, CategoryKey::Stone, "Pearl (珍珠)");
        assert_eq!(config.material, "Gold, Silver, Pearl");
        toggle(&mut config, CategoryKey::Stone, "Pearl (珍珠)");
        assert_eq!(config.material, "Gold, Silver");

        config.material = ",Gold".to_string();
        toggle(&mut config, CategoryKey::Stone, "Pearl (珍珠)");
        assert_eq!(config.material, "Gold, Pearl");

        config.material = " Pearl ,, Brass ".to_string();
        toggle(&mut config, CategoryKey::Stone, "Pearl (珍珠)");
        assert_eq!(config.material, "Brass");
    }

    #[test]
    fn routing_table_matches_categories() {
        assert_eq!(route(CategoryKey::Stone).field, TextField::Material);
        assert_eq!(route(CategoryKey::Element).field, TextField::ExtraElements);
        assert_eq!(route(CategoryKey::Craftsmanship).prefix, None);
        assert_eq!(route(CategoryKey::Style).prefix, Some("Style: "));
    }
}
