use once_cell::sync::Lazy;
use regex::Regex;

use crate::design::model::{DesignConfig, TextField};
use crate::market::binder::split_tokens;

static DISPLAY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(color tone:|style:)\s*").expect("valid tag prefix regex"));

fn display_tag(token: &str) -> &str {
    match DISPLAY_PREFIX.find(token) {
        Some(found) => &token[found.end()..],
        None => token,
    }
}

/// Flat, de-duplicated display tags for the current configuration.
pub fn derive_active_tags(config: &DesignConfig) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for field in TextField::ALL {
        for token in split_tokens(config.text(field)) {
            let tag = display_tag(token);
            if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
                continue;
            }
            tags.push(tag.to_string());
        }
    }
    tags
}
