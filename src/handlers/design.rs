use anyhow::{anyhow, Result};
use tracing::info;

use crate::design::concepts::{generate_concepts, CreativeConcept};
use crate::design::model::{AspectRatio, DesignConfig, ImageResolution, TextField};
use crate::state::Session;

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("Invalid value for {name}: {value}"))
}

/// Sets one configuration field by its external (camelCase) or kebab-case name.
pub fn apply_setting(config: &mut DesignConfig, name: &str, value: &str) -> Result<()> {
    if let Some(field) = TextField::parse(name) {
        *config.text_mut(field) = value.to_string();
        return Ok(());
    }

    let normalized = name.trim().replace(['-', '_'], "").to_lowercase();
    match normalized.as_str() {
        "creativitystrength" | "creativity" => {
            let strength = parse_number::<u16>(name, value)?;
            config.set_creativity_strength(strength.min(100) as u8);
        }
        "aspectratio" => {
            config.aspect_ratio = AspectRatio::parse(value)
                .ok_or_else(|| anyhow!("Unsupported aspect ratio: {value}"))?;
        }
        "resolution" => {
            config.resolution = ImageResolution::parse(value)
                .ok_or_else(|| anyhow!("Unsupported resolution: {value}"))?;
        }
        "minranking" => config.min_ranking = parse_number(name, value)?,
        "minsearchvolume" => config.min_search_volume = parse_number(name, value)?,
        "minsales" => config.min_sales = parse_number(name, value)?,
        "maxppc" => {
            let max_ppc: f64 = parse_number(name, value)?;
            if !max_ppc.is_finite() || max_ppc < 0.0 {
                return Err(anyhow!("Invalid value for {name}: {value}"));
            }
            config.max_ppc = max_ppc;
        }
        _ => return Err(anyhow!("Unknown configuration field: {name}")),
    }
    Ok(())
}

pub fn set_field_handler(session: &mut Session, name: &str, value: &str) -> Result<()> {
    apply_setting(&mut session.design, name, value)?;
    info!("Configuration field {} set", name);
    Ok(())
}

/// Applies the `number`-th (1-based) inspiration concept over the current
/// configuration.
pub fn apply_concept_handler(
    session: &mut Session,
    number: usize,
    idea: &str,
) -> Result<CreativeConcept> {
    let concepts = generate_concepts(idea, session.reference_analysis());
    let concept = number
        .checked_sub(1)
        .and_then(|index| concepts.get(index))
        .cloned()
        .ok_or_else(|| anyhow!("Concept number must be between 1 and {}", concepts.len()))?;
    session.design = concept.patch.apply_to(&session.design);
    info!("Applied concept '{}'", concept.title);
    Ok(concept)
}
