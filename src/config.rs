use std::env;
use std::path::PathBuf;

use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::market::binder::ActiveMatch;
use crate::prompts::PromptPreset;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub analysis_model: String,
    pub image_model: String,
    pub http_timeout_seconds: u64,
    pub generation_cooldown_ms: u64,
    pub prompt_preset: PromptPreset,
    pub prompt_config_path: PathBuf,
    pub keyword_active_match: ActiveMatch,
}

pub static CONFIG: Lazy<Config> =
    Lazy::new(|| Config::load().expect("Failed to load configuration"));

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_prompt_preset(value: String) -> PromptPreset {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return PromptPreset::Jewelry;
    }
    match PromptPreset::parse(trimmed) {
        Some(preset) => preset,
        None => {
            warn!(
                "Unknown PROMPT_CONFIG_TYPE value '{}'; defaulting to jewelry.",
                value
            );
            PromptPreset::Jewelry
        }
    }
}

fn normalize_active_match(value: String) -> ActiveMatch {
    match value.trim().to_lowercase().as_str() {
        "" | "exact" | "token" => ActiveMatch::ExactToken,
        "substring" | "loose" => ActiveMatch::Substring,
        _ => {
            warn!(
                "Unknown KEYWORD_ACTIVE_MATCH value '{}'; defaulting to exact.",
                value
            );
            ActiveMatch::ExactToken
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let http_timeout_seconds = env_u64("HTTP_TIMEOUT_SECONDS", 60).max(1);

        Ok(Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            log_dir: PathBuf::from(env_string("LOG_DIR", "logs")),
            openrouter_api_key: env_string("OPENROUTER_API_KEY", ""),
            openrouter_base_url: env_string("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
            analysis_model: env_string("ANALYSIS_MODEL", "google/gemini-2.5-flash"),
            image_model: env_string("IMAGE_MODEL", "google/gemini-3-pro-image-preview"),
            http_timeout_seconds,
            generation_cooldown_ms: env_u64("GENERATION_COOLDOWN_MS", 2000),
            prompt_preset: normalize_prompt_preset(env_string("PROMPT_CONFIG_TYPE", "jewelry")),
            prompt_config_path: PathBuf::from(env_string(
                "PROMPT_CONFIG_PATH",
                "custom_prompt_config.json",
            )),
            keyword_active_match: normalize_active_match(env_string(
                "KEYWORD_ACTIVE_MATCH",
                "exact",
            )),
        })
    }

    pub fn has_model_credentials(&self) -> bool {
        !self.openrouter_api_key.trim().is_empty()
    }
}
