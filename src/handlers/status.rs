use chrono::Utc;

use crate::config::{Config, CONFIG};
use crate::market::binder::ActiveMatch;
use crate::prompts::PromptStore;

fn bool_label(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn redact_sensitive_text(text: &str, config: &Config) -> String {
    let secret = config.openrouter_api_key.trim();
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "[REDACTED]")
}

pub fn build_status_report(config: &Config, prompts: &PromptStore) -> String {
    let match_mode = match config.keyword_active_match {
        ActiveMatch::ExactToken => "exact",
        ActiveMatch::Substring => "substring",
    };
    let prompt_source = if prompts.is_custom() {
        format!("custom ({})", prompts.path().display())
    } else {
        format!("preset ({})", config.prompt_preset)
    };

    let mut report = String::new();
    report.push_str("Status snapshot\n");
    report.push_str(&format!("time_utc: {}\n", Utc::now().to_rfc3339()));
    report.push_str(&format!(
        "openrouter_configured: {}\n",
        bool_label(config.has_model_credentials())
    ));
    report.push_str(&format!("openrouter_base_url: {}\n", config.openrouter_base_url));
    report.push_str(&format!("analysis_model: {}\n", config.analysis_model));
    report.push_str(&format!("image_model: {}\n", config.image_model));
    report.push_str(&format!("http_timeout_s: {}\n", config.http_timeout_seconds));
    report.push_str(&format!(
        "generation_cooldown_ms: {}\n",
        config.generation_cooldown_ms
    ));
    report.push_str(&format!("prompt_config: {prompt_source}\n"));
    report.push_str(&format!("product_type: {}\n", prompts.config().product_type));
    report.push_str(&format!("keyword_active_match: {match_mode}\n"));
    report.push_str(&format!(
        "logs_dir: {} (present: {})\n",
        config.log_dir.display(),
        bool_label(config.log_dir.exists())
    ));
    redact_sensitive_text(&report, config)
}

pub fn status_handler(prompts: &PromptStore) -> String {
    build_status_report(&CONFIG, prompts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::PromptPreset;

    #[test]
    fn report_never_prints_the_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            openrouter_api_key: "sk-or-secret".to_string(),
            openrouter_base_url: "https://proxy.local/sk-or-secret/v1".to_string(),
            log_dir: dir.path().to_path_buf(),
            ..Config::load().expect("config loads")
        };
        let prompts = PromptStore::load(dir.path().join("p.json"), PromptPreset::Fashion);
        let report = build_status_report(&config, &prompts);
        assert!(report.contains("openrouter_configured: yes\n"));
        assert!(report.contains("https://proxy.local/[REDACTED]/v1"));
        assert!(!report.contains("sk-or-secret"));
        assert!(report.contains("(present: yes)"));
    }
}
