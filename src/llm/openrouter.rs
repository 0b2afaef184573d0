use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CONFIG;
use crate::design::model::{DesignConfig, ImageAnalysis};
use crate::llm::media::to_data_url;
use crate::llm::prompt::{build_analysis_prompt, build_generation_prompt};
use crate::prompts::PromptConfig;
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("OPENROUTER_API_KEY is not configured")]
    MissingApiKey,
    #[error("quota exhausted: {0}")]
    QuotaExceeded(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("OpenRouter request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("OpenRouter transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("empty response from model")]
    EmptyResponse,
    #[error("failed to parse analysis results: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no image generated; the model may not have returned an image")]
    NoImage,
}

impl GenerationError {
    /// Text shown to the user when a render fails.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::QuotaExceeded(_) => "⚠️ 额度已用尽 (Quota Exceeded): Please check your billing or API key quota.".to_string(),
            GenerationError::PermissionDenied(_) => {
                "⚠️ 权限被拒绝 (Access Denied): Please configure a valid paid API key for the image model.".to_string()
            }
            GenerationError::MissingApiKey => {
                "请先配置 OPENROUTER_API_KEY 后再生成设计。".to_string()
            }
            other => format!("图片生成失败: {}", other),
        }
    }
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

/// Maps a failed status and provider message onto the error kinds the UI
/// distinguishes.
fn classify_failure(status: u16, detail: String) -> GenerationError {
    if status == 429 || detail.contains("RESOURCE_EXHAUSTED") {
        return GenerationError::QuotaExceeded(detail);
    }
    let lowered = detail.to_lowercase();
    if status == 403 || detail.contains("PERMISSION_DENIED") || lowered.contains("permission") {
        return GenerationError::PermissionDenied(detail);
    }
    GenerationError::Status { status, detail }
}

fn summarize_payload(payload: &Value) -> String {
    let model = payload
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    let parts = payload
        .pointer("/messages/0/content")
        .and_then(|v| v.as_array())
        .map(|parts| parts.len())
        .unwrap_or(0);
    let modalities = payload
        .get("modalities")
        .and_then(|v| v.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default();
    format!(
        "model={}, content_parts={}, modalities=[{}]",
        model, parts, modalities
    )
}

async fn call_openrouter_api(payload: &Value) -> Result<Value, GenerationError> {
    if !CONFIG.has_model_credentials() {
        return Err(GenerationError::MissingApiKey);
    }
    debug!("OpenRouter request: {}", summarize_payload(payload));

    let client = get_http_client();
    let response = client
        .post(format!(
            "{}/chat/completions",
            CONFIG.openrouter_base_url.trim_end_matches('/')
        ))
        .header(
            "Authorization",
            format!("Bearer {}", CONFIG.openrouter_api_key),
        )
        .header("X-Title", "Design Configurator")
        .timeout(Duration::from_secs(CONFIG.http_timeout_seconds))
        .json(payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let (message, body_summary) = summarize_error_body(&body);
        warn!(
            "OpenRouter API error: status={}, body={}",
            status, body_summary
        );
        let detail = message.unwrap_or(body_summary);
        return Err(classify_failure(status.as_u16(), detail));
    }

    let value = response.json::<Value>().await?;
    debug!(
        "OpenRouter response received for model={}",
        payload
            .get("model")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
    );
    Ok(value)
}

fn first_message(response: &Value) -> Value {
    response
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .cloned()
        .unwrap_or(Value::Null)
}

fn clean_json_string(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_analysis(content: &str) -> Result<ImageAnalysis, GenerationError> {
    if content.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(serde_json::from_str(&clean_json_string(content))?)
}

/// Prefers `message.images[0].image_url.url`; falls back to a content string
/// that already looks like an image location.
fn extract_generated_image(message: &Value) -> Option<String> {
    let from_images = message
        .pointer("/images/0/image_url/url")
        .and_then(|v| v.as_str())
        .filter(|url| !url.trim().is_empty());
    if let Some(url) = from_images {
        return Some(url.to_string());
    }

    message
        .get("content")
        .and_then(|v| v.as_str())
        .filter(|content| content.starts_with("data:image") || content.starts_with("http"))
        .map(|content| content.to_string())
}

fn build_analysis_payload(prompts: &PromptConfig, image: &[u8]) -> Value {
    json!({
        "model": CONFIG.analysis_model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "image_url", "image_url": { "url": to_data_url(image) } },
                { "type": "text", "text": build_analysis_prompt(prompts) }
            ]
        }],
        "response_format": { "type": "json_object" }
    })
}

fn build_generation_payload(
    prompts: &PromptConfig,
    config: &DesignConfig,
    reference: Option<&[u8]>,
) -> Value {
    let mut content = vec![json!({
        "type": "text",
        "text": build_generation_prompt(prompts, config)
    })];
    if let Some(image) = reference {
        content.push(json!({
            "type": "image_url",
            "image_url": { "url": to_data_url(image) }
        }));
    }

    json!({
        "model": CONFIG.image_model,
        "messages": [{ "role": "user", "content": content }],
        "modalities": ["image", "text"],
        "image_config": { "aspect_ratio": config.aspect_ratio.as_str() }
    })
}

/// Describes a reference image. Any failure yields [`ImageAnalysis::failed`].
pub async fn analyze_reference_image(prompts: &PromptConfig, image: &[u8]) -> ImageAnalysis {
    let payload = build_analysis_payload(prompts, image);
    let metadata = json!({ "image_bytes": image.len(), "product_type": prompts.product_type });

    let result = log_llm_timing(
        "openrouter",
        &CONFIG.analysis_model,
        "analyze_reference_image",
        Some(metadata),
        || async {
            let response = call_openrouter_api(&payload).await?;
            let message = first_message(&response);
            let content = message
                .get("content")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            parse_analysis(content).map_err(|err| {
                warn!(
                    "Analysis response could not be parsed: {} raw={}",
                    err,
                    truncate_for_log(content, 500)
                );
                err
            })
        },
    )
    .await;

    match result {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!("Reference analysis failed: {}", err);
            ImageAnalysis::failed()
        }
    }
}

/// Renders one design and returns the image URL or `data:` URL.
pub async fn generate_design_image(
    prompts: &PromptConfig,
    config: &DesignConfig,
    reference: Option<&[u8]>,
) -> Result<String, GenerationError> {
    let payload = build_generation_payload(prompts, config, reference);
    let metadata = json!({
        "aspect_ratio": config.aspect_ratio.as_str(),
        "resolution": config.resolution.as_str(),
        "has_reference": reference.is_some(),
    });

    log_llm_timing(
        "openrouter",
        &CONFIG.image_model,
        "generate_design_image",
        Some(metadata),
        || async {
            let response = call_openrouter_api(&payload).await?;
            let message = first_message(&response);
            extract_generated_image(&message).ok_or_else(|| {
                warn!(
                    "No image found in response: {}",
                    truncate_for_log(&message.to_string(), 2000)
                );
                GenerationError::NoImage
            })
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_code_fences_before_parsing() {
        let content = "```json\n{\"designConcept\":\"蛇形缠绕\",\"style\":\"复古\",\"audience\":\"收藏家\",\"emotionalPoint\":\"神秘\",\"scenario\":\"晚宴\",\"corePoint\":\"蛇头\"}\n```";
        let analysis = parse_analysis(content).expect("parses");
        assert_eq!(analysis.design_concept, "蛇形缠绕");
        assert_eq!(analysis.core_point, "蛇头");
    }

    #[test]
    fn empty_or_malformed_analysis_is_an_error() {
        assert!(matches!(parse_analysis("  "), Err(GenerationError::EmptyResponse)));
        assert!(matches!(parse_analysis("not json"), Err(GenerationError::Parse(_))));
    }

    #[test]
    fn image_is_read_from_images_then_content() {
        let with_images = json!({
            "content": "Here you go",
            "images": [{ "image_url": { "url": "data:image/png;base64,AAAA" } }]
        });
        assert_eq!(
            extract_generated_image(&with_images).as_deref(),
            Some("data:image/png;base64,AAAA")
        );

        let with_url = json!({ "content": "https://cdn.example.com/render.png" });
        assert_eq!(
            extract_generated_image(&with_url).as_deref(),
            Some("https://cdn.example.com/render.png")
        );

        let text_only = json!({ "content": "I cannot draw that." });
        assert_eq!(extract_generated_image(&text_only), None);
        assert_eq!(extract_generated_image(&Value::Null), None);
    }

    #[test]
    fn classifies_quota_and_permission_failures() {
        assert!(matches!(
            classify_failure(429, "slow down".to_string()),
            GenerationError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_failure(400, "RESOURCE_EXHAUSTED: daily limit".to_string()),
            GenerationError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_failure(403, "forbidden".to_string()),
            GenerationError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_failure(400, "The caller does not have permission".to_string()),
            GenerationError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_failure(500, "boom".to_string()),
            GenerationError::Status { status: 500, .. }
        ));
        assert!(classify_failure(429, String::new())
            .user_message()
            .contains("Quota Exceeded"));
    }

    #[test]
    fn error_body_summary_prefers_provider_message() {
        let (message, _) = summarize_error_body(r#"{"error":{"message":"Key limit exceeded"}}"#);
        assert_eq!(message.as_deref(), Some("Key limit exceeded"));
        let (message, summary) = summarize_error_body("  ");
        assert_eq!(message, None);
        assert_eq!(summary, "empty response body");
    }

    #[test]
    fn generation_payload_requests_image_modality() {
        let payload = build_generation_payload(
            &crate::prompts::PromptPreset::Jewelry.config(),
            &DesignConfig::default(),
            Some(&b"\x89PNG\r\n\x1a\n0000"[..]),
        );
        assert_eq!(payload["modalities"], json!(["image", "text"]));
        assert_eq!(payload["image_config"]["aspect_ratio"], "1:1");
        assert_eq!(payload["messages"][0]["content"][0]["type"], "text");
        assert_eq!(payload["messages"][0]["content"][1]["type"], "image_url");
    }
}
