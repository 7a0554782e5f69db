//! Vision model providers
//!
//! Defines the model trait and implementations for the supported backends.

use async_trait::async_trait;
use base64::Engine;

use super::types::{ExtractError, VisionBackend};

/// Vision model trait
///
/// A backend receives the instruction prompt plus one image and returns the
/// model's raw text output. Interpreting that text is the service's job.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Get the backend type
    fn backend(&self) -> VisionBackend;

    /// Run the model over a single image
    async fn generate(
        &self,
        prompt: &str,
        image_data: &[u8],
        mime_type: &str,
    ) -> Result<String, ExtractError>;
}

/// Google Gemini vision provider
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url("https://generativelanguage.googleapis.com", api_key, model)
    }

    pub fn with_base_url(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl VisionModel for GeminiProvider {
    fn backend(&self) -> VisionBackend {
        VisionBackend::Gemini
    }

    async fn generate(
        &self,
        prompt: &str,
        image_data: &[u8],
        mime_type: &str,
    ) -> Result<String, ExtractError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let image_base64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        let request = serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": prompt },
                    { "inline_data": { "mime_type": mime_type, "data": image_base64 } }
                ]
            }]
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Upstream(format!("Failed to call Gemini: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Upstream(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExtractError::Upstream(format!("Failed to parse response: {}", e)))?;

        let text = result["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        Ok(text)
    }
}

/// Ollama vision model provider
pub struct OllamaProvider {
    client: reqwest::Client,
    /// Ollama API URL
    base_url: String,
    /// Model name (e.g., "llava", "bakllava")
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl VisionModel for OllamaProvider {
    fn backend(&self) -> VisionBackend {
        VisionBackend::Ollama
    }

    async fn generate(
        &self,
        prompt: &str,
        image_data: &[u8],
        _mime_type: &str,
    ) -> Result<String, ExtractError> {
        let url = format!("{}/api/generate", self.base_url);

        // Ollama takes images as base64 regardless of the declared type
        let image_base64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        let request = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "images": [image_base64],
            "stream": false
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Upstream(format!("Failed to call Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Upstream(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExtractError::Upstream(format!("Failed to parse response: {}", e)))?;

        let text = result["response"].as_str().unwrap_or("").trim().to_string();

        Ok(text)
    }
}
