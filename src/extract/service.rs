//! Extraction service
//!
//! Orchestrates the vision backend and turns its free-text output into a
//! fixed-shape [`BookFields`] value.

use std::sync::Arc;

use crate::config::ExtractionConfig;

use super::{
    provider::{GeminiProvider, OllamaProvider, VisionModel},
    types::{BookFields, ExtractError, VisionBackend},
};

/// Instruction prompt sent with every cover image.
///
/// The model is told to answer with a bare JSON object; anything else is
/// handled by the fence cleanup and parse below.
const EXTRACTION_PROMPT: &str = r#"
Analyze the following image of a book cover.
Extract the following details:
- Title: The main title of the book
- Author(s): The author name(s)
- Grade Level: Any grade level information if visible (e.g., "Grades 3-5", "Ages 8-12")
- Subject: The subject or genre (e.g., Fantasy, Science Fiction, History, Education, Fiction, Non-Fiction, Mystery, Romance, Biography, etc.)
- Series: If this book is part of a series, mention the series name

Return the response ONLY as a valid JSON object with the following keys:
"title", "author", "gradeLevel", "subject", "series".
If a piece of information is not found or not applicable, return an empty string "" for that key.
Do not include any other text, explanations, or markdown formatting in your response.
The response must be valid JSON that can be parsed directly.
"#;

/// Extraction service backed by a single configured vision model.
///
/// Each call is independent and stateless: one model invocation, no retry,
/// no fallback between backends, no caching of repeated images.
pub struct Extractor {
    model: Arc<dyn VisionModel>,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").finish_non_exhaustive()
    }
}

impl Extractor {
    /// Create an extractor over an already-built model (used by tests).
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Build the backend selected by configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractError> {
        let model: Arc<dyn VisionModel> = match config.backend {
            VisionBackend::Gemini => {
                let api_key = config.gemini_api_key.as_deref().ok_or_else(|| {
                    ExtractError::NotConfigured(
                        "GOOGLE_API_KEY is required for the gemini backend".to_string(),
                    )
                })?;
                Arc::new(GeminiProvider::new(api_key, &config.gemini_model))
            }
            VisionBackend::Ollama => {
                Arc::new(OllamaProvider::new(&config.ollama_url, &config.ollama_model))
            }
        };

        Ok(Self { model })
    }

    /// Get the configured backend type
    pub fn backend(&self) -> VisionBackend {
        self.model.backend()
    }

    /// Extract bibliographic fields from a cover image.
    pub async fn extract(
        &self,
        image_data: &[u8],
        mime_type: &str,
    ) -> Result<BookFields, ExtractError> {
        let raw = self
            .model
            .generate(EXTRACTION_PROMPT, image_data, mime_type)
            .await?;

        tracing::debug!(backend = ?self.model.backend(), bytes = raw.len(), "model responded");

        let cleaned = clean_model_output(&raw);

        let parsed: serde_json::Value = serde_json::from_str(&cleaned)
            .map_err(|e| ExtractError::InvalidResponse(e.to_string()))?;

        Ok(backfill_fields(&parsed))
    }
}

/// Strip the markdown code fences models wrap JSON in despite instructions.
fn clean_model_output(text: &str) -> String {
    text.replace("```json\n", "").replace("```", "").trim().to_string()
}

/// Build the five-field result from whatever JSON the model produced.
///
/// A field survives only as a non-empty JSON string; missing keys,
/// non-string values, and non-object payloads all collapse to `""`.
fn backfill_fields(parsed: &serde_json::Value) -> BookFields {
    let field = |key: &str| -> String {
        match parsed.get(key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            _ => String::new(),
        }
    };

    BookFields {
        title: field("title"),
        author: field("author"),
        grade_level: field("gradeLevel"),
        subject: field("subject"),
        series: field("series"),
    }
}
