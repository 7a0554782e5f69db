//! Extraction module
//!
//! Turns an uploaded cover image into structured bibliographic metadata by
//! way of an external multimodal model.
//!
//! Supports multiple backends:
//! - Google Gemini (hosted, needs an API key)
//! - Ollama vision models (local LLM)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventario_server::extract::Extractor;
//!
//! let extractor = Extractor::from_config(&config.extraction)?;
//! let fields = extractor.extract(&image_bytes, "image/jpeg").await?;
//! ```

mod provider;
mod service;
mod types;

pub use provider::{GeminiProvider, OllamaProvider, VisionModel};
pub use service::Extractor;
pub use types::{BookFields, ExtractError, VisionBackend};
