//! Configuration management for the Inventario server

use std::env;

use serde::Deserialize;

use crate::extract::VisionBackend;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Which vision model answers extraction requests, and how to reach it.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    pub backend: VisionBackend,
    /// API key for the Gemini backend. Required when `backend` is `gemini`.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite:./inventario.db".to_string(),
            },
            extraction: ExtractionConfig {
                backend: VisionBackend::Gemini,
                gemini_api_key: None,
                gemini_model: "gemini-1.5-flash".to_string(),
                ollama_url: "http://localhost:11434".to_string(),
                ollama_model: "llava".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:./inventario.db".to_string()),
            },
            extraction: ExtractionConfig {
                backend: match env::var("VISION_BACKEND")
                    .unwrap_or_else(|_| "gemini".to_string())
                    .as_str()
                {
                    "ollama" => VisionBackend::Ollama,
                    _ => VisionBackend::Gemini,
                },
                gemini_api_key: env::var("GOOGLE_API_KEY").ok(),
                gemini_model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llava".to_string()),
            },
        })
    }
}
