//! Inventario Server Library
//!
//! This crate exposes the server's modules so the integration tests can
//! assemble the router against fake collaborators. The server binary is in
//! main.rs.
//!
//! # Modules
//!
//! - `extract`: cover-image extraction via an external vision model
//! - `db`: SQLite-backed book inventory
//! - `routes`: HTTP API and the embedded UI page

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{AppError, Result};
pub use state::AppState;
