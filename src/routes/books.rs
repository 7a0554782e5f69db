//! Book API endpoints
//!
//! Provides the inventory REST API:
//! - Create a book record
//! - List the collection, newest first

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::{BookRecord, BookRepository, NewBook};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for a successful create
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookResponse {
    pub message: String,
    pub book_id: String,
}

/// Create the books router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_books).post(create_book))
}

/// List all saved books, newest first
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookRecord>>> {
    let books = BookRepository::new(state.db()).list_all().await?;

    Ok(Json(books))
}

/// Save a confirmed book record
///
/// Title and author are required; the store never sees a candidate without
/// them. Everything else defaults to empty strings.
async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<NewBook>,
) -> Result<(StatusCode, Json<CreateBookResponse>)> {
    if book.title.is_empty() || book.author.is_empty() {
        return Err(AppError::BadRequest(
            "Title and Author are required".to_string(),
        ));
    }

    let book_id = BookRepository::new(state.db()).insert(&book).await?;

    tracing::info!(book_id = %book_id, title = %book.title, "book saved");

    Ok((
        StatusCode::CREATED,
        Json(CreateBookResponse {
            message: "Book saved successfully".to_string(),
            book_id,
        }),
    ))
}
