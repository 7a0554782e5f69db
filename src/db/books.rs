//! Book database operations

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;

/// Persisted book record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub grade_level: String,
    pub subject: String,
    pub series: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Candidate record as submitted by the client.
///
/// `title` and `author` are validated by the API before this reaches the
/// store; the remaining fields default to empty strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub series: String,
}

/// Book repository
pub struct BookRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record, assigning id and timestamps.
    ///
    /// Returns the generated id. Timestamps are the request time; records
    /// are immutable afterwards, so `updated_at` never advances.
    pub async fn insert(&self, book: &NewBook) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        // Fixed-width timestamps so lexicographic order is creation order
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, grade_level, subject, series, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.grade_level)
        .bind(&book.subject)
        .bind(&book.series)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await?;

        Ok(id)
    }

    /// List every record, newest first.
    pub async fn list_all(&self) -> Result<Vec<BookRecord>> {
        let books = sqlx::query_as::<_, BookRecord>(
            r#"
            SELECT id, title, author, grade_level, subject, series, created_at, updated_at
            FROM books
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }
}
