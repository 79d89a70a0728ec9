//! Bookings API handlers
//!
//! The bookings document is re-read on every request and served as stored,
//! next to a few small greeting endpoints.

use crate::error::AppError;
use crate::records::Booking;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Addition query
#[derive(Debug, Deserialize)]
pub struct AddQuery {
    /// First operand
    pub a: i64,
    /// Second operand
    pub b: i64,
}

/// Addition response
#[derive(Debug, Serialize)]
pub struct AddResponse {
    /// `a + b`
    pub result: i64,
}

/// GET / - Greeting
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the record service!" }))
}

/// GET /user/:name - Greet a caller by name
pub async fn greet(Path(name): Path<String>) -> Json<Value> {
    Json(json!({ "Hello": name }))
}

/// GET /add?a=A&b=B - Sum two integers
pub async fn add(Query(query): Query<AddQuery>) -> Result<Json<AddResponse>, AppError> {
    let result = query
        .a
        .checked_add(query.b)
        .ok_or_else(|| AppError::BadRequest("Sum overflows a 64-bit integer".to_string()))?;
    Ok(Json(AddResponse { result }))
}

/// GET /view - List all bookings, read fresh from the document
pub async fn view(
    State(state): State<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let state = state.read().await;
    let bookings = state.load_bookings()?;
    tracing::debug!(count = bookings.len(), "Bookings loaded");
    Ok(Json(bookings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_view_reads_document_each_time() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookings.json");
        std::fs::write(&path, r#"[{"booking_id": 1, "guest": "Mina"}]"#).unwrap();
        let state = Arc::new(RwLock::new(
            AppState::open(ServiceKind::Bookings, &path).unwrap(),
        ));

        let Json(first) = view(State(state.clone())).await.unwrap();
        assert_eq!(first, vec![json!({"booking_id": 1, "guest": "Mina"})]);

        std::fs::write(&path, "[]").unwrap();
        let Json(second) = view(State(state)).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_view_corrupt_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookings.json");
        std::fs::write(&path, "{oops").unwrap();
        let state = Arc::new(RwLock::new(
            AppState::open(ServiceKind::Bookings, &path).unwrap(),
        ));

        let result = view(State(state)).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_add() {
        let Json(sum) = add(Query(AddQuery { a: 2, b: 40 })).await.unwrap();
        assert_eq!(sum.result, 42);

        let overflow = add(Query(AddQuery { a: i64::MAX, b: 1 })).await;
        assert!(matches!(overflow, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_greet() {
        let Json(body) = greet(Path("Sadia".to_string())).await;
        assert_eq!(body, json!({"Hello": "Sadia"}));
    }
}
