//! HTTP handlers for the Books module.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use bookshelf_http::{AppError, AppResult, ValidatedJson, ValidatedPath, ValidatedQuery};
use serde_json::json;

use super::models::{Book, BookId, BookIdPath, BookRequest, PublishedDateQuery, RatingQuery};
use super::store::{CatalogError, CatalogStore};

type SharedStore = Arc<CatalogStore>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => {
                tracing::debug!(book_id = id, "book lookup missed");
                AppError::not_found("Book not found")
            }
        }
    }
}

/// Routes served by the Books module, relative to its mount path.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/health", get(health_check))
        .route("/book/{book_id}", get(get_book))
        .route("/book/", get(books_by_rating))
        .route("/books/publish/", get(books_by_published_date))
        .route("/create_book", post(create_book))
        .route("/books/update_book", put(update_book))
        .route("/books/{book_id}", delete(delete_book))
        .with_state(store)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(State(store): State<SharedStore>) -> Json<Vec<Book>> {
    Json(store.list().await)
}

async fn get_book(
    State(store): State<SharedStore>,
    ValidatedPath(path): ValidatedPath<BookIdPath>,
) -> AppResult<Json<Book>> {
    Ok(Json(store.get(path.book_id).await?))
}

async fn books_by_rating(
    State(store): State<SharedStore>,
    ValidatedQuery(query): ValidatedQuery<RatingQuery>,
) -> Json<Vec<Book>> {
    Json(store.by_rating(query.book_rating).await)
}

async fn books_by_published_date(
    State(store): State<SharedStore>,
    ValidatedQuery(query): ValidatedQuery<PublishedDateQuery>,
) -> Json<Vec<Book>> {
    Json(store.by_published_date(query.published_date).await)
}

async fn create_book(
    State(store): State<SharedStore>,
    ValidatedJson(request): ValidatedJson<BookRequest>,
) -> (StatusCode, Json<Book>) {
    let book = store.insert(request).await;
    tracing::info!(book_id = book.id, title = %book.title, "book created");
    (StatusCode::CREATED, Json(book))
}

async fn update_book(
    State(store): State<SharedStore>,
    ValidatedJson(request): ValidatedJson<BookRequest>,
) -> AppResult<StatusCode> {
    let id = match request.id {
        None => {
            return Err(AppError::validation(
                vec![json!({ "field": "id", "error": "required" })],
                "id is required to update a book",
            ))
        }
        Some(id) => match BookId::try_from(id) {
            Ok(id) if id > 0 => id,
            _ => {
                return Err(AppError::validation(
                    vec![json!({
                        "field": "id",
                        "error": "range",
                        "params": { "min": 1, "value": id }
                    })],
                    "id must be greater than 0",
                ))
            }
        },
    };

    store.replace(request.into_book(id)).await?;
    tracing::info!(book_id = id, "book updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(
    State(store): State<SharedStore>,
    ValidatedPath(path): ValidatedPath<BookIdPath>,
) -> AppResult<StatusCode> {
    let removed = store.delete(path.book_id).await?;
    tracing::info!(book_id = removed.id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
