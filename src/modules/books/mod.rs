pub mod models;
pub mod routes;
pub mod seed;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use store::CatalogStore;

/// Books module: the catalog store and its CRUD endpoints, served from the root
pub struct BooksModule {
    store: Arc<CatalogStore>,
}

impl BooksModule {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new(Arc::new(CatalogStore::new()))
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    fn mount_path(&self) -> String {
        String::new()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.catalog.seed {
            self.store.load(seed::seed_books()).await;
        }

        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            seeded = ctx.settings.catalog.seed,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(module = self.name(), books, "books module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_list_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/Book" }
                }
            }
        }
    })
}

fn book_id_param() -> serde_json::Value {
    json!({
        "name": "book_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "minimum": 1 }
    })
}

fn book_request_body() -> serde_json::Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookRequest" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": book_list_response("All books in insertion order")
                    }
                }
            },
            "/books/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/book/{book_id}": {
                "get": {
                    "summary": "Get a book by id",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "200": {
                            "description": "The book",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid book id")
                    }
                }
            },
            "/book/": {
                "get": {
                    "summary": "Find books by rating",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "book_rating",
                        "in": "query",
                        "required": true,
                        "schema": { "type": "integer", "minimum": 1, "maximum": 5 }
                    }],
                    "responses": {
                        "200": book_list_response("Books with exactly this rating"),
                        "422": error_response("Rating out of range")
                    }
                }
            },
            "/books/publish/": {
                "get": {
                    "summary": "Find books by publication year",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "published_date",
                        "in": "query",
                        "required": true,
                        "schema": { "type": "integer", "minimum": 2000, "maximum": 2030 }
                    }],
                    "responses": {
                        "200": book_list_response("Books published in this year"),
                        "422": error_response("Year out of range")
                    }
                }
            },
            "/create_book": {
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "201": {
                            "description": "Book created",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "422": error_response("Validation error")
                    }
                }
            },
            "/books/update_book": {
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "204": { "description": "Book updated" },
                        "404": error_response("Book not found"),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/books/{book_id}": {
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "204": { "description": "Book deleted" },
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid book id")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "minimum": 1 },
                        "title": { "type": "string", "minLength": 3 },
                        "author": { "type": "string", "minLength": 1 },
                        "description": { "type": "string", "minLength": 1, "maxLength": 100 },
                        "rating": { "type": "integer", "minimum": 0, "maximum": 5 },
                        "published_date": { "type": "integer", "minimum": 2000, "maximum": 2030 }
                    },
                    "required": ["id", "title", "author", "description", "rating", "published_date"]
                },
                "BookRequest": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "description": "Ignored on create; required and positive on update"
                        },
                        "title": { "type": "string", "minLength": 3 },
                        "author": { "type": "string", "minLength": 1 },
                        "description": { "type": "string", "minLength": 1, "maxLength": 100 },
                        "rating": { "type": "integer", "minimum": 0, "maximum": 5 },
                        "published_date": { "type": "integer", "minimum": 2000, "maximum": 2030 }
                    },
                    "required": ["title", "author", "description", "rating", "published_date"]
                }
            }
        }
    })
}

/// Create a new instance of the books module with an empty store
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::default())
}
