//! In-memory catalog store.
//!
//! Records live in insertion order behind a single `RwLock`, so every
//! operation, including id assignment and scan-then-mutate, is atomic.

use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, BookId, BookRequest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("book {0} not found")]
    NotFound(BookId),
}

#[derive(Debug, Default)]
struct Shelf {
    books: Vec<Book>,
    /// Highest id ever held; never decreases, so deleted ids are not reused.
    high_water: BookId,
}

impl Shelf {
    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }
}

/// Authoritative ordered collection of books
#[derive(Debug, Default)]
pub struct CatalogStore {
    shelf: RwLock<Shelf>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `books`, keeping their ids.
    /// Later records with an id already loaded are skipped.
    pub async fn load(&self, books: Vec<Book>) {
        let mut shelf = self.shelf.write().await;
        shelf.books.clear();
        for book in books {
            if shelf.position(book.id).is_some() {
                tracing::warn!(book_id = book.id, "skipping duplicate seed record");
                continue;
            }
            shelf.high_water = shelf.high_water.max(book.id);
            shelf.books.push(book);
        }
    }

    pub async fn list(&self) -> Vec<Book> {
        self.shelf.read().await.books.clone()
    }

    pub async fn len(&self) -> usize {
        self.shelf.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shelf.read().await.books.is_empty()
    }

    pub async fn get(&self, id: BookId) -> Result<Book, CatalogError> {
        self.shelf
            .read()
            .await
            .books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    pub async fn by_rating(&self, rating: i32) -> Vec<Book> {
        self.filter(|book| book.rating == rating).await
    }

    pub async fn by_published_date(&self, year: i32) -> Vec<Book> {
        self.filter(|book| book.published_date == year).await
    }

    async fn filter(&self, predicate: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.shelf
            .read()
            .await
            .books
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }

    /// Append a new record under a fresh id. Any id on the request is ignored.
    pub async fn insert(&self, request: BookRequest) -> Book {
        let mut shelf = self.shelf.write().await;
        shelf.high_water += 1;
        let book = request.into_book(shelf.high_water);
        shelf.books.push(book.clone());
        book
    }

    /// Replace every field of the record with `book.id`, keeping its position.
    pub async fn replace(&self, book: Book) -> Result<(), CatalogError> {
        let mut shelf = self.shelf.write().await;
        let index = shelf
            .position(book.id)
            .ok_or(CatalogError::NotFound(book.id))?;
        shelf.books[index] = book;
        Ok(())
    }

    /// Remove the record with `id`, returning it.
    pub async fn delete(&self, id: BookId) -> Result<Book, CatalogError> {
        let mut shelf = self.shelf.write().await;
        let index = shelf.position(id).ok_or(CatalogError::NotFound(id))?;
        Ok(shelf.books.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, rating: i32, published_date: i32) -> BookRequest {
        BookRequest {
            id: None,
            title: title.to_string(),
            author: "Author".to_string(),
            description: "A book".to_string(),
            rating,
            published_date,
        }
    }

    #[tokio::test]
    async fn first_insert_into_empty_store_gets_id_one() {
        let store = CatalogStore::new();
        let book = store.insert(request("First", 3, 2010)).await;
        assert_eq!(book.id, 1);
        assert_eq!(store.list().await, vec![book]);
    }

    #[tokio::test]
    async fn insert_ignores_client_id_and_appends() {
        let store = CatalogStore::new();
        store.load(vec![request("Seeded", 2, 2001).into_book(4)]).await;

        let mut req = request("Next", 4, 2002);
        req.id = Some(1);
        let book = store.insert(req).await;

        assert_eq!(book.id, 5);
        let ids: Vec<BookId> = store.list().await.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = CatalogStore::new();
        let first = store.insert(request("One", 1, 2001)).await;
        let second = store.insert(request("Two", 2, 2002)).await;

        store.delete(second.id).await.unwrap();
        let third = store.insert(request("Three", 3, 2003)).await;
        assert_eq!(third.id, 3);

        store.delete(first.id).await.unwrap();
        store.delete(third.id).await.unwrap();
        assert!(store.is_empty().await);
        assert_eq!(store.insert(request("Four", 4, 2004)).await.id, 4);
    }

    #[tokio::test]
    async fn get_returns_not_found_for_unknown_id() {
        let store = CatalogStore::new();
        assert_eq!(store.get(9).await, Err(CatalogError::NotFound(9)));
    }

    #[tokio::test]
    async fn filters_match_exactly() {
        let store = CatalogStore::new();
        store.insert(request("A", 5, 2030)).await;
        store.insert(request("B", 4, 2030)).await;
        store.insert(request("C", 5, 2012)).await;

        let titles = |books: Vec<Book>| books.into_iter().map(|b| b.title).collect::<Vec<_>>();
        assert_eq!(titles(store.by_rating(5).await), vec!["A", "C"]);
        assert_eq!(titles(store.by_published_date(2030).await), vec!["A", "B"]);
        assert!(store.by_rating(1).await.is_empty());
        assert!(store.by_published_date(2031).await.is_empty());
    }

    #[tokio::test]
    async fn replace_swaps_every_field_in_place() {
        let store = CatalogStore::new();
        store.insert(request("A", 1, 2001)).await;
        let target = store.insert(request("B", 2, 2002)).await;
        store.insert(request("C", 3, 2003)).await;

        let updated = request("B revised", 5, 2020).into_book(target.id);
        store.replace(updated.clone()).await.unwrap();

        assert_eq!(store.get(target.id).await.unwrap(), updated);
        assert_eq!(store.list().await[1], updated);
    }

    #[tokio::test]
    async fn replace_and_delete_of_unknown_id_leave_store_unchanged() {
        let store = CatalogStore::new();
        store.insert(request("A", 1, 2001)).await;
        let before = store.list().await;

        assert_eq!(
            store.replace(request("Z", 1, 2001).into_book(77)).await,
            Err(CatalogError::NotFound(77))
        );
        assert_eq!(store.delete(77).await, Err(CatalogError::NotFound(77)));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn load_skips_duplicate_ids() {
        let store = CatalogStore::new();
        store
            .load(vec![
                request("A", 1, 2001).into_book(2),
                request("B", 1, 2001).into_book(2),
            ])
            .await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(2).await.unwrap().title, "A");
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let store = std::sync::Arc::new(CatalogStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let book = store.insert(request(&format!("Book {i}"), 3, 2015)).await;
                    book.id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<BookId>>());
    }
}
