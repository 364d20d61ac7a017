use serde::{Deserialize, Serialize};
use validator::Validate;

pub type BookId = u64;

/// A catalog entry as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, unique for the lifetime of the store
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    /// 0 to 5 inclusive
    pub rating: i32,
    /// Publication year
    pub published_date: i32,
}

/// Request model for creating or replacing a book.
///
/// `id` is ignored on create, so any integer is accepted here; the update
/// handler requires it and checks it is positive.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "description must be 1 to 100 characters"
    ))]
    pub description: String,
    #[validate(range(min = 0, max = 5))]
    pub rating: i32,
    #[validate(range(min = 2000, max = 2030))]
    pub published_date: i32,
}

impl BookRequest {
    /// Build the stored record for `id`, discarding any client-supplied id.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
            published_date: self.published_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BookIdPath {
    #[validate(range(min = 1, message = "book_id must be greater than 0"))]
    pub book_id: BookId,
}

/// Rating filters start at 1; a stored rating of 0 cannot be queried.
#[derive(Debug, Deserialize, Validate)]
pub struct RatingQuery {
    #[validate(range(min = 1, max = 5))]
    pub book_rating: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PublishedDateQuery {
    #[validate(range(min = 2000, max = 2030))]
    pub published_date: i32,
}
