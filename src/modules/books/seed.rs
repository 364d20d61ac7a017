use super::models::Book;

/// Records the catalog starts with when `catalog.seed` is enabled.
pub fn seed_books() -> Vec<Book> {
    [
        (
            "Systems Programming in Practice",
            "Ada Moreno",
            "Memory, processes and the machines underneath",
            5,
            2030,
        ),
        (
            "Async Services",
            "Ravi Kapoor",
            "Building network services that stay responsive",
            5,
            2030,
        ),
        (
            "Parsing by Example",
            "Lena Fischer",
            "From grammars to working parsers",
            5,
            2029,
        ),
        (
            "The Quiet Compiler",
            "Tom Okafor",
            "A short history of optimising compilers",
            2,
            2028,
        ),
        (
            "Caching Patterns",
            "Mei Tanaka",
            "Eviction, invalidation and everything in between",
            3,
            2027,
        ),
        (
            "Data on the Wire",
            "Sam Kowalski",
            "Codecs and framing for binary protocols",
            1,
            2026,
        ),
    ]
    .into_iter()
    .zip(1..)
    .map(
        |((title, author, description, rating, published_date), id)| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            rating,
            published_date,
        },
    )
    .collect()
}
