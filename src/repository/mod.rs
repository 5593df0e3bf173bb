//! Repository layer: storage traits and their implementations

pub mod books;
pub mod memory;
pub mod people;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use books::{BookStore, PgBookStore};
pub use memory::{InMemoryBookStore, InMemoryPersonStore, MemoryDatabase};
pub use people::{PersonStore, PgPersonStore};

/// Stores backing the services
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub people: Arc<dyn PersonStore>,
}

impl Repository {
    pub fn new(books: Arc<dyn BookStore>, people: Arc<dyn PersonStore>) -> Self {
        Self { books, people }
    }

    /// Create a repository on top of the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookStore::new(pool.clone())),
            people: Arc::new(PgPersonStore::new(pool)),
        }
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        let database = MemoryDatabase::new();
        Self {
            books: Arc::new(database.book_store()),
            people: Arc::new(database.person_store()),
        }
    }
}
