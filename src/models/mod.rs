//! Data models

pub mod book;
pub mod page;
pub mod person;

// Re-export commonly used types
pub use book::{Book, BookForm, HeldBook, Ownership};
pub use page::{Page, PageRequest, SortDirection};
pub use person::{Person, PersonForm};
