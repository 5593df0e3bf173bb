//! Book model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Who currently holds a book and since when.
///
/// Owner and taken-at timestamp only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ownership {
    pub person_id: i32,
    pub taken_at: DateTime<Utc>,
}

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i32,
    /// Current holder, `None` when the book is on the shelf
    pub ownership: Option<Ownership>,
}

impl Book {
    pub fn owner_id(&self) -> Option<i32> {
        self.ownership.map(|o| o.person_id)
    }

    pub fn is_taken(&self) -> bool {
        self.ownership.is_some()
    }

    /// A book is overdue once it has been held longer than the loan period
    pub fn is_overdue(&self, loan_period: Duration, now: DateTime<Utc>) -> bool {
        self.ownership
            .map(|o| now - o.taken_at > loan_period)
            .unwrap_or(false)
    }
}

/// Database row for the `books` table
#[derive(Debug, FromRow)]
pub struct BookRow {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub owner_id: Option<i32>,
    pub taken_at: Option<DateTime<Utc>>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        // The table carries a CHECK constraint pairing both columns
        let ownership = match (row.owner_id, row.taken_at) {
            (Some(person_id), Some(taken_at)) => Some(Ownership { person_id, taken_at }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            year: row.year,
            ownership,
        }
    }
}

/// Editable book fields, as submitted by the create and edit forms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(length(min = 1, max = 100, message = "Title should be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 2, max = 100, message = "Author should be between 2 and 100 characters"))]
    pub author: String,
    #[validate(range(min = 0, max = 2100, message = "Year should be between 0 and 2100"))]
    pub year: i32,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
        }
    }
}

/// A book as listed on its holder's page
#[derive(Debug, Clone, Serialize)]
pub struct HeldBook {
    #[serde(flatten)]
    pub book: Book,
    pub overdue: bool,
}

/// Form body of the assign-owner action
#[derive(Debug, Deserialize, ToSchema)]
pub struct OwnerSelection {
    #[serde(alias = "id")]
    pub person_id: i32,
}
