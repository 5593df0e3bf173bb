//! Book storage

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookForm, BookRow, Ownership},
        page::{PageRequest, SortDirection},
    },
};

/// Storage contract for books.
///
/// Ownership is only written through `assign_owner` and `release_owner`, each
/// of which sets or clears owner and taken-at together. Deleting a person
/// releases their books as part of the same write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    /// All books ordered by id
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    /// One page of books plus the total count. Unsorted pages are ordered by
    /// id, sorted ones by title then id.
    async fn list_page(
        &self,
        request: PageRequest,
        sort: Option<SortDirection>,
    ) -> AppResult<(Vec<Book>, i64)>;

    async fn create(&self, data: &BookForm) -> AppResult<Book>;

    /// Replace the editable fields, leaving ownership untouched
    async fn update(&self, id: i32, data: &BookForm) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Case-insensitive title prefix search
    async fn search_by_title(&self, prefix: &str) -> AppResult<Vec<Book>>;

    /// NotFound when either the book or the person is missing
    async fn assign_owner(&self, id: i32, ownership: Ownership) -> AppResult<Book>;

    async fn release_owner(&self, id: i32) -> AppResult<Book>;

    async fn list_by_owner(&self, person_id: i32) -> AppResult<Vec<Book>>;
}

const BOOK_COLUMNS: &str = "id, title, author, year, owner_id, taken_at";

/// Escape LIKE wildcards so user input matches literally
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Book::from)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn list_page(
        &self,
        request: PageRequest,
        sort: Option<SortDirection>,
    ) -> AppResult<(Vec<Book>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let order_by = match sort {
            None => "id",
            Some(SortDirection::Asc) => "title ASC, id ASC",
            Some(SortDirection::Desc) => "title DESC, id DESC",
        };
        let query = format!(
            "SELECT {} FROM books ORDER BY {} LIMIT $1 OFFSET $2",
            BOOK_COLUMNS, order_by
        );

        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(Book::from).collect(), total))
    }

    async fn create(&self, data: &BookForm) -> AppResult<Book> {
        let query = format!(
            "INSERT INTO books (title, author, year) VALUES ($1, $2, $3) RETURNING {}",
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(&data.title)
            .bind(&data.author)
            .bind(data.year)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i32, data: &BookForm) -> AppResult<Book> {
        let query = format!(
            "UPDATE books SET title = $1, author = $2, year = $3 WHERE id = $4 RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, BookRow>(&query)
            .bind(&data.title)
            .bind(&data.author)
            .bind(data.year)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Book::from)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    async fn search_by_title(&self, prefix: &str) -> AppResult<Vec<Book>> {
        let query = format!(
            r"SELECT {} FROM books WHERE lower(title) LIKE $1 ESCAPE '\' ORDER BY title, id",
            BOOK_COLUMNS
        );
        let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn assign_owner(&self, id: i32, ownership: Ownership) -> AppResult<Book> {
        let query = format!(
            "UPDATE books SET owner_id = $1, taken_at = $2 WHERE id = $3 RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, BookRow>(&query)
            .bind(ownership.person_id)
            .bind(ownership.taken_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => AppError::NotFound(
                    format!("Person with id {} not found", ownership.person_id),
                ),
                other => AppError::from(other),
            })?
            .map(Book::from)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn release_owner(&self, id: i32) -> AppResult<Book> {
        let query = format!(
            "UPDATE books SET owner_id = NULL, taken_at = NULL WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Book::from)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn list_by_owner(&self, person_id: i32) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE owner_id = $1 ORDER BY title, id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(person_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }
}
