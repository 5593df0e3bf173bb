//! Person storage

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::person::{Person, PersonForm},
};

/// Storage contract for people
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All people ordered by name, then id
    async fn list_all(&self) -> AppResult<Vec<Person>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Person>;

    async fn create(&self, data: &PersonForm) -> AppResult<Person>;

    async fn update(&self, id: i32, data: &PersonForm) -> AppResult<Person>;

    /// Remove the person and put back every book they hold, as one write.
    /// Returns how many books were released.
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct PgPersonStore {
    pool: Pool<Postgres>,
}

impl PgPersonStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn list_all(&self) -> AppResult<Vec<Person>> {
        let rows = sqlx::query_as::<_, Person>(
            "SELECT id, full_name, year_of_birth FROM people ORDER BY full_name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Person> {
        sqlx::query_as::<_, Person>("SELECT id, full_name, year_of_birth FROM people WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))
    }

    async fn create(&self, data: &PersonForm) -> AppResult<Person> {
        let row = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO people (full_name, year_of_birth)
            VALUES ($1, $2)
            RETURNING id, full_name, year_of_birth
            "#,
        )
        .bind(&data.full_name)
        .bind(data.year_of_birth)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &PersonForm) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            r#"
            UPDATE people SET full_name = $1, year_of_birth = $2
            WHERE id = $3
            RETURNING id, full_name, year_of_birth
            "#,
        )
        .bind(&data.full_name)
        .bind(data.year_of_birth)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        // Row lock makes concurrent owner assignments wait for this commit
        sqlx::query_scalar::<_, i32>("SELECT id FROM people WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))?;

        let released = sqlx::query(
            "UPDATE books SET owner_id = NULL, taken_at = NULL WHERE owner_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(released)
    }
}
