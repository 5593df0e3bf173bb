//! People (readers) service

use chrono::{Duration, Utc};

use crate::{
    config::LibraryConfig,
    error::AppResult,
    models::{
        book::HeldBook,
        person::{Person, PersonForm},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PeopleService {
    repository: Repository,
    loan_period: Duration,
}

impl PeopleService {
    pub fn new(repository: Repository, library: &LibraryConfig) -> Self {
        Self {
            repository,
            loan_period: library.loan_period(),
        }
    }

    pub async fn get_all_people(&self) -> AppResult<Vec<Person>> {
        self.repository.people.list_all().await
    }

    pub async fn get_person_by_id(&self, id: i32) -> AppResult<Person> {
        self.repository.people.get_by_id(id).await
    }

    pub async fn add_person(&self, data: &PersonForm) -> AppResult<Person> {
        let person = self.repository.people.create(data).await?;
        tracing::info!("Person created: id={}", person.id);
        Ok(person)
    }

    pub async fn update_person(&self, id: i32, data: &PersonForm) -> AppResult<Person> {
        self.repository.people.update(id, data).await
    }

    /// Delete a person, first putting back on the shelf every book they hold
    pub async fn delete_person(&self, id: i32) -> AppResult<()> {
        let released = self.repository.people.delete(id).await?;
        tracing::info!("Person deleted: id={} released_books={}", id, released);
        Ok(())
    }

    /// Books currently held by the person, flagged when kept past the loan period
    pub async fn get_books_of_person(&self, id: i32) -> AppResult<Vec<HeldBook>> {
        self.repository.people.get_by_id(id).await?;

        let now = Utc::now();
        let books = self.repository.books.list_by_owner(id).await?;
        Ok(books
            .into_iter()
            .map(|book| {
                let overdue = book.is_overdue(self.loan_period, now);
                HeldBook { book, overdue }
            })
            .collect())
    }
}
