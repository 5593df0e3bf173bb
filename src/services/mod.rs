//! Business logic services

pub mod books;
pub mod people;

use crate::{config::LibraryConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub people: people::PeopleService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, library: &LibraryConfig) -> Self {
        Self {
            books: books::BookService::new(repository.clone(), library),
            people: people::PeopleService::new(repository, library),
        }
    }
}
