//! In-process stores, used for tests and for running without a database

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, PersonStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookForm, Ownership},
        page::{PageRequest, SortDirection},
        person::{Person, PersonForm},
    },
};

/// Rows keyed by id, with a monotonically increasing id sequence
#[derive(Debug)]
struct Table<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

fn book_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}

fn person_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Person with id {} not found", id))
}

fn sort_by_title(books: &mut [Book], direction: SortDirection) {
    books.sort_by(|a, b| (a.title.as_str(), a.id).cmp(&(b.title.as_str(), b.id)));
    if direction == SortDirection::Desc {
        books.reverse();
    }
}

/// Both tables behind one lock, so writes spanning books and people are atomic
#[derive(Debug, Default)]
struct Tables {
    books: Table<Book>,
    people: Table<Person>,
}

/// Shared in-process database handing out the book and person stores
#[derive(Debug, Default, Clone)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book_store(&self) -> InMemoryBookStore {
        InMemoryBookStore {
            tables: self.tables.clone(),
        }
    }

    pub fn person_store(&self) -> InMemoryPersonStore {
        InMemoryPersonStore {
            tables: self.tables.clone(),
        }
    }
}

#[derive(Debug)]
pub struct InMemoryBookStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let tables = self.tables.read().await;
        let table = &tables.books;
        table.rows.get(&id).cloned().ok_or_else(|| book_not_found(id))
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        let table = &tables.books;
        Ok(table.rows.values().cloned().collect())
    }

    async fn list_page(
        &self,
        request: PageRequest,
        sort: Option<SortDirection>,
    ) -> AppResult<(Vec<Book>, i64)> {
        let tables = self.tables.read().await;
        let table = &tables.books;
        let mut books: Vec<Book> = table.rows.values().cloned().collect();
        if let Some(direction) = sort {
            sort_by_title(&mut books, direction);
        }

        let total = books.len() as i64;
        let content = books
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .collect();
        Ok((content, total))
    }

    async fn create(&self, data: &BookForm) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let table = &mut tables.books;
        let id = table.next_id();
        let book = Book {
            id,
            title: data.title.clone(),
            author: data.author.clone(),
            year: data.year,
            ownership: None,
        };
        table.rows.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, data: &BookForm) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let table = &mut tables.books;
        let book = table.rows.get_mut(&id).ok_or_else(|| book_not_found(id))?;
        book.title = data.title.clone();
        book.author = data.author.clone();
        book.year = data.year;
        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let table = &mut tables.books;
        table.rows.remove(&id).map(|_| ()).ok_or_else(|| book_not_found(id))
    }

    async fn search_by_title(&self, prefix: &str) -> AppResult<Vec<Book>> {
        let prefix = prefix.to_lowercase();
        let tables = self.tables.read().await;
        let table = &tables.books;
        let mut books: Vec<Book> = table
            .rows
            .values()
            .filter(|b| b.title.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        sort_by_title(&mut books, SortDirection::Asc);
        Ok(books)
    }

    async fn assign_owner(&self, id: i32, ownership: Ownership) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if !tables.people.rows.contains_key(&ownership.person_id) {
            return Err(person_not_found(ownership.person_id));
        }
        let table = &mut tables.books;
        let book = table.rows.get_mut(&id).ok_or_else(|| book_not_found(id))?;
        book.ownership = Some(ownership);
        Ok(book.clone())
    }

    async fn release_owner(&self, id: i32) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let table = &mut tables.books;
        let book = table.rows.get_mut(&id).ok_or_else(|| book_not_found(id))?;
        book.ownership = None;
        Ok(book.clone())
    }

    async fn list_by_owner(&self, person_id: i32) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        let table = &tables.books;
        let mut books: Vec<Book> = table
            .rows
            .values()
            .filter(|b| b.owner_id() == Some(person_id))
            .cloned()
            .collect();
        sort_by_title(&mut books, SortDirection::Asc);
        Ok(books)
    }
}

#[derive(Debug)]
pub struct InMemoryPersonStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    async fn list_all(&self) -> AppResult<Vec<Person>> {
        let tables = self.tables.read().await;
        let table = &tables.people;
        let mut people: Vec<Person> = table.rows.values().cloned().collect();
        people.sort_by(|a, b| (a.full_name.as_str(), a.id).cmp(&(b.full_name.as_str(), b.id)));
        Ok(people)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Person> {
        let tables = self.tables.read().await;
        let table = &tables.people;
        table.rows.get(&id).cloned().ok_or_else(|| person_not_found(id))
    }

    async fn create(&self, data: &PersonForm) -> AppResult<Person> {
        let mut tables = self.tables.write().await;
        let table = &mut tables.people;
        let id = table.next_id();
        let person = Person {
            id,
            full_name: data.full_name.clone(),
            year_of_birth: data.year_of_birth,
        };
        table.rows.insert(id, person.clone());
        Ok(person)
    }

    async fn update(&self, id: i32, data: &PersonForm) -> AppResult<Person> {
        let mut tables = self.tables.write().await;
        let table = &mut tables.people;
        let person = table.rows.get_mut(&id).ok_or_else(|| person_not_found(id))?;
        person.full_name = data.full_name.clone();
        person.year_of_birth = data.year_of_birth;
        Ok(person.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        tables.people.rows.remove(&id).ok_or_else(|| person_not_found(id))?;

        let mut released = 0;
        for book in tables.books.rows.values_mut() {
            if book.owner_id() == Some(id) {
                book.ownership = None;
                released += 1;
            }
        }
        Ok(released)
    }
}
