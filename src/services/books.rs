//! Book application service: catalog, paging and ownership

use chrono::Utc;

use crate::{
    config::LibraryConfig,
    error::AppResult,
    models::{
        book::{Book, BookForm, Ownership},
        page::{Page, PageRequest, SortDirection},
        person::Person,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
    page_size: i64,
}

impl BookService {
    pub fn new(repository: Repository, library: &LibraryConfig) -> Self {
        Self {
            repository,
            page_size: library.page_size,
        }
    }

    pub async fn get_book_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn get_all_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Books for `page_number` (1-based, 0 is read as 1) in id order
    pub async fn find_page(&self, page_number: i64) -> AppResult<Page<Book>> {
        let request = PageRequest::new(page_number, self.page_size)?;
        let (books, total) = self.repository.books.list_page(request, None).await?;
        Ok(Page::new(books, request, total))
    }

    /// Books for `page_number` ordered by title in the given direction
    pub async fn find_books_with_sorting(
        &self,
        direction: SortDirection,
        page_number: i64,
    ) -> AppResult<Page<Book>> {
        let request = PageRequest::new(page_number, self.page_size)?;
        let (books, total) = self
            .repository
            .books
            .list_page(request, Some(direction))
            .await?;
        Ok(Page::new(books, request, total))
    }

    /// Store a new book. The form is expected to be validated already.
    pub async fn add_book(&self, data: &BookForm) -> AppResult<Book> {
        let book = self.repository.books.create(data).await?;
        tracing::info!("Book created: id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, data: &BookForm) -> AppResult<Book> {
        self.repository.books.update(id, data).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// The person holding the book, `None` when it is free
    pub async fn get_owner(&self, book_id: i32) -> AppResult<Option<Person>> {
        let book = self.repository.books.get_by_id(book_id).await?;
        self.owner_of(&book).await
    }

    /// The holder of an already loaded book
    pub async fn owner_of(&self, book: &Book) -> AppResult<Option<Person>> {
        match book.owner_id() {
            Some(person_id) => Ok(Some(self.repository.people.get_by_id(person_id).await?)),
            None => Ok(None),
        }
    }

    pub async fn release_book_from_owner(&self, book_id: i32) -> AppResult<Book> {
        let book = self.repository.books.release_owner(book_id).await?;
        tracing::info!("Book id={} released", book_id);
        Ok(book)
    }

    /// Hand the book to `person_id`, stamping the current time.
    /// The person must exist; a later assignment replaces an earlier one.
    pub async fn set_owner_for_book(&self, book_id: i32, person_id: i32) -> AppResult<Book> {
        self.repository.people.get_by_id(person_id).await?;

        let ownership = Ownership {
            person_id,
            taken_at: Utc::now(),
        };
        let book = self.repository.books.assign_owner(book_id, ownership).await?;
        tracing::info!("Book id={} taken by person id={}", book_id, person_id);
        Ok(book)
    }

    pub async fn search_books_by_title(&self, query: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search_by_title(query).await
    }
}
