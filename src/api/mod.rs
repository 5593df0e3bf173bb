//! HTTP handlers and routing

pub mod books;
pub mod health;
pub mod openapi;
pub mod people;
pub mod view;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let pages = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/new", get(books::new_book))
        .route("/books/execute-searching", get(books::search_books))
        .route("/books/page/:page_number", get(books::books_page))
        .route("/books/page/:page_number/sort", get(books::books_page_sorted))
        .route("/books/:id", get(books::show_book_info).patch(books::update_book))
        .route("/books/:id/edit", get(books::edit_book))
        .route("/create-new-book", post(books::create_new_book))
        .route("/delete-book/:id", delete(books::delete_book))
        .route("/set-book-free/:id", patch(books::set_book_free))
        .route("/set-book-owner/:id", patch(books::set_book_owner))
        // People
        .route("/people", get(people::list_people))
        .route("/people/new", get(people::new_person))
        .route("/people/:id", get(people::show_person_info).patch(people::update_person))
        .route("/people/:id/edit", get(people::edit_person))
        .route("/create-new-person", post(people::create_new_person))
        .route("/delete-person/:id", delete(people::delete_person))
        .with_state(state);

    Router::new()
        .merge(pages)
        .merge(openapi::create_openapi_router())
}
