//! Book page endpoints

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookForm, OwnerSelection},
        page::{Page, SortDirection},
    },
    AppState,
};

use super::view::{FormInput, View};

pub const ADD_BOOK_VIEW: &str = "book/add-new-book";
pub const BOOK_INFO_VIEW: &str = "book/book-info";
pub const UPDATE_BOOK_VIEW: &str = "book/update-book";
pub const SEARCH_BOOK_VIEW: &str = "book/search-book";
pub const BOOKS_PAGINATION_VIEW: &str = "book/books-pagination";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// `asc` or `desc`
    #[serde(rename = "sortDir")]
    pub sort_dir: Option<String>,
}

impl SortParams {
    fn direction(&self) -> AppResult<Option<SortDirection>> {
        self.sort_dir
            .as_deref()
            .map(|s| s.parse::<SortDirection>())
            .transpose()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Beginning of the title, case-insensitive
    #[serde(rename = "typedString")]
    pub typed_string: Option<String>,
}

fn pagination_view(page: Page<Book>) -> View {
    View::new(BOOKS_PAGINATION_VIEW)
        .with("currentPage", page.page_number)
        .with("totalPages", page.total_pages)
        .with("totalItems", page.total_items)
        .with("books", page.content)
}

fn sorted_pagination_view(page: Page<Book>, direction: SortDirection) -> View {
    pagination_view(page)
        .with("sortDir", direction)
        .with("reverseSortDir", direction.reverse())
}

/// Empty creation form
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    responses(
        (status = 200, description = "Creation form", body = View)
    )
)]
pub async fn new_book() -> View {
    View::new(ADD_BOOK_VIEW).with("newBook", BookForm::default())
}

/// Create a book, or re-render the form when it does not validate
#[utoipa::path(
    post,
    path = "/create-new-book",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = View),
        (status = 303, description = "Created, redirect to listing"),
        (status = 400, description = "Unreadable form", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_new_book(
    State(state): State<AppState>,
    FormInput(form): FormInput<BookForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        tracing::debug!("Rejected book form: {}", errors);
        return Ok(View::new(ADD_BOOK_VIEW)
            .with("newBook", &form)
            .with_errors(&errors)
            .into_response());
    }

    state.services.books.add_book(&form).await?;
    Ok(Redirect::to("/books").into_response())
}

/// Book details, with its holder or the people it can be handed to
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = View),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn show_book_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let book = state.services.books.get_book_by_id(id).await?;
    let view = View::new(BOOK_INFO_VIEW).with("book", &book);

    let view = match state.services.books.owner_of(&book).await? {
        Some(owner) => view.with("owner", owner),
        None => view.with("people", state.services.people.get_all_people().await?),
    };
    Ok(view)
}

/// Edit form pre-filled with the book
#[utoipa::path(
    get,
    path = "/books/{id}/edit",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Edit form", body = View),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<View> {
    let book = state.services.books.get_book_by_id(id).await?;
    Ok(View::new(UPDATE_BOOK_VIEW)
        .with("id", id)
        .with("book", BookForm::from(&book)))
}

/// Apply an edit, or re-render the form when it does not validate
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = View),
        (status = 303, description = "Updated, redirect to listing"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<BookForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        return Ok(View::new(UPDATE_BOOK_VIEW)
            .with("id", id)
            .with("book", &form)
            .with_errors(&errors)
            .into_response());
    }

    state.services.books.update_book(id, &form).await?;
    Ok(Redirect::to("/books").into_response())
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/delete-book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Deleted, redirect to listing"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Redirect> {
    state.services.books.delete_book(id).await?;
    Ok(Redirect::to("/books"))
}

/// Put a book back on the shelf
#[utoipa::path(
    patch,
    path = "/set-book-free/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Released, redirect to details"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_book_free(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    state.services.books.release_book_from_owner(id).await?;
    Ok(Redirect::to(&format!("/books/{}", id)))
}

/// Hand a book to a person
#[utoipa::path(
    patch,
    path = "/set-book-owner/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = OwnerSelection, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Assigned, redirect to details"),
        (status = 404, description = "Book or person not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_book_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(selection): FormInput<OwnerSelection>,
) -> AppResult<Redirect> {
    state
        .services
        .books
        .set_owner_for_book(id, selection.person_id)
        .await?;
    Ok(Redirect::to(&format!("/books/{}", id)))
}

/// Search books by the beginning of their title
#[utoipa::path(
    get,
    path = "/books/execute-searching",
    tag = "books",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching books", body = View),
        (status = 400, description = "Missing search string", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<View> {
    let typed = params
        .typed_string
        .ok_or_else(|| AppError::MissingParameter("typedString".to_string()))?;

    let books = state.services.books.search_books_by_title(&typed).await?;
    Ok(View::new(SEARCH_BOOK_VIEW)
        .with("typedString", typed)
        .with("books", books))
}

/// First page of books, sorted by title when `sortDir` is given
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(SortParams),
    responses(
        (status = 200, description = "First page of books", body = View),
        (status = 400, description = "Invalid sort direction", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> AppResult<View> {
    match params.direction()? {
        Some(direction) => {
            let page = state.services.books.find_books_with_sorting(direction, 1).await?;
            Ok(sorted_pagination_view(page, direction))
        }
        None => {
            let page = state.services.books.find_page(1).await?;
            Ok(pagination_view(page))
        }
    }
}

/// One page of books in catalog order
#[utoipa::path(
    get,
    path = "/books/page/{pageNumber}",
    tag = "books",
    params(("pageNumber" = i64, Path, description = "Page number, starting at 1")),
    responses(
        (status = 200, description = "Page of books", body = View),
        (status = 400, description = "Negative page number", body = crate::error::ErrorResponse)
    )
)]
pub async fn books_page(
    State(state): State<AppState>,
    Path(page_number): Path<i64>,
) -> AppResult<View> {
    let page = state.services.books.find_page(page_number).await?;
    Ok(pagination_view(page))
}

/// One page of books sorted by title
#[utoipa::path(
    get,
    path = "/books/page/{pageNumber}/sort",
    tag = "books",
    params(
        ("pageNumber" = i64, Path, description = "Page number, starting at 1"),
        SortParams
    ),
    responses(
        (status = 200, description = "Sorted page of books", body = View),
        (status = 400, description = "Missing or invalid sort direction", body = crate::error::ErrorResponse)
    )
)]
pub async fn books_page_sorted(
    State(state): State<AppState>,
    Path(page_number): Path<i64>,
    Query(params): Query<SortParams>,
) -> AppResult<View> {
    let direction = params
        .direction()?
        .ok_or_else(|| AppError::MissingParameter("sortDir".to_string()))?;

    let page = state
        .services
        .books
        .find_books_with_sorting(direction, page_number)
        .await?;
    Ok(sorted_pagination_view(page, direction))
}
