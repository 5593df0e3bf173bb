//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, people, view};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.3.0",
        description = "Book and reader management. Page endpoints answer with a view model \
                       (template name plus named values).",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::new_book,
        books::create_new_book,
        books::show_book_info,
        books::edit_book,
        books::update_book,
        books::delete_book,
        books::set_book_free,
        books::set_book_owner,
        books::search_books,
        books::list_books,
        books::books_page,
        books::books_page_sorted,
        // People
        people::list_people,
        people::new_person,
        people::create_new_person,
        people::show_person_info,
        people::edit_person,
        people::update_person,
        people::delete_person,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::Ownership,
            crate::models::book::BookForm,
            crate::models::book::OwnerSelection,
            crate::models::page::SortDirection,
            // People
            crate::models::person::Person,
            crate::models::person::PersonForm,
            // Views
            view::View,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog and ownership"),
        (name = "people", description = "Readers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
