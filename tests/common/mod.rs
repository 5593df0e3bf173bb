//! Shared fixtures for integration tests

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use library_server::{
    api,
    config::{AppConfig, LibraryConfig},
    models::{BookForm, PersonForm},
    repository::Repository,
    AppState,
};

/// Application state over in-memory stores with the given page size
pub fn memory_state(page_size: i64) -> AppState {
    let config = AppConfig {
        library: LibraryConfig {
            page_size,
            loan_period_days: 10,
        },
        ..AppConfig::default()
    };
    AppState::new(config, Repository::in_memory())
}

pub fn book_form(title: &str, author: &str) -> BookForm {
    BookForm {
        title: title.to_string(),
        author: author.to_string(),
        year: 1990,
    }
}

pub fn person_form(name: &str) -> PersonForm {
    PersonForm {
        full_name: name.to_string(),
        year_of_birth: 1980,
    }
}

/// Router under test
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new(page_size: i64) -> Self {
        let state = memory_state(page_size);
        Self {
            router: api::create_router(state.clone()),
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, form: Option<&str>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match form {
            Some(body) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request("GET", uri, None).await
    }

    /// GET a page and return its status and JSON body
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.get(uri).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}
