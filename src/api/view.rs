//! View-model responses and form binding.
//!
//! Page handlers answer with the name of the template to render and the
//! named values it consumes, serialized as JSON. Rendering itself happens
//! outside this server.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::error::AppError;

/// A template name plus the values it is rendered with
#[derive(Debug, Serialize, ToSchema)]
pub struct View {
    /// Template name, e.g. `book/book-info`
    pub view: String,
    /// Named values consumed by the template
    #[schema(value_type = Object)]
    pub model: Map<String, Value>,
}

impl View {
    pub fn new(template: &str) -> Self {
        Self {
            view: template.to_string(),
            model: Map::new(),
        }
    }

    /// Add a named value to the model
    pub fn with<T: Serialize>(mut self, name: &str, value: T) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize model value '{}': {}", name, e);
            Value::Null
        });
        self.model.insert(name.to_string(), value);
        self
    }

    /// Attach form validation messages under `errors`
    pub fn with_errors(self, errors: &ValidationErrors) -> Self {
        self.with("errors", field_messages(errors))
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Flatten validation errors into field name -> messages
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// URL-encoded form body; a body that cannot be bound is a bad request
pub struct FormInput<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(FormInput(value))
    }
}
