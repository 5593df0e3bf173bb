//! People page endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::{error::AppResult, models::person::PersonForm, AppState};

use super::view::{FormInput, View};

pub const ALL_PEOPLE_VIEW: &str = "people/all-people";
pub const ADD_PERSON_VIEW: &str = "people/add-new-person";
pub const PERSON_INFO_VIEW: &str = "people/person-info";
pub const UPDATE_PERSON_VIEW: &str = "people/update-person";

/// All people
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    responses(
        (status = 200, description = "List of people", body = View)
    )
)]
pub async fn list_people(State(state): State<AppState>) -> AppResult<View> {
    let people = state.services.people.get_all_people().await?;
    Ok(View::new(ALL_PEOPLE_VIEW).with("people", people))
}

/// Empty creation form
#[utoipa::path(
    get,
    path = "/people/new",
    tag = "people",
    responses(
        (status = 200, description = "Creation form", body = View)
    )
)]
pub async fn new_person() -> View {
    View::new(ADD_PERSON_VIEW).with("newPerson", PersonForm::default())
}

/// Create a person, or re-render the form when it does not validate
#[utoipa::path(
    post,
    path = "/create-new-person",
    tag = "people",
    request_body(content = PersonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = View),
        (status = 303, description = "Created, redirect to listing")
    )
)]
pub async fn create_new_person(
    State(state): State<AppState>,
    FormInput(form): FormInput<PersonForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        return Ok(View::new(ADD_PERSON_VIEW)
            .with("newPerson", &form)
            .with_errors(&errors)
            .into_response());
    }

    state.services.people.add_person(&form).await?;
    Ok(Redirect::to("/people").into_response())
}

/// Person details with the books they hold
#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person details", body = View),
        (status = 404, description = "Person not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn show_person_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<View> {
    let person = state.services.people.get_person_by_id(id).await?;
    let books = state.services.people.get_books_of_person(id).await?;
    Ok(View::new(PERSON_INFO_VIEW)
        .with("person", person)
        .with("books", books))
}

/// Edit form pre-filled with the person
#[utoipa::path(
    get,
    path = "/people/{id}/edit",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Edit form", body = View),
        (status = 404, description = "Person not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_person(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<View> {
    let person = state.services.people.get_person_by_id(id).await?;
    Ok(View::new(UPDATE_PERSON_VIEW)
        .with("id", id)
        .with("person", PersonForm::from(&person)))
}

/// Apply an edit, or re-render the form when it does not validate
#[utoipa::path(
    patch,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    request_body(content = PersonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = View),
        (status = 303, description = "Updated, redirect to listing"),
        (status = 404, description = "Person not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<PersonForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        return Ok(View::new(UPDATE_PERSON_VIEW)
            .with("id", id)
            .with("person", &form)
            .with_errors(&errors)
            .into_response());
    }

    state.services.people.update_person(id, &form).await?;
    Ok(Redirect::to("/people").into_response())
}

/// Delete a person; books they hold go back on the shelf
#[utoipa::path(
    delete,
    path = "/delete-person/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 303, description = "Deleted, redirect to listing"),
        (status = 404, description = "Person not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    state.services.people.delete_person(id).await?;
    Ok(Redirect::to("/people"))
}
