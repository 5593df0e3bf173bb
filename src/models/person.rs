//! Person (reader) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Person record. Books held by a person are found by querying books by owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub id: i32,
    pub full_name: String,
    pub year_of_birth: i32,
}

/// Editable person fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct PersonForm {
    #[validate(length(min = 2, max = 100, message = "Name should be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(range(min = 1900, max = 2100, message = "Year of birth should be between 1900 and 2100"))]
    pub year_of_birth: i32,
}

impl From<&Person> for PersonForm {
    fn from(person: &Person) -> Self {
        Self {
            full_name: person.full_name.clone(),
            year_of_birth: person.year_of_birth,
        }
    }
}
