use crate::models::Role;
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

/// Input buffer behind the "Add a New User" panel.
///
/// Serialized as-is for `POST /api/admin/users`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewUserForm {
    #[validate(min_length = 1)]
    pub name: String,
    #[validate(min_length = 1)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+$")]
    pub email: String,
    pub role: Role,
}

/// A single edit to the form, as produced by an input change.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Name(String),
    Email(String),
    Role(Role),
}

impl NewUserForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn apply(&mut self, field: FormField) {
        match field {
            FormField::Name(name) => self.name = name,
            FormField::Email(email) => self.email = email,
            FormField::Role(role) => self.role = role,
        }
    }

    /// Required-field check run before a submit is attempted.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| errors.to_string())
    }
}
