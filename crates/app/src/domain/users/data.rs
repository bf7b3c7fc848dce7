//! Users Data

use validator::{Validate, ValidateEmail, ValidationError};

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,

    /// Plaintext password, hashed before it reaches storage.
    pub password: String,

    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ProfileUpdate {
    #[validate(
        length(max = 254, message = "Ensure this field has no more than 254 characters."),
        custom(function = "blank_or_email")
    )]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,
}

fn blank_or_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        return Ok(());
    }

    let mut error = ValidationError::new("email");
    error.message = Some("Enter a valid email address.".into());

    Err(error)
}
