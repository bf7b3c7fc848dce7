//! Token Handlers

pub(crate) mod obtain;
pub(crate) mod refresh;

use shopfront_app::validation::FieldErrors;

use crate::body::BodyFields;

const FIELD_REQUIRED: &str = "This field is required.";
const FIELD_BLANK: &str = "This field may not be blank.";

/// Reads a required, non-blank string field, recording a message when it is unusable.
fn required(fields: &BodyFields, errors: &mut FieldErrors, field: &str) -> String {
    if !fields.contains(field) {
        errors.push(field, FIELD_REQUIRED);
        return String::new();
    }

    match fields.string(field, errors) {
        Some(value) if value.is_empty() => {
            errors.push(field, FIELD_BLANK);
            String::new()
        }
        value => value.unwrap_or_default(),
    }
}
