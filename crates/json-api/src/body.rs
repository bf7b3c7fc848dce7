//! Request body parsing. Parse failures are reported as [`ApiError`]s.

use salvo::{
    Request,
    http::{Mime, mime},
};
use serde_json::{Map, Value};

use shopfront_app::validation::FieldErrors;

use crate::errors::ApiError;

pub(crate) const NON_FIELD_ERRORS: &str = "non_field_errors";

const NOT_A_STRING: &str = "Not a valid string.";
const NOT_NULL: &str = "This field may not be null.";

/// Top-level fields of a JSON object or HTML form body.
#[derive(Debug, Default)]
pub(crate) struct BodyFields(Map<String, Value>);

impl BodyFields {
    /// Reads the request body. A missing or blank body has no fields.
    pub(crate) async fn parse(req: &mut Request) -> Result<Self, ApiError> {
        match req.content_type() {
            Some(content_type) if is_form(&content_type) => Self::from_form(req).await,
            Some(content_type) if !is_json(&content_type) => Err(ApiError::UnsupportedMediaType(
                content_type.essence_str().to_string(),
            )),
            _ => Self::from_json(req).await,
        }
    }

    async fn from_json(req: &mut Request) -> Result<Self, ApiError> {
        let payload = req
            .payload()
            .await
            .map_err(|error| ApiError::BadRequest(format!("Malformed request body - {error}")))?;

        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(payload) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(other) => Err(ApiError::Validation(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    type_name(&other)
                ),
            ))),
            Err(error) => Err(ApiError::BadRequest(format!("JSON parse error - {error}"))),
        }
    }

    async fn from_form(req: &mut Request) -> Result<Self, ApiError> {
        let form = req
            .form_data()
            .await
            .map_err(|error| ApiError::BadRequest(format!("Form parse error - {error}")))?;

        Ok(Self(
            form.fields
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect(),
        ))
    }

    pub(crate) fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Reads an optional string field, recording a message when the value has the wrong
    /// type. Numbers are accepted in their decimal form.
    pub(crate) fn string(&self, field: &str, errors: &mut FieldErrors) -> Option<String> {
        match self.0.get(field)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Null => {
                errors.push(field, NOT_NULL);
                None
            }
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                errors.push(field, NOT_A_STRING);
                None
            }
        }
    }
}

fn is_json(content_type: &Mime) -> bool {
    content_type.subtype() == mime::JSON || content_type.suffix() == Some(mime::JSON)
}

fn is_form(content_type: &Mime) -> bool {
    (content_type.type_() == mime::APPLICATION
        && content_type.subtype() == mime::WWW_FORM_URLENCODED)
        || (content_type.type_() == mime::MULTIPART && content_type.subtype() == mime::FORM_DATA)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
