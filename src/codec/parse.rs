//! Inbound validation of request bodies.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::store::{ComputerModel, NewCompany};

/// Reasons a request body is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// Required field absent, empty, or not a string.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("`computerModels` must be an array")]
    ComputerModelsNotArray,
}

/// A required field: present, a string, and non-empty.
fn required(object: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match object.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Validate a computer model body. Fields other than `id`, `name`, `release` are ignored.
pub fn parse_computer_model(body: &Value) -> Result<ComputerModel, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;
    Ok(ComputerModel {
        id: required(object, "id")?,
        name: required(object, "name")?,
        release: required(object, "release")?,
    })
}

/// Validate a company body.
///
/// Nested `computerModels` entries are validated one by one; invalid entries
/// are dropped without failing the company.
pub fn parse_company(body: &Value) -> Result<NewCompany, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;
    let id = required(object, "id")?;
    let name = required(object, "name")?;
    let location = required(object, "location")?;

    let computer_models = match object.get("computerModels") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match parse_computer_model(entry) {
                Ok(model) => Some(model),
                Err(err) => {
                    tracing::debug!(company_id = %id, error = %err, "Dropping invalid computer model");
                    None
                }
            })
            .collect(),
        Some(_) => return Err(ValidationError::ComputerModelsNotArray),
    };

    Ok(NewCompany {
        id,
        name,
        location,
        computer_models,
    })
}
