//! Field validation for catalog items submitted through create/update.

use crate::domain::model::ItemFields;
use serde::Deserialize;
use serde_json::Value as JsonValue;

const MIN_TEXT_LEN: usize = 3;

/// A raw field value as submitted by a client.
///
/// JSON bodies carry real numbers; multipart forms carry everything as text, so numeric
/// fields accept both.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(JsonValue),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Unvalidated input for create/update. Unknown keys are ignored.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CandidateFields {
    /// Accepted and ignored; identifiers are assigned or matched by the store.
    #[serde(rename = "_id", default)]
    pub id: Option<JsonValue>,
    #[serde(default)]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub description: Option<FieldValue>,
    #[serde(default)]
    pub price: Option<FieldValue>,
    #[serde(default)]
    pub rating: Option<FieldValue>,
}

impl CandidateFields {
    /// Sets a field from a multipart text part. Returns false for names this form does not use.
    pub fn set_text(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "rating" => &mut self.rating,
            "_id" => {
                self.id = Some(JsonValue::String(value));
                return true;
            }
            _ => return false,
        };
        *slot = Some(FieldValue::Text(value));
        true
    }
}

/// The first field that failed validation, with a client-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, constraint: impl AsRef<str>) -> Self {
        Self {
            field,
            message: format!("\"{}\" {}", field, constraint.as_ref()),
        }
    }
}

/// Checks name, description, price and rating in that order and stops at the first failure.
pub fn validate(candidate: &CandidateFields) -> Result<ItemFields, ValidationError> {
    let name = required_text("name", candidate.name.as_ref())?;
    let description = required_text("description", candidate.description.as_ref())?;
    let price = non_negative_number("price", candidate.price.as_ref())?;
    let rating = non_negative_number("rating", candidate.rating.as_ref())?;

    Ok(ItemFields {
        name,
        description,
        price,
        rating,
    })
}

fn required_text(field: &'static str, value: Option<&FieldValue>) -> Result<String, ValidationError> {
    let text = match value {
        None => return Err(ValidationError::new(field, "is required")),
        Some(FieldValue::Text(s)) => s,
        Some(_) => return Err(ValidationError::new(field, "must be a string")),
    };
    if text.is_empty() {
        return Err(ValidationError::new(field, "is not allowed to be empty"));
    }
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(ValidationError::new(
            field,
            format!("length must be at least {} characters long", MIN_TEXT_LEN),
        ));
    }
    Ok(text.clone())
}

fn non_negative_number(field: &'static str, value: Option<&FieldValue>) -> Result<f64, ValidationError> {
    let number = match value {
        None => return Err(ValidationError::new(field, "is required")),
        Some(FieldValue::Number(n)) => *n,
        Some(FieldValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::new(field, "must be a number"))?,
        Some(FieldValue::Other(_)) => return Err(ValidationError::new(field, "must be a number")),
    };
    if !number.is_finite() {
        return Err(ValidationError::new(field, "must be a number"));
    }
    if number < 0.0 {
        return Err(ValidationError::new(field, "must be greater than or equal to 0"));
    }
    Ok(number)
}
