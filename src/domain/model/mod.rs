//! Domain model for catalog items.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod fixtures;
pub mod validation;

pub use fixtures::{plant_fixture, seed_houses};
pub use validation::{validate, CandidateFields, FieldValue, ValidationError};

/// A single sellable tool or plant record exposed by the API.
///
/// The identifier is serialized as `_id` so existing front-ends keep working against the
/// document-style payloads they were written for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CatalogItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    /// Stored filename of the uploaded image, if one was ever attached.
    #[serde(rename = "mainImage", default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    /// Legacy image references carried by the seeded fixture records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img2: Option<String>,
}

/// Plants share the catalog item shape but are never mutated.
pub type PlantItem = CatalogItem;

/// Fields that passed validation. Stores only accept this shape for create/replace.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
}

impl CatalogItem {
    pub fn from_fields(id: String, fields: ItemFields, main_image: Option<String>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            rating: fields.rating,
            main_image,
            img1: None,
            img2: None,
        }
    }

    /// Overwrites the four validated fields. The image is only replaced when a new one was
    /// uploaded; `img1`/`img2` are never touched.
    pub fn apply(&mut self, fields: ItemFields, main_image: Option<String>) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.rating = fields.rating;
        if main_image.is_some() {
            self.main_image = main_image;
        }
    }
}
