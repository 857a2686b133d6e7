//! Document-collection backend using PostgreSQL.
//!
//! Every item is a single JSONB document keyed by an opaque UUID string. `seq` only exists to
//! give `list` a stable insertion order.

use super::{CatalogStore, StoreError};
use crate::domain::model::{CatalogItem, ItemFields};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// A catalog store backed by the `houses` table.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Connects to the database and makes sure the collection table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS houses (
                seq BIGSERIAL,
                id TEXT PRIMARY KEY,
                doc JSONB NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

/// JSON body written for create/replace. On replace it is merged over the stored document, so
/// keys it does not mention (an earlier `mainImage`, fixture images) survive.
fn fields_document(fields: &ItemFields, main_image: Option<&str>) -> JsonValue {
    let mut doc = json!({
        "name": fields.name,
        "description": fields.description,
        "price": fields.price,
        "rating": fields.rating,
    });
    if let Some(image) = main_image {
        doc["mainImage"] = JsonValue::from(image);
    }
    doc
}

fn row_to_item(row: &PgRow) -> Result<CatalogItem> {
    let id: String = row.try_get("id")?;
    let mut doc: JsonValue = row.try_get("doc")?;
    match doc.as_object_mut() {
        Some(obj) => {
            obj.insert("_id".to_string(), JsonValue::String(id));
        }
        None => anyhow::bail!("document for '{}' is not an object", id),
    }
    Ok(serde_json::from_value(doc)?)
}

fn found(operation: &'static str, id: &str, row: Option<PgRow>) -> Result<CatalogItem, StoreError> {
    match row {
        Some(r) => row_to_item(&r).map_err(|e| StoreError::backend(operation, e)),
        None => Err(StoreError::NotFound(id.to_string())),
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn list(&self) -> Result<Vec<CatalogItem>, StoreError> {
        let rows = sqlx::query("SELECT id, doc FROM houses ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::backend("list", e))?;
        rows.iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| StoreError::backend("list", e))
    }

    async fn get(&self, id: &str) -> Result<CatalogItem, StoreError> {
        let row = sqlx::query("SELECT id, doc FROM houses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend("get", e))?;
        found("get", id, row)
    }

    async fn create(
        &self,
        fields: ItemFields,
        main_image: Option<String>,
    ) -> Result<CatalogItem, StoreError> {
        let id = Uuid::new_v4().to_string();
        let doc = fields_document(&fields, main_image.as_deref());
        let row = sqlx::query("INSERT INTO houses (id, doc) VALUES ($1, $2) RETURNING id, doc")
            .bind(&id)
            .bind(doc)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::backend("create", e))?;
        row_to_item(&row).map_err(|e| StoreError::backend("create", e))
    }

    async fn replace(
        &self,
        id: &str,
        fields: ItemFields,
        main_image: Option<String>,
    ) -> Result<CatalogItem, StoreError> {
        let doc = fields_document(&fields, main_image.as_deref());
        let row = sqlx::query("UPDATE houses SET doc = doc || $2 WHERE id = $1 RETURNING id, doc")
            .bind(id)
            .bind(doc)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend("replace", e))?;
        found("replace", id, row)
    }

    async fn delete(&self, id: &str) -> Result<CatalogItem, StoreError> {
        let row = sqlx::query("DELETE FROM houses WHERE id = $1 RETURNING id, doc")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend("delete", e))?;
        found("delete", id, row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend("ping", e))?;
        Ok(())
    }
}
