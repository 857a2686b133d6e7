use crate::domain::model::{plant_fixture, PlantItem};
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/plants",
    responses(
        (status = 200, description = "The fixed plants list", body = [crate::domain::model::CatalogItem])
    )
)]
pub async fn list_plants_handler() -> Json<Vec<PlantItem>> {
    Json(plant_fixture())
}
