//! End-to-end tests of the houses/plants API against the in-memory backend.

mod common;

use common::{spawn_server, INDEX_HTML};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn hoe_form() -> Form {
    Form::new()
        .percent_encode_noop()
        .text("name", "Hoe")
        .text("description", "Good for weeds")
        .text("price", "12.50")
        .text("rating", "4.0")
}

fn image_part(name: &str, bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name(name.to_string())
        .mime_str("image/png")
        .unwrap()
}

async fn list(server: &common::TestServer) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    Ok(server
        .client
        .get(server.url("/api/houses"))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?)
}

#[tokio::test]
async fn seeded_collection_lists_in_insertion_order() -> TestResult {
    let server = spawn_server(true).await?;
    let items = list(&server).await?;

    let ids: Vec<&str> = items.iter().filter_map(|i| i["_id"].as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    assert_eq!(items[0]["name"], "Mower");
    assert_eq!(items[0]["price"], json!(129.99));
    assert_eq!(items[0]["img1"], "images/mower.png");
    assert!(items[0].get("mainImage").is_none());
    Ok(())
}

#[tokio::test]
async fn create_echoes_fields_and_assigns_a_fresh_id() -> TestResult {
    let server = spawn_server(true).await?;
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .json(&json!({"name": "Hoe", "description": "Good for weeds", "price": 12.50, "rating": 4.0}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let item: Value = resp.json().await?;
    assert_eq!(item["name"], "Hoe");
    assert_eq!(item["description"], "Good for weeds");
    assert_eq!(item["price"], json!(12.5));
    assert_eq!(item["rating"], json!(4.0));
    assert!(item.get("mainImage").is_none());

    let id = item["_id"].as_str().expect("assigned id");
    let items = list(&server).await?;
    assert_eq!(items.iter().filter(|i| i["_id"] == id).count(), 1);
    assert_eq!(items.len(), 6);
    Ok(())
}

#[tokio::test]
async fn create_accepts_multipart_text_fields() -> TestResult {
    let server = spawn_server(false).await?;
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .multipart(hoe_form())
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let item: Value = resp.json().await?;
    assert_eq!(item["price"], json!(12.5));
    assert!(item.get("mainImage").is_none());
    assert_eq!(server.store.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn create_accepts_urlencoded_forms() -> TestResult {
    let server = spawn_server(false).await?;
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .form(&[("name", "Hoe"), ("description", "Good for weeds"), ("price", "3"), ("rating", "1")])
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(server.store.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn short_text_fields_are_rejected_with_plain_text() -> TestResult {
    let server = spawn_server(true).await?;
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .json(&json!({"name": "Ax", "description": "no", "price": 5, "rating": 3}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp.headers()["content-type"].to_str()?.to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(resp.text().await?, "\"name\" length must be at least 3 characters long");

    let resp = server
        .client
        .post(server.url("/api/houses"))
        .json(&json!({"name": "Axe", "description": "no", "price": 5, "rating": 3}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await?,
        "\"description\" length must be at least 3 characters long"
    );
    assert_eq!(server.store.len().await, 5);
    Ok(())
}

#[tokio::test]
async fn negative_numbers_never_reach_the_store() -> TestResult {
    let server = spawn_server(true).await?;
    for body in [
        json!({"name": "Hoe", "description": "Good for weeds", "price": -0.01, "rating": 4}),
        json!({"name": "Hoe", "description": "Good for weeds", "price": 1, "rating": -1}),
    ] {
        let resp = server.client.post(server.url("/api/houses")).json(&body).send().await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = server.client.put(server.url("/api/houses/1")).json(&body).send().await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(server.store.len().await, 5);

    let mower: Value = server.client.get(server.url("/api/houses/1")).send().await?.json().await?;
    assert_eq!(mower["name"], "Mower");
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_reported_one_at_a_time() -> TestResult {
    let server = spawn_server(false).await?;
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .json(&json!({"name": "Hoe", "description": "Good for weeds"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await?, "\"price\" is required");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> TestResult {
    let server = spawn_server(false).await?;
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await?.starts_with("Invalid JSON body"));
    Ok(())
}

#[tokio::test]
async fn delete_unknown_id_is_404_and_changes_nothing() -> TestResult {
    let server = spawn_server(true).await?;
    let resp = server.client.delete(server.url("/api/houses/does-not-exist")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.text().await?, "The house with the given id was not found");
    assert_eq!(list(&server).await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_404_and_creates_nothing() -> TestResult {
    let server = spawn_server(true).await?;
    let resp = server
        .client
        .put(server.url("/api/houses/42"))
        .json(&json!({"name": "Hoe", "description": "Good for weeds", "price": 1, "rating": 1}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(list(&server).await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn update_replaces_fields_and_delete_returns_the_item() -> TestResult {
    let server = spawn_server(true).await?;
    let resp = server
        .client
        .put(server.url("/api/houses/2"))
        .json(&json!({"_id": "ignored", "name": "Leaf Rake", "description": "Wide tines", "price": "11", "rating": 5}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await?;
    assert_eq!(updated["_id"], "2");
    assert_eq!(updated["name"], "Leaf Rake");
    assert_eq!(updated["price"], json!(11.0));
    // Fixture image references are not part of the replaced fields.
    assert_eq!(updated["img1"], "images/rake.png");

    let resp = server.client.delete(server.url("/api/houses/2")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Value = resp.json().await?;
    assert_eq!(deleted, updated);

    let resp = server.client.get(server.url("/api/houses/2")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(list(&server).await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn plants_fixture_is_unaffected_by_house_mutations() -> TestResult {
    let server = spawn_server(true).await?;
    let before: Value = server.client.get(server.url("/api/plants")).send().await?.json().await?;
    assert_eq!(before.as_array().map(Vec::len), Some(4));
    assert_eq!(before[0]["name"], "Mulch");
    assert_eq!(before[3]["name"], "Flowers");

    server.client.delete(server.url("/api/houses/1")).send().await?;
    server
        .client
        .post(server.url("/api/houses"))
        .json(&json!({"name": "Hoe", "description": "Good for weeds", "price": 1, "rating": 1}))
        .send()
        .await?;

    let after: Value = server.client.get(server.url("/api/plants")).send().await?.json().await?;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn uploaded_image_is_stored_and_served() -> TestResult {
    let server = spawn_server(false).await?;
    let png = b"\x89PNG fake image bytes";
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .multipart(hoe_form().part("image", image_part("hoe.png", png)))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let item: Value = resp.json().await?;
    assert_eq!(item["mainImage"], "hoe.png");

    assert_eq!(std::fs::read(server.upload_dir().join("hoe.png"))?, png);

    let served = server.client.get(server.url("/images/hoe.png")).send().await?;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await?.as_ref(), png);
    Ok(())
}

#[tokio::test]
async fn update_without_file_keeps_the_existing_image() -> TestResult {
    let server = spawn_server(false).await?;
    let created: Value = server
        .client
        .post(server.url("/api/houses"))
        .multipart(hoe_form().part("image", image_part("hoe.png", b"one")))
        .send()
        .await?
        .json()
        .await?;
    let id = created["_id"].as_str().expect("id").to_string();

    let kept: Value = server
        .client
        .put(server.url(&format!("/api/houses/{}", id)))
        .multipart(hoe_form())
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(kept["mainImage"], "hoe.png");

    let replaced: Value = server
        .client
        .put(server.url(&format!("/api/houses/{}", id)))
        .multipart(hoe_form().part("image", image_part("hoe-v2.png", b"two")))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(replaced["mainImage"], "hoe-v2.png");
    Ok(())
}

#[tokio::test]
async fn same_filename_overwrites_the_earlier_upload() -> TestResult {
    // Known behavior: uploads are stored under the client filename with no collision handling.
    let server = spawn_server(false).await?;
    for bytes in [b"first".as_slice(), b"second".as_slice()] {
        let resp = server
            .client
            .post(server.url("/api/houses"))
            .multipart(hoe_form().part("image", image_part("shared.png", bytes)))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let items = list(&server).await?;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["mainImage"] == "shared.png"));
    assert_eq!(std::fs::read(server.upload_dir().join("shared.png"))?, b"second");
    Ok(())
}

#[tokio::test]
async fn invalid_create_still_leaves_the_uploaded_file() -> TestResult {
    // Known behavior: the upload happens before validation.
    let server = spawn_server(false).await?;
    let form = Form::new()
        .percent_encode_noop()
        .text("name", "Ax")
        .text("description", "no")
        .text("price", "5")
        .text("rating", "3")
        .part("image", image_part("orphan.png", b"orphan"));
    let resp = server.client.post(server.url("/api/houses")).multipart(form).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(server.store.is_empty().await);
    assert!(server.upload_dir().join("orphan.png").is_file());
    Ok(())
}

#[tokio::test]
async fn failed_image_write_is_a_generic_500_and_stores_nothing() -> TestResult {
    let server = spawn_server(true).await?;
    // A directory in the way makes the write fail on the server side.
    std::fs::create_dir(server.upload_dir().join("x.png"))?;

    let form = hoe_form().part("image", image_part("x.png", b"png"));
    let resp = server.client.post(server.url("/api/houses")).multipart(form).send().await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text().await?, "Internal server error");
    assert_eq!(server.store.len().await, 5);

    let form = hoe_form().part("image", image_part("x.png", b"png"));
    let resp = server.client.put(server.url("/api/houses/1")).multipart(form).send().await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let mower: Value = server.client.get(server.url("/api/houses/1")).send().await?.json().await?;
    assert_eq!(mower["name"], "Mower");
    Ok(())
}

#[tokio::test]
async fn client_paths_are_reduced_to_the_file_name() -> TestResult {
    let server = spawn_server(false).await?;
    let resp = server
        .client
        .post(server.url("/api/houses"))
        .multipart(hoe_form().part("image", image_part("../../escape.png", b"x")))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let item: Value = resp.json().await?;
    assert_eq!(item["mainImage"], "escape.png");
    assert!(server.upload_dir().join("escape.png").is_file());
    Ok(())
}

#[tokio::test]
async fn more_than_one_image_is_rejected() -> TestResult {
    let server = spawn_server(false).await?;
    let form = hoe_form()
        .part("image", image_part("a.png", b"a"))
        .part("image", image_part("b.png", b"b"));
    let resp = server.client.post(server.url("/api/houses")).multipart(form).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await?, "only one image may be attached");

    let form = hoe_form().part("img", image_part("a.png", b"a"));
    let resp = server.client.post(server.url("/api/houses")).multipart(form).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn empty_file_input_counts_as_no_image() -> TestResult {
    let server = spawn_server(false).await?;
    let form = hoe_form().part("image", Part::bytes(Vec::new()).file_name(""));
    let resp = server.client.post(server.url("/api/houses")).multipart(form).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let item: Value = resp.json().await?;
    assert!(item.get("mainImage").is_none());
    Ok(())
}

#[tokio::test]
async fn index_and_health_are_served() -> TestResult {
    let server = spawn_server(true).await?;
    let resp = server.client.get(server.url("/")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await?, INDEX_HTML);

    let health: Value = server.client.get(server.url("/health")).send().await?.json().await?;
    assert_eq!(health["success"], true);
    assert_eq!(health["data"]["status"], "ok");
    Ok(())
}
