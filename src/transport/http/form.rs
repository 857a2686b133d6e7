//! Body extraction for create/update requests.
//!
//! Browsers post `multipart/form-data` (text fields plus an optional `image` file part);
//! scripted clients may send JSON or a urlencoded form instead.

use crate::app::catalog_service::HouseSubmission;
use crate::app::error::CatalogError;
use crate::domain::model::CandidateFields;
use crate::infra::uploads::{ImageUpload, UploadError, IMAGE_FIELD};
use crate::transport::http::handlers::common::bad_request;
use axum::async_trait;
use axum::extract::multipart::MultipartError;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub struct HouseForm(pub HouseSubmission);

#[async_trait]
impl<S> FromRequest<S> for HouseForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return read_multipart(multipart).await.map(HouseForm);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| bad_request(format!("Invalid form body: {}", e.body_text())))?;
            let mut submission = HouseSubmission::default();
            for (name, value) in pairs {
                submission.fields.set_text(&name, value);
            }
            return Ok(HouseForm(submission));
        }

        let Json(fields) = Json::<CandidateFields>::from_request(req, state)
            .await
            .map_err(|e| bad_request(format!("Invalid JSON body: {}", e.body_text())))?;
        Ok(HouseForm(HouseSubmission { fields, image: None }))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<HouseSubmission, Response> {
    let mut submission = HouseSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // An untouched file input still submits an empty, nameless part.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                if name != IMAGE_FIELD {
                    return Err(CatalogError::from(UploadError::UnexpectedField(name)).into_response());
                }
                if submission.image.is_some() {
                    return Err(CatalogError::from(UploadError::TooManyFiles).into_response());
                }
                submission.image = Some(ImageUpload { file_name, bytes });
            }
            None => {
                let value = field.text().await.map_err(multipart_error)?;
                submission.fields.set_text(&name, value);
            }
        }
    }

    Ok(submission)
}

fn multipart_error(e: MultipartError) -> Response {
    (e.status(), format!("Invalid multipart body: {}", e.body_text())).into_response()
}
