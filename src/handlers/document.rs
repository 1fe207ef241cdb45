use std::collections::BTreeMap;

use actix_web::http::header::DispositionType;
use actix_web::web::{self, Either};
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::employee;
use crate::errors::AppError;
use crate::models::document::{DocumentLink, DocumentSlot};
use crate::utils::files::{self, StoredFile};
use crate::utils::urls::UploadUrls;
use crate::AppState;

#[derive(Deserialize)]
pub struct DocumentsRequest {
    #[serde(rename = "empEmail", default)]
    emp_email: Option<String>,
}

#[derive(Serialize)]
struct DocumentsResponse {
    documents: BTreeMap<&'static str, DocumentLink>,
}

/// Lists the documents on record for an email whose files are still on disk.
pub async fn get_documents(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Either<web::Json<DocumentsRequest>, web::Form<DocumentsRequest>>,
) -> Result<HttpResponse, AppError> {
    let body = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let email = body
        .emp_email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AppError::BadRequest("Employee email is required".to_string()))?;
    let urls = UploadUrls::from_request(&req)?;

    let mut conn = state.db.acquire().await?;
    let employee = employee::find_by_email(&mut conn, email)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    drop(conn);

    let mut documents = BTreeMap::new();
    for slot in DocumentSlot::ALL {
        let Some(filename) = slot.stored_on(&employee) else {
            continue;
        };
        if files::is_present(&state.upload_dir, filename).await {
            documents.insert(
                slot.field_name(),
                DocumentLink {
                    url: urls.for_file(filename),
                    name: slot.label(),
                    filename: filename.to_string(),
                },
            );
        }
    }

    Ok(HttpResponse::Ok().json(DocumentsResponse { documents }))
}

// Any caller holding a stored filename can fetch it; there is no per-record ownership check.
pub async fn download_file(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filename = filename.into_inner();
    let stored = StoredFile::open(&state.upload_dir, &filename).await?;
    Ok(stored.into_response(DispositionType::Attachment, &filename))
}

pub async fn serve_upload(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filename = filename.into_inner();
    let stored = StoredFile::open(&state.upload_dir, &filename).await?;
    Ok(stored.into_response(DispositionType::Inline, &filename))
}
