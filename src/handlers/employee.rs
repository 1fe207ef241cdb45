use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use log::{info, warn};
use serde::Serialize;

use crate::db::employee;
use crate::errors::AppError;
use crate::models::employee::{EmployeeWithUrls, NewEmployee};
use crate::utils::upload::{self, Submission, UploadBatch};
use crate::utils::urls::UploadUrls;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveEmployeeResponse {
    success: bool,
    employee_id: i32,
}

pub async fn save_employee(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let Submission { fields, uploads } = upload::receive(payload, &state.upload_dir).await?;

    match persist(&state, &fields, &uploads).await {
        Ok(employee_id) => {
            info!(
                "Saved employee {} with {} document(s)",
                employee_id,
                uploads.documents().len()
            );
            Ok(HttpResponse::Created().json(SaveEmployeeResponse {
                success: true,
                employee_id,
            }))
        }
        Err(err) => {
            warn!("Save employee error: {}", err);
            uploads.discard().await;
            Err(err)
        }
    }
}

async fn persist(
    state: &AppState,
    fields: &HashMap<String, String>,
    uploads: &UploadBatch,
) -> Result<i32, AppError> {
    let new_employee = NewEmployee::from_form(fields, uploads.documents().clone())?;
    let mut conn = state.db.acquire().await?;
    let employee_id = employee::insert(&mut conn, &new_employee).await?;
    Ok(employee_id)
}

pub async fn get_employees(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let urls = UploadUrls::from_request(&req)?;

    let mut conn = state.db.acquire().await?;
    let employees = employee::list(&mut conn).await?;

    let body: Vec<EmployeeWithUrls> = employees
        .into_iter()
        .map(|e| EmployeeWithUrls::new(e, |name| urls.for_file(name)))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

pub async fn get_employee(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let urls = UploadUrls::from_request(&req)?;
    let id = id.into_inner();

    let mut conn = state.db.acquire().await?;
    let employee = employee::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(EmployeeWithUrls::new(employee, |name| urls.for_file(name))))
}
