use actix_web::{web, HttpResponse};

use crate::AppState;

pub async fn pool_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.db.status())
}
