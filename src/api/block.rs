use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, BlockResponse};

/// Current block open for mining.
#[get("/block/")]
pub async fn get_block(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(BlockResponse::from(state.coordinator.snapshot()))
}
