use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let block = state.coordinator.snapshot();
    let (miners, total_distributed) = state.coordinator.totals();
    let connected_sessions = state.coordinator.hub().len();

    HttpResponse::Ok().json(StatsResponse {
        block_number: block.number,
        target: block.target,
        reward: block.reward,
        miners,
        total_distributed,
        connected_sessions,
        started_at: state.started_at,
        uptime_secs: (Utc::now().timestamp() - state.started_at).max(0),
    })
}
