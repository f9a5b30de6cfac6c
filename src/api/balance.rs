use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, BalanceResponse, LeaderboardQuery, LeaderboardResponse};
use crate::mining::{LEADERBOARD_DEFAULT, LEADERBOARD_MAX};

#[get("/balance/{miner}/")]
pub async fn get_balance(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let miner = path.into_inner().0;
    let balance = state.coordinator.balance(&miner);
    HttpResponse::Ok().json(BalanceResponse { miner, balance })
}

/// Richest miners first.
#[get("/leaderboard/")]
pub async fn get_leaderboard(
    state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(LEADERBOARD_DEFAULT)
        .min(LEADERBOARD_MAX);
    HttpResponse::Ok().json(LeaderboardResponse {
        miners: state.coordinator.leaderboard(limit),
    })
}
