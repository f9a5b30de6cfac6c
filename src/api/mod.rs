mod balance;
mod block;
mod health;
pub mod models;
mod stats;
pub mod ws;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(ws::ws_connect).service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(block::get_block)
            .service(balance::get_balance)
            .service(balance::get_leaderboard)
            .service(stats::get_stats),
    );
}
