use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use mining_sim::api::{self, AppState};
use mining_sim::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    let state = web::Data::new(AppState::new(&config));

    let block = state.coordinator.snapshot();
    info!(
        "⛏️ Starting mining coordinator at http://{}:{} (ws at /ws)",
        config.host, config.port
    );
    info!(
        "block #{} target={:?} reward={}",
        block.number, block.target, block.reward
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
