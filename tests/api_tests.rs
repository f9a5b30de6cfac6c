use actix_web::{App, test, web};

use mining_sim::api::models::{BalanceResponse, BlockResponse, LeaderboardResponse, StatsResponse};
use mining_sim::api::{self, AppState};
use mining_sim::config::Config;

fn state() -> web::Data<AppState> {
    let config = Config {
        initial_target: "00".to_string(),
        reward: 3,
        ..Config::default()
    };
    web::Data::new(AppState::new(&config))
}

#[actix_web::test]
async fn health_is_ok() {
    let app = test::init_service(App::new().app_data(state()).configure(api::init_routes)).await;
    let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn block_reflects_snapshot() {
    let data = state();
    let app = test::init_service(App::new().app_data(data.clone()).configure(api::init_routes)).await;

    data.coordinator.submit_solution("alice", "00aa").unwrap();

    let req = test::TestRequest::get().uri("/api/v1/block/").to_request();
    let body: BlockResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.block_number, 2);
    assert_eq!(body.target, "00");
    assert_eq!(body.reward, 3);
    assert_eq!(body.hash, data.coordinator.snapshot().hash);
}

#[actix_web::test]
async fn balances_and_leaderboard() {
    let data = state();
    let app = test::init_service(App::new().app_data(data.clone()).configure(api::init_routes)).await;

    for miner in ["bob", "alice", "alice"] {
        data.coordinator.submit_solution(miner, "00").unwrap();
    }

    let req = test::TestRequest::get().uri("/api/v1/balance/alice/").to_request();
    let body: BalanceResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.balance, 6);

    let req = test::TestRequest::get().uri("/api/v1/balance/nobody/").to_request();
    let body: BalanceResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.balance, 0);

    let req = test::TestRequest::get().uri("/api/v1/leaderboard/?limit=1").to_request();
    let body: LeaderboardResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.miners.len(), 1);
    assert_eq!(body.miners[0].miner, "alice");
}

#[actix_web::test]
async fn stats_counts_distribution() {
    let data = state();
    let app = test::init_service(App::new().app_data(data.clone()).configure(api::init_routes)).await;

    data.coordinator.submit_solution("alice", "00").unwrap();
    data.coordinator.submit_solution("bob", "001").unwrap();
    let (_id, _rx) = data.coordinator.join();

    let req = test::TestRequest::get().uri("/api/v1/stats/").to_request();
    let body: StatsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.block_number, 3);
    assert_eq!(body.miners, 2);
    assert_eq!(body.total_distributed, 6);
    assert_eq!(body.connected_sessions, 1);
    assert!(body.uptime_secs >= 0);
}
