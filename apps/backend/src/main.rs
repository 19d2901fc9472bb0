use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use belote_backend::ai::heuristic::HeuristicBot;
use belote_backend::repos::users::InMemoryUserRepo;
use belote_backend::routes;
use belote_backend::services::{GameFlowService, MatchmakingService};
use belote_backend::state::app_state::AppState;
use belote_backend::state::security_config::SecurityConfig;
use belote_backend::store::SessionStore;
use belote_backend::ws::hub::GameHub;
use belote_backend::AppConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via compose env_file or docker run --env-file
    // - Local dev: source env files manually (e.g. set -a; . ./.env; set +a)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let store = match SessionStore::connect(&config.redis_url).await {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to connect to the session store: {err}");
            std::process::exit(1);
        }
    };

    let security = SecurityConfig::new(config.jwt_secret.as_bytes());
    let hub = Arc::new(GameHub::new());
    let games = Arc::new(belote_backend::repos::games::InMemoryGameRepo::new());
    let users = Arc::new(InMemoryUserRepo::new());
    let bot = Arc::new(HeuristicBot::new());

    let game_flow = Arc::new(GameFlowService::new(
        store.clone(),
        hub.clone(),
        games,
        bot,
        config.turn_timeout,
    ));
    let matchmaking = Arc::new(MatchmakingService::new(
        store.clone(),
        users,
        game_flow.clone(),
    ));

    let app_state = AppState::new(store, hub, game_flow, matchmaking, security);
    let data = web::Data::new(app_state);

    tracing::info!(host = %config.host, port = config.port, "starting belote backend");

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
