use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let now = OffsetDateTime::now_utc();
    let time = now
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (store, store_error) = match app_state.store().ping().await {
        Ok(()) => ("up".to_string(), None),
        Err(err) => ("down".to_string(), Some(err.to_string())),
    };

    let status = if store_error.is_none() { "ok" } else { "degraded" };
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        app_version,
        store,
        store_error,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(health)));
}
