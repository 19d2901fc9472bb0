use actix_web::web;

pub mod health;
pub mod realtime;

/// Configure application routes. The websocket is the primary surface;
/// HTTP is limited to health checks and the socket upgrade itself.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Realtime routes: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
