use actix_web::web;

pub mod game;
pub mod health;
pub mod realtime;

/// Register every route. `main.rs` adds the middleware stack around this;
/// tests call it directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Game document and seat actions: /api/game/**
    cfg.service(web::scope("/api/game").configure(game::configure_routes));

    // Realtime: /api/ws?color=blue|green
    cfg.service(web::scope("/api/ws").configure(realtime::configure_routes));
}
