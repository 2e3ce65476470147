//! HTTP handlers and route configuration.

mod health;
mod trips;

use actix_web::web;

use crate::middleware::error::json_config;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/trips", web::post().to(trips::create_trip));
}
