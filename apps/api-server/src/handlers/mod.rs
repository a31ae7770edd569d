//! HTTP handlers and route configuration.

mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/v1/posts")
                        .route("", web::post().to(posts::save))
                        .route("", web::get().to(posts::list))
                        .route("/{id}", web::get().to(posts::find_by_id))
                        .route("/{id}", web::put().to(posts::update)),
                ),
        );
}
