//! HTTP handlers and route configuration.

mod accounts;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Read-only post API
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("/", web::get().to(posts::list_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}/", web::get().to(posts::get_post)),
            )
            // Accounts and email verification
            .service(
                web::scope("/accounts")
                    .route("", web::post().to(accounts::register))
                    .route("/verify/{token}", web::get().to(accounts::verify)),
            ),
    );
}
