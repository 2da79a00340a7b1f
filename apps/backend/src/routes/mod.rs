use actix_web::web;

use crate::error::AppError;

pub mod account;
pub mod auth;
pub mod clubs;
pub mod users;

/// Public (ungated) routes. Gated scopes are wired in `main` so the
/// `AuthGate` wrap stays visible at the top level.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .configure(auth::configure_routes);
}

/// JSON extractor config that keeps body-parse failures on the same error
/// envelope as everything else.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request("INVALID_JSON", format!("Invalid request body: {err}")).into()
    })
}
