use crate::presentation::auth::auth_router;
use crate::presentation::handlers::{json_config, root};
use actix_cors::Cors;
use actix_web::web;

/// Front-end origins allowed to call the API from a browser.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Cross-origin policy: the local front-end origins only, any method and
/// header, credentials allowed.
pub fn cors() -> Cors {
    ALLOWED_ORIGINS
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

/// Registers the liveness route and the auth router. Shared state is
/// attached by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(root))
        .configure(auth_router);
}
