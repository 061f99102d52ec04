use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::BugsConfig;
use crate::domain::service::Service;

use super::error::{
    Responder, enforce_timeout, panic_response, respond_errors, route_not_found,
};
use super::{handlers, openapi};

/// Build the complete router of the bugs API.
///
/// Layer order, outermost first: error responder, request timeout (when
/// configured), panic catcher, service extension. Unknown paths and
/// unsupported methods fall through to a `NotFound` envelope.
pub fn router(service: Arc<Service>, config: &BugsConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::api_status))
        .route(
            "/api/bugs",
            get(handlers::list_bugs).post(handlers::create_bug),
        )
        .route(
            "/api/bugs/{id}",
            get(handlers::get_bug)
                .put(handlers::update_bug)
                .delete(handlers::delete_bug),
        );

    if config.enable_docs {
        router = router.route("/api/openapi.json", get(openapi::openapi_json));
    }

    let responder = Responder {
        expose_stack: config.expose_error_stack,
    };

    router = router
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(Extension(service))
        .layer(CatchPanicLayer::custom(panic_response));

    if config.request_timeout_secs > 0 {
        let limit = Duration::from_secs(config.request_timeout_secs);
        router = router.layer(middleware::from_fn_with_state(limit, enforce_timeout));
    }

    router.layer(middleware::from_fn_with_state(responder, respond_errors))
}
