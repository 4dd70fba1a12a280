use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_user::delete_user;
use super::handlers::register::register;
use super::handlers::token::request_access_token;
use super::metrics::OperationCounters;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::service::UserService;
use crate::user::ports::UserRepository;

pub struct AppState<R: UserRepository> {
    pub identity_service: Arc<UserService<R>>,
    pub token_issuer: Arc<TokenIssuer>,
    pub counters: Arc<OperationCounters>,
}

// Manual impl: R itself is not Clone, only the Arcs are
impl<R: UserRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            identity_service: Arc::clone(&self.identity_service),
            token_issuer: Arc::clone(&self.token_issuer),
            counters: Arc::clone(&self.counters),
        }
    }
}

pub fn create_router<R: UserRepository>(
    identity_service: Arc<UserService<R>>,
    token_issuer: Arc<TokenIssuer>,
) -> Router {
    let state = AppState {
        identity_service,
        token_issuer,
        counters: Arc::new(OperationCounters::default()),
    };

    let public_routes = Router::new()
        .route("/register", post(register::<R>))
        .route("/oauth/token", post(request_access_token::<R>));

    // Token verification happens in the middleware; handlers only ever see
    // already-validated claims
    let protected_routes = Router::new()
        .route("/users/:user_id/delete", post(delete_user::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<R>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
