use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::verify::verify;
use super::middleware::authenticate as auth_middleware;
use crate::session::ports::SessionServicePort;

pub struct AppState<SS: SessionServicePort> {
    pub session_service: Arc<SS>,
}

impl<SS: SessionServicePort> AppState<SS> {
    pub fn new(session_service: Arc<SS>) -> Self {
        Self { session_service }
    }
}

impl<SS: SessionServicePort> Clone for AppState<SS> {
    fn clone(&self) -> Self {
        Self {
            session_service: Arc::clone(&self.session_service),
        }
    }
}

pub fn create_router<SS: SessionServicePort>(session_service: Arc<SS>) -> Router {
    let state = AppState::new(session_service);

    let public_routes = Router::new()
        .route("/api/login", post(login::<SS>))
        .route("/api/logout", post(logout::<SS>));

    let protected_routes = Router::new()
        .route("/api/verify", get(verify))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<SS>,
        ));

    // Headers are not recorded: they carry bearer tokens.
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
        .with_state(state)
}
