use std::any::Any;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{API_KEY_VAR, Config};
use crate::error::AppError;
use crate::openai::{OpenAiClient, TextGenerator};
use crate::routes::create_routes;

/// Inbound bodies above this size are rejected with 413
pub const BODY_LIMIT: usize = 200 * 1024;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no API key is configured
    pub generator: Option<Arc<dyn TextGenerator>>,
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "packing_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create the application from configuration, wiring in the OpenAI client
pub async fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let generator = OpenAiClient::from_config(&config.openai, http)
        .map(|client| Arc::new(client) as Arc<dyn TextGenerator>);
    if generator.is_none() {
        warn!(
            "{} is not set; suggestion requests will fail until it is configured",
            API_KEY_VAR
        );
    }

    build_router(AppState {
        config: Arc::new(config),
        generator,
    })
}

/// Attach routes and middleware to an already assembled state
pub fn build_router(state: AppState) -> Result<Router, anyhow::Error> {
    let origin = HeaderValue::from_str(&state.config.allow_origin)
        .with_context(|| format!("Invalid CORS origin {:?}", state.config.allow_origin))?;

    Ok(Router::new()
        .merge(create_routes())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(origin, cors_middleware))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state))
}

/// Stamps the cross-origin headers on every response and answers
/// preflight `OPTIONS` requests directly
pub async fn cors_middleware(
    State(origin): State<HeaderValue>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::InternalServerError(detail).into_response()
}
