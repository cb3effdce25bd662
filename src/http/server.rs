//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, locale)
//! - Bind server to listener
//! - Serve robots.txt, sitemap.xml and a health probe
//! - Dispatch localized pages to the upstream renderer

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_config, ConfigError, GatewayConfig, ValidationError};
use crate::http::middleware::{locale_middleware, LocaleContext};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::response::PageContext;
use crate::http::upstream::Upstream;
use crate::locale::{LocaleRegistry, UrlLocalizer};
use crate::routing::{AnyMatcher, LocaleResolver};
use crate::seo::{render_robots, render_sitemap};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub localizer: Arc<UrlLocalizer>,
    pub resolver: Arc<LocaleResolver>,
    pub upstream: Option<Upstream>,
    pub redirect_status: StatusCode,
}

impl AppState {
    /// Validate the configuration and build every per-process component.
    pub fn from_config(config: GatewayConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let registry = LocaleRegistry::from_config(&config.locales)
            .map_err(|e| ConfigError::Validation(vec![e.into()]))?;
        let localizer = Arc::new(UrlLocalizer::new(Arc::new(registry), &config.site.url));
        let resolver = Arc::new(LocaleResolver::new(
            localizer.clone(),
            AnyMatcher::from_config(&config.exclusions),
        ));

        let upstream = match config.upstream.address.as_deref() {
            Some(address) => Some(Upstream::new(address).map_err(|_| {
                ConfigError::Validation(vec![ValidationError::InvalidUpstreamAddress(address.to_string())])
            })?),
            None => None,
        };

        let redirect_status =
            StatusCode::from_u16(config.redirect.status).unwrap_or(StatusCode::TEMPORARY_REDIRECT);

        Ok(Self {
            config: Arc::new(config),
            localizer,
            resolver,
            upstream,
            redirect_status,
        })
    }
}

/// HTTP server for the locale gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let state = AppState::from_config(config)?;
        let router = Self::build_router(&state);
        Ok(Self {
            router,
            config: state.config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: &AppState) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .route("/robots.txt", get(robots_handler))
            .route("/sitemap.xml", get(sitemap_handler))
            .fallback(page_handler)
            .layer(middleware::from_fn_with_state(state.clone(), locale_middleware))
            .with_state(state.clone())
            .layer(TimeoutLayer::new(Duration::from_secs(state.config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            locales = self.config.locales.supported.len(),
            default_locale = %self.config.locales.default,
            upstream = ?self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn robots_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.config.seo.robots, state.localizer.site_url()),
    )
}

async fn sitemap_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&state.localizer, &state.config.seo.sitemap.pages),
    )
}

/// Everything not served by the gateway itself.
async fn page_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    if let Some(upstream) = &state.upstream {
        return upstream.forward(req).await;
    }

    match req.extensions().get::<LocaleContext>() {
        Some(context) => Json(PageContext::new(&state.localizer, context)).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
