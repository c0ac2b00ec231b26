//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the two host endpoints and stitches them with Leptos SSR rendering
//! under a single Axum router. The SSR render gets the configured backend
//! as an `ApiConfig` context, which the shell publishes in a meta tag for
//! the hydrated client.


use std::path::PathBuf;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use logbook_client::app::{App, shell};
use logbook_client::util::config::ApiConfig;
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, HostConfig};

/// Body of `GET /config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    pub api_url: String,
}

impl From<&HostConfig> for ClientConfig {
    fn from(config: &HostConfig) -> Self {
        Self { api_url: config.api_url.clone() }
    }
}

/// Host endpoints that do not render the app.
pub fn api_routes(config: &HostConfig) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/config.json", get(client_config))
        .layer(cors)
        .with_state(ClientConfig::from(config))
}

/// API routes + Leptos SSR + the compiled client bundle under `/pkg`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn app(config: &HostConfig) -> Result<Router, ConfigError> {
    let conf = get_configuration(None).map_err(|e| ConfigError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let api_config = ApiConfig::new(&config.api_url);
    let leptos_router = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || provide_context(api_config.clone()),
            {
                let opts = leptos_options.clone();
                move || shell(opts.clone())
            },
        )
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(config)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn client_config(State(config): State<ClientConfig>) -> Json<ClientConfig> {
    Json(config)
}
