use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use minijinja::Environment;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use crate::clients::google_places::GooglePlacesClient;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;

pub mod health_check;
pub mod home_controller;
pub mod restaurant_controller;

#[derive(Clone)]
pub struct AppState {
    pub places_client: Arc<GooglePlacesClient>,
    pub templates: Arc<Environment<'static>>,
}

pub async fn serve(
    config: &Config,
) -> anyhow::Result<()> {
    let app_state = AppState {
        places_client: Arc::new(GooglePlacesClient::new(
            reqwest::Client::new(),
            config.google_api_key.clone(),
        )),
        templates: Arc::new(template_environment()?),
    };

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(config)?)
        )
        .fallback(page_not_found_handler);

    let port = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("API server listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    Router::new()
        .merge(home_controller::router(app_state.clone()))
        .nest("/restaurants", restaurant_controller::router(app_state))
        .merge(health_check::router())
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let layer = match &config.origin_urls {
        Some(origin_urls) => {
            let origins = origin_urls
                .split(',')
                .map(|s| s.trim().parse())
                .collect::<Result<Vec<HeaderValue>, _>>()
                .context("Invalid origin in ORIGIN_URLS")?;

            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(origins)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_credentials(true)
        }
        None => CorsLayer::new()
            .allow_methods(Any)
            .allow_origin(Any)
            .allow_headers(Any),
    };

    Ok(layer)
}

fn template_environment() -> anyhow::Result<Environment<'static>> {
    let mut environment = Environment::new();
    environment
        .add_template("index.html", include_str!("../../templates/index.html"))
        .context("Failed to register the homepage template")?;

    Ok(environment)
}
