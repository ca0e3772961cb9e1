use std::sync::Arc;
use axum::{Extension, Router};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use minijinja::{context, Environment};
use tracing::warn;
use crate::controller::AppState;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route_layer(Extension(app_state.templates))
}

pub async fn index(
    Extension(templates): Extension<Arc<Environment<'static>>>,
) -> impl IntoResponse {
    let render_res = templates
        .get_template("index.html")
        .and_then(|template| template.render(context! {}));

    return match render_res {
        Ok(page) => {
            Html(page).into_response()
        }
        Err(e) => {
            warn!("Something went wrong rendering the homepage due to: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render the homepage").into_response()
        }
    };
}
