use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::clients::google_places::GooglePlacesClient;
use crate::controller::AppState;
use crate::models::restaurant::{filter_and_rank, Restaurant, SearchFilters};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/:location", get(search_restaurants))
        .route_layer(Extension(app_state.places_client))
}

fn default_min_rating() -> f64 {
    0.0
}

fn default_limit() -> usize {
    10
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RestaurantSearchQuery {
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    pub max_price: Option<u8>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl RestaurantSearchQuery {
    /// Checks the declared ranges before anything leaves the process.
    fn validate(&self) -> Result<SearchFilters, &'static str> {
        if !(0.0..=5.0).contains(&self.min_rating) {
            return Err("min_rating must lie within [0.0, 5.0]");
        }
        if let Some(max_price) = self.max_price {
            if max_price > 4 {
                return Err("max_price must lie within [0, 4]");
            }
        }
        if self.limit < 1 {
            return Err("limit must be at least 1");
        }

        Ok(SearchFilters {
            min_rating: self.min_rating,
            max_price: self.max_price,
            limit: self.limit,
        })
    }
}

pub async fn search_restaurants(
    Extension(places_client): Extension<Arc<GooglePlacesClient>>,
    Path(location): Path<String>,
    Query(query): Query<RestaurantSearchQuery>,
) -> impl IntoResponse {
    let filters = match query.validate() {
        Ok(filters) => filters,
        Err(reason) => {
            return (StatusCode::BAD_REQUEST, reason).into_response();
        }
    };

    let places_res = places_client
        .search_restaurants(
            &location
        ).await;

    return match places_res {
        Ok(places) => {
            let restaurants: Vec<Restaurant> = places
                .into_iter()
                .map(Restaurant::from)
                .collect();
            let restaurants = filter_and_rank(restaurants, &filters);

            (StatusCode::OK, Json(restaurants)).into_response()
        }
        Err(e) => {
            warn!("Something went wrong fetching restaurants from Google Places due to: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch restaurants").into_response()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::Request;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    fn query(value: serde_json::Value) -> RestaurantSearchQuery {
        serde_json::from_value(value).unwrap()
    }

    fn test_state(base_url: String) -> AppState {
        AppState {
            places_client: Arc::new(GooglePlacesClient::with_base_url(
                reqwest::Client::new(),
                "test-key".to_string(),
                base_url,
            )),
            templates: Arc::new(crate::controller::template_environment().unwrap()),
        }
    }

    /// Binds a loopback socket that answers the next request with a canned
    /// 200 response carrying the given body, and returns its base url.
    async fn canned_provider(body: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });

        format!("http://{}", address)
    }

    #[tokio::test]
    async fn search_responds_with_a_json_array_ties_in_provider_order() {
        let provider = canned_provider(
            json!({
                "results": [
                    { "name": "A", "rating": 4.5, "place_id": "1", "formatted_address": "x" },
                    { "name": "B", "rating": 4.5, "place_id": "2", "formatted_address": "y" }
                ]
            })
            .to_string(),
        )
        .await;

        let app = router(test_state(provider));
        let response = app
            .oneshot(
                Request::get("/Chennai?min_rating=4.0&limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let restaurants: Vec<Restaurant> = serde_json::from_slice(&body).unwrap();
        let names: Vec<&str> = restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn provider_failure_maps_to_a_generic_internal_error() {
        // Nothing listens on the discard port, the outbound call fails.
        let app = router(test_state("http://127.0.0.1:9/places".to_string()));
        let response = app
            .oneshot(Request::get("/Chennai").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], b"Failed to fetch restaurants");
    }

    #[test]
    fn omitted_parameters_fall_back_to_defaults() {
        let q = query(json!({}));

        assert_eq!(q.min_rating, 0.0);
        assert!(q.max_price.is_none());
        assert_eq!(q.limit, 10);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn min_rating_above_five_is_rejected() {
        let q = query(json!({ "min_rating": 5.1 }));

        assert!(q.validate().is_err());
    }

    #[test]
    fn negative_min_rating_is_rejected() {
        let q = query(json!({ "min_rating": -0.5 }));

        assert!(q.validate().is_err());
    }

    #[test]
    fn max_price_above_four_is_rejected() {
        let q = query(json!({ "max_price": 5 }));

        assert!(q.validate().is_err());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let q = query(json!({ "limit": 0 }));

        assert!(q.validate().is_err());
    }

    #[test]
    fn in_range_parameters_pass_through_into_filters() {
        let q = query(json!({ "min_rating": 4.0, "max_price": 2, "limit": 3 }));

        let filters = q.validate().unwrap();
        assert_eq!(filters.min_rating, 4.0);
        assert_eq!(filters.max_price, Some(2));
        assert_eq!(filters.limit, 3);
    }
}
