use anyhow::{bail, Context};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

/// One raw entry out of the text-search `results` array. `name` and
/// `place_id` are required, everything else the provider may omit.
#[derive(Clone, Deserialize, Debug)]
pub struct GooglePlace {
    pub name: String,
    pub place_id: String,
    #[serde(default)]
    pub rating: f64,
    pub price_level: Option<u8>,
    pub formatted_address: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<GooglePlace>,
}

pub struct GooglePlacesClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesClient {
    pub fn new(
        http: Client,
        api_key: String,
    ) -> Self {
        Self {
            http,
            api_key,
            base_url: TEXT_SEARCH_URL.to_string(),
        }
    }

    /// Points the client at a stand-in endpoint instead of the live API.
    #[cfg(test)]
    pub fn with_base_url(
        http: Client,
        api_key: String,
        base_url: String,
    ) -> Self {
        Self {
            http,
            api_key,
            base_url,
        }
    }

    /// Runs a free-text search for restaurants around the given location.
    /// The location string goes into the query untouched; an entry missing a
    /// required field fails the whole call, there are no partial results.
    pub async fn search_restaurants(
        &self,
        location: &str,
    ) -> anyhow::Result<Vec<GooglePlace>> {
        info!("Fetching restaurants from Google Places for: {}", location);

        let query = format!("restaurants in {}", location);
        let response = self.http
            .get(self.base_url.as_str())
            .query(&[
                ("query", query.as_str()),
                ("key", self.api_key.as_str()),
                ("type", "restaurant"),
            ])
            .send()
            .await
            .context("Google Places request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Google Places answered with status: {}", status);
        }

        let body: TextSearchResponse = response
            .json()
            .await
            .context("Failed to decode the Google Places response body")?;

        if body.results.is_empty() {
            warn!("No restaurants found for location: {}", location);
        }

        Ok(body.results)
    }
}
