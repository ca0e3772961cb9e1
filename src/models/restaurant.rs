use serde::{Deserialize, Serialize};
use crate::clients::google_places::GooglePlace;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Restaurant {
    pub name: String,
    pub rating: f64,
    /// Never filled in from the provider response, kept so the serialized
    /// shape stays compatible with existing consumers.
    pub cuisine: Option<String>,
    pub price_level: Option<u8>,
    pub address: Option<String>,
    pub place_id: String,
}

impl From<GooglePlace> for Restaurant {
    fn from(place: GooglePlace) -> Self {
        Self {
            name: place.name,
            rating: place.rating,
            cuisine: None,
            price_level: place.price_level,
            address: place.formatted_address,
            place_id: place.place_id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchFilters {
    pub min_rating: f64,
    pub max_price: Option<u8>,
    pub limit: usize,
}

/// Narrows the list to records matching the filters, orders it best rated
/// first and cuts it down to at most `limit` entries. A place that reports
/// no price tier never satisfies a price ceiling. The sort is stable, so
/// equally rated places keep their provider order.
pub fn filter_and_rank(
    restaurants: Vec<Restaurant>,
    filters: &SearchFilters,
) -> Vec<Restaurant> {
    let mut matched: Vec<Restaurant> = restaurants
        .into_iter()
        .filter(|restaurant| restaurant.rating >= filters.min_rating)
        .filter(|restaurant| match filters.max_price {
            Some(max_price) => restaurant
                .price_level
                .map_or(false, |level| level <= max_price),
            None => true,
        })
        .collect();

    matched.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    matched.truncate(filters.limit);
    matched
}
