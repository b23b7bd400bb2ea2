//! Builds service requests from a query configuration and the current
//! filters. Pure: the caller takes the filter snapshot, nothing here locks or
//! awaits.

use geoplaces_client::{GetPlaceRequest, ReverseGeocodeRequest, SearchTextRequest, SuggestRequest};
use geoplaces_core::DEFAULT_LANGUAGE;

use crate::filters::FilterState;
use crate::query::{ForwardConfig, PlaceConfig, ReverseConfig, SuggestConfig};

/// Result cap for forward searches. The control shows at most this many.
pub const FORWARD_MAX_RESULTS: u32 = 5;

/// The bias comes from the query when it has one, otherwise from the bias
/// filter. Bounding box and bias are passed as they are; the spatial filter
/// never holds both.
#[must_use]
pub fn search_text_request(config: &ForwardConfig, filters: &FilterState) -> SearchTextRequest {
    let countries: Vec<String> = filters
        .countries()
        .iter()
        .map(|c| c.code().to_string())
        .collect();

    SearchTextRequest {
        query: config.query.clone(),
        bias_position: config.bias_position.or_else(|| filters.bias_position()),
        max_results: FORWARD_MAX_RESULTS,
        filter_bounding_box: filters.bounding_box(),
        filter_countries: (!countries.is_empty()).then_some(countries),
        language: Some(
            config
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        ),
    }
}

#[must_use]
pub fn reverse_geocode_request(config: &ReverseConfig) -> ReverseGeocodeRequest {
    ReverseGeocodeRequest {
        search_position: config.query,
        language: config.language.first().cloned(),
        max_results: config.max_results,
    }
}

#[must_use]
pub fn get_place_request(config: &PlaceConfig) -> GetPlaceRequest {
    GetPlaceRequest {
        place_id: config.query.clone(),
        language: config.language.first().cloned(),
    }
}

/// The country field is left out entirely when the control has no country
/// filter; an empty list is never sent.
#[must_use]
pub fn suggest_request(config: &SuggestConfig) -> SuggestRequest {
    let countries = config.countries.as_deref().map(|joined| {
        joined
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    SuggestRequest {
        query: config.query.clone(),
        bias_position: config.bias_position,
        max_results: config.max_results,
        filter_bounding_box: config.bbox,
        filter_countries: countries.filter(|codes| !codes.is_empty()),
        language: config.language.first().cloned(),
    }
}
