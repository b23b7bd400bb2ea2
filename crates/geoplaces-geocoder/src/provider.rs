//! The four provider operations a search control calls.
//!
//! Each capability owns a handle to the places service and never fails: a
//! service error is logged and turned into an empty result, so the control
//! simply shows nothing. Requests are built in full before the call is
//! awaited; filter changes made while a call is in flight apply to the next
//! one.

use std::sync::Arc;

use geoplaces_client::PlacesService;

use crate::features::{FeatureCollection, PlaceResult, SuggestionList};
use crate::filters::FilterStore;
use crate::query::{ForwardConfig, PlaceConfig, ReverseConfig, SuggestConfig};
use crate::{request, translate};

/// Free-text search, filtered by the shared [`FilterStore`].
pub struct ForwardGeocoder<C> {
    client: Arc<C>,
    filters: FilterStore,
}

impl<C> ForwardGeocoder<C> {
    #[must_use]
    pub fn new(client: Arc<C>, filters: FilterStore) -> Self {
        Self { client, filters }
    }

    #[must_use]
    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }
}

impl<C: PlacesService> ForwardGeocoder<C> {
    pub async fn forward_geocode(&self, config: &ForwardConfig) -> FeatureCollection {
        let request = self
            .filters
            .read(|filters| request::search_text_request(config, filters));
        tracing::debug!(?request, "forward geocode");

        match self.client.search_text(&request).await {
            Ok(response) => FeatureCollection {
                features: translate::search_text_features(response),
            },
            Err(e) => {
                tracing::error!(error = %e, query = %config.query, "forward geocode failed");
                FeatureCollection::default()
            }
        }
    }
}

pub struct ReverseGeocoder<C> {
    client: Arc<C>,
}

impl<C> ReverseGeocoder<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: PlacesService> ReverseGeocoder<C> {
    pub async fn reverse_geocode(&self, config: &ReverseConfig) -> FeatureCollection {
        let request = request::reverse_geocode_request(config);
        tracing::debug!(?request, "reverse geocode");

        match self.client.reverse_geocode(&request).await {
            Ok(response) => FeatureCollection {
                features: translate::reverse_geocode_features(response),
            },
            Err(e) => {
                tracing::error!(error = %e, position = %config.query, "reverse geocode failed");
                FeatureCollection::default()
            }
        }
    }
}

pub struct PlaceLookup<C> {
    client: Arc<C>,
}

impl<C> PlaceLookup<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: PlacesService> PlaceLookup<C> {
    pub async fn search_by_place_id(&self, config: &PlaceConfig) -> PlaceResult {
        let request = request::get_place_request(config);
        tracing::debug!(?request, "search by place id");

        match self.client.get_place(&request).await {
            Ok(response) => PlaceResult {
                place: translate::place_feature(&response),
            },
            Err(e) => {
                tracing::error!(error = %e, place_id = %config.query, "place lookup failed");
                PlaceResult::default()
            }
        }
    }
}

pub struct Suggester<C> {
    client: Arc<C>,
}

impl<C> Suggester<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: PlacesService> Suggester<C> {
    pub async fn get_suggestions(&self, config: &SuggestConfig) -> SuggestionList {
        let request = request::suggest_request(config);
        tracing::debug!(?request, "get suggestions");

        match self.client.suggest(&request).await {
            Ok(response) => SuggestionList {
                suggestions: translate::suggestions(response),
            },
            Err(e) => {
                tracing::error!(error = %e, query = %config.query, "get suggestions failed");
                SuggestionList::default()
            }
        }
    }
}

// Derived `Clone` would require `C: Clone`; only the `Arc` is cloned.
macro_rules! impl_clone {
    ($($ty:ident { $($field:ident),+ }),+ $(,)?) => {
        $(
            impl<C> Clone for $ty<C> {
                fn clone(&self) -> Self {
                    Self { $($field: self.$field.clone()),+ }
                }
            }
        )+
    };
}

impl_clone! {
    ForwardGeocoder { client, filters },
    ReverseGeocoder { client },
    PlaceLookup { client },
    Suggester { client },
}

/// The capabilities handed to a search control. Forward geocode is
/// mandatory for a working control; the rest are optional.
pub struct GeocoderApi<C> {
    pub forward_geocode: Option<ForwardGeocoder<C>>,
    pub reverse_geocode: Option<ReverseGeocoder<C>>,
    pub search_by_place_id: Option<PlaceLookup<C>>,
    pub get_suggestions: Option<Suggester<C>>,
}

impl<C> Default for GeocoderApi<C> {
    fn default() -> Self {
        Self {
            forward_geocode: None,
            reverse_geocode: None,
            search_by_place_id: None,
            get_suggestions: None,
        }
    }
}

impl<C> Clone for GeocoderApi<C> {
    fn clone(&self) -> Self {
        Self {
            forward_geocode: self.forward_geocode.clone(),
            reverse_geocode: self.reverse_geocode.clone(),
            search_by_place_id: self.search_by_place_id.clone(),
            get_suggestions: self.get_suggestions.clone(),
        }
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
