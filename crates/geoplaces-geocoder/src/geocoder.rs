//! The facade handed to the embedding application.

use std::sync::Arc;

use geoplaces_client::PlacesService;
use geoplaces_core::{BoundingBox, Category, Country, FilterProfile, Position, DEFAULT_LANGUAGE};

use crate::control::{ControlOptions, SearchControl};
use crate::error::{FilterError, GeocoderError};
use crate::filters::{FilterState, FilterStore};
use crate::mirror::{push_all, push_categories, push_countries, push_spatial};
use crate::provider::{ForwardGeocoder, GeocoderApi, PlaceLookup, ReverseGeocoder, Suggester};

/// Which optional capabilities to wire. Forward geocode is always wired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocoderOptions {
    /// Wires every capability, whatever the individual flags say.
    pub enable_all: bool,
    pub enable_reverse_geocode: bool,
    pub enable_search_by_place_id: bool,
    pub enable_get_suggestions: bool,
    /// Defaults to `"en"`.
    pub language: Option<String>,
}

/// Builds a geocoder over `client` with the capabilities `options` asks for.
///
/// Suggestions turn on results-while-typing, and reverse geocoding turns on
/// the control's coordinate lookup.
///
/// # Errors
///
/// Propagates [`PlacesGeocoder::new`] errors.
pub fn build_places_geocoder<C: PlacesService>(
    client: C,
    options: &GeocoderOptions,
) -> Result<PlacesGeocoder<C>, GeocoderError> {
    tracing::debug!(?options, "building places geocoder");

    let client = Arc::new(client);
    let filters = FilterStore::new();
    let reverse = options.enable_all || options.enable_reverse_geocode;
    let place_lookup = options.enable_all || options.enable_search_by_place_id;
    let suggestions = options.enable_all || options.enable_get_suggestions;

    let api = GeocoderApi {
        forward_geocode: Some(ForwardGeocoder::new(Arc::clone(&client), filters)),
        reverse_geocode: reverse.then(|| ReverseGeocoder::new(Arc::clone(&client))),
        search_by_place_id: place_lookup.then(|| PlaceLookup::new(Arc::clone(&client))),
        get_suggestions: suggestions.then(|| Suggester::new(Arc::clone(&client))),
    };

    let control_options = ControlOptions {
        language: options
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        show_results_while_typing: suggestions,
        reverse_geocode: reverse,
        ..ControlOptions::default()
    };

    PlacesGeocoder::new(api, control_options)
}

/// Owns the search control and the filter state its forward searches use.
///
/// Every filter mutation is applied to the shared state first and then
/// mirrored into the control. Mutators that can refuse return `false` and
/// leave the state as it was.
pub struct PlacesGeocoder<C> {
    control: SearchControl<C>,
    filters: FilterStore,
}

impl<C> PlacesGeocoder<C> {
    /// The filter state is the one the forward capability reads.
    ///
    /// # Errors
    ///
    /// [`GeocoderError::MissingForwardGeocode`] if `api` has no forward
    /// geocode capability.
    pub fn new(api: GeocoderApi<C>, options: ControlOptions) -> Result<Self, GeocoderError> {
        let filters = api
            .forward_geocode
            .as_ref()
            .map(|forward| forward.filters().clone())
            .ok_or(GeocoderError::MissingForwardGeocode)?;
        let mut control = SearchControl::new(api, options)?;
        filters.read(|state| push_all(&mut control, state));
        Ok(Self { control, filters })
    }

    #[must_use]
    pub fn get_places_geocoder(&self) -> &SearchControl<C> {
        &self.control
    }

    #[must_use]
    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    /// Applies `mutate`, then lets `push` mirror the result into the control.
    fn apply<R>(
        &mut self,
        mutate: impl FnOnce(&mut FilterState) -> R,
        push: fn(&mut SearchControl<C>, &FilterState),
    ) -> R {
        let control = &mut self.control;
        self.filters.update(|state| {
            let out = mutate(state);
            push(control, state);
            out
        })
    }

    fn accepted<T>(operation: &'static str, result: Result<T, FilterError>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::info!(operation, reason = %e, "filter change rejected");
                false
            }
        }
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) -> bool {
        let result = self.apply(|s| s.set_categories(categories), push_categories);
        Self::accepted("set_categories", result)
    }

    pub fn add_category(&mut self, name: &str) -> bool {
        let result = self.apply(|s| s.add_category(name), push_categories);
        Self::accepted("add_category", result)
    }

    pub fn clear_categories(&mut self) {
        self.apply(FilterState::clear_categories, push_categories);
    }

    #[must_use]
    pub fn get_categories(&self) -> Vec<Category> {
        self.filters.read(|s| s.categories().to_vec())
    }

    pub fn set_countries(&mut self, countries: Vec<Country>) -> bool {
        let result = self.apply(|s| s.set_countries(countries), push_countries);
        Self::accepted("set_countries", result)
    }

    pub fn add_country(&mut self, code: &str) -> bool {
        let result = self.apply(|s| s.add_country(code), push_countries);
        Self::accepted("add_country", result)
    }

    pub fn clear_countries(&mut self) {
        self.apply(FilterState::clear_countries, push_countries);
    }

    #[must_use]
    pub fn get_countries(&self) -> Vec<Country> {
        self.filters.read(|s| s.countries().to_vec())
    }

    pub fn set_bounding_box(&mut self, bbox: BoundingBox) {
        self.apply(|s| s.set_bounding_box(bbox), push_spatial);
    }

    pub fn clear_bounding_box(&mut self) {
        self.apply(FilterState::clear_bounding_box, push_spatial);
    }

    #[must_use]
    pub fn get_bounding_box(&self) -> Option<BoundingBox> {
        self.filters.read(FilterState::bounding_box)
    }

    pub fn set_bias_position(&mut self, position: Position) {
        self.apply(|s| s.set_bias_position(position), push_spatial);
    }

    pub fn clear_bias_position(&mut self) {
        self.apply(FilterState::clear_bias_position, push_spatial);
    }

    #[must_use]
    pub fn get_bias_position(&self) -> Option<Position> {
        self.filters.read(FilterState::bias_position)
    }

    /// Resets every filter and rewrites all four mirrored fields.
    pub fn clear_filters(&mut self) {
        self.apply(FilterState::clear_all_filters, push_all);
    }

    /// Replaces every filter with the profile's. A profile whose lists are
    /// over the caps is refused as a whole.
    pub fn apply_profile(&mut self, profile: &FilterProfile) -> bool {
        let result = self.apply(
            |s| -> Result<(), FilterError> {
                let mut next = FilterState::new();
                next.set_categories(profile.categories.clone())?;
                next.set_countries(profile.countries.clone())?;
                if let Some(bbox) = profile.bounding_box {
                    next.set_bounding_box(bbox);
                }
                if let Some(position) = profile.bias_position {
                    next.set_bias_position(position);
                }
                *s = next;
                Ok(())
            },
            push_all,
        );
        Self::accepted("apply_profile", result)
    }
}

#[cfg(test)]
#[path = "geocoder_test.rs"]
mod tests;
