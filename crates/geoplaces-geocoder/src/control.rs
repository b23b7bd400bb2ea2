//! The search box the facade drives.
//!
//! [`SearchControl`] holds the wired capabilities together with the fields a
//! map search box keeps for itself: the mirrored filters, the language, the
//! behaviour flags and the row renderer. It composes each operation's query
//! configuration from those fields, the same way the box does when the user
//! types or clicks.

use geoplaces_client::PlacesService;
use geoplaces_core::{BoundingBox, Position, DEFAULT_LANGUAGE};

use crate::error::GeocoderError;
use crate::features::{FeatureCollection, PlaceResult, SuggestionList};
use crate::mirror::FilterMirror;
use crate::provider::{ForwardGeocoder, GeocoderApi, PlaceLookup, ReverseGeocoder, Suggester};
use crate::query::{ForwardConfig, PlaceConfig, ReverseConfig, SuggestConfig};
use crate::render::{render_item, RenderFn, RenderItem};

/// Behaviour of the control itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOptions {
    pub language: String,
    /// Query suggestions on every keystroke.
    pub show_results_while_typing: bool,
    /// Coordinates typed into the box are reverse geocoded.
    pub reverse_geocode: bool,
    /// Cap on suggestions and reverse results.
    pub limit: u32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            show_results_while_typing: false,
            reverse_geocode: false,
            limit: 5,
        }
    }
}

pub struct SearchControl<C> {
    forward: ForwardGeocoder<C>,
    reverse: Option<ReverseGeocoder<C>>,
    place_lookup: Option<PlaceLookup<C>>,
    suggester: Option<Suggester<C>>,
    options: ControlOptions,
    render: RenderFn,
    types: String,
    countries: String,
    bbox: Vec<f64>,
    proximity: Option<Position>,
}

impl<C> SearchControl<C> {
    /// # Errors
    ///
    /// [`GeocoderError::MissingForwardGeocode`] if `api` has no forward
    /// geocode capability.
    pub fn new(api: GeocoderApi<C>, options: ControlOptions) -> Result<Self, GeocoderError> {
        let forward = api
            .forward_geocode
            .ok_or(GeocoderError::MissingForwardGeocode)?;
        Ok(Self {
            forward,
            reverse: api.reverse_geocode,
            place_lookup: api.search_by_place_id,
            suggester: api.get_suggestions,
            options,
            render: render_item,
            types: String::new(),
            countries: String::new(),
            bbox: Vec::new(),
            proximity: None,
        })
    }

    #[must_use]
    pub fn options(&self) -> &ControlOptions {
        &self.options
    }

    #[must_use]
    pub fn types(&self) -> &str {
        &self.types
    }

    #[must_use]
    pub fn countries(&self) -> &str {
        &self.countries
    }

    #[must_use]
    pub fn bbox(&self) -> &[f64] {
        &self.bbox
    }

    #[must_use]
    pub fn proximity(&self) -> Option<Position> {
        self.proximity
    }

    /// A copy of the wired capabilities, for running operations outside the
    /// control's borrow (e.g. on spawned tasks).
    #[must_use]
    pub fn capabilities(&self) -> GeocoderApi<C> {
        GeocoderApi {
            forward_geocode: Some(self.forward.clone()),
            reverse_geocode: self.reverse.clone(),
            search_by_place_id: self.place_lookup.clone(),
            get_suggestions: self.suggester.clone(),
        }
    }

    #[must_use]
    pub fn render(&self, item: &RenderItem<'_>) -> String {
        (self.render)(item)
    }

    #[must_use]
    pub fn forward_config(&self, query: &str) -> ForwardConfig {
        ForwardConfig {
            query: query.to_string(),
            bias_position: self.proximity,
            language: Some(self.options.language.clone()),
        }
    }

    #[must_use]
    pub fn reverse_config(&self, position: Position) -> ReverseConfig {
        ReverseConfig {
            query: position,
            language: vec![self.options.language.clone()],
            max_results: Some(self.options.limit),
        }
    }

    #[must_use]
    pub fn place_config(&self, place_id: &str) -> PlaceConfig {
        PlaceConfig {
            query: place_id.to_string(),
            language: vec![self.options.language.clone()],
        }
    }

    #[must_use]
    pub fn suggest_config(&self, query: &str) -> SuggestConfig {
        let bbox = <[f64; 4]>::try_from(self.bbox.as_slice())
            .ok()
            .map(BoundingBox::from);
        SuggestConfig {
            query: query.to_string(),
            bias_position: self.proximity,
            max_results: Some(self.options.limit),
            bbox,
            countries: (!self.countries.is_empty()).then(|| self.countries.clone()),
            language: vec![self.options.language.clone()],
        }
    }
}

impl<C: PlacesService> SearchControl<C> {
    pub async fn forward_geocode(&self, config: &ForwardConfig) -> FeatureCollection {
        self.forward.forward_geocode(config).await
    }

    /// `None` when reverse geocoding was not wired.
    pub async fn reverse_geocode(&self, config: &ReverseConfig) -> Option<FeatureCollection> {
        match &self.reverse {
            Some(reverse) => Some(reverse.reverse_geocode(config).await),
            None => None,
        }
    }

    /// `None` when place lookup was not wired.
    pub async fn search_by_place_id(&self, config: &PlaceConfig) -> Option<PlaceResult> {
        match &self.place_lookup {
            Some(lookup) => Some(lookup.search_by_place_id(config).await),
            None => None,
        }
    }

    /// `None` when suggestions were not wired.
    pub async fn get_suggestions(&self, config: &SuggestConfig) -> Option<SuggestionList> {
        match &self.suggester {
            Some(suggester) => Some(suggester.get_suggestions(config).await),
            None => None,
        }
    }
}

impl<C> FilterMirror for SearchControl<C> {
    fn set_types(&mut self, types: &str) {
        types.clone_into(&mut self.types);
    }

    fn set_countries(&mut self, countries: &str) {
        countries.clone_into(&mut self.countries);
    }

    fn set_bbox(&mut self, bbox: &[f64]) {
        bbox.clone_into(&mut self.bbox);
    }

    fn set_proximity(&mut self, proximity: Option<Position>) {
        self.proximity = proximity;
    }
}
