//! Adapter between a map search-box control and the places service.
//!
//! [`build_places_geocoder`] wires the provider operations the control calls
//! (forward geocode, reverse geocode, place lookup, suggestions) on top of a
//! [`PlacesService`](geoplaces_client::PlacesService), and returns a
//! [`PlacesGeocoder`] through which the embedding application manages the
//! active filters.

pub mod control;
pub mod error;
pub mod features;
pub mod filters;
pub mod geocoder;
pub mod mirror;
pub mod provider;
pub mod query;
pub mod render;
pub mod request;
pub mod translate;

pub use control::{ControlOptions, SearchControl};
pub use error::{FilterError, GeocoderError};
pub use features::{Feature, FeatureCollection, PlaceResult, Suggestion, SuggestionList};
pub use filters::{FilterState, FilterStore, SpatialFilter};
pub use geocoder::{build_places_geocoder, GeocoderOptions, PlacesGeocoder};
pub use mirror::FilterMirror;
pub use provider::{ForwardGeocoder, GeocoderApi, PlaceLookup, ReverseGeocoder, Suggester};
pub use query::{ForwardConfig, PlaceConfig, ReverseConfig, SuggestConfig};
pub use render::{render_item, RenderFn, RenderItem};

#[cfg(test)]
mod test_support;
