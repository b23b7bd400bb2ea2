//! Pushes filter state into the host control's own fields.
//!
//! A search control keeps its own copy of the active filters (`types`,
//! `countries`, `bbox`, `proximity`) and reads them when it builds queries.
//! The facade keeps those copies in line with the [`FilterState`] through
//! this trait.

use geoplaces_core::Position;

use crate::filters::{FilterState, SpatialFilter};

pub trait FilterMirror {
    /// Comma-joined category tokens; empty when no category filter is set.
    fn set_types(&mut self, types: &str);
    /// Comma-joined alpha-3 codes; empty when no country filter is set.
    fn set_countries(&mut self, countries: &str);
    /// `[swLon, swLat, neLon, neLat]`, or empty.
    fn set_bbox(&mut self, bbox: &[f64]);
    fn set_proximity(&mut self, proximity: Option<Position>);
}

pub fn push_categories(mirror: &mut impl FilterMirror, state: &FilterState) {
    mirror.set_types(&state.categories_token());
}

pub fn push_countries(mirror: &mut impl FilterMirror, state: &FilterState) {
    mirror.set_countries(&state.countries_token());
}

/// Writes both spatial fields. The one not matching the active variant is
/// emptied.
pub fn push_spatial(mirror: &mut impl FilterMirror, state: &FilterState) {
    match state.spatial() {
        SpatialFilter::BoundingBox(bbox) => {
            mirror.set_bbox(&bbox.to_array());
            mirror.set_proximity(None);
        }
        SpatialFilter::BiasPosition(position) => {
            mirror.set_proximity(Some(position));
            mirror.set_bbox(&[]);
        }
        SpatialFilter::None => {
            mirror.set_bbox(&[]);
            mirror.set_proximity(None);
        }
    }
}

pub fn push_all(mirror: &mut impl FilterMirror, state: &FilterState) {
    push_categories(mirror, state);
    push_countries(mirror, state);
    push_spatial(mirror, state);
}
