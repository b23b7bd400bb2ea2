//! Results in the shape map search controls consume.

use geoplaces_client::SuggestPlace;
use geoplaces_core::Position;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Place,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    #[serde(rename = "type")]
    kind: &'static str,
    pub coordinates: Position,
}

impl Point {
    #[must_use]
    pub const fn new(coordinates: Position) -> Self {
        Self {
            kind: "Point",
            coordinates,
        }
    }
}

/// A single geocoded place, serialized as a GeoJSON feature with the extra
/// `place_name`, `text`, `place_type` and `center` members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub geometry: Point,
    pub place_name: String,
    pub text: String,
    /// The service item the feature was built from, untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
    pub place_type: Vec<PlaceType>,
    pub center: Position,
}

impl Feature {
    #[must_use]
    pub fn new(center: Position, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            kind: "Feature",
            id: None,
            geometry: Point::new(center),
            place_name: label.clone(),
            text: label,
            properties: None,
            place_type: vec![PlaceType::Place],
            center,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = Some(properties);
        self
    }

    #[must_use]
    pub fn coordinates(&self) -> Position {
        self.center
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.place_name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Feature>,
}

/// A type-ahead suggestion. `place` is the service's reference to the
/// suggested place; it may lack coordinates, in which case the control
/// resolves it through a place lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "placeId", skip_serializing_if = "Option::is_none")]
    pub place: Option<SuggestPlace>,
}

impl Suggestion {
    #[must_use]
    pub fn place_id(&self) -> Option<&str> {
        self.place.as_ref().and_then(|p| p.place_id.as_deref())
    }

    /// Coordinates carried by the suggestion itself, when the service
    /// included them.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.place
            .as_ref()
            .and_then(|p| p.position.as_deref())
            .and_then(Position::from_slice)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionList {
    pub suggestions: Vec<Suggestion>,
}
