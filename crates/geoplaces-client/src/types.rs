//! Places API request and response types.
//!
//! The service speaks JSON with PascalCase field names. Optional request
//! fields are omitted when unset; the service treats an empty list
//! differently from an absent one.
//!
//! List responses keep each result as raw JSON so callers can parse items
//! one by one, drop the ones that do not fit, and still hand the untouched
//! item to the host control.

use geoplaces_core::{BoundingBox, Position};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// SearchText
// ---------------------------------------------------------------------------

/// Body of `POST /v2/search-text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchTextRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_position: Option<Position>,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchTextResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// ReverseGeocode
// ---------------------------------------------------------------------------

/// Body of `POST /v2/reverse-geocode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReverseGeocodeRequest {
    pub search_position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// GetPlace
// ---------------------------------------------------------------------------

/// Parameters of `GET /v2/place/{PlaceId}`. Sent as path and query, not as
/// a body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetPlaceRequest {
    pub place_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// `GetPlace` returns a single place at the top level of the body.
pub type GetPlaceResponse = PlaceItem;

// ---------------------------------------------------------------------------
// Suggest
// ---------------------------------------------------------------------------

/// Body of `POST /v2/suggest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuggestRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuggestResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// One suggestion. Either a place (`Place` set) or a query refinement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuggestItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub suggest_result_item_type: Option<String>,
    #[serde(default)]
    pub place: Option<SuggestPlace>,
}

/// The place a suggestion points at. Coordinates are often missing and
/// must be resolved with a follow-up `GetPlace`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuggestPlace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<f64>>,
}

// ---------------------------------------------------------------------------
// Shared result items
// ---------------------------------------------------------------------------

/// A place as returned by `SearchText`, `ReverseGeocode` and `GetPlace`.
///
/// Every field is optional: the service omits whatever it does not know,
/// and callers decide which combinations are usable. Only `Position` must
/// be well formed; any other field with an unexpected shape decodes as
/// absent rather than failing the whole item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceItem {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Address>,
    /// `[longitude, latitude]` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<f64>>,
    /// Metres from the bias or search position.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<PlaceCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// Full formatted address, e.g. `"Central Park, New York, NY, USA"`.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<AddressCountry>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<AddressRegion>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub locality: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub district: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_code: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub street: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub address_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressCountry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressRegion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

/// Decodes a field, falling back to its default when the service sends an
/// unexpected shape (such as `null` for a list).
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
