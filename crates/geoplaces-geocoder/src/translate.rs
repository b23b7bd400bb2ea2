//! Turns service responses into control results.
//!
//! Items are decoded one at a time. An item that does not decode, or lacks
//! what the result needs, is dropped and logged at debug level; it never
//! fails the whole response.

use geoplaces_client::{
    GetPlaceResponse, PlaceItem, ReverseGeocodeResponse, SearchTextResponse, SuggestItem,
    SuggestResponse,
};
use geoplaces_core::Position;
use serde::de::DeserializeOwned;

use crate::features::{Feature, Suggestion};

fn decode_item<T: DeserializeOwned>(operation: &'static str, raw: &serde_json::Value) -> Option<T> {
    match serde_json::from_value(raw.clone()) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::debug!(operation, error = %e, "dropping undecodable result item");
            None
        }
    }
}

fn item_position(item: &PlaceItem) -> Option<Position> {
    item.position.as_deref().and_then(Position::from_slice)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Keeps items with a position and an address label.
#[must_use]
pub fn search_text_features(response: SearchTextResponse) -> Vec<Feature> {
    response
        .results
        .into_iter()
        .filter_map(|raw| {
            let item: PlaceItem = decode_item("SearchText", &raw)?;
            let label = non_blank(item.address.as_ref().and_then(|a| a.label.as_deref()));
            match (item_position(&item), label) {
                (Some(center), Some(label)) => {
                    Some(Feature::new(center, label).with_properties(raw))
                }
                _ => {
                    tracing::debug!(
                        place_id = item.place_id.as_deref(),
                        "dropping search result without position or label"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Keeps items with a position and a title. The place id becomes the
/// feature id.
#[must_use]
pub fn reverse_geocode_features(response: ReverseGeocodeResponse) -> Vec<Feature> {
    response
        .results
        .into_iter()
        .filter_map(|raw| {
            let item: PlaceItem = decode_item("ReverseGeocode", &raw)?;
            let feature = titled_feature(&item);
            if feature.is_none() {
                tracing::debug!(
                    place_id = item.place_id.as_deref(),
                    "dropping reverse result without position or title"
                );
            }
            feature.map(|f| f.with_properties(raw))
        })
        .collect()
}

/// The looked-up place, if it has a position and a title.
#[must_use]
pub fn place_feature(response: &GetPlaceResponse) -> Option<Feature> {
    let feature = titled_feature(response);
    if feature.is_none() {
        tracing::debug!(
            place_id = response.place_id.as_deref(),
            "place lookup returned no usable place"
        );
    }
    feature
}

fn titled_feature(item: &PlaceItem) -> Option<Feature> {
    let center = item_position(item)?;
    let title = non_blank(item.title.as_deref())?;
    Some(Feature::new(center, title).with_id(item.place_id.clone()))
}

/// Keeps items with a title. Coordinates are not required.
#[must_use]
pub fn suggestions(response: SuggestResponse) -> Vec<Suggestion> {
    response
        .results
        .into_iter()
        .filter_map(|raw| {
            let item: SuggestItem = decode_item("Suggest", &raw)?;
            let Some(text) = non_blank(item.title.as_deref()) else {
                tracing::debug!("dropping suggestion without title");
                return None;
            };
            Some(Suggestion {
                text: text.to_string(),
                place: item.place,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn search_response(results: serde_json::Value) -> SearchTextResponse {
        serde_json::from_value(json!({ "Results": results })).unwrap()
    }

    #[test]
    fn forward_drops_item_without_label() {
        let response = search_response(json!([
            {
                "PlaceId": "a",
                "Title": "Central Park",
                "Position": [-73.97, 40.78],
                "Address": { "Label": "Central Park, New York, NY, USA" }
            },
            {
                "PlaceId": "b",
                "Title": "Nameless",
                "Position": [-73.9, 40.7],
                "Address": { "Locality": "New York" }
            }
        ]));

        let features = search_text_features(response);

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].label(), "Central Park, New York, NY, USA");
        assert_eq!(features[0].coordinates(), Position::new(-73.97, 40.78));
        assert_eq!(features[0].properties.as_ref().unwrap()["PlaceId"], "a");
        assert_eq!(features[0].id, None);
    }

    #[test]
    fn forward_drops_item_with_bad_position() {
        let response = search_response(json!([
            { "Position": [1.0], "Address": { "Label": "One" } },
            { "Address": { "Label": "Two" } },
            { "Position": [1.0, 2.0], "Address": { "Label": "   " } }
        ]));
        assert!(search_text_features(response).is_empty());
    }

    #[test]
    fn forward_drops_undecodable_item_and_keeps_the_rest() {
        let response = search_response(json!([
            { "Position": "nowhere", "Address": { "Label": "Broken" } },
            { "Position": [2.35, 48.85], "Address": { "Label": "Paris" } }
        ]));
        let features = search_text_features(response);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].text, "Paris");
    }

    #[test]
    fn forward_keeps_item_with_malformed_categories() {
        let response = search_response(json!([
            {
                "Position": [2.35, 48.85],
                "Address": { "Label": "Paris, France" },
                "Categories": null
            },
            {
                "Position": [2.34, 48.86],
                "Address": { "Label": "Cafe de Flore, Paris" },
                "Categories": [{ "Name": "Cafe" }]
            }
        ]));
        let features = search_text_features(response);
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].text, "Paris, France");
        assert_eq!(features[1].text, "Cafe de Flore, Paris");
    }

    #[test]
    fn place_body_with_null_categories_is_present() {
        let response: GetPlaceResponse = serde_json::from_value(json!({
            "Title": "Louvre",
            "Position": [2.33, 48.86],
            "Categories": null
        }))
        .unwrap();
        let feature = place_feature(&response).unwrap();
        assert_eq!(feature.place_name, "Louvre");
        assert_eq!(feature.coordinates(), Position::new(2.33, 48.86));
    }

    #[test]
    fn reverse_uses_title_and_place_id() {
        let response: ReverseGeocodeResponse = serde_json::from_value(json!({
            "Results": [
                { "PlaceId": "p1", "Title": "Bow Bridge", "Position": [-73.97, 40.77] },
                { "PlaceId": "p2", "Position": [-73.97, 40.77] }
            ]
        }))
        .unwrap();
        let features = reverse_geocode_features(response);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id.as_deref(), Some("p1"));
        assert_eq!(features[0].place_name, "Bow Bridge");
    }

    #[test]
    fn place_with_title_but_no_position_is_absent() {
        let response = PlaceItem {
            place_id: Some("p1".to_string()),
            title: Some("Somewhere".to_string()),
            ..PlaceItem::default()
        };
        assert_eq!(place_feature(&response), None);
    }

    #[test]
    fn place_with_title_and_position_is_present() {
        let response = PlaceItem {
            place_id: Some("p1".to_string()),
            title: Some("Somewhere".to_string()),
            position: Some(vec![10.0, 20.0]),
            ..PlaceItem::default()
        };
        let feature = place_feature(&response).unwrap();
        assert_eq!(feature.id.as_deref(), Some("p1"));
        assert_eq!(feature.coordinates(), Position::new(10.0, 20.0));
    }

    #[test]
    fn suggestions_keep_place_reference_without_coordinates() {
        let response: SuggestResponse = serde_json::from_value(json!({
            "Results": [
                {
                    "Title": "Central Park, New York",
                    "SuggestResultItemType": "Place",
                    "Place": { "PlaceId": "AQAB", "PlaceType": "PointOfInterest" }
                },
                { "SuggestResultItemType": "Query" },
                { "Title": "central park zoo", "SuggestResultItemType": "Query" }
            ]
        }))
        .unwrap();

        let list = suggestions(response);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].text, "Central Park, New York");
        assert_eq!(list[0].place_id(), Some("AQAB"));
        assert!(list[1].place.is_none());
    }
}
