use geoplaces_core::{parse_filter_profile, MAX_CATEGORY_FILTERS};
use serde_json::json;

use super::*;
use crate::test_support::FakePlaces;

fn geocoder(options: &GeocoderOptions) -> PlacesGeocoder<FakePlaces> {
    build_places_geocoder(FakePlaces::returning(json!([])), options).unwrap()
}

fn nyc_bbox() -> BoundingBox {
    BoundingBox::new(-74.3, 40.5, -73.7, 40.9)
}

#[test]
fn default_options_wire_forward_only() {
    let geocoder = geocoder(&GeocoderOptions::default());
    let api = geocoder.get_places_geocoder().capabilities();
    assert!(api.forward_geocode.is_some());
    assert!(api.reverse_geocode.is_none());
    assert!(api.search_by_place_id.is_none());
    assert!(api.get_suggestions.is_none());

    let options = geocoder.get_places_geocoder().options();
    assert_eq!(options.language, "en");
    assert!(!options.show_results_while_typing);
    assert!(!options.reverse_geocode);
}

#[test]
fn enable_all_wins_over_individual_flags() {
    let geocoder = geocoder(&GeocoderOptions {
        enable_all: true,
        enable_reverse_geocode: false,
        ..GeocoderOptions::default()
    });
    let api = geocoder.get_places_geocoder().capabilities();
    assert!(api.reverse_geocode.is_some());
    assert!(api.search_by_place_id.is_some());
    assert!(api.get_suggestions.is_some());
    let options = geocoder.get_places_geocoder().options();
    assert!(options.show_results_while_typing);
    assert!(options.reverse_geocode);
}

#[test]
fn individual_flags_wire_their_capability() {
    let geocoder = geocoder(&GeocoderOptions {
        enable_get_suggestions: true,
        language: Some("fr".to_string()),
        ..GeocoderOptions::default()
    });
    let control = geocoder.get_places_geocoder();
    let api = control.capabilities();
    assert!(api.get_suggestions.is_some());
    assert!(api.reverse_geocode.is_none());
    assert!(control.options().show_results_while_typing);
    assert!(!control.options().reverse_geocode);
    assert_eq!(control.options().language, "fr");
}

#[test]
fn new_without_forward_fails() {
    let result = PlacesGeocoder::<FakePlaces>::new(GeocoderApi::default(), ControlOptions::default());
    assert!(matches!(result, Err(GeocoderError::MissingForwardGeocode)));
}

#[test]
fn set_categories_mirrors_types() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    assert!(geocoder.set_categories(vec![Category::Cafe, Category::Museum]));
    assert_eq!(geocoder.get_categories(), [Category::Cafe, Category::Museum]);
    assert_eq!(geocoder.get_places_geocoder().types(), "Cafe,Museum");
}

#[test]
fn set_categories_over_cap_is_refused() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    assert!(geocoder.add_category("Park"));
    let too_many = Category::ALL[..=MAX_CATEGORY_FILTERS].to_vec();

    assert!(!geocoder.set_categories(too_many));

    assert_eq!(geocoder.get_categories(), [Category::Park]);
    assert_eq!(geocoder.get_places_geocoder().types(), "Park");
}

#[test]
fn add_category_beyond_cap_is_refused() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    for _ in 0..MAX_CATEGORY_FILTERS {
        assert!(geocoder.add_category("Hotel"));
    }
    assert!(!geocoder.add_category("Hotel"));
    assert_eq!(geocoder.get_categories().len(), MAX_CATEGORY_FILTERS);
}

#[test]
fn add_unknown_category_or_country_is_refused() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    assert!(!geocoder.add_category("Spaceport"));
    assert!(!geocoder.add_country("Atlantis"));
    assert!(geocoder.get_categories().is_empty());
    assert!(geocoder.get_countries().is_empty());
}

#[test]
fn countries_mirror_as_joined_codes() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    assert!(geocoder.add_country("usa"));
    assert!(geocoder.add_country("CAN"));
    assert_eq!(geocoder.get_places_geocoder().countries(), "USA,CAN");

    assert!(geocoder.set_countries(vec![Country::MEX]));
    assert_eq!(geocoder.get_places_geocoder().countries(), "MEX");

    geocoder.clear_countries();
    assert_eq!(geocoder.get_places_geocoder().countries(), "");
}

#[test]
fn bounding_box_clears_bias_and_proximity() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    geocoder.set_bias_position(Position::new(-73.97, 40.78));
    assert_eq!(
        geocoder.get_places_geocoder().proximity(),
        Some(Position::new(-73.97, 40.78))
    );

    geocoder.set_bounding_box(nyc_bbox());

    assert_eq!(geocoder.get_bounding_box(), Some(nyc_bbox()));
    assert_eq!(geocoder.get_bias_position(), None);
    let control = geocoder.get_places_geocoder();
    assert_eq!(control.bbox(), &[-74.3, 40.5, -73.7, 40.9]);
    assert_eq!(control.proximity(), None);
}

#[test]
fn bias_position_clears_bounding_box_and_bbox_mirror() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    geocoder.set_bounding_box(nyc_bbox());
    geocoder.set_bias_position(Position::new(2.35, 48.85));

    assert_eq!(geocoder.get_bounding_box(), None);
    assert_eq!(geocoder.get_bias_position(), Some(Position::new(2.35, 48.85)));
    assert!(geocoder.get_places_geocoder().bbox().is_empty());
}

#[test]
fn clear_bounding_box_resets_spatial_filter() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    geocoder.set_bias_position(Position::new(2.35, 48.85));
    geocoder.clear_bounding_box();
    assert_eq!(geocoder.get_bias_position(), None);
    assert_eq!(geocoder.get_places_geocoder().proximity(), None);
}

#[test]
fn clear_filters_resets_state_and_all_mirrors() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    assert!(geocoder.add_category("Bar"));
    assert!(geocoder.add_country("DEU"));
    geocoder.set_bounding_box(nyc_bbox());

    geocoder.clear_filters();

    assert!(geocoder.get_categories().is_empty());
    assert!(geocoder.get_countries().is_empty());
    assert_eq!(geocoder.get_bounding_box(), None);
    assert_eq!(geocoder.get_bias_position(), None);
    let control = geocoder.get_places_geocoder();
    assert_eq!(control.types(), "");
    assert_eq!(control.countries(), "");
    assert!(control.bbox().is_empty());
    assert_eq!(control.proximity(), None);
}

#[test]
fn apply_profile_replaces_every_filter() {
    let mut geocoder = geocoder(&GeocoderOptions::default());
    assert!(geocoder.add_category("Bar"));
    let profile = parse_filter_profile(
        "categories: [Cafe]\ncountries: [JPN]\nbias_position: [139.7, 35.7]\n",
    )
    .unwrap();

    assert!(geocoder.apply_profile(&profile));

    assert_eq!(geocoder.get_categories(), [Category::Cafe]);
    assert_eq!(geocoder.get_countries(), [Country::JPN]);
    assert_eq!(geocoder.get_bias_position(), Some(Position::new(139.7, 35.7)));
    assert_eq!(geocoder.get_places_geocoder().types(), "Cafe");
}

#[tokio::test]
async fn forward_geocode_reads_filters_set_through_the_facade() {
    let fake = Arc::new(FakePlaces::returning(json!([
        { "Position": [-0.12, 51.5], "Address": { "Label": "London, England" } }
    ])));
    let api = GeocoderApi {
        forward_geocode: Some(ForwardGeocoder::new(Arc::clone(&fake), FilterStore::new())),
        ..GeocoderApi::default()
    };
    let mut geocoder = PlacesGeocoder::new(api, ControlOptions::default()).unwrap();
    assert!(geocoder.add_country("GBR"));
    geocoder.set_bounding_box(BoundingBox::new(-0.5, 51.3, 0.3, 51.7));

    let control = geocoder.get_places_geocoder();
    let collection = control.forward_geocode(&control.forward_config("london")).await;

    assert_eq!(collection.features.len(), 1);
    let sent = fake.requests("SearchText");
    assert_eq!(sent[0]["FilterCountries"], json!(["GBR"]));
    assert_eq!(sent[0]["FilterBoundingBox"], json!([-0.5, 51.3, 0.3, 51.7]));
    assert!(sent[0].get("BiasPosition").is_none());
}
