use geoplaces_core::{
    BoundingBox, Category, Country, Position, MAX_CATEGORY_FILTERS, MAX_COUNTRY_FILTERS,
};

use super::*;

fn nyc_bbox() -> BoundingBox {
    BoundingBox::new(-74.3, 40.5, -73.7, 40.9)
}

#[test]
fn new_state_is_empty() {
    let state = FilterState::new();
    assert!(state.categories().is_empty());
    assert!(state.countries().is_empty());
    assert_eq!(state.spatial(), SpatialFilter::None);
}

#[test]
fn set_categories_within_cap_is_returned_verbatim() {
    let mut state = FilterState::new();
    let categories = vec![Category::Cafe, Category::Park, Category::Cafe];
    state.set_categories(categories.clone()).unwrap();
    assert_eq!(state.categories(), categories.as_slice());
}

#[test]
fn set_categories_over_cap_keeps_previous_list() {
    let mut state = FilterState::new();
    state.set_categories(vec![Category::Bank]).unwrap();

    let too_many = Category::ALL[..=MAX_CATEGORY_FILTERS].to_vec();
    let err = state.set_categories(too_many).unwrap_err();

    assert_eq!(
        err,
        FilterError::TooManyCategories {
            count: MAX_CATEGORY_FILTERS + 1,
            max: MAX_CATEGORY_FILTERS
        }
    );
    assert_eq!(state.categories(), &[Category::Bank]);
}

#[test]
fn add_category_past_cap_fails() {
    let mut state = FilterState::new();
    for _ in 0..MAX_CATEGORY_FILTERS {
        state.add_category("Hotel").unwrap();
    }
    let err = state.add_category("Museum").unwrap_err();
    assert!(matches!(err, FilterError::TooManyCategories { .. }));
    assert_eq!(state.categories().len(), MAX_CATEGORY_FILTERS);
}

#[test]
fn add_country_past_cap_fails() {
    let mut state = FilterState::new();
    for _ in 0..MAX_COUNTRY_FILTERS {
        state.add_country("USA").unwrap();
    }
    let err = state.add_country("CAN").unwrap_err();
    assert!(matches!(
        err,
        FilterError::TooManyCountries { count: 101, max: 100 }
    ));
    assert_eq!(state.countries().len(), MAX_COUNTRY_FILTERS);
}

#[test]
fn add_category_strips_whitespace_before_resolving() {
    let mut state = FilterState::new();
    assert_eq!(state.add_category(" Shopping Mall ").unwrap(), Category::ShoppingMall);
    assert_eq!(state.categories_token(), "ShoppingMall");
}

#[test]
fn add_category_rejects_unknown_name() {
    let mut state = FilterState::new();
    let err = state.add_category("Spaceport").unwrap_err();
    assert_eq!(err, FilterError::UnknownCategory("Spaceport".to_string()));
    assert!(state.categories().is_empty());
}

#[test]
fn add_country_resolves_case_insensitively() {
    let mut state = FilterState::new();
    assert_eq!(state.add_country("usa").unwrap(), Country::USA);
    state.add_country(" CAN").unwrap();
    assert_eq!(state.countries_token(), "USA,CAN");
}

#[test]
fn add_country_rejects_alpha2_codes() {
    let mut state = FilterState::new();
    let err = state.add_country("US").unwrap_err();
    assert_eq!(err, FilterError::UnknownCountry("US".to_string()));
}

#[test]
fn set_countries_over_cap_is_rejected() {
    let mut state = FilterState::new();
    let too_many: Vec<Country> = Country::ALL.iter().copied().take(101).collect();
    assert!(matches!(
        state.set_countries(too_many),
        Err(FilterError::TooManyCountries { count: 101, max: 100 })
    ));
    assert!(state.countries().is_empty());
}

#[test]
fn bounding_box_replaces_bias_position() {
    let mut state = FilterState::new();
    state.set_bias_position(Position::new(-73.97, 40.78));
    state.set_bounding_box(nyc_bbox());
    assert_eq!(state.bounding_box(), Some(nyc_bbox()));
    assert_eq!(state.bias_position(), None);
}

#[test]
fn bias_position_replaces_bounding_box() {
    let mut state = FilterState::new();
    state.set_bounding_box(nyc_bbox());
    state.set_bias_position(Position::new(2.35, 48.85));
    assert_eq!(state.bounding_box(), None);
    assert_eq!(state.bias_position(), Some(Position::new(2.35, 48.85)));
}

#[test]
fn clear_bounding_box_resets_spatial_even_when_bias_is_active() {
    let mut state = FilterState::new();
    state.set_bias_position(Position::new(2.35, 48.85));
    state.clear_bounding_box();
    assert_eq!(state.spatial(), SpatialFilter::None);
}

#[test]
fn clear_all_filters_resets_every_field() {
    let mut state = FilterState::new();
    state.add_category("Cafe").unwrap();
    state.add_country("FRA").unwrap();
    state.set_bounding_box(nyc_bbox());

    state.clear_all_filters();

    assert_eq!(state, FilterState::new());
}

#[test]
fn store_clones_share_state() {
    let store = FilterStore::new();
    let other = store.clone();
    other.update(|s| s.set_bias_position(Position::new(1.0, 2.0)));
    assert_eq!(
        store.read(FilterState::bias_position),
        Some(Position::new(1.0, 2.0))
    );
}

#[test]
fn snapshot_is_detached_from_later_updates() {
    let store = FilterStore::new();
    store.update(|s| s.add_category("Bar")).unwrap();
    let snapshot = store.snapshot();
    store.update(FilterState::clear_categories);
    assert_eq!(snapshot.categories(), &[Category::Bar]);
    assert!(store.read(|s| s.categories().is_empty()));
}
