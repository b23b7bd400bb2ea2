//! Search command handlers and result printing for the CLI.
//!
//! Filters are applied to the geocoder once, before the command runs. Each
//! handler then composes its query the way the search control would and
//! prints whatever the capability returns; a failed service call prints
//! "no results" like an empty one, with the cause in the log.

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use geoplaces_client::PlacesService;
use geoplaces_core::{load_filter_profile, BoundingBox, Category, Country, Position};
use geoplaces_geocoder::render::split_label;
use geoplaces_geocoder::{Feature, PlacesGeocoder, RenderItem, SearchControl, Suggestion};
use serde::Serialize;

/// Filter flags accepted by every search command.
#[derive(Debug, Default, Args)]
pub(crate) struct FilterArgs {
    /// Category to filter by, e.g. Cafe or "Shopping Mall" (repeatable)
    #[arg(long = "category", global = true)]
    pub(crate) categories: Vec<String>,

    /// ISO alpha-3 country code to filter by, e.g. USA (repeatable)
    #[arg(long = "country", global = true)]
    pub(crate) countries: Vec<String>,

    /// Bounding box as swLon,swLat,neLon,neLat
    #[arg(long, global = true, allow_hyphen_values = true, conflicts_with = "bias")]
    pub(crate) bbox: Option<BoundingBox>,

    /// Bias position as lon,lat
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub(crate) bias: Option<Position>,

    /// YAML filter profile applied before the other filter flags
    #[arg(long, global = true)]
    pub(crate) profile: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
    Html,
}

/// Applies the profile first, then the individual flags on top of it.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or any filter is
/// refused (unknown token, too many entries).
pub(crate) fn apply_filters<C>(
    geocoder: &mut PlacesGeocoder<C>,
    args: &FilterArgs,
) -> anyhow::Result<()> {
    if let Some(path) = &args.profile {
        let profile = load_filter_profile(path)?;
        if !geocoder.apply_profile(&profile) {
            bail!("filter profile {} was rejected", path.display());
        }
    }
    for category in &args.categories {
        if !geocoder.add_category(category) {
            bail!(
                "category filter \"{category}\" was rejected; \
                 run `geoplaces categories` for the accepted names"
            );
        }
    }
    for country in &args.countries {
        if !geocoder.add_country(country) {
            bail!(
                "country filter \"{country}\" was rejected; \
                 run `geoplaces countries` for the accepted codes"
            );
        }
    }
    if let Some(bbox) = args.bbox {
        geocoder.set_bounding_box(bbox);
    }
    if let Some(bias) = args.bias {
        geocoder.set_bias_position(bias);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub(crate) async fn run_forward<C: PlacesService>(
    geocoder: &PlacesGeocoder<C>,
    query: &str,
    limit: Option<u32>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let control = geocoder.get_places_geocoder();
    let mut collection = control.forward_geocode(&control.forward_config(query)).await;
    if let Some(limit) = limit {
        collection.features.truncate(limit as usize);
    }
    print_features(control, &collection, &collection.features, format)
}

/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub(crate) async fn run_reverse<C: PlacesService>(
    geocoder: &PlacesGeocoder<C>,
    position: Position,
    limit: Option<u32>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let control = geocoder.get_places_geocoder();
    let mut config = control.reverse_config(position);
    if limit.is_some() {
        config.max_results = limit;
    }
    let Some(collection) = control.reverse_geocode(&config).await else {
        bail!("reverse geocoding is not enabled");
    };
    print_features(control, &collection, &collection.features, format)
}

/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub(crate) async fn run_place<C: PlacesService>(
    geocoder: &PlacesGeocoder<C>,
    place_id: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let control = geocoder.get_places_geocoder();
    let Some(result) = control
        .search_by_place_id(&control.place_config(place_id))
        .await
    else {
        bail!("place lookup is not enabled");
    };
    print_features(control, &result, result.place.as_slice(), format)
}

/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub(crate) async fn run_suggest<C: PlacesService>(
    geocoder: &PlacesGeocoder<C>,
    query: &str,
    limit: Option<u32>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let control = geocoder.get_places_geocoder();
    let mut config = control.suggest_config(query);
    if limit.is_some() {
        config.max_results = limit;
    }
    let Some(list) = control.get_suggestions(&config).await else {
        bail!("suggestions are not enabled");
    };
    match format {
        OutputFormat::Json => print_json(&list),
        OutputFormat::Html => {
            print_html(control, list.suggestions.iter().map(RenderItem::from));
            Ok(())
        }
        OutputFormat::Text => {
            print_suggestion_table(&list.suggestions);
            Ok(())
        }
    }
}

fn print_features<C, T: Serialize>(
    control: &SearchControl<C>,
    whole: &T,
    features: &[Feature],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(whole),
        OutputFormat::Html => {
            print_html(control, features.iter().map(RenderItem::from));
            Ok(())
        }
        OutputFormat::Text => {
            print_feature_table(features);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_html<'a, C>(control: &SearchControl<C>, items: impl Iterator<Item = RenderItem<'a>>) {
    for item in items {
        println!("{}", control.render(&item));
    }
}

pub(crate) fn feature_row(feature: &Feature) -> String {
    let (title, address) = split_label(feature.label());
    let position = feature.coordinates();
    format!(
        "{:<32}{:<44}{:>11.5} {:>10.5}",
        title,
        address.unwrap_or("\u{2014}"),
        position.longitude,
        position.latitude
    )
}

fn print_feature_table(features: &[Feature]) {
    if features.is_empty() {
        println!("no results");
        return;
    }
    println!("{:<32}{:<44}{:>11} {:>10}", "NAME", "ADDRESS", "LON", "LAT");
    for feature in features {
        println!("{}", feature_row(feature));
    }
}

pub(crate) fn suggestion_row(suggestion: &Suggestion) -> String {
    let (title, address) = split_label(&suggestion.text);
    format!(
        "{:<32}{:<44}{}",
        title,
        address.unwrap_or("\u{2014}"),
        suggestion.place_id().unwrap_or("(query)")
    )
}

fn print_suggestion_table(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("no suggestions");
        return;
    }
    println!("{:<32}{:<44}PLACE ID", "NAME", "ADDRESS");
    for suggestion in suggestions {
        println!("{}", suggestion_row(suggestion));
    }
}

#[derive(Serialize)]
struct Listing {
    token: &'static str,
    name: String,
}

fn print_listing(rows: Vec<Listing>, header: &str, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(&rows);
    }
    println!("{header:<20}NAME");
    for row in rows {
        println!("{:<20}{}", row.token, row.name);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub(crate) fn print_categories(format: OutputFormat) -> anyhow::Result<()> {
    let rows = Category::ALL
        .iter()
        .map(|c| Listing {
            token: c.as_str(),
            name: c.display_name(),
        })
        .collect();
    print_listing(rows, "CATEGORY", format)
}

/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub(crate) fn print_countries(format: OutputFormat) -> anyhow::Result<()> {
    let rows = Country::ALL
        .iter()
        .map(|c| Listing {
            token: c.code(),
            name: c.name().to_string(),
        })
        .collect();
    print_listing(rows, "CODE", format)
}
