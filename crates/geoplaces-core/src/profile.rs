//! Saved filter profiles loaded from YAML.
//!
//! ```yaml
//! categories: [Cafe, "Shopping Mall"]
//! countries: [USA, CAN]
//! bias_position: [-122.33, 47.61]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{
    BoundingBox, Category, ConfigError, Country, Position, MAX_CATEGORY_FILTERS,
    MAX_COUNTRY_FILTERS,
};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    countries: Vec<String>,
    #[serde(default)]
    bounding_box: Option<BoundingBox>,
    #[serde(default)]
    bias_position: Option<Position>,
}

/// A validated set of filters ready to be applied to a geocoder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterProfile {
    pub categories: Vec<Category>,
    pub countries: Vec<Country>,
    pub bounding_box: Option<BoundingBox>,
    pub bias_position: Option<Position>,
}

/// Load and validate a filter profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_filter_profile(path: &Path) -> Result<FilterProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_filter_profile(&content)
}

/// Parse and validate a filter profile from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_filter_profile(yaml: &str) -> Result<FilterProfile, ConfigError> {
    let raw: RawProfile = serde_yaml::from_str(yaml)?;
    validate_profile(raw)
}

fn validate_profile(raw: RawProfile) -> Result<FilterProfile, ConfigError> {
    if raw.categories.len() > MAX_CATEGORY_FILTERS {
        return Err(ConfigError::Validation(format!(
            "{} categories given; at most {MAX_CATEGORY_FILTERS} are allowed",
            raw.categories.len()
        )));
    }
    if raw.countries.len() > MAX_COUNTRY_FILTERS {
        return Err(ConfigError::Validation(format!(
            "{} countries given; at most {MAX_COUNTRY_FILTERS} are allowed",
            raw.countries.len()
        )));
    }
    if raw.bounding_box.is_some() && raw.bias_position.is_some() {
        return Err(ConfigError::Validation(
            "bounding_box and bias_position are mutually exclusive".to_string(),
        ));
    }

    let categories = raw
        .categories
        .iter()
        .map(|c| c.parse::<Category>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;
    let countries = raw
        .countries
        .iter()
        .map(|c| c.parse::<Country>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    let bounding_box = raw
        .bounding_box
        .map(|b| {
            let [a, b, c, d] = b.to_array();
            BoundingBox::try_new(a, b, c, d)
        })
        .transpose()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;
    let bias_position = raw
        .bias_position
        .map(|p| Position::try_new(p.longitude, p.latitude))
        .transpose()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(FilterProfile {
        categories,
        countries,
        bounding_box,
        bias_position,
    })
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
