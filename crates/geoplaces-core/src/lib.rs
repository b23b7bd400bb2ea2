pub mod app_config;
pub mod category;
pub mod config;
pub mod country;
pub mod error;
pub mod geo;
pub mod profile;

pub use app_config::PlacesConfig;
pub use category::Category;
pub use config::{load_places_config, load_places_config_from_env};
pub use country::Country;
pub use error::{ConfigError, CoreError};
pub use geo::{BoundingBox, Position};
pub use profile::{load_filter_profile, parse_filter_profile, FilterProfile};

/// Maximum number of categories the remote service accepts in one filter.
pub const MAX_CATEGORY_FILTERS: usize = 5;

/// Maximum number of countries the remote service accepts in one filter.
pub const MAX_COUNTRY_FILTERS: usize = 100;

/// Language tag sent when the caller does not specify one.
pub const DEFAULT_LANGUAGE: &str = "en";
