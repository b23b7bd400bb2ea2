use thiserror::Error;

/// Why a filter mutation was refused. The filter state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{count} categories exceeds the maximum of {max} at a time")]
    TooManyCategories { count: usize, max: usize },

    #[error("{count} countries exceeds the maximum of {max} at a time")]
    TooManyCountries { count: usize, max: usize },

    #[error("\"{0}\" is not a valid category filter")]
    UnknownCategory(String),

    #[error("\"{0}\" is not a valid country filter")]
    UnknownCountry(String),
}

/// Errors raised while assembling a geocoder.
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("a forward geocode capability is required to build a places geocoder")]
    MissingForwardGeocode,
}
