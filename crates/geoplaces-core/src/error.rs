use thiserror::Error;

/// Errors raised while constructing or parsing domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinates must be finite, got {0:?}")]
    NonFiniteCoordinate(Vec<f64>),

    #[error("unknown category: \"{0}\"")]
    UnknownCategory(String),

    #[error("unknown country code: \"{0}\"")]
    UnknownCountry(String),

    #[error("invalid {kind} \"{input}\": {reason}")]
    Parse {
        kind: &'static str,
        input: String,
        reason: String,
    },
}

/// Errors raised while loading environment configuration or filter profiles.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read filter profile {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse filter profile: {0}")]
    ProfileParse(#[from] serde_yaml::Error),

    #[error("filter profile validation failed: {0}")]
    Validation(String),
}
