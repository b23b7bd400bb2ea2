//! Query configurations handed to the provider operations by the search
//! control, one per operation.

use geoplaces_core::{BoundingBox, Position};

/// Free-text search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardConfig {
    pub query: String,
    pub bias_position: Option<Position>,
    pub language: Option<String>,
}

impl ForwardConfig {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Lookup of the places nearest a position.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseConfig {
    pub query: Position,
    /// Preferred languages; only the first is sent.
    pub language: Vec<String>,
    pub max_results: Option<u32>,
}

impl ReverseConfig {
    #[must_use]
    pub fn new(query: Position) -> Self {
        Self {
            query,
            language: Vec::new(),
            max_results: None,
        }
    }
}

/// Lookup of a single place by its opaque id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceConfig {
    pub query: String,
    /// Preferred languages; only the first is sent.
    pub language: Vec<String>,
}

/// Type-ahead suggestions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestConfig {
    pub query: String,
    pub bias_position: Option<Position>,
    pub max_results: Option<u32>,
    pub bbox: Option<BoundingBox>,
    /// Comma-joined alpha-3 codes, as kept by the control.
    pub countries: Option<String>,
    /// Preferred languages; only the first is sent.
    pub language: Vec<String>,
}
