//! Coordinate types shared by the filter store, the wire contract and the CLI.
//!
//! Both types serialize as flat arrays (`[lon, lat]` and
//! `[swLon, swLat, neLon, neLat]`), which is how the places service and
//! GeoJSON-style host controls exchange them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A point given as longitude then latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Builds a position, rejecting NaN and infinite components.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NonFiniteCoordinate`] if either value is not finite.
    pub fn try_new(longitude: f64, latitude: f64) -> Result<Self, CoreError> {
        if longitude.is_finite() && latitude.is_finite() {
            Ok(Self::new(longitude, latitude))
        } else {
            Err(CoreError::NonFiniteCoordinate(vec![longitude, latitude]))
        }
    }

    /// Resolves a raw coordinate list into a position.
    ///
    /// Returns `None` unless the slice holds exactly two finite numbers.
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [longitude, latitude] => Self::try_new(*longitude, *latitude).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl From<[f64; 2]> for Position {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Position> for [f64; 2] {
    fn from(position: Position) -> Self {
        position.to_array()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// Parses `"lon,lat"`.
impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_numbers("position", s, 2)?;
        Self::try_new(values[0], values[1])
    }
}

/// A rectangle given by its south-west and north-east corners.
///
/// Corner ordering is not checked here; the places service rejects boxes it
/// cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub southwest_longitude: f64,
    pub southwest_latitude: f64,
    pub northeast_longitude: f64,
    pub northeast_latitude: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(
        southwest_longitude: f64,
        southwest_latitude: f64,
        northeast_longitude: f64,
        northeast_latitude: f64,
    ) -> Self {
        Self {
            southwest_longitude,
            southwest_latitude,
            northeast_longitude,
            northeast_latitude,
        }
    }

    /// Builds a bounding box, rejecting NaN and infinite components.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NonFiniteCoordinate`] if any value is not finite.
    pub fn try_new(
        southwest_longitude: f64,
        southwest_latitude: f64,
        northeast_longitude: f64,
        northeast_latitude: f64,
    ) -> Result<Self, CoreError> {
        let values = [
            southwest_longitude,
            southwest_latitude,
            northeast_longitude,
            northeast_latitude,
        ];
        if values.iter().all(|v| v.is_finite()) {
            Ok(Self::from(values))
        } else {
            Err(CoreError::NonFiniteCoordinate(values.to_vec()))
        }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [
            self.southwest_longitude,
            self.southwest_latitude,
            self.northeast_longitude,
            self.northeast_latitude,
        ]
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([sw_lon, sw_lat, ne_lon, ne_lat]: [f64; 4]) -> Self {
        Self::new(sw_lon, sw_lat, ne_lon, ne_lat)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}

/// Parses `"swLon,swLat,neLon,neLat"`.
impl FromStr for BoundingBox {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = parse_numbers("bounding box", s, 4)?;
        Self::try_new(v[0], v[1], v[2], v[3])
    }
}

fn parse_numbers(kind: &'static str, input: &str, expected: usize) -> Result<Vec<f64>, CoreError> {
    let parse_err = |reason: String| CoreError::Parse {
        kind,
        input: input.to_string(),
        reason,
    };

    let values = input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| parse_err(format!("\"{}\": {e}", part.trim())))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != expected {
        return Err(parse_err(format!(
            "expected {expected} comma-separated numbers, got {}",
            values.len()
        )));
    }
    Ok(values)
}
