/// Observation data structures for dated lake measurements
use crate::error::{LagoError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Date format used at every external boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A ground-footprint polygon for one observation date.
///
/// Deserialized from the stored JSON payload, e.g.
/// `{"coordinates": [[[x, y], [x, y], ...]]}`. Only the first ring (the
/// outer boundary) is consumed by aggregation; holes are carried but
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Parses a stored polygon payload.
    ///
    /// # Errors
    ///
    /// Returns `PolygonParse` when the payload is not the expected shape;
    /// stored data reaching this point is an infrastructure fault, not a
    /// caller error.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| LagoError::PolygonParse(e.to_string()))
    }

    /// The outer boundary ring. Empty when the polygon has no rings.
    pub fn outer_ring(&self) -> &[[f64; 2]] {
        self.coordinates.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A single dated lake observation
#[derive(Debug, Clone)]
pub struct LakeObservation {
    /// Lake the observation belongs to
    pub lake: String,
    /// Date the observation was made
    pub date: NaiveDate,
    /// Measured water surface metric (pixel area)
    pub pixel: f64,
    /// Ground-truth footprint for the date, when one was captured
    pub polygon: Option<Polygon>,
}

impl Ord for LakeObservation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl PartialOrd for LakeObservation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LakeObservation {
    fn eq(&self, other: &Self) -> bool {
        self.lake == other.lake && self.date == other.date
    }
}

impl Eq for LakeObservation {}

/// Date-descending observation series for one lake.
///
/// The descending order matches the storage contract and is preserved by
/// every consumer; only the past/future partitioner re-sorts, and it does
/// so explicitly on its own copy.
#[derive(Debug, Clone)]
pub struct LakeSeries {
    pub lake: String,
    observations: Vec<LakeObservation>,
}

impl LakeSeries {
    /// Builds a series, establishing the date-descending invariant
    /// regardless of incoming order.
    pub fn new(lake: impl Into<String>, mut observations: Vec<LakeObservation>) -> Self {
        observations.sort();
        observations.reverse();
        LakeSeries {
            lake: lake.into(),
            observations,
        }
    }

    pub fn observations(&self) -> &[LakeObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Most recent observation (index 0 in descending order)
    pub fn latest(&self) -> Option<&LakeObservation> {
        self.observations.first()
    }

    /// Earliest observation (final index in descending order)
    pub fn earliest(&self) -> Option<&LakeObservation> {
        self.observations.last()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds an observation from `(date, pixel, polygon-json)` shorthand.
    pub fn obs(lake: &str, date: &str, pixel: f64, polygon: Option<&str>) -> LakeObservation {
        LakeObservation {
            lake: lake.to_string(),
            date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            pixel,
            polygon: polygon.map(|p| Polygon::from_json(p).unwrap()),
        }
    }

    pub fn series(lake: &str, entries: &[(&str, f64, Option<&str>)]) -> LakeSeries {
        let observations = entries
            .iter()
            .map(|&(date, pixel, polygon)| obs(lake, date, pixel, polygon))
            .collect();
        LakeSeries::new(lake, observations)
    }
}
