/// Polygon-to-density aggregation across a dated observation series
use crate::coord::Coord;
use crate::error::{LagoError, Result};
use crate::observation::LakeSeries;
use serde::Serialize;
use std::collections::BTreeMap;

/// One weighted vertex of the density surface.
///
/// `y` is already flipped (`max_y - y_original`) so higher ground renders
/// upward; `weight` is how many times the exact original pair occurred
/// across every processed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
    pub weight: u32,
}

/// Render-ready aggregate: the weighted point cloud, the most recent
/// footprint outline for overlay, and the flip constant used for `y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityMap {
    pub points: Vec<DensityPoint>,
    /// Outer ring of the most recent polygon-bearing observation, in its
    /// original (unflipped) coordinates.
    pub overlay: Vec<Coord>,
    /// Maximum y across every processed vertex; `flip(y) = max_y - y`.
    pub max_y: f64,
}

/// Collapses every footprint in an already-filtered series into a weighted
/// point cloud of recurring boundary vertices.
///
/// Observations without a polygon are skipped. Counting is by exact
/// coordinate equality, including repeats inside a single ring, so the sum
/// of all weights equals the total vertex count processed. Output order is
/// deterministic (coordinates ascending by x then y), making repeated runs
/// bit-identical.
///
/// # Errors
///
/// `NoPolygonData` when no observation carries a polygon; `EmptyAggregate`
/// when polygons exist but contribute no vertices (degenerate rings).
pub fn aggregate(series: &LakeSeries) -> Result<DensityMap> {
    let mut counts: BTreeMap<Coord, u32> = BTreeMap::new();
    let mut overlay: Option<Vec<Coord>> = None;
    let mut max_y = f64::NEG_INFINITY;

    for observation in series.observations() {
        let Some(polygon) = &observation.polygon else {
            continue;
        };
        let ring = polygon.outer_ring();
        if overlay.is_none() {
            // Series order is date-descending, so the first polygon seen
            // is the most recent outline.
            overlay = Some(ring.iter().map(|&pair| Coord::from(pair)).collect());
        }
        for &pair in ring {
            let coord = Coord::from(pair);
            if coord.y > max_y {
                max_y = coord.y;
            }
            *counts.entry(coord).or_insert(0) += 1;
        }
    }

    let overlay = overlay.ok_or(LagoError::NoPolygonData)?;
    if counts.is_empty() {
        return Err(LagoError::EmptyAggregate);
    }

    let points = counts
        .into_iter()
        .map(|(coord, weight)| DensityPoint {
            x: coord.x,
            y: max_y - coord.y,
            weight,
        })
        .collect();

    Ok(DensityMap {
        points,
        overlay,
        max_y,
    })
}
