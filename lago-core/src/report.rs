//! Query facade composing the store collaborators with the core
//! components: window filtering, fallback image resolution, and the
//! polygon/series listings consumed by charts and callers.

use crate::date_window::DateWindow;
use crate::error::{LagoError, Result};
use crate::image::{resolve_image, AssetStore, ImageVariant, ResolvedImage, SeriesAnchor};
use crate::observation::{LakeSeries, Polygon};
use crate::store::ObservationStore;
use chrono::NaiveDate;
use serde::Serialize;

/// A (date, pixel) sample of the filtered series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelSample {
    pub date: NaiveDate,
    pub pixel: f64,
}

/// One dated footprint from the polygon history listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonEntry {
    pub date: NaiveDate,
    pub polygon: Polygon,
}

/// The filtered series for a range together with its boundary dates and
/// the best available capture for each boundary.
#[derive(Debug, Clone)]
pub struct SeriesReport {
    pub lake: String,
    pub samples: Vec<PixelSample>,
    pub count: usize,
    pub latest_date: NaiveDate,
    pub earliest_date: NaiveDate,
    pub latest_image: ResolvedImage,
    pub earliest_image: ResolvedImage,
}

/// Distinct lake names.
///
/// # Errors
///
/// `NoObservations` when the store is empty, so callers can distinguish
/// "nothing ingested yet" from a listing.
pub fn list_lakes(store: &dyn ObservationStore) -> Result<Vec<String>> {
    let lakes = store.lakes()?;
    if lakes.is_empty() {
        return Err(LagoError::NoObservations);
    }
    Ok(lakes)
}

/// Queries one lake and applies the window filter.
///
/// The store may already restrict by the window's bounds; the filter is
/// applied here regardless so the invariant does not depend on the
/// collaborator. An empty outcome is `NoObservations`, never a silent
/// empty success.
pub fn fetch_series(
    store: &dyn ObservationStore,
    lake: &str,
    window: &DateWindow,
) -> Result<LakeSeries> {
    let observations = store.query(lake, window.start, window.end)?;
    let series = window.filter(&LakeSeries::new(lake, observations));
    if series.is_empty() {
        return Err(LagoError::NoObservations);
    }
    log::info!(
        "fetch_series: {} observations for {} in {:?}..{:?}",
        series.len(),
        lake,
        window.start,
        window.end
    );
    Ok(series)
}

/// The filtered (date, pixel) listing plus both boundary images, each
/// resolved independently with its own fallback direction.
pub fn series_report(
    observations: &dyn ObservationStore,
    assets: &dyn AssetStore,
    lake: &str,
    window: &DateWindow,
    variant: ImageVariant,
) -> Result<SeriesReport> {
    let series = fetch_series(observations, lake, window)?;

    let samples: Vec<PixelSample> = series
        .observations()
        .iter()
        .map(|obs| PixelSample {
            date: obs.date,
            pixel: obs.pixel,
        })
        .collect();

    // fetch_series guarantees a non-empty series, so both anchors exist.
    let latest_image = resolve_image(assets, &series, SeriesAnchor::Latest, variant)?;
    let earliest_image = resolve_image(assets, &series, SeriesAnchor::Earliest, variant)?;
    let latest_date = series.latest().ok_or(LagoError::NoObservations)?.date;
    let earliest_date = series.earliest().ok_or(LagoError::NoObservations)?.date;

    Ok(SeriesReport {
        lake: series.lake.clone(),
        count: samples.len(),
        samples,
        latest_date,
        earliest_date,
        latest_image,
        earliest_image,
    })
}

/// Dated footprints only, date-descending; observations without a polygon
/// are dropped from the listing.
pub fn polygon_history(
    store: &dyn ObservationStore,
    lake: &str,
    window: &DateWindow,
) -> Result<Vec<PolygonEntry>> {
    let series = fetch_series(store, lake, window)?;
    let entries: Vec<PolygonEntry> = series
        .observations()
        .iter()
        .filter_map(|obs| {
            obs.polygon.as_ref().map(|polygon| PolygonEntry {
                date: obs.date,
                polygon: polygon.clone(),
            })
        })
        .collect();
    if entries.is_empty() {
        return Err(LagoError::NoPolygonData);
    }
    Ok(entries)
}
