/// Fallback image resolution over a filtered observation series
use crate::error::{LagoError, Result};
use crate::observation::LakeSeries;
use chrono::NaiveDate;
use std::fmt;

/// Processing stage of a stored capture. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageVariant {
    #[default]
    Raw,
    Border,
}

impl ImageVariant {
    /// Parses the optional caller-supplied variant name. Absent defaults
    /// to `Raw`; anything outside the known set is a validation error.
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(ImageVariant::Raw),
            Some("raw") => Ok(ImageVariant::Raw),
            Some("border") => Ok(ImageVariant::Border),
            Some(other) => Err(LagoError::InvalidVariant(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageVariant::Raw => "raw",
            ImageVariant::Border => "border",
        }
    }
}

impl fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only image asset collaborator, keyed by `(lake, date, variant)`.
///
/// A miss is `Ok(None)`, never an error; only genuine read failures
/// surface as `Err`. Implementations must resolve same-date ties
/// deterministically so repeated lookups agree.
pub trait AssetStore {
    fn lookup(&self, lake: &str, date: NaiveDate, variant: ImageVariant) -> Result<Option<Vec<u8>>>;
}

/// Which boundary record of the date-descending subset anchors the search.
///
/// Each anchor carries its own fallback direction: the latest anchor walks
/// toward earlier dates, the earliest anchor toward later dates, so both
/// searches stay inside the subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesAnchor {
    /// Index 0 of the descending series (most recent observation)
    Latest,
    /// Final index of the descending series (earliest observation)
    Earliest,
}

/// Outcome of fallback resolution for one anchor.
///
/// `date` is the anchor's own date whenever no asset was found anywhere in
/// the subset; otherwise it is the date the asset was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub date: NaiveDate,
    pub image: Option<Vec<u8>>,
}

/// Finds the closest usable image for an anchor of an already-filtered
/// series, walking outward one record at a time until a stored asset turns
/// up or the subset is exhausted.
///
/// # Errors
///
/// `NoObservations` when the series is empty (there is no anchor record to
/// start from); asset-store read failures propagate unchanged. A store
/// miss at every record is not an error: the anchor date is reported with
/// a null image.
pub fn resolve_image(
    store: &dyn AssetStore,
    series: &LakeSeries,
    anchor: SeriesAnchor,
    variant: ImageVariant,
) -> Result<ResolvedImage> {
    let walk: Vec<&crate::observation::LakeObservation> = match anchor {
        SeriesAnchor::Latest => series.observations().iter().collect(),
        SeriesAnchor::Earliest => series.observations().iter().rev().collect(),
    };
    let anchor_record = walk.first().ok_or(LagoError::NoObservations)?;
    let anchor_date = anchor_record.date;

    for record in walk {
        if let Some(bytes) = store.lookup(&series.lake, record.date, variant)? {
            return Ok(ResolvedImage {
                date: record.date,
                image: Some(bytes),
            });
        }
    }

    Ok(ResolvedImage {
        date: anchor_date,
        image: None,
    })
}
