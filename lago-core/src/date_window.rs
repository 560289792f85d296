/// Optional inclusive [start, end] date window with boundary validation
use crate::error::{LagoError, Result};
use crate::observation::{LakeObservation, LakeSeries, DATE_FORMAT};
use chrono::NaiveDate;

/// An optional inclusive date window.
///
/// Validation happens at construction: both `parse` and `from_dates`
/// reject an inverted window up front, before any store is consulted.
/// An empty *result* is not an error; an impossible *request* is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Window with no bounds; filtering with it returns the input unchanged.
    pub fn unbounded() -> Self {
        DateWindow::default()
    }

    /// Parses optional `YYYY-MM-DD` boundary strings.
    ///
    /// # Errors
    ///
    /// `InvalidDateFormat` for a malformed bound, `EmptyRange` when both
    /// bounds are present and start > end.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = start.map(parse_date).transpose()?;
        let end = end.map(parse_date).transpose()?;
        Self::from_dates(start, end)
    }

    /// Builds a window from already-parsed dates, validating ordering.
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(LagoError::EmptyRange { start: s, end: e });
            }
        }
        Ok(DateWindow { start, end })
    }

    /// Inclusive containment check against both optional bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }

    /// Retains the observations inside the window, preserving the series'
    /// date-descending order. An empty result is a valid outcome.
    pub fn filter(&self, series: &LakeSeries) -> LakeSeries {
        let retained: Vec<LakeObservation> = series
            .observations()
            .iter()
            .filter(|obs| self.contains(obs.date))
            .cloned()
            .collect();
        LakeSeries::new(series.lake.clone(), retained)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| LagoError::InvalidDateFormat(value.to_string()))
}
