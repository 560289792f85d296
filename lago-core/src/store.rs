/// Observation store contract
use crate::error::Result;
use crate::observation::LakeObservation;
use chrono::NaiveDate;

/// Persistent observation collaborator, injected per call so every request
/// gets an independent, swappable-for-testing data source.
///
/// `query` returns the lake's observations inside the optional inclusive
/// bounds, ordered date-descending. Absence of rows is an empty list, not
/// an error, and results are never silently truncated.
pub trait ObservationStore {
    /// Distinct lake names known to the store.
    fn lakes(&self) -> Result<Vec<String>>;

    /// Range query for one lake, date-descending.
    fn query(
        &self,
        lake: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<LakeObservation>>;
}
