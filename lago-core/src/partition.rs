/// Past/future partitioning of a series around a reference date
use crate::observation::LakeSeries;
use chrono::NaiveDate;

/// A series split around a reference date, ready for trend plotting.
/// Both halves are chronological (ascending), unlike the source series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPartition {
    /// Observations with `date <= reference`, ascending
    pub past: Vec<(NaiveDate, f64)>,
    /// Observations with `date > reference`, ascending
    pub future: Vec<(NaiveDate, f64)>,
}

/// Splits a series strictly at the reference date (inclusive on the past
/// side) and re-sorts each half ascending. The incoming order is not
/// assumed; either half may come out empty.
pub fn partition(series: &LakeSeries, reference: NaiveDate) -> SeriesPartition {
    let mut past = Vec::new();
    let mut future = Vec::new();
    for observation in series.observations() {
        let entry = (observation.date, observation.pixel);
        if observation.date <= reference {
            past.push(entry);
        } else {
            future.push(entry);
        }
    }
    past.sort_by_key(|(date, _)| *date);
    future.sort_by_key(|(date, _)| *date);
    SeriesPartition { past, future }
}
