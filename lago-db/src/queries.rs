//! Typed query methods for retrieving lake observations.
//!
//! Range bounds are pushed into SQL the same way the ingest keys are
//! stored: `YYYY-MM-DD` TEXT, so `>=`/`<=` comparisons are chronological.
//! Results come back date-descending per the storage contract.

use crate::Database;
use anyhow::Context;
use chrono::NaiveDate;
use lago_core::observation::{LakeObservation, Polygon, DATE_FORMAT};
use rusqlite::params_from_iter;

impl Database {
    /// Distinct lake names known to the database, alphabetical.
    pub fn query_lakes(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt =
            conn.prepare("SELECT DISTINCT lake FROM lake_observations ORDER BY lake")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_lakes returned {} lakes", rows.len());
        Ok(rows)
    }

    /// Observations for one lake inside the optional inclusive bounds,
    /// ordered date-descending.
    ///
    /// Absence of rows is an empty vector. A stored row that fails to
    /// parse (date or polygon payload) is an error, not a skip: data that
    /// passed ingest validation is expected to read back cleanly.
    pub fn query_observations(
        &self,
        lake: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<LakeObservation>> {
        let conn = self.conn.borrow();

        let mut sql = String::from(
            "SELECT lake, date, pixel, polygon FROM lake_observations WHERE lake = ?1",
        );
        let mut params: Vec<String> = vec![lake.to_string()];
        if let Some(start) = start {
            params.push(start.format(DATE_FORMAT).to_string());
            sql.push_str(&format!(" AND date >= ?{}", params.len()));
        }
        if let Some(end) = end {
            params.push(end.format(DATE_FORMAT).to_string());
            sql.push_str(&format!(" AND date <= ?{}", params.len()));
        }
        sql.push_str(" ORDER BY date DESC");

        let mut stmt = conn.prepare(&sql)?;
        let raw_rows: Vec<(String, String, f64, Option<String>)> = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut observations = Vec::with_capacity(raw_rows.len());
        for (lake, date_str, pixel, polygon_str) in raw_rows {
            let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
                .with_context(|| format!("stored date is malformed: {date_str}"))?;
            let polygon = polygon_str
                .map(|payload| {
                    Polygon::from_json(&payload)
                        .with_context(|| format!("stored polygon is malformed for {date_str}"))
                })
                .transpose()?;
            observations.push(LakeObservation {
                lake,
                date,
                pixel,
                polygon,
            });
        }
        log::info!(
            "query: query_observations returned {} records for {}",
            observations.len(),
            lake
        );
        Ok(observations)
    }

    /// The (min, max) observation dates for one lake, `None` when the lake
    /// has no rows.
    pub fn query_date_range(&self, lake: &str) -> anyhow::Result<Option<(NaiveDate, NaiveDate)>> {
        let conn = self.conn.borrow();
        let (min_date, max_date): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM lake_observations WHERE lake = ?1",
            [lake],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        match (min_date, max_date) {
            (Some(min), Some(max)) => {
                let min = NaiveDate::parse_from_str(&min, DATE_FORMAT)
                    .with_context(|| format!("stored date is malformed: {min}"))?;
                let max = NaiveDate::parse_from_str(&max, DATE_FORMAT)
                    .with_context(|| format!("stored date is malformed: {max}"))?;
                Ok(Some((min, max)))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use chrono::NaiveDate;
    use lago_core::observation::DATE_FORMAT;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    /// Helper to create a database with sample observations for two lakes.
    fn sample_lake_db() -> Database {
        let db = Database::new().unwrap();
        let csv = concat!(
            "van,2024-03-01,16364.04,\n",
            "van,2024-03-03,16285.28,\"{\"\"coordinates\"\": [[[1.0, 2.0], [3.0, 4.0], [1.0, 2.0]]]}\"\n",
            "van,2024-03-05,16100.00,\n",
            "tuz,2024-03-02,9000.50,\n",
        );
        db.load_observations(csv).unwrap();
        db
    }

    #[test]
    fn query_lakes_is_alphabetical_and_distinct() {
        let db = sample_lake_db();
        assert_eq!(
            db.query_lakes().unwrap(),
            vec!["tuz".to_string(), "van".to_string()]
        );
    }

    #[test]
    fn query_observations_returns_date_descending() {
        let db = sample_lake_db();
        let rows = db.query_observations("van", None, None).unwrap();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-03-05"), date("2024-03-03"), date("2024-03-01")]
        );
    }

    #[test]
    fn query_observations_applies_inclusive_bounds() {
        let db = sample_lake_db();
        let rows = db
            .query_observations("van", Some(date("2024-03-03")), Some(date("2024-03-05")))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, date("2024-03-05"));
        assert_eq!(rows[1].date, date("2024-03-03"));
    }

    #[test]
    fn query_observations_parses_stored_polygons() {
        let db = sample_lake_db();
        let rows = db.query_observations("van", None, None).unwrap();
        let with_polygon = rows.iter().find(|r| r.polygon.is_some()).unwrap();
        assert_eq!(with_polygon.date, date("2024-03-03"));
        let ring = with_polygon.polygon.as_ref().unwrap().outer_ring();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring[0], [1.0, 2.0]);
    }

    #[test]
    fn query_observations_unknown_lake_is_empty_not_an_error() {
        let db = sample_lake_db();
        let rows = db.query_observations("atlantis", None, None).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn query_date_range_per_lake() {
        let db = sample_lake_db();
        let (min, max) = db.query_date_range("van").unwrap().unwrap();
        assert_eq!(min, date("2024-03-01"));
        assert_eq!(max, date("2024-03-05"));
        assert!(db.query_date_range("atlantis").unwrap().is_none());
    }
}
