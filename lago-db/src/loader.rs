//! CSV ingest for populating the in-memory observation database.
//!
//! Expected format (no headers): `lake,date(YYYY-MM-DD),pixel,polygon`.
//! The `polygon` field is optional; when present it is a quoted JSON
//! payload of the form `{"coordinates": [[[x, y], ...]]}` and is parsed
//! before insertion so only well-formed footprints reach the table.

use crate::Database;
use chrono::NaiveDate;
use lago_core::observation::{Polygon, DATE_FORMAT};
use rusqlite::params;

impl Database {
    /// Load lake observations from a CSV string.
    ///
    /// Rows with an empty lake or unparseable date/pixel/polygon field are
    /// skipped and counted rather than aborting the load, matching how the
    /// ingest pipeline tolerates partially bad exports.
    ///
    /// # Example CSV
    /// ```text
    /// van,2024-03-01,16364.04,
    /// van,2024-03-03,16285.28,"{""coordinates"": [[[1.0, 2.0], [3.0, 4.0]]]}"
    /// ```
    pub fn load_observations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let lake = r.get(0).unwrap_or("").trim();
            let date = r.get(1).unwrap_or("").trim();
            let pixel_str = r.get(2).unwrap_or("").trim();
            let polygon_str = r.get(3).unwrap_or("").trim();

            if lake.is_empty() || NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
                skipped += 1;
                continue;
            }

            let pixel: f64 = match pixel_str.parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            let polygon = if polygon_str.is_empty() {
                None
            } else if Polygon::from_json(polygon_str).is_ok() {
                Some(polygon_str)
            } else {
                skipped += 1;
                continue;
            };

            conn.execute(
                "INSERT OR REPLACE INTO lake_observations (lake, date, pixel, polygon)
                 VALUES (?1, ?2, ?3, ?4)",
                params![lake, date, pixel, polygon],
            )?;
            count += 1;
        }
        log::info!(
            "loader: loaded {} observations, skipped {} bad rows",
            count,
            skipped
        );
        Ok(())
    }
}
