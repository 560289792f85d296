//! SQL schema for the in-memory observation database.

/// Returns the full SQL schema as a single batch string.
///
/// One table, `lake_observations`, holds every dated measurement:
/// `lake` and `date` (TEXT, `YYYY-MM-DD` so lexicographic order equals
/// chronological order), the `pixel` measurement, and the optional
/// `polygon` JSON payload. Uniqueness per (lake, date) is the primary key.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS lake_observations (
        lake TEXT NOT NULL,
        date TEXT NOT NULL,
        pixel REAL NOT NULL,
        polygon TEXT,
        PRIMARY KEY (lake, date)
    );
    CREATE INDEX IF NOT EXISTS idx_lake_obs_lake ON lake_observations(lake);
    CREATE INDEX IF NOT EXISTS idx_lake_obs_date ON lake_observations(date);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_table_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='lake_observations'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1, "lake_observations table should exist");

        for idx in ["idx_lake_obs_lake", "idx_lake_obs_date"] {
            let count: i64 = conn
                .query_row(
                    &format!(
                        "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name='{}'",
                        idx
                    ),
                    [],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Index '{}' should exist", idx);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
