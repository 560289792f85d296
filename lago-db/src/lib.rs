//! In-memory SQLite observation store for lake data.
//!
//! Loads CSV exports into an in-memory SQLite database and exposes typed
//! query methods plus the [`ObservationStore`] collaborator contract for
//! the analytics core.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper so the handle is cheaply cloneable
//!   within one request's single thread
//! - In-memory SQLite via `rusqlite`; each `Database` is an independent,
//!   swappable-for-testing data source
//! - CSV data loaded through [`Database::load_observations`]
//! - Range queries return observations date-descending, the order every
//!   downstream consumer expects
//!
//! # Usage
//!
//! ```rust
//! use lago_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_observations("van,2024-03-01,16364.04,\n").unwrap();
//! let rows = db.query_observations("van", None, None).unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

pub mod schema;
mod loader;
mod queries;

use lago_core::error::{LagoError, Result as LagoResult};
use lago_core::observation::LakeObservation;
use lago_core::store::ObservationStore;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database of dated lake observations.
#[derive(Clone)]
pub struct Database {
    pub(crate) conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    ///
    /// The database is empty after creation; use
    /// [`load_observations`](Self::load_observations) to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

impl ObservationStore for Database {
    fn lakes(&self) -> LagoResult<Vec<String>> {
        self.query_lakes()
            .map_err(|e| LagoError::Store(e.to_string()))
    }

    fn query(
        &self,
        lake: &str,
        start: Option<chrono::NaiveDate>,
        end: Option<chrono::NaiveDate>,
    ) -> LagoResult<Vec<LakeObservation>> {
        self.query_observations(lake, start, end)
            .map_err(|e| LagoError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lago_core::date_window::DateWindow;
    use lago_core::report;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_observations("van,2024-03-01,16364.04,\n").unwrap();
        let lakes = db2.query_lakes().unwrap();
        assert_eq!(lakes.len(), 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_lakes().unwrap().is_empty());
    }

    #[test]
    fn database_serves_the_core_facade() {
        let db = Database::new().unwrap();
        db.load_observations(concat!(
            "van,2024-03-01,16364.04,\n",
            "van,2024-03-03,16285.28,\n",
        ))
        .unwrap();

        let series = report::fetch_series(&db, "van", &DateWindow::unbounded()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().unwrap().pixel, 16285.28);

        let err = report::fetch_series(&db, "atlantis", &DateWindow::unbounded()).unwrap_err();
        assert!(err.is_not_found());
    }
}
