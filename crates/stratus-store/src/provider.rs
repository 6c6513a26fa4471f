//! The storage gateway.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info};

use stratus_types::contract::{location, weather};
use stratus_types::{ContentType, ResourceUri, RouteKind};

use crate::error::{Error, Result, is_constraint_violation};
use crate::notify::{ChangeNotifier, ChangeReceiver};
use crate::plan;
use crate::rows::RowSet;
use crate::schema;
use crate::values::RowValues;

/// SQLite-backed gateway mapping resource identifiers to relational
/// queries over locations and weather observations.
///
/// The provider owns a single connection, shared by all operations;
/// write transactions are serialized through SQLite's own locking.
/// Routing and translation failures are raised before any I/O.
pub struct Provider {
    conn: Connection,
    notifier: ChangeNotifier,
}

impl Provider {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // The data directory may not exist yet on a first run.
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        // Referential checks are off by default in SQLite; WAL keeps
        // readers unblocked while a write transaction is open.
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self {
            conn,
            notifier: ChangeNotifier::default(),
        })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn,
            notifier: ChangeNotifier::default(),
        })
    }

    /// Subscribe to change events for mutated identifiers.
    pub fn subscribe(&self) -> ChangeReceiver {
        self.notifier.subscribe()
    }

    fn route(&self, uri: &ResourceUri) -> Result<RouteKind> {
        RouteKind::classify(uri).ok_or_else(|| Error::UnknownResource(uri.to_string()))
    }

    fn write_error(&self, e: rusqlite::Error, uri: &ResourceUri) -> Error {
        if is_constraint_violation(&e) {
            Error::ConstraintViolation(format!("{uri}: {e}"))
        } else {
            Error::Database(e)
        }
    }

    /// Execute a read against the identifier's route.
    ///
    /// For the join-based route kinds the selection, arguments, and
    /// ordering come from the identifier itself; caller-supplied
    /// selection and arguments are used verbatim only for the plain
    /// `weather` and `location` collections. The returned [`RowSet`]
    /// carries `uri` as its notification identifier.
    pub fn query(
        &self,
        uri: &ResourceUri,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        args: &[Value],
        sort: Option<&str>,
    ) -> Result<RowSet> {
        let kind = self.route(uri)?;
        let plan = plan::plan_query(kind, uri, selection, args, sort)?;

        let columns = match projection {
            Some(cols) => cols.join(", "),
            None => "*".to_string(),
        };
        let mut sql = format!("SELECT {} FROM {}", columns, plan.source);
        if let Some(ref where_clause) = plan.selection {
            sql.push_str(" WHERE ");
            sql.push_str(where_clause);
        }
        if let Some(ref order_by) = plan.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }

        debug!("Executing query: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = Vec::new();
        let mut result = stmt.query(params_from_iter(plan.params.iter()))?;
        while let Some(row) = result.next()? {
            let mut values = Vec::with_capacity(names.len());
            for i in 0..names.len() {
                values.push(row.get::<_, Value>(i)?);
            }
            rows.push(values);
        }

        Ok(RowSet::new(names, rows, uri.clone()))
    }

    /// Resolve the content-type tag for an identifier.
    ///
    /// Pure function of the route kind; never touches the store.
    pub fn type_of(&self, uri: &ResourceUri) -> Result<ContentType> {
        Ok(self.route(uri)?.content_type())
    }

    /// Insert one row under a collection identifier.
    ///
    /// Valid only for the `weather` and `location` collections; every
    /// other route kind is an unknown resource for writes. Returns an
    /// identifier addressing the new row and notifies observers of the
    /// collection identifier. A violated uniqueness invariant maps to
    /// [`Error::ConstraintViolation`] and leaves the existing row in
    /// place.
    pub fn insert(&self, uri: &ResourceUri, values: &RowValues) -> Result<ResourceUri> {
        let kind = self.route(uri)?;
        let (table, row_uri): (&str, fn(i64) -> ResourceUri) = match kind {
            RouteKind::Weather => (weather::TABLE, ResourceUri::weather_row),
            RouteKind::Location => (location::TABLE, ResourceUri::location_by_id),
            _ => return Err(Error::UnknownResource(uri.to_string())),
        };

        if values.is_empty() {
            return Err(Error::BadRequest(format!("insert with no values: {uri}")));
        }

        let (sql, params) = values.insert_sql(table);
        debug!("Executing insert: {}", sql);
        self.conn
            .execute(&sql, params_from_iter(params))
            .map_err(|e| self.write_error(e, uri))?;

        let id = self.conn.last_insert_rowid();
        self.notifier.notify(uri.clone());
        Ok(row_uri(id))
    }

    /// Insert a batch of rows atomically under the weather collection.
    ///
    /// All inserts run in one transaction: rows rejected by a
    /// uniqueness constraint are skipped and excluded from the
    /// returned count, while any other failure rolls the whole batch
    /// back. Exactly one change notification is emitted for the batch.
    /// Any other valid route kind falls back to per-record
    /// [`insert`](Self::insert) semantics.
    pub fn bulk_insert(&self, uri: &ResourceUri, batch: &[RowValues]) -> Result<usize> {
        let kind = self.route(uri)?;

        if kind != RouteKind::Weather {
            let mut count = 0;
            for values in batch {
                self.insert(uri, values)?;
                count += 1;
            }
            return Ok(count);
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut count = 0;
        for values in batch {
            if values.is_empty() {
                return Err(Error::BadRequest(format!("insert with no values: {uri}")));
            }
            let (sql, params) = values.insert_sql(weather::TABLE);
            match tx.execute(&sql, params_from_iter(params)) {
                Ok(_) => count += 1,
                Err(e) if is_constraint_violation(&e) => {
                    debug!("Skipping constraint-violating row: {}", e);
                }
                // Dropping the transaction rolls the batch back.
                Err(e) => return Err(Error::Database(e)),
            }
        }
        tx.commit()?;

        info!("Bulk-inserted {} observation rows", count);
        self.notifier.notify(uri.clone());
        Ok(count)
    }

    /// Update rows under a collection identifier.
    ///
    /// Valid for the `weather` and `location` collections; the three
    /// item/join route kinds return 0 without touching the store or
    /// notifying. One notification per successful call, regardless of
    /// the row count.
    pub fn update(
        &self,
        uri: &ResourceUri,
        values: &RowValues,
        selection: Option<&str>,
        args: &[Value],
    ) -> Result<usize> {
        let kind = self.route(uri)?;
        let table = match kind {
            RouteKind::Weather => weather::TABLE,
            RouteKind::Location => location::TABLE,
            _ => return Ok(0),
        };

        if values.is_empty() {
            return Err(Error::BadRequest(format!("update with no values: {uri}")));
        }

        let (assignments, mut params) = values.update_assignments();
        let mut sql = format!("UPDATE {table} SET {assignments}");
        if let Some(where_clause) = selection {
            sql.push_str(" WHERE ");
            sql.push_str(where_clause);
        }
        params.extend(args.iter());

        debug!("Executing update: {}", sql);
        let count = self
            .conn
            .execute(&sql, params_from_iter(params))
            .map_err(|e| self.write_error(e, uri))?;

        self.notifier.notify(uri.clone());
        Ok(count)
    }

    /// Delete rows under a collection identifier.
    ///
    /// Same dispatch shape as [`update`](Self::update).
    pub fn delete(
        &self,
        uri: &ResourceUri,
        selection: Option<&str>,
        args: &[Value],
    ) -> Result<usize> {
        let kind = self.route(uri)?;
        let table = match kind {
            RouteKind::Weather => weather::TABLE,
            RouteKind::Location => location::TABLE,
            _ => return Ok(0),
        };

        let mut sql = format!("DELETE FROM {table}");
        if let Some(where_clause) = selection {
            sql.push_str(" WHERE ");
            sql.push_str(where_clause);
        }

        debug!("Executing delete: {}", sql);
        let count = self
            .conn
            .execute(&sql, params_from_iter(args.iter()))
            .map_err(|e| self.write_error(e, uri))?;

        self.notifier.notify(uri.clone());
        Ok(count)
    }
}
