//! Owned result sets returned by gateway queries.

use rusqlite::types::Value;

use stratus_types::ResourceUri;

/// A fully materialized query result.
///
/// Values are addressable by column position or by column name. Each
/// result set remembers the identifier it was queried under, so a
/// caller can re-run the query when a [`ChangeEvent`](crate::ChangeEvent)
/// for that identifier arrives.
#[derive(Debug, Clone)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    notification_uri: ResourceUri,
}

impl RowSet {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Value>>, uri: ResourceUri) -> Self {
        Self {
            columns,
            rows,
            notification_uri: uri,
        }
    }

    /// Column names, in projection order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The identifier this result set is registered against for
    /// change notification.
    pub fn notification_uri(&self) -> &ResourceUri {
        &self.notification_uri
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// A value by row and column position.
    pub fn value(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// A value by row position and column name.
    pub fn value_by_name(&self, row: usize, name: &str) -> Option<&Value> {
        self.value(row, self.column_index(name)?)
    }

    /// An integer value by row and column name.
    pub fn get_i64(&self, row: usize, name: &str) -> Option<i64> {
        match self.value_by_name(row, name)? {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// A float value by row and column name. Integer-affine columns
    /// widen to float.
    pub fn get_f64(&self, row: usize, name: &str) -> Option<f64> {
        match self.value_by_name(row, name)? {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// A text value by row and column name.
    pub fn get_str(&self, row: usize, name: &str) -> Option<&str> {
        match self.value_by_name(row, name)? {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Iterate over the rows in order.
    pub fn iter(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
