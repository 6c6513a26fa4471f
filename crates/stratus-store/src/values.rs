//! Row values for insert and update operations.

use rusqlite::types::Value;

use stratus_types::contract::{location, weather};
use stratus_types::{LocationRecord, ObservationRecord};

/// An ordered list of column/value pairs to write.
///
/// The route kind decides which table the values land in, so the same
/// shape serves both entities. Columns keep their insertion order in
/// the generated SQL.
///
/// # Example
///
/// ```
/// use stratus_store::RowValues;
///
/// let values = RowValues::new()
///     .set("setting", "94043".to_string())
///     .set("city_name", "Mountain View".to_string())
///     .set("latitude", 37.4)
///     .set("longitude", -122.1);
/// assert_eq!(values.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RowValues {
    entries: Vec<(String, Value)>,
}

impl RowValues {
    /// Create an empty value list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing any earlier value for the same
    /// column.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| c == column) {
            entry.1 = value;
        } else {
            self.entries.push((column.to_string(), value));
        }
        self
    }

    /// The columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Number of columns set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no columns are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build `INSERT INTO <table> (...) VALUES (...)` plus parameters.
    pub(crate) fn insert_sql(&self, table: &str) -> (String, Vec<&Value>) {
        let columns: Vec<&str> = self.columns().collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        );
        (sql, self.params())
    }

    /// Build the `SET` assignment list plus parameters.
    pub(crate) fn update_assignments(&self) -> (String, Vec<&Value>) {
        let assignments = self
            .columns()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        (assignments, self.params())
    }

    fn params(&self) -> Vec<&Value> {
        self.entries.iter().map(|(_, v)| v).collect()
    }
}

impl From<&LocationRecord> for RowValues {
    fn from(record: &LocationRecord) -> Self {
        RowValues::new()
            .set(location::COL_SETTING, record.setting.clone())
            .set(location::COL_CITY_NAME, record.city_name.clone())
            .set(location::COL_LATITUDE, record.latitude)
            .set(location::COL_LONGITUDE, record.longitude)
    }
}

/// Values for one observation row, stamped with its resolved location.
pub fn observation_values(location_id: i64, record: &ObservationRecord) -> RowValues {
    RowValues::new()
        .set(weather::COL_LOCATION_ID, location_id)
        .set(weather::COL_DATE, record.date.day_number())
        .set(weather::COL_SHORT_DESC, record.short_desc.clone())
        .set(weather::COL_WEATHER_CODE, record.weather_code)
        .set(weather::COL_MIN_TEMP, record.min_temp)
        .set(weather::COL_MAX_TEMP, record.max_temp)
        .set(weather::COL_HUMIDITY, record.humidity)
        .set(weather::COL_PRESSURE, record.pressure)
        .set(weather::COL_WIND_SPEED, record.wind_speed)
        .set(weather::COL_WIND_DEGREES, record.wind_degrees)
}
