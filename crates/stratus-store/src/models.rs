//! Typed read-side views over stored rows.

use serde::{Deserialize, Serialize};

use stratus_types::ForecastDate;
use stratus_types::contract::{location, weather};

use crate::rows::RowSet;

/// A location row as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLocation {
    /// Internal identifier.
    pub id: i64,
    /// External setting string.
    pub setting: String,
    /// Display name for the city.
    pub city_name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl StoredLocation {
    /// Read one row out of a location result set.
    ///
    /// Requires the result to carry all location columns; returns
    /// `None` when the row or a column is missing.
    pub fn from_row(rows: &RowSet, row: usize) -> Option<Self> {
        Some(Self {
            id: rows.get_i64(row, location::COL_ID)?,
            setting: rows.get_str(row, location::COL_SETTING)?.to_string(),
            city_name: rows.get_str(row, location::COL_CITY_NAME)?.to_string(),
            latitude: rows.get_f64(row, location::COL_LATITUDE)?,
            longitude: rows.get_f64(row, location::COL_LONGITUDE)?,
        })
    }
}

/// A weather observation row as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObservation {
    /// Internal identifier.
    pub id: i64,
    /// Owning location's internal identifier.
    pub location_id: i64,
    /// The calendar day this observation covers.
    pub date: ForecastDate,
    /// Short human-readable description of conditions.
    pub short_desc: String,
    /// Upstream weather-condition code.
    pub weather_code: i64,
    /// Minimum temperature for the day.
    pub min_temp: f64,
    /// Maximum temperature for the day.
    pub max_temp: f64,
    /// Relative humidity.
    pub humidity: f64,
    /// Atmospheric pressure.
    pub pressure: f64,
    /// Wind speed.
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_degrees: f64,
}

impl StoredObservation {
    /// Read one row out of a weather result set.
    pub fn from_row(rows: &RowSet, row: usize) -> Option<Self> {
        Some(Self {
            id: rows.get_i64(row, weather::COL_ID)?,
            location_id: rows.get_i64(row, weather::COL_LOCATION_ID)?,
            date: ForecastDate::from_day_number(rows.get_i64(row, weather::COL_DATE)?),
            short_desc: rows.get_str(row, weather::COL_SHORT_DESC)?.to_string(),
            weather_code: rows.get_i64(row, weather::COL_WEATHER_CODE)?,
            min_temp: rows.get_f64(row, weather::COL_MIN_TEMP)?,
            max_temp: rows.get_f64(row, weather::COL_MAX_TEMP)?,
            humidity: rows.get_f64(row, weather::COL_HUMIDITY)?,
            pressure: rows.get_f64(row, weather::COL_PRESSURE)?,
            wind_speed: rows.get_f64(row, weather::COL_WIND_SPEED)?,
            wind_degrees: rows.get_f64(row, weather::COL_WIND_DEGREES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use crate::values::{RowValues, observation_values};
    use stratus_types::{LocationRecord, ObservationRecord, ResourceUri};

    fn seeded_provider() -> (Provider, i64) {
        let p = Provider::open_in_memory().unwrap();
        let record = LocationRecord {
            setting: "94043".to_string(),
            city_name: "Mountain View".to_string(),
            latitude: 37.4,
            longitude: -122.1,
        };
        let uri = p
            .insert(&ResourceUri::location(), &RowValues::from(&record))
            .unwrap();
        (p, uri.trailing_id().unwrap())
    }

    #[test]
    fn test_stored_location_from_row() {
        let (p, id) = seeded_provider();
        let rows = p
            .query(&ResourceUri::location_by_id(id), None, None, &[], None)
            .unwrap();

        let stored = StoredLocation::from_row(&rows, 0).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.setting, "94043");
        assert_eq!(stored.city_name, "Mountain View");
    }

    #[test]
    fn test_stored_location_missing_column_is_none() {
        let (p, id) = seeded_provider();
        let rows = p
            .query(
                &ResourceUri::location_by_id(id),
                Some(&["id", "setting"]),
                None,
                &[],
                None,
            )
            .unwrap();
        assert!(StoredLocation::from_row(&rows, 0).is_none());
    }

    #[test]
    fn test_stored_observation_from_row() {
        let (p, id) = seeded_provider();
        let record = ObservationRecord {
            date: ForecastDate::parse("2024-01-01").unwrap(),
            short_desc: "Clear".to_string(),
            weather_code: 800,
            min_temp: 4.5,
            max_temp: 12.0,
            humidity: 60.0,
            pressure: 1013.0,
            wind_speed: 3.2,
            wind_degrees: 270.0,
        };
        p.insert(&ResourceUri::weather(), &observation_values(id, &record))
            .unwrap();

        let rows = p
            .query(&ResourceUri::weather(), None, None, &[], None)
            .unwrap();
        let stored = StoredObservation::from_row(&rows, 0).unwrap();

        assert_eq!(stored.location_id, id);
        assert_eq!(stored.date, record.date);
        assert_eq!(stored.short_desc, "Clear");
        assert_eq!(stored.weather_code, 800);
        assert_eq!(stored.max_temp, 12.0);
    }

    #[test]
    fn test_stored_location_serialization_roundtrip() {
        let stored = StoredLocation {
            id: 1,
            setting: "94043".to_string(),
            city_name: "Mountain View".to_string(),
            latitude: 37.4,
            longitude: -122.1,
        };
        let json = serde_json::to_string(&stored).unwrap();
        let back: StoredLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stored);
    }
}
