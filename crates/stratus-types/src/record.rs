//! Parsed records handed to the storage gateway by the fetch task.

use serde::{Deserialize, Serialize};

use crate::date::ForecastDate;

/// A location as resolved by the upstream feed: the stable setting
/// string plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// External setting string, the stable caller-visible key.
    pub setting: String,
    /// Display name for the city.
    pub city_name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// One parsed forecast day for a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_record_serialization_roundtrip() {
        let record = LocationRecord {
            setting: "94043".to_string(),
            city_name: "Mountain View".to_string(),
            latitude: 37.4,
            longitude: -122.1,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: LocationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_observation_record_serialization_roundtrip() {
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

        let json = serde_json::to_string(&record).unwrap();
        let back: ObservationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
