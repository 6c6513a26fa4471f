//! Query translation: route kind + identifier into an executable plan.
//!
//! Join-based route kinds derive their selection and parameters from
//! the identifier's wildcard segments; the caller's selection and
//! arguments pass through untouched only for the two plain collection
//! kinds. Every column that exists in both tables is table-qualified
//! in generated selections, so the join can never be ambiguous.

use rusqlite::types::Value;

use stratus_types::contract::{location, weather};
use stratus_types::{ForecastDate, ResourceUri, RouteKind};

use crate::error::{Error, Result};

/// Join clause used by the weather-by-location route kinds.
pub(crate) const JOINED_SOURCE: &str =
    "weather INNER JOIN locations ON weather.location_id = locations.id";

/// An executable query descriptor.
#[derive(Debug)]
pub(crate) struct QueryPlan {
    /// Table name or join clause to select from.
    pub source: &'static str,
    /// WHERE clause body, if any.
    pub selection: Option<String>,
    /// Bound parameters, positional.
    pub params: Vec<Value>,
    /// ORDER BY clause body, if any.
    pub order_by: Option<String>,
}

/// Translate a classified identifier into a query plan.
pub(crate) fn plan_query(
    kind: RouteKind,
    uri: &ResourceUri,
    selection: Option<&str>,
    args: &[Value],
    sort: Option<&str>,
) -> Result<QueryPlan> {
    let plan = match kind {
        RouteKind::Weather => QueryPlan {
            source: weather::TABLE,
            selection: selection.map(str::to_string),
            params: args.to_vec(),
            order_by: sort.map(str::to_string),
        },
        RouteKind::Location => QueryPlan {
            source: location::TABLE,
            selection: selection.map(str::to_string),
            params: args.to_vec(),
            order_by: sort.map(str::to_string),
        },
        RouteKind::LocationById => {
            let id = parse_row_id(uri)?;
            QueryPlan {
                source: location::TABLE,
                selection: Some(format!("{} = ?", location::QUALIFIED_ID)),
                params: vec![Value::Integer(id)],
                order_by: sort.map(str::to_string),
            }
        }
        RouteKind::WeatherByLocation => {
            let setting = setting_segment(uri)?;
            let mut where_clause = format!("{} = ?", location::QUALIFIED_SETTING);
            let mut params = vec![Value::Text(setting)];

            if let Some(start) = uri.start_date() {
                let start = ForecastDate::parse(&start)?;
                where_clause.push_str(&format!(" AND {} >= ?", weather::QUALIFIED_DATE));
                params.push(Value::Integer(start.day_number()));
            }

            QueryPlan {
                source: JOINED_SOURCE,
                selection: Some(where_clause),
                params,
                order_by: sort.map(str::to_string),
            }
        }
        RouteKind::WeatherByLocationAndDate => {
            let setting = setting_segment(uri)?;
            let date = uri
                .date_segment()
                .ok_or_else(|| Error::BadRequest(format!("missing date segment: {uri}")))?;
            let date = ForecastDate::parse(&date)?;

            QueryPlan {
                source: JOINED_SOURCE,
                selection: Some(format!(
                    "{} = ? AND {} = ?",
                    location::QUALIFIED_SETTING,
                    weather::QUALIFIED_DATE
                )),
                params: vec![Value::Text(setting), Value::Integer(date.day_number())],
                order_by: sort.map(str::to_string),
            }
        }
    };

    Ok(plan)
}

fn setting_segment(uri: &ResourceUri) -> Result<String> {
    uri.location_setting()
        .ok_or_else(|| Error::BadRequest(format!("missing location setting: {uri}")))
}

fn parse_row_id(uri: &ResourceUri) -> Result<i64> {
    uri.trailing_id()
        .ok_or_else(|| Error::BadRequest(format!("non-numeric id segment: {uri}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_clause_matches_contract_names() {
        assert_eq!(
            JOINED_SOURCE,
            format!(
                "{} INNER JOIN {} ON {} = {}",
                weather::TABLE,
                location::TABLE,
                weather::QUALIFIED_LOCATION_ID,
                location::QUALIFIED_ID
            )
        );
    }

    #[test]
    fn test_weather_collection_passes_caller_inputs_through() {
        let uri = ResourceUri::weather();
        let args = vec![Value::Integer(800)];
        let plan = plan_query(
            RouteKind::Weather,
            &uri,
            Some("weather_code = ?"),
            &args,
            Some("date ASC"),
        )
        .unwrap();

        assert_eq!(plan.source, "weather");
        assert_eq!(plan.selection.as_deref(), Some("weather_code = ?"));
        assert_eq!(plan.params, args);
        assert_eq!(plan.order_by.as_deref(), Some("date ASC"));
    }

    #[test]
    fn test_location_by_id_overrides_caller_selection() {
        let uri = ResourceUri::location_by_id(42);
        let plan = plan_query(
            RouteKind::LocationById,
            &uri,
            Some("setting = ?"),
            &[Value::Text("ignored".to_string())],
            None,
        )
        .unwrap();

        assert_eq!(plan.selection.as_deref(), Some("locations.id = ?"));
        assert_eq!(plan.params, vec![Value::Integer(42)]);
    }

    #[test]
    fn test_location_by_id_rejects_non_numeric_segment() {
        let uri = ResourceUri::parse("content://org.stratus.forecast/location/abc").unwrap();
        let err = plan_query(RouteKind::LocationById, &uri, None, &[], None).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn test_weather_by_location_without_start_date() {
        let uri = ResourceUri::weather_for_location("94043");
        let plan = plan_query(RouteKind::WeatherByLocation, &uri, None, &[], None).unwrap();

        assert_eq!(plan.source, JOINED_SOURCE);
        assert_eq!(plan.selection.as_deref(), Some("locations.setting = ?"));
        assert_eq!(plan.params, vec![Value::Text("94043".to_string())]);
    }

    #[test]
    fn test_multi_word_setting_binds_decoded_text() {
        let uri = ResourceUri::weather_for_location("London, UK");
        let plan = plan_query(RouteKind::WeatherByLocation, &uri, None, &[], None).unwrap();

        // The percent-escaped wire form must never reach the bind parameters.
        assert_eq!(plan.params, vec![Value::Text("London, UK".to_string())]);
    }

    #[test]
    fn test_weather_by_location_with_start_date() {
        let start = ForecastDate::parse("2024-01-03").unwrap();
        let uri = ResourceUri::weather_for_location_from("94043", start);
        let plan = plan_query(RouteKind::WeatherByLocation, &uri, None, &[], None).unwrap();

        assert_eq!(
            plan.selection.as_deref(),
            Some("locations.setting = ? AND weather.date >= ?")
        );
        assert_eq!(
            plan.params,
            vec![
                Value::Text("94043".to_string()),
                Value::Integer(start.day_number())
            ]
        );
    }

    #[test]
    fn test_weather_by_location_and_date_exact_selection() {
        let day = ForecastDate::parse("2024-01-01").unwrap();
        let uri = ResourceUri::weather_for_location_and_date("94043", day);
        let plan =
            plan_query(RouteKind::WeatherByLocationAndDate, &uri, None, &[], None).unwrap();

        assert_eq!(
            plan.selection.as_deref(),
            Some("locations.setting = ? AND weather.date = ?")
        );
        assert_eq!(
            plan.params,
            vec![
                Value::Text("94043".to_string()),
                Value::Integer(day.day_number())
            ]
        );
    }

    #[test]
    fn test_malformed_date_segment_is_bad_request() {
        let uri =
            ResourceUri::parse("content://org.stratus.forecast/weather/94043/not-a-date").unwrap();
        let err =
            plan_query(RouteKind::WeatherByLocationAndDate, &uri, None, &[], None).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn test_malformed_start_date_is_bad_request() {
        let uri =
            ResourceUri::parse("content://org.stratus.forecast/weather/94043?date=garbage").unwrap();
        let err = plan_query(RouteKind::WeatherByLocation, &uri, None, &[], None).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn test_join_selections_qualify_ambiguous_columns() {
        let day = ForecastDate::parse("2024-01-01").unwrap();
        let uri = ResourceUri::weather_for_location_and_date("94043", day);
        let plan =
            plan_query(RouteKind::WeatherByLocationAndDate, &uri, None, &[], None).unwrap();

        let selection = plan.selection.unwrap();
        assert!(selection.contains("locations.setting"));
        assert!(selection.contains("weather.date"));
    }
}
