//! Resource identifiers and their helper constructors.
//!
//! Every stratus resource is addressed by a `content://` style URI:
//! an authority, a path of segments, and optional query parameters.
//! UI loaders and the fetch task build these with the constructors
//! here; the router classifies them and the query planner pulls the
//! wildcard segments back out.

use core::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::contract;
use crate::date::ForecastDate;
use crate::error::ParseError;

/// An opaque, structured address naming a collection or single item.
///
/// # Example
///
/// ```
/// use stratus_types::{ForecastDate, ResourceUri};
///
/// let day = ForecastDate::parse("2024-01-01")?;
/// let uri = ResourceUri::weather_for_location_and_date("94043", day);
/// assert_eq!(uri.location_setting().as_deref(), Some("94043"));
/// assert_eq!(uri.date_segment().as_deref(), Some("2024-01-01"));
/// # Ok::<(), stratus_types::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceUri(Url);

impl ResourceUri {
    /// Parse an identifier from its string form.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let url = Url::parse(s).map_err(|e| ParseError::InvalidUri(format!("{s}: {e}")))?;
        if url.host_str().is_none() {
            return Err(ParseError::InvalidUri(format!("{s}: missing authority")));
        }
        Ok(Self(url))
    }

    fn build(segments: &[&str]) -> Self {
        // The base is a compile-time constant; parsing it cannot fail.
        let mut url = Url::parse(contract::CONTENT_BASE).expect("static base uri");
        {
            let mut path = url.path_segments_mut().expect("base uri has an authority");
            for segment in segments {
                path.push(segment);
            }
        }
        Self(url)
    }

    /// The weather observation collection.
    pub fn weather() -> Self {
        Self::build(&[contract::PATH_WEATHER])
    }

    /// All observations for one location setting string.
    pub fn weather_for_location(setting: &str) -> Self {
        Self::build(&[contract::PATH_WEATHER, setting])
    }

    /// Observations for one location setting string, bounded below by a
    /// start date carried as a query parameter.
    pub fn weather_for_location_from(setting: &str, start: ForecastDate) -> Self {
        let mut uri = Self::build(&[contract::PATH_WEATHER, setting]);
        uri.0
            .query_pairs_mut()
            .append_pair(contract::PARAM_START_DATE, &start.to_string());
        uri
    }

    /// The single observation for a location setting string on a day.
    pub fn weather_for_location_and_date(setting: &str, date: ForecastDate) -> Self {
        Self::build(&[contract::PATH_WEATHER, setting, &date.to_string()])
    }

    /// An observation row by its internal identifier, as returned from
    /// a weather insert. Addresses the row for display; it is not one
    /// of the routable shapes.
    pub fn weather_row(id: i64) -> Self {
        Self::build(&[contract::PATH_WEATHER, &id.to_string()])
    }

    /// The location collection.
    pub fn location() -> Self {
        Self::build(&[contract::PATH_LOCATION])
    }

    /// A location row by its internal identifier.
    pub fn location_by_id(id: i64) -> Self {
        Self::build(&[contract::PATH_LOCATION, &id.to_string()])
    }

    /// The authority component.
    pub fn authority(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// The path as a sequence of non-empty segments.
    ///
    /// Segments come back percent-decoded, undoing the escaping the
    /// constructors applied, so a setting like `"London, UK"` reads
    /// back exactly as it was written.
    pub fn segments(&self) -> Vec<String> {
        self.0
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).map(decode_segment).collect())
            .unwrap_or_default()
    }

    /// The location setting string wildcard (second path segment).
    pub fn location_setting(&self) -> Option<String> {
        self.segments().get(1).cloned()
    }

    /// The date wildcard (third path segment), still in string form.
    pub fn date_segment(&self) -> Option<String> {
        self.segments().get(2).cloned()
    }

    /// The optional start-date query parameter, still in string form.
    pub fn start_date(&self) -> Option<String> {
        self.0
            .query_pairs()
            .find(|(k, _)| k == contract::PARAM_START_DATE)
            .map(|(_, v)| v.into_owned())
    }

    /// The trailing path segment parsed as a row identifier.
    pub fn trailing_id(&self) -> Option<i64> {
        self.segments().last().and_then(|s| s.parse().ok())
    }

    /// The identifier in string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        // A raw segment that is not valid percent-encoding is kept as-is.
        Err(_) => segment.to_string(),
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
