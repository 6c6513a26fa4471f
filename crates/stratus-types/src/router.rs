//! Route classification for resource identifiers.
//!
//! An identifier is matched against a constant, ordered table of path
//! patterns and classified into exactly one [`RouteKind`]. The match is
//! exact on path shape, never on prefix, and touches no storage.

use crate::contract;
use crate::uri::ResourceUri;

/// One element of a path pattern.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Must equal this segment exactly.
    Literal(&'static str),
    /// Matches any single segment.
    Wildcard,
}

/// The discriminated classification of a resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// The weather observation collection.
    Weather,
    /// Observations joined to one location setting string.
    WeatherByLocation,
    /// The single observation for a setting string on one day.
    WeatherByLocationAndDate,
    /// The location collection.
    Location,
    /// A single location row by internal identifier.
    LocationById,
}

/// Content-type tag returned by the gateway's type resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// A set of weather observation rows.
    WeatherCollection,
    /// Exactly one weather observation row.
    WeatherItem,
    /// A set of location rows.
    LocationCollection,
    /// Exactly one location row.
    LocationItem,
}

impl ContentType {
    /// Whether this tag names a collection rather than a single item.
    pub fn is_collection(self) -> bool {
        matches!(self, Self::WeatherCollection | Self::LocationCollection)
    }

    /// The tag in string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeatherCollection => "vnd.stratus.dir/weather",
            Self::WeatherItem => "vnd.stratus.item/weather",
            Self::LocationCollection => "vnd.stratus.dir/location",
            Self::LocationItem => "vnd.stratus.item/location",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered pattern table. Immutable after construction; classification
/// never re-derives the shape per operation.
const ROUTES: &[(&[Pattern], RouteKind)] = &[
    (&[Pattern::Literal(contract::PATH_WEATHER)], RouteKind::Weather),
    (
        &[Pattern::Literal(contract::PATH_WEATHER), Pattern::Wildcard],
        RouteKind::WeatherByLocation,
    ),
    (
        &[
            Pattern::Literal(contract::PATH_WEATHER),
            Pattern::Wildcard,
            Pattern::Wildcard,
        ],
        RouteKind::WeatherByLocationAndDate,
    ),
    (
        &[Pattern::Literal(contract::PATH_LOCATION)],
        RouteKind::Location,
    ),
    (
        &[Pattern::Literal(contract::PATH_LOCATION), Pattern::Wildcard],
        RouteKind::LocationById,
    ),
];

impl RouteKind {
    /// Classify an identifier, or `None` when nothing matches.
    ///
    /// The gateway surfaces `None` as an unknown-resource failure;
    /// classification itself is a pure function of the identifier.
    /// Shape is all that is checked here: validating the numeric
    /// segment of a `LocationById` identifier is the query planner's
    /// job.
    pub fn classify(uri: &ResourceUri) -> Option<Self> {
        if uri.authority() != contract::AUTHORITY {
            return None;
        }
        let segments = uri.segments();
        ROUTES
            .iter()
            .find(|(pattern, _)| matches_shape(pattern, &segments))
            .map(|&(_, kind)| kind)
    }

    /// The content-type tag for this route kind.
    pub fn content_type(self) -> ContentType {
        match self {
            Self::Weather | Self::WeatherByLocation => ContentType::WeatherCollection,
            Self::WeatherByLocationAndDate => ContentType::WeatherItem,
            Self::Location => ContentType::LocationCollection,
            Self::LocationById => ContentType::LocationItem,
        }
    }
}

fn matches_shape(pattern: &[Pattern], segments: &[String]) -> bool {
    pattern.len() == segments.len()
        && pattern.iter().zip(segments).all(|(p, s)| match p {
            Pattern::Literal(lit) => *lit == s.as_str(),
            Pattern::Wildcard => true,
        })
}
