//! Shared vocabulary for the stratus weather data layer.
//!
//! This crate defines the types that flow between the storage gateway
//! and its collaborators without pulling in any storage machinery:
//!
//! - The schema contract: table, column, and path-segment names
//! - Resource identifiers and their helper constructors
//! - Route classification for the five identifier shapes
//! - Normalized calendar days used as observation keys
//! - Parsed location and forecast-day records
//!
//! # Example
//!
//! ```
//! use stratus_types::{ForecastDate, ResourceUri, RouteKind};
//!
//! let day = ForecastDate::parse("2024-01-01")?;
//! let uri = ResourceUri::weather_for_location_and_date("94043", day);
//! assert_eq!(RouteKind::classify(&uri), Some(RouteKind::WeatherByLocationAndDate));
//! # Ok::<(), stratus_types::ParseError>(())
//! ```

pub mod contract;
pub mod date;
pub mod error;
pub mod record;
pub mod router;
pub mod uri;

pub use date::ForecastDate;
pub use error::{ParseError, ParseResult};
pub use record::{LocationRecord, ObservationRecord};
pub use router::{ContentType, RouteKind};
pub use uri::ResourceUri;
