//! Schema contract: the names shared by every layer.
//!
//! Table names, column names, URI path segments, and content-type tags
//! are defined once here and consumed by the router, the query planner,
//! and the storage gateway. Nothing in this module has behavior.

/// Authority component of every stratus resource identifier.
pub const AUTHORITY: &str = "org.stratus.forecast";

/// Scheme + authority base for building resource identifiers.
pub const CONTENT_BASE: &str = "content://org.stratus.forecast";

/// Path segment addressing the weather observation collection.
pub const PATH_WEATHER: &str = "weather";

/// Path segment addressing the location collection.
pub const PATH_LOCATION: &str = "location";

/// Query parameter carrying an optional start date (`YYYY-MM-DD`) on
/// weather-by-location identifiers.
pub const PARAM_START_DATE: &str = "date";

/// Content-type tag prefix for collection results.
pub const TYPE_PREFIX_DIR: &str = "vnd.stratus.dir";

/// Content-type tag prefix for single-item results.
pub const TYPE_PREFIX_ITEM: &str = "vnd.stratus.item";

/// Location table vocabulary.
pub mod location {
    /// Table name.
    pub const TABLE: &str = "locations";

    /// Internal identifier, integer primary key.
    pub const COL_ID: &str = "id";
    /// External setting string, the stable caller-visible key. Unique.
    pub const COL_SETTING: &str = "setting";
    /// Human-readable city name.
    pub const COL_CITY_NAME: &str = "city_name";
    /// Latitude in degrees.
    pub const COL_LATITUDE: &str = "latitude";
    /// Longitude in degrees.
    pub const COL_LONGITUDE: &str = "longitude";

    /// Table-qualified primary key, required on the weather join where
    /// both tables carry an `id` column.
    pub const QUALIFIED_ID: &str = "locations.id";
    /// Table-qualified setting column for join selections.
    pub const QUALIFIED_SETTING: &str = "locations.setting";
}

/// Weather observation table vocabulary.
pub mod weather {
    /// Table name.
    pub const TABLE: &str = "weather";

    /// Internal identifier, integer primary key.
    pub const COL_ID: &str = "id";
    /// Foreign key into `locations.id`.
    pub const COL_LOCATION_ID: &str = "location_id";
    /// Normalized calendar day (Julian day number), integer.
    pub const COL_DATE: &str = "date";
    /// Short human-readable description of conditions.
    pub const COL_SHORT_DESC: &str = "short_desc";
    /// Upstream weather-condition code.
    pub const COL_WEATHER_CODE: &str = "weather_code";
    /// Minimum temperature for the day.
    pub const COL_MIN_TEMP: &str = "min_temp";
    /// Maximum temperature for the day.
    pub const COL_MAX_TEMP: &str = "max_temp";
    /// Relative humidity.
    pub const COL_HUMIDITY: &str = "humidity";
    /// Atmospheric pressure.
    pub const COL_PRESSURE: &str = "pressure";
    /// Wind speed.
    pub const COL_WIND_SPEED: &str = "wind_speed";
    /// Wind direction in degrees.
    pub const COL_WIND_DEGREES: &str = "wind_degrees";

    /// Table-qualified primary key.
    pub const QUALIFIED_ID: &str = "weather.id";
    /// Table-qualified foreign key for the join clause.
    pub const QUALIFIED_LOCATION_ID: &str = "weather.location_id";
    /// Table-qualified date column for join selections.
    pub const QUALIFIED_DATE: &str = "weather.date";
}
