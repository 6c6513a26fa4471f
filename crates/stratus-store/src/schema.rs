//! Database schema and migrations.

use rusqlite::Connection;

use crate::error::Result;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        // Nothing on disk yet: lay down the full current schema.
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if version < SCHEMA_VERSION {
        // Walk the stored schema forward to the current one.
        migrate(conn, version)?;
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> Result<i32> {
    // Before the first initialize the version table is absent.
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 =
        conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0))?;

    Ok(version)
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
        [version],
    )?;
    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL
        );

        -- Locations, keyed externally by the unique setting string
        CREATE TABLE IF NOT EXISTS locations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            setting TEXT NOT NULL UNIQUE,
            city_name TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL
        );

        -- Daily weather observations, one per (location, day)
        CREATE TABLE IF NOT EXISTS weather (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            location_id INTEGER NOT NULL REFERENCES locations(id),
            date INTEGER NOT NULL,
            short_desc TEXT NOT NULL,
            weather_code INTEGER NOT NULL,
            min_temp REAL,
            max_temp REAL,
            humidity REAL,
            pressure REAL,
            wind_speed REAL,
            wind_degrees REAL,
            UNIQUE(location_id, date)
        );
        CREATE INDEX IF NOT EXISTS idx_weather_location_date
            ON weather(location_id, date);
        "#,
    )?;

    Ok(())
}

/// Run migrations from old_version to current.
fn migrate(conn: &Connection, old_version: i32) -> Result<()> {
    // Migration steps slot in here as the schema grows, e.g.
    // if old_version < 2 { migrate_to_v2(conn)?; }

    let _ = old_version;
    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"locations".to_string()));
        assert!(tables.contains(&"weather".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn test_schema_version_tracking() {
        let conn = Connection::open_in_memory().unwrap();

        // No version table yet reads as version 0.
        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        // Initialization stamps the current version.
        initialize(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_setting_uniqueness_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        conn.execute(
            "INSERT INTO locations (setting, city_name, latitude, longitude)
             VALUES ('94043', 'Mountain View', 37.4, -122.1)",
            [],
        )
        .unwrap();

        let dup = conn.execute(
            "INSERT INTO locations (setting, city_name, latitude, longitude)
             VALUES ('94043', 'Elsewhere', 0.0, 0.0)",
            [],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_location_date_uniqueness_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        conn.execute(
            "INSERT INTO locations (setting, city_name, latitude, longitude)
             VALUES ('94043', 'Mountain View', 37.4, -122.1)",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO weather (location_id, date, short_desc, weather_code)
             VALUES (1, 2460311, 'Clear', 800)",
            [],
        )
        .unwrap();

        let dup = conn.execute(
            "INSERT INTO weather (location_id, date, short_desc, weather_code)
             VALUES (1, 2460311, 'Rain', 500)",
            [],
        );
        assert!(dup.is_err());
    }
}
