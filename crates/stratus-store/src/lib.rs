//! URI-addressed SQLite storage gateway for stratus weather data.
//!
//! This crate is the sole owner of the on-disk forecast store: two
//! joined tables (locations and daily weather observations) addressed
//! through `content://` style resource identifiers. Callers never see
//! SQL; they present an identifier plus optional filter and sort
//! parameters, and the gateway routes, translates, and executes.
//!
//! # Features
//!
//! - Route classification and query translation for the five
//!   identifier shapes
//! - Transactional bulk writes with per-row constraint skipping
//! - Change notification per mutated identifier
//! - Versioned schema with forward migrations
//!
//! # Example
//!
//! ```no_run
//! use stratus_store::Provider;
//! use stratus_types::ResourceUri;
//!
//! let provider = Provider::open_default()?;
//!
//! let uri = ResourceUri::weather_for_location("94043");
//! let rows = provider.query(&uri, None, None, &[], Some("weather.date ASC"))?;
//! for row in 0..rows.len() {
//!     println!("{:?}", rows.get_str(row, "short_desc"));
//! }
//! # Ok::<(), stratus_store::Error>(())
//! ```

mod error;
mod ingest;
mod models;
mod notify;
mod plan;
mod provider;
mod rows;
mod schema;
mod values;

pub use error::{Error, Result};
pub use ingest::{ingest_forecast, resolve_location};
pub use models::{StoredLocation, StoredObservation};
pub use notify::{ChangeEvent, ChangeNotifier, ChangeReceiver, ChangeSender, change_channel};
pub use provider::Provider;
pub use rows::RowSet;
pub use values::{RowValues, observation_values};

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/stratus/forecast.db`
/// - macOS: `~/Library/Application Support/stratus/forecast.db`
/// - Windows: `C:\Users\<user>\AppData\Local\stratus\forecast.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("stratus")
        .join("forecast.db")
}
