//! Forecast ingestion: the write path used by the network-fetch task.
//!
//! A fetch produces one [`LocationRecord`] plus a flat, ordered batch
//! of parsed observation records. Ingestion resolves or creates the
//! location row, stamps each observation with the resolved internal
//! identifier, and hands the batch to the gateway's transactional
//! bulk insert.

use rusqlite::types::Value;
use tracing::{debug, info};

use stratus_types::contract::location;
use stratus_types::{LocationRecord, ObservationRecord, ResourceUri};

use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::values::{RowValues, observation_values};

/// Write a fetched forecast batch for one location.
///
/// Returns the number of observation rows actually inserted; rows
/// already present for a (location, day) pair are skipped by the bulk
/// insert and excluded from the count.
pub fn ingest_forecast(
    provider: &Provider,
    location: &LocationRecord,
    observations: &[ObservationRecord],
) -> Result<usize> {
    let location_id = resolve_location(provider, location)?;

    let batch: Vec<RowValues> = observations
        .iter()
        .map(|record| observation_values(location_id, record))
        .collect();

    let count = provider.bulk_insert(&ResourceUri::weather(), &batch)?;
    info!(
        "Ingested {} of {} observations for {}",
        count,
        observations.len(),
        location.setting
    );
    Ok(count)
}

/// Find the internal identifier for a setting string, creating the
/// location row when it does not exist yet.
pub fn resolve_location(provider: &Provider, record: &LocationRecord) -> Result<i64> {
    if let Some(id) = lookup_location(provider, &record.setting)? {
        debug!("Location {} already known as id {}", record.setting, id);
        return Ok(id);
    }

    match provider.insert(&ResourceUri::location(), &RowValues::from(record)) {
        Ok(uri) => uri
            .trailing_id()
            .ok_or_else(|| Error::BadRequest(format!("insert returned non-row uri: {uri}"))),
        // Lost a create race; the row exists now.
        Err(Error::ConstraintViolation(_)) => lookup_location(provider, &record.setting)?
            .ok_or_else(|| Error::ConstraintViolation(record.setting.clone())),
        Err(e) => Err(e),
    }
}

fn lookup_location(provider: &Provider, setting: &str) -> Result<Option<i64>> {
    let selection = format!("{} = ?", location::COL_SETTING);
    let rows = provider.query(
        &ResourceUri::location(),
        Some(&[location::COL_ID]),
        Some(selection.as_str()),
        &[Value::Text(setting.to_string())],
        None,
    )?;
    Ok(rows.get_i64(0, location::COL_ID))
}
