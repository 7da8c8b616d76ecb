//! Timestamp utilities
//!
//! All schedule windows are compared in UTC. Timestamps are persisted as
//! RFC 3339 TEXT and parsed back with these helpers so that the selection
//! path and the cleanup path agree on one parse.

use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp for storage (RFC 3339, UTC)
pub fn to_db(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Parse a stored RFC 3339 timestamp
pub fn from_db(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid stored timestamp '{}': {}", raw, e)))
}

/// Parse an optional stored timestamp column
pub fn from_db_opt(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(from_db).transpose()
}
