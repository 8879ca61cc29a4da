//! Common utilities

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::path::Path;
use std::time::SystemTime;

/// Get a file's modification time as a UTC timestamp.
///
/// Falls back to the Unix epoch if the filesystem cannot report one.
pub fn file_mtime(path: &Path) -> std::io::Result<DateTime<Utc>> {
    let metadata = std::fs::metadata(path)?;
    let mtime = metadata.modified()?;
    Ok(system_time_to_utc(mtime))
}

/// Convert a `SystemTime` to `DateTime<Utc>`
pub fn system_time_to_utc(time: SystemTime) -> DateTime<Utc> {
    let duration = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    Utc.timestamp_millis_opt(duration.as_millis() as i64)
        .single()
        .unwrap_or_default()
}

/// Format a timestamp the way exports expect it: RFC 3339 with millisecond
/// precision and a `Z` suffix, e.g. `2024-05-01T12:00:00.000Z`.
pub fn export_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
