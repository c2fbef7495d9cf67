use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a backend timestamp. Accepts RFC 3339 (`2025-06-01T10:00:00Z`,
/// with offset or fraction) and the offset-less form the backend emits for
/// UTC columns (`2025-06-01T10:00:00.123`), which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
