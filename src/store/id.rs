//! Version identifiers
//!
//! Ids are UTC timestamps with millisecond precision (`20261017-093015-042`).
//! Fixed width makes lexicographic order chronological. When the clock
//! hasn't moved past the newest id (same millisecond, or a clock step
//! backwards) a counter suffix is appended instead: `20261017-093015-042.001`.
//! A full counter starts a nested one (`.999` is followed by `.999.001`) so
//! every successor still sorts after its predecessor.

use chrono::{DateTime, Utc};

const ID_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

/// Largest value of a three-digit counter suffix
const MAX_COUNTER: u32 = 999;

pub fn timestamp_id(now: DateTime<Utc>) -> String {
    now.format(ID_FORMAT).to_string()
}

/// Next id given the newest existing one
pub fn next_id(newest: Option<&str>, now: DateTime<Utc>) -> String {
    let candidate = timestamp_id(now);

    match newest {
        Some(newest) if candidate.as_str() <= newest => successor(newest),
        _ => candidate,
    }
}

fn successor(id: &str) -> String {
    if let Some((base, suffix)) = id.rsplit_once('.') {
        if let Ok(counter) = suffix.parse::<u32>() {
            if counter < MAX_COUNTER {
                return format!("{base}.{:03}", counter + 1);
            }
        }
    }
    format!("{id}.001")
}
