//! Identifier and timestamp provider.
//!
//! Every item the handlers create gets its identifier, its `createdAt`
//! timestamp, and (for notebooks) its cover pattern from here. Keeping the
//! draws in one place keeps the handlers free of direct `rand`/clock calls.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Total number of notebook cover patterns the frontend can render.
pub const PATTERN_COUNT: u8 = 21;

/// Draw a uniformly random pattern index in `[0, PATTERN_COUNT)`.
///
/// Assigned once at notebook creation; never changed afterwards.
#[must_use]
pub fn random_pattern() -> u8 {
    rand::thread_rng().gen_range(0..PATTERN_COUNT)
}

/// Creation timestamp for a new item.
#[must_use]
pub fn timestamp() -> DateTime<Utc> {
    Utc::now()
}
