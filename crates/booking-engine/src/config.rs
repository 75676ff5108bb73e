//! Checker configuration.

use serde::{Deserialize, Serialize};

/// Whole days required between two bookings at different destinations.
pub const DEFAULT_BUFFER_DAYS: u32 = 1;

/// Tunables for [`check_conflict_with`](crate::conflict::check_conflict_with)
/// and the open-window search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// A new booking at a different destination conflicts when it starts
    /// within `buffer_days` days of an existing booking's end (or ends within
    /// `buffer_days` days of its start). `0` lets bookings abut anywhere.
    pub buffer_days: u32,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            buffer_days: DEFAULT_BUFFER_DAYS,
        }
    }
}

impl CheckerConfig {
    pub fn with_buffer_days(buffer_days: u32) -> Self {
        Self { buffer_days }
    }
}
