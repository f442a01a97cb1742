//! Alert threshold classification.
//!
//! Given a sensor reading and a named threshold profile, classifies the
//! reading into a severity. The same shape covers soil moisture (percent)
//! and soil temperature (degrees); only the profile values differ. Alert
//! dispatch - push transport, digests, rate limiting - lives outside this
//! crate.

use serde::{Deserialize, Serialize};

/// Alert severity for a classified reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Reading is within the comfortable band
    None,
    /// Reading has dropped to the low threshold
    Low,
    /// Reading has dropped to the critical threshold
    Critical,
    /// Reading has climbed past the high threshold
    HighCritical,
}

/// A named set of thresholds for one reading domain.
///
/// `critical < low < high` is assumed; values at or below `critical` are the
/// most urgent, values at or above `high` alert in the other direction
/// (waterlogged soil, overheated bed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    /// Low-side warning threshold
    pub low: f64,
    /// Low-side critical threshold
    pub critical: f64,
    /// High-side critical threshold
    pub high: f64,
}

/// Classifies a reading against a threshold profile.
#[must_use]
pub fn classify_reading(value: f64, profile: &ThresholdProfile) -> Severity {
    if value <= profile.critical {
        Severity::Critical
    } else if value <= profile.low {
        Severity::Low
    } else if value >= profile.high {
        Severity::HighCritical
    } else {
        Severity::None
    }
}
