//! The readiness rule: majority upstream reachability plus cache
//! freshness.
//!
//! Evaluation is pure; the caller probes the stations and reads the
//! freshness marker, then passes the results in. Gates are checked in
//! order and the first failing gate determines the verdict and its
//! reason.

use chrono::Duration;

use crate::types::{ReadinessVerdict, Timestamp, FRESHNESS_THRESHOLD_SECS};

/// Minimum number of reachable stations out of `total`: a strict
/// majority, `floor(total / 2) + 1`.
pub fn required_reachable(total: usize) -> usize {
    total / 2 + 1
}

/// Evaluate the readiness gates.
///
/// * `reachable` / `total` - outcome of probing every configured
///   station.
/// * `last_refresh` - freshness marker, `None` when it has never been
///   written (or the cache is empty).
pub fn evaluate(
    reachable: usize,
    total: usize,
    last_refresh: Option<Timestamp>,
    now: Timestamp,
) -> ReadinessVerdict {
    let required = required_reachable(total);
    if reachable < required {
        return ReadinessVerdict::not_ready(format!(
            "insufficient upstream availability: {reachable}/{total} stations reachable, need {required}"
        ));
    }

    match last_refresh {
        None => ReadinessVerdict::not_ready("cache stale: no refresh recorded"),
        Some(at) if now - at > Duration::seconds(FRESHNESS_THRESHOLD_SECS) => {
            ReadinessVerdict::not_ready(format!(
                "cache stale: last refresh at {}",
                at.to_rfc3339()
            ))
        }
        Some(_) => ReadinessVerdict::ready(),
    }
}
