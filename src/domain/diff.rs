//! New-ad detection
//!
//! Equality-based set difference between the previous snapshot and the
//! freshly extracted set. Quadratic on purpose: the sets are one listing
//! page each, and structural equality is the only identity we have.

use super::ad::AdRecord;

/// Ads present in `current` but absent from `previous`, in `current` order.
///
/// Duplicate records in `current` that are missing from `previous` are each
/// reported independently — there is no internal dedup.
pub fn new_ads(previous: &[AdRecord], current: &[AdRecord]) -> Vec<AdRecord> {
    current
        .iter()
        .filter(|ad| !previous.contains(ad))
        .cloned()
        .collect()
}
