//! Top-K selection over distance records.

use crate::distance::DistanceRecord;

/// Sorts records nearest first.
///
/// The sort is stable, so equal distances keep their input order. NaN
/// distances of either sign sort after every number.
pub fn sort_by_distance(records: &mut [DistanceRecord]) {
    records.sort_by(|a, b| {
        a.distance
            .is_nan()
            .cmp(&b.distance.is_nan())
            .then(a.distance.total_cmp(&b.distance))
    });
}

/// Sorts `records` and keeps the first `min(k, records.len())` of them.
///
/// # Examples
/// ```
/// use nearby::{DistanceRecord, select_nearest};
///
/// let records = vec![
///     DistanceRecord { id: 0, distance: 0.0 },
///     DistanceRecord { id: 1, distance: 10.0 },
///     DistanceRecord { id: 2, distance: 3.0 },
/// ];
/// let nearest = select_nearest(records, 5);
/// let ids: Vec<_> = nearest.iter().map(|r| r.id).collect();
/// assert_eq!(ids, vec![0, 2, 1]);
/// ```
pub fn select_nearest(mut records: Vec<DistanceRecord>, k: usize) -> Vec<DistanceRecord> {
    sort_by_distance(&mut records);
    records.truncate(k);
    records
}
