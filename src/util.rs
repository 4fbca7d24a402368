use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::{Error, Point, P2};

/// Hashable identity of an exact coordinate pair.
///
/// `f64` has no `Eq` or `Hash`, so locations are keyed on their bit
/// patterns. Negative zero is folded into positive zero to match IEEE `==`;
/// NaN never reaches a key because input validation rejects it first.
pub(crate) type PointKey = (u64, u64);

pub(crate) fn point_key(p: &P2) -> PointKey {
    fn bits(v: f64) -> u64 {
        if v == 0.0 {
            0.0f64.to_bits()
        } else {
            v.to_bits()
        }
    }
    (bits(p.x), bits(p.y))
}

/// Collect the positions of a batch of items, checking every coordinate is
/// finite.
pub(crate) fn validate<T: Point>(items: &[T]) -> Result<Vec<P2>, Error> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let p = item.point();
            if p.x.is_finite() && p.y.is_finite() {
                Ok(p)
            } else {
                Err(Error::InvalidInput {
                    index,
                    x: p.x,
                    y: p.y,
                })
            }
        })
        .collect()
}

/// Collapse exact-coordinate duplicates into (location, multiplicity) pairs.
///
/// First-seen order is preserved so repeated builds over the same input stay
/// deterministic.
pub(crate) fn count_unique(points: &[P2]) -> Vec<(P2, usize)> {
    let mut slots: FxHashMap<PointKey, usize> = FxHashMap::default();
    let mut unique: Vec<(P2, usize)> = Vec::new();
    for &p in points {
        match slots.entry(point_key(&p)) {
            Entry::Occupied(slot) => unique[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push((p, 1));
            }
        }
    }
    unique
}
