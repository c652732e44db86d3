//! Fail-soft boolean algebra over `Region`.
//!
//! Contract
//! - Never panics and never mutates inputs.
//! - Any failure inside the geometry library (topology panics on degenerate or
//!   self-intersecting rings) is logged and yields `Region::empty()`.
//! - Empty operands short-circuit: `∅ ∩ x = ∅`, `∅ ∪ x = x`, `∅ \ x = ∅`,
//!   `x \ ∅ = x`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::{BooleanOps, MultiPolygon};

use super::region::Region;

pub fn intersect(a: &Region, b: &Region) -> Region {
    if a.is_empty() || b.is_empty() {
        return Region::empty();
    }
    let (ma, mb) = (a.to_multi(), b.to_multi());
    guarded("intersect", || ma.intersection(&mb))
}

pub fn difference(outer: &Region, hole: &Region) -> Region {
    if outer.is_empty() {
        return Region::empty();
    }
    if hole.is_empty() {
        return outer.clone();
    }
    let (mo, mh) = (outer.to_multi(), hole.to_multi());
    guarded("difference", || mo.difference(&mh))
}

pub fn union(a: &Region, b: &Region) -> Region {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    let (ma, mb) = (a.to_multi(), b.to_multi());
    guarded("union", || ma.union(&mb))
}

/// Cascading union: fold `chunk`-sized groups, then union the partial results
/// the same way until one region is left. Bounds the size of any single op.
pub fn union_all(mut parts: Vec<Region>, chunk: usize) -> Region {
    let chunk = chunk.max(2);
    parts.retain(|r| !r.is_empty());
    while parts.len() > 1 {
        parts = parts
            .chunks(chunk)
            .map(|group| {
                group
                    .iter()
                    .fold(Region::empty(), |acc, r| union(&acc, r))
            })
            .collect();
    }
    parts.pop().unwrap_or_else(Region::empty)
}

/// Run a boolean op, converting a library panic into the canonical empty region.
pub(crate) fn guarded<F>(op: &'static str, f: F) -> Region
where
    F: FnOnce() -> MultiPolygon<f64>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(mp) => Region::from_multi(mp),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown".to_string());
            tracing::warn!(op, %reason, "boolean op failed; returning empty region");
            Region::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(x0: f64, y0: f64, side: f64) -> Region {
        Region::from_bbox(x0, y0, x0 + side, y0 + side)
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert!((intersect(&a, &b).area_deg2() - 1.0).abs() < 1e-9);
        assert!((difference(&a, &b).area_deg2() - 3.0).abs() < 1e-9);
        assert!((union(&a, &b).area_deg2() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_intersection_is_canonical_empty() {
        let r = intersect(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0));
        assert!(r.is_empty());
        assert_eq!(r, Region::empty());
    }

    #[test]
    fn inputs_are_untouched() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let (a0, b0) = (a.clone(), b.clone());
        let _ = intersect(&a, &b);
        let _ = difference(&a, &b);
        let _ = union(&a, &b);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn library_panic_becomes_empty_region() {
        let r = guarded("test", || panic!("topology exception"));
        assert!(r.is_empty());
    }

    #[test]
    fn union_all_cascades_across_chunks() {
        // 120 unit squares in a row, chunk 50 → three partials, then one.
        let parts: Vec<Region> = (0..120).map(|i| square(i as f64, 0.0, 1.0)).collect();
        let u = union_all(parts, 50);
        assert!((u.area_deg2() - 120.0).abs() < 1e-6);
        assert!(union_all(Vec::new(), 50).is_empty());
    }

    proptest! {
        #[test]
        fn empty_operand_laws(x in -50.0f64..50.0, y in -50.0f64..50.0, side in 0.1f64..10.0) {
            let r = square(x, y, side);
            let e = Region::empty();
            prop_assert!(intersect(&e, &r).is_empty());
            prop_assert!(intersect(&r, &e).is_empty());
            prop_assert_eq!(union(&e, &r), r.clone());
            prop_assert_eq!(union(&r, &e), r.clone());
            prop_assert!(difference(&e, &r).is_empty());
            prop_assert_eq!(difference(&r, &e), r);
        }
    }
}
