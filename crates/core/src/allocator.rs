//! Best-fit-decreasing allocation of parts to stock units.
//!
//! # Algorithm
//!
//! Per spec group, with parts already in largest-first order:
//!
//! 1. **Feasibility pre-check**: every part must fit, with one kerf, on the
//!    longest unit of its spec (see [`ensure_feasible`]).
//! 2. **Best fit among open bins**: place the part on the open bin that would
//!    be left with the smallest non-negative remaining length. Ties go to the
//!    bin opened first.
//! 3. **Open a bin**: if no open bin fits, take the smallest sufficient unit
//!    from the [`StockPool`]. If none is left the group fails with
//!    [`Error::InsufficientStock`].
//!
//! Each part consumes `effective length + kerf` of its bin.
//!
//! [`ensure_feasible`]: crate::invariant::ensure_feasible
//! [`StockPool`]: crate::pool::StockPool

use crate::error::{Error, PartFault, Result};
use crate::expand::{PartInstance, StockUnit};
use crate::group::SpecGroup;
use crate::invariant::ensure_feasible;
use crate::numeric::definitely_less;

/// One stock unit's in-progress set of assigned parts.
#[derive(Debug, Clone)]
pub struct Bin {
    /// The stock unit this bin consumes.
    pub stock_unit: StockUnit,
    /// Usable length still unassigned.
    pub remaining_in: f64,
    /// Assigned parts, in assignment order.
    pub parts: Vec<PartInstance>,
    /// 1-based opening order across the whole call.
    pub order: usize,
}

impl Bin {
    /// Opens a bin on `stock_unit` holding `part`.
    fn open(stock_unit: StockUnit, part: PartInstance, required_in: f64, order: usize) -> Self {
        Self {
            remaining_in: stock_unit.length_in - required_in,
            stock_unit,
            parts: vec![part],
            order,
        }
    }

    fn assign(&mut self, part: PartInstance, required_in: f64) {
        self.remaining_in -= required_in;
        self.parts.push(part);
    }

    /// Spec key of the underlying stock unit.
    pub fn spec_key(&self) -> &str {
        &self.stock_unit.spec_key
    }
}

/// Length a part consumes from a bin: effective length plus one kerf.
#[inline]
pub fn required_length(part: &PartInstance, kerf_in: f64) -> f64 {
    part.effective_length_in + kerf_in
}

/// Returns the index of the open bin that fits `required_in` most tightly.
pub fn find_best_fit_bin(bins: &[Bin], required_in: f64, eps: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, bin) in bins.iter().enumerate() {
        let slack = bin.remaining_in - required_in;
        if slack < -eps {
            continue;
        }
        // Bins are scanned in opening order, so only a strictly tighter fit
        // replaces the current best.
        let better = match best {
            None => true,
            Some((_, best_slack)) => definitely_less(slack, best_slack, eps),
        };
        if better {
            best = Some((index, slack));
        }
    }
    best.map(|(index, _)| index)
}

/// Allocates every part of one spec group.
///
/// `next_order` numbers bins across groups and is advanced for each opened bin.
pub fn allocate_spec(
    group: SpecGroup,
    kerf_in: f64,
    eps: f64,
    next_order: &mut usize,
) -> Result<Vec<Bin>> {
    let SpecGroup {
        spec_key,
        mut pool,
        parts,
    } = group;

    log::debug!(
        "Allocating spec {}: {} parts, {} stock units",
        spec_key,
        parts.len(),
        pool.len()
    );

    if let Err(err) = ensure_feasible(&spec_key, &parts, &pool, kerf_in, eps) {
        log::warn!("Spec {} failed feasibility check: {}", spec_key, err);
        return Err(err);
    }

    let mut bins: Vec<Bin> = Vec::new();
    for part in parts {
        let required_in = required_length(&part, kerf_in);

        if let Some(index) = find_best_fit_bin(&bins, required_in, eps) {
            bins[index].assign(part, required_in);
            continue;
        }

        let Some(unit) = pool.take_smallest_fitting(required_in) else {
            let err = Error::InsufficientStock(PartFault::new(
                &spec_key,
                &part.part_id,
                part.length_in,
            ));
            log::warn!("Spec {} ran out of stock: {}", spec_key, err);
            return Err(err);
        };

        *next_order += 1;
        log::debug!(
            "Opened bin {} on {}#{} ({} in)",
            *next_order,
            unit.stock_id,
            unit.stock_unit_index,
            unit.length_in
        );
        bins.push(Bin::open(unit, part, required_in, *next_order));
    }

    log::debug!("Spec {} allocated to {} bins", spec_key, bins.len());
    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::DEFAULT_EPSILON;
    use crate::pool::StockPool;

    fn unit(stock_id: &str, length_in: f64) -> StockUnit {
        StockUnit {
            stock_id: stock_id.to_string(),
            spec_key: "G60".to_string(),
            length_in,
            stock_unit_index: 1,
            allow_keep_remnants: true,
        }
    }

    fn part(part_id: &str, length_in: f64, sequence: usize) -> PartInstance {
        PartInstance {
            part_id: part_id.to_string(),
            spec_key: "G60".to_string(),
            length_in,
            effective_length_in: length_in,
            sequence,
        }
    }

    fn group(units: Vec<StockUnit>, parts: Vec<PartInstance>) -> SpecGroup {
        SpecGroup {
            spec_key: "G60".to_string(),
            pool: StockPool::new(units, DEFAULT_EPSILON),
            parts,
        }
    }

    #[test]
    fn test_best_fit_prefers_tightest_bin() {
        let bins = vec![
            Bin::open(unit("a", 100.0), part("p", 20.0, 1), 20.0, 1),
            Bin::open(unit("b", 100.0), part("p", 50.0, 2), 50.0, 2),
        ];
        // slack 80 - 30 = 50 vs 50 - 30 = 20
        assert_eq!(find_best_fit_bin(&bins, 30.0, DEFAULT_EPSILON), Some(1));
        assert_eq!(find_best_fit_bin(&bins, 81.0, DEFAULT_EPSILON), None);
    }

    #[test]
    fn test_best_fit_tie_goes_to_earliest_bin() {
        let bins = vec![
            Bin::open(unit("a", 100.0), part("p", 40.0, 1), 40.0, 1),
            Bin::open(unit("b", 100.0), part("p", 40.0, 2), 40.0, 2),
        ];
        assert_eq!(find_best_fit_bin(&bins, 30.0, DEFAULT_EPSILON), Some(0));
    }

    #[test]
    fn test_best_fit_near_tie_goes_to_earliest_bin() {
        let mut bins = vec![
            Bin::open(unit("a", 100.0), part("p", 50.0, 1), 50.0, 1),
            Bin::open(unit("b", 100.0), part("p", 50.0, 2), 50.0, 2),
        ];
        // Slacks 20.0 and 20.0 + 1e-12: equal within epsilon.
        bins[1].remaining_in = 50.0 + 1e-12;
        assert_eq!(find_best_fit_bin(&bins, 30.0, DEFAULT_EPSILON), Some(0));

        // The later bin is tighter, but only by float noise.
        bins[0].remaining_in = 50.0 + 1e-12;
        bins[1].remaining_in = 50.0;
        assert_eq!(find_best_fit_bin(&bins, 30.0, DEFAULT_EPSILON), Some(0));
    }

    #[test]
    fn test_exact_fit_accepted() {
        let bins = vec![Bin::open(unit("a", 100.0), part("p", 60.0, 1), 60.0, 1)];
        assert_eq!(find_best_fit_bin(&bins, 40.0, DEFAULT_EPSILON), Some(0));
    }

    #[test]
    fn test_allocate_opens_smallest_sufficient_unit() {
        let mut order = 0;
        let bins = allocate_spec(
            group(
                vec![unit("long", 120.0), unit("short", 96.0)],
                vec![part("p1", 90.0, 1), part("p2", 30.0, 2)],
            ),
            0.0,
            DEFAULT_EPSILON,
            &mut order,
        )
        .unwrap();

        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].stock_unit.stock_id, "short");
        assert_eq!(bins[1].stock_unit.stock_id, "long");
        assert_eq!(order, 2);
    }

    #[test]
    fn test_allocate_insufficient_stock() {
        let mut order = 0;
        let err = allocate_spec(
            group(
                vec![unit("s", 100.0)],
                vec![
                    part("p", 50.0, 1),
                    part("p", 50.0, 2),
                    part("p", 50.0, 3),
                ],
            ),
            0.0,
            DEFAULT_EPSILON,
            &mut order,
        )
        .unwrap_err();

        match err {
            Error::InsufficientStock(fault) => {
                assert_eq!(fault.part_id, "p");
                assert_eq!(fault.spec_key, "G60");
                assert_eq!(fault.length_in, 50.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_allocate_charges_kerf_per_part() {
        let mut order = 0;
        let bins = allocate_spec(
            group(
                vec![unit("s", 100.0)],
                vec![part("p", 40.0, 1), part("p", 40.0, 2)],
            ),
            1.0,
            DEFAULT_EPSILON,
            &mut order,
        )
        .unwrap();
        assert_eq!(bins.len(), 1);
        assert!((bins[0].remaining_in - 18.0).abs() < 1e-12);
    }
}
