//! Feasibility pre-checks and material-conservation checks.

use crate::error::{Error, PartFault, Result};
use crate::expand::PartInstance;
use crate::numeric::definitely_greater;
use crate::pool::StockPool;
use crate::result::{PlanSummary, RemainderKind, StockAllocation};

/// Fails if some part of a spec group cannot fit even on an empty unit.
///
/// With no stock at all the first part is reported. Otherwise the first part
/// whose effective length plus one kerf exceeds the longest unit is reported.
pub fn ensure_feasible(
    spec_key: &str,
    parts: &[PartInstance],
    pool: &StockPool,
    kerf_in: f64,
    eps: f64,
) -> Result<()> {
    let Some(max_length_in) = pool.max_length() else {
        return match parts.first() {
            Some(part) => Err(Error::InfeasiblePart(PartFault::new(
                spec_key,
                &part.part_id,
                part.length_in,
            ))),
            None => Ok(()),
        };
    };

    for part in parts {
        let required_in = part.effective_length_in + kerf_in;
        if definitely_greater(required_in, max_length_in, eps) {
            return Err(Error::InfeasiblePart(PartFault::new(
                spec_key,
                &part.part_id,
                part.length_in,
            )));
        }
    }
    Ok(())
}

/// Recomputed material totals for a set of allocations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockUsage {
    /// Number of allocations reconciled.
    pub allocation_count: usize,
    /// Number of cuts across all allocations.
    pub cut_count: usize,
    /// Total original length of consumed units.
    pub total_stock_in: f64,
    /// Total cut length.
    pub total_part_in: f64,
    /// Total kerf loss.
    pub total_kerf_in: f64,
    /// Total leftover length, kept or wasted.
    pub total_remainder_in: f64,
    /// Leftover classified as waste.
    pub waste_in: f64,
    /// Leftover kept as remnants.
    pub kept_remnant_in: f64,
}

impl StockUsage {
    /// Tallies the totals of `allocations`.
    pub fn tally(allocations: &[StockAllocation], kerf_in: f64) -> Self {
        let mut usage = StockUsage {
            allocation_count: allocations.len(),
            ..Default::default()
        };
        for allocation in allocations {
            usage.cut_count += allocation.cuts.len();
            usage.total_stock_in += allocation.original_length_in;
            usage.total_part_in += allocation.total_cut_length();
            usage.total_kerf_in += allocation.kerf_loss(kerf_in);
            usage.total_remainder_in += allocation.remainder.length_in;
            match allocation.remainder.kind {
                RemainderKind::Waste => usage.waste_in += allocation.remainder.length_in,
                RemainderKind::KeepRemnant => {
                    usage.kept_remnant_in += allocation.remainder.length_in
                }
            }
        }
        usage
    }

    /// Cut length divided by stock consumed, 0 when nothing was consumed.
    pub fn utilization(&self) -> f64 {
        if self.total_stock_in > 0.0 {
            self.total_part_in / self.total_stock_in
        } else {
            0.0
        }
    }

    /// Builds the plan summary.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            utilization_pct: self.utilization(),
            waste_in: self.waste_in,
            kept_remnant_in: self.kept_remnant_in,
        }
    }
}

/// Recomputes totals and verifies that no length was created or destroyed.
///
/// `parts + kerf + remainder` must equal the stock consumed within
/// `eps` times the allocation count.
pub fn reconcile(allocations: &[StockAllocation], kerf_in: f64, eps: f64) -> Result<StockUsage> {
    let usage = StockUsage::tally(allocations, kerf_in);
    let planned_in = usage.total_part_in + usage.total_kerf_in + usage.total_remainder_in;
    let allowed = eps * usage.allocation_count as f64;

    if usage.total_stock_in > 0.0 && (planned_in - usage.total_stock_in).abs() > allowed {
        return Err(Error::internal(
            "inconsistent stock usage totals",
            format!(
                "stock_in={} parts_in={} kerf_in={} remainder_in={} planned_in={} allocations={}",
                usage.total_stock_in,
                usage.total_part_in,
                usage.total_kerf_in,
                usage.total_remainder_in,
                planned_in,
                usage.allocation_count
            ),
        ));
    }
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::StockUnit;
    use crate::numeric::DEFAULT_EPSILON;
    use crate::result::{Cut, Remainder};

    fn part(part_id: &str, length_in: f64) -> PartInstance {
        PartInstance {
            part_id: part_id.to_string(),
            spec_key: "G60".to_string(),
            length_in,
            effective_length_in: length_in,
            sequence: 1,
        }
    }

    fn pool(lengths: &[f64]) -> StockPool {
        StockPool::new(
            lengths
                .iter()
                .enumerate()
                .map(|(i, len)| StockUnit {
                    stock_id: format!("s{i}"),
                    spec_key: "G60".to_string(),
                    length_in: *len,
                    stock_unit_index: 1,
                    allow_keep_remnants: true,
                })
                .collect(),
            DEFAULT_EPSILON,
        )
    }

    fn allocation(
        original: f64,
        cuts: &[f64],
        remainder: f64,
        kind: RemainderKind,
    ) -> StockAllocation {
        StockAllocation {
            stock_id: "s".to_string(),
            stock_unit_index: 1,
            spec_key: "G60".to_string(),
            original_length_in: original,
            cuts: cuts
                .iter()
                .enumerate()
                .map(|(i, len)| Cut {
                    cut_index: i as u32 + 1,
                    make_length_in: *len,
                    part_id: "p".to_string(),
                })
                .collect(),
            remainder: Remainder {
                length_in: remainder,
                kind,
            },
        }
    }

    #[test]
    fn test_no_stock_reports_first_part() {
        let err = ensure_feasible(
            "G60",
            &[part("big", 50.0), part("small", 20.0)],
            &pool(&[]),
            0.0,
            DEFAULT_EPSILON,
        )
        .unwrap_err();
        assert_eq!(err.part_fault().map(|f| f.part_id.as_str()), Some("big"));
        assert!(matches!(err, Error::InfeasiblePart(_)));
    }

    #[test]
    fn test_no_stock_no_parts_is_fine() {
        assert!(ensure_feasible("G60", &[], &pool(&[]), 0.0, DEFAULT_EPSILON).is_ok());
    }

    #[test]
    fn test_kerf_makes_part_infeasible() {
        let err = ensure_feasible("G60", &[part("p", 59.0)], &pool(&[60.0]), 2.0, DEFAULT_EPSILON)
            .unwrap_err();
        match err {
            Error::InfeasiblePart(fault) => {
                assert_eq!(fault.spec_key, "G60");
                assert_eq!(fault.length_in, 59.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(
            ensure_feasible("G60", &[part("p", 59.0)], &pool(&[60.0]), 1.0, DEFAULT_EPSILON).is_ok()
        );
    }

    #[test]
    fn test_reconcile_totals() {
        let allocations = vec![
            allocation(100.0, &[40.0, 40.0], 18.0, RemainderKind::KeepRemnant),
            allocation(50.0, &[30.0], 19.0, RemainderKind::Waste),
        ];
        let usage = reconcile(&allocations, 1.0, DEFAULT_EPSILON).unwrap();
        assert_eq!(usage.total_stock_in, 150.0);
        assert_eq!(usage.total_part_in, 110.0);
        assert_eq!(usage.total_kerf_in, 3.0);
        assert_eq!(usage.cut_count, 3);
        assert_eq!(usage.kept_remnant_in, 18.0);
        assert_eq!(usage.waste_in, 19.0);

        let summary = usage.summary();
        assert!((summary.utilization_pct - 110.0 / 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_reconcile_detects_lost_length() {
        let allocations = vec![allocation(100.0, &[40.0], 50.0, RemainderKind::KeepRemnant)];
        let err = reconcile(&allocations, 0.0, DEFAULT_EPSILON).unwrap_err();
        assert!(matches!(err, Error::Internal { .. }));
        assert!(err.to_string().contains("planned_in=90"));
    }

    #[test]
    fn test_empty_usage() {
        let usage = reconcile(&[], 0.5, DEFAULT_EPSILON).unwrap();
        assert_eq!(usage.utilization(), 0.0);
        assert_eq!(usage.summary(), PlanSummary::default());
    }
}
