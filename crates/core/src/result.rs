//! Cut plan representation.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What happens to the leftover of a stock unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RemainderKind {
    /// Long enough to reuse; goes back to the remnant rack.
    KeepRemnant,
    /// Too short, or the unit does not allow remnants.
    Waste,
}

impl RemainderKind {
    /// Returns the wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            RemainderKind::KeepRemnant => "KEEP_REMNANT",
            RemainderKind::Waste => "WASTE",
        }
    }
}

/// A single cut on a stock unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Cut {
    /// 1-based position on the bar.
    pub cut_index: u32,
    /// Length to mark and cut (nominal + tolerance).
    pub make_length_in: f64,
    /// Requirement this piece satisfies.
    pub part_id: String,
}

/// Leftover length after all cuts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Remainder {
    /// Leftover length in inches, never negative.
    pub length_in: f64,
    /// Classification of the leftover.
    pub kind: RemainderKind,
}

/// Cuts assigned to one physical stock unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StockAllocation {
    /// Source stock line id.
    pub stock_id: String,
    /// 1-based index of the bar within its stock line.
    pub stock_unit_index: u32,
    /// Spec key shared by the bar and every cut.
    pub spec_key: String,
    /// Bar length before cutting.
    pub original_length_in: f64,
    /// Cuts in the order they are made.
    pub cuts: Vec<Cut>,
    /// What is left over.
    pub remainder: Remainder,
}

impl StockAllocation {
    /// Sum of all cut lengths.
    pub fn total_cut_length(&self) -> f64 {
        self.cuts.iter().map(|c| c.make_length_in).sum()
    }

    /// Material lost to the blade on this bar.
    pub fn kerf_loss(&self, kerf_in: f64) -> f64 {
        self.cuts.len() as f64 * kerf_in
    }

    /// Returns true if the leftover is kept as a remnant.
    pub fn keeps_remnant(&self) -> bool {
        self.remainder.kind == RemainderKind::KeepRemnant
    }
}

/// Aggregate figures for a plan.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanSummary {
    /// Total cut length divided by total stock consumed (ratio, 0.0 - 1.0).
    pub utilization_pct: f64,
    /// Total leftover classified as waste.
    pub waste_in: f64,
    /// Total leftover kept as remnants.
    pub kept_remnant_in: f64,
}

/// Result of an optimization call.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CutPlan {
    /// One entry per consumed stock unit, grouped by spec, in opening order.
    pub allocations: Vec<StockAllocation>,
    /// Aggregate figures.
    pub summary: PlanSummary,
}

impl CutPlan {
    /// Number of stock units consumed.
    pub fn stock_units_used(&self) -> usize {
        self.allocations.len()
    }

    /// Total number of cuts across all units.
    pub fn cut_count(&self) -> usize {
        self.allocations.iter().map(|a| a.cuts.len()).sum()
    }

    /// Number of cuts per part id.
    pub fn cut_counts_by_part(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for cut in self.allocations.iter().flat_map(|a| &a.cuts) {
            *counts.entry(cut.part_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Allocations of one spec key.
    pub fn allocations_for_spec<'a>(
        &'a self,
        spec_key: &'a str,
    ) -> impl Iterator<Item = &'a StockAllocation> + 'a {
        self.allocations
            .iter()
            .filter(move |a| a.spec_key == spec_key)
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.summary.utilization_pct * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(spec_key: &str, parts: &[(&str, f64)], remainder: f64) -> StockAllocation {
        StockAllocation {
            stock_id: "s1".to_string(),
            stock_unit_index: 1,
            spec_key: spec_key.to_string(),
            original_length_in: 100.0,
            cuts: parts
                .iter()
                .enumerate()
                .map(|(i, (id, len))| Cut {
                    cut_index: i as u32 + 1,
                    make_length_in: *len,
                    part_id: id.to_string(),
                })
                .collect(),
            remainder: Remainder {
                length_in: remainder,
                kind: RemainderKind::Waste,
            },
        }
    }

    #[test]
    fn test_empty_plan() {
        let plan = CutPlan::default();
        assert_eq!(plan.stock_units_used(), 0);
        assert_eq!(plan.cut_count(), 0);
        assert!(plan.cut_counts_by_part().is_empty());
        assert_eq!(plan.utilization_percent(), "0.0%");
    }

    #[test]
    fn test_counts() {
        let plan = CutPlan {
            allocations: vec![
                allocation("G60", &[("a", 40.0), ("b", 30.0)], 28.0),
                allocation("X10", &[("a", 40.0)], 59.0),
            ],
            summary: PlanSummary {
                utilization_pct: 0.55,
                ..Default::default()
            },
        };

        assert_eq!(plan.stock_units_used(), 2);
        assert_eq!(plan.cut_count(), 3);
        let counts = plan.cut_counts_by_part();
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(plan.allocations_for_spec("X10").count(), 1);
        assert_eq!(plan.utilization_percent(), "55.0%");
    }

    #[test]
    fn test_allocation_totals() {
        let alloc = allocation("G60", &[("a", 40.0), ("b", 30.0)], 28.0);
        assert_eq!(alloc.total_cut_length(), 70.0);
        assert_eq!(alloc.kerf_loss(1.0), 2.0);
        assert!(!alloc.keeps_remnant());
    }

    #[test]
    fn test_remainder_kind_names() {
        assert_eq!(RemainderKind::KeepRemnant.as_str(), "KEEP_REMNANT");
        assert_eq!(RemainderKind::Waste.as_str(), "WASTE");
    }
}
