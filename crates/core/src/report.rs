//! Presentation helpers: bar segment views and scrap reporting.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::numeric::definitely_greater;
use crate::result::{CutPlan, RemainderKind, StockAllocation};

/// Kind of a segment along a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SegmentKind {
    /// A cut part.
    Part,
    /// Leftover kept for reuse.
    KeepRemnant,
    /// Leftover thrown away.
    Waste,
}

impl From<RemainderKind> for SegmentKind {
    fn from(kind: RemainderKind) -> Self {
        match kind {
            RemainderKind::KeepRemnant => SegmentKind::KeepRemnant,
            RemainderKind::Waste => SegmentKind::Waste,
        }
    }
}

/// One stretch of a bar as shown on a cut list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CutSegment {
    /// Segment kind.
    pub kind: SegmentKind,
    /// Segment length in inches.
    pub length_in: f64,
    /// Part id for [`SegmentKind::Part`] segments.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub part_id: Option<String>,
}

impl StockAllocation {
    /// Lays the allocation out as bar segments.
    ///
    /// One part segment per cut, in cut order, then the remainder if it has
    /// any length. Kerf is not listed: the segments plus one kerf per cut add
    /// up to the original length.
    pub fn segments(&self) -> Vec<CutSegment> {
        let mut segments: Vec<CutSegment> = self
            .cuts
            .iter()
            .map(|cut| CutSegment {
                kind: SegmentKind::Part,
                length_in: cut.make_length_in,
                part_id: Some(cut.part_id.clone()),
            })
            .collect();

        if self.remainder.length_in > 0.0 {
            segments.push(CutSegment {
                kind: self.remainder.kind.into(),
                length_in: self.remainder.length_in,
                part_id: None,
            });
        }
        segments
    }
}

/// Scrap figures for a plan, measured against a scrap-free threshold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScrapReport {
    /// Total length of consumed stock units.
    pub stock_used_in: f64,
    /// Leftover classified as waste. Kept remnants and kerf are not scrap.
    pub scrap_length_in: f64,
    /// Scrap as a percentage of stock used (0 - 100).
    pub scrap_percent: f64,
    /// Threshold the plan was measured against.
    pub threshold_percent: f64,
    /// Whether scrap stays at or under the threshold.
    pub is_scrap_free: bool,
}

impl ScrapReport {
    /// Measures `plan` against `threshold_percent`.
    ///
    /// A scrap percentage within `eps` of the threshold counts as scrap-free.
    pub fn from_plan(plan: &CutPlan, threshold_percent: f64, eps: f64) -> Self {
        let stock_used_in: f64 = plan
            .allocations
            .iter()
            .map(|a| a.original_length_in)
            .sum();
        let scrap_length_in = plan.summary.waste_in;
        let scrap_percent = if stock_used_in > 0.0 {
            scrap_length_in / stock_used_in * 100.0
        } else {
            0.0
        };

        Self {
            stock_used_in,
            scrap_length_in,
            scrap_percent,
            threshold_percent,
            is_scrap_free: !definitely_greater(scrap_percent, threshold_percent, eps),
        }
    }
}
