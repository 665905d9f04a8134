//! Optimizer entry point.

use crate::allocator::allocate_spec;
use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::expand::expand;
use crate::finalize::finalize_bin;
use crate::group::group_by_spec;
use crate::invariant::reconcile;
use crate::model::CutPlanInput;
use crate::result::CutPlan;

/// Deterministic 1D cutting-stock optimizer.
///
/// Holds only configuration; every call builds and discards its own working
/// state, so one optimizer can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct CutOptimizer {
    config: OptimizerConfig,
}

impl CutOptimizer {
    /// Creates an optimizer with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Creates an optimizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(OptimizerConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Computes a cut plan for `input`.
    ///
    /// Fails on the first validation error, or on the first infeasible or
    /// unallocatable part of the first failing spec group.
    pub fn optimize(&self, input: &CutPlanInput) -> Result<CutPlan> {
        self.config.validate()?;
        let eps = self.config.epsilon;

        let expanded = expand(input, &self.config)?;
        let kerf_in = expanded.kerf_in;
        let min_part_length_in = expanded.min_part_length_in;
        let groups = group_by_spec(&expanded, eps);

        log::info!(
            "Optimizing cut plan: {} stock units, {} parts, {} specs (kerf {} in, tolerance {} in)",
            expanded.stock_units.len(),
            expanded.parts.len(),
            groups.len(),
            kerf_in,
            expanded.tolerance_in
        );

        let mut bin_order = 0usize;
        let mut allocations = Vec::new();
        for group in groups {
            let bins = allocate_spec(group, kerf_in, eps, &mut bin_order)?;
            for bin in bins {
                allocations.push(finalize_bin(bin, kerf_in, min_part_length_in, eps)?);
            }
        }

        let usage = reconcile(&allocations, kerf_in, eps)?;
        let summary = usage.summary();

        log::info!(
            "Cut plan complete: {} bars, {} cuts, utilization {:.4}, waste {} in, remnants {} in",
            allocations.len(),
            usage.cut_count,
            summary.utilization_pct,
            summary.waste_in,
            summary.kept_remnant_in
        );

        Ok(CutPlan {
            allocations,
            summary,
        })
    }
}

/// Computes a cut plan with the default configuration.
///
/// ```rust
/// use rebar_cut_core::{optimize, CutPlanInput, PartRequirement, RemainderKind, StockItem};
///
/// let input = CutPlanInput::new(
///     vec![StockItem::new("stock-1", "G60", 100.0, 1)],
///     vec![PartRequirement::new("part-1", "G60", 40.0, 2)],
/// )
/// .with_kerf(1.0);
///
/// let plan = optimize(&input).unwrap();
/// assert_eq!(plan.allocations.len(), 1);
/// assert_eq!(plan.allocations[0].remainder.kind, RemainderKind::KeepRemnant);
/// ```
pub fn optimize(input: &CutPlanInput) -> Result<CutPlan> {
    CutOptimizer::default_config().optimize(input)
}
