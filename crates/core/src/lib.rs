//! # Rebar Cut Core
//!
//! Deterministic one-dimensional cutting-stock optimizer.
//!
//! Given bars of stock grouped by material spec and a list of part lengths,
//! the optimizer assigns every part to a specific bar, charges blade kerf per
//! cut, adds dimensional tolerance to each part, and classifies what is left
//! of each bar as a reusable remnant or as waste.
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Validation & expansion | [`expand`] | one [`StockUnit`] per bar, one [`PartInstance`] per piece |
//! | Grouping | [`group`] | one [`SpecGroup`] per spec key |
//! | Allocation | [`allocator`] | best-fit-decreasing [`Bin`]s |
//! | Finalization | [`finalize`] | [`StockAllocation`]s with classified remainders |
//! | Reconciliation | [`invariant`] | conservation check and [`PlanSummary`] |
//!
//! Every stage is a pure function over the previous stage's output; the same
//! input always produces the same plan, in the same order.
//!
//! ## Example
//!
//! ```rust
//! use rebar_cut_core::{CutOptimizer, CutPlanInput, OptimizerConfig, PartRequirement, StockItem};
//!
//! let input = CutPlanInput::new(
//!     vec![
//!         StockItem::new("stock-a", "G60", 120.0, 1),
//!         StockItem::new("stock-b", "G60", 96.0, 1),
//!     ],
//!     vec![
//!         PartRequirement::new("part-1", "G60", 36.0, 2),
//!         PartRequirement::new("part-2", "G60", 24.0, 1),
//!     ],
//! )
//! .with_kerf(0.125)
//! .with_tolerance(0.25);
//!
//! let optimizer = CutOptimizer::new(OptimizerConfig::default());
//! let plan = optimizer.optimize(&input).unwrap();
//! assert_eq!(plan.cut_count(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialization support and the JSON [`api`] module (default)

pub mod allocator;
#[cfg(feature = "serde")]
pub mod api;
pub mod config;
pub mod error;
pub mod expand;
pub mod finalize;
pub mod group;
pub mod invariant;
pub mod model;
pub mod numeric;
pub mod optimizer;
pub mod pool;
pub mod report;
pub mod result;

// Re-exports
pub use allocator::Bin;
pub use config::{OptimizerConfig, DEFAULT_SCRAP_FREE_THRESHOLD_PCT, MIN_PART_LENGTH_IN};
pub use error::{Error, ErrorClass, PartFault, Result};
pub use expand::{ExpandedInput, PartInstance, StockUnit};
pub use group::SpecGroup;
pub use invariant::StockUsage;
pub use model::{CutPlanInput, PartRequirement, StockItem};
pub use numeric::DEFAULT_EPSILON;
pub use optimizer::{optimize, CutOptimizer};
pub use pool::StockPool;
pub use report::{CutSegment, ScrapReport, SegmentKind};
pub use result::{Cut, CutPlan, PlanSummary, Remainder, RemainderKind, StockAllocation};
