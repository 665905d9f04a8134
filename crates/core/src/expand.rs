//! Input validation and expansion into individually addressable units.
//!
//! A [`StockItem`] with quantity `n` becomes `n` [`StockUnit`]s and a
//! [`PartRequirement`] with quantity `n` becomes `n` [`PartInstance`]s. All
//! numeric domain checks happen here, before any allocation starts.

use std::cmp::Ordering;

use crate::config::OptimizerConfig;
use crate::error::{Error, Result};
use crate::model::{CutPlanInput, PartRequirement, StockItem};
use crate::numeric::{definitely_less, sort_by_length};

/// One physical bar of stock.
#[derive(Debug, Clone, PartialEq)]
pub struct StockUnit {
    /// Source stock line id.
    pub stock_id: String,
    /// Spec key of the source line.
    pub spec_key: String,
    /// Bar length in inches.
    pub length_in: f64,
    /// 1-based index of this bar within its source line.
    pub stock_unit_index: u32,
    /// Whether the leftover may be kept as a remnant.
    pub allow_keep_remnants: bool,
}

/// One physical piece to be cut.
#[derive(Debug, Clone, PartialEq)]
pub struct PartInstance {
    /// Source requirement id.
    pub part_id: String,
    /// Spec key of the source requirement.
    pub spec_key: String,
    /// Nominal length in inches.
    pub length_in: f64,
    /// Nominal length plus tolerance.
    pub effective_length_in: f64,
    /// 1-based position among all expanded pieces, in input order.
    pub sequence: usize,
}

/// Validated, expanded snapshot of a request.
#[derive(Debug, Clone)]
pub struct ExpandedInput {
    /// Every bar, in input order.
    pub stock_units: Vec<StockUnit>,
    /// Every piece, largest effective length first.
    pub parts: Vec<PartInstance>,
    /// Kerf per cut.
    pub kerf_in: f64,
    /// Tolerance added to each part.
    pub tolerance_in: f64,
    /// Resolved minimum usable length.
    pub min_part_length_in: f64,
}

fn ensure_non_negative(value: f64, label: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(format!(
            "{label} must be a non-negative number."
        )));
    }
    Ok(())
}

/// Validates a request and expands it into stock units and sorted part instances.
pub fn expand(input: &CutPlanInput, config: &OptimizerConfig) -> Result<ExpandedInput> {
    ensure_non_negative(input.kerf_in, "Kerf")?;
    ensure_non_negative(input.tolerance_in, "Tolerance")?;

    let min_part_length_in = config.min_part_length(input.min_part_length_in);
    if !min_part_length_in.is_finite() || min_part_length_in <= 0.0 {
        return Err(Error::validation(
            "Minimum part length must be a positive number.",
        ));
    }

    let stock_units = expand_stock(&input.stock)?;
    let parts = expand_requirements(
        &input.requirements,
        input.tolerance_in,
        min_part_length_in,
        config.epsilon,
    )?;

    log::debug!(
        "Expanded request into {} stock units and {} parts (min length {} in)",
        stock_units.len(),
        parts.len(),
        min_part_length_in
    );

    Ok(ExpandedInput {
        stock_units,
        parts,
        kerf_in: input.kerf_in,
        tolerance_in: input.tolerance_in,
        min_part_length_in,
    })
}

/// Expands stock lines into one unit per bar.
pub fn expand_stock(items: &[StockItem]) -> Result<Vec<StockUnit>> {
    let mut units = Vec::new();
    for item in items {
        if item.quantity == 0 {
            return Err(Error::invalid_stock(
                format!("Stock {} quantity must be a positive integer.", item.stock_id),
                &item.spec_key,
                &item.stock_id,
                item.length_in,
            ));
        }
        if !item.length_in.is_finite() || item.length_in <= 0.0 {
            return Err(Error::invalid_stock(
                format!("Stock {} length must be a positive number.", item.stock_id),
                &item.spec_key,
                &item.stock_id,
                item.length_in,
            ));
        }

        let allow_keep_remnants = item.keeps_remnants();
        units.extend((1..=item.quantity).map(|index| StockUnit {
            stock_id: item.stock_id.clone(),
            spec_key: item.spec_key.clone(),
            length_in: item.length_in,
            stock_unit_index: index,
            allow_keep_remnants,
        }));
    }
    Ok(units)
}

/// Expands requirements into one instance per piece, sorted largest-first.
pub fn expand_requirements(
    requirements: &[PartRequirement],
    tolerance_in: f64,
    min_part_length_in: f64,
    eps: f64,
) -> Result<Vec<PartInstance>> {
    let mut parts = Vec::new();
    let mut sequence = 0usize;

    for requirement in requirements {
        if requirement.quantity == 0 {
            return Err(Error::invalid_part(
                format!(
                    "Part {} quantity must be a positive integer.",
                    requirement.part_id
                ),
                &requirement.spec_key,
                &requirement.part_id,
                requirement.length_in,
            ));
        }
        if !requirement.length_in.is_finite() || requirement.length_in <= 0.0 {
            return Err(Error::invalid_part(
                format!(
                    "Part {} length must be a positive number.",
                    requirement.part_id
                ),
                &requirement.spec_key,
                &requirement.part_id,
                requirement.length_in,
            ));
        }
        if definitely_less(requirement.length_in, min_part_length_in, eps) {
            return Err(Error::invalid_part(
                format!(
                    "Part {} length must be at least {} inches.",
                    requirement.part_id, min_part_length_in
                ),
                &requirement.spec_key,
                &requirement.part_id,
                requirement.length_in,
            ));
        }

        let effective_length_in = requirement.length_in + tolerance_in;
        for _ in 0..requirement.quantity {
            sequence += 1;
            parts.push(PartInstance {
                part_id: requirement.part_id.clone(),
                spec_key: requirement.spec_key.clone(),
                length_in: requirement.length_in,
                effective_length_in,
                sequence,
            });
        }
    }

    sort_parts(&mut parts, eps);
    Ok(parts)
}

/// Tie-break for parts of equal effective length: part id, then sequence.
pub fn part_tie_break(a: &PartInstance, b: &PartInstance) -> Ordering {
    (a.part_id.as_str(), a.sequence).cmp(&(b.part_id.as_str(), b.sequence))
}

/// Sorts parts into largest-first order: effective length descending, then
/// [`part_tie_break`].
pub fn sort_parts(parts: &mut [PartInstance], eps: f64) {
    sort_by_length(parts, eps, true, |p| p.effective_length_in, part_tie_break);
}
