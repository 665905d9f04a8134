//! Partitioning of expanded units and parts by spec key.

use std::collections::HashMap;

use crate::expand::{ExpandedInput, PartInstance, StockUnit};
use crate::pool::StockPool;

/// Stock and parts belonging to a single spec key.
#[derive(Debug, Clone)]
pub struct SpecGroup {
    /// The shared spec key.
    pub spec_key: String,
    /// Units of this spec, smallest first.
    pub pool: StockPool,
    /// Parts of this spec, largest first.
    pub parts: Vec<PartInstance>,
}

/// Buckets an expanded request by spec key.
///
/// Groups are returned in order of the first appearance of each spec among
/// the sorted parts. Specs that have stock but no parts yield no group.
pub fn group_by_spec(expanded: &ExpandedInput, eps: f64) -> Vec<SpecGroup> {
    let mut order: Vec<&str> = Vec::new();
    let mut parts_by_spec: HashMap<&str, Vec<PartInstance>> = HashMap::new();
    for part in &expanded.parts {
        parts_by_spec
            .entry(part.spec_key.as_str())
            .or_insert_with(|| {
                order.push(part.spec_key.as_str());
                Vec::new()
            })
            .push(part.clone());
    }

    let mut units_by_spec: HashMap<&str, Vec<StockUnit>> = HashMap::new();
    for unit in &expanded.stock_units {
        units_by_spec
            .entry(unit.spec_key.as_str())
            .or_default()
            .push(unit.clone());
    }

    order
        .into_iter()
        .map(|spec_key| SpecGroup {
            spec_key: spec_key.to_string(),
            pool: StockPool::new(units_by_spec.remove(spec_key).unwrap_or_default(), eps),
            parts: parts_by_spec.remove(spec_key).unwrap_or_default(),
        })
        .collect()
}
