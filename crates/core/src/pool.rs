//! Pool of stock units still available to one spec group.

use crate::expand::StockUnit;
use crate::numeric::{definitely_less, sort_by_length};

/// Available stock units of a single spec, kept in ascending order.
///
/// Order is length ascending, then stock id, then per-source index, so the
/// first unit that fits a request is the smallest sufficient one.
#[derive(Debug, Clone, Default)]
pub struct StockPool {
    units: Vec<StockUnit>,
    eps: f64,
}

impl StockPool {
    /// Creates a pool, sorting the units.
    pub fn new(mut units: Vec<StockUnit>, eps: f64) -> Self {
        sort_by_length(
            &mut units,
            eps,
            false,
            |u| u.length_in,
            |a, b| {
                (a.stock_id.as_str(), a.stock_unit_index)
                    .cmp(&(b.stock_id.as_str(), b.stock_unit_index))
            },
        );
        Self { units, eps }
    }

    /// Number of units still available.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if no units remain.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Length of the longest available unit.
    pub fn max_length(&self) -> Option<f64> {
        self.units.iter().map(|u| u.length_in).reduce(f64::max)
    }

    /// Iterates over the available units in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &StockUnit> {
        self.units.iter()
    }

    /// Removes and returns the smallest unit at least `required_in` long.
    pub fn take_smallest_fitting(&mut self, required_in: f64) -> Option<StockUnit> {
        let eps = self.eps;
        let index = self
            .units
            .iter()
            .position(|unit| !definitely_less(unit.length_in, required_in, eps))?;
        Some(self.units.remove(index))
    }
}
