//! Epsilon-aware length comparisons.
//!
//! Lengths are `f64` inches. Sums such as `36.25 + 0.125` accumulate rounding
//! noise, so every comparison in the optimizer goes through the predicates in
//! this module with the epsilon carried by [`OptimizerConfig`].
//!
//! ## Example
//!
//! ```rust
//! use rebar_cut_core::numeric::{approx_eq, definitely_less, DEFAULT_EPSILON};
//!
//! assert!(approx_eq(0.1 + 0.2, 0.3, DEFAULT_EPSILON));
//! assert!(!definitely_less(18.0 - 1e-12, 18.0, DEFAULT_EPSILON));
//! ```
//!
//! [`OptimizerConfig`]: crate::config::OptimizerConfig

use std::cmp::Ordering;

/// Default comparison epsilon in inches.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Returns true if `a` and `b` are within `eps` of each other.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Returns true if `a` is smaller than `b` by more than `eps`.
#[inline]
pub fn definitely_less(a: f64, b: f64, eps: f64) -> bool {
    a + eps < b
}

/// Returns true if `a` is larger than `b` by more than `eps`.
#[inline]
pub fn definitely_greater(a: f64, b: f64, eps: f64) -> bool {
    a > b + eps
}

/// Sorts `items` by length, treating lengths within `eps` as equal.
///
/// Items are first put in exact length order with [`f64::total_cmp`]. Each run
/// of neighbours no more than `eps` apart is then re-sorted by `tie_break`
/// alone. Any two lengths within `eps` of each other land in the same run.
pub fn sort_by_length<T, L, B>(
    items: &mut [T],
    eps: f64,
    descending: bool,
    length: L,
    tie_break: B,
) where
    L: Fn(&T) -> f64,
    B: Fn(&T, &T) -> Ordering,
{
    items.sort_by(|a, b| {
        let by_length = length(a).total_cmp(&length(b));
        let by_length = if descending {
            by_length.reverse()
        } else {
            by_length
        };
        by_length.then_with(|| tie_break(a, b))
    });

    let mut start = 0;
    for end in 1..=items.len() {
        if end < items.len() && approx_eq(length(&items[end - 1]), length(&items[end]), eps) {
            continue;
        }
        if end - start > 1 {
            items[start..end].sort_by(&tie_break);
        }
        start = end;
    }
}
