//! Conversion of closed bins into stock allocations.

use crate::allocator::Bin;
use crate::error::{Error, Result};
use crate::expand::sort_parts;
use crate::numeric::definitely_less;
use crate::result::{Cut, Remainder, RemainderKind, StockAllocation};

/// Classifies a leftover length.
///
/// The minimum is inclusive: a remainder exactly at `min_part_length_in`
/// (within `eps`) is kept.
pub fn classify_remainder(
    remainder_in: f64,
    min_part_length_in: f64,
    allow_keep_remnants: bool,
    eps: f64,
) -> RemainderKind {
    if allow_keep_remnants && remainder_in + eps >= min_part_length_in {
        RemainderKind::KeepRemnant
    } else {
        RemainderKind::Waste
    }
}

/// Turns a closed bin into a stock allocation.
pub fn finalize_bin(
    bin: Bin,
    kerf_in: f64,
    min_part_length_in: f64,
    eps: f64,
) -> Result<StockAllocation> {
    let Bin {
        stock_unit,
        mut parts,
        ..
    } = bin;
    sort_parts(&mut parts, eps);

    let mut cuts = Vec::with_capacity(parts.len());
    for (index, part) in parts.into_iter().enumerate() {
        if definitely_less(part.effective_length_in, min_part_length_in, eps) {
            return Err(Error::internal(
                "cut shorter than the minimum usable length",
                format!(
                    "spec={} stock={}#{} part={} make_length_in={} min_part_length_in={}",
                    stock_unit.spec_key,
                    stock_unit.stock_id,
                    stock_unit.stock_unit_index,
                    part.part_id,
                    part.effective_length_in,
                    min_part_length_in
                ),
            ));
        }
        cuts.push(Cut {
            cut_index: index as u32 + 1,
            make_length_in: part.effective_length_in,
            part_id: part.part_id,
        });
    }

    let total_cut_in: f64 = cuts.iter().map(|c| c.make_length_in).sum();
    let total_kerf_in = cuts.len() as f64 * kerf_in;
    let remainder_in = (stock_unit.length_in - total_cut_in - total_kerf_in).max(0.0);
    let kind = classify_remainder(
        remainder_in,
        min_part_length_in,
        stock_unit.allow_keep_remnants,
        eps,
    );

    if kind == RemainderKind::KeepRemnant && definitely_less(remainder_in, min_part_length_in, eps)
    {
        return Err(Error::internal(
            "remnant kept below the minimum usable length",
            format!(
                "spec={} stock={}#{} remainder_in={} min_part_length_in={}",
                stock_unit.spec_key,
                stock_unit.stock_id,
                stock_unit.stock_unit_index,
                remainder_in,
                min_part_length_in
            ),
        ));
    }

    Ok(StockAllocation {
        stock_id: stock_unit.stock_id,
        stock_unit_index: stock_unit.stock_unit_index,
        spec_key: stock_unit.spec_key,
        original_length_in: stock_unit.length_in,
        cuts,
        remainder: Remainder {
            length_in: remainder_in,
            kind,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::{PartInstance, StockUnit};
    use crate::numeric::DEFAULT_EPSILON;

    fn bin(length_in: f64, allow: bool, parts: &[(&str, f64, usize)], remaining_in: f64) -> Bin {
        Bin {
            stock_unit: StockUnit {
                stock_id: "s1".to_string(),
                spec_key: "G60".to_string(),
                length_in,
                stock_unit_index: 1,
                allow_keep_remnants: allow,
            },
            remaining_in,
            parts: parts
                .iter()
                .map(|(id, len, seq)| PartInstance {
                    part_id: id.to_string(),
                    spec_key: "G60".to_string(),
                    length_in: *len,
                    effective_length_in: *len,
                    sequence: *seq,
                })
                .collect(),
            order: 1,
        }
    }

    #[test]
    fn test_classify_inclusive_boundary() {
        assert_eq!(
            classify_remainder(18.0, 18.0, true, DEFAULT_EPSILON),
            RemainderKind::KeepRemnant
        );
        assert_eq!(
            classify_remainder(18.0 - 1e-12, 18.0, true, DEFAULT_EPSILON),
            RemainderKind::KeepRemnant
        );
        assert_eq!(
            classify_remainder(17.9, 18.0, true, DEFAULT_EPSILON),
            RemainderKind::Waste
        );
        assert_eq!(
            classify_remainder(50.0, 18.0, false, DEFAULT_EPSILON),
            RemainderKind::Waste
        );
    }

    #[test]
    fn test_finalize_orders_and_indexes_cuts() {
        let alloc = finalize_bin(
            bin(100.0, true, &[("b", 20.0, 3), ("a", 40.0, 1), ("a", 20.0, 2)], 18.0),
            1.0,
            18.0,
            DEFAULT_EPSILON,
        )
        .unwrap();

        let cuts: Vec<_> = alloc
            .cuts
            .iter()
            .map(|c| (c.cut_index, c.part_id.as_str(), c.make_length_in))
            .collect();
        assert_eq!(cuts, vec![(1, "a", 40.0), (2, "a", 20.0), (3, "b", 20.0)]);
        assert!((alloc.remainder.length_in - 17.0).abs() < 1e-12);
        assert_eq!(alloc.remainder.kind, RemainderKind::Waste);
    }

    #[test]
    fn test_finalize_keeps_remnant() {
        let alloc = finalize_bin(
            bin(100.0, true, &[("p", 40.0, 1), ("p", 40.0, 2)], 18.0),
            1.0,
            18.0,
            DEFAULT_EPSILON,
        )
        .unwrap();
        assert_eq!(alloc.remainder.kind, RemainderKind::KeepRemnant);
        assert!((alloc.remainder.length_in - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_finalize_clamps_negative_noise() {
        let alloc = finalize_bin(
            bin(60.0, true, &[("p", 30.0, 1), ("p", 30.0 + 1e-12, 2)], 0.0),
            0.0,
            18.0,
            DEFAULT_EPSILON,
        )
        .unwrap();
        assert_eq!(alloc.remainder.length_in, 0.0);
        assert_eq!(alloc.remainder.kind, RemainderKind::Waste);
    }

    #[test]
    fn test_short_cut_is_internal_fault() {
        let err = finalize_bin(
            bin(100.0, true, &[("p", 10.0, 1)], 90.0),
            0.0,
            18.0,
            DEFAULT_EPSILON,
        )
        .unwrap_err();
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("stock=s1#1"));
    }
}
