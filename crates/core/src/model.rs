//! Request types: stock on hand and part requirements.

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Reads a wire quantity as any JSON number.
///
/// Values that are not a positive whole number fitting `u32` come through as
/// `0`, which validation then rejects with the offending stock or part id.
#[cfg(feature = "serde")]
fn quantity_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (1.0..=u32::MAX as f64).contains(&value) {
        Ok(value as u32)
    } else {
        Ok(0)
    }
}

/// A line of stock on hand: `quantity` bars of one length and spec.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StockItem {
    /// Stock identifier (bar tag, rack slot, ...).
    pub stock_id: String,
    /// Material/size class the bars belong to.
    pub spec_key: String,
    /// Length of each bar in inches.
    pub length_in: f64,
    /// Number of bars.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "quantity_from_number")
    )]
    pub quantity: u32,
    /// Whether leftovers from these bars may be kept as remnants.
    /// Absent means allowed.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub allow_keep_remnants: Option<bool>,
}

impl StockItem {
    /// Creates a stock line that permits remnants.
    pub fn new(
        stock_id: impl Into<String>,
        spec_key: impl Into<String>,
        length_in: f64,
        quantity: u32,
    ) -> Self {
        Self {
            stock_id: stock_id.into(),
            spec_key: spec_key.into(),
            length_in,
            quantity,
            allow_keep_remnants: None,
        }
    }

    /// Sets whether leftovers may be kept as remnants.
    pub fn with_keep_remnants(mut self, allow: bool) -> Self {
        self.allow_keep_remnants = Some(allow);
        self
    }

    /// Returns true unless remnants were explicitly disallowed.
    pub fn keeps_remnants(&self) -> bool {
        self.allow_keep_remnants != Some(false)
    }
}

/// A requested part: `quantity` pieces of one nominal length and spec.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PartRequirement {
    /// Part identifier as it appears on the cut list.
    pub part_id: String,
    /// Material/size class the part must be cut from.
    pub spec_key: String,
    /// Nominal length in inches.
    pub length_in: f64,
    /// Number of pieces.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "quantity_from_number")
    )]
    pub quantity: u32,
}

impl PartRequirement {
    /// Creates a new part requirement.
    pub fn new(
        part_id: impl Into<String>,
        spec_key: impl Into<String>,
        length_in: f64,
        quantity: u32,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            spec_key: spec_key.into(),
            length_in,
            quantity,
        }
    }
}

/// Everything one optimization call needs.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CutPlanInput {
    /// Stock on hand.
    pub stock: Vec<StockItem>,
    /// Parts to cut.
    pub requirements: Vec<PartRequirement>,
    /// Material lost per cut, in inches.
    pub kerf_in: f64,
    /// Extra length added to every part before cutting, in inches.
    pub tolerance_in: f64,
    /// Overrides the configured minimum usable length.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub min_part_length_in: Option<f64>,
}

impl CutPlanInput {
    /// Creates an input with the given stock and requirements, no kerf and no tolerance.
    pub fn new(stock: Vec<StockItem>, requirements: Vec<PartRequirement>) -> Self {
        Self {
            stock,
            requirements,
            kerf_in: 0.0,
            tolerance_in: 0.0,
            min_part_length_in: None,
        }
    }

    /// Sets the kerf.
    pub fn with_kerf(mut self, kerf_in: f64) -> Self {
        self.kerf_in = kerf_in;
        self
    }

    /// Sets the tolerance.
    pub fn with_tolerance(mut self, tolerance_in: f64) -> Self {
        self.tolerance_in = tolerance_in;
        self
    }

    /// Overrides the minimum usable length.
    pub fn with_min_part_length(mut self, length_in: f64) -> Self {
        self.min_part_length_in = Some(length_in);
        self
    }

    /// Total number of bars across all stock lines.
    pub fn total_stock_units(&self) -> u64 {
        self.stock.iter().map(|s| u64::from(s.quantity)).sum()
    }

    /// Total number of pieces across all requirements.
    pub fn total_parts(&self) -> u64 {
        self.requirements.iter().map(|r| u64::from(r.quantity)).sum()
    }
}
