//! Performance input models.
//!
//! This module defines the raw per-cost-center performance rows supplied to
//! a batch run, the normalized figures the calculation pipeline works on,
//! and the store-group reference data used for rollups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_locale_number;
use crate::error::EngineResult;

/// A raw figure as it arrives from upstream spreadsheets: either a plain
/// number or a locale-ambiguous string such as `"34.287,23"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFigure {
    /// A numeric value that needs no locale interpretation.
    Number(f64),
    /// A string value that must be normalized before use.
    Text(String),
}

impl RawFigure {
    /// Normalizes the figure into an exact decimal value.
    ///
    /// Numbers pass through; strings go through the locale-aware parser.
    pub fn normalize(&self) -> EngineResult<Decimal> {
        match self {
            RawFigure::Number(value) => Decimal::from_f64_retain(*value).ok_or_else(|| {
                crate::error::EngineError::NumericParse {
                    value: value.to_string(),
                }
            }),
            RawFigure::Text(value) => parse_locale_number(value),
        }
    }
}

impl From<f64> for RawFigure {
    fn from(value: f64) -> Self {
        RawFigure::Number(value)
    }
}

impl From<&str> for RawFigure {
    fn from(value: &str) -> Self {
        RawFigure::Text(value.to_string())
    }
}

/// One raw performance row for a cost center in the calculation month.
///
/// Rows are ephemeral batch input; they are not persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInput {
    /// The cost center (CECO) the figures belong to.
    pub cost_center: String,
    /// Raw sale amount for the month.
    pub sale: RawFigure,
    /// Budgeted sale target for the month.
    pub sale_budget: RawFigure,
    /// Direct profit for the month.
    pub direct_profit: RawFigure,
    /// Budgeted direct-profit target for the month.
    pub direct_profit_budget: RawFigure,
}

impl PerformanceInput {
    /// Normalizes all four figures, producing exact decimal values.
    ///
    /// Fails with the first figure that cannot be parsed.
    pub fn normalize(&self) -> EngineResult<PerformanceFigures> {
        Ok(PerformanceFigures {
            cost_center: self.cost_center.clone(),
            sale: self.sale.normalize()?,
            sale_budget: self.sale_budget.normalize()?,
            direct_profit: self.direct_profit.normalize()?,
            direct_profit_budget: self.direct_profit_budget.normalize()?,
        })
    }
}

/// Normalized performance figures for one computation key.
///
/// After grouping, the cost center is always a group principal or an
/// ungrouped store, and the figures may be rollups of several rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceFigures {
    /// The computation key (principal or ungrouped cost center).
    pub cost_center: String,
    /// Sale amount.
    pub sale: Decimal,
    /// Budgeted sale target.
    pub sale_budget: Decimal,
    /// Direct profit.
    pub direct_profit: Decimal,
    /// Budgeted direct-profit target.
    pub direct_profit_budget: Decimal,
}

/// A store group: a principal cost center whose commission is computed over
/// the summed figures of its secondaries.
///
/// Read-only reference data owned by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreGroup {
    /// The principal cost center.
    pub principal: String,
    /// The secondary cost centers rolled into the principal.
    pub secondaries: Vec<String>,
}
