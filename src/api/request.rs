//! Request types for the Commission Engine API.
//!
//! This module defines the JSON request structure for the
//! `/commissions/store-manager` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PerformanceInput;

/// Request body for the `/commissions/store-manager` endpoint.
///
/// Carries the calculation month and one raw performance row per cost
/// center. Figures may arrive as numbers or locale-formatted strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// The month to compute, as any date within that month.
    pub calculation_month: NaiveDate,
    /// The raw performance rows for the month.
    pub rows: Vec<PerformanceInput>,
}
