//! Report filter, commission facts, and the five report shapes.
//!
//! Reports combine three commission sources: advisor commissions, the
//! consolidated ("indurama") subsystem, and this engine's store-manager
//! records. Every source is reduced to a common fact shape so the five
//! report computations are written once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The three commission subsystems a report draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Advisor commission subsystem.
    Advisor,
    /// Consolidated ("indurama") commission subsystem.
    Consolidated,
    /// This engine's store-manager commission records.
    StoreManager,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::Advisor => "advisor",
            SourceKind::Consolidated => "consolidated",
            SourceKind::StoreManager => "store_manager",
        };
        write!(f, "{}", name)
    }
}

/// Filter applied identically to all report queries.
///
/// `year` is required; everything else narrows the result when present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    /// The calendar year to report on.
    pub year: i32,
    /// Optional month within the year (1-12).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Optional company filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Optional position filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Optional section filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Optional division filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    /// Optional department filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Optional subdepartment filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdepartment: Option<String>,
}

impl ReportFilter {
    /// Validates that a month is present and within `[1, 12]`.
    ///
    /// The average-compliance and compliance-brackets reports are scoped to
    /// a single month and fail fast before any query runs.
    pub fn require_month(&self) -> EngineResult<u32> {
        match self.month {
            Some(month) if (1..=12).contains(&month) => Ok(month),
            Some(month) => Err(EngineError::InvalidReportFilter {
                message: format!("month must be between 1 and 12, got {}", month),
            }),
            None => Err(EngineError::InvalidReportFilter {
                message: "month is required for this report".to_string(),
            }),
        }
    }
}

/// A named numeric figure; reports carry source-specific compliance and
/// applied-range figures under their own labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledFigure {
    /// The figure's label (e.g., "sale_compliance").
    pub label: String,
    /// The figure's value.
    pub value: Decimal,
}

impl LabeledFigure {
    /// Convenience constructor.
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The common "reportable metric" shape every commission source reduces to:
/// an amount, the employee join path, and labeled compliance and
/// applied-range figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionFact {
    /// The employee the commission belongs to.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee position.
    pub position: String,
    /// Calendar year of the commission.
    pub year: i32,
    /// Calendar month of the commission (1-12).
    pub month: u32,
    /// The commission amount for this source's amount column.
    pub amount: Decimal,
    /// Source-specific compliance figures.
    pub compliance: Vec<LabeledFigure>,
    /// Source-specific applied-range lower bounds.
    pub applied_ranges: Vec<LabeledFigure>,
}

/// Report 1 row: commission expense for one month, per source and total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExpenseRow {
    /// Month of the year (1-12).
    pub month: u32,
    /// Advisor subsystem total for the month.
    pub advisor: Decimal,
    /// Consolidated subsystem total for the month.
    pub consolidated: Decimal,
    /// Store-manager engine total for the month.
    pub store_manager: Decimal,
    /// Sum across the three sources.
    pub total: Decimal,
}

/// Report 2 row: commissioned vs non-commissioned employee counts for one
/// source in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionedCountRow {
    /// The source counted.
    pub source: SourceKind,
    /// Month of the year (1-12).
    pub month: u32,
    /// Employees with an amount greater than zero.
    pub commissioned: u64,
    /// Employees with an amount of zero or less.
    pub not_commissioned: u64,
}

/// One employee row in the average-compliance or bracket-distribution
/// reports, with the source's own compliance labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFigureRow {
    /// The employee.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee position.
    pub position: String,
    /// Labeled figures (averaged or raw depending on the report).
    pub figures: Vec<LabeledFigure>,
}

/// One source's result set in reports 3 and 4.
///
/// The three sources stay separate because each has its own compliance
/// concept; the store-manager set carries both a sale and a profit figure
/// per employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFigureRows {
    /// The source these rows came from.
    pub source: SourceKind,
    /// Per-employee rows.
    pub rows: Vec<EmployeeFigureRow>,
}

/// Report 5 per-source row: amount spread for one source in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAmountSpreadRow {
    /// The source measured.
    pub source: SourceKind,
    /// Month of the year (1-12).
    pub month: u32,
    /// Largest amount in the month.
    pub max: Decimal,
    /// Smallest amount greater than zero; zero when no such amount exists.
    pub min_excluding_zero: Decimal,
    /// Mean of all amounts in the month.
    pub avg: Decimal,
}

/// Report 5 combined row: spread across all sources for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAmountSpreadRow {
    /// Month of the year (1-12).
    pub month: u32,
    /// Max of the per-source maxima.
    pub max: Decimal,
    /// Min of the per-source non-zero minima.
    pub min_excluding_zero: Decimal,
    /// Mean of the per-source averages.
    pub avg: Decimal,
}

/// Report 5: per-source and combined min/max/avg amount spreads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountSpreadReport {
    /// Spread per source per month.
    pub per_source: Vec<SourceAmountSpreadRow>,
    /// Spread across sources per month.
    pub combined: Vec<CombinedAmountSpreadRow>,
}

/// The output of one report call, shaped per report index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    /// Report 1: total monthly expense.
    MonthlyExpense(Vec<MonthlyExpenseRow>),
    /// Report 2: commissioned vs non-commissioned counts.
    CommissionedCounts(Vec<CommissionedCountRow>),
    /// Report 3: average compliance per source.
    AverageCompliance(Vec<SourceFigureRows>),
    /// Report 4: raw applied-range values per source.
    BracketDistribution(Vec<SourceFigureRows>),
    /// Report 5: min/max/avg amount spread.
    AmountSpread(AmountSpreadReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_month_accepts_valid_month() {
        let filter = ReportFilter {
            year: 2025,
            month: Some(6),
            ..Default::default()
        };
        assert_eq!(filter.require_month().unwrap(), 6);
    }

    #[test]
    fn test_require_month_rejects_missing_month() {
        let filter = ReportFilter {
            year: 2025,
            ..Default::default()
        };
        let error = filter.require_month().unwrap_err();
        assert!(error.to_string().contains("month is required"));
    }

    #[test]
    fn test_require_month_rejects_out_of_range_month() {
        let filter = ReportFilter {
            year: 2025,
            month: Some(13),
            ..Default::default()
        };
        let error = filter.require_month().unwrap_err();
        assert!(error.to_string().contains("between 1 and 12"));
    }

    #[test]
    fn test_source_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&SourceKind::StoreManager).unwrap(),
            "\"store_manager\""
        );
        assert_eq!(
            serde_json::to_string(&SourceKind::Advisor).unwrap(),
            "\"advisor\""
        );
    }

    #[test]
    fn test_report_filter_deserializes_from_query_shape() {
        let json = r#"{"year": 2025, "month": 4, "position": "JEFE DE TIENDA"}"#;
        let filter: ReportFilter = serde_json::from_str(json).unwrap();
        assert_eq!(filter.year, 2025);
        assert_eq!(filter.month, Some(4));
        assert_eq!(filter.position.as_deref(), Some("JEFE DE TIENDA"));
        assert_eq!(filter.company, None);
    }

    #[test]
    fn test_source_kind_display() {
        assert_eq!(SourceKind::Consolidated.to_string(), "consolidated");
    }
}
