//! Persisted store-manager commission record.
//!
//! One record is created per employee per calculation month. Records are
//! never mutated after creation; a recompute deletes the whole month and
//! inserts fresh rows.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The computed field set produced by the commission calculator for one
/// employee, before it is attached to its employee and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionComputation {
    /// Raw sale amount (post-grouping).
    pub sale: Decimal,
    /// Sale base used for the commission; equals the raw sale unless the
    /// 120% cap applied, in which case it is `budget * 1.2`.
    pub sale_calculated: Decimal,
    /// Budgeted sale target.
    pub sale_budget: Decimal,
    /// Stored sale compliance percentage, capped at 120.
    pub sale_compliance: Decimal,
    /// Lower bound of the sale bracket that matched.
    pub sale_applied_range: Decimal,
    /// Commission awarded on the sale channel.
    pub sale_commission: Decimal,
    /// Raw direct profit (post-grouping).
    pub direct_profit: Decimal,
    /// Direct-profit base used for the commission, capped like the sale base.
    pub direct_profit_calculated: Decimal,
    /// Budgeted direct-profit target.
    pub direct_profit_budget: Decimal,
    /// Stored profit compliance percentage, uncapped.
    pub profit_compliance: Decimal,
    /// Lower bound of the profit bracket that matched.
    pub profit_applied_range: Decimal,
    /// Commission awarded on the profit channel.
    pub profit_commission: Decimal,
    /// Reserved performance channel, currently always zero.
    pub performance_commission: Decimal,
    /// Final payroll total: sale + profit + performance commissions,
    /// or the flat bonus for a temporary hire.
    pub total_payroll_amount: Decimal,
}

impl CommissionComputation {
    /// An all-zero computation with the given payroll total.
    ///
    /// Used for temporary hires, who receive a flat store-size bonus
    /// instead of computed amounts.
    pub fn flat_bonus(bonus: Decimal) -> Self {
        Self {
            sale: Decimal::ZERO,
            sale_calculated: Decimal::ZERO,
            sale_budget: Decimal::ZERO,
            sale_compliance: Decimal::ZERO,
            sale_applied_range: Decimal::ZERO,
            sale_commission: Decimal::ZERO,
            direct_profit: Decimal::ZERO,
            direct_profit_calculated: Decimal::ZERO,
            direct_profit_budget: Decimal::ZERO,
            profit_compliance: Decimal::ZERO,
            profit_applied_range: Decimal::ZERO,
            profit_commission: Decimal::ZERO,
            performance_commission: Decimal::ZERO,
            total_payroll_amount: bonus,
        }
    }
}

/// A persisted store-manager commission record.
///
/// Employee identity fields are snapshotted at computation time so the
/// report aggregator can filter and group without re-joining reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreManagerCommissionRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee the commission belongs to.
    pub employee_id: String,
    /// Employee display name at computation time.
    pub employee_name: String,
    /// Employee position at computation time.
    pub position: String,
    /// Employee company at computation time.
    pub company: String,
    /// The cost center (group principal or ungrouped store).
    pub cost_center: String,
    /// The calculation month (first day of month).
    pub calculation_month: NaiveDate,
    /// The computed figures.
    #[serde(flatten)]
    pub computation: CommissionComputation,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
