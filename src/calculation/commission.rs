//! The central commission calculation.
//!
//! For each channel (sale, direct profit) independently: compute the
//! compliance percentage, resolve the bracket, apply the 120% cap to the
//! commission base, and compute the commission amount. The payroll total
//! is the sum of both channel commissions plus the reserved performance
//! channel.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CommissionRuleSet, MetricKind};
use crate::models::{CommissionComputation, PerformanceFigures};

use super::bracket::resolve_bracket;

/// Compliance ceiling: performance beyond 120% of budget earns no extra
/// commission, and the commission base is clamped to `budget * 1.2`.
pub const COMPLIANCE_CAP: Decimal = Decimal::from_parts(120, 0, 0, false, 0);

const CAP_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1); // 1.2

/// One channel's intermediate figures.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChannelOutcome {
    /// Compliance percentage before any cap.
    compliance: Decimal,
    /// The commission base: the raw actual, or `budget * 1.2` when capped.
    calculated: Decimal,
    /// Commission percentage resolved from the bracket table.
    percent: Decimal,
    /// Lower bound of the matched bracket.
    applied_range_min: Decimal,
    /// Commission amount, floored at zero.
    commission: Decimal,
}

/// Computes compliance, bracket, cap, and commission for one channel.
fn compute_channel(
    actual: Decimal,
    budget: Decimal,
    metric: MetricKind,
    store_size_label: &str,
    rules: &CommissionRuleSet,
) -> ChannelOutcome {
    let compliance = if budget > Decimal::ZERO {
        actual / budget * Decimal::ONE_HUNDRED
    } else if actual > Decimal::ZERO {
        COMPLIANCE_CAP
    } else {
        Decimal::ZERO
    };

    let resolved = resolve_bracket(rules, store_size_label, compliance, metric);

    let calculated = if compliance > COMPLIANCE_CAP {
        budget * CAP_FACTOR
    } else {
        actual
    };

    let commission =
        round5(calculated * resolved.percent / Decimal::ONE_HUNDRED).max(Decimal::ZERO);

    ChannelOutcome {
        compliance,
        calculated,
        percent: resolved.percent,
        applied_range_min: resolved.applied_range_min,
        commission,
    }
}

/// Computes the full field set for one (possibly grouped) performance
/// record.
///
/// The stored sale compliance is capped at 120 for display while the
/// profit compliance is stored uncapped; both channels resolve their
/// brackets against the uncapped value.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::calculate_commission;
/// use commission_engine::config::{CommissionRuleSet, RawRuleRow};
/// use commission_engine::models::PerformanceFigures;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rules = CommissionRuleSet::from_rows(&[RawRuleRow {
///     name: "VENTA".into(), store_size: "GRANDE".into(),
///     min: dec("100"), max: dec("120"), percent: dec("2.0"),
/// }]);
/// let figures = PerformanceFigures {
///     cost_center: "C101".into(),
///     sale: dec("90000"), sale_budget: dec("80000"),
///     direct_profit: Decimal::ZERO, direct_profit_budget: Decimal::ZERO,
/// };
///
/// let computation = calculate_commission(&figures, "GRANDE", &rules);
/// assert_eq!(computation.sale_compliance, dec("112.5"));
/// assert_eq!(computation.sale_commission, dec("1800.00"));
/// ```
pub fn calculate_commission(
    figures: &PerformanceFigures,
    store_size_label: &str,
    rules: &CommissionRuleSet,
) -> CommissionComputation {
    let sale = compute_channel(
        figures.sale,
        figures.sale_budget,
        MetricKind::Sale,
        store_size_label,
        rules,
    );
    let profit = compute_channel(
        figures.direct_profit,
        figures.direct_profit_budget,
        MetricKind::Profit,
        store_size_label,
        rules,
    );

    let performance_commission = Decimal::ZERO;
    let total_payroll_amount = sale.commission + profit.commission + performance_commission;

    CommissionComputation {
        sale: figures.sale,
        sale_calculated: sale.calculated,
        sale_budget: figures.sale_budget,
        sale_compliance: sale.compliance.min(COMPLIANCE_CAP),
        sale_applied_range: sale.applied_range_min,
        sale_commission: sale.commission,
        direct_profit: figures.direct_profit,
        direct_profit_calculated: profit.calculated,
        direct_profit_budget: figures.direct_profit_budget,
        profit_compliance: profit.compliance,
        profit_applied_range: profit.applied_range_min,
        profit_commission: profit.commission,
        performance_commission,
        total_payroll_amount,
    }
}

/// Rounds a commission amount to 5 decimal places, half away from zero.
fn round5(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(5, RoundingStrategy::MidpointAwayFromZero)
}
