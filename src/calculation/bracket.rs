//! Bracket resolution.
//!
//! Given a compliance percentage, a metric channel, and a store-size label,
//! resolution finds the commission percentage and the matched bracket's
//! lower bound (the "applied range", kept for audit and reporting).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CommissionRuleSet, MetricKind};

use super::store_size::classify_store_size;

/// The outcome of a bracket lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBracket {
    /// Commission percentage awarded, rounded to 2 decimal places.
    pub percent: Decimal,
    /// Lower bound of the bracket that matched.
    pub applied_range_min: Decimal,
}

impl ResolvedBracket {
    /// The zero resolution used when no bracket applies.
    pub fn zero() -> Self {
        Self {
            percent: Decimal::ZERO,
            applied_range_min: Decimal::ZERO,
        }
    }
}

/// Resolves the commission percentage for a compliance value.
///
/// The store-size label is classified into a bracket-table key first. The
/// bracket list is sorted defensively by `min` and the first bracket whose
/// inclusive `[min, max]` range contains the compliance value wins. A value
/// above every bracket's `max` falls into the highest bracket (open-ended
/// extrapolation at the top tier); a value below the lowest `min`, or a
/// missing table, resolves to zero.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::resolve_bracket;
/// use commission_engine::config::{CommissionRuleSet, MetricKind, RawRuleRow};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rows = vec![
///     RawRuleRow { name: "VENTA".into(), store_size: "GRANDE".into(),
///                  min: dec("80"), max: dec("99.99"), percent: dec("1.5") },
/// ];
/// let rules = CommissionRuleSet::from_rows(&rows);
///
/// let resolved = resolve_bracket(&rules, "GRANDE", dec("85"), MetricKind::Sale);
/// assert_eq!(resolved.percent, dec("1.5"));
/// assert_eq!(resolved.applied_range_min, dec("80"));
/// ```
pub fn resolve_bracket(
    rules: &CommissionRuleSet,
    store_size_label: &str,
    compliance: Decimal,
    metric: MetricKind,
) -> ResolvedBracket {
    let size_key = classify_store_size(store_size_label);

    let Some(brackets) = rules.brackets(metric, &size_key) else {
        return ResolvedBracket::zero();
    };
    if brackets.is_empty() {
        return ResolvedBracket::zero();
    }

    let mut sorted = brackets.to_vec();
    sorted.sort_by(|a, b| a.min.cmp(&b.min));

    for bracket in &sorted {
        if compliance >= bracket.min && compliance <= bracket.max {
            return ResolvedBracket {
                percent: round_percent(bracket.percent),
                applied_range_min: bracket.min,
            };
        }
    }

    // Above the top tier the highest bracket keeps applying.
    let top = sorted.last().filter(|b| compliance > b.max);
    match top {
        Some(bracket) => ResolvedBracket {
            percent: round_percent(bracket.percent),
            applied_range_min: bracket.min,
        },
        None => ResolvedBracket::zero(),
    }
}

fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawRuleRow;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn standard_rules() -> CommissionRuleSet {
        let row = |min: &str, max: &str, percent: &str| RawRuleRow {
            name: "VENTA".to_string(),
            store_size: "GRANDE".to_string(),
            min: dec(min),
            max: dec(max),
            percent: dec(percent),
        };
        CommissionRuleSet::from_rows(&[
            row("0", "79.99", "0"),
            row("80", "99.99", "1.5"),
            row("100", "120", "2.0"),
        ])
    }

    /// BR-001: compliance 85 lands in the middle bracket
    #[test]
    fn test_middle_bracket_match() {
        let rules = standard_rules();
        let resolved = resolve_bracket(&rules, "GRANDE", dec("85"), MetricKind::Sale);
        assert_eq!(resolved.percent, dec("1.5"));
        assert_eq!(resolved.applied_range_min, dec("80"));
    }

    /// BR-002: compliance 112 lands in the top bracket
    #[test]
    fn test_top_bracket_match() {
        let rules = standard_rules();
        let resolved = resolve_bracket(&rules, "MEDIANA", dec("112"), MetricKind::Sale);
        assert_eq!(resolved.percent, dec("2.0"));
        assert_eq!(resolved.applied_range_min, dec("100"));
    }

    /// BR-003: compliance above every max extrapolates the top tier
    #[test]
    fn test_above_top_tier_extrapolates() {
        let rules = standard_rules();
        let resolved = resolve_bracket(&rules, "GRANDE", dec("187.5"), MetricKind::Sale);
        assert_eq!(resolved.percent, dec("2.0"));
        assert_eq!(resolved.applied_range_min, dec("100"));
    }

    /// BR-004: bounds are inclusive on both ends
    #[test]
    fn test_inclusive_bounds() {
        let rules = standard_rules();

        let at_min = resolve_bracket(&rules, "GRANDE", dec("80"), MetricKind::Sale);
        assert_eq!(at_min.percent, dec("1.5"));

        let at_max = resolve_bracket(&rules, "GRANDE", dec("99.99"), MetricKind::Sale);
        assert_eq!(at_max.percent, dec("1.5"));
    }

    /// BR-005: missing table resolves to zero
    #[test]
    fn test_missing_table_is_zero() {
        let rules = standard_rules();

        let wrong_metric = resolve_bracket(&rules, "GRANDE", dec("85"), MetricKind::Profit);
        assert_eq!(wrong_metric, ResolvedBracket::zero());

        let wrong_size = resolve_bracket(&rules, "OUTLET", dec("85"), MetricKind::Sale);
        assert_eq!(wrong_size, ResolvedBracket::zero());
    }

    /// BR-006: below the lowest min resolves to zero
    #[test]
    fn test_below_lowest_min_is_zero() {
        let row = RawRuleRow {
            name: "VENTA".to_string(),
            store_size: "GRANDE".to_string(),
            min: dec("80"),
            max: dec("99.99"),
            percent: dec("1.5"),
        };
        let rules = CommissionRuleSet::from_rows(&[row]);

        let resolved = resolve_bracket(&rules, "GRANDE", dec("50"), MetricKind::Sale);
        assert_eq!(resolved, ResolvedBracket::zero());
    }

    /// BR-007: unsorted input still resolves correctly
    #[test]
    fn test_unsorted_brackets_tolerated() {
        let row = |min: &str, max: &str, percent: &str| RawRuleRow {
            name: "VENTA".to_string(),
            store_size: "OUTLET".to_string(),
            min: dec(min),
            max: dec(max),
            percent: dec(percent),
        };
        // Built from rows arriving out of order.
        let rules = CommissionRuleSet::from_rows(&[
            row("100", "120", "2.0"),
            row("0", "79.99", "0"),
            row("80", "99.99", "1.5"),
        ]);

        let resolved = resolve_bracket(&rules, "OUTLET", dec("85"), MetricKind::Sale);
        assert_eq!(resolved.percent, dec("1.5"));
        assert_eq!(resolved.applied_range_min, dec("80"));
    }

    #[test]
    fn test_percent_rounded_to_two_decimals() {
        let row = RawRuleRow {
            name: "VENTA".to_string(),
            store_size: "OUTLET".to_string(),
            min: dec("0"),
            max: dec("120"),
            percent: dec("1.567"),
        };
        let rules = CommissionRuleSet::from_rows(&[row]);

        let resolved = resolve_bracket(&rules, "OUTLET", dec("50"), MetricKind::Sale);
        assert_eq!(resolved.percent, dec("1.57"));
    }
}
