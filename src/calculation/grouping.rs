//! Store-group rollup.
//!
//! Some stores are grouped: a principal cost center absorbs the figures of
//! its secondaries, and only the principal is computed. The rollup must
//! happen before compliance percentages are computed; compliance is a
//! percentage of budget, so summing per-row percentages afterward would be
//! wrong.

use std::collections::{HashMap, HashSet};

use crate::models::{PerformanceFigures, StoreGroup};

/// Rolls secondary cost centers' figures into their principals.
///
/// `groups` maps a principal cost center to its group; only groups whose
/// principal appears in the batch take effect. The first pass marks every
/// secondary of a present principal as consumed; the second pass emits,
/// in input order, either the summed principal row or the untouched
/// original. Secondaries whose principal is absent from the batch pass
/// through and are computed independently.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::roll_up_groups;
/// use commission_engine::models::{PerformanceFigures, StoreGroup};
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let row = |ceco: &str, sale: i64| PerformanceFigures {
///     cost_center: ceco.to_string(),
///     sale: Decimal::from(sale),
///     sale_budget: Decimal::ZERO,
///     direct_profit: Decimal::ZERO,
///     direct_profit_budget: Decimal::ZERO,
/// };
/// let rows = vec![row("C1", 100), row("C2", 50)];
/// let mut groups = HashMap::new();
/// groups.insert("C1".to_string(), StoreGroup {
///     principal: "C1".to_string(),
///     secondaries: vec!["C2".to_string()],
/// });
///
/// let grouped = roll_up_groups(&rows, &groups);
/// assert_eq!(grouped.len(), 1);
/// assert_eq!(grouped[0].sale, Decimal::from(150));
/// ```
pub fn roll_up_groups(
    rows: &[PerformanceFigures],
    groups: &HashMap<String, StoreGroup>,
) -> Vec<PerformanceFigures> {
    let by_cost_center: HashMap<&str, &PerformanceFigures> = rows
        .iter()
        .map(|row| (row.cost_center.as_str(), row))
        .collect();

    // First pass: mark secondaries of present principals as consumed.
    let mut consumed: HashSet<&str> = HashSet::new();
    for row in rows {
        if let Some(group) = groups.get(&row.cost_center) {
            for secondary in &group.secondaries {
                if by_cost_center.contains_key(secondary.as_str()) {
                    consumed.insert(secondary.as_str());
                }
            }
        }
    }

    // Second pass: emit summed principals and untouched ungrouped rows.
    let mut result = Vec::with_capacity(rows.len());
    for row in rows {
        if consumed.contains(row.cost_center.as_str()) {
            continue;
        }

        match groups.get(&row.cost_center) {
            Some(group) => {
                let mut summed = row.clone();
                for secondary in &group.secondaries {
                    if let Some(other) = by_cost_center.get(secondary.as_str()) {
                        summed.sale += other.sale;
                        summed.sale_budget += other.sale_budget;
                        summed.direct_profit += other.direct_profit;
                        summed.direct_profit_budget += other.direct_profit_budget;
                    }
                }
                result.push(summed);
            }
            None => result.push(row.clone()),
        }
    }

    result
}
