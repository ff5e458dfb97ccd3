//! Commission rule configuration types.
//!
//! This module contains the raw configuration rows as they come from the
//! closing-configuration collaborator (or a YAML file) and the two-level
//! lookup structure the resolver works against: metric kind to store-size
//! key to a sorted bracket list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculation::classify_store_size;

/// The two commission channels a bracket table can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Sale-channel rules.
    Sale,
    /// Direct-profit-channel rules.
    Profit,
}

/// A compliance-percentage range mapped to a commission percentage.
///
/// Both bounds are inclusive. Ranges for a given (metric, store-size key)
/// should be non-overlapping and increasing by `min`; the resolver sorts
/// defensively in case they are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionBracket {
    /// Inclusive lower bound of the compliance range.
    pub min: Decimal,
    /// Inclusive upper bound of the compliance range.
    pub max: Decimal,
    /// Commission percentage awarded within the range.
    pub percent: Decimal,
}

/// A raw rule row as the configuration collaborator supplies it.
///
/// Rows whose `name` contains `UTILIDAD` are profit rules; everything else
/// is a sale rule. The store-size label is normalized through the
/// classifier before it becomes a lookup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRuleRow {
    /// Metric name (e.g., "VENTA", "UTILIDAD DIRECTA").
    pub name: String,
    /// Free-text store-size label.
    pub store_size: String,
    /// Inclusive lower compliance bound.
    pub min: Decimal,
    /// Inclusive upper compliance bound.
    pub max: Decimal,
    /// Commission percentage for the range.
    pub percent: Decimal,
}

impl RawRuleRow {
    /// The metric channel this row configures.
    pub fn metric(&self) -> MetricKind {
        if self.name.to_uppercase().contains("UTILIDAD") {
            MetricKind::Profit
        } else {
            MetricKind::Sale
        }
    }
}

/// The complete bracket lookup: metric kind to store-size key to sorted
/// bracket list.
///
/// Built once from raw rows at load time; resolution is a pure lookup with
/// no hidden state.
#[derive(Debug, Clone, Default)]
pub struct CommissionRuleSet {
    tables: HashMap<MetricKind, HashMap<String, Vec<CommissionBracket>>>,
}

impl CommissionRuleSet {
    /// Builds the two-level lookup from raw configuration rows.
    ///
    /// Rows are grouped by metric (name containing "UTILIDAD" means
    /// profit) and by classified store-size key; each bracket list is
    /// sorted ascending by `min`.
    pub fn from_rows(rows: &[RawRuleRow]) -> Self {
        let mut tables: HashMap<MetricKind, HashMap<String, Vec<CommissionBracket>>> =
            HashMap::new();

        for row in rows {
            let key = classify_store_size(&row.store_size);
            tables
                .entry(row.metric())
                .or_default()
                .entry(key)
                .or_default()
                .push(CommissionBracket {
                    min: row.min,
                    max: row.max,
                    percent: row.percent,
                });
        }

        for table in tables.values_mut() {
            for brackets in table.values_mut() {
                brackets.sort_by(|a, b| a.min.cmp(&b.min));
            }
        }

        Self { tables }
    }

    /// Returns the bracket list for a metric and an already-classified
    /// store-size key.
    pub fn brackets(&self, metric: MetricKind, size_key: &str) -> Option<&[CommissionBracket]> {
        self.tables
            .get(&metric)
            .and_then(|table| table.get(size_key))
            .map(Vec::as_slice)
    }

    /// Returns true when no rules are loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::STANDARD_SIZES_KEY;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(name: &str, size: &str, min: &str, max: &str, percent: &str) -> RawRuleRow {
        RawRuleRow {
            name: name.to_string(),
            store_size: size.to_string(),
            min: dec(min),
            max: dec(max),
            percent: dec(percent),
        }
    }

    #[test]
    fn test_metric_detection_from_name() {
        assert_eq!(row("VENTA", "GRANDE", "0", "1", "0").metric(), MetricKind::Sale);
        assert_eq!(
            row("UTILIDAD DIRECTA", "GRANDE", "0", "1", "0").metric(),
            MetricKind::Profit
        );
        assert_eq!(
            row("utilidad", "GRANDE", "0", "1", "0").metric(),
            MetricKind::Profit
        );
    }

    #[test]
    fn test_from_rows_groups_by_metric_and_classified_size() {
        let rows = vec![
            row("VENTA", "GRANDE", "0", "79.99", "0"),
            row("VENTA", "MEDIANA", "80", "99.99", "1.5"),
            row("UTILIDAD DIRECTA", "EXTRA GRANDE", "100", "120", "2"),
        ];

        let rules = CommissionRuleSet::from_rows(&rows);

        // GRANDE and MEDIANA collapse into the shared key.
        let sale = rules
            .brackets(MetricKind::Sale, STANDARD_SIZES_KEY)
            .unwrap();
        assert_eq!(sale.len(), 2);

        let profit = rules
            .brackets(MetricKind::Profit, "EXTRA - GRANDE")
            .unwrap();
        assert_eq!(profit.len(), 1);
        assert_eq!(profit[0].percent, dec("2"));
    }

    #[test]
    fn test_from_rows_sorts_brackets_by_min() {
        let rows = vec![
            row("VENTA", "GRANDE", "100", "120", "2"),
            row("VENTA", "GRANDE", "0", "79.99", "0"),
            row("VENTA", "GRANDE", "80", "99.99", "1.5"),
        ];

        let rules = CommissionRuleSet::from_rows(&rows);
        let brackets = rules
            .brackets(MetricKind::Sale, STANDARD_SIZES_KEY)
            .unwrap();
        let mins: Vec<Decimal> = brackets.iter().map(|b| b.min).collect();
        assert_eq!(mins, vec![dec("0"), dec("80"), dec("100")]);
    }

    #[test]
    fn test_missing_table_returns_none() {
        let rules = CommissionRuleSet::from_rows(&[]);
        assert!(rules.is_empty());
        assert!(rules.brackets(MetricKind::Sale, STANDARD_SIZES_KEY).is_none());
    }
}
