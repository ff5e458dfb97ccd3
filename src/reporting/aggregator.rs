//! The cross-source report aggregator.
//!
//! Combines the three commission sources into five report shapes. The
//! sources are fetched concurrently; each report is all-or-nothing, so a
//! failing source fails the whole call.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AmountSpreadReport, CombinedAmountSpreadRow, CommissionFact, CommissionedCountRow,
    EmployeeFigureRow, LabeledFigure, MonthlyExpenseRow, ReportFilter, ReportOutput, SourceKind,
    SourceAmountSpreadRow, SourceFigureRows,
};

use super::source::CommissionSource;

/// Aggregates the advisor, consolidated, and store-manager sources into
/// the five compliance reports.
pub struct ReportAggregator<A, C, S> {
    advisor: A,
    consolidated: C,
    store_manager: S,
}

/// Facts fetched from all three sources, in a fixed order.
type SourceFacts = [(SourceKind, Vec<CommissionFact>); 3];

impl<A, C, S> ReportAggregator<A, C, S>
where
    A: CommissionSource,
    C: CommissionSource,
    S: CommissionSource,
{
    /// Creates an aggregator over the three sources.
    pub fn new(advisor: A, consolidated: C, store_manager: S) -> Self {
        Self {
            advisor,
            consolidated,
            store_manager,
        }
    }

    /// Runs the report selected by `index` (1-5) under the filter.
    ///
    /// Reports 3 and 4 additionally require a month in `[1, 12]`; that is
    /// validated before any source is queried.
    pub async fn run(&self, index: u8, filter: &ReportFilter) -> EngineResult<ReportOutput> {
        info!(report = index, year = filter.year, month = ?filter.month, "Running report");
        match index {
            1 => Ok(ReportOutput::MonthlyExpense(
                self.total_monthly_expense(filter).await?,
            )),
            2 => Ok(ReportOutput::CommissionedCounts(
                self.commissioned_counts(filter).await?,
            )),
            3 => Ok(ReportOutput::AverageCompliance(
                self.average_compliance(filter).await?,
            )),
            4 => Ok(ReportOutput::BracketDistribution(
                self.bracket_distribution(filter).await?,
            )),
            5 => Ok(ReportOutput::AmountSpread(self.amount_spread(filter).await?)),
            other => Err(EngineError::InvalidReportFilter {
                message: format!("report index must be between 1 and 5, got {}", other),
            }),
        }
    }

    /// Fetches all three sources concurrently.
    async fn fetch_all(&self, filter: &ReportFilter) -> EngineResult<SourceFacts> {
        let (advisor, consolidated, store_manager) = tokio::try_join!(
            self.advisor.fetch(filter),
            self.consolidated.fetch(filter),
            self.store_manager.fetch(filter),
        )?;
        Ok([
            (self.advisor.kind(), advisor),
            (self.consolidated.kind(), consolidated),
            (self.store_manager.kind(), store_manager),
        ])
    }

    /// Report 1: commission expense per source per month, plus the
    /// cross-source total.
    pub async fn total_monthly_expense(
        &self,
        filter: &ReportFilter,
    ) -> EngineResult<Vec<MonthlyExpenseRow>> {
        let sources = self.fetch_all(filter).await?;

        let mut months: BTreeMap<u32, (Decimal, Decimal, Decimal)> = BTreeMap::new();
        for (kind, facts) in &sources {
            for fact in facts {
                let entry = months.entry(fact.month).or_default();
                match kind {
                    SourceKind::Advisor => entry.0 += fact.amount,
                    SourceKind::Consolidated => entry.1 += fact.amount,
                    SourceKind::StoreManager => entry.2 += fact.amount,
                }
            }
        }

        Ok(months
            .into_iter()
            .map(
                |(month, (advisor, consolidated, store_manager))| MonthlyExpenseRow {
                    month,
                    advisor,
                    consolidated,
                    store_manager,
                    total: advisor + consolidated + store_manager,
                },
            )
            .collect())
    }

    /// Report 2: commissioned vs non-commissioned employee counts per
    /// source per month.
    pub async fn commissioned_counts(
        &self,
        filter: &ReportFilter,
    ) -> EngineResult<Vec<CommissionedCountRow>> {
        let sources = self.fetch_all(filter).await?;

        let mut rows = Vec::new();
        for (kind, facts) in &sources {
            let mut months: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
            for fact in facts {
                let entry = months.entry(fact.month).or_default();
                if fact.amount > Decimal::ZERO {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
            for (month, (commissioned, not_commissioned)) in months {
                rows.push(CommissionedCountRow {
                    source: *kind,
                    month,
                    commissioned,
                    not_commissioned,
                });
            }
        }
        Ok(rows)
    }

    /// Report 3: average compliance per (employee, position), one result
    /// set per source. Requires a month in the filter.
    pub async fn average_compliance(
        &self,
        filter: &ReportFilter,
    ) -> EngineResult<Vec<SourceFigureRows>> {
        filter.require_month()?;
        let sources = self.fetch_all(filter).await?;

        Ok(sources
            .iter()
            .map(|(kind, facts)| SourceFigureRows {
                source: *kind,
                rows: average_figures_by_employee(facts),
            })
            .collect())
    }

    /// Report 4: the raw applied-range value per employee, one result set
    /// per source. Requires a month in the filter.
    pub async fn bracket_distribution(
        &self,
        filter: &ReportFilter,
    ) -> EngineResult<Vec<SourceFigureRows>> {
        filter.require_month()?;
        let sources = self.fetch_all(filter).await?;

        Ok(sources
            .iter()
            .map(|(kind, facts)| SourceFigureRows {
                source: *kind,
                rows: facts
                    .iter()
                    .map(|fact| EmployeeFigureRow {
                        employee_id: fact.employee_id.clone(),
                        employee_name: fact.employee_name.clone(),
                        position: fact.position.clone(),
                        figures: fact.applied_ranges.clone(),
                    })
                    .collect(),
            })
            .collect())
    }

    /// Report 5: max, min-excluding-zero, and average amount per source
    /// per month, then the combined spread across sources per month.
    pub async fn amount_spread(&self, filter: &ReportFilter) -> EngineResult<AmountSpreadReport> {
        let sources = self.fetch_all(filter).await?;

        let mut per_source = Vec::new();
        for (kind, facts) in &sources {
            let mut months: BTreeMap<u32, Vec<Decimal>> = BTreeMap::new();
            for fact in facts {
                months.entry(fact.month).or_default().push(fact.amount);
            }
            for (month, amounts) in months {
                per_source.push(SourceAmountSpreadRow {
                    source: *kind,
                    month,
                    max: amounts.iter().copied().max().unwrap_or_default(),
                    min_excluding_zero: amounts
                        .iter()
                        .copied()
                        .filter(|a| *a > Decimal::ZERO)
                        .min()
                        .unwrap_or_default(),
                    avg: mean(&amounts),
                });
            }
        }

        let mut combined_months: BTreeMap<u32, Vec<&SourceAmountSpreadRow>> = BTreeMap::new();
        for row in &per_source {
            combined_months.entry(row.month).or_default().push(row);
        }
        let combined = combined_months
            .into_iter()
            .map(|(month, rows)| {
                let averages: Vec<Decimal> = rows.iter().map(|r| r.avg).collect();
                CombinedAmountSpreadRow {
                    month,
                    max: rows.iter().map(|r| r.max).max().unwrap_or_default(),
                    min_excluding_zero: rows
                        .iter()
                        .map(|r| r.min_excluding_zero)
                        .filter(|m| *m > Decimal::ZERO)
                        .min()
                        .unwrap_or_default(),
                    avg: mean(&averages),
                }
            })
            .collect();

        Ok(AmountSpreadReport {
            per_source,
            combined,
        })
    }
}

/// Averages each labeled figure per (employee, position) pair, keeping
/// first-seen employee order within a source.
fn average_figures_by_employee(facts: &[CommissionFact]) -> Vec<EmployeeFigureRow> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut grouped: BTreeMap<(String, String), Vec<&CommissionFact>> = BTreeMap::new();

    for fact in facts {
        let key = (fact.employee_id.clone(), fact.position.clone());
        if !grouped.contains_key(&key) {
            order.push(key.clone());
        }
        grouped.entry(key).or_default().push(fact);
    }

    order
        .into_iter()
        .map(|key| {
            let group = &grouped[&key];
            let first = group[0];

            // Average per label across the group's facts.
            let mut labels: Vec<String> = Vec::new();
            let mut sums: BTreeMap<String, (Decimal, u32)> = BTreeMap::new();
            for fact in group {
                for figure in &fact.compliance {
                    if !sums.contains_key(&figure.label) {
                        labels.push(figure.label.clone());
                    }
                    let entry = sums.entry(figure.label.clone()).or_default();
                    entry.0 += figure.value;
                    entry.1 += 1;
                }
            }

            let figures = labels
                .into_iter()
                .map(|label| {
                    let (sum, count) = sums[&label];
                    LabeledFigure::new(label, sum / Decimal::from(count))
                })
                .collect();

            EmployeeFigureRow {
                employee_id: first.employee_id.clone(),
                employee_name: first.employee_name.clone(),
                position: first.position.clone(),
                figures,
            }
        })
        .collect()
}

/// Arithmetic mean of a non-empty slice; zero for an empty one.
fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().copied().sum();
    sum / Decimal::from(values.len() as u32)
}
