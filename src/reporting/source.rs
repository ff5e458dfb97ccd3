//! Commission source adapters.
//!
//! Each of the three commission subsystems implements [`CommissionSource`]:
//! it names itself and reduces its rows to [`CommissionFact`]s under a
//! report filter. The five report computations are then written once
//! against facts instead of three parallel query sets per report.

use std::future::Future;
use std::sync::Arc;

use chrono::Datelike;

use crate::error::EngineResult;
use crate::models::{CommissionFact, LabeledFigure, ReportFilter, SourceKind};
use crate::processing::CommissionStore;

/// A commission subsystem reduced to a reportable-metric capability.
pub trait CommissionSource: Send + Sync {
    /// Which subsystem this source represents.
    fn kind(&self) -> SourceKind;

    /// Fetches the facts matching the filter. All sources apply the same
    /// filter fields.
    fn fetch(
        &self,
        filter: &ReportFilter,
    ) -> impl Future<Output = EngineResult<Vec<CommissionFact>>> + Send;
}

impl<S: CommissionSource> CommissionSource for Arc<S> {
    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn fetch(
        &self,
        filter: &ReportFilter,
    ) -> impl Future<Output = EngineResult<Vec<CommissionFact>>> + Send {
        (**self).fetch(filter)
    }
}

/// Compliance figure label for the store-manager sale channel.
pub const SALE_COMPLIANCE_LABEL: &str = "sale_compliance";
/// Compliance figure label for the store-manager profit channel.
pub const PROFIT_COMPLIANCE_LABEL: &str = "profit_compliance";
/// Applied-range label for the store-manager sale channel.
pub const SALE_RANGE_LABEL: &str = "sale_applied_range";
/// Applied-range label for the store-manager profit channel.
pub const PROFIT_RANGE_LABEL: &str = "profit_applied_range";

/// The store-manager engine's own records, viewed as a report source.
///
/// Unlike the two sibling subsystems, this source has two compliance
/// figures per fact: one per channel.
pub struct StoreManagerSource<C> {
    store: C,
}

impl<C> StoreManagerSource<C> {
    /// Wraps a commission record store.
    pub fn new(store: C) -> Self {
        Self { store }
    }
}

impl<C> CommissionSource for StoreManagerSource<C>
where
    C: CommissionStore,
{
    fn kind(&self) -> SourceKind {
        SourceKind::StoreManager
    }

    async fn fetch(&self, filter: &ReportFilter) -> EngineResult<Vec<CommissionFact>> {
        let records = self.store.records_for_filter(filter).await?;
        Ok(records
            .into_iter()
            .map(|record| CommissionFact {
                employee_id: record.employee_id,
                employee_name: record.employee_name,
                position: record.position,
                year: record.calculation_month.year(),
                month: record.calculation_month.month(),
                amount: record.computation.total_payroll_amount,
                compliance: vec![
                    LabeledFigure::new(SALE_COMPLIANCE_LABEL, record.computation.sale_compliance),
                    LabeledFigure::new(
                        PROFIT_COMPLIANCE_LABEL,
                        record.computation.profit_compliance,
                    ),
                ],
                applied_ranges: vec![
                    LabeledFigure::new(SALE_RANGE_LABEL, record.computation.sale_applied_range),
                    LabeledFigure::new(
                        PROFIT_RANGE_LABEL,
                        record.computation.profit_applied_range,
                    ),
                ],
            })
            .collect())
    }
}

/// A static fact source, standing in for the advisor and consolidated
/// subsystems in tests and demos.
pub struct InMemorySource {
    kind: SourceKind,
    facts: Vec<CommissionFact>,
}

impl InMemorySource {
    /// Creates a source of the given kind over a fixed fact set.
    pub fn new(kind: SourceKind, facts: Vec<CommissionFact>) -> Self {
        Self { kind, facts }
    }

    /// Creates an empty source of the given kind.
    pub fn empty(kind: SourceKind) -> Self {
        Self::new(kind, Vec::new())
    }
}

impl CommissionSource for InMemorySource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, filter: &ReportFilter) -> EngineResult<Vec<CommissionFact>> {
        Ok(self
            .facts
            .iter()
            .filter(|fact| fact.year == filter.year)
            .filter(|fact| filter.month.is_none_or(|month| fact.month == month))
            .filter(|fact| {
                filter
                    .position
                    .as_deref()
                    .is_none_or(|position| fact.position == position)
            })
            .cloned()
            .collect())
    }
}
