//! Collaborator contracts consumed by the batch processor.
//!
//! Each lookup or persistence call suspends the calling task until the
//! result arrives. Implementations are provided by the persistence layer;
//! the engine ships an in-memory implementation for tests and demos.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    Employee, ReportFilter, StoreConfiguration, StoreGroup, StoreManagerCommissionRecord,
};

/// Resolves the employee assigned to a cost center for a month.
pub trait EmployeeDirectory: Send + Sync {
    /// Finds the employee for a cost center in the calculation month, or
    /// `None` when no one is assigned.
    fn find_employee_by_cost_center(
        &self,
        cost_center: &str,
        month: NaiveDate,
    ) -> impl Future<Output = EngineResult<Option<Employee>>> + Send;
}

/// Provides store reference data: configuration, grouping, and bonuses.
pub trait StoreCatalog: Send + Sync {
    /// Finds the store configuration (store-size label) for a cost center.
    fn find_store_configuration(
        &self,
        cost_center: &str,
    ) -> impl Future<Output = EngineResult<Option<StoreConfiguration>>> + Send;

    /// Finds the store group whose principal is the given cost center.
    fn find_store_group(
        &self,
        cost_center: &str,
    ) -> impl Future<Output = EngineResult<Option<StoreGroup>>> + Send;

    /// Finds the flat bonus paid to temporary hires for a store size.
    fn find_store_size_bonus(
        &self,
        store_size_name: &str,
    ) -> impl Future<Output = EngineResult<Option<Decimal>>> + Send;
}

/// Persists and reads store-manager commission records.
pub trait CommissionStore: Send + Sync {
    /// Deletes every record for the calculation month, returning the
    /// number of rows removed. Part of the idempotent-recompute contract.
    fn delete_records_for_month(
        &self,
        month: NaiveDate,
    ) -> impl Future<Output = EngineResult<u64>> + Send;

    /// Persists one freshly computed record.
    fn persist_record(
        &self,
        record: StoreManagerCommissionRecord,
    ) -> impl Future<Output = EngineResult<()>> + Send;

    /// Reads records matching a report filter.
    fn records_for_filter(
        &self,
        filter: &ReportFilter,
    ) -> impl Future<Output = EngineResult<Vec<StoreManagerCommissionRecord>>> + Send;
}

// Shared backends are handed to the report layer as `Arc<B>`.
impl<T: CommissionStore> CommissionStore for Arc<T> {
    fn delete_records_for_month(
        &self,
        month: NaiveDate,
    ) -> impl Future<Output = EngineResult<u64>> + Send {
        (**self).delete_records_for_month(month)
    }

    fn persist_record(
        &self,
        record: StoreManagerCommissionRecord,
    ) -> impl Future<Output = EngineResult<()>> + Send {
        (**self).persist_record(record)
    }

    fn records_for_filter(
        &self,
        filter: &ReportFilter,
    ) -> impl Future<Output = EngineResult<Vec<StoreManagerCommissionRecord>>> + Send {
        (**self).records_for_filter(filter)
    }
}
