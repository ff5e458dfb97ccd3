//! In-memory reference backend.
//!
//! Implements every collaborator contract against plain maps, for tests,
//! demos, and the integration suite. Real deployments wire the traits to
//! the persistence layer instead.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, ReportFilter, StoreConfiguration, StoreGroup, StoreManagerCommissionRecord,
};

use super::traits::{CommissionStore, EmployeeDirectory, StoreCatalog};

/// An in-memory implementation of all collaborator contracts.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    employees: Mutex<HashMap<String, Employee>>,
    store_configurations: Mutex<HashMap<String, StoreConfiguration>>,
    store_groups: Mutex<HashMap<String, StoreGroup>>,
    bonuses: Mutex<HashMap<String, Decimal>>,
    records: Mutex<Vec<StoreManagerCommissionRecord>>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an employee to a cost center.
    pub fn add_employee(&self, cost_center: &str, employee: Employee) {
        self.employees
            .lock()
            .expect("employees lock")
            .insert(cost_center.to_string(), employee);
    }

    /// Registers a store configuration with the given store-size label.
    pub fn add_store_configuration(&self, cost_center: &str, store_size_name: &str) {
        self.store_configurations.lock().expect("configs lock").insert(
            cost_center.to_string(),
            StoreConfiguration {
                cost_center: cost_center.to_string(),
                store_size_name: store_size_name.to_string(),
            },
        );
    }

    /// Registers a store group, keyed by its principal.
    pub fn add_store_group(&self, group: StoreGroup) {
        self.store_groups
            .lock()
            .expect("groups lock")
            .insert(group.principal.clone(), group);
    }

    /// Registers a flat temporary-hire bonus for a store size.
    pub fn add_store_size_bonus(&self, store_size_name: &str, bonus: Decimal) {
        self.bonuses
            .lock()
            .expect("bonuses lock")
            .insert(store_size_name.to_string(), bonus);
    }

    /// Returns a snapshot of all persisted records.
    pub fn all_records(&self) -> Vec<StoreManagerCommissionRecord> {
        self.records.lock().expect("records lock").clone()
    }
}

impl EmployeeDirectory for InMemoryBackend {
    async fn find_employee_by_cost_center(
        &self,
        cost_center: &str,
        _month: NaiveDate,
    ) -> EngineResult<Option<Employee>> {
        Ok(self
            .employees
            .lock()
            .map_err(poisoned)?
            .get(cost_center)
            .cloned())
    }
}

impl StoreCatalog for InMemoryBackend {
    async fn find_store_configuration(
        &self,
        cost_center: &str,
    ) -> EngineResult<Option<StoreConfiguration>> {
        Ok(self
            .store_configurations
            .lock()
            .map_err(poisoned)?
            .get(cost_center)
            .cloned())
    }

    async fn find_store_group(&self, cost_center: &str) -> EngineResult<Option<StoreGroup>> {
        Ok(self
            .store_groups
            .lock()
            .map_err(poisoned)?
            .get(cost_center)
            .cloned())
    }

    async fn find_store_size_bonus(&self, store_size_name: &str) -> EngineResult<Option<Decimal>> {
        Ok(self
            .bonuses
            .lock()
            .map_err(poisoned)?
            .get(store_size_name)
            .copied())
    }
}

impl CommissionStore for InMemoryBackend {
    async fn delete_records_for_month(&self, month: NaiveDate) -> EngineResult<u64> {
        let mut records = self.records.lock().map_err(poisoned)?;
        let before = records.len();
        records.retain(|r| {
            !(r.calculation_month.year() == month.year()
                && r.calculation_month.month() == month.month())
        });
        Ok((before - records.len()) as u64)
    }

    async fn persist_record(&self, record: StoreManagerCommissionRecord) -> EngineResult<()> {
        self.records.lock().map_err(poisoned)?.push(record);
        Ok(())
    }

    async fn records_for_filter(
        &self,
        filter: &ReportFilter,
    ) -> EngineResult<Vec<StoreManagerCommissionRecord>> {
        let records = self.records.lock().map_err(poisoned)?;
        Ok(records
            .iter()
            .filter(|r| r.calculation_month.year() == filter.year)
            .filter(|r| {
                filter
                    .month
                    .is_none_or(|month| r.calculation_month.month() == month)
            })
            .filter(|r| {
                filter
                    .company
                    .as_deref()
                    .is_none_or(|company| r.company == company)
            })
            .filter(|r| {
                filter
                    .position
                    .as_deref()
                    .is_none_or(|position| r.position == position)
            })
            .cloned()
            .collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> EngineError {
    EngineError::StorageError {
        message: "in-memory store lock poisoned".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommissionComputation;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(month: NaiveDate, company: &str) -> StoreManagerCommissionRecord {
        StoreManagerCommissionRecord {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            employee_name: "Ana Torres".to_string(),
            position: "JEFE DE TIENDA".to_string(),
            company: company.to_string(),
            cost_center: "C1".to_string(),
            calculation_month: month,
            computation: CommissionComputation::flat_bonus(dec("10")),
            created_at: Utc::now(),
        }
    }

    fn month(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_month() {
        let backend = InMemoryBackend::new();
        backend.persist_record(record(month(2025, 5), "A")).await.unwrap();
        backend.persist_record(record(month(2025, 6), "A")).await.unwrap();

        let deleted = backend.delete_records_for_month(month(2025, 6)).await.unwrap();

        assert_eq!(deleted, 1);
        let remaining = backend.all_records();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].calculation_month, month(2025, 5));
    }

    #[tokio::test]
    async fn test_records_for_filter_by_year_month_company() {
        let backend = InMemoryBackend::new();
        backend.persist_record(record(month(2025, 6), "A")).await.unwrap();
        backend.persist_record(record(month(2025, 6), "B")).await.unwrap();
        backend.persist_record(record(month(2024, 6), "A")).await.unwrap();

        let filter = ReportFilter {
            year: 2025,
            month: Some(6),
            company: Some("A".to_string()),
            ..Default::default()
        };
        let found = backend.records_for_filter(&filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].company, "A");
    }

    #[tokio::test]
    async fn test_records_for_filter_year_only() {
        let backend = InMemoryBackend::new();
        backend.persist_record(record(month(2025, 3), "A")).await.unwrap();
        backend.persist_record(record(month(2025, 7), "A")).await.unwrap();
        backend.persist_record(record(month(2023, 7), "A")).await.unwrap();

        let filter = ReportFilter {
            year: 2025,
            ..Default::default()
        };
        let found = backend.records_for_filter(&filter).await.unwrap();
        assert_eq!(found.len(), 2);
    }
}
