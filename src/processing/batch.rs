//! The batch processor.
//!
//! Orchestrates one month's computation over a batch of performance rows:
//! delete prior records for the month, normalize and roll up the rows,
//! compute one record per employee, persist. A bad record never aborts the
//! batch; its error is recorded against the cost center and processing
//! continues.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_commission, roll_up_groups};
use crate::config::CommissionRuleSet;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CommissionComputation, Employee, PerformanceFigures, PerformanceInput, StoreGroup,
    StoreManagerCommissionRecord,
};

use super::traits::{CommissionStore, EmployeeDirectory, StoreCatalog};

/// One per-record failure, tied to the cost center it occurred on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    /// The cost center the failure belongs to.
    pub cost_center: String,
    /// Human-readable description of the failure.
    pub message: String,
}

/// The result of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Number of records computed and persisted.
    pub record_count: u32,
    /// Number of rows that failed.
    pub failure_count: u32,
    /// The per-row failures.
    pub errors: Vec<BatchError>,
}

/// Computes and persists store-manager commissions for one month.
///
/// Rows are processed sequentially: the group rollup needs the whole batch
/// visible before any row is computed, and the delete-then-insert replace
/// semantics must not interleave with reads of the same month.
pub struct BatchProcessor<'a, E, S, C> {
    employees: &'a E,
    stores: &'a S,
    records: &'a C,
    rules: &'a CommissionRuleSet,
}

impl<'a, E, S, C> BatchProcessor<'a, E, S, C>
where
    E: EmployeeDirectory,
    S: StoreCatalog,
    C: CommissionStore,
{
    /// Creates a processor over the given collaborators and rule set.
    pub fn new(
        employees: &'a E,
        stores: &'a S,
        records: &'a C,
        rules: &'a CommissionRuleSet,
    ) -> Self {
        Self {
            employees,
            stores,
            records,
            rules,
        }
    }

    /// Runs the batch for one calculation month.
    ///
    /// Prior records for the month are deleted first, so re-running the
    /// same month replaces rather than duplicates. Per-record failures
    /// (missing employee, missing store configuration, unparseable
    /// figures) are collected and never abort the batch; infrastructure
    /// failures (delete or persist errors) propagate.
    pub async fn run(
        &self,
        rows: &[PerformanceInput],
        calculation_month: NaiveDate,
    ) -> EngineResult<BatchOutcome> {
        info!(
            month = %calculation_month,
            rows = rows.len(),
            "Starting store-manager commission batch"
        );

        let mut errors: Vec<BatchError> = Vec::new();

        let deleted = self.records.delete_records_for_month(calculation_month).await?;
        if deleted > 0 {
            info!(month = %calculation_month, deleted, "Replaced prior records for month");
        }

        // Normalize every row up front; rows with unparseable figures fail
        // individually and drop out before grouping.
        let mut figures: Vec<PerformanceFigures> = Vec::with_capacity(rows.len());
        for row in rows {
            match row.normalize() {
                Ok(normalized) => figures.push(normalized),
                Err(error) => record_failure(&mut errors, &row.cost_center, &error),
            }
        }

        let groups = self.lookup_groups(&figures).await?;
        let grouped = roll_up_groups(&figures, &groups);

        let mut record_count: u32 = 0;
        for row in &grouped {
            match self.compute_record(row, calculation_month).await {
                Ok(record) => {
                    self.records.persist_record(record).await?;
                    record_count += 1;
                }
                Err(error) => record_failure(&mut errors, &row.cost_center, &error),
            }
        }

        let outcome = BatchOutcome {
            record_count,
            failure_count: errors.len() as u32,
            errors,
        };
        info!(
            month = %calculation_month,
            records = outcome.record_count,
            failures = outcome.failure_count,
            "Finished store-manager commission batch"
        );
        Ok(outcome)
    }

    /// Looks up the store group for every row that is a principal.
    async fn lookup_groups(
        &self,
        rows: &[PerformanceFigures],
    ) -> EngineResult<HashMap<String, StoreGroup>> {
        let mut groups = HashMap::new();
        for row in rows {
            if let Some(group) = self.stores.find_store_group(&row.cost_center).await? {
                groups.insert(row.cost_center.clone(), group);
            }
        }
        Ok(groups)
    }

    /// Computes one record for a grouped row.
    async fn compute_record(
        &self,
        row: &PerformanceFigures,
        calculation_month: NaiveDate,
    ) -> EngineResult<StoreManagerCommissionRecord> {
        let employee = self
            .employees
            .find_employee_by_cost_center(&row.cost_center, calculation_month)
            .await?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                cost_center: row.cost_center.clone(),
            })?;

        let store = self
            .stores
            .find_store_configuration(&row.cost_center)
            .await?
            .ok_or_else(|| EngineError::StoreConfigurationNotFound {
                cost_center: row.cost_center.clone(),
            })?;

        let computation = if employee.started_in_month(calculation_month) {
            self.temporary_computation(&employee, &store.store_size_name).await?
        } else {
            calculate_commission(row, &store.store_size_name, self.rules)
        };

        Ok(StoreManagerCommissionRecord {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            employee_name: employee.full_name,
            position: employee.position,
            company: employee.company,
            cost_center: row.cost_center.clone(),
            calculation_month,
            computation,
            created_at: Utc::now(),
        })
    }

    /// The flat-bonus computation for a temporary hire.
    async fn temporary_computation(
        &self,
        employee: &Employee,
        store_size_name: &str,
    ) -> EngineResult<CommissionComputation> {
        let bonus = self
            .stores
            .find_store_size_bonus(store_size_name)
            .await?
            .ok_or_else(|| EngineError::StoreSizeBonusNotFound {
                store_size: store_size_name.to_string(),
            })?;
        info!(
            employee_id = %employee.id,
            store_size = store_size_name,
            %bonus,
            "Temporary hire receives flat bonus"
        );
        Ok(CommissionComputation::flat_bonus(bonus))
    }
}

fn record_failure(errors: &mut Vec<BatchError>, cost_center: &str, error: &EngineError) {
    warn!(cost_center, error = %error, "Skipping record");
    errors.push(BatchError {
        cost_center: cost_center.to_string(),
        message: error.to_string(),
    });
}
