//! Employee and store reference models.
//!
//! These types mirror the shared reference data owned by external
//! collaborators: the employee assigned to a cost center for a month and
//! the store configuration that carries the store-size label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee resolved for a cost center and calculation month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full display name.
    pub full_name: String,
    /// Position held (e.g., "JEFE DE TIENDA").
    pub position: String,
    /// Company the employee belongs to.
    pub company: String,
    /// The date the current contract started.
    pub contract_start_date: NaiveDate,
}

impl Employee {
    /// Returns true if the contract started in the given calculation month.
    ///
    /// Temporary hires receive a flat store-size bonus instead of a
    /// computed commission.
    ///
    /// # Examples
    ///
    /// ```
    /// use commission_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     full_name: "Ana Torres".to_string(),
    ///     position: "JEFE DE TIENDA".to_string(),
    ///     company: "RETAIL SA".to_string(),
    ///     contract_start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    /// };
    /// let month = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    /// assert!(employee.started_in_month(month));
    /// ```
    pub fn started_in_month(&self, calculation_month: NaiveDate) -> bool {
        crate::calculation::is_temporary_hire(self.contract_start_date, calculation_month)
    }
}

/// Store configuration for a cost center.
///
/// Only the store-size label matters to the engine; everything else about
/// a store is owned by the configuration collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfiguration {
    /// The cost center this configuration belongs to.
    pub cost_center: String,
    /// The free-text store-size label (e.g., "GRANDE", "EXTRA GRANDE").
    pub store_size_name: String,
}
