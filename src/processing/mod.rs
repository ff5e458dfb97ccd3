//! Batch processing of store-manager commissions.
//!
//! This module defines the collaborator contracts the engine consumes
//! (employee directory, store catalog, commission record store) and the
//! [`BatchProcessor`] that orchestrates one month's computation: delete
//! prior records, roll up store groups, compute per employee, persist,
//! isolating per-record failures.

mod batch;
pub mod memory;
mod traits;

pub use batch::{BatchError, BatchOutcome, BatchProcessor};
pub use traits::{CommissionStore, EmployeeDirectory, StoreCatalog};
