//! Error types for the Commission Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during commission calculation
//! and report aggregation.

use thiserror::Error;

/// The main error type for the Commission Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use commission_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     cost_center: "C101".to_string(),
/// };
/// assert_eq!(error.to_string(), "No employee found for cost center C101");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A raw figure could not be normalized into a number.
    #[error("Cannot parse numeric value '{value}'")]
    NumericParse {
        /// The raw value that failed to parse.
        value: String,
    },

    /// No employee is assigned to the cost center for the calculation month.
    #[error("No employee found for cost center {cost_center}")]
    EmployeeNotFound {
        /// The cost center without an assigned employee.
        cost_center: String,
    },

    /// No store configuration exists for the cost center.
    #[error("No store configuration found for cost center {cost_center}")]
    StoreConfigurationNotFound {
        /// The cost center without a store configuration.
        cost_center: String,
    },

    /// No flat bonus is configured for the store size.
    #[error("No bonus configured for store size '{store_size}'")]
    StoreSizeBonusNotFound {
        /// The store size name without a configured bonus.
        store_size: String,
    },

    /// A report filter was missing required fields or out of range.
    #[error("Invalid report filter: {message}")]
    InvalidReportFilter {
        /// A description of what made the filter invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// A persistence operation failed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
