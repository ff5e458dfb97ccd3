//! Data models for the Commission Engine.
//!
//! This module contains the performance input rows, employee and store
//! reference types, the persisted commission record, and the report
//! filter and report shapes.

mod commission_record;
mod employee;
mod performance;
mod report;

pub use commission_record::{CommissionComputation, StoreManagerCommissionRecord};
pub use employee::{Employee, StoreConfiguration};
pub use performance::{PerformanceFigures, PerformanceInput, RawFigure, StoreGroup};
pub use report::{
    AmountSpreadReport, CombinedAmountSpreadRow, CommissionFact, CommissionedCountRow,
    EmployeeFigureRow, LabeledFigure, MonthlyExpenseRow, ReportFilter, ReportOutput, SourceKind,
    SourceAmountSpreadRow, SourceFigureRows,
};
