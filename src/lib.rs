//! Commission Calculation and Compliance Reporting Engine
//!
//! This crate computes monthly store-manager commissions from compliance
//! against sale and direct-profit budgets, persists one record per store
//! manager per month, and aggregates compliance reports across the
//! advisor, consolidated, and store-manager commission sources.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod reporting;
