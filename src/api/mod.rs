//! HTTP API module for the Commission Engine.
//!
//! This module provides the REST API endpoints for running the monthly
//! store-manager commission batch and the cross-source reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::ApiError;
pub use state::AppState;
