//! HTTP request handlers for the Commission Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::ReportFilter;
use crate::processing::{BatchProcessor, CommissionStore, EmployeeDirectory, StoreCatalog};
use crate::reporting::{ReportAggregator, StoreManagerSource};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<B>(state: AppState<B>) -> Router
where
    B: EmployeeDirectory + StoreCatalog + CommissionStore + 'static,
{
    Router::new()
        .route("/commissions/store-manager", post(calculate_handler::<B>))
        .route("/reports/:index", get(report_handler::<B>))
        .with_state(state)
}

/// Handler for POST /commissions/store-manager.
///
/// Accepts a calculation month and raw performance rows, runs the batch,
/// and returns the batch outcome with per-row failures.
async fn calculate_handler<B>(
    State(state): State<AppState<B>>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response
where
    B: EmployeeDirectory + StoreCatalog + CommissionStore + 'static,
{
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing commission batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let processor = BatchProcessor::new(
        state.backend(),
        state.backend(),
        state.backend(),
        state.rules(),
    );

    let start_time = Instant::now();
    match processor.run(&request.rows, request.calculation_month).await {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                month = %request.calculation_month,
                records = outcome.record_count,
                failures = outcome.failure_count,
                duration_us = start_time.elapsed().as_micros(),
                "Commission batch completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(outcome),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Commission batch failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for GET /reports/:index.
///
/// Runs one of the five cross-source reports under the query-string
/// filter and returns its rows.
async fn report_handler<B>(
    State(state): State<AppState<B>>,
    Path(index): Path<u8>,
    query: Result<Query<ReportFilter>, QueryRejection>,
) -> Response
where
    B: EmployeeDirectory + StoreCatalog + CommissionStore + 'static,
{
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, report = index, "Processing report request");

    let Query(filter) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid report filter");
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::validation_error(rejection.body_text())),
            )
                .into_response();
        }
    };

    let aggregator = ReportAggregator::new(
        state.advisor_source(),
        state.consolidated_source(),
        StoreManagerSource::new(state.backend_handle()),
    );

    match aggregator.run(index, &filter).await {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(output),
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, report = index, error = %err, "Report failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Maps a JSON extractor rejection to a 400 response.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::Employee;
    use crate::processing::BatchOutcome;
    use crate::processing::memory::InMemoryBackend;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn seeded_backend() -> InMemoryBackend {
        let backend = InMemoryBackend::new();
        backend.add_employee(
            "C101",
            Employee {
                id: "emp_001".to_string(),
                full_name: "Ana Torres".to_string(),
                position: "JEFE DE TIENDA".to_string(),
                company: "RETAIL SA".to_string(),
                contract_start_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            },
        );
        backend.add_store_configuration("C101", "GRANDE");
        backend
    }

    fn create_test_state() -> AppState<InMemoryBackend> {
        let config = ConfigLoader::load("./config/commissions").expect("Failed to load config");
        AppState::new(config, seeded_backend())
    }

    fn valid_body() -> String {
        r#"{
            "calculationMonth": "2025-06-01",
            "rows": [
                {
                    "costCenter": "C101",
                    "sale": 90000,
                    "saleBudget": 80000,
                    "directProfit": 0,
                    "directProfitBudget": 0
                }
            ]
        }"#
        .to_string()
    }

    fn post_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/commissions/store-manager")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_001_valid_batch_returns_200() {
        let router = create_router(create_test_state());

        let response = router.oneshot(post_request(valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let outcome: BatchOutcome = serde_json::from_slice(&body).unwrap();
        assert_eq!(outcome.record_count, 1);
        assert_eq!(outcome.failure_count, 0);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_request("{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_month_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_request(r#"{"rows": []}"#.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert!(
            error.message.contains("missing field"),
            "Expected missing field message, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_api_004_batch_failures_are_reported_not_fatal() {
        let router = create_router(create_test_state());

        // C999 has no employee; the batch still returns 200.
        let body = r#"{
            "calculationMonth": "2025-06-01",
            "rows": [
                {
                    "costCenter": "C999",
                    "sale": 1000,
                    "saleBudget": 1000,
                    "directProfit": 0,
                    "directProfitBudget": 0
                }
            ]
        }"#;
        let response = router
            .oneshot(post_request(body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let outcome: BatchOutcome = serde_json::from_slice(&body).unwrap();
        assert_eq!(outcome.record_count, 0);
        assert_eq!(outcome.failure_count, 1);
        assert_eq!(outcome.errors[0].cost_center, "C999");
    }

    #[tokio::test]
    async fn test_api_005_report_over_computed_records() {
        let state = create_test_state();
        let router = create_router(state);

        let response = router
            .clone()
            .oneshot(post_request(valid_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(get_request("/reports/1?year=2025"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let row = &rows.as_array().unwrap()[0];
        assert_eq!(row["month"], 6);
        // 90000 / 80000 = 112.5% compliance, 2.0% of 90000 = 1800.
        assert_eq!(
            Decimal::from_str(row["storeManager"].as_str().unwrap()).unwrap(),
            Decimal::from_str("1800.00").unwrap()
        );
    }

    #[tokio::test]
    async fn test_api_006_report_3_without_month_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(get_request("/reports/3?year=2025"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_REPORT_FILTER");
    }

    #[tokio::test]
    async fn test_api_007_unknown_report_index_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(get_request("/reports/9?year=2025"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_REPORT_FILTER");
    }

    #[tokio::test]
    async fn test_api_008_report_filter_missing_year_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(get_request("/reports/1?month=6"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }
}
