//! JSON-RPC request handlers, split by domain.

mod compare;
mod datasets;
mod statistics;
mod table;

use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use flora_core::FloraError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self::error_with_data(id, code, message, None)
    }

    pub fn error_with_data(
        id: Option<Value>,
        code: i32,
        message: String,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
            id,
        }
    }
}

// ============================================================================
// Parameter extraction helpers
// ============================================================================

fn get_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a Value> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .filter(|v| !v.is_null())
}

fn invalid(message: String) -> FloraError {
    FloraError::InvalidParams { message }
}

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    get_param(params, snake, camel).and_then(|v| v.as_str())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> flora_core::Result<String> {
    get_str_param(params, snake, camel)
        .map(String::from)
        .ok_or_else(|| invalid(format!("Missing required parameter: {}", snake)))
}

/// Extract an optional non-negative integer parameter.
pub(crate) fn get_usize_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> flora_core::Result<Option<usize>> {
    match get_param(params, snake, camel) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| invalid(format!("Parameter {} must be a non-negative integer", snake))),
    }
}

/// Extract an optional list of strings; a missing key is an empty list.
pub(crate) fn get_str_list_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> flora_core::Result<Vec<String>> {
    match get_param(params, snake, camel) {
        None => Ok(Vec::new()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| invalid(format!("Parameter {} must be a list of strings: {}", snake, e))),
    }
}

/// Deserialize an optional structured parameter, defaulting when missing.
pub(crate) fn get_typed_param<T>(params: &Value, snake: &str, camel: &str) -> flora_core::Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match get_param(params, snake, camel) {
        None => Ok(T::default()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| invalid(format!("Invalid {}: {}", snake, e))),
    }
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = &request.method;
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}", method);

    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    match dispatch_method(&state, method, &params).await {
        Ok(value) => (StatusCode::OK, Json(JsonRpcResponse::success(id, value))),
        Err(e) => {
            error!("RPC error for {}: {}", method, e);
            let data = e.is_retryable().then(|| json!({"retryable": true}));
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error_with_data(
                    id,
                    e.to_rpc_error_code(),
                    e.to_string(),
                    data,
                )),
            )
        }
    }
}

// ============================================================================
// Method dispatcher
// ============================================================================

/// Dispatch a method call to the appropriate domain handler.
async fn dispatch_method(
    state: &AppState,
    method: &str,
    params: &Value,
) -> flora_core::Result<Value> {
    match method {
        // Data sources
        "list_data_sources" => datasets::list_data_sources(state, params).await,
        "select_data_source" => datasets::select_data_source(state, params).await,
        "upload_csv" => datasets::upload_csv(state, params).await,
        "get_dataset_info" => datasets::get_dataset_info(state, params).await,

        // Statistics
        "get_summary_statistics" => statistics::get_summary_statistics(state, params).await,
        "validate_taxonomy" => statistics::validate_taxonomy(state, params).await,
        "get_chart_series" => statistics::get_chart_series(state, params).await,

        // Table
        "query_table" => table::query_table(state, params).await,
        "get_unique_values" => table::get_unique_values(state, params).await,
        "export_csv" => table::export_csv(state, params).await,

        // Comparison
        "compare_data_sources" => compare::compare_data_sources(state, params).await,

        _ => {
            warn!("Method not found: {}", method);
            Err(FloraError::Other(format!("Method not found: {}", method)))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
