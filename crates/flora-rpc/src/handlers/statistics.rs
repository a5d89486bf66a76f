//! Summary statistics, validation and chart handlers.

use crate::server::AppState;
use serde_json::Value;

pub async fn get_summary_statistics(
    state: &AppState,
    _params: &Value,
) -> flora_core::Result<Value> {
    let summary = state.api.summary().await?;
    Ok(serde_json::to_value(summary)?)
}

pub async fn validate_taxonomy(state: &AppState, _params: &Value) -> flora_core::Result<Value> {
    let report = state.api.validation().await?;
    Ok(serde_json::to_value(report)?)
}

pub async fn get_chart_series(state: &AppState, _params: &Value) -> flora_core::Result<Value> {
    let series = state.api.chart_series().await?;
    Ok(serde_json::to_value(series)?)
}
