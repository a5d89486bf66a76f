//! Data source selection and upload handlers.

use super::require_str_param;
use crate::server::AppState;
use serde_json::{json, Value};

pub async fn list_data_sources(state: &AppState, _params: &Value) -> flora_core::Result<Value> {
    let sources: Vec<_> = state.api.catalog().iter().cloned().collect();
    Ok(json!({
        "sources": sources,
        "defaultSourceId": state.api.catalog().default_id(),
        "activeSourceId": state.api.active_source_id().await,
    }))
}

pub async fn select_data_source(state: &AppState, params: &Value) -> flora_core::Result<Value> {
    let source_id = require_str_param(params, "source_id", "sourceId")?;
    let info = state.api.select_source(&source_id).await?;
    Ok(serde_json::to_value(info)?)
}

pub async fn upload_csv(state: &AppState, params: &Value) -> flora_core::Result<Value> {
    let name = super::get_str_param(params, "name", "fileName").unwrap_or("upload.csv");
    let content = require_str_param(params, "content", "content")?;
    let info = state.api.load_csv_text(name, &content).await?;
    Ok(serde_json::to_value(info)?)
}

pub async fn get_dataset_info(state: &AppState, _params: &Value) -> flora_core::Result<Value> {
    let info = state.api.dataset_info().await?;
    Ok(serde_json::to_value(info)?)
}
