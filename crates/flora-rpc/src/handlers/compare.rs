//! Cross-source density comparison handler.

use super::get_str_list_param;
use crate::server::AppState;
use serde_json::{json, Value};

pub async fn compare_data_sources(state: &AppState, params: &Value) -> flora_core::Result<Value> {
    let source_ids = get_str_list_param(params, "source_ids", "sourceIds")?;
    let columns = get_str_list_param(params, "columns", "columns")?;
    let comparisons = state.api.compare_sources(&source_ids, &columns).await?;
    Ok(json!({ "columns": comparisons }))
}
