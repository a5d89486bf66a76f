//! Species table handlers.

use super::{get_str_param, get_typed_param, get_usize_param, require_str_param};
use crate::server::AppState;
use flora_core::{FloraError, Filters, SortConfig, SortDirection, TableQuery};
use serde_json::{json, Value};

fn sort_from_params(params: &Value) -> flora_core::Result<SortConfig> {
    let Some(key) = get_str_param(params, "sort_key", "sortKey") else {
        return Ok(SortConfig::default());
    };
    let direction = match get_str_param(params, "sort_direction", "sortDirection") {
        None => SortDirection::Asc,
        Some(value) => SortDirection::parse(value).ok_or_else(|| FloraError::InvalidParams {
            message: format!("Unknown sort direction: {}", value),
        })?,
    };
    Ok(SortConfig::by(key, direction))
}

pub async fn query_table(state: &AppState, params: &Value) -> flora_core::Result<Value> {
    let query = TableQuery {
        filters: get_typed_param::<Filters>(params, "filters", "filters")?,
        sort: sort_from_params(params)?,
        offset: get_usize_param(params, "offset", "offset")?.unwrap_or(0),
        limit: get_usize_param(params, "limit", "limit")?,
    };
    let page = state.api.query_table(&query).await?;
    Ok(serde_json::to_value(page)?)
}

pub async fn get_unique_values(state: &AppState, params: &Value) -> flora_core::Result<Value> {
    let column = require_str_param(params, "column", "column")?;
    let values = state.api.unique_values(&column).await?;
    Ok(json!({ "column": column, "values": values }))
}

pub async fn export_csv(state: &AppState, params: &Value) -> flora_core::Result<Value> {
    let filters = get_typed_param::<Filters>(params, "filters", "filters")?;
    let sort = sort_from_params(params)?;
    let content = state.api.export_csv(&filters, &sort).await?;
    Ok(json!({ "content": content }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_from_params() {
        assert_eq!(sort_from_params(&json!({})).unwrap(), SortConfig::default());
        assert_eq!(
            sort_from_params(&json!({"sortKey": "GENUS", "sortDirection": "desc"})).unwrap(),
            SortConfig::by("GENUS", SortDirection::Desc)
        );
        assert_eq!(
            sort_from_params(&json!({"sort_key": "GENUS"})).unwrap(),
            SortConfig::by("GENUS", SortDirection::Asc)
        );
        assert!(sort_from_params(&json!({"sort_key": "GENUS", "sort_direction": "up"})).is_err());
    }
}
