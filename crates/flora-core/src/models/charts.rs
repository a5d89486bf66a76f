//! Pivot rows for the stacked bar charts.

use super::{ChartDataPoint, CountMap};
use serde::{Deserialize, Serialize};

/// One bar: a category name plus a count per stacked series.
///
/// Serializes flat, e.g. `{"name": "Wild", "Low": 3, "Moderate": 1, "High": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRow {
    pub name: String,
    #[serde(flatten)]
    pub values: CountMap,
}

impl ChartRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: CountMap::new(),
        }
    }

    pub fn get(&self, series: &str) -> usize {
        self.values.get(series).copied().unwrap_or(0)
    }
}

/// All derived chart series shown on the graphs view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub hort_dev_by_habit: Vec<ChartRow>,
    pub family_by_origin: Vec<ChartRow>,
    pub growth_form_vs_clade: Vec<ChartRow>,
    pub growth_habit_vs_hort_dev: Vec<ChartRow>,
    pub hort_dev_vs_commercial: Vec<ChartRow>,
    pub commercial_vs_source: Vec<ChartRow>,
    pub general_location: Vec<ChartDataPoint>,
    pub growth_form_vs_life_form: Vec<ChartRow>,
    pub hemisphere_vs_order: Vec<ChartRow>,
}
