//! Summary statistics consumed by the dashboard.

use super::{TaxonomyNode, ValidationReport};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category value to occurrence count, in first-seen order.
pub type CountMap = IndexMap<String, usize>;

/// Outer key to inner key to count, both in first-seen order.
pub type CrossTab = IndexMap<String, CountMap>;

/// A single `{name, value}` point of a bar or pie series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub value: usize,
}

impl ChartDataPoint {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A family in the top-families leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub value: usize,
    /// Order of the first record seen with this family.
    pub order: String,
}

/// Everything the summary, graphs and taxonomy views display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub total_species: usize,
    pub growth_form_counts: CountMap,
    pub geographic_counts: CountMap,
    pub top_geographic: Vec<(String, usize)>,
    pub commercial_counts: CountMap,
    pub conservation_counts: CountMap,
    pub conservation_concern: usize,
    /// Percentage of records grown by people, 0..=100.
    pub human_influence: u32,
    pub conservation_chart_data: Vec<ChartDataPoint>,
    pub commercial_chart_data: Vec<ChartDataPoint>,
    pub hort_dev_by_growth_habit: CrossTab,
    pub family_by_origin: CrossTab,
    /// Records with clade, order, family and genus all present.
    pub taxonomic_data_count: usize,
    pub taxonomy_tree: Vec<TaxonomyNode>,
    pub family_leaderboard: Vec<LeaderboardEntry>,
    pub order_distribution: Vec<ChartDataPoint>,
    pub clade_counts: CountMap,
    pub order_counts: CountMap,
    pub taxonomy_validation: ValidationReport,
}

impl SummaryStatistics {
    /// The summary of an empty dataset.
    pub fn empty() -> Self {
        Self {
            taxonomy_validation: ValidationReport::empty(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_is_valid() {
        let summary = SummaryStatistics::empty();
        assert_eq!(summary.total_species, 0);
        assert!(summary.taxonomy_validation.is_valid);
        assert!(summary.taxonomy_tree.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(SummaryStatistics::empty()).unwrap();
        assert!(json.get("totalSpecies").is_some());
        assert!(json.get("hortDevByGrowthHabit").is_some());
        assert_eq!(json["taxonomyValidation"]["isValid"], serde_json::json!(true));
    }
}
