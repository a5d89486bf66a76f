//! Aggregation engine: summary statistics over a record set.
//!
//! Everything here is a pure function of the input slice. Callers that want
//! memoization go through [`crate::cache::SummaryCache`].

pub mod tally;
pub mod taxonomy;

use crate::config::DashboardConfig;
use crate::models::{Column, Record, SummaryStatistics};
use crate::validation::validate_taxonomy;
use tracing::debug;

pub use tally::{
    cross_tab, cross_tab_columns, geographic_source, rounded_percentage, sorted_desc, tally,
    tally_column, top_n, top_n_with_other,
};
pub use taxonomy::{build_taxonomy_tree, family_leaderboard, valid_taxonomic_paths, TaxonomicPath};

/// Compute every summary statistic for `records`, including the embedded
/// validation report.
pub fn calculate_summary_statistics(records: &[Record]) -> SummaryStatistics {
    if records.is_empty() {
        return SummaryStatistics::empty();
    }

    let total = records.len();

    let growth_form_counts = tally_column(records, Column::GrowthForm);
    let geographic_counts = tally(records.iter().filter_map(geographic_source));
    let commercial_counts = tally_column(records, Column::CommercialStatus);
    let conservation_counts = tally_column(records, Column::ConservationStatus);

    let conservation_concern = records
        .iter()
        .filter(|r| {
            r.value_in(
                Column::ConservationStatus,
                &DashboardConfig::CONSERVATION_CONCERN_STATUSES,
            )
        })
        .count();
    let cultivated = records
        .iter()
        .filter(|r| r.value_in(Column::GrowthHabit, &DashboardConfig::HUMAN_INFLUENCE_HABITS))
        .count();

    let hort_dev_by_growth_habit =
        cross_tab_columns(records, Column::GrowthHabit, Column::HorticulturalDevelopment);
    let family_by_origin = cross_tab(
        records
            .iter()
            .filter_map(|r| Some((r.value(Column::Family)?, geographic_source(r)?))),
    );

    let paths = valid_taxonomic_paths(records);
    let order_counts = taxonomy::order_counts(&paths);

    debug!(
        "Aggregated {} records ({} with full taxonomy)",
        total,
        paths.len()
    );

    SummaryStatistics {
        total_species: total,
        top_geographic: sorted_desc(&geographic_counts)
            .into_iter()
            .take(DashboardConfig::TOP_GEOGRAPHIC)
            .map(|(name, count)| (name.to_string(), count))
            .collect(),
        conservation_chart_data: top_n_with_other(
            &conservation_counts,
            DashboardConfig::TOP_N_DEFAULT,
        ),
        commercial_chart_data: top_n_with_other(&commercial_counts, DashboardConfig::TOP_N_DEFAULT),
        growth_form_counts,
        geographic_counts,
        commercial_counts,
        conservation_counts,
        conservation_concern,
        human_influence: rounded_percentage(cultivated, total),
        hort_dev_by_growth_habit,
        family_by_origin,
        taxonomic_data_count: paths.len(),
        taxonomy_tree: build_taxonomy_tree(&paths),
        family_leaderboard: family_leaderboard(&paths, DashboardConfig::FAMILY_LEADERBOARD_SIZE),
        order_distribution: top_n_with_other(
            &order_counts,
            DashboardConfig::ORDER_DISTRIBUTION_TOP_N,
        ),
        clade_counts: taxonomy::clade_counts(&paths),
        order_counts,
        taxonomy_validation: validate_taxonomy(records),
    }
}
