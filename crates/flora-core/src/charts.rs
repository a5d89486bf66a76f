//! Derived chart series for the graphs view.
//!
//! Each series pivots a cross-tab into rows with a fixed set of columns so
//! stacked bars line up across categories. Missing cells are zero.

use crate::aggregation::{
    cross_tab, cross_tab_columns, geographic_source, sorted_desc, tally, top_n,
};
use crate::config::ChartConfig;
use crate::models::{ChartRow, ChartSeries, Column, CountMap, CrossTab, Record};
use indexmap::IndexSet;

/// Compute every derived series for `records`.
pub fn derive_chart_series(records: &[Record]) -> ChartSeries {
    let habit_by_development =
        cross_tab_columns(records, Column::GrowthHabit, Column::HorticulturalDevelopment);

    ChartSeries {
        hort_dev_by_habit: pivot(&habit_by_development, &ChartConfig::DEVELOPMENT_LEVELS),
        family_by_origin: family_by_origin(records),
        growth_form_vs_clade: against_all_values(records, Column::GrowthForm, Column::Clade),
        growth_habit_vs_hort_dev: pivot(&habit_by_development, &ChartConfig::DEVELOPMENT_LEVELS),
        hort_dev_vs_commercial: pivot(
            &cross_tab_columns(
                records,
                Column::HorticulturalDevelopment,
                Column::CommercialStatus,
            ),
            &ChartConfig::COMMERCIAL_LEVELS,
        ),
        commercial_vs_source: commercial_vs_source(records),
        general_location: top_n(
            &tally(records.iter().filter_map(geographic_source)),
            ChartConfig::GENERAL_LOCATIONS,
        ),
        growth_form_vs_life_form: against_all_values(
            records,
            Column::GrowthForm,
            Column::LifeFormType,
        ),
        hemisphere_vs_order: hemisphere_vs_order(records),
    }
}

/// One row per outer key of `table`, with a cell for each of `columns`.
pub fn pivot<S: AsRef<str>>(table: &CrossTab, columns: &[S]) -> Vec<ChartRow> {
    table
        .iter()
        .map(|(name, counts)| pivot_row(name, counts, columns))
        .collect()
}

fn pivot_row<S: AsRef<str>>(name: &str, counts: &CountMap, columns: &[S]) -> ChartRow {
    let mut row = ChartRow::new(name);
    for column in columns {
        let column = column.as_ref();
        row.values
            .insert(column.to_string(), counts.get(column).copied().unwrap_or(0));
    }
    row
}

/// Sum each inner key across every outer key.
fn inner_totals(table: &CrossTab) -> CountMap {
    let mut totals = CountMap::new();
    for counts in table.values() {
        for (key, count) in counts {
            *totals.entry(key.clone()).or_insert(0) += count;
        }
    }
    totals
}

fn top_keys(totals: &CountMap, n: usize) -> Vec<String> {
    sorted_desc(totals)
        .into_iter()
        .take(n)
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Rows per `outer` value with a column for every distinct `inner` value in
/// the dataset, in first-seen order.
fn against_all_values(records: &[Record], outer: Column, inner: Column) -> Vec<ChartRow> {
    let columns: IndexSet<&str> = records.iter().filter_map(|r| r.value(inner)).collect();
    let columns: Vec<&str> = columns.into_iter().collect();
    pivot(&cross_tab_columns(records, outer, inner), &columns)
}

/// The largest families (by total across origins) against the first origins
/// seen anywhere in the table.
fn family_by_origin(records: &[Record]) -> Vec<ChartRow> {
    let table = cross_tab(
        records
            .iter()
            .filter_map(|r| Some((r.value(Column::Family)?, geographic_source(r)?))),
    );

    let family_totals: CountMap = table
        .iter()
        .map(|(family, origins)| (family.clone(), origins.values().sum()))
        .collect();
    let families = top_keys(&family_totals, ChartConfig::FAMILY_BY_ORIGIN_FAMILIES);

    let origins: IndexSet<&str> = table
        .values()
        .flat_map(|origins| origins.keys().map(String::as_str))
        .collect();
    let origins: Vec<&str> = origins
        .into_iter()
        .take(ChartConfig::FAMILY_BY_ORIGIN_ORIGINS)
        .collect();

    families
        .iter()
        .filter_map(|family| Some(pivot_row(family, table.get(family)?, &origins)))
        .collect()
}

fn commercial_vs_source(records: &[Record]) -> Vec<ChartRow> {
    let table = cross_tab(
        records
            .iter()
            .filter_map(|r| Some((r.value(Column::CommercialStatus)?, geographic_source(r)?))),
    );
    let sources = top_keys(&inner_totals(&table), ChartConfig::COMMERCIAL_SOURCES);
    pivot(&table, &sources)
}

fn hemisphere_vs_order(records: &[Record]) -> Vec<ChartRow> {
    let table = cross_tab_columns(records, Column::Hemisphere, Column::Order);
    let orders = top_keys(&inner_totals(&table), ChartConfig::HEMISPHERE_ORDERS);
    pivot(&table, &orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(fields: &[(&str, &str)]) -> Record {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_hort_dev_rows_have_fixed_columns() {
        let records = vec![
            plant(&[("GROWTH HABIT", "Wild"), ("HORTICULTURAL DEVELOPMENT", "Low")]),
            plant(&[("GROWTH HABIT", "Cultivated"), ("HORTICULTURAL DEVELOPMENT", "High")]),
            plant(&[("GROWTH HABIT", "Cultivated"), ("HORTICULTURAL DEVELOPMENT", "High")]),
            plant(&[("GROWTH HABIT", "Wild"), ("HORTICULTURAL DEVELOPMENT", "Extreme")]),
        ];
        let series = derive_chart_series(&records);
        assert_eq!(series.hort_dev_by_habit.len(), 2);

        let wild = &series.hort_dev_by_habit[0];
        assert_eq!(wild.name, "Wild");
        let keys: Vec<&str> = wild.values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Low", "Moderate", "High"]);
        assert_eq!(wild.get("Low"), 1);
        assert_eq!(wild.get("Moderate"), 0);

        assert_eq!(series.hort_dev_by_habit[1].get("High"), 2);
        assert_eq!(series.growth_habit_vs_hort_dev, series.hort_dev_by_habit);
    }

    #[test]
    fn test_hort_dev_vs_commercial() {
        let records = vec![
            plant(&[("HORTICULTURAL DEVELOPMENT", "High"), ("COMMERCIAL STATUS", "Major")]),
            plant(&[("HORTICULTURAL DEVELOPMENT", "High"), ("COMMERCIAL STATUS", "None")]),
        ];
        let series = derive_chart_series(&records);
        let high = &series.hort_dev_vs_commercial[0];
        assert_eq!(high.get("Major"), 1);
        assert_eq!(high.get("None"), 1);
        assert_eq!(high.get("Limited"), 0);
    }

    #[test]
    fn test_growth_form_vs_clade_lists_every_clade() {
        let records = vec![
            plant(&[("GROWTH FORM", "Tree"), ("CLADE", "Eudicots")]),
            plant(&[("GROWTH FORM", "Herb"), ("CLADE", "Monocots")]),
            plant(&[("CLADE", "Magnoliids")]),
        ];
        let series = derive_chart_series(&records);
        let tree = &series.growth_form_vs_clade[0];
        let keys: Vec<&str> = tree.values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Eudicots", "Monocots", "Magnoliids"]);
        assert_eq!(tree.get("Eudicots"), 1);
        assert_eq!(tree.get("Magnoliids"), 0);
    }

    #[test]
    fn test_family_by_origin_picks_largest_families() {
        let mut records = Vec::new();
        for i in 0..12 {
            for _ in 0..=i {
                records.push(plant(&[
                    ("FAMILY", format!("F{i}").as_str()),
                    ("GEOGRAPHIC ORIGIN", "Europe"),
                ]));
            }
        }
        let series = derive_chart_series(&records);
        assert_eq!(series.family_by_origin.len(), 9);
        assert_eq!(series.family_by_origin[0].name, "F11");
        assert_eq!(series.family_by_origin[0].get("Europe"), 12);
    }

    #[test]
    fn test_commercial_vs_source_limits_sources() {
        let mut records = Vec::new();
        for i in 0..14 {
            records.push(plant(&[
                ("COMMERCIAL STATUS", "Major"),
                ("GENERAL LOCATION", format!("L{i}").as_str()),
            ]));
        }
        let series = derive_chart_series(&records);
        assert_eq!(series.commercial_vs_source.len(), 1);
        assert_eq!(series.commercial_vs_source[0].values.len(), 10);
    }

    #[test]
    fn test_general_location_top_fifteen() {
        let records: Vec<Record> = (0..20)
            .map(|i| plant(&[("GEOGRAPHIC ORIGIN", format!("Region{i}").as_str())]))
            .collect();
        let series = derive_chart_series(&records);
        assert_eq!(series.general_location.len(), 15);
        assert!(series.general_location.iter().all(|p| p.name != "Other"));
    }

    #[test]
    fn test_hemisphere_vs_order() {
        let records = vec![
            plant(&[("HEMISPHERE", "Northern"), ("ORDER", "Rosales")]),
            plant(&[("HEMISPHERE", "Northern"), ("ORDER", "Rosales")]),
            plant(&[("HEMISPHERE", "Southern"), ("ORDER", "Proteales")]),
        ];
        let series = derive_chart_series(&records);
        let northern = &series.hemisphere_vs_order[0];
        let keys: Vec<&str> = northern.values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Rosales", "Proteales"]);
        assert_eq!(northern.get("Rosales"), 2);
        assert_eq!(series.hemisphere_vs_order[1].get("Proteales"), 1);
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(derive_chart_series(&[]), ChartSeries::default());
    }
}
