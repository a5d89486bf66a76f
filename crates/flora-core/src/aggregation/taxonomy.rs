//! Taxonomy tree construction and the family leaderboard.

use crate::config::DashboardConfig;
use crate::models::{Column, CountMap, LeaderboardEntry, Record, TaxonomyNode};
use indexmap::IndexMap;

use super::tally::{sorted_desc, tally};

/// Clade, order, family and genus of a valid taxonomic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomicPath<'a> {
    pub clade: &'a str,
    pub order: &'a str,
    pub family: &'a str,
    pub genus: &'a str,
}

impl<'a> TaxonomicPath<'a> {
    /// `None` unless all four levels are present.
    pub fn of(record: &'a Record) -> Option<Self> {
        Some(Self {
            clade: record.value(Column::Clade)?,
            order: record.value(Column::Order)?,
            family: record.value(Column::Family)?,
            genus: record.value(Column::Genus)?,
        })
    }
}

/// Paths of every record with a full clade → genus lineage, in input order.
pub fn valid_taxonomic_paths(records: &[Record]) -> Vec<TaxonomicPath<'_>> {
    records.iter().filter_map(TaxonomicPath::of).collect()
}

type Genera<'a> = IndexMap<&'a str, usize>;
type Families<'a> = IndexMap<&'a str, Genera<'a>>;
type Orders<'a> = IndexMap<&'a str, Families<'a>>;

/// Build the clade → order → family → genus tree.
///
/// Genus values are species counts and every inner value is the sum of its
/// children. Only the clade list is sorted (descending value); lower levels
/// keep first-seen order.
pub fn build_taxonomy_tree(paths: &[TaxonomicPath<'_>]) -> Vec<TaxonomyNode> {
    let mut builder: IndexMap<&str, Orders<'_>> = IndexMap::new();
    for path in paths {
        *builder
            .entry(path.clade)
            .or_default()
            .entry(path.order)
            .or_default()
            .entry(path.family)
            .or_default()
            .entry(path.genus)
            .or_insert(0) += 1;
    }

    let mut clades: Vec<TaxonomyNode> = builder
        .into_iter()
        .map(|(clade, orders)| TaxonomyNode::branch(clade, order_nodes(orders)))
        .collect();
    clades.sort_by(|a, b| b.value.cmp(&a.value));
    clades
}

fn order_nodes(orders: Orders<'_>) -> Vec<TaxonomyNode> {
    orders
        .into_iter()
        .map(|(order, families)| TaxonomyNode::branch(order, family_nodes(families)))
        .collect()
}

fn family_nodes(families: Families<'_>) -> Vec<TaxonomyNode> {
    families
        .into_iter()
        .map(|(family, genera)| {
            let genus_nodes = genera
                .into_iter()
                .map(|(genus, count)| TaxonomyNode::leaf(genus, count))
                .collect();
            TaxonomyNode::branch(family, genus_nodes)
        })
        .collect()
}

/// Valid-record counts per clade.
pub fn clade_counts(paths: &[TaxonomicPath<'_>]) -> CountMap {
    tally(paths.iter().map(|p| p.clade))
}

/// Valid-record counts per order.
pub fn order_counts(paths: &[TaxonomicPath<'_>]) -> CountMap {
    tally(paths.iter().map(|p| p.order))
}

/// Largest families with the order of the first record naming each.
///
/// The order is not checked for uniqueness; a family split across orders
/// shows whichever came first and is reported by the validator instead.
pub fn family_leaderboard(paths: &[TaxonomicPath<'_>], size: usize) -> Vec<LeaderboardEntry> {
    let totals = tally(paths.iter().map(|p| p.family));
    sorted_desc(&totals)
        .into_iter()
        .take(size)
        .map(|(family, value)| LeaderboardEntry {
            name: family.to_string(),
            value,
            order: paths
                .iter()
                .find(|p| p.family == family)
                .map(|p| p.order)
                .unwrap_or(DashboardConfig::UNKNOWN_ORDER)
                .to_string(),
        })
        .collect()
}
