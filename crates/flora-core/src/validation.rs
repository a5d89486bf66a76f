//! Hierarchy validator: one parent per child at every taxonomic level.
//!
//! Checks are one-hop only. Each relation map records, per child name, the
//! distinct parents seen across the dataset; any child with more than one
//! parent becomes a single violation regardless of how many rows disagree.

use crate::models::{
    HierarchyRelation, HierarchyViolation, MissingData, Record, TaxonomicLevel, ValidationReport,
};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// Child name to the distinct parent names observed, both in first-seen order.
pub type RelationMap<'a> = IndexMap<&'a str, IndexSet<&'a str>>;

/// Collect the child → parents map for one relation.
///
/// Records missing either side contribute nothing.
pub fn relation_map(records: &[Record], relation: HierarchyRelation) -> RelationMap<'_> {
    let child_column = relation.child().column();
    let parent_column = relation.parent().column();

    let mut map = RelationMap::new();
    for record in records {
        if let (Some(child), Some(parent)) =
            (record.value(child_column), record.value(parent_column))
        {
            map.entry(child).or_default().insert(parent);
        }
    }
    map
}

/// Validate completeness and hierarchy consistency of `records`.
pub fn validate_taxonomy(records: &[Record]) -> ValidationReport {
    let mut missing_data = MissingData::default();
    let mut complete_records = 0;

    for record in records {
        for level in TaxonomicLevel::ALL {
            if record.value(level.column()).is_none() {
                missing_data.increment(level);
            }
        }
        if is_complete(record) {
            complete_records += 1;
        }
    }

    let hierarchy_violations: Vec<HierarchyViolation> = HierarchyRelation::ALL
        .into_iter()
        .flat_map(|relation| violations(records, relation))
        .collect();

    if !hierarchy_violations.is_empty() {
        debug!(
            "Taxonomy validation found {} hierarchy violations",
            hierarchy_violations.len()
        );
    }

    ValidationReport {
        total_records: records.len(),
        missing_data,
        complete_records,
        is_valid: hierarchy_violations.is_empty(),
        hierarchy_violations,
    }
}

/// Clade, order, family and genus present. Species is not required.
fn is_complete(record: &Record) -> bool {
    [
        TaxonomicLevel::Clade,
        TaxonomicLevel::Order,
        TaxonomicLevel::Family,
        TaxonomicLevel::Genus,
    ]
    .iter()
    .all(|level| record.value(level.column()).is_some())
}

fn violations(records: &[Record], relation: HierarchyRelation) -> Vec<HierarchyViolation> {
    relation_map(records, relation)
        .into_iter()
        .filter(|(_, parents)| parents.len() > 1)
        .map(|(child, parents)| {
            HierarchyViolation::new(
                relation,
                child,
                parents.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}
