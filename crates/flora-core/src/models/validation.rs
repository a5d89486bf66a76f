//! Hierarchy validation report types.

use super::{HierarchyRelation, TaxonomicLevel};
use serde::{Deserialize, Serialize};

/// Records lacking each taxonomic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissingData {
    pub clade: usize,
    pub order: usize,
    pub family: usize,
    pub genus: usize,
    pub species: usize,
}

impl MissingData {
    pub fn get(&self, level: TaxonomicLevel) -> usize {
        match level {
            TaxonomicLevel::Clade => self.clade,
            TaxonomicLevel::Order => self.order,
            TaxonomicLevel::Family => self.family,
            TaxonomicLevel::Genus => self.genus,
            TaxonomicLevel::Species => self.species,
        }
    }

    pub(crate) fn increment(&mut self, level: TaxonomicLevel) {
        match level {
            TaxonomicLevel::Clade => self.clade += 1,
            TaxonomicLevel::Order => self.order += 1,
            TaxonomicLevel::Family => self.family += 1,
            TaxonomicLevel::Genus => self.genus += 1,
            TaxonomicLevel::Species => self.species += 1,
        }
    }
}

/// A child taxon observed under more than one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyViolation {
    #[serde(rename = "type")]
    pub relation: HierarchyRelation,
    pub item: String,
    pub issue: String,
    pub level: TaxonomicLevel,
    /// Distinct parents in the order they were first seen.
    pub parents: Vec<String>,
}

impl HierarchyViolation {
    pub fn new(relation: HierarchyRelation, item: impl Into<String>, parents: Vec<String>) -> Self {
        let item = item.into();
        let issue = format!(
            "{} \"{}\" appears in multiple {}: {}",
            relation.child().label(),
            item,
            relation.parent().plural(),
            parents.join(", ")
        );
        Self {
            relation,
            item,
            issue,
            level: relation.child(),
            parents,
        }
    }
}

/// Completeness and one-parent-per-child findings for a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total_records: usize,
    pub missing_data: MissingData,
    pub complete_records: usize,
    pub hierarchy_violations: Vec<HierarchyViolation>,
    pub is_valid: bool,
}

impl ValidationReport {
    /// The vacuously valid report of an empty dataset.
    pub fn empty() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    pub fn violations_for(&self, relation: HierarchyRelation) -> impl Iterator<Item = &HierarchyViolation> {
        self.hierarchy_violations
            .iter()
            .filter(move |v| v.relation == relation)
    }
}
