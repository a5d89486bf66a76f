//! Taxonomic levels, parent/child relations and the hierarchy tree node.

use super::Column;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five nested taxonomic levels, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomicLevel {
    Clade,
    Order,
    Family,
    Genus,
    Species,
}

impl TaxonomicLevel {
    pub const ALL: [TaxonomicLevel; 5] = [
        TaxonomicLevel::Clade,
        TaxonomicLevel::Order,
        TaxonomicLevel::Family,
        TaxonomicLevel::Genus,
        TaxonomicLevel::Species,
    ];

    pub fn column(&self) -> Column {
        match self {
            TaxonomicLevel::Clade => Column::Clade,
            TaxonomicLevel::Order => Column::Order,
            TaxonomicLevel::Family => Column::Family,
            TaxonomicLevel::Genus => Column::Genus,
            TaxonomicLevel::Species => Column::Species,
        }
    }

    /// Capitalized singular, as used in violation messages.
    pub fn label(&self) -> &'static str {
        match self {
            TaxonomicLevel::Clade => "Clade",
            TaxonomicLevel::Order => "Order",
            TaxonomicLevel::Family => "Family",
            TaxonomicLevel::Genus => "Genus",
            TaxonomicLevel::Species => "Species",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            TaxonomicLevel::Clade => "clades",
            TaxonomicLevel::Order => "orders",
            TaxonomicLevel::Family => "families",
            TaxonomicLevel::Genus => "genera",
            TaxonomicLevel::Species => "species",
        }
    }
}

impl fmt::Display for TaxonomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A one-hop child → parent relation checked by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HierarchyRelation {
    #[serde(rename = "Species → Genus")]
    SpeciesGenus,
    #[serde(rename = "Genus → Family")]
    GenusFamily,
    #[serde(rename = "Family → Order")]
    FamilyOrder,
    #[serde(rename = "Order → Clade")]
    OrderClade,
}

impl HierarchyRelation {
    /// Report order: innermost relation first.
    pub const ALL: [HierarchyRelation; 4] = [
        HierarchyRelation::SpeciesGenus,
        HierarchyRelation::GenusFamily,
        HierarchyRelation::FamilyOrder,
        HierarchyRelation::OrderClade,
    ];

    pub fn child(&self) -> TaxonomicLevel {
        match self {
            HierarchyRelation::SpeciesGenus => TaxonomicLevel::Species,
            HierarchyRelation::GenusFamily => TaxonomicLevel::Genus,
            HierarchyRelation::FamilyOrder => TaxonomicLevel::Family,
            HierarchyRelation::OrderClade => TaxonomicLevel::Order,
        }
    }

    pub fn parent(&self) -> TaxonomicLevel {
        match self {
            HierarchyRelation::SpeciesGenus => TaxonomicLevel::Genus,
            HierarchyRelation::GenusFamily => TaxonomicLevel::Family,
            HierarchyRelation::FamilyOrder => TaxonomicLevel::Order,
            HierarchyRelation::OrderClade => TaxonomicLevel::Clade,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HierarchyRelation::SpeciesGenus => "Species → Genus",
            HierarchyRelation::GenusFamily => "Genus → Family",
            HierarchyRelation::FamilyOrder => "Family → Order",
            HierarchyRelation::OrderClade => "Order → Clade",
        }
    }
}

impl fmt::Display for HierarchyRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One taxon in the clade → order → family → genus tree.
///
/// Genus nodes have no children and carry the raw species count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub name: String,
    pub value: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    pub fn leaf(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
            children: Vec::new(),
        }
    }

    /// Build an inner node whose value is the sum of its children.
    pub fn branch(name: impl Into<String>, children: Vec<TaxonomyNode>) -> Self {
        let value = children.iter().map(|c| c.value).sum();
        Self {
            name: name.into(),
            value,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&TaxonomyNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Whether every inner node in this subtree sums its children.
    pub fn sums_are_consistent(&self) -> bool {
        self.is_leaf()
            || (self.value == self.children.iter().map(|c| c.value).sum::<usize>()
                && self.children.iter().all(TaxonomyNode::sums_are_consistent))
    }
}
