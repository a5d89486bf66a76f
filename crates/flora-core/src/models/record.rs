//! Species records as produced by the CSV normalizer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns the library knows by name.
///
/// Any other column stays reachable through [`Record::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Clade,
    Order,
    Family,
    Genus,
    Species,
    GrowthForm,
    GeographicOrigin,
    GeneralLocation,
    GrowthHabit,
    HorticulturalDevelopment,
    CommercialStatus,
    ConservationStatus,
    Hemisphere,
    LifeFormType,
}

impl Column {
    pub const ALL: [Column; 14] = [
        Column::Clade,
        Column::Order,
        Column::Family,
        Column::Genus,
        Column::Species,
        Column::GrowthForm,
        Column::GeographicOrigin,
        Column::GeneralLocation,
        Column::GrowthHabit,
        Column::HorticulturalDevelopment,
        Column::CommercialStatus,
        Column::ConservationStatus,
        Column::Hemisphere,
        Column::LifeFormType,
    ];

    /// Header text as it appears in the CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Clade => "CLADE",
            Column::Order => "ORDER",
            Column::Family => "FAMILY",
            Column::Genus => "GENUS",
            Column::Species => "SPECIES",
            Column::GrowthForm => "GROWTH FORM",
            Column::GeographicOrigin => "GEOGRAPHIC ORIGIN",
            Column::GeneralLocation => "GENERAL LOCATION",
            Column::GrowthHabit => "GROWTH HABIT",
            Column::HorticulturalDevelopment => "HORTICULTURAL DEVELOPMENT",
            Column::CommercialStatus => "COMMERCIAL STATUS",
            Column::ConservationStatus => "CONSERVATION STATUS",
            Column::Hemisphere => "HEMISPHERE",
            Column::LifeFormType => "LIFE-FORM TYPE",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| c.as_str() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the species table: column name to cell text.
///
/// Presence means a non-empty string. An absent column and an empty cell
/// are indistinguishable through [`Record::get`] and [`Record::value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by the normalizer and tests.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Non-empty value of a well-known column.
    pub fn value(&self, column: Column) -> Option<&str> {
        self.get(column.as_str())
    }

    /// Non-empty value of any column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Cell text as stored, including empty strings.
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Whether the well-known column holds one of `candidates` exactly.
    pub fn value_in(&self, column: Column, candidates: &[&str]) -> bool {
        self.value(column)
            .map(|v| candidates.contains(&v))
            .unwrap_or(false)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
