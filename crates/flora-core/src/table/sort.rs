//! Table sorting.

use crate::models::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Current sort column and direction. No key means input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Header click: a second click on an ascending column flips it,
    /// anything else sorts the column ascending.
    pub fn toggle(&mut self, column: &str) {
        let flip = self.key.as_deref() == Some(column) && self.direction == SortDirection::Asc;
        self.key = Some(column.to_string());
        self.direction = if flip {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
    }

    /// Stable sort on raw cell text, missing cells as "".
    pub fn sort(&self, records: &mut [&Record]) {
        let Some(key) = self.key.as_deref() else {
            return;
        };
        records.sort_by(|a, b| {
            let ordering = a.raw(key).unwrap_or("").cmp(b.raw(key).unwrap_or(""));
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genus(name: &str, tag: &str) -> Record {
        Record::new().with("GENUS", name).with("TAG", tag)
    }

    fn tags(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.raw("TAG").unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_toggle_cycle() {
        let mut sort = SortConfig::default();
        sort.toggle("GENUS");
        assert_eq!(sort, SortConfig::by("GENUS", SortDirection::Asc));
        sort.toggle("GENUS");
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.toggle("GENUS");
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.toggle("FAMILY");
        assert_eq!(sort, SortConfig::by("FAMILY", SortDirection::Asc));
    }

    #[test]
    fn test_sort_is_stable_and_lexicographic() {
        let records = vec![
            genus("Rosa", "1"),
            genus("Acer", "2"),
            genus("Rosa", "3"),
            genus("acer", "4"),
            Record::new().with("TAG", "5"),
        ];
        let mut view: Vec<&Record> = records.iter().collect();
        SortConfig::by("GENUS", SortDirection::Asc).sort(&mut view);
        assert_eq!(tags(&view), vec!["5", "2", "1", "3", "4"]);

        let mut view: Vec<&Record> = records.iter().collect();
        SortConfig::by("GENUS", SortDirection::Desc).sort(&mut view);
        assert_eq!(tags(&view), vec!["4", "1", "3", "2", "5"]);
    }

    #[test]
    fn test_no_key_keeps_input_order() {
        let records = vec![genus("Rosa", "1"), genus("Acer", "2")];
        let mut view: Vec<&Record> = records.iter().collect();
        SortConfig::default().sort(&mut view);
        assert_eq!(tags(&view), vec!["1", "2"]);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("sideways"), None);
    }
}
