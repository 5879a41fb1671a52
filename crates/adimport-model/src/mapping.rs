use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// A record ready for submission: target field name to cell value.
pub type MappedRecord = BTreeMap<String, CellValue>;

/// Maps source column headers to target schema field names.
///
/// Keys are unique by construction; values are not, so two source columns
/// may feed the same target field. BTreeMap keeps serialization and
/// iteration order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: BTreeMap<String, String>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(source.into(), target.into());
    }

    /// Target field for a source header, matched exactly.
    pub fn target_for(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
    }
}

impl FromIterator<(String, String)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        let mut mapping = FieldMapping::new();
        mapping.insert("campaign_name", "name");
        assert_eq!(mapping.target_for("campaign_name"), Some("name"));
        assert_eq!(mapping.target_for("Campaign_Name"), None);
    }

    #[test]
    fn serializes_as_a_plain_object() {
        let mut mapping = FieldMapping::new();
        mapping.insert("daily_budget", "budget");
        mapping.insert("campaign", "name");
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        assert_eq!(json, r#"{"campaign":"name","daily_budget":"budget"}"#);
        let round: FieldMapping = serde_json::from_str(&json).expect("deserialize mapping");
        assert_eq!(round, mapping);
    }

    #[test]
    fn values_may_repeat() {
        let mapping: FieldMapping = [
            ("col_a".to_string(), "name".to_string()),
            ("col_b".to_string(), "name".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.target_for("col_a"), mapping.target_for("col_b"));
    }
}
