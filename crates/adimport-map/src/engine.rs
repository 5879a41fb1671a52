//! Header-to-field mapping engine.
//!
//! Each source header is scored against every schema field and takes the
//! best candidate, independently of the other headers. Several headers may
//! therefore land on the same field; a header whose best score does not
//! clear the threshold stays unmapped.

use serde::{Deserialize, Serialize};

use adimport_model::{FieldMapping, TargetSchema};

use crate::score::{normalize, similarity};

/// Minimum score a candidate must exceed (strictly) to be accepted.
pub const MIN_MAPPING_SCORE: f64 = 0.5;

const HIGH_CONFIDENCE: f64 = 0.9;
const MEDIUM_CONFIDENCE: f64 = 0.7;

/// Display bucket for an accepted suggestion's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn for_score(score: f64) -> ConfidenceLevel {
        if score >= HIGH_CONFIDENCE {
            ConfidenceLevel::High
        } else if score >= MEDIUM_CONFIDENCE {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }
}

/// One accepted header-to-field match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    pub source_header: String,
    pub target_field: String,
    pub score: f64,
}

impl MappingSuggestion {
    pub fn confidence(&self) -> ConfidenceLevel {
        ConfidenceLevel::for_score(self.score)
    }
}

/// All suggestions for one header set, plus the headers nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    pub suggestions: Vec<MappingSuggestion>,
    pub unmapped: Vec<String>,
}

impl MappingResult {
    pub fn to_mapping(&self) -> FieldMapping {
        let mut mapping = FieldMapping::new();
        for suggestion in &self.suggestions {
            mapping.insert(suggestion.source_header.clone(), suggestion.target_field.clone());
        }
        mapping
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty() && self.unmapped.is_empty()
    }
}

/// Scores headers against one target schema.
///
/// Field names are normalized once at construction; suggestion order
/// follows the input header order.
#[derive(Debug, Clone)]
pub struct MappingEngine<'a> {
    targets: Vec<(String, &'a str)>,
}

impl<'a> MappingEngine<'a> {
    pub fn new(schema: &'a TargetSchema) -> Self {
        let targets = schema
            .fields()
            .iter()
            .map(|field| (normalize(&field.name), field.name.as_str()))
            .collect();
        Self { targets }
    }

    /// Suggest a target field for every header.
    ///
    /// Candidates are compared strictly-greater, so on a tie the earlier
    /// schema field wins; schema order is the tiebreak.
    pub fn suggest(&self, headers: &[String]) -> MappingResult {
        let mut suggestions = Vec::new();
        let mut unmapped = Vec::new();

        for header in headers {
            let normalized = normalize(header);
            let mut best: Option<(&str, f64)> = None;
            for (normalized_target, target) in &self.targets {
                let score = similarity(&normalized, normalized_target);
                if best.is_none_or(|(_, current)| score > current) {
                    best = Some((target, score));
                }
            }
            match best {
                Some((target, score)) if score > MIN_MAPPING_SCORE => {
                    suggestions.push(MappingSuggestion {
                        source_header: header.clone(),
                        target_field: target.to_string(),
                        score,
                    });
                }
                _ => unmapped.push(header.clone()),
            }
        }

        MappingResult {
            suggestions,
            unmapped,
        }
    }
}

/// One-shot mapping: score, accept, and collapse to a `FieldMapping`.
pub fn build_mapping(headers: &[String], schema: &TargetSchema) -> FieldMapping {
    MappingEngine::new(schema).suggest(headers).to_mapping()
}
