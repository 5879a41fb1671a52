#![deny(unsafe_code)]

//! Fuzzy mapping of source column headers onto target schema fields.
//!
//! Scoring is normalized Levenshtein over normalized names; acceptance is
//! strictly above [`MIN_MAPPING_SCORE`]. Mapping and validation are
//! independent: a header can fail to map while its column still validates.

pub mod engine;
pub mod score;

pub use engine::{
    ConfidenceLevel, MIN_MAPPING_SCORE, MappingEngine, MappingResult, MappingSuggestion,
    build_mapping,
};
pub use score::{header_similarity, normalize, similarity};
