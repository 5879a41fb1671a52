use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kinds of bulk import this system supports. Each kind carries a
/// built-in target schema; `TargetSchema::builtin` returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Campaigns,
    Audiences,
    Keywords,
    Creatives,
    Budgets,
}

impl ImportKind {
    pub const ALL: [ImportKind; 5] = [
        ImportKind::Campaigns,
        ImportKind::Audiences,
        ImportKind::Keywords,
        ImportKind::Creatives,
        ImportKind::Budgets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Campaigns => "campaigns",
            ImportKind::Audiences => "audiences",
            ImportKind::Keywords => "keywords",
            ImportKind::Creatives => "creatives",
            ImportKind::Budgets => "budgets",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ImportKind::Campaigns => "Ad campaigns with budgets and flight dates",
            ImportKind::Audiences => "Audience segments and demographics",
            ImportKind::Keywords => "Search keywords with match types and bids",
            ImportKind::Creatives => "Creative assets and copy",
            ImportKind::Budgets => "Budget allocations per campaign",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "campaigns" | "campaign" => Ok(ImportKind::Campaigns),
            "audiences" | "audience" => Ok(ImportKind::Audiences),
            "keywords" | "keyword" => Ok(ImportKind::Keywords),
            "creatives" | "creative" => Ok(ImportKind::Creatives),
            "budgets" | "budget" => Ok(ImportKind::Budgets),
            _ => Err(format!("Unknown import kind: {s}")),
        }
    }
}

/// Declared type of a schema field. Cells in a column whose header names a
/// schema field are checked against this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive numeric bounds for a field. Values outside the range produce
/// warnings, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// One field of a target schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub required: bool,
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            required: false,
            field_type,
            range: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn bounded(mut self, min: f64, max: f64) -> Self {
        self.range = Some(ValueRange::new(min, max));
        self
    }
}

/// An ordered set of field definitions for one import kind.
///
/// Field order is meaningful: the mapping engine resolves equal-score ties
/// in favor of the earlier field, so more important fields come first in
/// the built-in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSchema {
    kind: ImportKind,
    fields: Vec<FieldDef>,
}

impl TargetSchema {
    pub fn new(kind: ImportKind, fields: Vec<FieldDef>) -> Self {
        Self { kind, fields }
    }

    /// The built-in schema for a kind. Overrides loaded from a schema file
    /// replace these wholesale per kind.
    pub fn builtin(kind: ImportKind) -> Self {
        let fields = match kind {
            ImportKind::Campaigns => vec![
                FieldDef::text("name").required(),
                FieldDef::text("platform").required(),
                FieldDef::text("status"),
                FieldDef::text("objective"),
                FieldDef::number("budget").required().bounded(0.0, 1_000_000.0),
                FieldDef::number("bid").bounded(0.0, 100.0),
                FieldDef::date("start_date"),
                FieldDef::date("end_date"),
            ],
            ImportKind::Audiences => vec![
                FieldDef::text("name").required(),
                FieldDef::text("platform").required(),
                FieldDef::number("size"),
                FieldDef::text("age_group"),
                FieldDef::text("gender"),
                FieldDef::text("country"),
                FieldDef::text("interests"),
                FieldDef::date("created_at"),
            ],
            ImportKind::Keywords => vec![
                FieldDef::text("keyword").required(),
                FieldDef::text("match_type").required(),
                FieldDef::text("campaign"),
                FieldDef::number("bid").bounded(0.0, 100.0),
                FieldDef::text("status"),
            ],
            ImportKind::Creatives => vec![
                FieldDef::text("name").required(),
                FieldDef::text("format").required(),
                FieldDef::text("platform"),
                FieldDef::text("headline"),
                FieldDef::text("description"),
                FieldDef::text("media_url"),
                FieldDef::text("status"),
                FieldDef::date("created_at"),
            ],
            ImportKind::Budgets => vec![
                FieldDef::text("campaign").required(),
                FieldDef::number("amount").required().bounded(0.0, 1_000_000.0),
                FieldDef::text("currency"),
                FieldDef::text("period"),
                FieldDef::date("start_date"),
                FieldDef::date("end_date"),
            ],
        };
        Self::new(kind, fields)
    }

    pub fn kind(&self) -> ImportKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field by name, ignoring ASCII case.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|field| field.required)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}
