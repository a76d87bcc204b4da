//! Query descriptors for the Ampache `advanced_search` and `stats` actions.
//!
//! A descriptor is built fresh for every call and serializes to the same JSON
//! shape the web player sends. `to_params` flattens it into the query string
//! the JSON server endpoint expects.

use ample_common::Page;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Object type of every descriptor built by this crate
pub const ARTIST_TYPE: &str = "artist";

/// Rule operator codes. The meaning of a code depends on the field type, so
/// text and numeric codes overlap.
pub mod operator {
    pub const TEXT_CONTAINS: u8 = 0;
    pub const TEXT_NOT_CONTAINS: u8 = 1;
    pub const TEXT_STARTS_WITH: u8 = 2;
    pub const TEXT_ENDS_WITH: u8 = 3;
    pub const TEXT_IS: u8 = 4;
    pub const TEXT_IS_NOT: u8 = 5;

    pub const NUMERIC_AT_LEAST: u8 = 0;
    pub const NUMERIC_AT_MOST: u8 = 1;
    pub const NUMERIC_EQUALS: u8 = 2;
    pub const NUMERIC_NOT_EQUALS: u8 = 3;
    pub const NUMERIC_GREATER_THAN: u8 = 4;
    pub const NUMERIC_LESS_THAN: u8 = 5;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleInput {
    Number(i64),
    Text(String),
}

impl fmt::Display for RuleInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleInput::Number(n) => write!(f, "{n}"),
            RuleInput::Text(s) => f.write_str(s),
        }
    }
}

/// One `[field, operatorCode, value]` search rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub field: String,
    pub operator: u8,
    pub input: RuleInput,
}

impl Rule {
    pub fn text(field: &str, operator: u8, input: &str) -> Self {
        Self {
            field: field.to_string(),
            operator,
            input: RuleInput::Text(input.to_string()),
        }
    }

    pub fn numeric(field: &str, operator: u8, input: i64) -> Self {
        Self {
            field: field.to_string(),
            operator,
            input: RuleInput::Number(input),
        }
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.field)?;
        tuple.serialize_element(&self.operator)?;
        tuple.serialize_element(&self.input)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (field, operator, input) = <(String, u8, RuleInput)>::deserialize(deserializer)?;
        Ok(Self {
            field,
            operator,
            input,
        })
    }
}

/// How multiple rules combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combine {
    And,
    Or,
}

impl Combine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combine::And => "and",
            Combine::Or => "or",
        }
    }
}

/// Descriptor for the `advanced_search` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    #[serde(rename = "type")]
    pub object_type: &'static str,
    pub operator: Combine,
    pub limit: u32,
    pub offset: u64,
    /// `1` asks the server to shuffle the matching set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random: Option<u8>,
    pub rules: Vec<Rule>,
}

impl SearchQuery {
    /// Artist search over `page`, all rules combined with `and`.
    pub fn artists(page: Page, rules: Vec<Rule>) -> Self {
        Self {
            object_type: ARTIST_TYPE,
            operator: Combine::And,
            limit: page.limit,
            offset: page.offset(),
            random: None,
            rules,
        }
    }

    pub fn randomized(mut self) -> Self {
        self.random = Some(1);
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("type".to_string(), self.object_type.to_string()),
            ("operator".to_string(), self.operator.as_str().to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ];
        if let Some(random) = self.random {
            params.push(("random".to_string(), random.to_string()));
        }
        // Rules are numbered from 1
        for (i, rule) in self.rules.iter().enumerate() {
            let n = i + 1;
            params.push((format!("rule_{n}"), rule.field.clone()));
            params.push((format!("rule_{n}_operator"), rule.operator.to_string()));
            params.push((format!("rule_{n}_input"), rule.input.to_string()));
        }
        params
    }
}

/// Named browsing filters of the `stats` action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsFilter {
    Newest,
    Recent,
    /// Favorites
    Flagged,
    Frequent,
    /// Top rated
    Highest,
    Forgotten,
}

impl StatsFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsFilter::Newest => "newest",
            StatsFilter::Recent => "recent",
            StatsFilter::Flagged => "flagged",
            StatsFilter::Frequent => "frequent",
            StatsFilter::Highest => "highest",
            StatsFilter::Forgotten => "forgotten",
        }
    }
}

/// Descriptor for the `stats` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsQuery {
    #[serde(rename = "type")]
    pub object_type: &'static str,
    pub filter: StatsFilter,
    pub offset: u64,
    pub limit: u32,
}

impl StatsQuery {
    pub fn artists(filter: StatsFilter, page: Page) -> Self {
        Self {
            object_type: ARTIST_TYPE,
            filter,
            offset: page.offset(),
            limit: page.limit,
        }
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            ("type".to_string(), self.object_type.to_string()),
            ("filter".to_string(), self.filter.as_str().to_string()),
            ("offset".to_string(), self.offset.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}
