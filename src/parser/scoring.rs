//! Weighted feature scoring for profile attributes.
//!
//! Each attribute owns an ordered list of `(predicate, weight)` rules. A
//! line's score is the sum of the weights whose predicate matches; the best
//! line per attribute wins if its score is positive.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::SectionEntry;

use super::normalize::{is_title_case, is_upper_text};

/// Result of evaluating one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The predicate holds
    Match,
    /// The predicate does not hold
    NoMatch,
}

impl From<bool> for RuleOutcome {
    fn from(matched: bool) -> Self {
        if matched {
            RuleOutcome::Match
        } else {
            RuleOutcome::NoMatch
        }
    }
}

/// Serialized form of a predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredicateSpec {
    /// Regex must match at the start of the text
    StartsWith { pattern: String },
    /// Regex must match anywhere
    Search { pattern: String },
    /// Regex must not match anywhere
    Lacks { pattern: String },
    /// Literal substring
    Contains { needle: String },
    /// Any keyword, compared in lowercase
    ContainsAny { keywords: Vec<String> },
    /// Every word capitalized, rest lowercase
    TitleCase,
    /// Cased letters all uppercase
    AllCaps,
    /// At least one digit
    HasDigit,
}

/// A compiled text predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PredicateSpec", into = "PredicateSpec")]
pub enum Predicate {
    /// Regex anchored at the start of the text
    StartsWith { pattern: String, regex: Regex },
    /// Regex anywhere in the text
    Search { pattern: String, regex: Regex },
    /// Regex nowhere in the text
    Lacks { pattern: String, regex: Regex },
    /// Literal substring
    Contains(String),
    /// Any lowercase keyword contained in the lowercased text
    ContainsAny(Vec<String>),
    /// Title-cased text
    TitleCase,
    /// All-caps text
    AllCaps,
    /// Text with an ASCII digit
    HasDigit,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        name: pattern.to_string(),
        source,
    })
}

impl Predicate {
    /// Regex that must match at the start.
    pub fn starts_with(pattern: &str) -> Result<Self> {
        Ok(Predicate::StartsWith {
            pattern: pattern.to_string(),
            regex: compile(&format!("^(?:{})", pattern))?,
        })
    }

    /// Regex that must match somewhere.
    pub fn search(pattern: &str) -> Result<Self> {
        Ok(Predicate::Search {
            pattern: pattern.to_string(),
            regex: compile(pattern)?,
        })
    }

    /// Regex that must not match anywhere.
    pub fn lacks(pattern: &str) -> Result<Self> {
        Ok(Predicate::Lacks {
            pattern: pattern.to_string(),
            regex: compile(pattern)?,
        })
    }

    /// Literal substring.
    pub fn contains(needle: impl Into<String>) -> Self {
        Predicate::Contains(needle.into())
    }

    /// Any of the keywords, case-insensitive.
    pub fn contains_any<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Predicate::ContainsAny(
            keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// Evaluate against a line of text.
    pub fn evaluate(&self, text: &str) -> RuleOutcome {
        let matched = match self {
            Predicate::StartsWith { regex, .. } | Predicate::Search { regex, .. } => {
                regex.is_match(text)
            }
            Predicate::Lacks { regex, .. } => !regex.is_match(text),
            Predicate::Contains(needle) => text.contains(needle.as_str()),
            Predicate::ContainsAny(keywords) => {
                let lower = text.to_lowercase();
                keywords.iter().any(|k| lower.contains(k.as_str()))
            }
            Predicate::TitleCase => is_title_case(text),
            Predicate::AllCaps => is_upper_text(text),
            Predicate::HasDigit => text.chars().any(|c| c.is_ascii_digit()),
        };
        matched.into()
    }
}

impl TryFrom<PredicateSpec> for Predicate {
    type Error = Error;

    fn try_from(spec: PredicateSpec) -> Result<Self> {
        match spec {
            PredicateSpec::StartsWith { pattern } => Predicate::starts_with(&pattern),
            PredicateSpec::Search { pattern } => Predicate::search(&pattern),
            PredicateSpec::Lacks { pattern } => Predicate::lacks(&pattern),
            PredicateSpec::Contains { needle } => Ok(Predicate::contains(needle)),
            PredicateSpec::ContainsAny { keywords } => Ok(Predicate::contains_any(keywords)),
            PredicateSpec::TitleCase => Ok(Predicate::TitleCase),
            PredicateSpec::AllCaps => Ok(Predicate::AllCaps),
            PredicateSpec::HasDigit => Ok(Predicate::HasDigit),
        }
    }
}

impl From<Predicate> for PredicateSpec {
    fn from(predicate: Predicate) -> Self {
        match predicate {
            Predicate::StartsWith { pattern, .. } => PredicateSpec::StartsWith { pattern },
            Predicate::Search { pattern, .. } => PredicateSpec::Search { pattern },
            Predicate::Lacks { pattern, .. } => PredicateSpec::Lacks { pattern },
            Predicate::Contains(needle) => PredicateSpec::Contains { needle },
            Predicate::ContainsAny(keywords) => PredicateSpec::ContainsAny { keywords },
            Predicate::TitleCase => PredicateSpec::TitleCase,
            Predicate::AllCaps => PredicateSpec::AllCaps,
            Predicate::HasDigit => PredicateSpec::HasDigit,
        }
    }
}

/// A weighted predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRule {
    /// What to test
    pub predicate: Predicate,
    /// Added to the score when the predicate matches
    pub weight: i32,
}

impl FeatureRule {
    /// Create a rule.
    pub fn new(predicate: Predicate, weight: i32) -> Self {
        Self { predicate, weight }
    }

    /// Weight contributed for a text, zero on no match.
    pub fn contribution(&self, text: &str) -> i32 {
        match self.predicate.evaluate(text) {
            RuleOutcome::Match => self.weight,
            RuleOutcome::NoMatch => 0,
        }
    }
}

/// Ordered rules for one attribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet {
    rules: Vec<FeatureRule>,
}

impl FeatureSet {
    /// Create a feature set.
    pub fn new(rules: Vec<FeatureRule>) -> Self {
        Self { rules }
    }

    /// Add a rule at the end.
    pub fn push(&mut self, rule: FeatureRule) {
        self.rules.push(rule);
    }

    /// The rules in order.
    pub fn rules(&self) -> &[FeatureRule] {
        &self.rules
    }

    /// Sum of matching weights, saturating at the `i32` bounds.
    pub fn score(&self, text: &str) -> i32 {
        self.rules
            .iter()
            .fold(0i32, |acc, r| acc.saturating_add(r.contribution(text)))
    }

    /// Highest-scoring text, first one on ties, kept only when positive.
    pub fn best_match<'a, I>(&self, texts: I) -> Option<(&'a str, i32)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, i32)> = None;
        for text in texts {
            let score = self.score(text);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((text, score));
            }
        }
        best.filter(|(_, score)| *score > 0)
    }
}

/// Feature sets by attribute name, in evaluation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRegistry {
    sets: IndexMap<String, FeatureSet>,
}

const MONTHS_AND_SEASONS: [&str; 17] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "spring", "summer", "fall", "winter", "present",
];

const JOB_TITLES: [&str; 7] = [
    "analyst",
    "engineer",
    "intern",
    "manager",
    "director",
    "consultant",
    "developer",
];

impl FeatureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English rules.
    pub fn english() -> Self {
        let mut registry = Self::new();
        registry.insert(
            "name",
            FeatureSet::new(vec![
                FeatureRule::new(Predicate::TitleCase, 4),
                FeatureRule::new(builtin_starts_with(r"[a-zA-Z\s\.]+$"), 3),
                FeatureRule::new(builtin_starts_with(r"[A-Z\s]+$"), 2),
                FeatureRule::new(Predicate::contains("@"), -4),
                FeatureRule::new(Predicate::HasDigit, -4),
                FeatureRule::new(Predicate::contains(","), -4),
                FeatureRule::new(Predicate::contains("/"), -4),
                FeatureRule::new(Predicate::contains("."), -4),
            ]),
        );
        registry.insert(
            "email",
            single(builtin_starts_with(r"\S+@\S+\.\S+"), 10),
        );
        registry.insert(
            "phone",
            single(builtin_starts_with(r"\(?\d{3}\)?[\s-]?\d{3}[\s-]?\d{4}"), 10),
        );
        registry.insert(
            "location",
            single(builtin_starts_with(r"[A-Z][a-zA-Z\s]+, [A-Z]{2}"), 10),
        );
        registry.insert("url", single(builtin_starts_with(r"\S+\.[a-z]+/\S+"), 10));
        registry.insert(
            "school",
            single(Predicate::contains_any(["college", "university", "school"]), 10),
        );
        registry.insert(
            "degree",
            single(
                Predicate::contains_any(["associate", "bachelor", "master", "phd", "doctorate"]),
                10,
            ),
        );
        registry.insert("gpa", single(builtin_starts_with(r"[0-4]\.\d{1,2}"), 10));
        registry.insert(
            "date",
            FeatureSet::new(vec![
                FeatureRule::new(builtin_starts_with(r"(?:19|20)\d{2}"), 5),
                FeatureRule::new(Predicate::contains_any(MONTHS_AND_SEASONS), 5),
            ]),
        );
        registry.insert("job_title", single(Predicate::contains_any(JOB_TITLES), 10));
        registry.insert(
            "project",
            single(builtin_lacks(r"(?:19|20)\d{2}"), 5),
        );
        registry
    }

    /// Load a registry from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace an attribute's feature set.
    pub fn insert(&mut self, attribute: impl Into<String>, set: FeatureSet) {
        self.sets.insert(attribute.into(), set);
    }

    /// Remove an attribute.
    pub fn remove(&mut self, attribute: &str) -> Option<FeatureSet> {
        self.sets.shift_remove(attribute)
    }

    /// Get an attribute's feature set.
    pub fn get(&self, attribute: &str) -> Option<&FeatureSet> {
        self.sets.get(attribute)
    }

    /// Attribute names in order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterate attributes and their feature sets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureSet)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn single(predicate: Predicate, weight: i32) -> FeatureSet {
    FeatureSet::new(vec![FeatureRule::new(predicate, weight)])
}

fn builtin_starts_with(pattern: &str) -> Predicate {
    Predicate::starts_with(pattern).expect("built-in pattern is valid")
}

fn builtin_lacks(pattern: &str) -> Predicate {
    Predicate::lacks(pattern).expect("built-in pattern is valid")
}

/// Pick the best entry text for every attribute in the registry.
pub fn score_profile(entries: &[SectionEntry], registry: &FeatureRegistry) -> IndexMap<String, String> {
    let mut found = IndexMap::new();

    for (attribute, set) in registry.iter() {
        match set.best_match(entries.iter().map(|e| e.text.as_str())) {
            Some((text, score)) => {
                log::debug!("Profile {}: {:?} (score {})", attribute, text, score);
                found.insert(attribute.to_string(), text.to_string());
            }
            None => log::debug!("Profile {}: no confident match", attribute),
        }
    }

    found
}
