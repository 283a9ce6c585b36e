//! Section classification and per-type field extraction.

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{EntryAttributes, SectionType, Subsection};

use super::subsections::contextualize;

/// Title keywords per section category, tried in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKeywords {
    lists: IndexMap<SectionType, Vec<String>>,
}

impl SectionKeywords {
    /// Create an empty table; everything classifies as `other`.
    pub fn empty() -> Self {
        Self {
            lists: IndexMap::new(),
        }
    }

    /// Built-in English keywords.
    pub fn english() -> Self {
        let mut keywords = Self::empty();
        keywords.set(SectionType::Summary, ["profile", "summary", "objective"]);
        keywords.set(SectionType::WorkExperience, ["experience", "employment", "work"]);
        keywords.set(SectionType::Education, ["education", "academic", "campus"]);
        keywords.set(SectionType::Projects, ["project", "projects"]);
        keywords.set(SectionType::Skills, ["skills", "competencies"]);
        keywords
    }

    /// Load keywords from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the keywords of one category.
    pub fn set<I, S>(&mut self, category: SectionType, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lists.insert(
            category,
            words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        );
    }

    /// Keywords of a category; empty for `other` or unknown ones.
    pub fn keywords(&self, category: SectionType) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classify a section title; the first category with a contained keyword wins.
    pub fn classify(&self, name: &str) -> SectionType {
        let name = name.to_lowercase();
        self.lists
            .iter()
            .find(|(_, words)| words.iter().any(|w| name.contains(&w.to_lowercase())))
            .map(|(category, _)| *category)
            .unwrap_or(SectionType::Other)
    }
}

impl Default for SectionKeywords {
    fn default() -> Self {
        Self::english()
    }
}

/// Serialized form of a field pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPatternSpec {
    /// Output field name
    pub field: String,
    /// Regex source, matched case-insensitively
    pub pattern: String,
}

/// A named, case-insensitive extraction regex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FieldPatternSpec", into = "FieldPatternSpec")]
pub struct FieldPattern {
    field: String,
    pattern: String,
    regex: Regex,
}

impl FieldPattern {
    /// Compile a field pattern.
    pub fn new(field: impl Into<String>, pattern: &str) -> Result<Self> {
        let field = field.into();
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                name: field.clone(),
                source,
            })?;
        Ok(Self {
            field,
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Output field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// First match in the text, trimmed.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str().trim())
    }
}

impl TryFrom<FieldPatternSpec> for FieldPattern {
    type Error = Error;

    fn try_from(spec: FieldPatternSpec) -> Result<Self> {
        FieldPattern::new(spec.field, &spec.pattern)
    }
}

impl From<FieldPattern> for FieldPatternSpec {
    fn from(pattern: FieldPattern) -> Self {
        FieldPatternSpec {
            field: pattern.field,
            pattern: pattern.pattern,
        }
    }
}

const MONTH_OR_SEASON: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?|spring|summer|fall|winter";

fn date_range_pattern() -> String {
    format!(
        r"\b(?:{m})\b\s\d{{4}}\s?[-–]\s?(?:present|(?:\b(?:{m})\b\s)?\d{{4}})",
        m = MONTH_OR_SEASON
    )
}

/// Header extraction patterns per section type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternTable {
    tables: IndexMap<SectionType, Vec<FieldPattern>>,
}

impl PatternTable {
    /// Create an empty table; entries keep only their description.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in English patterns.
    pub fn english() -> Self {
        let duration = date_range_pattern();
        let job_titles = r"\b(?:analyst|engineer|intern|manager|director|consultant|developer)\b";

        let mut table = Self::empty();
        table.set(
            SectionType::WorkExperience,
            vec![
                builtin("company", r"^[A-Za-z\s,]+"),
                builtin("job_title", job_titles),
                builtin("duration", &duration),
            ],
        );
        table.set(
            SectionType::Education,
            vec![
                builtin("school", r"[A-Za-z\s]+(?:College|University|School)"),
                builtin("degree", r"\b(?:Associate|Bachelor|Master|Doctor|PhD)\b"),
                builtin("gpa", r"[0-4]\.\d{1,2}"),
                builtin("duration", r"\b(?:19|20)\d{2}\b"),
            ],
        );
        table.set(
            SectionType::Projects,
            vec![
                builtin("project_title", r"^[A-Za-z\s,]+"),
                builtin("duration", &duration),
            ],
        );
        table
    }

    /// Load patterns from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the patterns of a section type.
    pub fn set(&mut self, section_type: SectionType, patterns: Vec<FieldPattern>) {
        self.tables.insert(section_type, patterns);
    }

    /// Patterns for a section type, in order.
    pub fn fields(&self, section_type: SectionType) -> &[FieldPattern] {
        self.tables
            .get(&section_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn builtin(field: &str, pattern: &str) -> FieldPattern {
    FieldPattern::new(field, pattern).expect("built-in pattern is valid")
}

/// Apply each pattern to a header line, keeping the first match per field.
pub fn extract_fields(header: &str, patterns: &[FieldPattern]) -> IndexMap<String, String> {
    patterns
        .iter()
        .filter_map(|p| p.find(header).map(|m| (p.field().to_string(), m.to_string())))
        .collect()
}

/// Turn a subsection into an entry: the first point is the header, the rest
/// become the description.
pub fn build_entry(subsection: &Subsection, patterns: &[FieldPattern]) -> EntryAttributes {
    let mut points = contextualize(subsection).into_iter();
    let Some(header) = points.next() else {
        return EntryAttributes::new();
    };

    EntryAttributes {
        fields: extract_fields(&header, patterns),
        description: points.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_english() {
        let keywords = SectionKeywords::english();
        assert_eq!(keywords.classify("WORK EXPERIENCE"), SectionType::WorkExperience);
        assert_eq!(keywords.classify("EMPLOYMENT HISTORY"), SectionType::WorkExperience);
        assert_eq!(keywords.classify("EDUCATION"), SectionType::Education);
        assert_eq!(keywords.classify("ACADEMIC PROJECTS"), SectionType::Education);
        assert_eq!(keywords.classify("PROJECTS"), SectionType::Projects);
        assert_eq!(keywords.classify("TECHNICAL SKILLS"), SectionType::Skills);
        assert_eq!(keywords.classify("PROFESSIONAL SUMMARY"), SectionType::Summary);
        assert_eq!(keywords.classify("AWARDS"), SectionType::Other);
    }

    #[test]
    fn test_first_category_wins() {
        let keywords = SectionKeywords::english();
        assert_eq!(keywords.classify("PROFILE & WORK"), SectionType::Summary);
    }

    #[test]
    fn test_keywords_lookup() {
        let keywords = SectionKeywords::english();
        assert_eq!(keywords.keywords(SectionType::Skills), &strings(&["skills", "competencies"])[..]);
        assert!(keywords.keywords(SectionType::Other).is_empty());
        assert_eq!(SectionKeywords::empty().classify("EDUCATION"), SectionType::Other);
    }

    #[test]
    fn test_keywords_from_json() {
        let json = r#"{"education": ["formation"], "skills": ["compétences"]}"#;
        let keywords = SectionKeywords::from_json(json).unwrap();
        assert_eq!(keywords.classify("FORMATION"), SectionType::Education);
        assert_eq!(keywords.classify("COMPÉTENCES"), SectionType::Skills);
        assert_eq!(keywords.classify("EXPERIENCE"), SectionType::Other);
    }

    #[test]
    fn test_work_experience_header() {
        let table = PatternTable::english();
        let fields = extract_fields(
            "Acme Corp Software Engineer Jan 2020 - Present",
            table.fields(SectionType::WorkExperience),
        );
        assert!(fields["job_title"].contains("Engineer"));
        assert!(fields["duration"]
            .to_lowercase()
            .contains("jan 2020 - present"));
        assert!(fields["company"].starts_with("Acme Corp"));
    }

    #[test]
    fn test_duration_ranges() {
        let table = PatternTable::english();
        let fields = table.fields(SectionType::Projects);
        let found = extract_fields("Compiler Summer 2019 – Fall 2020", fields);
        assert_eq!(found["duration"], "Summer 2019 – Fall 2020");
        assert_eq!(found["project_title"], "Compiler Summer");

        let found = extract_fields("Parser september 2018-2019", fields);
        assert_eq!(found["duration"], "september 2018-2019");
    }

    #[test]
    fn test_education_header() {
        let table = PatternTable::english();
        let fields = extract_fields(
            "State University Bachelor of Science GPA 3.85 2016 2020",
            table.fields(SectionType::Education),
        );
        assert_eq!(fields["school"], "State University");
        assert_eq!(fields["degree"], "Bachelor");
        assert_eq!(fields["gpa"], "3.85");
        assert_eq!(fields["duration"], "2016");
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let table = PatternTable::english();
        let fields = extract_fields("2019", table.fields(SectionType::WorkExperience));
        assert!(fields.get("company").is_none());
        assert!(fields.get("job_title").is_none());
    }

    #[test]
    fn test_build_entry() {
        let table = PatternTable::english();
        let subsection = strings(&[
            "Acme Corp Software Engineer Jan 2020 - Present",
            "• Shipped the parser",
            "• Cut latency",
            "by half",
        ]);
        let entry = build_entry(&subsection, table.fields(SectionType::WorkExperience));
        assert_eq!(entry.get("job_title"), Some("Engineer"));
        assert_eq!(
            entry.description,
            strings(&["Shipped the parser", "Cut latency by half"])
        );
    }

    #[test]
    fn test_other_sections_keep_description_only() {
        let table = PatternTable::english();
        let entry = build_entry(
            &strings(&["Dean's List 2019", "- Top 5%"]),
            table.fields(SectionType::Other),
        );
        assert!(entry.fields.is_empty());
        assert_eq!(entry.description, strings(&["Top 5%"]));
    }

    #[test]
    fn test_empty_subsection() {
        let entry = build_entry(&Vec::new(), &[]);
        assert!(entry.fields.is_empty());
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_pattern_table_json() {
        let json = r#"{"other": [{"field": "year", "pattern": "\\d{4}"}]}"#;
        let table = PatternTable::from_json(json).unwrap();
        let fields = extract_fields("Award 2021", table.fields(SectionType::Other));
        assert_eq!(fields["year"], "2021");

        let bad = r#"{"other": [{"field": "year", "pattern": "["}]}"#;
        assert!(PatternTable::from_json(bad).is_err());
    }
}
