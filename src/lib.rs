//! # resume-layout
//!
//! Layout-driven resume parsing for Rust.
//!
//! This library takes the positioned text fragments a page renderer emits
//! for a resume and turns them into a structured record: profile attributes
//! such as name and email, plus experience, education, project, skill and
//! summary sections.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resume_layout::{parse_file, render};
//!
//! fn main() -> resume_layout::Result<()> {
//!     // Parse a fragment dump
//!     let record = parse_file("resume.json")?;
//!
//!     // Convert to JSON
//!     let json = render::to_json(&record, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line reconstruction**: fragments are grouped into visual lines by Y step
//! - **Section segmentation**: bold all-caps titles open new sections
//! - **Subsection detection**: oversized vertical gaps split entries
//! - **Profile scoring**: weighted, configurable rules label contact lines
//! - **Batch processing**: uses Rayon to parse many documents at once

pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use input::{fragments_from_bytes, fragments_from_path, fragments_from_reader, fragments_from_str};
pub use model::{
    EntryAttributes, Line, LineStatistics, RawFragment, RecordValue, ResumeRecord, Section,
    SectionEntry, SectionType, Subsection, TextSpan,
};
pub use parser::{
    ErrorMode, FeatureRegistry, LayoutAnalysis, ParseOptions, PatternTable, ResumeParser,
    SectionKeywords, SectionPolicy,
};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse already-decoded fragments with default options.
///
/// # Example
///
/// ```
/// use resume_layout::{parse_fragments, RawFragment};
///
/// let fragments = vec![
///     RawFragment::new("Arial-Bold", "JANE DOE", [40.0, 30.0, 120.0, 42.0], 14.0),
///     RawFragment::new("Arial", "jane@example.com", [40.0, 46.0, 140.0, 56.0], 10.0),
/// ];
/// let record = parse_fragments(&fragments).unwrap();
/// assert_eq!(record.text("email"), Some("jane@example.com"));
/// ```
pub fn parse_fragments(fragments: &[RawFragment]) -> Result<ResumeRecord> {
    ResumeParser::new().parse(fragments)
}

/// Parse fragments with custom options.
pub fn parse_fragments_with_options(
    fragments: &[RawFragment],
    options: ParseOptions,
) -> Result<ResumeRecord> {
    ResumeParser::with_options(options).parse(fragments)
}

/// Parse a fragment dump held in a JSON string.
pub fn parse_json_str(json: &str) -> Result<ResumeRecord> {
    let fragments = fragments_from_str(json)?;
    parse_fragments(&fragments)
}

/// Parse a fragment dump from JSON bytes.
///
/// # Example
///
/// ```no_run
/// use resume_layout::parse_bytes;
///
/// let data = std::fs::read("resume.json").unwrap();
/// let record = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<ResumeRecord> {
    let fragments = fragments_from_bytes(data)?;
    parse_fragments(&fragments)
}

/// Parse a fragment dump from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<ResumeRecord> {
    let fragments = fragments_from_reader(reader)?;
    parse_fragments(&fragments)
}

/// Parse a fragment dump file.
///
/// # Arguments
///
/// * `path` - Path to a JSON file of fragments
///
/// # Example
///
/// ```no_run
/// use resume_layout::parse_file;
///
/// let record = parse_file("resume.json").unwrap();
/// println!("Fields: {}", record.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ResumeRecord> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a fragment dump file with custom options.
///
/// # Example
///
/// ```no_run
/// use resume_layout::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().sequential();
/// let record = parse_file_with_options("resume.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ResumeRecord> {
    let fragments = fragments_from_path(path)?;
    parse_fragments_with_options(&fragments, options)
}

/// Builder for parsing and rendering resumes.
///
/// # Example
///
/// ```no_run
/// use resume_layout::{ResumeLayout, SectionPolicy};
///
/// let json = ResumeLayout::new()
///     .lenient()
///     .with_section_policy(SectionPolicy::Append)
///     .parse("resume.json")?
///     .to_json(resume_layout::JsonFormat::Compact)?;
/// # Ok::<(), resume_layout::Error>(())
/// ```
pub struct ResumeLayout {
    parse_options: ParseOptions,
    features: Option<FeatureRegistry>,
    keywords: Option<SectionKeywords>,
    patterns: Option<PatternTable>,
}

impl ResumeLayout {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            features: None,
            keywords: None,
            patterns: None,
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set the duplicate section policy.
    pub fn with_section_policy(mut self, policy: SectionPolicy) -> Self {
        self.parse_options = self.parse_options.with_section_policy(policy);
        self
    }

    /// Use a custom profile feature registry.
    pub fn with_features(mut self, features: FeatureRegistry) -> Self {
        self.features = Some(features);
        self
    }

    /// Use custom section keywords.
    pub fn with_keywords(mut self, keywords: SectionKeywords) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Use custom header extraction patterns.
    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = Some(patterns);
        self
    }

    /// Build the configured parser.
    pub fn build(self) -> ResumeParser {
        let mut parser = ResumeParser::with_options(self.parse_options);
        if let Some(features) = self.features {
            parser = parser.with_features(features);
        }
        if let Some(keywords) = self.keywords {
            parser = parser.with_keywords(keywords);
        }
        if let Some(patterns) = self.patterns {
            parser = parser.with_patterns(patterns);
        }
        parser
    }

    /// Parse a fragment file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<ParsedResume> {
        let fragments = fragments_from_path(path)?;
        self.parse_fragments(&fragments)
    }

    /// Parse fragments from JSON bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<ParsedResume> {
        let fragments = fragments_from_bytes(data)?;
        self.parse_fragments(&fragments)
    }

    /// Parse already-decoded fragments.
    pub fn parse_fragments(self, fragments: &[RawFragment]) -> Result<ParsedResume> {
        let record = self.build().parse(fragments)?;
        Ok(ParsedResume { record })
    }
}

impl Default for ResumeLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a resume.
pub struct ParsedResume {
    /// The parsed record
    pub record: ResumeRecord,
}

impl ParsedResume {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.record, format)
    }

    /// Convert to a plain text outline.
    pub fn to_text(&self) -> String {
        render::to_text(&self.record)
    }

    /// Get the record.
    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"font_name": "Arial-Bold", "text": "JANE DOE", "bbox": [40, 30, 120, 42], "font_size": 14},
        {"font_name": "Arial", "text": "jane@example.com", "bbox": [40, 46, 140, 56], "font_size": 10},
        {"font_name": "Arial-Bold", "text": "SKILLS", "bbox": [40, 80, 90, 92], "font_size": 12},
        {"font_name": "Arial", "text": "Rust, Go", "bbox": [40, 96, 90, 106], "font_size": 10}
    ]"#;

    #[test]
    fn test_builder_defaults() {
        let builder = ResumeLayout::default();
        assert!(matches!(builder.parse_options.error_mode, ErrorMode::Strict));
        assert!(builder.parse_options.parallel);
        assert!(builder.features.is_none());
    }

    #[test]
    fn test_builder_chained() {
        let builder = ResumeLayout::new()
            .lenient()
            .sequential()
            .with_section_policy(SectionPolicy::Append);

        assert!(matches!(builder.parse_options.error_mode, ErrorMode::Lenient));
        assert!(!builder.parse_options.parallel);
        assert_eq!(builder.parse_options.section_policy, SectionPolicy::Append);
    }

    #[test]
    fn test_parse_json_str() {
        let record = parse_json_str(SAMPLE).unwrap();
        assert_eq!(record.text("name"), Some("JANE DOE"));
        assert_eq!(record.text("email"), Some("jane@example.com"));
        assert_eq!(
            record.subsections(SectionType::Skills).unwrap(),
            &[vec!["Rust, Go".to_string()]]
        );
    }

    #[test]
    fn test_parse_bytes_invalid() {
        assert!(matches!(parse_bytes(b"not json"), Err(Error::Json(_))));
        assert!(matches!(parse_bytes(b""), Err(Error::Json(_))));
    }

    #[test]
    fn test_builder_parse_bytes() {
        let parsed = ResumeLayout::new().parse_bytes(SAMPLE.as_bytes()).unwrap();
        let keys: Vec<&str> = parsed.record().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "email", "project", "skills"]);
        assert!(parsed.to_text().starts_with("name: JANE DOE"));
        let json = parsed.to_json(JsonFormat::Compact).unwrap();
        assert!(json.starts_with(r#"{"name":"JANE DOE""#));
    }

    #[test]
    fn test_builder_with_empty_features() {
        let parsed = ResumeLayout::new()
            .with_features(FeatureRegistry::default())
            .parse_bytes(SAMPLE.as_bytes())
            .unwrap();
        assert!(parsed.record().get("name").is_none());
        assert!(parsed.record().subsections(SectionType::Skills).is_some());
    }
}
