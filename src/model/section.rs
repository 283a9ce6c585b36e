//! Section and subsection types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the implicit first section.
pub const PROFILE_SECTION: &str = "PROFILE";

/// One span recorded under a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Text of the span
    pub text: String,
    /// Y position of the span
    pub y: f32,
    /// Font size of the span
    pub font_size: f32,
    /// Whether the span is bold
    pub bold: bool,
}

/// A named group of entries collected between two title lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Title text that opened the section
    pub name: String,
    /// Entries in reading order
    pub entries: Vec<SectionEntry>,
    /// Y of the first span of the last line added
    pub y: f32,
    /// Boldness of the first span of the last line added
    pub bold: bool,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            y: 0.0,
            bold: false,
        }
    }

    /// Check whether this is the implicit profile section.
    pub fn is_profile(&self) -> bool {
        self.name == PROFILE_SECTION
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }
}

/// A gap-delimited group of raw line texts inside a section.
pub type Subsection = Vec<String>;

/// Semantic category of a section, derived from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    /// Summary, profile or objective
    Summary,
    /// Work history
    WorkExperience,
    /// Schools and degrees
    Education,
    /// Personal or academic projects
    Projects,
    /// Skill lists
    Skills,
    /// Anything unrecognized
    Other,
}

impl SectionType {
    /// Categories tried by keyword, in priority order.
    pub const KEYWORD_ORDER: [SectionType; 5] = [
        SectionType::Summary,
        SectionType::WorkExperience,
        SectionType::Education,
        SectionType::Projects,
        SectionType::Skills,
    ];

    /// Record key for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Summary => "summary",
            SectionType::WorkExperience => "work_experience",
            SectionType::Education => "education",
            SectionType::Projects => "projects",
            SectionType::Skills => "skills",
            SectionType::Other => "other",
        }
    }

    /// Whether subsections are emitted as raw text lists.
    pub fn is_listing(&self) -> bool {
        matches!(self, SectionType::Summary | SectionType::Skills)
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
