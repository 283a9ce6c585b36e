//! The structured output of a parse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{SectionType, Subsection};

/// Fields pulled from one subsection header plus its free-text points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryAttributes {
    /// Extracted fields (e.g. `company`, `duration`) in pattern order
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
    /// Remaining points of the subsection
    #[serde(default)]
    pub description: Vec<String>,
}

impl EntryAttributes {
    /// Create an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// A value stored under one record key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    /// A single profile attribute
    Text(String),
    /// A profile attribute matched more than once
    List(Vec<String>),
    /// Raw subsections of a summary or skills section
    Subsections(Vec<Subsection>),
    /// Structured entries of experience, education, projects or other sections
    Entries(Vec<EntryAttributes>),
}

impl RecordValue {
    /// The scalar text, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The structured entries, if this holds them.
    pub fn as_entries(&self) -> Option<&[EntryAttributes]> {
        match self {
            RecordValue::Entries(e) => Some(e),
            _ => None,
        }
    }

    /// The raw subsections, if this holds them.
    pub fn as_subsections(&self) -> Option<&[Subsection]> {
        match self {
            RecordValue::Subsections(s) => Some(s),
            _ => None,
        }
    }
}

/// Mapping from profile attribute or section type to extracted values.
///
/// Keys keep the order in which they were first written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeRecord {
    values: IndexMap<String, RecordValue>,
}

impl ResumeRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value under a key.
    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.values.get(key)
    }

    /// Get a scalar profile attribute.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RecordValue::as_text)
    }

    /// Get the structured entries of a section type.
    pub fn entries(&self, section_type: SectionType) -> Option<&[EntryAttributes]> {
        self.get(section_type.as_str())
            .and_then(RecordValue::as_entries)
    }

    /// Get the raw subsections of a section type.
    pub fn subsections(&self, section_type: SectionType) -> Option<&[Subsection]> {
        self.get(section_type.as_str())
            .and_then(RecordValue::as_subsections)
    }

    /// Iterate keys and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Store a profile attribute; a repeated key turns into a list.
    pub fn insert_profile(&mut self, attribute: &str, value: String) {
        match self.values.get_mut(attribute) {
            None => {
                self.values
                    .insert(attribute.to_string(), RecordValue::Text(value));
            }
            Some(RecordValue::List(items)) => items.push(value),
            Some(existing) => {
                let mut items = match std::mem::replace(existing, RecordValue::List(Vec::new())) {
                    RecordValue::Text(s) => vec![s],
                    _ => Vec::new(),
                };
                items.push(value);
                *existing = RecordValue::List(items);
            }
        }
    }

    /// Append raw subsections under a section type.
    pub fn extend_subsections(&mut self, section_type: SectionType, subsections: Vec<Subsection>) {
        let slot = self
            .values
            .entry(section_type.as_str().to_string())
            .or_insert_with(|| RecordValue::Subsections(Vec::new()));
        match slot {
            RecordValue::Subsections(existing) => existing.extend(subsections),
            other => {
                log::debug!("Replacing non-listing value under {}", section_type);
                *other = RecordValue::Subsections(subsections);
            }
        }
    }

    /// Append structured entries under a section type.
    pub fn extend_entries(&mut self, section_type: SectionType, entries: Vec<EntryAttributes>) {
        let slot = self
            .values
            .entry(section_type.as_str().to_string())
            .or_insert_with(|| RecordValue::Entries(Vec::new()));
        match slot {
            RecordValue::Entries(existing) => existing.extend(entries),
            other => {
                log::debug!("Replacing non-entry value under {}", section_type);
                *other = RecordValue::Entries(entries);
            }
        }
    }
}
