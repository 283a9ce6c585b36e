//! JSON rendering for resume records.

use crate::error::{Error, Result};
use crate::model::ResumeRecord;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a record to JSON.
pub fn to_json(record: &ResumeRecord, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(record),
        JsonFormat::Compact => serde_json::to_string(record),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryAttributes, SectionType};

    fn record() -> ResumeRecord {
        let mut record = ResumeRecord::new();
        record.insert_profile("name", "JANE DOE".to_string());
        let mut entry = EntryAttributes::new();
        entry
            .fields
            .insert("company".to_string(), "Acme".to_string());
        entry.description.push("Shipped things".to_string());
        record.extend_entries(SectionType::WorkExperience, vec![entry]);
        record
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&record(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"name\": \"JANE DOE\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&record(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert_eq!(
            json,
            r#"{"name":"JANE DOE","work_experience":[{"company":"Acme","description":["Shipped things"]}]}"#
        );
    }

    #[test]
    fn test_empty_record() {
        let json = to_json(&ResumeRecord::new(), JsonFormat::Compact).unwrap();
        assert_eq!(json, "{}");
    }
}
