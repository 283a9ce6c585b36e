//! Plain text rendering for resume records.

use crate::model::{RecordValue, ResumeRecord};

/// Render a record as a readable outline.
///
/// Profile attributes come first as `key: value` lines, in record order.
/// Each section follows under an upper-cased heading, with entries
/// separated by blank lines.
pub fn to_text(record: &ResumeRecord) -> String {
    let mut output = String::new();

    for (key, value) in record.iter() {
        match value {
            RecordValue::Text(text) => {
                output.push_str(&format!("{}: {}\n", key, text));
            }
            RecordValue::List(items) => {
                output.push_str(&format!("{}: {}\n", key, items.join("; ")));
            }
            RecordValue::Subsections(subsections) => {
                push_heading(&mut output, key);
                for subsection in subsections {
                    for point in subsection {
                        output.push_str(point);
                        output.push('\n');
                    }
                    output.push('\n');
                }
            }
            RecordValue::Entries(entries) => {
                push_heading(&mut output, key);
                for entry in entries {
                    for (field, text) in &entry.fields {
                        output.push_str(&format!("{}: {}\n", field, text));
                    }
                    for point in &entry.description {
                        output.push_str(&format!("- {}\n", point));
                    }
                    output.push('\n');
                }
            }
        }
    }

    output.trim().to_string()
}

fn push_heading(output: &mut String, key: &str) {
    if !output.is_empty() && !output.ends_with("\n\n") {
        output.push('\n');
    }
    output.push_str(&key.replace('_', " ").to_uppercase());
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryAttributes, SectionType};

    #[test]
    fn test_to_text() {
        let mut record = ResumeRecord::new();
        record.insert_profile("name", "JANE DOE".to_string());
        record.insert_profile("url", "a.dev".to_string());
        record.insert_profile("url", "b.dev".to_string());

        let mut entry = EntryAttributes::new();
        entry
            .fields
            .insert("school".to_string(), "State University".to_string());
        entry.description.push("Dean's list".to_string());
        record.extend_entries(SectionType::Education, vec![entry]);
        record.extend_subsections(SectionType::Skills, vec![vec!["Rust".to_string()]]);

        let text = to_text(&record);
        assert_eq!(
            text,
            "name: JANE DOE\nurl: a.dev; b.dev\n\nEDUCATION\nschool: State University\n- Dean's list\n\nSKILLS\nRust"
        );
    }

    #[test]
    fn test_to_text_empty() {
        assert_eq!(to_text(&ResumeRecord::new()), "");
    }
}
