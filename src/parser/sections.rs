//! Section segmentation.
//!
//! Lines are folded through a small state machine that tracks the open
//! section. A line opens a new section when its first span is bold and all
//! caps; the first line always belongs to the profile, and the second line
//! is never taken as a title since it usually continues the header.

use indexmap::IndexMap;

use crate::model::{Line, Section, SectionEntry, PROFILE_SECTION};

use super::options::SectionPolicy;

/// Sections keyed by title, in order of first appearance.
pub type SectionMap = IndexMap<String, Section>;

/// Fold state: the open section and everything collected so far.
#[derive(Debug, Clone)]
pub struct Segmenter {
    current: String,
    sections: SectionMap,
    policy: SectionPolicy,
}

impl Segmenter {
    /// Start with an empty profile section open.
    pub fn new(policy: SectionPolicy) -> Self {
        let mut sections = SectionMap::new();
        sections.insert(PROFILE_SECTION.to_string(), Section::new(PROFILE_SECTION));
        Self {
            current: PROFILE_SECTION.to_string(),
            sections,
            policy,
        }
    }

    /// Name of the open section.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Consume one line at its document index.
    pub fn step(mut self, index: usize, line: &Line) -> Self {
        if index != 0 && index != 1 && line.has_title_lead() {
            let title = line.spans[0].text.clone();
            self.open(title);
        } else {
            self.append(line);
        }
        self
    }

    /// Finish and return the sections.
    pub fn finish(self) -> SectionMap {
        self.sections
    }

    fn open(&mut self, title: String) {
        match self.policy {
            SectionPolicy::Reset => {
                if self.sections.contains_key(&title) {
                    log::debug!("Re-opening section {:?}, discarding earlier entries", title);
                } else {
                    log::debug!("Opening section {:?}", title);
                }
                self.sections.insert(title.clone(), Section::new(title.clone()));
            }
            SectionPolicy::Append => {
                log::debug!("Opening section {:?}", title);
                self.sections
                    .entry(title.clone())
                    .or_insert_with(|| Section::new(title.clone()));
            }
        }
        self.current = title;
    }

    fn append(&mut self, line: &Line) {
        let Some(first) = line.first() else {
            return;
        };
        let Some(section) = self.sections.get_mut(&self.current) else {
            return;
        };

        section
            .entries
            .extend(line.spans.iter().map(|span| SectionEntry {
                text: span.text.clone(),
                y: span.y,
                font_size: span.font_size,
                bold: span.bold,
            }));
        section.y = first.y;
        section.bold = first.bold;
    }
}

/// Partition lines into named sections.
pub fn segment(lines: &[Line], policy: SectionPolicy) -> SectionMap {
    lines
        .iter()
        .enumerate()
        .fold(Segmenter::new(policy), |state, (index, line)| {
            state.step(index, line)
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextSpan;

    fn line(parts: &[(&str, bool)], y: f32) -> Line {
        Line::from_spans(
            parts
                .iter()
                .map(|(text, bold)| {
                    let font = if *bold { "Arial-Bold" } else { "Arial" };
                    TextSpan::new(text.to_string(), 0.0, y, 10.0, font)
                })
                .collect(),
        )
    }

    fn names(sections: &SectionMap) -> Vec<&str> {
        sections.keys().map(String::as_str).collect()
    }

    fn resume_lines() -> Vec<Line> {
        vec![
            line(&[("JANE DOE", true)], 10.0),
            line(&[("jane@doe.io", false), ("555-123-4567", false)], 22.0),
            line(&[("EXPERIENCE", true)], 40.0),
            line(&[("Acme Corp", true), ("Engineer", false)], 52.0),
            line(&[("Built things", false)], 64.0),
            line(&[("SKILLS", true)], 80.0),
            line(&[("Rust, Go", false)], 92.0),
        ]
    }

    #[test]
    fn test_segment_basic() {
        let sections = segment(&resume_lines(), SectionPolicy::Reset);
        assert_eq!(names(&sections), vec!["PROFILE", "EXPERIENCE", "SKILLS"]);

        let profile = &sections["PROFILE"];
        assert_eq!(
            profile.texts().collect::<Vec<_>>(),
            vec!["JANE DOE", "jane@doe.io", "555-123-4567"]
        );

        let experience = &sections["EXPERIENCE"];
        assert_eq!(experience.len(), 3);
        assert_eq!(experience.y, 64.0);
        assert!(!experience.bold);
    }

    #[test]
    fn test_first_line_is_never_a_title() {
        let sections = segment(&resume_lines()[..1], SectionPolicy::Reset);
        assert_eq!(names(&sections), vec!["PROFILE"]);
        assert_eq!(sections["PROFILE"].len(), 1);
    }

    #[test]
    fn test_second_line_is_never_a_title() {
        let lines = vec![
            line(&[("Jane Doe", false)], 10.0),
            line(&[("SOFTWARE ENGINEER", true)], 22.0),
        ];
        let sections = segment(&lines, SectionPolicy::Reset);
        assert_eq!(names(&sections), vec!["PROFILE"]);
        assert_eq!(sections["PROFILE"].len(), 2);
    }

    #[test]
    fn test_title_test_uses_first_span_only() {
        let lines = vec![
            line(&[("Jane", false)], 10.0),
            line(&[("x", false)], 20.0),
            line(&[("Acme", false), ("EDUCATION", true)], 30.0),
        ];
        let sections = segment(&lines, SectionPolicy::Reset);
        assert_eq!(names(&sections), vec!["PROFILE"]);
    }

    #[test]
    fn test_entry_count_matches_non_title_spans() {
        let lines = resume_lines();
        let sections = segment(&lines, SectionPolicy::Reset);
        let total: usize = sections.values().map(Section::len).sum();
        let titles = [2usize, 5];
        let expected: usize = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| !titles.contains(i))
            .map(|(_, l)| l.len())
            .sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_duplicate_title_resets() {
        let mut lines = resume_lines();
        lines.push(line(&[("EXPERIENCE", true)], 100.0));
        lines.push(line(&[("Second job", false)], 112.0));

        let sections = segment(&lines, SectionPolicy::Reset);
        assert_eq!(names(&sections), vec!["PROFILE", "EXPERIENCE", "SKILLS"]);
        assert_eq!(
            sections["EXPERIENCE"].texts().collect::<Vec<_>>(),
            vec!["Second job"]
        );
    }

    #[test]
    fn test_duplicate_title_appends() {
        let mut lines = resume_lines();
        lines.push(line(&[("EXPERIENCE", true)], 100.0));
        lines.push(line(&[("Second job", false)], 112.0));

        let sections = segment(&lines, SectionPolicy::Append);
        assert_eq!(
            sections["EXPERIENCE"].texts().collect::<Vec<_>>(),
            vec!["Acme Corp", "Engineer", "Built things", "Second job"]
        );
    }

    #[test]
    fn test_empty_lines_yield_empty_profile() {
        let sections = segment(&[Line::default()], SectionPolicy::Reset);
        assert_eq!(names(&sections), vec!["PROFILE"]);
        assert!(sections["PROFILE"].is_empty());

        let sections = segment(&[], SectionPolicy::Reset);
        assert_eq!(names(&sections), vec!["PROFILE"]);
    }

    #[test]
    fn test_segmenter_tracks_current_section() {
        let lines = resume_lines();
        let state = lines
            .iter()
            .take(4)
            .enumerate()
            .fold(Segmenter::new(SectionPolicy::Reset), |s, (i, l)| s.step(i, l));
        assert_eq!(state.current(), "EXPERIENCE");
    }
}
