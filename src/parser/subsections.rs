//! Subsection detection and bullet point merging.

use crate::model::{Section, Subsection};

/// Leading markers that start a new point inside a subsection.
const BULLETS: [char; 3] = ['•', '●', '-'];

/// Split a section's entries wherever the vertical step exceeds
/// `gap_factor * typical_line_gap`.
///
/// The first entry always opens the first subsection; the open subsection
/// is flushed at the end. Steps back up the page (a page break) never split.
pub fn detect_subsections(
    section: &Section,
    typical_line_gap: f32,
    gap_factor: f32,
) -> Vec<Subsection> {
    let threshold = typical_line_gap * gap_factor;
    let mut subsections: Vec<Subsection> = Vec::new();
    let mut current: Subsection = Vec::new();

    for (i, entry) in section.entries.iter().enumerate() {
        let breaks = i > 0 && entry.y - section.entries[i - 1].y > threshold;
        if breaks && !current.is_empty() {
            subsections.push(std::mem::take(&mut current));
        }
        current.push(entry.text.clone());
    }

    if !current.is_empty() {
        subsections.push(current);
    }

    log::debug!(
        "Section {:?}: {} subsections (threshold {:.1})",
        section.name,
        subsections.len(),
        threshold
    );
    subsections
}

/// Merge a subsection's lines into points.
///
/// A line starting with a bullet opens a new point (marker stripped); other
/// lines are joined onto the open point with a space.
pub fn contextualize(lines: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    let mut current_point: Vec<&str> = Vec::new();

    for line in lines {
        match line.strip_prefix(&BULLETS[..]) {
            Some(rest) => {
                if !current_point.is_empty() {
                    merged.push(current_point.join(" "));
                }
                current_point = vec![rest.trim()];
            }
            None => current_point.push(line),
        }
    }

    if !current_point.is_empty() {
        merged.push(current_point.join(" "));
    }

    merged
}
