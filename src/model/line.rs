//! Visual line types.

use serde::{Deserialize, Serialize};

use super::TextSpan;
use crate::parser::is_upper_text;

/// A visual row of spans, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The spans in this line
    pub spans: Vec<TextSpan>,
}

impl Line {
    /// Create a line from spans.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    /// First span of the line, which carries the line's position.
    pub fn first(&self) -> Option<&TextSpan> {
        self.spans.first()
    }

    /// Y position of the first span.
    pub fn y(&self) -> Option<f32> {
        self.first().map(|s| s.y)
    }

    /// Page of the first span.
    pub fn page(&self) -> Option<u32> {
        self.first().map(|s| s.page)
    }

    /// Combined text of all spans joined by single spaces.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// A line opens a section when its first span is bold and all caps.
    pub fn has_title_lead(&self) -> bool {
        self.first()
            .map(|s| s.bold && is_upper_text(&s.text))
            .unwrap_or(false)
    }
}

/// Document-wide layout measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStatistics {
    /// Mean width per character over non-bold spans
    pub average_char_width: Option<f32>,
    /// Mean vertical distance between consecutive lines on the same page
    pub typical_line_gap: Option<f32>,
}

impl LineStatistics {
    /// Measure a document from its lines.
    pub fn measure(lines: &[Line]) -> Self {
        Self {
            average_char_width: average_char_width(lines.iter().flat_map(|l| l.spans.iter())),
            typical_line_gap: typical_line_gap(lines),
        }
    }
}

/// Sum of non-bold widths over their character count, `None` without body text.
pub fn average_char_width<'a, I>(spans: I) -> Option<f32>
where
    I: IntoIterator<Item = &'a TextSpan>,
{
    let (width, chars) = spans
        .into_iter()
        .filter(|s| !s.bold)
        .fold((0.0f32, 0usize), |(w, c), s| (w + s.width, c + s.char_count()));

    if chars == 0 {
        return None;
    }
    Some(width / chars as f32)
}

/// Mean gap between the first spans of consecutive lines.
///
/// The sum is divided by the number of measured pairs, not by the number of
/// lines, so three lines at 10, 20 and 40 give 15. Pairs that straddle a page
/// break are skipped since each page restarts its coordinates, and a negative
/// cross-page step would drag the mean down. `None` when no pair remains.
pub fn typical_line_gap(lines: &[Line]) -> Option<f32> {
    let gaps: Vec<f32> = lines
        .windows(2)
        .filter_map(|w| match (w[0].first(), w[1].first()) {
            (Some(a), Some(b)) if a.page == b.page => Some(b.y - a.y),
            _ => None,
        })
        .collect();

    if gaps.is_empty() {
        return None;
    }
    Some(gaps.iter().sum::<f32>() / gaps.len() as f32)
}
