//! Fragment cleanup and span construction.

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{RawFragment, TextSpan};

use super::options::{ErrorMode, ParseOptions};

/// Characters rendered as plain spaces before collapsing.
const SPACE_LIKE: [char; 4] = ['\t', '\r', '\u{00A0}', '\u{00AD}'];

/// Replace tab, CR, no-break space and soft hyphen with spaces, collapse
/// whitespace runs and trim.
pub fn normalize(raw: &str) -> String {
    raw.replace(&SPACE_LIKE[..], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when the text has at least one cased letter and none in lowercase.
pub fn is_upper_text(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// True when every word starts with an uppercase letter followed only by
/// lowercase ones ("Jane Doe", not "JANE DOE" or "jane Doe").
pub fn is_title_case(text: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

/// Turns upstream fragments into cleaned, line-flagged spans.
#[derive(Debug, Clone)]
pub struct SpanNormalizer {
    error_mode: ErrorMode,
    normalize_unicode: bool,
    line_break_threshold: f32,
}

impl SpanNormalizer {
    /// Create a normalizer from parse options.
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            error_mode: options.error_mode,
            normalize_unicode: options.normalize_unicode,
            line_break_threshold: options.line_break_threshold,
        }
    }

    /// Clean a raw fragment text.
    pub fn clean(&self, raw: &str) -> String {
        if self.normalize_unicode {
            normalize(&raw.nfc().collect::<String>())
        } else {
            normalize(raw)
        }
    }

    /// Build spans from fragments, dropping empty texts and flagging line ends.
    pub fn spans(&self, fragments: &[RawFragment]) -> Result<Vec<TextSpan>> {
        let mut spans = Vec::with_capacity(fragments.len());

        for (index, fragment) in fragments.iter().enumerate() {
            if let Some(reason) = fragment.geometry_defect() {
                match self.error_mode {
                    ErrorMode::Strict => return Err(Error::MalformedFragment { index, reason }),
                    ErrorMode::Lenient => {
                        log::warn!("Skipping fragment {}: {}", index, reason);
                        continue;
                    }
                }
            }

            let text = self.clean(&fragment.text);
            if text.is_empty() {
                continue;
            }

            let [x0, y0, x1, _] = fragment.bbox;
            let mut span = TextSpan::new(text, x0, y0, fragment.font_size, &fragment.font_name)
                .with_width(x1 - x0);
            span.page = fragment.page;
            spans.push(span);
        }

        mark_line_ends(&mut spans, self.line_break_threshold);
        log::debug!(
            "Normalized {} fragments into {} spans",
            fragments.len(),
            spans.len()
        );
        Ok(spans)
    }
}

/// Flag each span followed by a span lower on the page (by more than
/// `threshold`) or on a later page. The last span is left unflagged.
pub fn mark_line_ends(spans: &mut [TextSpan], threshold: f32) {
    for i in 1..spans.len() {
        let (prev, next) = (&spans[i - 1], &spans[i]);
        let ends = next.page > prev.page || prev.y + threshold < next.y;
        spans[i - 1].is_last_on_visual_line = ends;
    }
}
