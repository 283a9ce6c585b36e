//! Fragment and span types.

use serde::{Deserialize, Serialize};

/// One positioned text fragment as produced by the upstream page renderer.
///
/// `bbox` is `[x0, y0, x1, y1]` in page units with Y growing downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Raw text content, before cleanup
    pub text: String,
    /// Bounding box `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
    /// Font size in points
    pub font_size: f32,
    /// Zero-based page index
    #[serde(default)]
    pub page: u32,
}

impl RawFragment {
    /// Create a fragment on the first page.
    pub fn new(
        font_name: impl Into<String>,
        text: impl Into<String>,
        bbox: [f32; 4],
        font_size: f32,
    ) -> Self {
        Self {
            font_name: font_name.into(),
            text: text.into(),
            bbox,
            font_size,
            page: 0,
        }
    }

    /// Move the fragment to another page.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Describe the first geometry problem, if any.
    pub(crate) fn geometry_defect(&self) -> Option<String> {
        if let Some(pos) = self.bbox.iter().position(|v| !v.is_finite()) {
            return Some(format!("non-finite bbox component {}", pos));
        }
        if !self.font_size.is_finite() {
            return Some("non-finite font size".to_string());
        }
        None
    }
}

/// A cleaned text span with position and style information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width of the text
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font appears to be bold
    pub bold: bool,
    /// Whether the next span starts a new visual row
    pub is_last_on_visual_line: bool,
    /// Zero-based page index
    pub page: u32,
}

impl TextSpan {
    /// Create a new text span; boldness is derived from the font name.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: &str) -> Self {
        Self {
            text,
            x,
            y,
            width: 0.0,
            font_size,
            bold: is_bold_font(font_name),
            is_last_on_visual_line: false,
            page: 0,
        }
    }

    /// Set the width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Mark this span as closing its visual line.
    pub fn ending_line(mut self) -> Self {
        self.is_last_on_visual_line = true;
        self
    }

    /// Number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Check whether a font name signals a bold weight.
pub fn is_bold_font(font_name: &str) -> bool {
    font_name.to_lowercase().contains("bold")
}
