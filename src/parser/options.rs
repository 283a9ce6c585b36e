//! Parsing options and configuration.

/// Options for parsing a resume.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Minimum downward Y step between spans that ends a visual line
    pub line_break_threshold: f32,

    /// Multiple of the typical line gap that separates subsections
    pub subsection_gap_factor: f32,

    /// What to do when a section title appears twice
    pub section_policy: SectionPolicy,

    /// Apply Unicode NFC normalization before whitespace cleanup
    pub normalize_unicode: bool,

    /// Whether batch parsing uses parallel processing
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip malformed fragments).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the line break threshold.
    pub fn with_line_break_threshold(mut self, threshold: f32) -> Self {
        self.line_break_threshold = threshold;
        self
    }

    /// Set the subsection gap factor.
    pub fn with_subsection_gap_factor(mut self, factor: f32) -> Self {
        self.subsection_gap_factor = factor;
        self
    }

    /// Set the duplicate section policy.
    pub fn with_section_policy(mut self, policy: SectionPolicy) -> Self {
        self.section_policy = policy;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            line_break_threshold: 1.5,
            subsection_gap_factor: 2.0,
            section_policy: SectionPolicy::Reset,
            normalize_unicode: true,
            parallel: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any malformed fragment
    #[default]
    Strict,
    /// Skip malformed fragments and continue
    Lenient,
}

/// Behavior when a section title repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionPolicy {
    /// Discard what was gathered under the name and start over
    #[default]
    Reset,
    /// Keep earlier entries and continue accumulating
    Append,
}
