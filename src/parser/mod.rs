//! Resume parsing stages.
//!
//! Fragments flow through normalization, line building, section
//! segmentation, subsection detection and finally profile scoring or
//! section-type extraction, all driven by [`ResumeParser`].

mod classify;
mod lines;
mod normalize;
mod options;
mod resume_parser;
mod scoring;
mod sections;
mod subsections;

pub use classify::{
    build_entry, extract_fields, FieldPattern, FieldPatternSpec, PatternTable, SectionKeywords,
};
pub use lines::build_lines;
pub use normalize::{is_title_case, is_upper_text, mark_line_ends, normalize, SpanNormalizer};
pub use options::{ErrorMode, ParseOptions, SectionPolicy};
pub use resume_parser::{LayoutAnalysis, ResumeParser};
pub use scoring::{
    score_profile, FeatureRegistry, FeatureRule, FeatureSet, Predicate, PredicateSpec, RuleOutcome,
};
pub use sections::{segment, SectionMap, Segmenter};
pub use subsections::{contextualize, detect_subsections};
