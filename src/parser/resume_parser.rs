//! The end-to-end resume parser.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Line, LineStatistics, RawFragment, ResumeRecord, TextSpan};

use super::classify::{build_entry, PatternTable, SectionKeywords};
use super::lines::build_lines;
use super::normalize::SpanNormalizer;
use super::options::ParseOptions;
use super::scoring::{score_profile, FeatureRegistry};
use super::sections::{segment, SectionMap};
use super::subsections::detect_subsections;

/// Intermediate layout of one document.
#[derive(Debug, Clone)]
pub struct LayoutAnalysis {
    /// Reconstructed visual lines
    pub lines: Vec<Line>,
    /// Sections by title, in order of first appearance
    pub sections: SectionMap,
    /// Document-wide measurements
    pub statistics: LineStatistics,
}

impl LayoutAnalysis {
    /// All spans in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }

    /// Line gap used for subsection splitting; zero when unmeasurable.
    pub fn line_gap(&self) -> f32 {
        self.statistics.typical_line_gap.unwrap_or(0.0)
    }
}

/// Resume parser: fragments in, [`ResumeRecord`] out.
///
/// A parser holds only configuration, so one instance can parse any number
/// of documents, including from several threads at once.
#[derive(Debug, Clone)]
pub struct ResumeParser {
    options: ParseOptions,
    features: FeatureRegistry,
    keywords: SectionKeywords,
    patterns: PatternTable,
}

impl ResumeParser {
    /// Create a parser with default options and English rules.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options and English rules.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            features: FeatureRegistry::english(),
            keywords: SectionKeywords::english(),
            patterns: PatternTable::english(),
        }
    }

    /// Replace the profile feature registry.
    pub fn with_features(mut self, features: FeatureRegistry) -> Self {
        self.features = features;
        self
    }

    /// Replace the section keywords.
    pub fn with_keywords(mut self, keywords: SectionKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replace the header extraction patterns.
    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = patterns;
        self
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Section keywords in use.
    pub fn keywords(&self) -> &SectionKeywords {
        &self.keywords
    }

    /// Run the layout stages: spans, lines, sections and statistics.
    pub fn analyze(&self, fragments: &[RawFragment]) -> Result<LayoutAnalysis> {
        let spans = SpanNormalizer::new(&self.options).spans(fragments)?;
        let lines = build_lines(spans);
        let statistics = LineStatistics::measure(&lines);
        log::debug!(
            "Line statistics: avg char width {:?}, typical gap {:?}",
            statistics.average_char_width,
            statistics.typical_line_gap
        );

        let sections = segment(&lines, self.options.section_policy);
        log::debug!("Segmented {} sections", sections.len());

        Ok(LayoutAnalysis {
            lines,
            sections,
            statistics,
        })
    }

    /// Parse one document.
    pub fn parse(&self, fragments: &[RawFragment]) -> Result<ResumeRecord> {
        let layout = self.analyze(fragments)?;
        Ok(self.assemble(&layout))
    }

    /// Parse independent documents, in parallel when enabled.
    pub fn parse_batch(&self, documents: &[Vec<RawFragment>]) -> Vec<Result<ResumeRecord>> {
        if self.options.parallel {
            documents.par_iter().map(|doc| self.parse(doc)).collect()
        } else {
            documents.iter().map(|doc| self.parse(doc)).collect()
        }
    }

    /// Build the record from an analyzed layout.
    pub fn assemble(&self, layout: &LayoutAnalysis) -> ResumeRecord {
        let mut record = ResumeRecord::new();
        let gap = layout.line_gap();

        for (name, section) in &layout.sections {
            if section.is_profile() {
                for (attribute, text) in score_profile(&section.entries, &self.features) {
                    record.insert_profile(&attribute, text);
                }
                continue;
            }

            let section_type = self.keywords.classify(name);
            let subsections =
                detect_subsections(section, gap, self.options.subsection_gap_factor);
            log::debug!("Section {:?} classified as {}", name, section_type);

            if section_type.is_listing() {
                record.extend_subsections(section_type, subsections);
            } else {
                let fields = self.patterns.fields(section_type);
                let entries = subsections.iter().map(|s| build_entry(s, fields)).collect();
                record.extend_entries(section_type, entries);
            }
        }

        record
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}
