//! Visual line reconstruction.

use crate::model::{Line, TextSpan};

/// Group spans into visual lines without reordering them.
///
/// A line closes at every span flagged `is_last_on_visual_line`; whatever
/// remains at the end of the stream becomes the final line. An empty input
/// yields a single empty line, which downstream stages treat as no content.
pub fn build_lines(spans: Vec<TextSpan>) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current_line_spans: Vec<TextSpan> = Vec::new();

    for span in spans {
        let ends_line = span.is_last_on_visual_line;
        current_line_spans.push(span);
        if ends_line {
            lines.push(Line::from_spans(std::mem::take(&mut current_line_spans)));
        }
    }

    // Flush the open line
    if !current_line_spans.is_empty() || lines.is_empty() {
        lines.push(Line::from_spans(current_line_spans));
    }

    log::debug!("Built {} lines", lines.len());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, ends: bool) -> TextSpan {
        let span = TextSpan::new(text.to_string(), 0.0, 0.0, 10.0, "Arial");
        if ends {
            span.ending_line()
        } else {
            span
        }
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn test_build_lines_splits_on_flags() {
        let lines = build_lines(vec![
            span("Jane", false),
            span("Doe", true),
            span("jane@doe.io", true),
            span("Boston, MA", false),
        ]);
        assert_eq!(texts(&lines), vec!["Jane Doe", "jane@doe.io", "Boston, MA"]);
    }

    #[test]
    fn test_build_lines_empty_input() {
        let lines = build_lines(Vec::new());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn test_build_lines_no_trailing_empty_line() {
        let lines = build_lines(vec![span("a", true), span("b", true)]);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn test_build_lines_keeps_every_span_in_order() {
        let input: Vec<TextSpan> = (0..10).map(|i| span(&i.to_string(), i % 3 == 2)).collect();
        let lines = build_lines(input.clone());
        let flattened: Vec<TextSpan> = lines.into_iter().flat_map(|l| l.spans).collect();
        assert_eq!(flattened, input);
    }
}
