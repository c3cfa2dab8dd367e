// Inline span formatting: sub-label extraction, then bold markers

use super::blocks::{InlineSpan, Line};
use super::vocab::Vocabulary;

/// Split one text run into ordered inline spans.
///
/// Sub-labels are extracted first; each remaining plain segment is then
/// scanned for `**`-delimited bold runs. Total: unmatched markers stay
/// literal, no characters are dropped, and at least one span is returned.
pub fn format_line(vocab: &Vocabulary, text: &str) -> Line {
    let mut spans = Vec::new();

    let mut rest = text;
    while let Some((at, label)) = earliest_label(vocab, rest) {
        if at > 0 {
            push_bold_spans(&mut spans, &rest[..at]);
        }
        spans.push(InlineSpan::Label(label.to_string()));
        rest = &rest[at + label.len()..];
    }
    if !rest.is_empty() {
        push_bold_spans(&mut spans, rest);
    }

    if spans.is_empty() {
        spans.push(InlineSpan::Text(String::new()));
    }
    Line { spans }
}

/// Leftmost sub-label occurrence in `text`. The default vocabulary is
/// prefix-free, so one position matches at most one label.
fn earliest_label<'v>(vocab: &'v Vocabulary, text: &str) -> Option<(usize, &'v str)> {
    vocab
        .inline_labels()
        .iter()
        .filter_map(|label| text.find(label.as_str()).map(|at| (at, label.as_str())))
        .min_by_key(|(at, _)| *at)
}

/// Scan a plain segment for `**` pairs; an opener with no closer falls
/// through as literal text.
fn push_bold_spans(spans: &mut Vec<InlineSpan>, text: &str) {
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let Some(close) = rest[open + 2..].find("**") else {
            break;
        };
        if open > 0 {
            spans.push(InlineSpan::Text(rest[..open].to_string()));
        }
        spans.push(InlineSpan::Bold(rest[open + 2..open + 2 + close].to_string()));
        rest = &rest[open + 2 + close + 2..];
    }
    if !rest.is_empty() {
        spans.push(InlineSpan::Text(rest.to_string()));
    }
}
