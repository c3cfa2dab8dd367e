// Recognized-header and sub-label vocabularies
//
// The grouping engine never names a phrase itself: everything that stops a
// bullet run or promotes a line to a header lives here, so new phrases can
// be added without touching the algorithm.

use once_cell::sync::Lazy;
use regex::Regex;

/// `Step N:` section header, matching the whole line only.
static STEP_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Step \d+:$").expect("hard-coded pattern compiles"));

/// Two-part phrase header such as `Look and Feel:`, matching the whole line.
static PAIRED_PHRASE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z-]*(?: [A-Za-z-]+)* and [A-Za-z-]+(?: [A-Za-z-]+)*:$")
        .expect("hard-coded pattern compiles")
});

/// The phrase sets driving block and inline classification. Matching is
/// case-sensitive and anchored; no generalized Markdown heading syntax is
/// recognized.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    block_headers: Vec<String>,
    inline_labels: Vec<String>,
}

impl Vocabulary {
    pub fn new(block_headers: Vec<String>, inline_labels: Vec<String>) -> Self {
        Self {
            block_headers,
            inline_labels,
        }
    }

    /// True when the whole line is a recognized section header: one of the
    /// fixed phrases, `Step N:`, or a "Word(s) and Word(s):" phrase.
    pub fn is_block_header(&self, line: &str) -> bool {
        self.block_headers.iter().any(|header| header == line)
            || STEP_HEADER.is_match(line)
            || PAIRED_PHRASE_HEADER.is_match(line)
    }

    /// Sub-labels recognized inside a text run. Distinct from (partially
    /// overlapping) the block-header set.
    pub fn inline_labels(&self) -> &[String] {
        &self.inline_labels
    }

    /// Register an additional whole-line header phrase.
    pub fn add_block_header(&mut self, phrase: impl Into<String>) {
        self.block_headers.push(phrase.into());
    }

    /// Register an additional inline sub-label.
    pub fn add_inline_label(&mut self, label: impl Into<String>) {
        self.inline_labels.push(label.into());
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let block_headers = [
            "Structure:",
            "Script:",
            "Voiceover:",
            "Tone:",
            "CTA:",
            "Music:",
            "Visuals:",
            "Direction:",
        ]
        .map(String::from)
        .to_vec();

        let inline_labels = [
            "Visual:",
            "Voiceover:",
            "On-screen text:",
            "CTA:",
            "Tone:",
            "Music:",
            "Direction:",
        ]
        .map(String::from)
        .to_vec();

        Self::new(block_headers, inline_labels)
    }
}
