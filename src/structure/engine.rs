// Reply structuring: paragraph segmentation, line classification, block grouping
//
// Staged pipeline over the raw reply: split on blank-line runs, classify
// each physical line top-down (header before anything else, then ordered
// marker, then bullet, then text), and fold the classified stream into
// blocks with a small grouping state machine. Inline formatting runs once
// per surviving text run.

use once_cell::sync::Lazy;
use regex::Regex;

use super::blocks::{Block, Document, InlineSpan, Line, ListItem};
use super::inline::format_line;
use super::vocab::Vocabulary;

/// Two or more consecutive newlines end a paragraph.
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("hard-coded pattern compiles"));

/// Structure a reply with the default vocabulary.
pub fn structure(raw: &str) -> Document {
    Structurer::default().structure(raw)
}

/// Converts raw reply text into a structured [`Document`].
#[derive(Debug, Clone)]
pub struct Structurer {
    vocab: Vocabulary,
}

impl Default for Structurer {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

impl Structurer {
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Pure and deterministic; never fails. Input that matches nothing
    /// structural comes back as one verbatim paragraph line.
    pub fn structure(&self, raw: &str) -> Document {
        let mut blocks = Vec::new();
        for chunk in PARAGRAPH_BREAK.split(raw) {
            self.structure_chunk(chunk, &mut blocks);
        }

        if blocks.is_empty() && !raw.is_empty() {
            blocks.push(Block::Paragraph {
                lines: vec![Line {
                    spans: vec![InlineSpan::Text(raw.to_string())],
                }],
            });
        }
        Document { blocks }
    }

    /// Fold one paragraph candidate into blocks. At any point at most one
    /// of `paragraph`/`bullets` is accumulating.
    fn structure_chunk(&self, chunk: &str, blocks: &mut Vec<Block>) {
        let mut paragraph: Vec<Line> = Vec::new();
        let mut bullets: Vec<ListItem> = Vec::new();

        for raw_line in chunk.lines() {
            match self.classify(raw_line) {
                LineClass::Blank => {}
                LineClass::Header(text) => {
                    flush_paragraph(&mut paragraph, blocks);
                    flush_bullets(&mut bullets, blocks);
                    blocks.push(Block::Header {
                        text: text.to_string(),
                    });
                }
                LineClass::Ordered { number, rest } => {
                    flush_paragraph(&mut paragraph, blocks);
                    flush_bullets(&mut bullets, blocks);
                    blocks.push(Block::OrderedItem {
                        number,
                        spans: format_line(&self.vocab, rest),
                    });
                }
                LineClass::Bullet(rest) => {
                    flush_paragraph(&mut paragraph, blocks);
                    bullets.push(ListItem {
                        lines: vec![format_line(&self.vocab, rest)],
                    });
                }
                LineClass::Text(text) => {
                    if let Some(item) = bullets.last_mut() {
                        // plain line directly under a bullet continues it
                        item.lines.push(format_line(&self.vocab, text));
                    } else {
                        paragraph.push(format_line(&self.vocab, text));
                    }
                }
            }
        }

        flush_paragraph(&mut paragraph, blocks);
        flush_bullets(&mut bullets, blocks);
    }

    /// Top-down per-line classification. Header wins over everything,
    /// including the bullet-continuation test; ordered markers win over
    /// bullets.
    fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineClass::Blank;
        }
        if self.vocab.is_block_header(trimmed) {
            return LineClass::Header(trimmed);
        }
        if let Some((number, rest)) = split_ordered_marker(trimmed) {
            return LineClass::Ordered { number, rest };
        }
        if let Some(rest) = trimmed.strip_prefix("- ") {
            return LineClass::Bullet(rest);
        }
        LineClass::Text(trimmed)
    }
}

#[derive(Debug)]
enum LineClass<'a> {
    Blank,
    Header(&'a str),
    Ordered { number: u32, rest: &'a str },
    Bullet(&'a str),
    Text(&'a str),
}

/// `digits "." space` at the start of the line.
fn split_ordered_marker(line: &str) -> Option<(u32, &str)> {
    let dot = line.find(". ")?;
    if dot == 0 || !line[..dot].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number = line[..dot].parse().ok()?;
    Some((number, &line[dot + 2..]))
}

fn flush_paragraph(lines: &mut Vec<Line>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        blocks.push(Block::Paragraph {
            lines: std::mem::take(lines),
        });
    }
}

fn flush_bullets(items: &mut Vec<ListItem>, blocks: &mut Vec<Block>) {
    if !items.is_empty() {
        blocks.push(Block::BulletList {
            items: std::mem::take(items),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Line {
        Line {
            spans: vec![InlineSpan::Text(text.to_string())],
        }
    }

    #[test]
    fn plain_prose_is_one_paragraph() {
        let doc = structure("Tell me more about your business.");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                lines: vec![plain("Tell me more about your business.")]
            }]
        );
    }

    #[test]
    fn blank_runs_split_paragraphs() {
        let doc = structure("First thought.\n\nSecond thought.\n\n\nThird.");
        assert_eq!(doc.blocks.len(), 3);
        for block in &doc.blocks {
            assert!(matches!(block, Block::Paragraph { lines } if lines.len() == 1));
        }
    }

    #[test]
    fn single_newline_becomes_in_block_line_break() {
        let doc = structure("line one\nline two");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                lines: vec![plain("line one"), plain("line two")]
            }]
        );
    }

    #[test]
    fn full_line_header_is_promoted() {
        let doc = structure("Tone:");
        assert_eq!(
            doc.blocks,
            vec![Block::Header {
                text: "Tone:".to_string()
            }]
        );
    }

    #[test]
    fn header_inside_paragraph_splits_it() {
        let doc = structure("intro line\nScript:\nclosing line");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph {
                    lines: vec![plain("intro line")]
                },
                Block::Header {
                    text: "Script:".to_string()
                },
                Block::Paragraph {
                    lines: vec![plain("closing line")]
                },
            ]
        );
    }

    #[test]
    fn step_header_line() {
        let doc = structure("Step 2:");
        assert_eq!(
            doc.blocks,
            vec![Block::Header {
                text: "Step 2:".to_string()
            }]
        );
    }

    #[test]
    fn header_with_trailing_content_is_not_a_header() {
        let doc = structure("Tone: upbeat and warm");
        match &doc.blocks[0] {
            Block::Paragraph { lines } => {
                // still gets its inline label
                assert_eq!(
                    lines[0].spans[0],
                    InlineSpan::Label("Tone:".to_string())
                );
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn ordered_items_stay_separate_blocks() {
        let doc = structure("1. Open on logo\n2. Cut to product");
        assert_eq!(
            doc.blocks,
            vec![
                Block::OrderedItem {
                    number: 1,
                    spans: plain("Open on logo"),
                },
                Block::OrderedItem {
                    number: 2,
                    spans: plain("Cut to product"),
                },
            ]
        );
    }

    #[test]
    fn ordered_marker_requires_digits() {
        let doc = structure("a. not a list");
        assert!(matches!(doc.blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn bullet_run_groups_into_one_list() {
        let doc = structure("- first\n- second\n- third");
        match &doc.blocks[..] {
            [Block::BulletList { items }] => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[1].lines, vec![plain("second")]);
            }
            other => panic!("expected one bullet list, got {other:?}"),
        }
    }

    #[test]
    fn continuation_line_folds_into_bullet() {
        let doc = structure("- Visual: wide shot\n  more detail\n- Voiceover: line two");
        match &doc.blocks[..] {
            [Block::BulletList { items }] => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].lines.len(), 2);
                assert_eq!(
                    items[0].lines[0].spans[0],
                    InlineSpan::Label("Visual:".to_string())
                );
                assert_eq!(items[0].lines[1], plain("more detail"));
                assert_eq!(
                    items[1].lines[0].spans[0],
                    InlineSpan::Label("Voiceover:".to_string())
                );
            }
            other => panic!("expected one bullet list, got {other:?}"),
        }
    }

    #[test]
    fn header_stops_a_bullet_run() {
        let doc = structure("- first\nMusic:\nafterword");
        assert_eq!(
            doc.blocks,
            vec![
                Block::BulletList {
                    items: vec![ListItem {
                        lines: vec![plain("first")]
                    }]
                },
                Block::Header {
                    text: "Music:".to_string()
                },
                Block::Paragraph {
                    lines: vec![plain("afterword")]
                },
            ]
        );
    }

    #[test]
    fn ordered_marker_stops_a_bullet_run() {
        let doc = structure("- first\n1. then a step");
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(doc.blocks[0], Block::BulletList { .. }));
        assert!(matches!(doc.blocks[1], Block::OrderedItem { number: 1, .. }));
    }

    #[test]
    fn bold_survives_structuring() {
        let doc = structure("**Script:** Hello");
        match &doc.blocks[0] {
            Block::Paragraph { lines } => {
                assert_eq!(
                    lines[0].spans,
                    vec![
                        InlineSpan::Bold("Script:".to_string()),
                        InlineSpan::Text(" Hello".to_string()),
                    ]
                );
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn structure_is_idempotent_on_same_input() {
        let raw = "Structure:\n\n1. Hook\n2. Offer\n\n- Visual: logo\n  slow zoom\n- CTA: visit today\n\n**bold** close";
        assert_eq!(structure(raw), structure(raw));
    }

    #[test]
    fn non_empty_input_never_yields_empty_document() {
        for raw in ["x", " ", "\n", "   \n   ", "\n\n\n"] {
            let doc = structure(raw);
            assert!(!doc.is_empty(), "empty document for {raw:?}");
        }
    }

    #[test]
    fn whitespace_only_input_falls_back_verbatim() {
        let doc = structure("   ");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                lines: vec![plain("   ")]
            }]
        );
    }

    #[test]
    fn empty_input_yields_empty_document() {
        assert!(structure("").is_empty());
    }

    #[test]
    fn representative_reply() {
        let raw = "Here's a concept for your coffee shop ad.\n\n\
                   Structure:\n\n\
                   1. Open on a steaming cup\n\
                   2. Cut to the counter\n\n\
                   - Visual: morning light through the window\n\
                     warm and slow\n\
                   - Voiceover: Your day starts here\n\
                   - On-screen text: Open at 6am\n\n\
                   Tone:\n\n\
                   Warm, **inviting**, local.";
        let doc = structure(raw);
        let kinds: Vec<&str> = doc
            .blocks
            .iter()
            .map(|b| match b {
                Block::Paragraph { .. } => "para",
                Block::Header { .. } => "header",
                Block::OrderedItem { .. } => "ordered",
                Block::BulletList { .. } => "bullets",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["para", "header", "ordered", "ordered", "bullets", "header", "para"]
        );

        match &doc.blocks[4] {
            Block::BulletList { items } => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0].lines.len(), 2);
            }
            other => panic!("expected bullet list, got {other:?}"),
        }
    }
}
