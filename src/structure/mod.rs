// Reply structuring module
// Converts raw assistant text into a block/inline document for rendering

mod blocks;
mod engine;
mod inline;
mod vocab;

pub use blocks::{Block, Document, InlineSpan, Line, ListItem};
pub use engine::{structure, Structurer};
pub use inline::format_line;
pub use vocab::Vocabulary;
