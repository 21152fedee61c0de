//! Markdown document model.
//!
//! A [`Document`] is an ordered sequence of [`Block`]s. Blocks with text
//! content carry ordered sequences of [`Inline`]s, which nest (bold inside a
//! link inside a table cell, and so on). The tree is built once, usually by
//! [`parse_document`], and is read-only afterwards.
//!
//! # Example
//!
//! ```
//! use mdtb_model::{Block, Inline, parse_document};
//!
//! let document = parse_document("Hello **world**!");
//! let Block::Paragraph(paragraph) = &document.blocks[0] else {
//!     panic!("expected a paragraph");
//! };
//! assert!(matches!(paragraph.inlines[1], Inline::Bold(_)));
//! ```

mod blocks;
mod cmark;
mod inlines;

pub use blocks::{
    Block, BlockKind, CodeBlock, ColumnAlignment, ColumnDefinition, HeaderBlock, ListBlock,
    ListItem, ListStyle, ParagraphBlock, QuoteBlock, TableBlock, TableCell, TableRow,
    YamlHeaderBlock,
};
pub use cmark::{parse_document, parser_options};
pub use inlines::{
    BoldInline, CodeInline, EmojiInline, HyperlinkInline, ImageInline, Inline, InlineKind,
    ItalicInline, LinkType, MarkdownLinkInline, StrikethroughInline, SubscriptInline,
    SuperscriptInline, TextRunInline, is_blank,
};

/// A parsed Markdown document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Top-level blocks in source order.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a document from its blocks.
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}
