//! Block-level nodes.

use std::fmt;

use crate::inlines::Inline;

/// A top-level structural unit of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    YamlHeader(YamlHeaderBlock),
    Header(HeaderBlock),
    List(ListBlock),
    HorizontalRule,
    Quote(QuoteBlock),
    Code(CodeBlock),
    Table(TableBlock),
}

impl Block {
    /// Kind tag of this block.
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Paragraph(_) => BlockKind::Paragraph,
            Self::YamlHeader(_) => BlockKind::YamlHeader,
            Self::Header(_) => BlockKind::Header,
            Self::List(_) => BlockKind::List,
            Self::HorizontalRule => BlockKind::HorizontalRule,
            Self::Quote(_) => BlockKind::Quote,
            Self::Code(_) => BlockKind::Code,
            Self::Table(_) => BlockKind::Table,
        }
    }

    /// Convenience constructor for a paragraph.
    #[must_use]
    pub fn paragraph(inlines: Vec<Inline>) -> Self {
        Self::Paragraph(ParagraphBlock { inlines })
    }
}

/// Block kind without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    YamlHeader,
    Header,
    List,
    HorizontalRule,
    Quote,
    Code,
    Table,
}

impl BlockKind {
    /// Stable lowercase name, used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::YamlHeader => "yaml-header",
            Self::Header => "header",
            Self::List => "list",
            Self::HorizontalRule => "horizontal-rule",
            Self::Quote => "quote",
            Self::Code => "code",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphBlock {
    pub inlines: Vec<Inline>,
}

/// YAML front matter, flattened to ordered key/value strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct YamlHeaderBlock {
    pub entries: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderBlock {
    /// Header level, 1 through 6.
    pub level: u8,
    pub inlines: Vec<Inline>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListStyle {
    Bulleted,
    Numbered {
        /// Number of the first item.
        start: u64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListBlock {
    pub style: ListStyle,
    pub items: Vec<ListItem>,
}

/// A list item. Tight items hold a single paragraph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteBlock {
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBlock {
    pub text: String,
    pub language: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnAlignment {
    #[default]
    Unspecified,
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnDefinition {
    pub alignment: ColumnAlignment,
    /// Maximum column width in device-independent pixels, if constrained.
    pub max_width: Option<f64>,
}

/// A table. The first row is the header row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableBlock {
    pub columns: Vec<ColumnDefinition>,
    pub rows: Vec<TableRow>,
}

impl TableBlock {
    /// Number of grid columns needed to hold every row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0)
            .max(self.columns.len())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCell {
    pub inlines: Vec<Inline>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_names() {
        assert_eq!(Block::HorizontalRule.kind().to_string(), "horizontal-rule");
        assert_eq!(Block::paragraph(Vec::new()).kind(), BlockKind::Paragraph);
    }

    #[test]
    fn test_table_column_count_uses_widest_row() {
        let table = TableBlock {
            columns: vec![ColumnDefinition::default(); 2],
            rows: vec![
                TableRow {
                    cells: vec![TableCell::default(); 2],
                },
                TableRow {
                    cells: vec![TableCell::default(); 3],
                },
            ],
        };
        assert_eq!(table.column_count(), 3);
    }
}
