//! Build a [`Document`] from `pulldown-cmark` events.
//!
//! The event stream is folded into the tree with an explicit frame stack:
//! every start tag pushes a frame, every end tag pops it and hands the
//! finished node to the frame below.

use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, LinkType as CmarkLinkType, Options, Parser,
    Tag, TagEnd,
};

use crate::Document;
use crate::blocks::{
    Block, CodeBlock, ColumnAlignment, ColumnDefinition, HeaderBlock, ListBlock, ListItem,
    ListStyle, ParagraphBlock, QuoteBlock, TableBlock, TableCell, TableRow, YamlHeaderBlock,
};
use crate::inlines::{
    BoldInline, HyperlinkInline, ImageInline, Inline, ItalicInline, LinkType,
    MarkdownLinkInline, StrikethroughInline, SubscriptInline, SuperscriptInline,
};

/// Parser options used by [`parse_document`].
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SUPERSCRIPT
        | Options::ENABLE_SUBSCRIPT
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse Markdown source into a document.
///
/// Raw HTML is dropped. Parsing never fails: anything `pulldown-cmark`
/// accepts produces some document.
#[must_use]
pub fn parse_document(markdown: &str) -> Document {
    let mut builder = DocumentBuilder::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.event(event);
    }
    builder.finish()
}

enum ContainerKind {
    Document,
    Quote,
    Item,
}

enum InlineScope {
    Paragraph,
    /// Paragraph synthesized for text directly inside a tight list item.
    ImplicitParagraph,
    Header(u8),
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
    Link {
        url: String,
        title: String,
        autolink: Option<LinkType>,
    },
    Image {
        url: String,
        title: String,
    },
    Cell,
}

impl InlineScope {
    /// Span-level scopes nest inside a paragraph rather than starting one.
    fn is_span(&self) -> bool {
        !matches!(
            self,
            Self::Paragraph | Self::ImplicitParagraph | Self::Header(_) | Self::Cell
        )
    }
}

enum Frame {
    Container {
        kind: ContainerKind,
        blocks: Vec<Block>,
    },
    Inlines {
        scope: InlineScope,
        inlines: Vec<Inline>,
    },
    List {
        style: ListStyle,
        items: Vec<ListItem>,
    },
    Table {
        columns: Vec<ColumnDefinition>,
        rows: Vec<TableRow>,
        cells: Vec<TableCell>,
    },
    Code {
        language: Option<String>,
        text: String,
    },
    Metadata {
        text: String,
    },
    /// Content that has no place in the model (HTML blocks, footnotes).
    Skip,
}

struct DocumentBuilder {
    stack: Vec<Frame>,
}

impl DocumentBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Container {
                kind: ContainerKind::Document,
                blocks: Vec::new(),
            }],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_inline(Inline::code(code.as_ref())),
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.push_inline(Inline::text(math.as_ref()));
            }
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline(Inline::text("\n")),
            Event::Rule => {
                self.close_implicit_paragraph();
                self.push_block(Block::HorizontalRule);
            }
            Event::TaskListMarker(checked) => {
                self.push_inline(Inline::text(if checked { "[x] " } else { "[ ] " }));
            }
            Event::Html(_) | Event::InlineHtml(_) | Event::FootnoteReference(_) => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                self.close_implicit_paragraph();
                inline_frame(InlineScope::Paragraph)
            }
            Tag::Heading { level, .. } => {
                self.close_implicit_paragraph();
                inline_frame(InlineScope::Header(heading_level(level)))
            }
            Tag::BlockQuote(_) => {
                self.close_implicit_paragraph();
                Frame::Container {
                    kind: ContainerKind::Quote,
                    blocks: Vec::new(),
                }
            }
            Tag::CodeBlock(kind) => {
                self.close_implicit_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                Frame::Code {
                    language,
                    text: String::new(),
                }
            }
            Tag::List(start) => {
                self.close_implicit_paragraph();
                Frame::List {
                    style: start.map_or(ListStyle::Bulleted, |start| ListStyle::Numbered {
                        start,
                    }),
                    items: Vec::new(),
                }
            }
            Tag::Item => Frame::Container {
                kind: ContainerKind::Item,
                blocks: Vec::new(),
            },
            Tag::Table(alignments) => {
                self.close_implicit_paragraph();
                Frame::Table {
                    columns: alignments
                        .into_iter()
                        .map(|alignment| ColumnDefinition {
                            alignment: column_alignment(alignment),
                            max_width: None,
                        })
                        .collect(),
                    rows: Vec::new(),
                    cells: Vec::new(),
                }
            }
            // Rows are flushed on their end tag.
            Tag::TableHead | Tag::TableRow => return,
            Tag::TableCell => inline_frame(InlineScope::Cell),
            Tag::Emphasis => inline_frame(InlineScope::Emphasis),
            Tag::Strong => inline_frame(InlineScope::Strong),
            Tag::Strikethrough => inline_frame(InlineScope::Strikethrough),
            Tag::Superscript => inline_frame(InlineScope::Superscript),
            Tag::Subscript => inline_frame(InlineScope::Subscript),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let autolink = match link_type {
                    CmarkLinkType::Autolink => Some(if dest_url.contains("://") {
                        LinkType::FullUrl
                    } else {
                        LinkType::PartialUrl
                    }),
                    CmarkLinkType::Email => Some(LinkType::Email),
                    _ => None,
                };
                inline_frame(InlineScope::Link {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                    autolink,
                })
            }
            Tag::Image {
                dest_url, title, ..
            } => inline_frame(InlineScope::Image {
                url: dest_url.to_string(),
                title: title.to_string(),
            }),
            Tag::MetadataBlock(_) => Frame::Metadata {
                text: String::new(),
            },
            Tag::HtmlBlock
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {
                self.close_implicit_paragraph();
                Frame::Skip
            }
        };
        if let Frame::Inlines { scope, .. } = &frame
            && scope.is_span()
        {
            self.ensure_inline_scope();
        }
        self.stack.push(frame);
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(Frame::Table { rows, cells, .. }) = self.stack.last_mut() {
                    rows.push(TableRow {
                        cells: std::mem::take(cells),
                    });
                }
                return;
            }
            TagEnd::Item | TagEnd::BlockQuote(_) => self.close_implicit_paragraph(),
            _ => {}
        }

        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Inlines { scope, inlines } => self.finish_inlines(scope, inlines),
            Frame::Container {
                kind: ContainerKind::Quote,
                blocks,
            } => self.push_block(Block::Quote(QuoteBlock { blocks })),
            Frame::Container {
                kind: ContainerKind::Item,
                blocks,
            } => {
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(ListItem { blocks });
                }
            }
            Frame::Container {
                kind: ContainerKind::Document,
                blocks,
            } => {
                // Unbalanced end tag; keep the root in place.
                self.stack.push(Frame::Container {
                    kind: ContainerKind::Document,
                    blocks,
                });
            }
            Frame::List { style, items } => self.push_block(Block::List(ListBlock { style, items })),
            Frame::Table {
                columns,
                mut rows,
                cells,
            } => {
                if !cells.is_empty() {
                    rows.push(TableRow { cells });
                }
                self.push_block(Block::Table(TableBlock { columns, rows }));
            }
            Frame::Code { language, mut text } => {
                if text.ends_with('\n') {
                    text.pop();
                }
                self.push_block(Block::Code(CodeBlock { text, language }));
            }
            Frame::Metadata { text } => {
                if let Some(header) = yaml_header(&text) {
                    self.push_block(Block::YamlHeader(header));
                }
            }
            Frame::Skip => {}
        }
    }

    fn finish_inlines(&mut self, scope: InlineScope, inlines: Vec<Inline>) {
        match scope {
            InlineScope::Paragraph | InlineScope::ImplicitParagraph => {
                self.push_block(Block::Paragraph(ParagraphBlock { inlines }));
            }
            InlineScope::Header(level) => {
                self.push_block(Block::Header(HeaderBlock { level, inlines }));
            }
            InlineScope::Cell => {
                if let Some(Frame::Table { cells, .. }) = self.stack.last_mut() {
                    cells.push(TableCell { inlines });
                }
            }
            InlineScope::Emphasis => self.push_inline(Inline::Italic(ItalicInline { inlines })),
            InlineScope::Strong => self.push_inline(Inline::Bold(BoldInline { inlines })),
            InlineScope::Strikethrough => {
                self.push_inline(Inline::Strikethrough(StrikethroughInline { inlines }));
            }
            InlineScope::Superscript => {
                self.push_inline(Inline::Superscript(SuperscriptInline { inlines }));
            }
            InlineScope::Subscript => {
                self.push_inline(Inline::Subscript(SubscriptInline { inlines }));
            }
            InlineScope::Link {
                url,
                title,
                autolink,
            } => self.push_inline(link_inline(url, title, autolink, inlines)),
            InlineScope::Image { url, title } => {
                let text = inlines.iter().map(Inline::plain_text).collect();
                self.push_inline(Inline::Image(ImageInline {
                    render_url: url.clone(),
                    url,
                    tooltip: non_empty(title),
                    text,
                    image_width: 0,
                    image_height: 0,
                }));
            }
        }
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::Code { text: buffer, .. } | Frame::Metadata { text: buffer }) => {
                buffer.push_str(text);
            }
            Some(Frame::Skip) => {}
            _ => self.push_inline(Inline::text(text)),
        }
    }

    fn soft_break(&mut self) {
        match self.stack.last_mut() {
            Some(Frame::Code { text, .. }) => text.push('\n'),
            _ => self.push_inline(Inline::text(" ")),
        }
    }

    /// Open an implicit paragraph when inline content lands directly in a
    /// block container (tight list items).
    fn ensure_inline_scope(&mut self) {
        if matches!(self.stack.last(), Some(Frame::Container { .. })) {
            self.stack.push(inline_frame(InlineScope::ImplicitParagraph));
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if matches!(
            self.stack.last(),
            Some(Frame::Inlines {
                scope: InlineScope::ImplicitParagraph,
                ..
            })
        ) && let Some(Frame::Inlines { scope, inlines }) = self.stack.pop()
        {
            self.finish_inlines(scope, inlines);
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        self.ensure_inline_scope();
        if let Some(Frame::Inlines { inlines, .. }) = self.stack.last_mut() {
            inlines.push(inline);
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(Frame::Container { blocks, .. }) => blocks.push(block),
            _ => tracing::debug!(kind = %block.kind(), "Dropping block outside a block container"),
        }
    }

    fn finish(mut self) -> Document {
        self.close_implicit_paragraph();
        // Close anything left open by a truncated event stream.
        while self.stack.len() > 1 {
            if let Some(Frame::Inlines { scope, inlines }) = self.stack.pop() {
                self.finish_inlines(scope, inlines);
            }
        }
        match self.stack.pop() {
            Some(Frame::Container { blocks, .. }) => Document::new(blocks),
            _ => Document::default(),
        }
    }
}

fn inline_frame(scope: InlineScope) -> Frame {
    Frame::Inlines {
        scope,
        inlines: Vec::new(),
    }
}

fn link_inline(
    url: String,
    title: String,
    autolink: Option<LinkType>,
    inlines: Vec<Inline>,
) -> Inline {
    if let Some(link_type) = autolink {
        let text = inlines.iter().map(Inline::plain_text).collect();
        return Inline::Hyperlink(HyperlinkInline {
            url,
            text,
            link_type,
        });
    }

    // `[![alt](src)](target)`: a clickable image pointing at the link target.
    if let [Inline::Image(image)] = inlines.as_slice() {
        return Inline::Image(ImageInline {
            url,
            ..image.clone()
        });
    }

    Inline::MarkdownLink(MarkdownLinkInline {
        url,
        tooltip: non_empty(title),
        inlines,
    })
}

fn yaml_header(text: &str) -> Option<YamlHeaderBlock> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_yaml::from_str::<serde_yaml::Mapping>(trimmed) {
        Ok(mapping) => Some(YamlHeaderBlock {
            entries: mapping
                .iter()
                .map(|(key, value)| (yaml_scalar(key), yaml_scalar(value)))
                .collect(),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse YAML front matter");
            None
        }
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn column_alignment(alignment: Alignment) -> ColumnAlignment {
    match alignment {
        Alignment::None => ColumnAlignment::Unspecified,
        Alignment::Left => ColumnAlignment::Left,
        Alignment::Center => ColumnAlignment::Center,
        Alignment::Right => ColumnAlignment::Right,
    }
}
