//! Inline (span-level) nodes.

use std::fmt;

/// A span-level unit within a block's text content.
#[derive(Clone, Debug, PartialEq)]
pub enum Inline {
    TextRun(TextRunInline),
    Bold(BoldInline),
    Italic(ItalicInline),
    Strikethrough(StrikethroughInline),
    Superscript(SuperscriptInline),
    Subscript(SubscriptInline),
    Code(CodeInline),
    Emoji(EmojiInline),
    Hyperlink(HyperlinkInline),
    MarkdownLink(MarkdownLinkInline),
    Image(ImageInline),
}

impl Inline {
    /// Plain text run.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::TextRun(TextRunInline { text: text.into() })
    }

    #[must_use]
    pub fn bold(inlines: Vec<Inline>) -> Self {
        Self::Bold(BoldInline { inlines })
    }

    #[must_use]
    pub fn italic(inlines: Vec<Inline>) -> Self {
        Self::Italic(ItalicInline { inlines })
    }

    #[must_use]
    pub fn superscript(inlines: Vec<Inline>) -> Self {
        Self::Superscript(SuperscriptInline { inlines })
    }

    #[must_use]
    pub fn subscript(inlines: Vec<Inline>) -> Self {
        Self::Subscript(SubscriptInline { inlines })
    }

    #[must_use]
    pub fn code(text: impl Into<String>) -> Self {
        Self::Code(CodeInline { text: text.into() })
    }

    /// Kind tag of this inline.
    #[must_use]
    pub fn kind(&self) -> InlineKind {
        match self {
            Self::TextRun(_) => InlineKind::TextRun,
            Self::Bold(_) => InlineKind::Bold,
            Self::Italic(_) => InlineKind::Italic,
            Self::Strikethrough(_) => InlineKind::Strikethrough,
            Self::Superscript(_) => InlineKind::Superscript,
            Self::Subscript(_) => InlineKind::Subscript,
            Self::Code(_) => InlineKind::Code,
            Self::Emoji(_) => InlineKind::Emoji,
            Self::Hyperlink(_) => InlineKind::Hyperlink,
            Self::MarkdownLink(_) => InlineKind::MarkdownLink,
            Self::Image(_) => InlineKind::Image,
        }
    }

    /// Child inlines of a container node, `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Self::Bold(BoldInline { inlines })
            | Self::Italic(ItalicInline { inlines })
            | Self::Strikethrough(StrikethroughInline { inlines })
            | Self::Superscript(SuperscriptInline { inlines })
            | Self::Subscript(SubscriptInline { inlines })
            | Self::MarkdownLink(MarkdownLinkInline { inlines, .. }) => Some(inlines),
            Self::TextRun(_)
            | Self::Code(_)
            | Self::Emoji(_)
            | Self::Hyperlink(_)
            | Self::Image(_) => None,
        }
    }

    /// Text payload of a leaf node, `None` for containers.
    #[must_use]
    pub fn leaf_text(&self) -> Option<&str> {
        match self {
            Self::TextRun(TextRunInline { text })
            | Self::Code(CodeInline { text })
            | Self::Emoji(EmojiInline { text })
            | Self::Hyperlink(HyperlinkInline { text, .. })
            | Self::Image(ImageInline { text, .. }) => Some(text),
            _ => None,
        }
    }

    /// Copy of this node with its children replaced.
    ///
    /// Leaves are returned unchanged and `children` is dropped.
    #[must_use]
    pub fn with_children(&self, children: Vec<Inline>) -> Self {
        match self {
            Self::Bold(_) => Self::bold(children),
            Self::Italic(_) => Self::italic(children),
            Self::Strikethrough(_) => Self::Strikethrough(StrikethroughInline { inlines: children }),
            Self::Superscript(_) => Self::superscript(children),
            Self::Subscript(_) => Self::subscript(children),
            Self::MarkdownLink(link) => Self::MarkdownLink(MarkdownLinkInline {
                url: link.url.clone(),
                tooltip: link.tooltip.clone(),
                inlines: children,
            }),
            leaf => leaf.clone(),
        }
    }

    /// Concatenated leaf text of this node and its descendants.
    #[must_use]
    pub(crate) fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        if let Some(text) = self.leaf_text() {
            out.push_str(text);
        } else if let Some(children) = self.children() {
            for child in children {
                child.push_plain_text(out);
            }
        }
    }
}

/// Inline kind without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InlineKind {
    TextRun,
    Bold,
    Italic,
    Strikethrough,
    Superscript,
    Subscript,
    Code,
    Emoji,
    Hyperlink,
    MarkdownLink,
    Image,
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextRun => "text-run",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Superscript => "superscript",
            Self::Subscript => "subscript",
            Self::Code => "code",
            Self::Emoji => "emoji",
            Self::Hyperlink => "hyperlink",
            Self::MarkdownLink => "markdown-link",
            Self::Image => "image",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextRunInline {
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoldInline {
    pub inlines: Vec<Inline>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItalicInline {
    pub inlines: Vec<Inline>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrikethroughInline {
    pub inlines: Vec<Inline>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuperscriptInline {
    pub inlines: Vec<Inline>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscriptInline {
    pub inlines: Vec<Inline>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeInline {
    pub text: String,
}

/// An emoji. `text` is the literal glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmojiInline {
    pub text: String,
}

/// How a raw hyperlink was written in the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkType {
    /// `<https://example.com>`
    #[default]
    FullUrl,
    /// `www.example.com`
    PartialUrl,
    /// `<someone@example.com>`
    Email,
}

/// A raw (auto) link whose text is the link itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HyperlinkInline {
    pub url: String,
    pub text: String,
    pub link_type: LinkType,
}

/// A `[text](url "tooltip")` link.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkdownLinkInline {
    pub url: String,
    pub tooltip: Option<String>,
    pub inlines: Vec<Inline>,
}

/// An image.
///
/// `render_url` is what gets displayed; `url` is the click target. They
/// differ when the image is wrapped in a link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageInline {
    pub url: String,
    pub render_url: String,
    pub tooltip: Option<String>,
    /// Fallback text shown until (or instead of) the image.
    pub text: String,
    /// Explicit width, 0 when unspecified.
    pub image_width: u32,
    /// Explicit height, 0 when unspecified.
    pub image_height: u32,
}

impl ImageInline {
    /// Whether the image links somewhere other than its own source.
    #[must_use]
    pub fn is_hyperlink_image(&self) -> bool {
        self.render_url != self.url
    }
}

/// Whether `text` is empty or made only of Markdown whitespace.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}
