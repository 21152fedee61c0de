//! Markdown block/inline renderer producing a toolkit-neutral visual tree.
//!
//! This crate turns an [`mdtb_model::Document`] into a tree of [`Element`]s
//! (rich text, borders, grids, scroll viewers) whose text content is made of
//! [`InlineNode`]s (runs, spans, hyperlinks, embedded UI containers).
//!
//! # Architecture
//!
//! Rendering is split along two contracts:
//! - [`BlockRenderer`]: one operation per block kind, appending one element
//!   per block to a [`BlockContext`]
//! - [`InlineRenderer`]: one operation per inline kind, appending nodes to
//!   the [`InlineCollection`] of an [`InlineContext`]
//!
//! [`MarkdownRenderer`] implements both. The host plugs in a
//! [`LinkRegister`] for click targets, an [`ImageResolver`] for image data
//! and optionally a [`CodeBlockResolver`] for syntax highlighting.
//!
//! Images are rendered as their fallback text first. Resolution runs later,
//! when the caller drives [`RenderedDocument::resolve_images`]; each
//! resolved image replaces its placeholder in place.
//!
//! # Example
//!
//! ```
//! use mdtb_render::MarkdownRenderer;
//!
//! let rendered = MarkdownRenderer::new()
//!     .render_markdown("Hello **world**!")
//!     .unwrap();
//! assert_eq!(
//!     rendered.outline(),
//!     "RichText\n  Paragraph\n    Run \"Hello \"\n    Span bold\n      Run \"world\"\n    Run \"!\"\n"
//! );
//! ```

mod blocks;
mod collaborators;
mod context;
mod error;
mod images;
mod inlines;
mod renderer;
mod style;
mod superscript;
mod visual;
mod whitespace;

pub use blocks::BlockRenderer;
pub use collaborators::{
    CodeBlockResolver, ImageResolver, LinkCollector, LinkRegister, NoImages, NoopLinkRegister,
    RegisteredLink,
};
pub use context::{BlockContext, InlineContext, ParentKind, ParentStyle, RenderContext};
pub use error::RenderError;
pub use images::{ImageOutcome, ImageTasks};
pub use inlines::InlineRenderer;
pub use renderer::{MarkdownRenderer, RenderedDocument};
pub use style::{
    CodeBlockStyle, DEFAULT_EMOJI_FONT, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, HeaderStyle,
    ImageStyle, InlineCodeStyle, ListLayout, QuoteStyle, RenderStyle, RuleStyle, TableStyle,
};
pub use superscript::{all_text_is_superscript, remove_superscript_runs};
pub use visual::{
    Border, ClickTarget, Color, Element, FontStyle, FontWeight, Grid, GridCell,
    HorizontalAlignment, Hyperlink, ImageElement, ImageSource, InlineCollection, InlineNode,
    InlineOutline, InlineUiContainer, NodeId, Outline, Paragraph, ParseColorError, RichTextBlock,
    Rule, Run, ScaleBox, ScrollMode, ScrollViewer, SpliceError, Span, StackPanel, Stretch,
    TextBlock, Thickness, VerticalAlignment,
};
pub use whitespace::collapse_whitespace;
