//! Concrete renderer producing the visual tree.

mod blocks;
mod inlines;

use std::sync::Arc;

use futures::future::join_all;
use mdtb_model::{Document, Inline, parse_document};

use crate::blocks::BlockRenderer;
use crate::collaborators::{
    CodeBlockResolver, ImageResolver, LinkRegister, NoImages, NoopLinkRegister,
};
use crate::context::{BlockContext, InlineContext, ParentKind, ParentStyle, RenderContext};
use crate::error::RenderError;
use crate::images::{ImageOutcome, ImageTasks};
use crate::inlines::InlineRenderer;
use crate::style::RenderStyle;
use crate::visual::{Element, InlineCollection, Outline};

/// Markdown renderer producing a toolkit-neutral visual tree.
///
/// Collaborators default to no-ops: links are not registered, images stay
/// as their fallback text and code blocks are not highlighted.
///
/// # Example
///
/// ```
/// use mdtb_render::MarkdownRenderer;
///
/// let rendered = MarkdownRenderer::new().render_markdown("Hello *world*").unwrap();
/// assert_eq!(rendered.elements.len(), 1);
/// ```
pub struct MarkdownRenderer {
    style: RenderStyle,
    link_register: Arc<dyn LinkRegister>,
    image_resolver: Arc<dyn ImageResolver>,
    code_block_resolver: Option<Arc<dyn CodeBlockResolver>>,
}

impl MarkdownRenderer {
    /// Create a renderer with the default style and no-op collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self {
            style: RenderStyle::default(),
            link_register: Arc::new(NoopLinkRegister),
            image_resolver: Arc::new(NoImages),
            code_block_resolver: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Register every clickable node with `register`.
    #[must_use]
    pub fn with_link_register(mut self, register: Arc<dyn LinkRegister>) -> Self {
        self.link_register = register;
        self
    }

    /// Resolve images through `resolver`.
    #[must_use]
    pub fn with_image_resolver(mut self, resolver: Arc<dyn ImageResolver>) -> Self {
        self.image_resolver = resolver;
        self
    }

    /// Highlight fenced code blocks through `resolver`.
    #[must_use]
    pub fn with_code_block_resolver(mut self, resolver: Arc<dyn CodeBlockResolver>) -> Self {
        self.code_block_resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Render a document.
    ///
    /// Images are left as placeholders; the returned document carries the
    /// pending resolutions, see [`RenderedDocument::resolve_images`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ContextIncorrect`] if an operation is reached
    /// with a context it cannot work with.
    pub fn render(&self, document: &Document) -> Result<RenderedDocument, RenderError> {
        let images = ImageTasks::new();
        let mut elements = Vec::new();
        {
            let mut block = BlockContext::new(&mut elements, images.clone());
            block.foreground = self.style.foreground;
            let mut context = RenderContext::Block(block);
            self.render_blocks(&document.blocks, &mut context)?;
        }
        tracing::debug!(
            blocks = document.blocks.len(),
            pending_images = images.len(),
            "Rendered document"
        );
        Ok(RenderedDocument { elements, images })
    }

    /// Parse `markdown` and render it.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_markdown(&self, markdown: &str) -> Result<RenderedDocument, RenderError> {
        self.render(&parse_document(markdown))
    }

    /// Parent style of body text.
    fn body_style(&self, kind: ParentKind) -> ParentStyle {
        ParentStyle::new(kind, self.style.font_size, &self.style.font_family)
    }

    /// Render block text content into `target` with a fresh inline context.
    fn render_block_inlines(
        &self,
        inlines: &[Inline],
        target: &InlineCollection,
        parent: ParentStyle,
        block: &BlockContext<'_>,
    ) -> Result<(), RenderError> {
        let mut context = RenderContext::Inline(block.inline(target.clone(), parent));
        self.render_inlines(inlines, &mut context)
    }

    /// Render composite children with `child`, then hand the child's trim
    /// state back to `parent`.
    fn render_children(
        &self,
        inlines: &[Inline],
        child: InlineContext,
        parent: &mut InlineContext,
    ) -> Result<(), RenderError> {
        let mut child = RenderContext::Inline(child);
        self.render_inlines(inlines, &mut child)?;
        if let RenderContext::Inline(child) = child {
            parent.trim_leading_whitespace = child.trim_leading_whitespace;
        }
        Ok(())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of a render pass.
#[derive(Debug)]
pub struct RenderedDocument {
    /// Top-level elements, one per block.
    pub elements: Vec<Element>,
    images: ImageTasks,
}

impl RenderedDocument {
    /// Number of image resolutions not yet driven.
    #[must_use]
    pub fn pending_images(&self) -> usize {
        self.images.len()
    }

    /// Drive every pending image resolution to completion.
    ///
    /// Each completion splices its image into the tree on its own; the
    /// outcomes are returned in queue order. Dropping the document instead
    /// abandons the resolutions.
    pub async fn resolve_images(&self) -> Vec<ImageOutcome> {
        join_all(self.images.take()).await
    }

    /// Indented text outline of the tree, see [`Outline`].
    #[must_use]
    pub fn outline(&self) -> String {
        Outline(&self.elements).to_string()
    }
}
