//! Inline renderer contract.

use mdtb_model::{
    BoldInline, CodeInline, EmojiInline, HyperlinkInline, ImageInline, Inline, ItalicInline,
    MarkdownLinkInline, StrikethroughInline, SubscriptInline, SuperscriptInline, TextRunInline,
};

use crate::context::RenderContext;
use crate::error::RenderError;

/// Renders span-level nodes.
///
/// Every operation requires an inline context and fails with
/// [`RenderError::ContextIncorrect`] when handed a block context.
pub trait InlineRenderer {
    fn render_text_run(
        &self,
        inline: &TextRunInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_emoji(
        &self,
        inline: &EmojiInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_bold(
        &self,
        inline: &BoldInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_italic(
        &self,
        inline: &ItalicInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_strikethrough(
        &self,
        inline: &StrikethroughInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_superscript(
        &self,
        inline: &SuperscriptInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_subscript(
        &self,
        inline: &SubscriptInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_code(
        &self,
        inline: &CodeInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    /// Render a raw (auto) link.
    fn render_hyperlink(
        &self,
        inline: &HyperlinkInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    /// Render a `[text](url)` link.
    fn render_markdown_link(
        &self,
        inline: &MarkdownLinkInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_image(
        &self,
        inline: &ImageInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    /// Render `inlines` in order into the current collection.
    fn render_inlines(
        &self,
        inlines: &[Inline],
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        for inline in inlines {
            self.render_inline(inline, context)?;
        }
        Ok(())
    }

    /// Dispatch a single inline to its operation.
    fn render_inline(
        &self,
        inline: &Inline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        tracing::trace!(kind = %inline.kind(), "Rendering inline");
        match inline {
            Inline::TextRun(run) => self.render_text_run(run, context),
            Inline::Bold(bold) => self.render_bold(bold, context),
            Inline::Italic(italic) => self.render_italic(italic, context),
            Inline::Strikethrough(strike) => self.render_strikethrough(strike, context),
            Inline::Superscript(sup) => self.render_superscript(sup, context),
            Inline::Subscript(sub) => self.render_subscript(sub, context),
            Inline::Code(code) => InlineRenderer::render_code(self, code, context),
            Inline::Emoji(emoji) => self.render_emoji(emoji, context),
            Inline::Hyperlink(link) => self.render_hyperlink(link, context),
            Inline::MarkdownLink(link) => self.render_markdown_link(link, context),
            Inline::Image(image) => self.render_image(image, context),
        }
    }
}
