//! Block renderer contract.

use mdtb_model::{
    Block, CodeBlock, HeaderBlock, ListBlock, ParagraphBlock, QuoteBlock, TableBlock,
    YamlHeaderBlock,
};

use crate::context::RenderContext;
use crate::error::RenderError;

/// Renders block-level nodes.
///
/// Implementations provide one operation per block kind; each appends one
/// element to the block context it is given. Nested blocks (quote content,
/// list items) go back through [`render_blocks`](Self::render_blocks) with
/// a context targeting the nested container.
pub trait BlockRenderer {
    fn render_paragraph(
        &self,
        block: &ParagraphBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    /// Render YAML front matter.
    fn render_yaml_header(
        &self,
        block: &YamlHeaderBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_header(
        &self,
        block: &HeaderBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_list(
        &self,
        block: &ListBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_horizontal_rule(&self, context: &mut RenderContext<'_>) -> Result<(), RenderError>;

    fn render_quote(
        &self,
        block: &QuoteBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_code(
        &self,
        block: &CodeBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    fn render_table(
        &self,
        block: &TableBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError>;

    /// Render `blocks` in order, stopping at the first error.
    fn render_blocks(
        &self,
        blocks: &[Block],
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        for block in blocks {
            self.render_block(block, context)?;
        }
        Ok(())
    }

    /// Dispatch a single block to its operation.
    fn render_block(&self, block: &Block, context: &mut RenderContext<'_>) -> Result<(), RenderError> {
        tracing::trace!(kind = %block.kind(), "Rendering block");
        match block {
            Block::Paragraph(paragraph) => self.render_paragraph(paragraph, context),
            Block::YamlHeader(yaml) => self.render_yaml_header(yaml, context),
            Block::Header(header) => self.render_header(header, context),
            Block::List(list) => self.render_list(list, context),
            Block::HorizontalRule => self.render_horizontal_rule(context),
            Block::Quote(quote) => self.render_quote(quote, context),
            Block::Code(code) => self.render_code(code, context),
            Block::Table(table) => self.render_table(table, context),
        }
    }
}
