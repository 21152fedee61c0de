use mdtb_model::{
    CodeBlock, ColumnAlignment, HeaderBlock, ListBlock, ListStyle, ParagraphBlock, QuoteBlock,
    TableBlock, YamlHeaderBlock,
};

use super::MarkdownRenderer;
use crate::blocks::BlockRenderer;
use crate::context::{ParentKind, RenderContext};
use crate::error::RenderError;
use crate::visual::{
    Border, Element, FontWeight, Grid, GridCell, HorizontalAlignment, InlineNode, Paragraph,
    RichTextBlock, Rule, Run, ScrollMode, ScrollViewer, StackPanel, TextBlock, Thickness,
};

const BULLET: &str = "•";

impl BlockRenderer for MarkdownRenderer {
    fn render_paragraph(
        &self,
        block: &ParagraphBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_paragraph")?;

        let mut paragraph = Paragraph::new();
        paragraph.margin = self.style.paragraph_margin;
        if context.override_foreground {
            paragraph.foreground = context.foreground;
        }

        let parent = self.body_style(ParentKind::Paragraph);
        self.render_block_inlines(&block.inlines, &paragraph.inlines, parent, context)?;

        context.push(Element::RichText(RichTextBlock::new(vec![paragraph])));
        Ok(())
    }

    fn render_yaml_header(
        &self,
        block: &YamlHeaderBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_yaml_header")?;
        if block.entries.is_empty() {
            return Ok(());
        }

        // Keys on the first row, values below them.
        let mut grid = Grid::new(2, block.entries.len());
        grid.border_thickness = self.style.table.border_thickness;
        grid.border_brush = self.style.table.border_brush;
        for (column, (key, value)) in block.entries.iter().enumerate() {
            grid.place(0, column, self.table_text(key, Some(FontWeight::Bold)));
            grid.place(1, column, self.table_text(value, None));
        }

        let mut scroll = ScrollViewer::new(Element::Grid(grid));
        scroll.horizontal_scroll = ScrollMode::Auto;
        scroll.margin = self.style.table.margin;
        context.push(Element::Scroll(Box::new(scroll)));
        Ok(())
    }

    fn render_header(
        &self,
        block: &HeaderBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_header")?;
        let headers = &self.style.headers;

        let weight = if block.level <= 2 {
            FontWeight::Bold
        } else {
            FontWeight::SemiBold
        };
        let font_size = headers.font_size(block.level);

        let mut paragraph = Paragraph::new();
        paragraph.font_size = Some(font_size);
        paragraph.font_weight = Some(weight);
        paragraph.margin = headers.margin(block.level);
        paragraph.foreground = if context.override_foreground {
            context.foreground
        } else {
            headers.foreground
        };

        let mut parent = self.body_style(ParentKind::Paragraph).with_weight(weight);
        parent.font_size = font_size;
        self.render_block_inlines(&block.inlines, &paragraph.inlines, parent, context)?;

        context.push(Element::RichText(RichTextBlock::new(vec![paragraph])));
        Ok(())
    }

    fn render_list(
        &self,
        block: &ListBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_list")?;

        let mut grid = Grid::new(block.items.len(), 2);
        grid.column_widths[0] = Some(self.style.list.gutter_width);
        grid.margin = self.style.list.margin;

        for (row, item) in block.items.iter().enumerate() {
            let marker = match block.style {
                ListStyle::Bulleted => BULLET.to_owned(),
                ListStyle::Numbered { start } => format!("{}.", start.saturating_add(row as u64)),
            };
            let bullet = TextBlock::new();
            bullet.inlines.push(InlineNode::Run(Run::new(marker)));
            grid.place(row, 0, Element::TextBlock(bullet));

            let mut children = Vec::new();
            {
                let mut nested = RenderContext::Block(context.nested(&mut children));
                self.render_blocks(&item.blocks, &mut nested)?;
            }
            grid.place(row, 1, Element::Stack(StackPanel::new(children)));
        }

        context.push(Element::Grid(grid));
        Ok(())
    }

    fn render_horizontal_rule(&self, context: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_horizontal_rule")?;
        let mut rule = Rule::new(self.style.rule.thickness);
        rule.foreground = self.style.rule.foreground.or(context.foreground);
        rule.margin = self.style.rule.margin;
        context.push(Element::Rule(rule));
        Ok(())
    }

    fn render_quote(
        &self,
        block: &QuoteBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_quote")?;
        let quote = &self.style.quote;

        let mut children = Vec::new();
        {
            let mut nested = context.nested(&mut children);
            if let Some(foreground) = quote.foreground
                && !nested.override_foreground
            {
                nested.foreground = Some(foreground);
                nested.override_foreground = true;
            }
            self.render_blocks(&block.blocks, &mut RenderContext::Block(nested))?;
        }

        let mut border = Border::new(Element::Stack(StackPanel::new(children)));
        border.border_thickness = Thickness::new(quote.border_width, 0.0, 0.0, 0.0);
        border.border_brush = quote.border_brush;
        border.padding = quote.padding;
        border.margin = quote.margin;
        context.push(Element::Border(Box::new(border)));
        Ok(())
    }

    fn render_code(
        &self,
        block: &CodeBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_code")?;
        let code = &self.style.code_block;

        let mut text = TextBlock::new();
        text.font_family = Some(self.style.code_block_font().to_owned());
        text.foreground = code.foreground.or(context.foreground);

        let highlighted = self.code_block_resolver.as_ref().is_some_and(|resolver| {
            resolver.parse_syntax(&text.inlines, &block.text, block.language.as_deref())
        });
        if !highlighted {
            text.inlines.push(InlineNode::Run(Run::new(block.text.as_str())));
        }

        let mut scroll = ScrollViewer::new(Element::TextBlock(text));
        scroll.horizontal_scroll = ScrollMode::Auto;

        let mut border = Border::new(Element::Scroll(Box::new(scroll)));
        border.background = code.background;
        border.border_brush = code.border_brush;
        border.border_thickness = code.border_thickness;
        border.padding = code.padding;
        border.margin = code.margin;
        context.push(Element::Border(Box::new(border)));
        Ok(())
    }

    fn render_table(
        &self,
        block: &TableBlock,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_block_mut("render_table")?;
        let table = &self.style.table;

        let mut grid = Grid::new(block.rows.len(), block.column_count());
        grid.border_thickness = table.border_thickness;
        grid.border_brush = table.border_brush;
        grid.margin = table.margin;
        for (width, column) in grid.column_widths.iter_mut().zip(&block.columns) {
            *width = column.max_width;
        }

        for (row_index, row) in block.rows.iter().enumerate() {
            let header = row_index == 0;
            for (column, cell) in row.cells.iter().enumerate() {
                let mut paragraph = Paragraph::new();
                let mut parent = self.body_style(ParentKind::Paragraph);
                if header {
                    paragraph.font_weight = Some(FontWeight::Bold);
                    parent = parent.with_weight(FontWeight::Bold);
                }
                if context.override_foreground {
                    paragraph.foreground = context.foreground;
                }
                self.render_block_inlines(&cell.inlines, &paragraph.inlines, parent, context)?;

                let mut padded = Border::new(Element::RichText(RichTextBlock::new(vec![paragraph])));
                padded.padding = table.cell_padding;
                let alignment = block
                    .columns
                    .get(column)
                    .map_or(HorizontalAlignment::Left, |definition| {
                        cell_alignment(definition.alignment)
                    });
                grid.cells.push(GridCell {
                    row: row_index,
                    column,
                    alignment,
                    child: Element::Border(Box::new(padded)),
                });
            }
        }

        context.push(Element::Grid(grid));
        Ok(())
    }
}

impl MarkdownRenderer {
    fn table_text(&self, text: &str, weight: Option<FontWeight>) -> Element {
        let mut block = TextBlock::new();
        block.font_weight = weight;
        block.foreground = self.style.foreground;
        block.inlines.push(InlineNode::Run(Run::new(text)));
        let mut padded = Border::new(Element::TextBlock(block));
        padded.padding = self.style.table.cell_padding;
        Element::Border(Box::new(padded))
    }
}

fn cell_alignment(alignment: ColumnAlignment) -> HorizontalAlignment {
    match alignment {
        ColumnAlignment::Unspecified | ColumnAlignment::Left => HorizontalAlignment::Left,
        ColumnAlignment::Center => HorizontalAlignment::Center,
        ColumnAlignment::Right => HorizontalAlignment::Right,
    }
}

#[cfg(test)]
mod tests {
    use mdtb_model::{Block, Document, Inline, ListItem};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::style::RenderStyle;
    use crate::visual::{Color, Outline};

    fn render(blocks: Vec<Block>) -> Vec<Element> {
        MarkdownRenderer::new()
            .render(&Document::new(blocks))
            .unwrap()
            .elements
    }

    fn outline(blocks: Vec<Block>) -> String {
        Outline(&render(blocks)).to_string()
    }

    #[test]
    fn test_paragraph_trims_leading_whitespace() {
        assert_eq!(
            outline(vec![Block::paragraph(vec![Inline::text("  a  b")])]),
            "RichText\n  Paragraph\n    Run \"a b\"\n"
        );
    }

    #[test]
    fn test_header_size_and_weight_by_level() {
        let header = |level| {
            Block::Header(HeaderBlock {
                level,
                inlines: vec![Inline::text("T")],
            })
        };
        assert_eq!(
            outline(vec![header(1), header(3)]),
            "RichText\n  Paragraph size=24.0 bold\n    Run \"T\"\n\
             RichText\n  Paragraph size=17.0 semibold\n    Run \"T\"\n"
        );
    }

    #[test]
    fn test_numbered_list_counts_from_start() {
        let item = |text: &str| ListItem {
            blocks: vec![Block::paragraph(vec![Inline::text(text)])],
        };
        let elements = render(vec![Block::List(ListBlock {
            style: ListStyle::Numbered { start: 3 },
            items: vec![item("a"), item("b")],
        })]);
        assert_eq!(
            Outline(&elements).to_string(),
            "Grid 2x2\n\
             \x20 Cell 0,0\n    TextBlock\n      Run \"3.\"\n\
             \x20 Cell 0,1\n    Stack\n      RichText\n        Paragraph\n          Run \"a\"\n\
             \x20 Cell 1,0\n    TextBlock\n      Run \"4.\"\n\
             \x20 Cell 1,1\n    Stack\n      RichText\n        Paragraph\n          Run \"b\"\n"
        );
    }

    #[test]
    fn test_bulleted_list_marker() {
        let elements = render(vec![Block::List(ListBlock {
            style: ListStyle::Bulleted,
            items: vec![ListItem::default()],
        })]);
        let Element::Grid(grid) = &elements[0] else {
            panic!("expected a grid");
        };
        let Element::TextBlock(bullet) = &grid.cells[0].child else {
            panic!("expected a bullet text block");
        };
        let InlineNode::Run(run) = &bullet.inlines.snapshot()[0] else {
            panic!("expected a run");
        };
        assert_eq!(run.text, "•");
    }

    #[test]
    fn test_quote_overrides_foreground() {
        let mut style = RenderStyle::default();
        style.quote.foreground = Some(Color::rgb(0x80, 0x80, 0x80));
        let rendered = MarkdownRenderer::new()
            .with_style(style)
            .render(&Document::new(vec![Block::Quote(QuoteBlock {
                blocks: vec![Block::paragraph(vec![Inline::text("q")])],
            })]))
            .unwrap();
        assert_eq!(
            rendered.outline(),
            "Border padding=12.0,0.0,0.0,0.0 margin=7.0,12.0,0.0,0.0\n\
             \x20 Stack\n    RichText\n      Paragraph fg=#808080\n        Run \"q\"\n"
        );
    }

    #[test]
    fn test_code_block_plain_fallback() {
        let elements = render(vec![Block::Code(CodeBlock {
            text: "fn main() {}".to_owned(),
            language: Some("rust".to_owned()),
        })]);
        let Element::Border(border) = &elements[0] else {
            panic!("expected a border");
        };
        let Element::Scroll(scroll) = &border.child else {
            panic!("expected a scroll viewer");
        };
        assert_eq!(scroll.horizontal_scroll, ScrollMode::Auto);
        let Element::TextBlock(text) = &scroll.content else {
            panic!("expected a text block");
        };
        assert_eq!(text.font_family.as_deref(), Some("Segoe UI"));
        assert_eq!(text.inlines.len(), 1);
    }

    #[test]
    fn test_table_header_row_is_bold() {
        let cell = |text: &str| mdtb_model::TableCell {
            inlines: vec![Inline::text(text)],
        };
        let elements = render(vec![Block::Table(TableBlock {
            columns: vec![
                mdtb_model::ColumnDefinition::default(),
                mdtb_model::ColumnDefinition {
                    alignment: ColumnAlignment::Right,
                    max_width: Some(120.0),
                },
            ],
            rows: vec![
                mdtb_model::TableRow {
                    cells: vec![cell("h1"), cell("h2")],
                },
                mdtb_model::TableRow {
                    cells: vec![cell("a"), cell("b")],
                },
            ],
        })]);
        let Element::Grid(grid) = &elements[0] else {
            panic!("expected a grid");
        };
        assert_eq!((grid.rows, grid.columns), (2, 2));
        assert_eq!(grid.column_widths, vec![None, Some(120.0)]);
        assert_eq!(grid.cells[1].alignment, HorizontalAlignment::Right);

        let weight = |cell: &GridCell| {
            let Element::Border(border) = &cell.child else {
                panic!("expected a padded cell");
            };
            let Element::RichText(rich) = &border.child else {
                panic!("expected rich text");
            };
            rich.paragraphs[0].font_weight
        };
        assert_eq!(weight(&grid.cells[0]), Some(FontWeight::Bold));
        assert_eq!(weight(&grid.cells[2]), None);
    }

    #[test]
    fn test_empty_yaml_header_is_skipped() {
        assert!(render(vec![Block::YamlHeader(YamlHeaderBlock::default())]).is_empty());
    }

    #[test]
    fn test_yaml_header_keys_over_values() {
        let elements = render(vec![Block::YamlHeader(YamlHeaderBlock {
            entries: vec![("title".to_owned(), "Doc".to_owned())],
        })]);
        let Element::Scroll(scroll) = &elements[0] else {
            panic!("expected a scroll viewer");
        };
        let Element::Grid(grid) = &scroll.content else {
            panic!("expected a grid");
        };
        assert_eq!((grid.rows, grid.columns), (2, 1));
        assert_eq!(grid.cells[0].row, 0);
        assert_eq!(grid.cells[1].row, 1);
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(outline(vec![Block::HorizontalRule]), "Rule thickness=2.0\n");
    }

    #[test]
    fn test_block_operation_rejects_inline_context() {
        let mut context = RenderContext::Inline(crate::context::InlineContext::new(
            crate::visual::InlineCollection::new(),
        ));
        let result = MarkdownRenderer::new().render_horizontal_rule(&mut context);
        assert_eq!(
            result,
            Err(RenderError::ContextIncorrect {
                operation: "render_horizontal_rule"
            })
        );
    }
}
