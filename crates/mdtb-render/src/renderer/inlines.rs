use std::sync::Arc;

use futures::FutureExt;
use mdtb_model::{
    BoldInline, CodeInline, EmojiInline, HyperlinkInline, ImageInline, Inline, ItalicInline,
    MarkdownLinkInline, StrikethroughInline, SubscriptInline, SuperscriptInline, TextRunInline,
};

use super::MarkdownRenderer;
use crate::context::{InlineContext, ParentKind, ParentStyle, RenderContext};
use crate::error::RenderError;
use crate::images::ImageOutcome;
use crate::inlines::InlineRenderer;
use crate::style::ImageStyle;
use crate::superscript::{all_text_is_superscript, remove_superscript_runs};
use crate::visual::{
    Border, ClickTarget, Element, FontStyle, FontWeight, Hyperlink, ImageElement, ImageSource,
    InlineCollection, InlineNode, InlineUiContainer, NodeId, Paragraph, RichTextBlock, Run,
    ScaleBox, ScrollMode, ScrollViewer, Span, Stretch, TextBlock, Thickness,
};
use crate::whitespace::collapse_whitespace;

/// Scale of superscript text relative to its parent.
const SUPERSCRIPT_SCALE: f64 = 0.8;
/// Scale of subscript text relative to its parent.
const SUBSCRIPT_SCALE: f64 = 0.7;
/// Downward shift that lines inline code up with the surrounding baseline.
const INLINE_CODE_OFFSET: f64 = 4.0;

#[derive(Clone, Copy)]
enum Script {
    Super,
    Sub,
}

impl InlineRenderer for MarkdownRenderer {
    fn render_text_run(
        &self,
        inline: &TextRunInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_text_run")?;
        push_text_run(&inline.text, context);
        Ok(())
    }

    fn render_emoji(
        &self,
        inline: &EmojiInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_emoji")?;
        let mut run = Run::new(inline.text.as_str());
        run.font_family = Some(self.style.emoji_font().to_owned());
        context.inlines.push(InlineNode::Run(run));
        Ok(())
    }

    fn render_bold(
        &self,
        inline: &BoldInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_bold")?;
        let mut span = Span::new(child_collection(context));
        span.font_weight = Some(FontWeight::Bold);

        let parent = self.parent_of(context, ParentKind::Span).with_weight(FontWeight::Bold);
        let mut child = context.child(span.inlines.clone(), parent);
        child.within_bold = true;
        self.render_children(&inline.inlines, child, context)?;

        context.inlines.push(InlineNode::Span(span));
        Ok(())
    }

    fn render_italic(
        &self,
        inline: &ItalicInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_italic")?;
        let mut span = Span::new(child_collection(context));
        span.font_style = Some(FontStyle::Italic);

        let parent = self.parent_of(context, ParentKind::Span).with_style(FontStyle::Italic);
        let mut child = context.child(span.inlines.clone(), parent);
        child.within_italics = true;
        self.render_children(&inline.inlines, child, context)?;

        context.inlines.push(InlineNode::Span(span));
        Ok(())
    }

    fn render_strikethrough(
        &self,
        inline: &StrikethroughInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_strikethrough")?;
        let mut span = Span::new(child_collection(context));
        span.strikethrough = true;

        let parent = self.parent_of(context, ParentKind::Span);
        let child = context.child(span.inlines.clone(), parent);
        self.render_children(&inline.inlines, child, context)?;

        context.inlines.push(InlineNode::Span(span));
        Ok(())
    }

    fn render_superscript(
        &self,
        inline: &SuperscriptInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        self.render_script(&inline.inlines, context, Script::Super, "render_superscript")
    }

    fn render_subscript(
        &self,
        inline: &SubscriptInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        self.render_script(&inline.inlines, context, Script::Sub, "render_subscript")
    }

    fn render_code(
        &self,
        inline: &CodeInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_code")?;
        let text = collapse_whitespace(&mut context.trim_leading_whitespace, &inline.text);

        let font_family = self.style.inline_code_font().to_owned();
        let foreground = self.style.inline_code_foreground();
        let font_weight = context.within_bold.then_some(FontWeight::Bold);
        let font_style = context.within_italics.then_some(FontStyle::Italic);

        // Hyperlinks cannot host embedded UI, so code inside one is a plain run.
        let in_hyperlink = context.within_hyperlink
            || context
                .parent
                .as_ref()
                .is_some_and(|parent| parent.kind == ParentKind::Hyperlink);
        if in_hyperlink {
            let mut run = Run::new(text);
            run.font_family = Some(font_family);
            run.foreground = foreground;
            run.font_weight = font_weight;
            run.font_style = font_style;
            context.inlines.push(InlineNode::Run(run));
            return Ok(());
        }

        let mut block = TextBlock::new();
        block.font_family = Some(font_family);
        block.foreground = foreground;
        block.font_weight = font_weight;
        block.font_style = font_style;
        block.inlines.push(InlineNode::Run(Run::new(text)));

        let code = &self.style.inline_code;
        let mut border = Border::new(Element::TextBlock(block));
        border.border_thickness = code.border_thickness;
        border.border_brush = code.border_brush;
        border.background = code.background;
        border.padding = code.padding;
        border.margin = code.margin;
        border.offset_y = INLINE_CODE_OFFSET;

        context
            .inlines
            .push(InlineNode::Container(InlineUiContainer::new(Element::Border(
                Box::new(border),
            ))));
        Ok(())
    }

    fn render_hyperlink(
        &self,
        inline: &HyperlinkInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_hyperlink")?;
        let link = Hyperlink::new(inline.url.as_str());
        self.link_register
            .register_new_hyperlink(link.id, &inline.url, false);

        let foreground = match self.style.link_foreground {
            Some(color) if !context.override_foreground => Some(color),
            _ => context.foreground,
        };
        let mut run = Run::new(collapse_whitespace(
            &mut context.trim_leading_whitespace,
            &inline.text,
        ));
        run.foreground = foreground;
        link.inlines.push(InlineNode::Run(run));

        context.inlines.push(InlineNode::Hyperlink(link));
        Ok(())
    }

    fn render_markdown_link(
        &self,
        inline: &MarkdownLinkInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        const OPERATION: &str = "render_markdown_link";
        context.as_inline_mut(OPERATION)?;

        // Superscript cannot be raised inside a link, so a link made only of
        // superscript becomes a superscript containing a plain link.
        if all_text_is_superscript(&inline.inlines) {
            let link = MarkdownLinkInline {
                url: inline.url.clone(),
                tooltip: inline.tooltip.clone(),
                inlines: remove_superscript_runs(&inline.inlines, false),
            };
            let superscript = SuperscriptInline {
                inlines: vec![Inline::MarkdownLink(link)],
            };
            return self.render_superscript(&superscript, context);
        }

        let context = context.as_inline_mut(OPERATION)?;
        let mut link = Hyperlink::new(inline.url.as_str());
        self.link_register
            .register_new_hyperlink(link.id, &inline.url, false);
        link.foreground = if context.override_foreground {
            context.foreground
        } else {
            self.style.link_foreground
        };
        link.tooltip = Some(inline.tooltip.clone().unwrap_or_else(|| inline.url.clone()));

        let children = remove_superscript_runs(&inline.inlines, true);
        let parent = self.parent_of(context, ParentKind::Hyperlink);
        let mut child = context.child(link.inlines.clone(), parent);
        child.within_hyperlink = true;
        self.render_children(&children, child, context)?;

        context.inlines.push(InlineNode::Hyperlink(link));
        Ok(())
    }

    fn render_image(
        &self,
        inline: &ImageInline,
        context: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let context = context.as_inline_mut("render_image")?;
        let placeholder = push_text_run(&inline.text, context);

        let resolving = self
            .image_resolver
            .resolve_image(&inline.render_url, inline.tooltip.as_deref());
        let inlines = context.inlines.clone();
        let link_register = Arc::clone(&self.link_register);
        let style = self.style.images.clone();
        let image = inline.clone();

        let task = async move {
            let Some(source) = resolving.await else {
                tracing::debug!(url = %image.render_url, "Image not resolved, keeping placeholder");
                return ImageOutcome::Unresolved;
            };

            let (container, target) = image_presentation(&image, source, &style);
            link_register.register_new_hyperlink(target, &image.url, image.is_hyperlink_image());

            match inlines.replace(placeholder, InlineNode::Container(container)) {
                Ok(_) => ImageOutcome::Replaced,
                Err(error) => {
                    tracing::debug!(url = %image.render_url, %error, "Dropping resolved image");
                    ImageOutcome::Rejected
                }
            }
        };
        context.images().push(task.boxed());
        Ok(())
    }
}

impl MarkdownRenderer {
    /// Parent style for a composite created in `context`.
    fn parent_of(&self, context: &InlineContext, kind: ParentKind) -> ParentStyle {
        context.parent.as_ref().map_or_else(
            || self.body_style(kind),
            |parent| parent.with_kind(kind),
        )
    }

    /// Render sub- or superscript content.
    ///
    /// Outside hyperlinks the content goes into a scaled paragraph boxed in
    /// an inline UI container; inside one it is rendered in place.
    fn render_script(
        &self,
        inlines: &[Inline],
        context: &mut RenderContext<'_>,
        script: Script,
        operation: &'static str,
    ) -> Result<(), RenderError> {
        let inline_context = context.as_inline_mut(operation)?;
        let parent = inline_context
            .parent
            .clone()
            .ok_or_else(|| RenderError::context_incorrect(operation))?;
        if inline_context.within_hyperlink {
            return self.render_inlines(inlines, context);
        }

        let scale = match script {
            Script::Super => SUPERSCRIPT_SCALE,
            Script::Sub => SUBSCRIPT_SCALE,
        };
        let font_size = parent.font_size * scale;

        let mut paragraph = Paragraph::new();
        paragraph.font_size = Some(font_size);
        paragraph.font_family = Some(parent.font_family.clone());
        paragraph.font_weight = Some(parent.font_weight);
        paragraph.font_style = Some(parent.font_style);

        let child_parent = ParentStyle {
            kind: ParentKind::Paragraph,
            font_size,
            ..parent
        };
        let child = inline_context.child(paragraph.inlines.clone(), child_parent);
        self.render_children(inlines, child, inline_context)?;

        let mut border = Border::new(Element::RichText(RichTextBlock::new(vec![paragraph])));
        match script {
            Script::Super => border.padding = Thickness::new(0.0, 0.0, 0.0, font_size * 0.2),
            Script::Sub => border.margin = Thickness::new(0.0, 0.0, 0.0, -(font_size * 0.6)),
        }

        inline_context
            .inlines
            .push(InlineNode::Container(InlineUiContainer::new(Element::Border(
                Box::new(border),
            ))));
        Ok(())
    }
}

/// Collapse `text` and append it as a run. Returns the run's id.
fn push_text_run(text: &str, context: &mut InlineContext) -> NodeId {
    let run = Run::new(collapse_whitespace(&mut context.trim_leading_whitespace, text));
    let id = run.id;
    context.inlines.push(InlineNode::Run(run));
    id
}

/// Collection for a new composite. Anything created inside a hyperlink
/// inherits its refusal of embedded UI.
fn child_collection(context: &InlineContext) -> InlineCollection {
    if context.within_hyperlink || !context.inlines.accepts_ui_containers() {
        InlineCollection::without_ui_containers()
    } else {
        InlineCollection::new()
    }
}

/// Build the presentation of a resolved image:
/// container > scroll > scale box > click target > image.
///
/// Returns the container and the node to register as click target.
fn image_presentation(
    inline: &ImageInline,
    source: ImageSource,
    style: &ImageStyle,
) -> (InlineUiContainer, NodeId) {
    let width = inline.image_width;
    let height = inline.image_height;

    let mut image = ImageElement::new(source);
    image.stretch = style.stretch;
    image.tooltip.clone_from(&inline.tooltip);
    if width > 0 {
        image.width = Some(f64::from(width));
        image.stretch = Stretch::UniformToFill;
    }
    if height > 0 {
        image.height = Some(f64::from(height));
        image.stretch = Stretch::UniformToFill;
    }
    // A single explicit dimension is mirrored onto the other one.
    match (width, height) {
        (0, 0) => {}
        (w, 0) => image.height = Some(f64::from(w)),
        (0, h) => image.width = Some(f64::from(h)),
        _ => image.stretch = Stretch::Fill,
    }
    let target = image.id;

    let mut scale = ScaleBox::new(Element::ClickTarget(Box::new(ClickTarget::new(
        Element::Image(image),
    ))));
    scale.shrink_only = true;
    scale.max_width = (style.max_width > 0.0).then_some(style.max_width);
    scale.max_height = (style.max_height > 0.0).then_some(style.max_height);

    let mut scroll = ScrollViewer::new(Element::ScaleBox(Box::new(scale)));
    scroll.vertical_scroll = ScrollMode::Disabled;
    scroll.horizontal_scroll = if width > 0 || height > 0 {
        ScrollMode::Auto
    } else {
        ScrollMode::Disabled
    };

    (
        InlineUiContainer::new(Element::Scroll(Box::new(scroll))),
        target,
    )
}
