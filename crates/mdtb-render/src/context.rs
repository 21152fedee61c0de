//! Render contexts threaded through the recursive walk.
//!
//! A [`RenderContext`] is either a block context, appending whole elements
//! to an element list, or an inline context, appending inline nodes to an
//! [`InlineCollection`]. Composite inlines derive a child context with
//! [`InlineContext::child`], render into it, and copy its final
//! whitespace-trim state back.

use crate::error::RenderError;
use crate::images::ImageTasks;
use crate::visual::{Color, Element, FontStyle, FontWeight, InlineCollection};

/// Which kind of node owns the collection being rendered into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentKind {
    Paragraph,
    Span,
    Hyperlink,
}

/// Snapshot of the font of the node that owns the current collection.
///
/// Sub- and superscripts scale their text relative to it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParentStyle {
    pub kind: ParentKind,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
}

impl ParentStyle {
    #[must_use]
    pub fn new(kind: ParentKind, font_size: f64, font_family: impl Into<String>) -> Self {
        Self {
            kind,
            font_size,
            font_family: font_family.into(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
        }
    }

    /// Same font, owned by a different kind of node.
    #[must_use]
    pub fn with_kind(&self, kind: ParentKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }

    #[must_use]
    pub fn with_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = font_style;
        self
    }
}

/// Context for block rendering.
#[derive(Debug)]
pub struct BlockContext<'a> {
    elements: &'a mut Vec<Element>,
    pub foreground: Option<Color>,
    pub override_foreground: bool,
    images: ImageTasks,
}

impl<'a> BlockContext<'a> {
    pub fn new(elements: &'a mut Vec<Element>, images: ImageTasks) -> Self {
        Self {
            elements,
            foreground: None,
            override_foreground: false,
            images,
        }
    }

    /// Append a rendered block.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Block context for a nested container (quote, list item) sharing this
    /// context's foreground and image queue.
    pub fn nested<'b>(&self, elements: &'b mut Vec<Element>) -> BlockContext<'b> {
        BlockContext {
            elements,
            foreground: self.foreground,
            override_foreground: self.override_foreground,
            images: self.images.clone(),
        }
    }

    /// Fresh inline context for a block's text content.
    ///
    /// Leading whitespace of the first run is trimmed.
    #[must_use]
    pub fn inline(&self, inlines: InlineCollection, parent: ParentStyle) -> InlineContext {
        InlineContext {
            inlines,
            parent: Some(parent),
            within_bold: false,
            within_italics: false,
            within_hyperlink: false,
            override_foreground: self.override_foreground,
            foreground: self.foreground,
            trim_leading_whitespace: true,
            images: self.images.clone(),
        }
    }

    #[must_use]
    pub fn images(&self) -> &ImageTasks {
        &self.images
    }
}

/// Context for inline rendering.
#[derive(Clone, Debug)]
pub struct InlineContext {
    /// Collection rendered nodes are appended to.
    pub inlines: InlineCollection,
    pub parent: Option<ParentStyle>,
    pub within_bold: bool,
    pub within_italics: bool,
    pub within_hyperlink: bool,
    pub override_foreground: bool,
    pub foreground: Option<Color>,
    pub trim_leading_whitespace: bool,
    images: ImageTasks,
}

impl InlineContext {
    /// Standalone context with no parent style and its own image queue.
    #[must_use]
    pub fn new(inlines: InlineCollection) -> Self {
        Self {
            inlines,
            parent: None,
            within_bold: false,
            within_italics: false,
            within_hyperlink: false,
            override_foreground: false,
            foreground: None,
            trim_leading_whitespace: false,
            images: ImageTasks::new(),
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: ParentStyle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Child context rendering into `inlines`, inheriting every flag.
    #[must_use]
    pub fn child(&self, inlines: InlineCollection, parent: ParentStyle) -> Self {
        Self {
            inlines,
            parent: Some(parent),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn images(&self) -> &ImageTasks {
        &self.images
    }
}

/// Context handed to every render operation.
#[derive(Debug)]
pub enum RenderContext<'a> {
    Block(BlockContext<'a>),
    Inline(InlineContext),
}

impl<'a> RenderContext<'a> {
    /// The inline context, or [`RenderError::ContextIncorrect`] naming
    /// `operation`.
    pub fn as_inline_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut InlineContext, RenderError> {
        match self {
            Self::Inline(context) => Ok(context),
            Self::Block(_) => Err(RenderError::context_incorrect(operation)),
        }
    }

    /// The block context, or [`RenderError::ContextIncorrect`] naming
    /// `operation`.
    pub fn as_block_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut BlockContext<'a>, RenderError> {
        match self {
            Self::Block(context) => Ok(context),
            Self::Inline(_) => Err(RenderError::context_incorrect(operation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_child_inherits_flags() {
        let mut parent = InlineContext::new(InlineCollection::new());
        parent.within_bold = true;
        parent.override_foreground = true;
        parent.foreground = Some(Color::rgb(1, 2, 3));
        parent.trim_leading_whitespace = true;

        let style = ParentStyle::new(ParentKind::Span, 14.0, "Segoe UI");
        let mut child = parent.child(InlineCollection::new(), style.clone());
        child.within_italics = true;

        assert!(child.within_bold);
        assert!(child.within_italics);
        assert!(!parent.within_italics);
        assert!(child.override_foreground);
        assert_eq!(child.foreground, Some(Color::rgb(1, 2, 3)));
        assert!(child.trim_leading_whitespace);
        assert_eq!(child.parent, Some(style));
    }

    #[test]
    fn test_wrong_context_kind_names_operation() {
        let mut elements = Vec::new();
        let mut context = RenderContext::Block(BlockContext::new(&mut elements, ImageTasks::new()));
        assert_eq!(
            context.as_inline_mut("render_text_run").err(),
            Some(RenderError::ContextIncorrect {
                operation: "render_text_run"
            })
        );
        assert!(context.as_block_mut("render_paragraph").is_ok());
    }

    #[test]
    fn test_block_inline_context_starts_trimming() {
        let mut elements = Vec::new();
        let block = BlockContext::new(&mut elements, ImageTasks::new());
        let inline = block.inline(
            InlineCollection::new(),
            ParentStyle::new(ParentKind::Paragraph, 14.0, "Segoe UI"),
        );
        assert!(inline.trim_leading_whitespace);
        assert!(!inline.within_hyperlink);
    }
}
