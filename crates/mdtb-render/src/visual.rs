//! Toolkit-neutral visual tree produced by the renderer.
//!
//! Block-level output is a list of [`Element`]s. Text-bearing elements own
//! an [`InlineCollection`]: a shared, lockable sequence of [`InlineNode`]s.
//! Collections are shared handles so that image completions can still patch
//! a sequence after it has been attached to the tree.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a visual node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// ARGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    #[must_use]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

/// Error returned when parsing a [`Color`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::argb(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.a, self.r, self.g, self.b
            )
        }
    }
}

/// Edge metrics (margins, paddings, border widths).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1},{:.1},{:.1},{:.1}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FontWeight {
    #[default]
    Normal,
    SemiBold,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// How an image fills the space given to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stretch {
    None,
    Fill,
    #[default]
    Uniform,
    UniformToFill,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollMode {
    #[default]
    Disabled,
    Enabled,
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    Stretch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
    Stretch,
}

/// Displayable image data returned by an image resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSource {
    /// Where the data was loaded from.
    pub uri: String,
}

impl ImageSource {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
        }
    }
}

/// Why a placeholder splice did not happen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    #[error("placeholder {0} is no longer in the collection")]
    PlaceholderMissing(NodeId),
    #[error("collection does not accept embedded UI containers")]
    Rejected,
}

/// Shared, ordered sequence of inline nodes.
///
/// Cloning yields another handle to the same sequence.
#[derive(Clone, Debug)]
pub struct InlineCollection {
    nodes: Arc<Mutex<Vec<InlineNode>>>,
    accepts_ui_containers: bool,
}

impl Default for InlineCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineCollection {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(Mutex::new(Vec::new())),
            accepts_ui_containers: true,
        }
    }

    /// A collection that refuses embedded UI containers, as hyperlink
    /// content does.
    #[must_use]
    pub fn without_ui_containers() -> Self {
        Self {
            accepts_ui_containers: false,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn accepts_ui_containers(&self) -> bool {
        self.accepts_ui_containers
    }

    pub fn push(&self, node: InlineNode) {
        self.lock().push(node);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current nodes. Nested collections stay shared.
    #[must_use]
    pub fn snapshot(&self) -> Vec<InlineNode> {
        self.lock().clone()
    }

    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.lock().iter().position(|node| node.id() == id)
    }

    /// Replace the node `placeholder` with `node` at the same index.
    ///
    /// Lookup and splice happen under one lock, so concurrent splices on
    /// the same collection cannot shift the index in between. Returns the
    /// index the node was inserted at.
    pub fn replace(&self, placeholder: NodeId, node: InlineNode) -> Result<usize, SpliceError> {
        if matches!(node, InlineNode::Container(_)) && !self.accepts_ui_containers {
            return Err(SpliceError::Rejected);
        }
        let mut nodes = self.lock();
        let index = nodes
            .iter()
            .position(|n| n.id() == placeholder)
            .ok_or(SpliceError::PlaceholderMissing(placeholder))?;
        nodes.remove(index);
        nodes.insert(index, node);
        Ok(index)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<InlineNode>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A node inside an inline collection.
#[derive(Clone, Debug)]
pub enum InlineNode {
    Run(Run),
    Span(Span),
    Hyperlink(Hyperlink),
    Container(InlineUiContainer),
}

impl InlineNode {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Run(run) => run.id,
            Self::Span(span) => span.id,
            Self::Hyperlink(link) => link.id,
            Self::Container(container) => container.id,
        }
    }
}

/// A run of text with optional local formatting.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub id: NodeId,
    pub text: String,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub foreground: Option<Color>,
}

impl Run {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            text: text.into(),
            font_family: None,
            font_size: None,
            font_weight: None,
            font_style: None,
            foreground: None,
        }
    }
}

/// Styled inline container (bold, italic, strikethrough).
#[derive(Clone, Debug)]
pub struct Span {
    pub id: NodeId,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub strikethrough: bool,
    pub inlines: InlineCollection,
}

impl Span {
    #[must_use]
    pub fn new(inlines: InlineCollection) -> Self {
        Self {
            id: NodeId::next(),
            font_weight: None,
            font_style: None,
            strikethrough: false,
            inlines,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Hyperlink {
    pub id: NodeId,
    pub url: String,
    pub foreground: Option<Color>,
    pub tooltip: Option<String>,
    pub inlines: InlineCollection,
}

impl Hyperlink {
    /// A hyperlink with a fresh collection that refuses UI containers.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            url: url.into(),
            foreground: None,
            tooltip: None,
            inlines: InlineCollection::without_ui_containers(),
        }
    }
}

/// Embeds a block-level element in inline flow.
#[derive(Clone, Debug)]
pub struct InlineUiContainer {
    pub id: NodeId,
    pub child: Element,
}

impl InlineUiContainer {
    #[must_use]
    pub fn new(child: Element) -> Self {
        Self {
            id: NodeId::next(),
            child,
        }
    }
}

/// A block-level visual element.
#[derive(Clone, Debug)]
pub enum Element {
    RichText(RichTextBlock),
    TextBlock(TextBlock),
    Border(Box<Border>),
    Scroll(Box<ScrollViewer>),
    ScaleBox(Box<ScaleBox>),
    ClickTarget(Box<ClickTarget>),
    Image(ImageElement),
    Grid(Grid),
    Stack(StackPanel),
    Rule(Rule),
}

impl Element {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::RichText(e) => e.id,
            Self::TextBlock(e) => e.id,
            Self::Border(e) => e.id,
            Self::Scroll(e) => e.id,
            Self::ScaleBox(e) => e.id,
            Self::ClickTarget(e) => e.id,
            Self::Image(e) => e.id,
            Self::Grid(e) => e.id,
            Self::Stack(e) => e.id,
            Self::Rule(e) => e.id,
        }
    }
}

/// A paragraph inside a rich text block.
#[derive(Clone, Debug)]
pub struct Paragraph {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub foreground: Option<Color>,
    pub margin: Thickness,
    pub inlines: InlineCollection,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Paragraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_size: None,
            font_family: None,
            font_weight: None,
            font_style: None,
            foreground: None,
            margin: Thickness::default(),
            inlines: InlineCollection::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RichTextBlock {
    pub id: NodeId,
    pub paragraphs: Vec<Paragraph>,
}

impl RichTextBlock {
    #[must_use]
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            id: NodeId::next(),
            paragraphs,
        }
    }
}

/// Single-format text element.
#[derive(Clone, Debug)]
pub struct TextBlock {
    pub id: NodeId,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub foreground: Option<Color>,
    pub inlines: InlineCollection,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBlock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            font_family: None,
            font_size: None,
            font_weight: None,
            font_style: None,
            foreground: None,
            inlines: InlineCollection::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Border {
    pub id: NodeId,
    pub child: Element,
    pub border_thickness: Thickness,
    pub border_brush: Option<Color>,
    pub background: Option<Color>,
    pub padding: Thickness,
    pub margin: Thickness,
    /// Vertical render offset, positive is down.
    pub offset_y: f64,
}

impl Border {
    #[must_use]
    pub fn new(child: Element) -> Self {
        Self {
            id: NodeId::next(),
            child,
            border_thickness: Thickness::default(),
            border_brush: None,
            background: None,
            padding: Thickness::default(),
            margin: Thickness::default(),
            offset_y: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollViewer {
    pub id: NodeId,
    pub content: Element,
    pub horizontal_scroll: ScrollMode,
    pub vertical_scroll: ScrollMode,
    pub margin: Thickness,
}

impl ScrollViewer {
    #[must_use]
    pub fn new(content: Element) -> Self {
        Self {
            id: NodeId::next(),
            content,
            horizontal_scroll: ScrollMode::Disabled,
            vertical_scroll: ScrollMode::Disabled,
            margin: Thickness::default(),
        }
    }
}

/// Scales its child to fit, bounded by optional maximum sizes.
#[derive(Clone, Debug)]
pub struct ScaleBox {
    pub id: NodeId,
    pub child: Element,
    pub shrink_only: bool,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl ScaleBox {
    #[must_use]
    pub fn new(child: Element) -> Self {
        Self {
            id: NodeId::next(),
            child,
            shrink_only: false,
            max_width: None,
            max_height: None,
        }
    }
}

/// Clickable wrapper; its target is registered with the link register.
#[derive(Clone, Debug)]
pub struct ClickTarget {
    pub id: NodeId,
    pub content: Element,
}

impl ClickTarget {
    #[must_use]
    pub fn new(content: Element) -> Self {
        Self {
            id: NodeId::next(),
            content,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageElement {
    pub id: NodeId,
    pub source: ImageSource,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub stretch: Stretch,
    pub tooltip: Option<String>,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl ImageElement {
    #[must_use]
    pub fn new(source: ImageSource) -> Self {
        Self {
            id: NodeId::next(),
            source,
            width: None,
            height: None,
            stretch: Stretch::default(),
            tooltip: None,
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub alignment: HorizontalAlignment,
    pub child: Element,
}

#[derive(Clone, Debug)]
pub struct Grid {
    pub id: NodeId,
    pub rows: usize,
    pub columns: usize,
    /// Fixed column widths; `None` sizes the column to its content.
    pub column_widths: Vec<Option<f64>>,
    pub cells: Vec<GridCell>,
    pub border_thickness: f64,
    pub border_brush: Option<Color>,
    pub margin: Thickness,
}

impl Grid {
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            id: NodeId::next(),
            rows,
            columns,
            column_widths: vec![None; columns],
            cells: Vec::new(),
            border_thickness: 0.0,
            border_brush: None,
            margin: Thickness::default(),
        }
    }

    pub fn place(&mut self, row: usize, column: usize, child: Element) {
        self.cells.push(GridCell {
            row,
            column,
            alignment: HorizontalAlignment::Left,
            child,
        });
    }
}

#[derive(Clone, Debug)]
pub struct StackPanel {
    pub id: NodeId,
    pub children: Vec<Element>,
    pub margin: Thickness,
}

impl StackPanel {
    #[must_use]
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            id: NodeId::next(),
            children,
            margin: Thickness::default(),
        }
    }
}

/// Horizontal rule.
#[derive(Clone, Debug)]
pub struct Rule {
    pub id: NodeId,
    pub thickness: f64,
    pub foreground: Option<Color>,
    pub margin: Thickness,
}

impl Rule {
    #[must_use]
    pub fn new(thickness: f64) -> Self {
        Self {
            id: NodeId::next(),
            thickness,
            foreground: None,
            margin: Thickness::default(),
        }
    }
}

/// Indented text outline of a visual tree.
///
/// ```
/// use mdtb_render::{Element, Outline, Paragraph, RichTextBlock, Run, InlineNode};
///
/// let paragraph = Paragraph::new();
/// paragraph.inlines.push(InlineNode::Run(Run::new("hi")));
/// let elements = vec![Element::RichText(RichTextBlock::new(vec![paragraph]))];
/// assert_eq!(Outline(&elements).to_string(), "RichText\n  Paragraph\n    Run \"hi\"\n");
/// ```
pub struct Outline<'a>(pub &'a [Element]);

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in self.0 {
            write_element(f, element, 0)?;
        }
        Ok(())
    }
}

/// Indented text outline of an inline collection.
pub struct InlineOutline<'a>(pub &'a InlineCollection);

impl fmt::Display for InlineOutline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_inlines(f, self.0, 0)
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write!(f, "{:width$}", "", width = depth * 2)
}

struct Font<'a> {
    size: Option<f64>,
    family: Option<&'a str>,
    weight: Option<FontWeight>,
    style: Option<FontStyle>,
    foreground: Option<Color>,
}

impl fmt::Display for Font<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(family) = self.family {
            write!(f, " font={family:?}")?;
        }
        if let Some(size) = self.size {
            write!(f, " size={size:.1}")?;
        }
        match self.weight {
            Some(FontWeight::Bold) => f.write_str(" bold")?,
            Some(FontWeight::SemiBold) => f.write_str(" semibold")?,
            Some(FontWeight::Normal) | None => {}
        }
        if self.style == Some(FontStyle::Italic) {
            f.write_str(" italic")?;
        }
        if let Some(color) = self.foreground {
            write!(f, " fg={color}")?;
        }
        Ok(())
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, element: &Element, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match element {
        Element::RichText(rich) => {
            writeln!(f, "RichText")?;
            for paragraph in &rich.paragraphs {
                indent(f, depth + 1)?;
                let font = Font {
                    size: paragraph.font_size,
                    family: paragraph.font_family.as_deref(),
                    weight: paragraph.font_weight,
                    style: paragraph.font_style,
                    foreground: paragraph.foreground,
                };
                writeln!(f, "Paragraph{font}")?;
                write_inlines(f, &paragraph.inlines, depth + 2)?;
            }
            Ok(())
        }
        Element::TextBlock(block) => {
            let font = Font {
                size: block.font_size,
                family: block.font_family.as_deref(),
                weight: block.font_weight,
                style: block.font_style,
                foreground: block.foreground,
            };
            writeln!(f, "TextBlock{font}")?;
            write_inlines(f, &block.inlines, depth + 1)
        }
        Element::Border(border) => {
            f.write_str("Border")?;
            if !border.padding.is_zero() {
                write!(f, " padding={}", border.padding)?;
            }
            if !border.margin.is_zero() {
                write!(f, " margin={}", border.margin)?;
            }
            if border.offset_y != 0.0 {
                write!(f, " offset={:.1}", border.offset_y)?;
            }
            writeln!(f)?;
            write_element(f, &border.child, depth + 1)
        }
        Element::Scroll(scroll) => {
            writeln!(
                f,
                "Scroll horizontal={:?} vertical={:?}",
                scroll.horizontal_scroll, scroll.vertical_scroll
            )?;
            write_element(f, &scroll.content, depth + 1)
        }
        Element::ScaleBox(scale) => {
            f.write_str("ScaleBox")?;
            if scale.shrink_only {
                f.write_str(" shrink_only")?;
            }
            if let Some(width) = scale.max_width {
                write!(f, " max_width={width:.1}")?;
            }
            if let Some(height) = scale.max_height {
                write!(f, " max_height={height:.1}")?;
            }
            writeln!(f)?;
            write_element(f, &scale.child, depth + 1)
        }
        Element::ClickTarget(target) => {
            writeln!(f, "ClickTarget")?;
            write_element(f, &target.content, depth + 1)
        }
        Element::Image(image) => {
            write!(f, "Image {:?}", image.source.uri)?;
            if let Some(width) = image.width {
                write!(f, " width={width:.1}")?;
            }
            if let Some(height) = image.height {
                write!(f, " height={height:.1}")?;
            }
            writeln!(f, " stretch={:?}", image.stretch)
        }
        Element::Grid(grid) => {
            writeln!(f, "Grid {}x{}", grid.rows, grid.columns)?;
            for cell in &grid.cells {
                indent(f, depth + 1)?;
                write!(f, "Cell {},{}", cell.row, cell.column)?;
                if cell.alignment != HorizontalAlignment::Left {
                    write!(f, " align={:?}", cell.alignment)?;
                }
                writeln!(f)?;
                write_element(f, &cell.child, depth + 2)?;
            }
            Ok(())
        }
        Element::Stack(stack) => {
            writeln!(f, "Stack")?;
            for child in &stack.children {
                write_element(f, child, depth + 1)?;
            }
            Ok(())
        }
        Element::Rule(rule) => writeln!(f, "Rule thickness={:.1}", rule.thickness),
    }
}

fn write_inlines(
    f: &mut fmt::Formatter<'_>,
    collection: &InlineCollection,
    depth: usize,
) -> fmt::Result {
    for node in collection.snapshot() {
        write_inline(f, &node, depth)?;
    }
    Ok(())
}

fn write_inline(f: &mut fmt::Formatter<'_>, node: &InlineNode, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match node {
        InlineNode::Run(run) => {
            let font = Font {
                size: run.font_size,
                family: run.font_family.as_deref(),
                weight: run.font_weight,
                style: run.font_style,
                foreground: run.foreground,
            };
            writeln!(f, "Run {:?}{font}", run.text)
        }
        InlineNode::Span(span) => {
            let font = Font {
                size: None,
                family: None,
                weight: span.font_weight,
                style: span.font_style,
                foreground: None,
            };
            write!(f, "Span{font}")?;
            if span.strikethrough {
                f.write_str(" strikethrough")?;
            }
            writeln!(f)?;
            write_inlines(f, &span.inlines, depth + 1)
        }
        InlineNode::Hyperlink(link) => {
            write!(f, "Hyperlink {:?}", link.url)?;
            if let Some(tooltip) = &link.tooltip {
                write!(f, " tooltip={tooltip:?}")?;
            }
            if let Some(color) = link.foreground {
                write!(f, " fg={color}")?;
            }
            writeln!(f)?;
            write_inlines(f, &link.inlines, depth + 1)
        }
        InlineNode::Container(container) => {
            writeln!(f, "InlineContainer")?;
            write_element(f, &container.child, depth + 1)
        }
    }
}
