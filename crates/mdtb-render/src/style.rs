//! Style parameters consumed by the renderer.
//!
//! Every option has a fallback: unset colors inherit from the surrounding
//! text, unset fonts fall back to the body font, and a maximum image size
//! of 0 means unbounded.

use crate::visual::{Color, Stretch, Thickness};

/// Emoji font used when none is configured.
pub const DEFAULT_EMOJI_FONT: &str = "Segoe UI Emoji";

/// Body font used when none is configured.
pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";

/// Body font size used when none is configured.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Complete style for a render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub font_family: String,
    pub font_size: f64,
    pub emoji_font_family: Option<String>,
    /// Body text color; `None` leaves it to the host.
    pub foreground: Option<Color>,
    pub link_foreground: Option<Color>,
    pub paragraph_margin: Thickness,
    pub inline_code: InlineCodeStyle,
    pub code_block: CodeBlockStyle,
    pub images: ImageStyle,
    pub headers: HeaderStyle,
    pub quote: QuoteStyle,
    pub list: ListLayout,
    pub table: TableStyle,
    pub rule: RuleStyle,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            emoji_font_family: None,
            foreground: None,
            link_foreground: None,
            paragraph_margin: Thickness::new(0.0, 12.0, 0.0, 0.0),
            inline_code: InlineCodeStyle::default(),
            code_block: CodeBlockStyle::default(),
            images: ImageStyle::default(),
            headers: HeaderStyle::default(),
            quote: QuoteStyle::default(),
            list: ListLayout::default(),
            table: TableStyle::default(),
            rule: RuleStyle::default(),
        }
    }
}

impl RenderStyle {
    /// Font for emoji runs.
    #[must_use]
    pub fn emoji_font(&self) -> &str {
        self.emoji_font_family
            .as_deref()
            .unwrap_or(DEFAULT_EMOJI_FONT)
    }

    /// Font for inline code, falling back to the body font.
    #[must_use]
    pub fn inline_code_font(&self) -> &str {
        self.inline_code
            .font_family
            .as_deref()
            .unwrap_or(&self.font_family)
    }

    /// Color for inline code, falling back to the body color.
    #[must_use]
    pub fn inline_code_foreground(&self) -> Option<Color> {
        self.inline_code.foreground.or(self.foreground)
    }

    /// Font for code blocks, falling back to the inline code font.
    #[must_use]
    pub fn code_block_font(&self) -> &str {
        self.code_block
            .font_family
            .as_deref()
            .unwrap_or_else(|| self.inline_code_font())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineCodeStyle {
    pub font_family: Option<String>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub border_brush: Option<Color>,
    pub border_thickness: Thickness,
    pub padding: Thickness,
    pub margin: Thickness,
}

impl Default for InlineCodeStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            foreground: None,
            background: None,
            border_brush: None,
            border_thickness: Thickness::uniform(1.0),
            padding: Thickness::new(4.0, 0.0, 4.0, 0.0),
            margin: Thickness::new(2.0, 0.0, 2.0, 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CodeBlockStyle {
    pub font_family: Option<String>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub border_brush: Option<Color>,
    pub border_thickness: Thickness,
    pub padding: Thickness,
    pub margin: Thickness,
}

impl Default for CodeBlockStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            foreground: None,
            background: None,
            border_brush: None,
            border_thickness: Thickness::default(),
            padding: Thickness::uniform(10.0),
            margin: Thickness::new(0.0, 12.0, 0.0, 0.0),
        }
    }
}

/// Bounds and scaling for inline images.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageStyle {
    /// Maximum width; 0 is unbounded.
    pub max_width: f64,
    /// Maximum height; 0 is unbounded.
    pub max_height: f64,
    pub stretch: Stretch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderStyle {
    /// Font size per level, `font_sizes[0]` for level 1.
    pub font_sizes: [f64; 6],
    pub margins: [Thickness; 6],
    pub foreground: Option<Color>,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            font_sizes: [24.0, 20.0, 17.0, 15.0, 14.0, 14.0],
            margins: [
                Thickness::new(0.0, 15.0, 0.0, 0.0),
                Thickness::new(0.0, 15.0, 0.0, 0.0),
                Thickness::new(0.0, 12.0, 0.0, 0.0),
                Thickness::new(0.0, 12.0, 0.0, 0.0),
                Thickness::new(0.0, 10.0, 0.0, 0.0),
                Thickness::new(0.0, 10.0, 0.0, 0.0),
            ],
            foreground: None,
        }
    }
}

impl HeaderStyle {
    /// Font size for a header level. Levels outside 1..=6 are clamped.
    #[must_use]
    pub fn font_size(&self, level: u8) -> f64 {
        self.font_sizes[Self::index(level)]
    }

    #[must_use]
    pub fn margin(&self, level: u8) -> Thickness {
        self.margins[Self::index(level)]
    }

    fn index(level: u8) -> usize {
        usize::from(level.clamp(1, 6) - 1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteStyle {
    /// Width of the left border.
    pub border_width: f64,
    pub border_brush: Option<Color>,
    /// Text color inside quotes, unless an outer scope already overrides it.
    pub foreground: Option<Color>,
    pub padding: Thickness,
    pub margin: Thickness,
}

impl Default for QuoteStyle {
    fn default() -> Self {
        Self {
            border_width: 4.0,
            border_brush: None,
            foreground: None,
            padding: Thickness::new(12.0, 0.0, 0.0, 0.0),
            margin: Thickness::new(7.0, 12.0, 0.0, 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListLayout {
    pub margin: Thickness,
    /// Width of the bullet column.
    pub gutter_width: f64,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self {
            margin: Thickness::new(0.0, 6.0, 0.0, 0.0),
            gutter_width: 32.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    pub border_thickness: f64,
    pub border_brush: Option<Color>,
    pub cell_padding: Thickness,
    pub margin: Thickness,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            border_thickness: 1.0,
            border_brush: None,
            cell_padding: Thickness::new(9.0, 4.0, 9.0, 4.0),
            margin: Thickness::new(0.0, 12.0, 0.0, 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuleStyle {
    pub thickness: f64,
    pub foreground: Option<Color>,
    pub margin: Thickness,
}

impl Default for RuleStyle {
    fn default() -> Self {
        Self {
            thickness: 2.0,
            foreground: None,
            margin: Thickness::new(0.0, 12.0, 0.0, 12.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emoji_font_fallback() {
        let mut style = RenderStyle::default();
        assert_eq!(style.emoji_font(), "Segoe UI Emoji");
        style.emoji_font_family = Some("Noto Color Emoji".to_owned());
        assert_eq!(style.emoji_font(), "Noto Color Emoji");
    }

    #[test]
    fn test_code_fonts_fall_back_to_body() {
        let mut style = RenderStyle::default();
        assert_eq!(style.inline_code_font(), "Segoe UI");
        assert_eq!(style.code_block_font(), "Segoe UI");
        style.inline_code.font_family = Some("Consolas".to_owned());
        assert_eq!(style.code_block_font(), "Consolas");
    }

    #[test]
    fn test_header_level_is_clamped() {
        let headers = HeaderStyle::default();
        assert_eq!(headers.font_size(0), headers.font_size(1));
        assert_eq!(headers.font_size(9), headers.font_size(6));
    }
}
