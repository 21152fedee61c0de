//! Configuration management for MDTB.
//!
//! Parses `mdtb.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every section and
//! field is optional; anything left out keeps the renderer's default.
//!
//! ```toml
//! [fonts]
//! family = "Inter"
//! size = 15
//!
//! [colors]
//! link = "#0066CC"
//!
//! [inline_code]
//! padding = [4, 0, 4, 0]
//!
//! [images]
//! max_width = 640
//! stretch = "uniform"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use mdtb_render::{Color, RenderStyle, Stretch, Thickness};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdtb.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fonts: FontsConfig,
    pub colors: ColorsConfig,
    pub inline_code: InlineCodeConfig,
    pub images: ImagesConfig,
    pub headers: HeadersConfig,
    pub quote: QuoteConfig,
    pub table: TableConfig,
    pub rule: RuleConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Font configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Body font family.
    pub family: Option<String>,
    /// Body font size.
    pub size: Option<f64>,
    /// Font for emoji runs.
    pub emoji_family: Option<String>,
    /// Font for inline code and code blocks.
    pub code_family: Option<String>,
}

/// Colors as `#RRGGBB` or `#AARRGGBB` strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub foreground: Option<String>,
    pub link: Option<String>,
}

/// Edge metrics: a single number for all sides, or `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThicknessValue {
    Uniform(f64),
    Sides([f64; 4]),
}

impl From<ThicknessValue> for Thickness {
    fn from(value: ThicknessValue) -> Self {
        match value {
            ThicknessValue::Uniform(all) => Thickness::uniform(all),
            ThicknessValue::Sides([left, top, right, bottom]) => {
                Thickness::new(left, top, right, bottom)
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InlineCodeConfig {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub border_brush: Option<String>,
    pub border_thickness: Option<ThicknessValue>,
    pub padding: Option<ThicknessValue>,
    pub margin: Option<ThicknessValue>,
}

/// Image configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Maximum image width; 0 is unbounded.
    pub max_width: Option<f64>,
    /// Maximum image height; 0 is unbounded.
    pub max_height: Option<f64>,
    /// Stretch for images without explicit size.
    pub stretch: Option<Stretch>,
}

/// Header font sizes per level.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeadersConfig {
    pub h1: Option<f64>,
    pub h2: Option<f64>,
    pub h3: Option<f64>,
    pub h4: Option<f64>,
    pub h5: Option<f64>,
    pub h6: Option<f64>,
    pub foreground: Option<String>,
}

impl HeadersConfig {
    fn sizes(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("headers.h1", self.h1),
            ("headers.h2", self.h2),
            ("headers.h3", self.h3),
            ("headers.h4", self.h4),
            ("headers.h5", self.h5),
            ("headers.h6", self.h6),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub border_width: Option<f64>,
    pub border_brush: Option<String>,
    pub foreground: Option<String>,
    pub padding: Option<ThicknessValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub border_thickness: Option<f64>,
    pub border_brush: Option<String>,
    pub cell_padding: Option<ThicknessValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub thickness: Option<f64>,
    pub foreground: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a size to be strictly positive.
fn require_positive(value: Option<f64>, field: &str) -> Result<(), ConfigError> {
    match value {
        Some(v) if v <= 0.0 || v.is_nan() => Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        ))),
        _ => Ok(()),
    }
}

/// Require a metric to be zero or positive.
fn require_non_negative(value: Option<f64>, field: &str) -> Result<(), ConfigError> {
    match value {
        Some(v) if v < 0.0 || v.is_nan() => Err(ConfigError::Validation(format!(
            "{field} cannot be negative"
        ))),
        _ => Ok(()),
    }
}

/// Parse an optional color field.
fn parse_color(value: Option<&String>, field: &str) -> Result<Option<Color>, ConfigError> {
    value
        .map(|text| {
            Color::from_str(text)
                .map_err(|error| ConfigError::Validation(format!("{field}: {error}")))
        })
        .transpose()
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `mdtb.toml` in the current directory and its parents, falling back
    /// to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config_from(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Search `start` and its parents for `mdtb.toml`.
    #[must_use]
    pub fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load and validate configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns error if reading, parsing or validation fails.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a size is out of range or a
    /// color cannot be parsed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(self.fonts.size, "fonts.size")?;
        for (field, size) in self.headers.sizes() {
            require_positive(size, field)?;
        }
        require_non_negative(self.images.max_width, "images.max_width")?;
        require_non_negative(self.images.max_height, "images.max_height")?;
        require_non_negative(self.quote.border_width, "quote.border_width")?;
        require_non_negative(self.table.border_thickness, "table.border_thickness")?;
        require_non_negative(self.rule.thickness, "rule.thickness")?;
        if let Some(family) = &self.fonts.family
            && family.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "fonts.family cannot be empty".to_owned(),
            ));
        }
        self.render_style()?;
        Ok(())
    }

    /// Renderer style with every configured value applied over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a color cannot be parsed.
    pub fn render_style(&self) -> Result<RenderStyle, ConfigError> {
        let mut style = RenderStyle::default();

        if let Some(family) = &self.fonts.family {
            style.font_family.clone_from(family);
        }
        if let Some(size) = self.fonts.size {
            style.font_size = size;
        }
        style.emoji_font_family.clone_from(&self.fonts.emoji_family);
        style.inline_code.font_family.clone_from(&self.fonts.code_family);

        style.foreground = parse_color(self.colors.foreground.as_ref(), "colors.foreground")?;
        style.link_foreground = parse_color(self.colors.link.as_ref(), "colors.link")?;

        let code = &self.inline_code;
        style.inline_code.foreground =
            parse_color(code.foreground.as_ref(), "inline_code.foreground")?;
        style.inline_code.background =
            parse_color(code.background.as_ref(), "inline_code.background")?;
        style.inline_code.border_brush =
            parse_color(code.border_brush.as_ref(), "inline_code.border_brush")?;
        if let Some(thickness) = code.border_thickness {
            style.inline_code.border_thickness = thickness.into();
        }
        if let Some(padding) = code.padding {
            style.inline_code.padding = padding.into();
        }
        if let Some(margin) = code.margin {
            style.inline_code.margin = margin.into();
        }

        if let Some(max_width) = self.images.max_width {
            style.images.max_width = max_width;
        }
        if let Some(max_height) = self.images.max_height {
            style.images.max_height = max_height;
        }
        if let Some(stretch) = self.images.stretch {
            style.images.stretch = stretch;
        }

        for (size, (_, configured)) in style
            .headers
            .font_sizes
            .iter_mut()
            .zip(self.headers.sizes())
        {
            if let Some(configured) = configured {
                *size = configured;
            }
        }
        style.headers.foreground =
            parse_color(self.headers.foreground.as_ref(), "headers.foreground")?;

        if let Some(width) = self.quote.border_width {
            style.quote.border_width = width;
        }
        style.quote.border_brush =
            parse_color(self.quote.border_brush.as_ref(), "quote.border_brush")?;
        style.quote.foreground = parse_color(self.quote.foreground.as_ref(), "quote.foreground")?;
        if let Some(padding) = self.quote.padding {
            style.quote.padding = padding.into();
        }

        if let Some(thickness) = self.table.border_thickness {
            style.table.border_thickness = thickness;
        }
        style.table.border_brush =
            parse_color(self.table.border_brush.as_ref(), "table.border_brush")?;
        if let Some(padding) = self.table.cell_padding {
            style.table.cell_padding = padding.into();
        }

        if let Some(thickness) = self.rule.thickness {
            style.rule.thickness = thickness;
        }
        style.rule.foreground = parse_color(self.rule.foreground.as_ref(), "rule.foreground")?;

        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render_style().unwrap(), RenderStyle::default());
    }

    #[test]
    fn test_parse_fonts_and_colors() {
        let toml = r##"
[fonts]
family = "Inter"
size = 16
emoji_family = "Noto Color Emoji"

[colors]
link = "#0066CC"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        let style = config.render_style().unwrap();
        assert_eq!(style.font_family, "Inter");
        assert_eq!(style.font_size, 16.0);
        assert_eq!(style.emoji_font(), "Noto Color Emoji");
        assert_eq!(style.link_foreground, Some(Color::rgb(0x00, 0x66, 0xCC)));
        assert_eq!(style.foreground, None);
    }

    #[test]
    fn test_parse_thickness_forms() {
        let toml = r"
[inline_code]
border_thickness = 2
padding = [4, 1, 4, 1]
";
        let config: Config = toml::from_str(toml).unwrap();
        let style = config.render_style().unwrap();
        assert_eq!(style.inline_code.border_thickness, Thickness::uniform(2.0));
        assert_eq!(
            style.inline_code.padding,
            Thickness::new(4.0, 1.0, 4.0, 1.0)
        );
    }

    #[test]
    fn test_parse_images_and_headers() {
        let toml = r#"
[images]
max_width = 640
stretch = "uniform_to_fill"

[headers]
h1 = 32
h6 = 12
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let style = config.render_style().unwrap();
        assert_eq!(style.images.max_width, 640.0);
        assert_eq!(style.images.max_height, 0.0);
        assert_eq!(style.images.stretch, Stretch::UniformToFill);
        assert_eq!(style.headers.font_size(1), 32.0);
        assert_eq!(style.headers.font_size(2), RenderStyle::default().headers.font_size(2));
        assert_eq!(style.headers.font_size(6), 12.0);
    }

    #[test]
    fn test_invalid_color() {
        let toml = r#"
[quote]
foreground = "grey"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let error = config.validate().unwrap_err();
        assert!(matches!(error, ConfigError::Validation(_)));
        assert!(error.to_string().contains("quote.foreground"));
    }

    #[test]
    fn test_validate_font_size() {
        let config: Config = toml::from_str("[fonts]\nsize = 0").unwrap();
        let error = config.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Configuration error: fonts.size must be greater than 0"
        );
    }

    #[test]
    fn test_validate_negative_image_size() {
        let config: Config = toml::from_str("[images]\nmax_height = -1").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_font_family() {
        let config: Config = toml::from_str("[fonts]\nfamily = \" \"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_stretch_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[images]\nstretch = \"zoom\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let error = Config::load(Some(Path::new("/nonexistent/mdtb.toml"))).unwrap_err();
        assert!(matches!(error, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdtb.toml");
        std::fs::write(&path, "[rule]\nthickness = 1").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.render_style().unwrap().rule.thickness, 1.0);
    }

    #[test]
    fn test_load_from_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdtb.toml");
        std::fs::write(&path, "[fonts\nsize = 1").unwrap();

        let error = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs").join("guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("mdtb.toml"), "").unwrap();

        assert_eq!(
            Config::discover_config_from(&nested),
            Some(dir.path().join("mdtb.toml"))
        );
    }

    #[test]
    fn test_discover_prefers_nearest_config() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("mdtb.toml"), "").unwrap();
        std::fs::write(nested.join("mdtb.toml"), "").unwrap();

        assert_eq!(
            Config::discover_config_from(&nested),
            Some(nested.join("mdtb.toml"))
        );
    }
}
