//! `mdtb render` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use mdtb_config::Config;
use mdtb_render::{ImageOutcome, LinkCollector, MarkdownRenderer, RegisteredLink};

use super::images::FsImageResolver;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover mdtb.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not list registered links after the tree.
    #[arg(long)]
    no_links: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the file cannot be read or
    /// rendering fails.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref())?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        let style = config.render_style()?;

        let markdown = tokio::fs::read_to_string(&self.file)
            .await
            .map_err(|source| CliError::Read {
                path: self.file.clone(),
                source,
            })?;

        let base_dir = self.file.parent().unwrap_or(Path::new("."));
        let links = Arc::new(LinkCollector::new());
        let register = Arc::clone(&links);
        let renderer = MarkdownRenderer::new()
            .with_style(style)
            .with_link_register(register)
            .with_image_resolver(Arc::new(FsImageResolver::new(base_dir)));

        let rendered = renderer.render_markdown(&markdown)?;
        let outcomes = rendered.resolve_images().await;

        output.print(&rendered.outline());

        if !self.no_links {
            let registered = links.links();
            if !registered.is_empty() {
                output.highlight("Links:");
                output.print(&format_links(&registered));
            }
        }

        let summary = ImageSummary::from_outcomes(&outcomes);
        if summary.total() > 0 {
            output.info(&summary.to_string());
        }
        if summary.rejected > 0 {
            output.warning(&format!(
                "{} image(s) could not be placed inside links",
                summary.rejected
            ));
        }

        Ok(())
    }
}

/// One line per registered link.
fn format_links(links: &[RegisteredLink]) -> String {
    links
        .iter()
        .map(|link| {
            if link.is_hyperlink_image {
                format!("  {} (image)\n", link.url)
            } else {
                format!("  {}\n", link.url)
            }
        })
        .collect()
}

/// Counts of image task outcomes.
#[derive(Debug, Default, PartialEq, Eq)]
struct ImageSummary {
    replaced: usize,
    unresolved: usize,
    rejected: usize,
}

impl ImageSummary {
    fn from_outcomes(outcomes: &[ImageOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                ImageOutcome::Replaced => summary.replaced += 1,
                ImageOutcome::Unresolved => summary.unresolved += 1,
                ImageOutcome::Rejected => summary.rejected += 1,
            }
        }
        summary
    }

    fn total(&self) -> usize {
        self.replaced + self.unresolved + self.rejected
    }
}

impl std::fmt::Display for ImageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Images: {} resolved, {} unresolved, {} rejected",
            self.replaced, self.unresolved, self.rejected
        )
    }
}
