//! Host-provided collaborators: link registration, image resolution and
//! code highlighting.

use std::sync::{Mutex, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::visual::{ImageSource, InlineCollection, NodeId};

/// Receives every clickable node the renderer creates.
pub trait LinkRegister: Send + Sync {
    /// Register `target` as a click target for `url`.
    ///
    /// `is_hyperlink_image` is set for images whose click target differs
    /// from the image they display.
    fn register_new_hyperlink(&self, target: NodeId, url: &str, is_hyperlink_image: bool);
}

/// Link register that ignores every registration.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLinkRegister;

impl LinkRegister for NoopLinkRegister {
    fn register_new_hyperlink(&self, _target: NodeId, _url: &str, _is_hyperlink_image: bool) {}
}

/// A registration recorded by [`LinkCollector`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredLink {
    pub target: NodeId,
    pub url: String,
    pub is_hyperlink_image: bool,
}

/// Link register that records registrations in order.
#[derive(Debug, Default)]
pub struct LinkCollector {
    links: Mutex<Vec<RegisteredLink>>,
}

impl LinkCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations so far, oldest first.
    #[must_use]
    pub fn links(&self) -> Vec<RegisteredLink> {
        self.links
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LinkRegister for LinkCollector {
    fn register_new_hyperlink(&self, target: NodeId, url: &str, is_hyperlink_image: bool) {
        self.links
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RegisteredLink {
                target,
                url: url.to_owned(),
                is_hyperlink_image,
            });
    }
}

/// Resolves image URLs to displayable data.
pub trait ImageResolver: Send + Sync {
    /// Start resolving `url`. The future yields `None` when the image cannot
    /// be displayed; the placeholder text then stays in place.
    fn resolve_image(&self, url: &str, tooltip: Option<&str>)
    -> BoxFuture<'static, Option<ImageSource>>;
}

/// Image resolver that never resolves anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve_image(
        &self,
        _url: &str,
        _tooltip: Option<&str>,
    ) -> BoxFuture<'static, Option<ImageSource>> {
        futures::future::ready(None).boxed()
    }
}

/// Syntax highlighter for fenced code blocks.
pub trait CodeBlockResolver: Send + Sync {
    /// Append highlighted runs for `text` to `inlines`.
    ///
    /// Returns `false`, leaving `inlines` untouched, when the language is
    /// not supported; the renderer then falls back to a plain run.
    fn parse_syntax(&self, inlines: &InlineCollection, text: &str, language: Option<&str>)
    -> bool;
}
