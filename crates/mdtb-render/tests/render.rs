//! End-to-end rendering tests.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use mdtb_model::{
    Block, CodeInline, Document, EmojiInline, HyperlinkInline, ImageInline, Inline, LinkType,
    MarkdownLinkInline, StrikethroughInline,
};
use mdtb_render::{
    BlockContext, Element, ImageOutcome, ImageResolver, ImageSource, ImageTasks, InlineCollection,
    InlineContext, InlineNode, InlineOutline, InlineRenderer, LinkCollector, MarkdownRenderer,
    ParentKind, ParentStyle, RenderContext, RenderError, Stretch,
};
use pretty_assertions::assert_eq;

/// Resolves every URL except those starting with `missing`.
struct StaticImages;

impl ImageResolver for StaticImages {
    fn resolve_image(
        &self,
        url: &str,
        _tooltip: Option<&str>,
    ) -> BoxFuture<'static, Option<ImageSource>> {
        let source = (!url.starts_with("missing")).then(|| ImageSource::new(url));
        futures::future::ready(source).boxed()
    }
}

/// Never resolves.
struct StalledImages;

impl ImageResolver for StalledImages {
    fn resolve_image(
        &self,
        _url: &str,
        _tooltip: Option<&str>,
    ) -> BoxFuture<'static, Option<ImageSource>> {
        futures::future::pending().boxed()
    }
}

fn image(url: &str, text: &str, width: u32, height: u32) -> Inline {
    Inline::Image(ImageInline {
        url: url.to_owned(),
        render_url: url.to_owned(),
        tooltip: None,
        text: text.to_owned(),
        image_width: width,
        image_height: height,
    })
}

fn link(url: &str, inlines: Vec<Inline>) -> Inline {
    Inline::MarkdownLink(MarkdownLinkInline {
        url: url.to_owned(),
        tooltip: None,
        inlines,
    })
}

fn paragraph(inlines: Vec<Inline>) -> Document {
    Document::new(vec![Block::paragraph(inlines)])
}

#[test]
fn test_hello_world_outline() {
    let rendered = MarkdownRenderer::new()
        .render_markdown("Hello **world**!")
        .unwrap();
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Run \"Hello \"\n\
         \x20   Span bold\n\
         \x20     Run \"world\"\n\
         \x20   Run \"!\"\n"
    );
}

#[test]
fn test_children_keep_source_order() {
    let rendered = MarkdownRenderer::new()
        .render(&paragraph(vec![
            Inline::text("one "),
            Inline::italic(vec![Inline::text("two")]),
            Inline::text(" three "),
            Inline::code("four"),
        ]))
        .unwrap();
    let Element::RichText(rich) = &rendered.elements[0] else {
        panic!("expected rich text");
    };
    let kinds: Vec<&str> = rich.paragraphs[0]
        .inlines
        .snapshot()
        .iter()
        .map(|node| match node {
            InlineNode::Run(_) => "run",
            InlineNode::Span(_) => "span",
            InlineNode::Hyperlink(_) => "hyperlink",
            InlineNode::Container(_) => "container",
        })
        .collect();
    assert_eq!(kinds, vec!["run", "span", "run", "container"]);
}

#[test]
fn test_all_superscript_link_is_inverted() {
    let rendered = MarkdownRenderer::new()
        .render(&paragraph(vec![
            Inline::text("note"),
            link(
                "https://example.com/1",
                vec![Inline::superscript(vec![Inline::text("1")])],
            ),
        ]))
        .unwrap();
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Run \"note\"\n\
         \x20   InlineContainer\n\
         \x20     Border padding=0.0,0.0,0.0,2.2\n\
         \x20       RichText\n\
         \x20         Paragraph font=\"Segoe UI\" size=11.2\n\
         \x20           Hyperlink \"https://example.com/1\" tooltip=\"https://example.com/1\"\n\
         \x20             Run \"1\"\n"
    );
}

#[test]
fn test_mixed_link_flattens_superscript_with_caret() {
    let rendered = MarkdownRenderer::new()
        .render(&paragraph(vec![link(
            "https://example.com",
            vec![
                Inline::text("x"),
                Inline::superscript(vec![Inline::text("2")]),
            ],
        )]))
        .unwrap();
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Hyperlink \"https://example.com\" tooltip=\"https://example.com\"\n\
         \x20     Run \"x\"\n\
         \x20     Run \"^\"\n\
         \x20     Run \"2\"\n"
    );
}

#[test]
fn test_link_title_becomes_tooltip() {
    let rendered = MarkdownRenderer::new()
        .render_markdown("[docs](https://example.com \"Read the docs\")")
        .unwrap();
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Hyperlink \"https://example.com\" tooltip=\"Read the docs\"\n\
         \x20     Run \"docs\"\n"
    );
}

#[test]
fn test_inline_code_in_hyperlink_is_plain_run() {
    let rendered = MarkdownRenderer::new()
        .render(&paragraph(vec![link(
            "https://example.com",
            vec![Inline::Code(CodeInline {
                text: "SomeCode".to_owned(),
            })],
        )]))
        .unwrap();
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Hyperlink \"https://example.com\" tooltip=\"https://example.com\"\n\
         \x20     Run \"SomeCode\" font=\"Segoe UI\"\n"
    );
}

#[test]
fn test_every_inline_operation_rejects_block_context() {
    let cases = [
        (Inline::text("x"), "render_text_run"),
        (
            Inline::Emoji(EmojiInline {
                text: "😀".to_owned(),
            }),
            "render_emoji",
        ),
        (Inline::bold(vec![Inline::text("x")]), "render_bold"),
        (Inline::italic(vec![Inline::text("x")]), "render_italic"),
        (
            Inline::Strikethrough(StrikethroughInline {
                inlines: vec![Inline::text("x")],
            }),
            "render_strikethrough",
        ),
        (Inline::superscript(vec![Inline::text("x")]), "render_superscript"),
        (Inline::subscript(vec![Inline::text("x")]), "render_subscript"),
        (Inline::code("x"), "render_code"),
        (
            Inline::Hyperlink(HyperlinkInline {
                url: "https://example.com".to_owned(),
                text: "https://example.com".to_owned(),
                link_type: LinkType::FullUrl,
            }),
            "render_hyperlink",
        ),
        (
            link(
                "https://example.com",
                vec![Inline::text("x"), Inline::superscript(vec![Inline::text("2")])],
            ),
            "render_markdown_link",
        ),
        (
            link(
                "https://example.com",
                vec![Inline::superscript(vec![Inline::text("1")])],
            ),
            "render_markdown_link",
        ),
        (image("a.png", "alt", 0, 0), "render_image"),
    ];

    let renderer = MarkdownRenderer::new().with_image_resolver(Arc::new(StaticImages));
    for (inline, operation) in cases {
        let mut elements = Vec::new();
        let images = ImageTasks::new();
        let mut context = RenderContext::Block(BlockContext::new(&mut elements, images.clone()));
        assert_eq!(
            renderer.render_inline(&inline, &mut context),
            Err(RenderError::ContextIncorrect { operation }),
            "{operation}"
        );
        assert!(elements.is_empty());
        assert!(images.is_empty());
    }
}

#[test]
fn test_subscript_in_link_renders_in_place() {
    let rendered = MarkdownRenderer::new()
        .render(&paragraph(vec![link(
            "u",
            vec![
                Inline::text("H"),
                Inline::subscript(vec![Inline::text("2")]),
                Inline::text("O"),
            ],
        )]))
        .unwrap();
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Hyperlink \"u\" tooltip=\"u\"\n\
         \x20     Run \"H\"\n\
         \x20     Run \"2\"\n\
         \x20     Run \"O\"\n"
    );
}

#[test]
fn test_superscript_within_hyperlink_renders_in_place() {
    let mut context = InlineContext::new(InlineCollection::new())
        .with_parent(ParentStyle::new(ParentKind::Hyperlink, 14.0, "Segoe UI"));
    context.within_hyperlink = true;
    let collection = context.inlines.clone();
    let mut context = RenderContext::Inline(context);

    MarkdownRenderer::new()
        .render_inlines(
            &[
                Inline::text("x"),
                Inline::superscript(vec![Inline::text("2")]),
            ],
            &mut context,
        )
        .unwrap();
    assert_eq!(
        InlineOutline(&collection).to_string(),
        "Run \"x\"\nRun \"2\"\n"
    );
}

#[test]
fn test_superscript_without_parent_style_fails_render() {
    let mut context = RenderContext::Inline(InlineContext::new(InlineCollection::new()));
    let result = MarkdownRenderer::new().render_inlines(
        &[link(
            "https://example.com",
            vec![Inline::superscript(vec![Inline::text("1")])],
        )],
        &mut context,
    );
    assert!(matches!(result, Err(RenderError::ContextIncorrect { .. })));
}

#[tokio::test]
async fn test_image_replaces_placeholder_in_place() {
    let links = Arc::new(LinkCollector::new());
    let rendered = MarkdownRenderer::new()
        .with_image_resolver(Arc::new(StaticImages))
        .with_link_register(links.clone())
        .render(&paragraph(vec![
            Inline::text("before "),
            image("a.png", "alt", 100, 0),
            Inline::text(" after"),
        ]))
        .unwrap();

    assert_eq!(rendered.pending_images(), 1);
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Run \"before \"\n\
         \x20   Run \"alt\"\n\
         \x20   Run \" after\"\n"
    );

    assert_eq!(rendered.resolve_images().await, vec![ImageOutcome::Replaced]);
    assert_eq!(rendered.pending_images(), 0);
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Run \"before \"\n\
         \x20   InlineContainer\n\
         \x20     Scroll horizontal=Auto vertical=Disabled\n\
         \x20       ScaleBox shrink_only\n\
         \x20         ClickTarget\n\
         \x20           Image \"a.png\" width=100.0 height=100.0 stretch=UniformToFill\n\
         \x20   Run \" after\"\n"
    );

    let registered = links.links();
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].url, "a.png");
    assert!(!registered[0].is_hyperlink_image);
}

#[tokio::test]
async fn test_linked_image_registers_target() {
    let links = Arc::new(LinkCollector::new());
    let rendered = MarkdownRenderer::new()
        .with_image_resolver(Arc::new(StaticImages))
        .with_link_register(links.clone())
        .render_markdown("[![logo](logo.png)](https://example.com)")
        .unwrap();

    assert_eq!(rendered.resolve_images().await, vec![ImageOutcome::Replaced]);

    let registered = links.links();
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].url, "https://example.com");
    assert!(registered[0].is_hyperlink_image);
}

#[tokio::test]
async fn test_unresolved_image_keeps_placeholder() {
    let rendered = MarkdownRenderer::new()
        .with_image_resolver(Arc::new(StaticImages))
        .render(&paragraph(vec![image("missing.png", "gone", 0, 0)]))
        .unwrap();
    assert_eq!(rendered.resolve_images().await, vec![ImageOutcome::Unresolved]);
    assert_eq!(
        rendered.outline(),
        "RichText\n  Paragraph\n    Run \"gone\"\n"
    );
}

#[tokio::test]
async fn test_stalled_resolver_leaves_tree_intact() {
    let rendered = MarkdownRenderer::new()
        .with_image_resolver(Arc::new(StalledImages))
        .render(&paragraph(vec![
            Inline::text("a "),
            image("slow.png", "slow", 0, 0),
            Inline::text(" b"),
        ]))
        .unwrap();

    let expected = "RichText\n\
                    \x20 Paragraph\n\
                    \x20   Run \"a \"\n\
                    \x20   Run \"slow\"\n\
                    \x20   Run \" b\"\n";
    assert_eq!(rendered.outline(), expected);

    let timed_out = tokio::time::timeout(Duration::from_millis(20), rendered.resolve_images()).await;
    assert!(timed_out.is_err());
    assert_eq!(rendered.outline(), expected);
}

#[tokio::test]
async fn test_image_inside_hyperlink_is_rejected() {
    let rendered = MarkdownRenderer::new()
        .with_image_resolver(Arc::new(StaticImages))
        .render(&paragraph(vec![link(
            "https://example.com",
            vec![Inline::text("see "), image("a.png", "pic", 0, 0)],
        )]))
        .unwrap();

    assert_eq!(rendered.resolve_images().await, vec![ImageOutcome::Rejected]);
    assert_eq!(
        rendered.outline(),
        "RichText\n\
         \x20 Paragraph\n\
         \x20   Hyperlink \"https://example.com\" tooltip=\"https://example.com\"\n\
         \x20     Run \"see \"\n\
         \x20     Run \"pic\"\n"
    );
}

#[tokio::test]
async fn test_several_images_splice_independently() {
    let rendered = MarkdownRenderer::new()
        .with_image_resolver(Arc::new(StaticImages))
        .render(&paragraph(vec![
            image("one.png", "1", 10, 10),
            image("missing.png", "2", 0, 0),
            image("three.png", "3", 0, 0),
        ]))
        .unwrap();

    assert_eq!(
        rendered.resolve_images().await,
        vec![
            ImageOutcome::Replaced,
            ImageOutcome::Unresolved,
            ImageOutcome::Replaced,
        ]
    );

    let Element::RichText(rich) = &rendered.elements[0] else {
        panic!("expected rich text");
    };
    let nodes = rich.paragraphs[0].inlines.snapshot();
    assert_eq!(nodes.len(), 3);
    assert!(matches!(nodes[0], InlineNode::Container(_)));
    assert!(matches!(&nodes[1], InlineNode::Run(run) if run.text == "2"));
    assert!(matches!(nodes[2], InlineNode::Container(_)));
}

#[tokio::test]
async fn test_both_dimensions_stretch_to_fill() {
    let rendered = MarkdownRenderer::new()
        .with_image_resolver(Arc::new(StaticImages))
        .render(&paragraph(vec![image("a.png", "a", 30, 20)]))
        .unwrap();
    rendered.resolve_images().await;
    assert!(
        rendered
            .outline()
            .contains("Image \"a.png\" width=30.0 height=20.0 stretch=Fill")
    );
    assert!(!rendered.outline().contains(&format!("{:?}", Stretch::UniformToFill)));
}

#[test]
fn test_inline_renderer_on_standalone_collection() {
    let collection = InlineCollection::new();
    let context = InlineContext::new(collection.clone())
        .with_parent(ParentStyle::new(ParentKind::Paragraph, 14.0, "Segoe UI"));
    let mut context = RenderContext::Inline(context);
    MarkdownRenderer::new()
        .render_inlines(&[Inline::text("a"), Inline::text("b")], &mut context)
        .unwrap();
    assert_eq!(collection.len(), 2);
}
