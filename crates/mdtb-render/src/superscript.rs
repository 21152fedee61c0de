//! Superscript analysis and rewriting for link content.
//!
//! Embedded UI containers cannot live inside a hyperlink, so superscript
//! inside a link cannot be rendered as a raised box. A link whose visible
//! text is entirely superscript is turned inside out (the superscript goes
//! outside, the link inside); any other link has its superscript wrappers
//! flattened away.

use mdtb_model::{Inline, is_blank};

/// Whether every visible leaf of `inlines` is wrapped in exactly one
/// superscript.
///
/// Blank leaves are ignored. Composites other than superscript (bold, nested
/// links, ...) do not change the depth. Content with no visible leaf at all
/// is not considered superscript.
#[must_use]
pub fn all_text_is_superscript(inlines: &[Inline]) -> bool {
    let mut found_text = false;
    let all = inlines
        .iter()
        .all(|inline| leaves_at_depth_one(inline, 0, &mut found_text));
    all && found_text
}

fn leaves_at_depth_one(inline: &Inline, depth: usize, found_text: &mut bool) -> bool {
    if let Inline::Superscript(superscript) = inline {
        return superscript
            .inlines
            .iter()
            .all(|child| leaves_at_depth_one(child, depth + 1, found_text));
    }
    if let Some(children) = inline.children() {
        return children
            .iter()
            .all(|child| leaves_at_depth_one(child, depth, found_text));
    }
    match inline.leaf_text() {
        Some(text) if !is_blank(text) => {
            *found_text = true;
            depth == 1
        }
        _ => true,
    }
}

/// Copy of `inlines` with every superscript wrapper removed, at any depth.
///
/// The wrapper's children are hoisted into its place. With `insert_caret`,
/// a `^` text run is inserted before each hoisted group so the superscript
/// stays readable as plain text.
#[must_use]
pub fn remove_superscript_runs(inlines: &[Inline], insert_caret: bool) -> Vec<Inline> {
    let mut out = Vec::with_capacity(inlines.len());
    hoist_into(&mut out, inlines, insert_caret);
    out
}

fn hoist_into(out: &mut Vec<Inline>, inlines: &[Inline], insert_caret: bool) {
    for inline in inlines {
        match inline {
            Inline::Superscript(superscript) => {
                if insert_caret {
                    out.push(Inline::text("^"));
                }
                hoist_into(out, &superscript.inlines, insert_caret);
            }
            other => match other.children() {
                Some(children) => {
                    out.push(other.with_children(remove_superscript_runs(children, insert_caret)));
                }
                None => out.push(other.clone()),
            },
        }
    }
}
