//! Theme rendering: resume data in, a page-ready node tree out.
//!
//! Rendering is a pure function of its inputs. The only effect it has is to
//! ask for text-fit measurements later, when the tree is composed.

pub mod creative;
pub mod cyber;
pub mod minimal;
pub mod modern;
pub mod sections;
pub mod svg;

use serde::Serialize;

use crate::layout::node::{Background, Decoration, Node, Tag};
use crate::models::language::{labels, Labels};
use crate::models::{Language, LayoutConfig, ResumeData, Rgb, SectionId, ThemeKind, ThemeSelection};

pub const DEFAULT_SCAN_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// A theme's output, before layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub theme: ThemeKind,
    /// Size multiplier, applied once around the whole page.
    pub scale: f32,
    pub background: Background,
    pub decorations: Vec<Decoration>,
    pub root: Node,
}

impl RenderedDocument {
    /// Sections in the order they appear on the page.
    pub fn section_order(&self) -> Vec<SectionId> {
        let mut out = Vec::new();
        self.root.walk(&mut |n| {
            if let Some(Tag::Section(id)) = n.frame.tag {
                out.push(id);
            }
        });
        out
    }

    pub fn has_header(&self, id: SectionId) -> bool {
        self.count(Tag::SectionHeader(id)) > 0
    }

    pub fn count(&self, tag: Tag) -> usize {
        let mut n = 0;
        self.root.walk(&mut |node| {
            if node.frame.tag == Some(tag) {
                n += 1;
            }
        });
        n
    }

    /// Text of every node tagged `tag`, one string per node.
    pub fn tagged_texts(&self, tag: Tag) -> Vec<String> {
        let mut out = Vec::new();
        self.root.walk(&mut |n| {
            if n.frame.tag == Some(tag) {
                out.push(n.texts().join(" "));
            }
        });
        out
    }
}

/// Everything a theme needs besides the resume and layout.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub accent: Rgb,
    pub labels: &'static Labels,
    /// Base URL of the scannable-code image service.
    pub scan_service: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(accent: Rgb, language: Language, scan_service: &'a str) -> Self {
        Self {
            accent,
            labels: labels(language),
            scan_service,
        }
    }
}

/// One visual composition rule.
pub trait ThemeRenderer: Send + Sync {
    fn render(&self, data: &ResumeData, layout: &LayoutConfig, ctx: &RenderContext<'_>) -> RenderedDocument;
}

impl ThemeKind {
    pub fn renderer(self) -> &'static dyn ThemeRenderer {
        match self {
            ThemeKind::Modern => &modern::Modern,
            ThemeKind::Minimal => &minimal::Minimal,
            ThemeKind::Creative => &creative::Creative,
            ThemeKind::Cyber => &cyber::Cyber,
        }
    }
}

/// Renders with the default scan-code service.
pub fn render(
    data: &ResumeData,
    selection: &ThemeSelection,
    layout: &LayoutConfig,
    language: Language,
) -> RenderedDocument {
    let ctx = RenderContext::new(selection.accent, language, DEFAULT_SCAN_SERVICE);
    render_with(data, selection.theme, layout, &ctx)
}

pub fn render_with(
    data: &ResumeData,
    theme: ThemeKind,
    layout: &LayoutConfig,
    ctx: &RenderContext<'_>,
) -> RenderedDocument {
    theme.renderer().render(data, layout, ctx)
}

// ────────────────────────────────────────────────────────────────────────────
// Cross-theme properties
// ────────────────────────────────────────────────────────────────────────────
