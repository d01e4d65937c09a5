//! The visual tree a theme produces and the layout engine positions.
//!
//! Nodes carry only what the page needs to look right: geometry rules,
//! typography, paint. They know nothing about resumes beyond the [`Tag`]
//! attached for lookup.

use serde::Serialize;

use crate::layout::font_metrics::FontSpec;
use crate::models::{Rgb, SectionId};

// ────────────────────────────────────────────────────────────────────────────
// Paint and geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub color: Rgb,
    pub opacity: f32,
}

impl Paint {
    pub const fn solid(color: Rgb) -> Self {
        Self { color, opacity: 1.0 }
    }

    pub const fn with_opacity(self, opacity: f32) -> Self {
        Self {
            color: self.color,
            opacity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Horizontal `x`, vertical `y`.
    pub const fn xy(x: f32, y: f32) -> Self {
        Self::new(y, x, y, x)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorderSide {
    All,
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub side: BorderSide,
    pub width: f32,
    pub paint: Paint,
}

/// Lookup labels. A tag never changes how a node is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag {
    Section(SectionId),
    SectionHeader(SectionId),
    Header,
    Name,
    Title,
    Avatar,
    SkillToken,
    Link,
    Entry,
    ScanCode,
}

/// Box decoration shared by every node kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Frame {
    pub padding: Insets,
    pub fill: Option<Paint>,
    pub radius: f32,
    pub border: Option<Border>,
    pub tag: Option<Tag>,
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Align {
    #[default]
    Start,
    Center,
}

/// Width rule for one column of a [`NodeKind::Row`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Track {
    Fixed(f32),
    /// The child's own intrinsic width.
    Auto,
    /// A weighted share of what fixed and auto tracks leave over.
    Fraction(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextMode {
    /// Word-wrapped to the box width, newlines kept.
    Wrap,
    /// One line at natural width.
    Line,
    /// One line, uniformly shrunk to the box width when it would overflow.
    Fit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: FontSpec,
    pub paint: Paint,
    pub italic: bool,
    /// Multiple of the font size.
    pub line_height: f32,
}

impl TextStyle {
    pub const fn new(font: FontSpec, color: Rgb) -> Self {
        Self {
            font,
            paint: Paint::solid(color),
            italic: false,
            line_height: 1.4,
        }
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub const fn opacity(mut self, opacity: f32) -> Self {
        self.paint.opacity = opacity;
        self
    }

    pub fn line_box(&self) -> f32 {
        self.font.size * self.line_height
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImageSource {
    /// A `data:` URI, drawn as-is.
    Embedded(String),
    /// Fetched from the network. Preview links to it, export inlines it.
    Remote(String),
    /// Neutral person glyph drawn in place of a missing photo.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    pub source: ImageSource,
    pub width: f32,
    pub height: f32,
    pub round: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Glyph {
    Mail,
    Phone,
    MapPin,
    Linkedin,
    Github,
    Twitter,
    Facebook,
    Instagram,
    Globe,
    Terminal,
    User,
    Briefcase,
    Folder,
    GraduationCap,
    Cpu,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IconNode {
    pub glyph: Glyph,
    pub size: f32,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    Column {
        gap: f32,
        align: Align,
        children: Vec<Node>,
    },
    Row {
        gap: f32,
        align: Align,
        tracks: Vec<Track>,
        children: Vec<Node>,
    },
    /// Left-to-right run that wraps onto new lines. Skill chips.
    Flow {
        gap: f32,
        children: Vec<Node>,
    },
    Text {
        text: String,
        style: TextStyle,
        mode: TextMode,
    },
    Image(ImageNode),
    Icon(IconNode),
    /// Empty box. With a fill it is a bar or divider.
    Spacer {
        width: Option<f32>,
        height: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub frame: Frame,
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

impl Node {
    fn bare(kind: NodeKind) -> Self {
        Self {
            kind,
            frame: Frame::default(),
        }
    }

    pub fn column(gap: f32, children: Vec<Node>) -> Self {
        Self::bare(NodeKind::Column {
            gap,
            align: Align::Start,
            children,
        })
    }

    pub fn row(gap: f32, tracks: Vec<Track>, children: Vec<Node>) -> Self {
        Self::bare(NodeKind::Row {
            gap,
            align: Align::Start,
            tracks,
            children,
        })
    }

    pub fn flow(gap: f32, children: Vec<Node>) -> Self {
        Self::bare(NodeKind::Flow { gap, children })
    }

    pub fn text(text: impl Into<String>, style: TextStyle, mode: TextMode) -> Self {
        Self::bare(NodeKind::Text {
            text: text.into(),
            style,
            mode,
        })
    }

    pub fn image(source: ImageSource, width: f32, height: f32, round: bool) -> Self {
        Self::bare(NodeKind::Image(ImageNode {
            source,
            width,
            height,
            round,
        }))
    }

    pub fn icon(glyph: Glyph, size: f32, color: Rgb) -> Self {
        Self::bare(NodeKind::Icon(IconNode {
            glyph,
            size,
            paint: Paint::solid(color),
        }))
    }

    pub fn spacer(height: f32) -> Self {
        Self::bare(NodeKind::Spacer {
            width: None,
            height,
        })
    }

    /// A fixed-size filled block.
    pub fn bar(width: f32, height: f32, paint: Paint) -> Self {
        Self::bare(NodeKind::Spacer {
            width: Some(width),
            height,
        })
        .fill(paint)
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.frame.padding = padding;
        self
    }

    pub fn fill(mut self, paint: Paint) -> Self {
        self.frame.fill = Some(paint);
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.frame.radius = radius;
        self
    }

    pub fn border(mut self, side: BorderSide, width: f32, paint: Paint) -> Self {
        self.frame.border = Some(Border { side, width, paint });
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.frame.tag = Some(tag);
        self
    }

    /// Cross-axis alignment for columns and rows. Ignored elsewhere.
    pub fn align(mut self, value: Align) -> Self {
        match &mut self.kind {
            NodeKind::Column { align, .. } | NodeKind::Row { align, .. } => *align = value,
            _ => {}
        }
        self
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Column { children, .. }
            | NodeKind::Row { children, .. }
            | NodeKind::Flow { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first, document order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// All text carried by this subtree, in document order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if let NodeKind::Text { text, .. } = &n.kind {
                out.push(text.as_str());
            }
        });
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page-level paint
// ────────────────────────────────────────────────────────────────────────────

/// What sits behind the whole page, outside the scaled block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Background {
    Solid(Rgb),
    /// `left` up to `at` (fraction of page width), `right` after it.
    Split { left: Rgb, right: Rgb, at: f32 },
}

impl Background {
    /// The colour a rasterizer should flood the canvas with.
    pub fn base(&self) -> Rgb {
        match self {
            Background::Solid(c) => *c,
            Background::Split { right, .. } => *right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Offsets are page pixels from the anchor corner, x rightwards, y downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    Circle { dx: f32, dy: f32, r: f32 },
    Rect { dx: f32, dy: f32, width: f32, height: f32 },
    /// Hairline grid over the whole page.
    Grid { step: f32 },
}

/// Background ornament. Never takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decoration {
    pub anchor: Anchor,
    pub shape: Shape,
    pub paint: Paint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{FontFamily, FontWeight};

    fn style() -> TextStyle {
        TextStyle::new(FontSpec::new(FontFamily::Sans, 12.0, FontWeight::Regular), Rgb::BLACK)
    }

    #[test]
    fn test_walk_visits_in_document_order() {
        let tree = Node::column(
            4.0,
            vec![
                Node::text("a", style(), TextMode::Line),
                Node::row(
                    2.0,
                    vec![Track::Auto, Track::Fraction(1.0)],
                    vec![
                        Node::text("b", style(), TextMode::Line),
                        Node::text("c", style(), TextMode::Wrap),
                    ],
                ),
                Node::text("d", style(), TextMode::Fit),
            ],
        );
        assert_eq!(tree.texts(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_align_only_applies_to_containers() {
        let text = Node::text("x", style(), TextMode::Line).align(Align::Center);
        assert!(matches!(text.kind, NodeKind::Text { .. }));
        let col = Node::column(0.0, vec![]).align(Align::Center);
        assert!(matches!(col.kind, NodeKind::Column { align: Align::Center, .. }));
    }
}
