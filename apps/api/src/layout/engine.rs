//! Box layout: widths flow down from the page, heights flow back up.
//!
//! The page is laid out at `PAGE_WIDTH / scale` logical pixels and then drawn
//! through one `scale(s)` transform anchored at the top-left corner, so the
//! size multiplier changes every element by the same factor.

use serde::Serialize;

use crate::layout::font_metrics::{wrap_lines, TextMeasurer};
use crate::layout::node::{
    Align, Anchor, Background, Decoration, Frame, IconNode, ImageNode, ImageSource, Node,
    NodeKind, Paint, Shape, Tag, TextMode, TextStyle, Track,
};
use crate::layout::text_fit::FitCache;
use crate::models::ThemeKind;
use crate::render::RenderedDocument;

/// A4 at 96 dpi.
pub const PAGE_WIDTH: f32 = 794.0;
pub const PAGE_HEIGHT: f32 = 1123.0;

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[cfg(test)]
    pub fn scaled(&self, s: f32) -> Rect {
        Rect {
            x: self.x * s,
            y: self.y * s,
            width: self.width * s,
            height: self.height * s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedText {
    pub lines: Vec<String>,
    pub style: TextStyle,
    /// Text-fit factor; 1.0 unless the line was shrunk.
    pub fit: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Placed {
    Container,
    Text(PlacedText),
    Image(ImageNode),
    Icon(IconNode),
    Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox {
    /// Border box in logical pixels.
    pub rect: Rect,
    pub frame: Frame,
    pub content: Placed,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    fn translate(&mut self, dx: f32, dy: f32) {
        self.rect.x += dx;
        self.rect.y += dy;
        for child in &mut self.children {
            child.translate(dx, dy);
        }
    }

    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a LayoutBox)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Page decoration resolved to absolute page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PageShape {
    Circle { cx: f32, cy: f32, r: f32 },
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Grid { step: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageOrnament {
    pub shape: PageShape,
    pub paint: Paint,
}

/// A fully positioned page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub theme: ThemeKind,
    pub page_width: f32,
    /// At least one A4 page; taller when content runs on.
    pub page_height: f32,
    pub scale: f32,
    pub background: Background,
    pub ornaments: Vec<PageOrnament>,
    pub root: LayoutBox,
    /// Fitted texts whose measurement was not trustworthy on this pass.
    pub pending_rechecks: usize,
}

impl Composition {
    /// First box with `tag`, in logical pixels.
    #[cfg(test)]
    pub fn find(&self, tag: Tag) -> Option<&LayoutBox> {
        self.find_all(tag).into_iter().next()
    }

    #[cfg(test)]
    pub fn find_all(&self, tag: Tag) -> Vec<&LayoutBox> {
        let mut out = Vec::new();
        self.root.walk(&mut |b| {
            if b.frame.tag == Some(tag) {
                out.push(b);
            }
        });
        out
    }

    /// The on-page bounding box of the first box with `tag`, after the
    /// size transform.
    #[cfg(test)]
    pub fn outer_box(&self, tag: Tag) -> Option<Rect> {
        self.find(tag).map(|b| b.rect.scaled(self.scale))
    }

    /// URLs of images that have to be fetched before rasterizing.
    pub fn remote_images(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        self.root.walk(&mut |b| {
            if let Placed::Image(ImageNode {
                source: ImageSource::Remote(url),
                ..
            }) = &b.content
            {
                if !out.contains(url) {
                    out.push(url.clone());
                }
            }
        });
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

struct Engine<'a> {
    measurer: &'a dyn TextMeasurer,
    fits: &'a mut FitCache,
    pending: usize,
}

/// Lays out a rendered document onto the page.
pub fn compose(
    doc: &RenderedDocument,
    measurer: &dyn TextMeasurer,
    fits: &mut FitCache,
) -> Composition {
    let scale = doc.scale;
    let logical_width = PAGE_WIDTH / scale;
    let min_logical_height = PAGE_HEIGHT / scale;

    let mut engine = Engine {
        measurer,
        fits,
        pending: 0,
    };
    let mut root = engine.layout(&doc.root, 0.0, 0.0, logical_width);
    root.rect.width = logical_width;
    if root.rect.height < min_logical_height {
        root.rect.height = min_logical_height;
    }

    let page_height = (root.rect.height * scale).max(PAGE_HEIGHT);
    let ornaments = doc
        .decorations
        .iter()
        .map(|d| resolve(d, PAGE_WIDTH, page_height))
        .collect();

    Composition {
        theme: doc.theme,
        page_width: PAGE_WIDTH,
        page_height,
        scale,
        background: doc.background,
        ornaments,
        root,
        pending_rechecks: engine.pending,
    }
}

fn resolve(d: &Decoration, width: f32, height: f32) -> PageOrnament {
    let (ox, oy) = match d.anchor {
        Anchor::TopLeft => (0.0, 0.0),
        Anchor::TopRight => (width, 0.0),
        Anchor::BottomLeft => (0.0, height),
        Anchor::BottomRight => (width, height),
    };
    let shape = match d.shape {
        Shape::Circle { dx, dy, r } => PageShape::Circle {
            cx: ox + dx,
            cy: oy + dy,
            r,
        },
        Shape::Rect {
            dx,
            dy,
            width,
            height,
        } => PageShape::Rect {
            x: ox + dx,
            y: oy + dy,
            width,
            height,
        },
        Shape::Grid { step } => PageShape::Grid { step },
    };
    PageOrnament {
        shape,
        paint: d.paint,
    }
}

impl Engine<'_> {
    fn layout(&mut self, node: &Node, x: f32, y: f32, width: f32) -> LayoutBox {
        let pad = node.frame.padding;
        let inner_x = x + pad.left;
        let inner_y = y + pad.top;
        let inner_w = (width - pad.horizontal()).max(0.0);

        let (content, children, content_w, content_h) = match &node.kind {
            NodeKind::Column {
                gap,
                align,
                children,
            } => {
                let mut cy = inner_y;
                let mut placed = Vec::with_capacity(children.len());
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        cy += gap;
                    }
                    let cw = self.preferred_width(child).map_or(inner_w, |w| w.min(inner_w));
                    let cx = match align {
                        Align::Center => inner_x + (inner_w - cw) / 2.0,
                        Align::Start => inner_x,
                    };
                    let b = self.layout(child, cx, cy, cw);
                    cy += b.rect.height;
                    placed.push(b);
                }
                (Placed::Container, placed, inner_w, cy - inner_y)
            }

            NodeKind::Row {
                gap,
                align,
                tracks,
                children,
            } => {
                let widths = self.track_widths(tracks, children, *gap, inner_w);
                let mut cx = inner_x;
                let mut placed = Vec::with_capacity(children.len());
                for (child, cw) in children.iter().zip(&widths) {
                    placed.push(self.layout(child, cx, inner_y, *cw));
                    cx += cw + gap;
                }
                let h = placed.iter().map(|b| b.rect.height).fold(0.0, f32::max);
                if *align == Align::Center {
                    for b in &mut placed {
                        let dy = (h - b.rect.height) / 2.0;
                        b.translate(0.0, dy);
                    }
                }
                (Placed::Container, placed, inner_w, h)
            }

            NodeKind::Flow { gap, children } => {
                let right = inner_x + inner_w;
                let (mut cx, mut cy) = (inner_x, inner_y);
                let mut line_h = 0.0_f32;
                let mut placed = Vec::with_capacity(children.len());
                for child in children {
                    let cw = self.intrinsic_width(child).min(inner_w);
                    if cx > inner_x && cx + cw > right + 0.01 {
                        cx = inner_x;
                        cy += line_h + gap;
                        line_h = 0.0;
                    }
                    let b = self.layout(child, cx, cy, cw);
                    line_h = line_h.max(b.rect.height);
                    cx += cw + gap;
                    placed.push(b);
                }
                let h = if placed.is_empty() { 0.0 } else { cy + line_h - inner_y };
                (Placed::Container, placed, inner_w, h)
            }

            NodeKind::Text { text, style, mode } => {
                let (lines, fit) = match mode {
                    TextMode::Wrap => (wrap_lines(self.measurer, text, &style.font, inner_w), 1.0),
                    TextMode::Line => (vec![single_line(text)], 1.0),
                    TextMode::Fit => {
                        let line = single_line(text);
                        let measurer = self.measurer;
                        let outcome = self.fits.fit(&line, &style.font, inner_w, || {
                            measurer.measure(&line, &style.font)
                        });
                        if outcome.deferred {
                            self.pending += 1;
                        }
                        (vec![line], outcome.scale)
                    }
                };
                let h = lines.len() as f32 * style.line_box();
                let placed = PlacedText {
                    lines,
                    style: *style,
                    fit,
                };
                (Placed::Text(placed), Vec::new(), inner_w, h)
            }

            NodeKind::Image(image) => (
                Placed::Image(image.clone()),
                Vec::new(),
                image.width,
                image.height,
            ),

            NodeKind::Icon(icon) => (Placed::Icon(*icon), Vec::new(), icon.size, icon.size),

            NodeKind::Spacer { width: w, height } => {
                (Placed::Block, Vec::new(), w.unwrap_or(inner_w), *height)
            }
        };

        LayoutBox {
            rect: Rect {
                x,
                y,
                width: content_w + pad.horizontal(),
                height: content_h + pad.vertical(),
            },
            frame: node.frame.clone(),
            content,
            children,
        }
    }

    /// Width a column gives a child instead of its full width. Only
    /// self-sized leaves hug their content.
    fn preferred_width(&self, node: &Node) -> Option<f32> {
        match &node.kind {
            NodeKind::Image(_) | NodeKind::Icon(_) => Some(self.intrinsic_width(node)),
            NodeKind::Spacer { width: Some(_), .. } => Some(self.intrinsic_width(node)),
            NodeKind::Text {
                mode: TextMode::Line,
                ..
            } => Some(self.intrinsic_width(node)),
            _ => None,
        }
    }

    /// Natural width with nothing wrapped or shrunk.
    fn intrinsic_width(&self, node: &Node) -> f32 {
        let pad = node.frame.padding.horizontal();
        let content = match &node.kind {
            NodeKind::Text { text, style, mode } => match mode {
                TextMode::Wrap => text
                    .split('\n')
                    .map(|p| self.measurer.measure(p, &style.font))
                    .fold(0.0, f32::max),
                TextMode::Line | TextMode::Fit => {
                    self.measurer.measure(&single_line(text), &style.font)
                }
            },
            NodeKind::Image(image) => image.width,
            NodeKind::Icon(icon) => icon.size,
            NodeKind::Spacer { width, .. } => width.unwrap_or(0.0),
            NodeKind::Column { children, .. } => children
                .iter()
                .map(|c| self.intrinsic_width(c))
                .fold(0.0, f32::max),
            NodeKind::Row {
                gap,
                tracks,
                children,
                ..
            } => {
                let sum: f32 = children
                    .iter()
                    .enumerate()
                    .map(|(i, c)| match tracks.get(i) {
                        Some(Track::Fixed(w)) => *w,
                        _ => self.intrinsic_width(c),
                    })
                    .sum();
                sum + gap * children.len().saturating_sub(1) as f32
            }
            NodeKind::Flow { gap, children } => {
                let sum: f32 = children.iter().map(|c| self.intrinsic_width(c)).sum();
                sum + gap * children.len().saturating_sub(1) as f32
            }
        };
        content + pad
    }

    fn track_widths(&self, tracks: &[Track], children: &[Node], gap: f32, inner_w: f32) -> Vec<f32> {
        let track_of = |i: usize| tracks.get(i).copied().unwrap_or(Track::Fraction(1.0));
        let gaps = gap * children.len().saturating_sub(1) as f32;

        let mut widths = vec![0.0_f32; children.len()];
        let mut used = gaps;
        let mut weight = 0.0_f32;
        for (i, child) in children.iter().enumerate() {
            match track_of(i) {
                Track::Fixed(w) => {
                    widths[i] = w;
                    used += w;
                }
                Track::Auto => {
                    let w = self.intrinsic_width(child);
                    widths[i] = w;
                    used += w;
                }
                Track::Fraction(f) => weight += f.max(0.0),
            }
        }

        let remaining = (inner_w - used).max(0.0);
        if weight > 0.0 {
            for i in 0..children.len() {
                if let Track::Fraction(f) = track_of(i) {
                    widths[i] = remaining * f.max(0.0) / weight;
                }
            }
        }
        widths
    }
}

/// Fitted and single-line texts never break.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{FontFamily, FontSpec, FontWeight, StaticMetrics};
    use crate::layout::node::Insets;
    use crate::models::{Rgb, SectionId};

    fn style(size: f32) -> TextStyle {
        TextStyle::new(FontSpec::new(FontFamily::Sans, size, FontWeight::Regular), Rgb::BLACK)
    }

    fn doc(root: Node, scale: f32) -> RenderedDocument {
        RenderedDocument {
            theme: ThemeKind::Minimal,
            scale,
            background: Background::Solid(Rgb::WHITE),
            decorations: Vec::new(),
            root,
        }
    }

    fn compose_plain(root: Node, scale: f32) -> Composition {
        compose(&doc(root, scale), &StaticMetrics, &mut FitCache::new())
    }

    #[test]
    fn test_page_is_at_least_one_a4() {
        let c = compose_plain(Node::column(0.0, vec![Node::spacer(10.0)]), 1.0);
        assert_eq!(c.page_width, PAGE_WIDTH);
        assert_eq!(c.page_height, PAGE_HEIGHT);
        assert_eq!(c.root.rect.height, PAGE_HEIGHT);
    }

    #[test]
    fn test_tall_content_extends_page() {
        let c = compose_plain(Node::column(0.0, vec![Node::spacer(2000.0)]), 1.0);
        assert_eq!(c.page_height, 2000.0);
    }

    #[test]
    fn test_column_stacks_with_gap_and_padding() {
        let root = Node::column(
            10.0,
            vec![Node::spacer(20.0).tag(Tag::Entry), Node::spacer(30.0).tag(Tag::Name)],
        )
        .padding(Insets::all(5.0));
        let c = compose_plain(root, 1.0);
        let first = c.find(Tag::Entry).unwrap().rect;
        let second = c.find(Tag::Name).unwrap().rect;
        assert_eq!((first.x, first.y), (5.0, 5.0));
        assert_eq!(second.y, 5.0 + 20.0 + 10.0);
        assert_eq!(first.width, PAGE_WIDTH - 10.0);
    }

    #[test]
    fn test_row_fraction_tracks_split_remaining_width() {
        let root = Node::row(
            0.0,
            vec![Track::Fraction(1.0), Track::Fraction(2.0)],
            vec![Node::spacer(1.0).tag(Tag::Entry), Node::spacer(1.0).tag(Tag::Name)],
        );
        let c = compose_plain(root, 1.0);
        let left = c.find(Tag::Entry).unwrap().rect;
        let right = c.find(Tag::Name).unwrap().rect;
        assert!((left.width - PAGE_WIDTH / 3.0).abs() < 1e-3);
        assert!((right.x - PAGE_WIDTH / 3.0).abs() < 1e-3);
        assert!((right.width - PAGE_WIDTH * 2.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_flow_wraps_chips_onto_new_lines() {
        let chips: Vec<Node> = (0..30)
            .map(|i| {
                Node::text(format!("Skill{i}"), style(14.0), TextMode::Line)
                    .padding(Insets::xy(8.0, 4.0))
                    .tag(Tag::SkillToken)
            })
            .collect();
        let root = Node::column(0.0, vec![Node::flow(6.0, chips)]).padding(Insets::xy(300.0, 0.0));
        let c = compose_plain(root, 1.0);
        let boxes = c.find_all(Tag::SkillToken);
        assert_eq!(boxes.len(), 30);
        assert!(boxes.last().unwrap().rect.y > boxes[0].rect.y, "chips should wrap");
        for b in boxes {
            assert!(b.rect.x + b.rect.width <= PAGE_WIDTH - 300.0 + 0.01);
        }
    }

    #[test]
    fn test_fitted_text_shrinks_to_column() {
        let long_name = "Maximilian Alexander Worthington-Smythe III";
        let root = Node::row(
            0.0,
            vec![Track::Fixed(150.0), Track::Fraction(1.0)],
            vec![
                Node::text(long_name, style(30.0), TextMode::Fit).tag(Tag::Name),
                Node::spacer(1.0),
            ],
        );
        let c = compose_plain(root, 1.0);
        let b = c.find(Tag::Name).unwrap();
        let Placed::Text(t) = &b.content else { panic!("name should be text") };
        let natural = StaticMetrics.measure(long_name, &style(30.0).font);
        assert!(t.fit < 1.0);
        assert!(natural * t.fit <= 150.0 + 1e-3, "fitted width overflows");
        assert_eq!(t.lines.len(), 1, "fitted text never wraps");
        assert_eq!(c.pending_rechecks, 0);
    }

    #[test]
    fn test_outer_box_scales_intrinsic_elements_exactly() {
        let make = || {
            Node::column(
                8.0,
                vec![
                    Node::image(ImageSource::Placeholder, 96.0, 96.0, true).tag(Tag::Avatar),
                    Node::text("Experience", style(18.0), TextMode::Line)
                        .tag(Tag::SectionHeader(SectionId::Experience)),
                ],
            )
        };
        let base = compose_plain(make(), 1.0);
        let big = compose_plain(make(), 1.2);
        for tag in [Tag::Avatar, Tag::SectionHeader(SectionId::Experience)] {
            let a = base.outer_box(tag).unwrap();
            let b = big.outer_box(tag).unwrap();
            assert!((b.width - a.width * 1.2).abs() < 1e-3, "{tag:?} width");
            assert!((b.height - a.height * 1.2).abs() < 1e-3, "{tag:?} height");
            assert!((b.y - a.y * 1.2).abs() < 1e-3, "{tag:?} offset");
        }
    }

    #[test]
    fn test_remote_images_are_listed_once() {
        let url = "https://example.com/qr.png".to_string();
        let root = Node::column(
            0.0,
            vec![
                Node::image(ImageSource::Remote(url.clone()), 10.0, 10.0, false),
                Node::image(ImageSource::Remote(url.clone()), 10.0, 10.0, false),
                Node::image(ImageSource::Placeholder, 10.0, 10.0, true),
            ],
        );
        assert_eq!(compose_plain(root, 1.0).remote_images(), vec![url]);
    }

    #[test]
    fn test_decorations_resolve_against_page_corners() {
        let mut d = doc(Node::column(0.0, vec![]), 1.0);
        d.decorations.push(Decoration {
            anchor: Anchor::BottomRight,
            shape: Shape::Circle { dx: -10.0, dy: -20.0, r: 5.0 },
            paint: Paint::solid(Rgb::BLACK),
        });
        let c = compose(&d, &StaticMetrics, &mut FitCache::new());
        assert_eq!(
            c.ornaments[0].shape,
            PageShape::Circle { cx: PAGE_WIDTH - 10.0, cy: PAGE_HEIGHT - 20.0, r: 5.0 }
        );
    }
}
