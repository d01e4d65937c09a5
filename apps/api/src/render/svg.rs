//! Serialises a [`Composition`] to a standalone SVG document.
//!
//! This is the on-screen document: the preview endpoint returns it and the
//! export pipeline rasterizes it. Remote image references are written as-is
//! unless an inlined replacement is supplied.

use std::collections::HashMap;

use crate::layout::engine::{PageShape, PlacedText};
use crate::layout::node::{Background, BorderSide, Frame, Glyph, IconNode, ImageNode, ImageSource, Paint};
use crate::layout::{Composition, LayoutBox, Placed, Rect};
use crate::render::sections::color::{SLATE_200, SLATE_400};

/// Remote URL → `data:` URI replacements, filled in at export time.
pub type AssetMap = HashMap<String, String>;

/// Ascent as a share of the font size, for placing the baseline.
const ASCENT: f32 = 0.8;

pub fn to_svg(composition: &Composition, assets: &AssetMap) -> String {
    let mut w = SvgWriter {
        out: String::with_capacity(16 * 1024),
        assets,
        clip_seq: 0,
    };
    w.document(composition);
    w.out
}

struct SvgWriter<'a> {
    out: String,
    assets: &'a AssetMap,
    clip_seq: usize,
}

impl SvgWriter<'_> {
    fn document(&mut self, c: &Composition) {
        let (pw, ph) = (num(c.page_width), num(c.page_height));
        self.out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             width=\"{pw}\" height=\"{ph}\" viewBox=\"0 0 {pw} {ph}\">\n"
        ));

        match c.background {
            Background::Solid(color) => {
                self.rect(&Rect { x: 0.0, y: 0.0, width: c.page_width, height: c.page_height }, 0.0, &Paint::solid(color));
            }
            Background::Split { left, right, at } => {
                let split = c.page_width * at;
                self.rect(&Rect { x: 0.0, y: 0.0, width: split, height: c.page_height }, 0.0, &Paint::solid(left));
                self.rect(
                    &Rect { x: split, y: 0.0, width: c.page_width - split, height: c.page_height },
                    0.0,
                    &Paint::solid(right),
                );
            }
        }

        for ornament in &c.ornaments {
            let p = &ornament.paint;
            match ornament.shape {
                PageShape::Circle { cx, cy, r } => self.out.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>\n",
                    num(cx),
                    num(cy),
                    num(r),
                    fill_attrs(p)
                )),
                PageShape::Rect { x, y, width, height } => {
                    self.rect(&Rect { x, y, width, height }, 0.0, p)
                }
                PageShape::Grid { step } => {
                    let s = num(step);
                    self.out.push_str(&format!(
                        "<defs><pattern id=\"grid\" width=\"{s}\" height=\"{s}\" patternUnits=\"userSpaceOnUse\">\
                         <path d=\"M {s} 0 L 0 0 0 {s}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"1\"/>\
                         </pattern></defs>\n<rect width=\"{pw}\" height=\"{ph}\" fill=\"url(#grid)\"/>\n",
                        p.color.to_hex(),
                        num(p.opacity)
                    ));
                }
            }
        }

        self.out.push_str(&format!("<g transform=\"scale({})\">\n", num(c.scale)));
        self.layout_box(&c.root);
        self.out.push_str("</g>\n</svg>\n");
    }

    fn layout_box(&mut self, b: &LayoutBox) {
        let round = matches!(&b.content, Placed::Image(img) if img.round);
        self.frame(&b.rect, &b.frame, round);

        let content = inner(&b.rect, &b.frame);
        match &b.content {
            Placed::Text(text) => self.text(&content, text),
            Placed::Image(image) => self.image(&content, image),
            Placed::Icon(icon) => self.icon(&content, icon),
            Placed::Container | Placed::Block => {}
        }
        for child in &b.children {
            self.layout_box(child);
        }
    }

    fn frame(&mut self, r: &Rect, frame: &Frame, round: bool) {
        if let Some(fill) = &frame.fill {
            if round {
                self.out.push_str(&format!(
                    "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {}/>\n",
                    num(r.x + r.width / 2.0),
                    num(r.y + r.height / 2.0),
                    num(r.width / 2.0),
                    num(r.height / 2.0),
                    fill_attrs(fill)
                ));
            } else {
                self.rect(r, frame.radius, fill);
            }
        }
        let Some(border) = &frame.border else { return };
        let bw = border.width;
        match border.side {
            BorderSide::All if round => self.out.push_str(&format!(
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"none\" {}/>\n",
                num(r.x + r.width / 2.0),
                num(r.y + r.height / 2.0),
                num((r.width - bw) / 2.0),
                num((r.height - bw) / 2.0),
                stroke_attrs(&border.paint, bw)
            )),
            BorderSide::All => self.out.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"none\" {}/>\n",
                num(r.x + bw / 2.0),
                num(r.y + bw / 2.0),
                num((r.width - bw).max(0.0)),
                num((r.height - bw).max(0.0)),
                num(frame.radius),
                stroke_attrs(&border.paint, bw)
            )),
            BorderSide::Top => self.rect(&Rect { height: bw, ..*r }, 0.0, &border.paint),
            BorderSide::Bottom => {
                self.rect(&Rect { y: r.y + r.height - bw, height: bw, ..*r }, 0.0, &border.paint)
            }
            BorderSide::Left => self.rect(&Rect { width: bw, ..*r }, 0.0, &border.paint),
            BorderSide::Right => {
                self.rect(&Rect { x: r.x + r.width - bw, width: bw, ..*r }, 0.0, &border.paint)
            }
        }
    }

    fn rect(&mut self, r: &Rect, radius: f32, paint: &Paint) {
        let rx = if radius > 0.0 {
            format!(" rx=\"{}\"", num(radius))
        } else {
            String::new()
        };
        self.out.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{rx} {}/>\n",
            num(r.x),
            num(r.y),
            num(r.width.max(0.0)),
            num(r.height.max(0.0)),
            fill_attrs(paint)
        ));
    }

    fn text(&mut self, area: &Rect, text: &PlacedText) {
        let style = &text.style;
        let line_box = style.line_box();
        let font = &style.font;
        let attrs = format!(
            "font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\"{} {}",
            escape(font.family.css_stack()),
            num(font.size),
            font.weight.css_value(),
            if style.italic { " font-style=\"italic\"" } else { "" },
            fill_attrs(&style.paint)
        );

        let fitted = text.fit < 1.0;
        if fitted {
            // Shrink about the leading edge, keeping the vertical centre.
            let cy = area.y + area.height / 2.0;
            self.out.push_str(&format!(
                "<g transform=\"translate({x} {cy}) scale({f}) translate(-{x} -{cy})\">\n",
                x = num(area.x),
                cy = num(cy),
                f = num_precise(text.fit)
            ));
        }
        for (i, line) in text.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = area.y + i as f32 * line_box + (line_box - font.size) / 2.0 + font.size * ASCENT;
            self.out.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" {attrs} xml:space=\"preserve\">{}</text>\n",
                num(area.x),
                num(baseline),
                escape(line)
            ));
        }
        if fitted {
            self.out.push_str("</g>\n");
        }
    }

    fn image(&mut self, area: &Rect, image: &ImageNode) {
        let assets = self.assets;
        let href = match &image.source {
            ImageSource::Placeholder => return self.placeholder(area, image.round),
            ImageSource::Embedded(uri) => uri.as_str(),
            ImageSource::Remote(url) => assets.get(url).map_or(url.as_str(), String::as_str),
        };

        let clip = if image.round {
            self.clip_seq += 1;
            let id = format!("clip-{}", self.clip_seq);
            self.out.push_str(&format!(
                "<clipPath id=\"{id}\"><ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"/></clipPath>\n",
                num(area.x + area.width / 2.0),
                num(area.y + area.height / 2.0),
                num(area.width / 2.0),
                num(area.height / 2.0)
            ));
            format!(" clip-path=\"url(#{id})\"")
        } else {
            String::new()
        };

        self.out.push_str(&format!(
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\"{clip} xlink:href=\"{}\"/>\n",
            num(area.x),
            num(area.y),
            num(area.width),
            num(area.height),
            escape(href)
        ));
    }

    /// Neutral head-and-shoulders glyph on a light disc or panel.
    fn placeholder(&mut self, area: &Rect, round: bool) {
        let bg = Paint::solid(SLATE_200);
        if round {
            self.out.push_str(&format!(
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {}/>\n",
                num(area.x + area.width / 2.0),
                num(area.y + area.height / 2.0),
                num(area.width / 2.0),
                num(area.height / 2.0),
                fill_attrs(&bg)
            ));
        } else {
            self.rect(area, 0.0, &bg);
        }
        let size = area.width.min(area.height) * 0.32;
        let icon = IconNode {
            glyph: Glyph::User,
            size,
            paint: Paint::solid(SLATE_400),
        };
        let at = Rect {
            x: area.x + (area.width - size) / 2.0,
            y: area.y + (area.height - size) / 2.0,
            width: size,
            height: size,
        };
        self.icon(&at, &icon);
    }

    fn icon(&mut self, area: &Rect, icon: &IconNode) {
        self.out.push_str(&format!(
            "<g transform=\"translate({} {}) scale({})\" fill=\"none\" {} stroke-linecap=\"round\" stroke-linejoin=\"round\">{}</g>\n",
            num(area.x),
            num(area.y),
            num_precise(icon.size / 24.0),
            stroke_attrs(&icon.paint, 2.0),
            glyph_path(icon.glyph)
        ));
    }
}

/// Strokes on a 24×24 grid.
fn glyph_path(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Mail => r#"<rect x="2" y="4" width="20" height="16" rx="2"/><path d="m22 7-10 5L2 7"/>"#,
        Glyph::Phone => r#"<path d="M22 16.9v3a2 2 0 0 1-2.2 2 19.8 19.8 0 0 1-8.6-3.1 19.5 19.5 0 0 1-6-6A19.8 19.8 0 0 1 2.1 4.2 2 2 0 0 1 4.1 2h3a2 2 0 0 1 2 1.7c.1 1 .4 1.9.7 2.8a2 2 0 0 1-.5 2.1L8.1 9.9a16 16 0 0 0 6 6l1.3-1.3a2 2 0 0 1 2.1-.4c.9.3 1.8.6 2.8.7a2 2 0 0 1 1.7 2z"/>"#,
        Glyph::MapPin => r#"<path d="M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z"/><circle cx="12" cy="10" r="3"/>"#,
        Glyph::Linkedin => r#"<path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6z"/><rect x="2" y="9" width="4" height="12"/><circle cx="4" cy="4" r="2"/>"#,
        Glyph::Github => r#"<path d="M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.1-1.3-.3-2.5-1-3.5.3-1.2.3-2.4 0-3.5 0 0-1 0-3 1.5a14 14 0 0 0-8 0C6 2 5 2 5 2c-.3 1.2-.3 2.4 0 3.5A5.4 5.4 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.4.5-.7 1-.8 1.7-.2.6-.2 1.2-.2 1.8v4"/><path d="M9 18c-4.5 2-5-2-7-2"/>"#,
        Glyph::Twitter => r#"<path d="M22 4s-.7 2.1-2 3.4c1.6 10-9.4 17.3-18 11.6 2.2.1 4.4-.6 6-2C3 15.5.5 9.6 3 5c2.2 2.6 5.6 4.1 9 4-.9-4.2 4-6.6 7-3.8 1.1 0 3-1.2 3-1.2z"/>"#,
        Glyph::Facebook => r#"<path d="M18 2h-3a5 5 0 0 0-5 5v3H7v4h3v8h4v-8h3l1-4h-4V7a1 1 0 0 1 1-1h3z"/>"#,
        Glyph::Instagram => r#"<rect x="2" y="2" width="20" height="20" rx="5"/><circle cx="12" cy="12" r="4"/><path d="M17.5 6.5h.01"/>"#,
        Glyph::Globe => r#"<circle cx="12" cy="12" r="10"/><path d="M12 2a14.5 14.5 0 0 0 0 20 14.5 14.5 0 0 0 0-20"/><path d="M2 12h20"/>"#,
        Glyph::Terminal => r#"<path d="m4 17 6-6-6-6"/><path d="M12 19h8"/>"#,
        Glyph::User => r#"<circle cx="12" cy="8" r="5"/><path d="M20 21a8 8 0 0 0-16 0"/>"#,
        Glyph::Briefcase => r#"<rect x="2" y="7" width="20" height="14" rx="2"/><path d="M16 21V5a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16"/>"#,
        Glyph::Folder => r#"<path d="M20 20a2 2 0 0 0 2-2V8a2 2 0 0 0-2-2h-7.9a2 2 0 0 1-1.7-.9l-.8-1.2A2 2 0 0 0 7.9 3H4a2 2 0 0 0-2 2v13a2 2 0 0 0 2 2Z"/>"#,
        Glyph::GraduationCap => r#"<path d="M22 10v6M2 10l10-5 10 5-10 5z"/><path d="M6 12v5c3 3 9 3 12 0v-5"/>"#,
        Glyph::Cpu => r#"<rect x="4" y="4" width="16" height="16" rx="2"/><rect x="9" y="9" width="6" height="6"/><path d="M15 2v2M15 20v2M2 15h2M2 9h2M20 15h2M20 9h2M9 2v2M9 20v2"/>"#,
    }
}

fn inner(r: &Rect, frame: &Frame) -> Rect {
    let p = &frame.padding;
    Rect {
        x: r.x + p.left,
        y: r.y + p.top,
        width: (r.width - p.horizontal()).max(0.0),
        height: (r.height - p.vertical()).max(0.0),
    }
}

fn fill_attrs(p: &Paint) -> String {
    if p.opacity < 1.0 {
        format!("fill=\"{}\" fill-opacity=\"{}\"", p.color.to_hex(), num(p.opacity))
    } else {
        format!("fill=\"{}\"", p.color.to_hex())
    }
}

fn stroke_attrs(p: &Paint, width: f32) -> String {
    let mut s = format!("stroke=\"{}\" stroke-width=\"{}\"", p.color.to_hex(), num(width));
    if p.opacity < 1.0 {
        s.push_str(&format!(" stroke-opacity=\"{}\"", num(p.opacity)));
    }
    s
}

/// Two decimals, trailing zeros dropped.
fn num(v: f32) -> String {
    trim_decimal(format!("{v:.2}"))
}

fn num_precise(v: f32) -> String {
    trim_decimal(format!("{v:.5}"))
}

fn trim_decimal(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    let t = s.trim_end_matches('0').trim_end_matches('.');
    if t == "-0" {
        "0".to_string()
    } else {
        t.to_string()
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compose, FitCache, StaticMetrics};
    use crate::models::{Language, LayoutConfig, ResumeData, ThemeKind, ThemeSelection};
    use crate::render::render;

    fn svg_for(data: &ResumeData, theme: ThemeKind, layout: &LayoutConfig, assets: &AssetMap) -> String {
        let selection = ThemeSelection {
            theme,
            ..ThemeSelection::default()
        };
        let doc = render(data, &selection, layout, Language::EN);
        to_svg(&compose(&doc, &StaticMetrics, &mut FitCache::new()), assets)
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(794.0), "794");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut data = ResumeData::example();
        data.full_name = "Tom & <Jerry>".into();
        let svg = svg_for(&data, ThemeKind::Minimal, &LayoutConfig::default(), &AssetMap::new());
        assert!(svg.contains("TOM &amp; &lt;JERRY&gt;"));
        assert!(!svg.contains("<JERRY>"));
    }

    #[test]
    fn test_page_size_and_scale_group() {
        let layout = LayoutConfig::default().with_scale(0.8);
        let svg = svg_for(&ResumeData::example(), ThemeKind::Cyber, &layout, &AssetMap::new());
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("width=\"794\""));
        assert!(svg.contains("<g transform=\"scale(0.8)\">"));
        assert!(svg.contains("url(#grid)"));
    }

    #[test]
    fn test_remote_images_use_asset_map_when_present() {
        let data = ResumeData::example();
        let preview = svg_for(&data, ThemeKind::Modern, &LayoutConfig::default(), &AssetMap::new());
        assert!(preview.contains("xlink:href=\"https://api.qrserver.com/"));

        let doc = render(&data, &ThemeSelection::default(), &LayoutConfig::default(), Language::EN);
        let c = compose(&doc, &StaticMetrics, &mut FitCache::new());
        let mut assets = AssetMap::new();
        for url in c.remote_images() {
            assets.insert(url, "data:image/png;base64,AAAA".to_string());
        }
        let export = to_svg(&c, &assets);
        assert!(!export.contains("api.qrserver.com"));
        assert!(export.contains("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_fitted_text_gets_anchored_scale_transform() {
        let mut data = ResumeData::example();
        data.full_name = "Wolfeschlegelsteinhausenbergerdorff Alexandria-Montgomery".into();
        let svg = svg_for(&data, ThemeKind::Modern, &LayoutConfig::default(), &AssetMap::new());
        let line = svg
            .lines()
            .find(|l| l.starts_with("<g transform=\"translate(") && l.contains(") translate(-"))
            .expect("a fitted name");
        assert!(line.contains(") scale(0."), "got {line}");
    }

    #[test]
    fn test_placeholder_draws_no_image_element() {
        let mut data = ResumeData::example();
        data.links.clear();
        let svg = svg_for(&data, ThemeKind::Minimal, &LayoutConfig::default(), &AssetMap::new());
        assert!(!svg.contains("<image"), "no photo and no links means no image tags");
    }
}
