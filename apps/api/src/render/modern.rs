//! Modern: accent sidebar (35%) with identity, contact, skills, education and
//! a scan code; white content column with about, then experience and projects
//! in configured order.

use crate::layout::node::{
    Align, Background, BorderSide, Glyph, ImageSource, Insets, Node, Paint, Tag, TextMode, Track,
};
use crate::layout::FontWeight;
use crate::models::{LayoutConfig, ResumeData, Rgb, SectionId};
use crate::render::sections::{
    self, color::*, has_content, header_row, icon_badge, link_glyph, sans, section, section_glyph,
    ChipStyle, EntryPalette, REM,
};
use crate::render::{RenderContext, RenderedDocument, ThemeRenderer};

const SIDEBAR_SHARE: f32 = 0.35;

pub struct Modern;

impl ThemeRenderer for Modern {
    fn render(&self, data: &ResumeData, layout: &LayoutConfig, ctx: &RenderContext<'_>) -> RenderedDocument {
        let root = Node::row(
            0.0,
            vec![
                Track::Fraction(SIDEBAR_SHARE),
                Track::Fraction(1.0 - SIDEBAR_SHARE),
            ],
            vec![sidebar(data, ctx), main_column(data, layout, ctx)],
        );
        RenderedDocument {
            theme: crate::models::ThemeKind::Modern,
            scale: layout.scale,
            background: Background::Split {
                left: ctx.accent,
                right: Rgb::WHITE,
                at: SIDEBAR_SHARE,
            },
            decorations: Vec::new(),
            root,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sidebar
// ────────────────────────────────────────────────────────────────────────────

fn white(opacity: f32) -> Paint {
    Paint::solid(Rgb::WHITE).with_opacity(opacity)
}

fn sidebar(data: &ResumeData, ctx: &RenderContext<'_>) -> Node {
    let mut blocks = vec![identity(data)];

    let contacts = contact_rows(data);
    if !contacts.is_empty() {
        blocks.push(Node::column(16.0, contacts).padding(Insets::xy(4.0, 0.0)));
    }

    let heading = sans(14.0, FontWeight::Bold, Rgb::WHITE).opacity(0.9);
    if has_content(data, SectionId::Skills) {
        let chips = ChipStyle {
            text: sans(14.0, FontWeight::Medium, Rgb::WHITE).opacity(0.95),
            padding: Insets::new(0.0, 0.0, 4.0, 0.0),
            fill: None,
            radius: 0.0,
            underline: Some((1.0, white(0.3))),
            brackets: false,
        };
        blocks.push(section(
            SectionId::Skills,
            Some(header_row(
                Some(Node::icon(Glyph::Cpu, 14.0, Rgb::WHITE)),
                ctx.labels.skills,
                heading,
                8.0,
            )),
            sections::skill_chips(data, &chips, 12.0),
            20.0,
        ));
    }

    if has_content(data, SectionId::Education) {
        let palette = EntryPalette {
            heading: Rgb::WHITE,
            body: Rgb::WHITE,
            muted: Rgb(0xe2, 0xe8, 0xf0),
            highlight: Rgb::WHITE,
            date: Rgb::WHITE,
            body_family: crate::layout::FontFamily::Sans,
        };
        let entries = data
            .education
            .iter()
            .map(|edu| {
                sections::education_entry(edu, &palette)
                    .padding(Insets::new(0.0, 0.0, 0.0, 12.0))
                    .border(BorderSide::Left, 2.0, white(0.3))
            })
            .collect();
        blocks.push(section(
            SectionId::Education,
            Some(header_row(
                Some(Node::icon(Glyph::GraduationCap, 14.0, Rgb::WHITE)),
                ctx.labels.education,
                heading,
                8.0,
            )),
            Node::column(16.0, entries),
            16.0,
        ));
    }

    if let Some(code) = scan_code(data, ctx) {
        blocks.push(code);
    }

    Node::column(40.0, blocks).padding(Insets::all(24.0))
}

fn identity(data: &ResumeData) -> Node {
    Node::column(
        12.0,
        vec![
            sections::avatar(data, 160.0, 160.0, true).fill(Paint::solid(Rgb::WHITE)),
            Node::spacer(12.0),
            Node::text(
                &data.full_name,
                sans(30.0, FontWeight::Black, Rgb::WHITE).line_height(1.25),
                TextMode::Fit,
            )
            .tag(Tag::Name),
            Node::text(
                data.title.to_uppercase(),
                sans(14.0, FontWeight::Bold, Rgb::WHITE).opacity(0.9),
                TextMode::Fit,
            )
            .tag(Tag::Title),
        ],
    )
    .align(Align::Center)
    .tag(Tag::Header)
}

fn contact_row(glyph: Glyph, text: &str) -> Node {
    Node::row(
        12.0,
        vec![Track::Fixed(20.0), Track::Fraction(1.0)],
        vec![
            Node::icon(glyph, 16.0, Rgb::WHITE).padding(Insets::xy(2.0, 0.0)),
            Node::text(
                text,
                sans(14.0, FontWeight::Medium, Rgb::WHITE).opacity(0.95),
                TextMode::Fit,
            ),
        ],
    )
    .align(Align::Center)
}

fn contact_rows(data: &ResumeData) -> Vec<Node> {
    let mut rows = Vec::new();
    for (glyph, value) in [
        (Glyph::Mail, &data.email),
        (Glyph::Phone, &data.phone),
        (Glyph::MapPin, &data.location),
    ] {
        if !value.trim().is_empty() {
            rows.push(contact_row(glyph, value));
        }
    }
    for link in &data.links {
        rows.push(contact_row(link_glyph(&link.platform), sections::display_url(&link.url)).tag(Tag::Link));
    }
    rows
}

/// Code for the first link, captioned with its platform.
fn scan_code(data: &ResumeData, ctx: &RenderContext<'_>) -> Option<Node> {
    let first = data.links.first()?;
    let url = sections::scan_code_url(ctx.scan_service, first)?;
    let caption = sans(10.0, FontWeight::Bold, Rgb::WHITE).opacity(0.8);
    Some(
        Node::column(
            6.0,
            vec![
                Node::image(ImageSource::Remote(url), 96.0, 96.0, false)
                    .padding(Insets::all(10.0))
                    .fill(Paint::solid(Rgb::WHITE))
                    .radius(12.0)
                    .tag(Tag::ScanCode),
                Node::spacer(6.0),
                Node::text("SCAN TO VISIT", caption, TextMode::Line),
                Node::text(sections::scan_caption(first).to_uppercase(), caption, TextMode::Line),
            ],
        )
        .align(Align::Center)
        .padding(Insets::new(32.0, 0.0, 0.0, 0.0))
        .border(BorderSide::Top, 1.0, white(0.2)),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Content column
// ────────────────────────────────────────────────────────────────────────────

fn main_column(data: &ResumeData, layout: &LayoutConfig, ctx: &RenderContext<'_>) -> Node {
    let mut blocks = Vec::new();
    if layout.includes(SectionId::About) && has_content(data, SectionId::About) {
        blocks.push(section(
            SectionId::About,
            Some(title(SectionId::About, ctx.labels.about, ctx.accent)),
            Node::text(
                data.about.trim_end(),
                sans(18.0, FontWeight::Regular, SLATE_600).line_height(1.78),
                TextMode::Wrap,
            ),
            16.0,
        ));
    }

    let palette = EntryPalette {
        heading: SLATE_800,
        body: SLATE_600,
        muted: SLATE_500,
        highlight: SLATE_500,
        date: ctx.accent,
        body_family: crate::layout::FontFamily::Sans,
    };
    for id in &layout.order {
        if !has_content(data, *id) {
            continue;
        }
        match id {
            SectionId::Experience => {
                let cards = data
                    .experiences
                    .iter()
                    .map(|exp| {
                        sections::experience_entry(exp, &palette)
                            .padding(Insets::all(20.0))
                            .fill(Paint::solid(SLATE_50))
                            .radius(12.0)
                            .border(BorderSide::Left, 4.0, Paint::solid(ctx.accent))
                    })
                    .collect();
                blocks.push(section(
                    SectionId::Experience,
                    Some(title(SectionId::Experience, ctx.labels.experience, ctx.accent)),
                    Node::column(24.0, cards),
                    24.0,
                ));
            }
            SectionId::Projects => {
                let project_palette = EntryPalette {
                    highlight: ctx.accent,
                    ..palette
                };
                let cards = data
                    .projects
                    .iter()
                    .map(|p| {
                        sections::project_entry(p, &project_palette)
                            .padding(Insets::all(16.0))
                            .fill(Paint::solid(SLATE_50))
                            .radius(8.0)
                            .border(BorderSide::Top, 4.0, Paint::solid(ctx.accent))
                    })
                    .collect();
                blocks.push(section(
                    SectionId::Projects,
                    Some(title(SectionId::Projects, ctx.labels.projects, ctx.accent)),
                    sections::two_up(cards, 16.0),
                    24.0,
                ));
            }
            _ => {}
        }
    }

    Node::column(
        0.0,
        vec![
            Node::spacer(12.0).fill(Paint::solid(ctx.accent)),
            Node::column(layout.spacing * 0.8 * REM, blocks).padding(Insets::new(52.0, 48.0, 48.0, 48.0)),
        ],
    )
}

/// Badge icon and an underlined title.
fn title(id: SectionId, label: &str, accent: Rgb) -> Node {
    Node::row(
        16.0,
        vec![Track::Auto, Track::Fraction(1.0)],
        vec![
            icon_badge(section_glyph(id), 18.0, Rgb::WHITE, Paint::solid(accent), 11.0, 12.0),
            Node::text(label.to_uppercase(), sans(20.0, FontWeight::Black, SLATE_800), TextMode::Line)
                .padding(Insets::new(0.0, 0.0, 4.0, 0.0))
                .border(BorderSide::Bottom, 2.0, Paint::solid(accent).with_opacity(0.19)),
        ],
    )
    .align(Align::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, ThemeKind, ThemeSelection};
    use crate::render::render;

    fn modern() -> ThemeSelection {
        ThemeSelection {
            theme: ThemeKind::Modern,
            accent: Rgb(0x25, 0x63, 0xeb),
        }
    }

    #[test]
    fn test_content_column_follows_order_for_experience_and_projects() {
        let layout = LayoutConfig::new(
            vec![SectionId::Projects, SectionId::Skills, SectionId::Experience],
            1.0,
            1.5,
        );
        let doc = render(&ResumeData::example(), &modern(), &layout, Language::EN);
        let order = doc.section_order();
        // Sidebar sections come first, in their fixed places.
        assert_eq!(
            order,
            vec![
                SectionId::Skills,
                SectionId::Education,
                SectionId::Projects,
                SectionId::Experience
            ]
        );
        assert!(!order.contains(&SectionId::About), "about left out of order is hidden");
    }

    #[test]
    fn test_scan_code_for_first_link_only() {
        let doc = render(&ResumeData::example(), &modern(), &LayoutConfig::default(), Language::EN);
        assert_eq!(doc.count(Tag::ScanCode), 1);
        let texts = doc.root.texts();
        assert!(texts.contains(&"LINKEDIN"), "caption names the first link's platform");
        assert!(texts.contains(&"linkedin.com/in/somsri"));
    }

    #[test]
    fn test_scan_code_skipped_when_first_link_empty() {
        let mut data = ResumeData::example();
        data.links[0].url.clear();
        let doc = render(&data, &modern(), &LayoutConfig::default(), Language::EN);
        assert_eq!(doc.count(Tag::ScanCode), 0);
    }

    #[test]
    fn test_background_split_uses_accent() {
        let doc = render(&ResumeData::example(), &modern(), &LayoutConfig::default(), Language::EN);
        assert_eq!(
            doc.background,
            Background::Split {
                left: Rgb(0x25, 0x63, 0xeb),
                right: Rgb::WHITE,
                at: 0.35
            }
        );
    }

    #[test]
    fn test_spacing_changes_only_section_gaps() {
        use crate::layout::{compose, FitCache, StaticMetrics};
        let data = ResumeData::example();
        let tight = compose(
            &render(&data, &modern(), &LayoutConfig::default().with_spacing(1.0), Language::EN),
            &StaticMetrics,
            &mut FitCache::new(),
        );
        let loose = compose(
            &render(&data, &modern(), &LayoutConfig::default().with_spacing(3.0), Language::EN),
            &StaticMetrics,
            &mut FitCache::new(),
        );
        let a = tight.find(Tag::Section(SectionId::Experience)).unwrap().rect;
        let b = loose.find(Tag::Section(SectionId::Experience)).unwrap().rect;
        assert!((a.width - b.width).abs() < 1e-3);
        assert!((a.height - b.height).abs() < 1e-3, "section itself is unchanged");
        assert!((b.y - a.y - 2.0 * 0.8 * REM).abs() < 1e-3, "one gap wider by 2 x 0.8rem");
    }
}
