//! Creative: magazine layout on slate with two soft circles behind it. The
//! left rail (about, skills, links) is static and the right rail always runs
//! experience, projects, education in that order, whatever the configured
//! order says.

use crate::layout::node::{
    Align, Anchor, Background, BorderSide, Decoration, Insets, Node, Paint, Shape, Tag, TextMode,
    Track,
};
use crate::layout::{FontFamily, FontWeight};
use crate::models::{LayoutConfig, ResumeData, Rgb, SectionId, ThemeKind};
use crate::render::sections::{
    self, color::*, has_content, header_row, icon_badge, link_glyph, mono, sans, section,
    section_glyph, style, ChipStyle, EntryPalette, REM,
};
use crate::render::{RenderContext, RenderedDocument, ThemeRenderer};

const RIGHT_RAIL: [SectionId; 3] = [SectionId::Experience, SectionId::Projects, SectionId::Education];

pub struct Creative;

impl ThemeRenderer for Creative {
    fn render(&self, data: &ResumeData, layout: &LayoutConfig, ctx: &RenderContext<'_>) -> RenderedDocument {
        let rails = Node::row(
            40.0,
            vec![Track::Fraction(4.0), Track::Fraction(8.0)],
            vec![left_rail(data, ctx), right_rail(data, layout, ctx)],
        );
        let root = Node::column(64.0, vec![header(data, ctx), rails]).padding(Insets::all(48.0));

        RenderedDocument {
            theme: ThemeKind::Creative,
            scale: layout.scale,
            background: Background::Solid(SLATE_50),
            decorations: vec![
                Decoration {
                    anchor: Anchor::TopRight,
                    shape: Shape::Circle {
                        dx: -250.0,
                        dy: 250.0,
                        r: 250.0,
                    },
                    paint: Paint::solid(ctx.accent).with_opacity(0.2),
                },
                Decoration {
                    anchor: Anchor::BottomLeft,
                    shape: Shape::Circle {
                        dx: 200.0,
                        dy: -200.0,
                        r: 200.0,
                    },
                    paint: Paint::solid(SLATE_300).with_opacity(0.3),
                },
            ],
            root,
        }
    }
}

fn header(data: &ResumeData, ctx: &RenderContext<'_>) -> Node {
    let contact: Vec<&str> = [data.email.trim(), data.location.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    let mut identity = Vec::new();
    if !data.title.trim().is_empty() {
        identity.push(
            Node::text(
                data.title.to_uppercase(),
                sans(14.0, FontWeight::Bold, Rgb::WHITE),
                TextMode::Line,
            )
            .padding(Insets::xy(16.0, 6.0))
            .fill(Paint::solid(ctx.accent))
            .tag(Tag::Title),
        );
    }
    identity.push(
        Node::text(
            &data.full_name,
            sans(60.0, FontWeight::Black, SLATE_900).line_height(1.25),
            TextMode::Wrap,
        )
        .padding(Insets::new(0.0, 0.0, 4.0, 0.0))
        .border(BorderSide::Bottom, 12.0, Paint::solid(ctx.accent).with_opacity(0.3))
        .tag(Tag::Name),
    );
    if !contact.is_empty() {
        identity.push(Node::text(
            contact.join("  /  "),
            mono(14.0, FontWeight::Bold, SLATE_500),
            TextMode::Line,
        ));
    }

    Node::row(
        32.0,
        vec![Track::Fraction(1.0), Track::Auto],
        vec![
            Node::column(20.0, identity),
            sections::avatar(data, 192.0, 224.0, false)
                .padding(Insets::all(3.0))
                .border(BorderSide::All, 2.0, Paint::solid(ctx.accent)),
        ],
    )
    .tag(Tag::Header)
}

fn left_rail(data: &ResumeData, ctx: &RenderContext<'_>) -> Node {
    let mut blocks = Vec::new();

    if has_content(data, SectionId::About) {
        blocks.push(section(
            SectionId::About,
            None,
            Node::text(
                format!("\"{}\"", data.about.trim()),
                style(FontFamily::Serif, 14.0, FontWeight::Regular, SLATE_600)
                    .italic()
                    .line_height(1.6),
                TextMode::Wrap,
            ),
            0.0,
        ));
    }

    if has_content(data, SectionId::Skills) {
        let chips = ChipStyle {
            text: sans(12.0, FontWeight::Bold, SLATE_800),
            padding: Insets::xy(12.0, 6.0),
            fill: None,
            radius: 0.0,
            underline: Some((2.0, Paint::solid(ctx.accent))),
            brackets: false,
        };
        blocks.push(section(
            SectionId::Skills,
            Some(header_row(
                None,
                ctx.labels.skills,
                sans(14.0, FontWeight::Black, SLATE_900).opacity(0.6),
                8.0,
            )),
            sections::skill_chips(data, &chips, 8.0),
            12.0,
        ));
    }

    if !data.links.is_empty() {
        let links = data
            .links
            .iter()
            .map(|l| {
                Node::row(
                    8.0,
                    vec![Track::Auto, Track::Fraction(1.0)],
                    vec![
                        Node::icon(link_glyph(&l.platform), 14.0, SLATE_400),
                        Node::text(
                            l.url.to_uppercase(),
                            sans(12.0, FontWeight::Bold, SLATE_400),
                            TextMode::Fit,
                        ),
                    ],
                )
                .align(Align::Center)
                .tag(Tag::Link)
            })
            .collect();
        blocks.push(
            Node::column(8.0, links)
                .padding(Insets::new(32.0, 0.0, 0.0, 0.0))
                .border(BorderSide::Top, 1.0, Paint::solid(SLATE_200)),
        );
    }

    Node::column(32.0, blocks)
        .padding(Insets::new(0.0, 32.0, 0.0, 0.0))
        .border(BorderSide::Right, 1.0, Paint::solid(SLATE_200))
}

fn right_rail(data: &ResumeData, layout: &LayoutConfig, ctx: &RenderContext<'_>) -> Node {
    let palette = EntryPalette {
        heading: SLATE_800,
        body: SLATE_600,
        muted: SLATE_500,
        highlight: ctx.accent,
        date: SLATE_500,
        body_family: FontFamily::Sans,
    };
    let heading = sans(18.0, FontWeight::Black, SLATE_800);
    let badge = |id| icon_badge(section_glyph(id), 16.0, Rgb::WHITE, Paint::solid(ctx.accent), 6.0, 4.0);

    let blocks = RIGHT_RAIL
        .iter()
        .filter(|id| has_content(data, **id))
        .map(|id| match id {
            SectionId::Experience => section(
                *id,
                Some(header_row(Some(badge(*id)), ctx.labels.experience, heading, 12.0)),
                Node::column(
                    24.0,
                    data.experiences
                        .iter()
                        .map(|e| {
                            sections::experience_entry(e, &palette)
                                .padding(Insets::new(0.0, 0.0, 0.0, 16.0))
                                .border(BorderSide::Left, 2.0, Paint::solid(ctx.accent).with_opacity(0.25))
                        })
                        .collect(),
                ),
                24.0,
            ),
            SectionId::Projects => section(
                *id,
                Some(header_row(None, ctx.labels.projects, heading, 12.0)),
                sections::two_up(
                    data.projects
                        .iter()
                        .map(|p| {
                            sections::project_entry(p, &EntryPalette { highlight: SLATE_400, ..palette })
                                .padding(Insets::all(16.0))
                                .fill(Paint::solid(SLATE_50))
                                .radius(8.0)
                                .border(BorderSide::All, 1.0, Paint::solid(SLATE_100))
                        })
                        .collect(),
                    16.0,
                ),
                24.0,
            ),
            _ => section(
                *id,
                Some(header_row(Some(badge(*id)), ctx.labels.education, heading, 12.0)),
                Node::column(
                    16.0,
                    data.education
                        .iter()
                        .map(|e| sections::education_entry(e, &EntryPalette { date: ctx.accent, ..palette }))
                        .collect(),
                ),
                20.0,
            ),
        })
        .collect();

    Node::column(layout.spacing * REM, blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, ThemeSelection};
    use crate::render::render;

    fn creative() -> ThemeSelection {
        ThemeSelection {
            theme: ThemeKind::Creative,
            ..ThemeSelection::default()
        }
    }

    #[test]
    fn test_right_rail_ignores_configured_order() {
        let layout = LayoutConfig::new(
            vec![SectionId::Education, SectionId::Projects, SectionId::Experience],
            1.0,
            1.5,
        );
        let doc = render(&ResumeData::example(), &creative(), &layout, Language::EN);
        assert_eq!(
            doc.section_order(),
            vec![
                SectionId::About,
                SectionId::Skills,
                SectionId::Experience,
                SectionId::Projects,
                SectionId::Education
            ]
        );
    }

    #[test]
    fn test_about_is_a_quote_without_header() {
        let doc = render(&ResumeData::example(), &creative(), &LayoutConfig::default(), Language::EN);
        assert!(!doc.has_header(SectionId::About));
        let about = doc.tagged_texts(Tag::Section(SectionId::About));
        assert!(about[0].starts_with("\"Passionate"));
    }

    #[test]
    fn test_contact_line_skips_blank_parts() {
        let mut data = ResumeData::example();
        data.location.clear();
        let doc = render(&data, &creative(), &LayoutConfig::default(), Language::EN);
        let texts = doc.root.texts();
        assert!(texts.contains(&"somsri.dev@example.com"));
        assert!(!texts.iter().any(|t| t.ends_with('/')));
    }

    #[test]
    fn test_two_decorative_circles() {
        let doc = render(&ResumeData::example(), &creative(), &LayoutConfig::default(), Language::EN);
        assert_eq!(doc.decorations.len(), 2);
        assert_eq!(doc.background, Background::Solid(SLATE_50));
    }
}
