//! Cyber: dark full-width terminal look. Fixed header, then every section in
//! configured order.

use crate::layout::node::{
    Align, Anchor, Background, BorderSide, Decoration, Glyph, Insets, Node, Paint, Shape, Tag,
    TextMode, Track,
};
use crate::layout::{FontFamily, FontWeight};
use crate::models::{LayoutConfig, ResumeData, Rgb, SectionId, ThemeKind};
use crate::render::sections::{
    self, color::*, has_content, header_row, icon_badge, mono, sans, section, section_glyph,
    ChipStyle, EntryPalette, REM,
};
use crate::render::{RenderContext, RenderedDocument, ThemeRenderer};

/// Black would vanish on the dark page, so it falls back to cyan.
pub fn neon(accent: Rgb) -> Rgb {
    if accent == Rgb::BLACK {
        CYAN_500
    } else {
        accent
    }
}

pub struct Cyber;

impl ThemeRenderer for Cyber {
    fn render(&self, data: &ResumeData, layout: &LayoutConfig, ctx: &RenderContext<'_>) -> RenderedDocument {
        let neon = neon(ctx.accent);
        let body: Vec<Node> = layout
            .order
            .iter()
            .filter(|id| has_content(data, **id))
            .map(|id| block(data, *id, neon, ctx))
            .collect();

        let root = Node::column(
            0.0,
            vec![
                header(data, neon),
                Node::spacer(48.0),
                Node::spacer(1.0).fill(Paint::solid(Rgb::WHITE).with_opacity(0.1)),
                Node::spacer(32.0),
                Node::column(layout.spacing * REM, body),
                Node::spacer(80.0),
            ],
        )
        .padding(Insets::all(40.0));

        let mut decorations = vec![Decoration {
            anchor: Anchor::TopLeft,
            shape: Shape::Grid { step: 40.0 },
            paint: Paint::solid(neon).with_opacity(0.1),
        }];
        // Four short bars in the bottom-right corner.
        for i in 0..4 {
            decorations.push(Decoration {
                anchor: Anchor::BottomRight,
                shape: Shape::Rect {
                    dx: -40.0 - (4 - i) as f32 * 68.0 + 4.0,
                    dy: -44.0,
                    width: 64.0,
                    height: 4.0,
                },
                paint: Paint::solid(Rgb::WHITE).with_opacity(0.1),
            });
        }

        RenderedDocument {
            theme: ThemeKind::Cyber,
            scale: layout.scale,
            background: Background::Solid(VOID),
            decorations,
            root,
        }
    }
}

fn header(data: &ResumeData, neon: Rgb) -> Node {
    let identity = Node::column(
        6.0,
        vec![
            Node::text(
                data.full_name.to_uppercase(),
                sans(36.0, FontWeight::Bold, Rgb::WHITE).line_height(1.2),
                TextMode::Fit,
            )
            .tag(Tag::Name),
            Node::text(
                format!("Running Protocol: {}", data.title),
                mono(12.0, FontWeight::Regular, neon),
                TextMode::Line,
            )
            .padding(Insets::xy(8.0, 2.0))
            .fill(Paint::solid(Rgb::WHITE).with_opacity(0.1))
            .border(BorderSide::All, 1.0, Paint::solid(Rgb::WHITE).with_opacity(0.2))
            .tag(Tag::Title),
        ],
    );

    let contact = mono(12.0, FontWeight::Regular, SLATE_400);
    let right: Vec<Node> = [&data.email, &data.location]
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| Node::text(v.as_str(), contact, TextMode::Line))
        .collect();

    Node::row(
        24.0,
        vec![Track::Fraction(1.0), Track::Auto],
        vec![
            Node::row(
                24.0,
                vec![Track::Auto, Track::Fraction(1.0)],
                vec![
                    sections::avatar(data, 96.0, 96.0, true)
                        .border(BorderSide::All, 2.0, Paint::solid(neon)),
                    identity,
                ],
            )
            .align(Align::Center),
            Node::column(4.0, right),
        ],
    )
    .tag(Tag::Header)
}

fn block(data: &ResumeData, id: SectionId, neon: Rgb, ctx: &RenderContext<'_>) -> Node {
    let palette = EntryPalette {
        heading: Rgb::WHITE,
        body: SLATE_300,
        muted: SLATE_400,
        highlight: CYAN_200,
        date: CYAN_600,
        body_family: FontFamily::Sans,
    };
    let title = |label: &str| {
        header_row(
            Some(icon_badge(
                section_glyph(id),
                16.0,
                neon,
                Paint::solid(CYAN_900).with_opacity(0.3),
                6.0,
                4.0,
            )),
            label,
            sans(18.0, FontWeight::Black, neon),
            16.0,
        )
    };

    match id {
        SectionId::About => Node::column(
            12.0,
            vec![
                header_row(
                    Some(Node::icon(Glyph::Terminal, 14.0, SLATE_400)),
                    "SYSTEM_LOG: About",
                    sans(14.0, FontWeight::Bold, SLATE_400),
                    8.0,
                )
                .tag(Tag::SectionHeader(id)),
                Node::text(
                    data.about.trim_end(),
                    mono(14.0, FontWeight::Regular, SLATE_300).line_height(1.6),
                    TextMode::Wrap,
                ),
            ],
        )
        .padding(Insets::all(24.0))
        .fill(Paint::solid(Rgb::WHITE).with_opacity(0.05))
        .border(BorderSide::Left, 4.0, Paint::solid(neon))
        .tag(Tag::Section(id)),

        SectionId::Skills => {
            let chips = ChipStyle {
                text: mono(12.0, FontWeight::Regular, CYAN_500),
                padding: Insets::xy(12.0, 4.0),
                fill: Some(Paint::solid(Rgb::BLACK).with_opacity(0.4)),
                radius: 0.0,
                underline: None,
                brackets: true,
            };
            section(
                id,
                Some(header_row(
                    Some(Node::icon(Glyph::Terminal, 14.0, neon)),
                    ctx.labels.skills,
                    sans(14.0, FontWeight::Bold, neon),
                    8.0,
                )),
                sections::skill_chips(data, &chips, 8.0),
                12.0,
            )
        }

        SectionId::Experience => section(
            id,
            Some(title(ctx.labels.experience)),
            Node::column(
                24.0,
                data.experiences
                    .iter()
                    .map(|e| sections::experience_entry(e, &palette))
                    .collect(),
            ),
            24.0,
        ),

        SectionId::Projects => section(
            id,
            Some(title(ctx.labels.projects)),
            Node::column(
                16.0,
                data.projects
                    .iter()
                    .map(|p| {
                        sections::project_entry(p, &EntryPalette { body: SLATE_400, highlight: CYAN_600, ..palette })
                            .padding(Insets::all(16.0))
                            .fill(Paint::solid(SLATE_900).with_opacity(0.5))
                            .radius(8.0)
                    })
                    .collect(),
            ),
            24.0,
        ),

        SectionId::Education => section(
            id,
            Some(title(ctx.labels.education)),
            Node::column(
                16.0,
                data.education
                    .iter()
                    .map(|e| {
                        Node::column(
                            8.0,
                            vec![
                                Node::bar(2.0, 16.0, Paint::solid(CYAN_900)),
                                sections::education_entry(e, &palette),
                            ],
                        )
                        .padding(Insets::new(0.0, 0.0, 0.0, 12.0))
                    })
                    .collect(),
            ),
            20.0,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, ThemeSelection};
    use crate::render::render;

    fn cyber(accent: Rgb) -> ThemeSelection {
        ThemeSelection {
            theme: ThemeKind::Cyber,
            accent,
        }
    }

    #[test]
    fn test_black_accent_falls_back_to_cyan() {
        assert_eq!(neon(Rgb::BLACK), CYAN_500);
        assert_eq!(neon(Rgb(0xe1, 0x1d, 0x48)), Rgb(0xe1, 0x1d, 0x48));

        let doc = render(&ResumeData::example(), &cyber(Rgb::BLACK), &LayoutConfig::default(), Language::EN);
        assert_eq!(doc.decorations[0].paint.color, CYAN_500, "grid uses the neon colour");
    }

    #[test]
    fn test_body_follows_configured_order() {
        let order = vec![
            SectionId::Skills,
            SectionId::Education,
            SectionId::About,
            SectionId::Experience,
        ];
        let layout = LayoutConfig::new(order.clone(), 1.0, 2.0);
        let doc = render(&ResumeData::example(), &cyber(CYAN_500), &layout, Language::EN);
        assert_eq!(doc.section_order(), order);
    }

    #[test]
    fn test_header_texts() {
        let doc = render(&ResumeData::example(), &cyber(CYAN_500), &LayoutConfig::default(), Language::EN);
        assert_eq!(
            doc.tagged_texts(Tag::Title),
            vec!["Running Protocol: Senior Frontend Developer"]
        );
        assert_eq!(
            doc.tagged_texts(Tag::SectionHeader(SectionId::About)),
            vec!["SYSTEM_LOG: ABOUT"]
        );
        assert_eq!(doc.background, Background::Solid(VOID));
    }
}
