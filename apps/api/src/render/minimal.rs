//! Minimal: one column of label/content rows driven strictly by the
//! configured section order.

use crate::layout::node::{Align, Background, BorderSide, Insets, Node, Paint, Tag, TextMode, Track};
use crate::layout::FontWeight;
use crate::models::{LayoutConfig, ResumeData, Rgb, SectionId, ThemeKind};
use crate::render::sections::{
    self, color::*, has_content, mono, sans, ChipStyle, EntryPalette, REM,
};
use crate::render::{RenderContext, RenderedDocument, ThemeRenderer};

pub struct Minimal;

impl ThemeRenderer for Minimal {
    fn render(&self, data: &ResumeData, layout: &LayoutConfig, ctx: &RenderContext<'_>) -> RenderedDocument {
        let rows: Vec<Node> = layout
            .order
            .iter()
            .filter(|id| has_content(data, **id))
            .enumerate()
            .map(|(i, id)| section_row(data, *id, i == 0, ctx))
            .collect();

        let root = Node::column(
            40.0,
            vec![header(data), Node::column(layout.spacing * REM, rows)],
        )
        .padding(Insets::all(48.0));

        RenderedDocument {
            theme: ThemeKind::Minimal,
            scale: layout.scale,
            background: Background::Solid(Rgb::WHITE),
            decorations: Vec::new(),
            root,
        }
    }
}

fn header(data: &ResumeData) -> Node {
    let contact = mono(12.0, FontWeight::Regular, SLATE_900).opacity(0.6);
    let mut right = Vec::new();
    for value in [&data.email, &data.phone] {
        if !value.trim().is_empty() {
            right.push(Node::text(value.as_str(), contact, TextMode::Line));
        }
    }

    Node::row(
        24.0,
        vec![Track::Fraction(1.0), Track::Auto],
        vec![
            Node::row(
                20.0,
                vec![Track::Auto, Track::Fraction(1.0)],
                vec![
                    sections::avatar(data, 72.0, 72.0, true).fill(Paint::solid(SLATE_100)),
                    Node::column(
                        8.0,
                        vec![
                            Node::text(
                                data.full_name.to_uppercase(),
                                sans(60.0, FontWeight::Black, SLATE_900).line_height(1.0),
                                TextMode::Fit,
                            )
                            .tag(Tag::Name),
                            Node::text(
                                data.title.to_uppercase(),
                                sans(20.0, FontWeight::Medium, SLATE_500),
                                TextMode::Fit,
                            )
                            .tag(Tag::Title),
                        ],
                    ),
                ],
            )
            .align(Align::Center),
            Node::column(4.0, right),
        ],
    )
    .padding(Insets::new(0.0, 0.0, 32.0, 0.0))
    .border(BorderSide::Bottom, 4.0, Paint::solid(Rgb::BLACK))
    .tag(Tag::Header)
}

/// Row labels are fixed English words.
fn row_label(id: SectionId) -> &'static str {
    match id {
        SectionId::About => "ABOUT",
        SectionId::Skills => "SKILLS",
        SectionId::Experience => "EXPERIENCE",
        SectionId::Projects => "SELECTED WORKS",
        SectionId::Education => "EDUCATION",
    }
}

fn section_row(data: &ResumeData, id: SectionId, first: bool, ctx: &RenderContext<'_>) -> Node {
    let palette = EntryPalette {
        heading: SLATE_800,
        body: SLATE_600,
        muted: SLATE_500,
        highlight: ctx.accent,
        date: SLATE_500,
        body_family: crate::layout::FontFamily::Sans,
    };

    let content = match id {
        SectionId::About => Node::text(
            data.about.trim_end(),
            sans(18.0, FontWeight::Medium, SLATE_900).line_height(1.6),
            TextMode::Wrap,
        ),
        SectionId::Skills => {
            let chips = ChipStyle {
                text: sans(16.0, FontWeight::Bold, SLATE_900),
                padding: Insets::new(0.0, 12.0, 2.0, 0.0),
                fill: None,
                radius: 0.0,
                underline: None,
                brackets: false,
            };
            sections::skill_chips(data, &chips, 12.0)
        }
        SectionId::Experience => Node::column(
            32.0,
            data.experiences
                .iter()
                .map(|e| sections::experience_entry(e, &palette))
                .collect(),
        ),
        SectionId::Projects => {
            let cards = data
                .projects
                .iter()
                .map(|p| {
                    sections::project_entry(p, &EntryPalette { highlight: SLATE_400, ..palette })
                        .padding(Insets::all(16.0))
                        .fill(Paint::solid(SLATE_50))
                        .radius(8.0)
                        .border(BorderSide::All, 1.0, Paint::solid(SLATE_100))
                })
                .collect();
            sections::two_up(cards, 16.0)
        }
        SectionId::Education => Node::column(
            16.0,
            data.education
                .iter()
                .map(|e| sections::education_entry(e, &EntryPalette { date: ctx.accent, ..palette }))
                .collect(),
        ),
    };

    let label = Node::text(row_label(id), sans(12.0, FontWeight::Black, SLATE_900), TextMode::Line)
        .padding(Insets::new(4.0, 0.0, 0.0, 0.0))
        .tag(Tag::SectionHeader(id));

    let row = Node::row(24.0, vec![Track::Fraction(3.0), Track::Fraction(9.0)], vec![label, content])
        .tag(Tag::Section(id));
    if first {
        row
    } else {
        row.padding(Insets::new(32.0, 0.0, 0.0, 0.0))
            .border(BorderSide::Top, 1.0, Paint::solid(SLATE_100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, ThemeSelection};
    use crate::render::render;

    fn minimal() -> ThemeSelection {
        ThemeSelection {
            theme: ThemeKind::Minimal,
            ..ThemeSelection::default()
        }
    }

    #[test]
    fn test_rows_follow_configured_order_exactly() {
        let order = vec![
            SectionId::Education,
            SectionId::Skills,
            SectionId::About,
            SectionId::Projects,
            SectionId::Experience,
        ];
        let layout = LayoutConfig::new(order.clone(), 1.0, 1.5);
        let doc = render(&ResumeData::example(), &minimal(), &layout, Language::EN);
        assert_eq!(doc.section_order(), order);
    }

    #[test]
    fn test_rows_skip_empty_and_unlisted_sections() {
        let mut data = ResumeData::example();
        data.projects.clear();
        data.about = String::new();
        let layout = LayoutConfig::new(
            vec![SectionId::Projects, SectionId::Experience, SectionId::About, SectionId::Skills],
            1.0,
            1.5,
        );
        let doc = render(&data, &minimal(), &layout, Language::EN);
        assert_eq!(doc.section_order(), vec![SectionId::Experience, SectionId::Skills]);
        assert!(!doc.has_header(SectionId::Education), "education is not in the order");
    }

    #[test]
    fn test_projects_row_is_labelled_selected_works() {
        let doc = render(&ResumeData::example(), &minimal(), &LayoutConfig::default(), Language::TH);
        assert_eq!(
            doc.tagged_texts(Tag::SectionHeader(SectionId::Projects)),
            vec!["SELECTED WORKS"]
        );
    }
}
