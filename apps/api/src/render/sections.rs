//! Building blocks the four themes share: palette, avatar, skill chips,
//! list entries, link icons and the scan code.

use crate::layout::node::{
    Align, BorderSide, Glyph, ImageSource, Insets, Node, Paint, Tag, TextMode, TextStyle, Track,
};
use crate::layout::{FontFamily, FontSpec, FontWeight};
use crate::models::resume::{Education, Experience, LinkItem, Project};
use crate::models::{ResumeData, Rgb, SectionId};

/// One root em, in logical pixels.
pub const REM: f32 = 16.0;

pub mod color {
    use crate::models::Rgb;

    pub const SLATE_50: Rgb = Rgb(0xf8, 0xfa, 0xfc);
    pub const SLATE_100: Rgb = Rgb(0xf1, 0xf5, 0xf9);
    pub const SLATE_200: Rgb = Rgb(0xe2, 0xe8, 0xf0);
    pub const SLATE_300: Rgb = Rgb(0xcb, 0xd5, 0xe1);
    pub const SLATE_400: Rgb = Rgb(0x94, 0xa3, 0xb8);
    pub const SLATE_500: Rgb = Rgb(0x64, 0x74, 0x8b);
    pub const SLATE_600: Rgb = Rgb(0x47, 0x55, 0x69);
    pub const SLATE_700: Rgb = Rgb(0x33, 0x41, 0x55);
    pub const SLATE_800: Rgb = Rgb(0x1e, 0x29, 0x3b);
    pub const SLATE_900: Rgb = Rgb(0x0f, 0x17, 0x2a);
    pub const CYAN_200: Rgb = Rgb(0xa5, 0xf3, 0xfc);
    pub const CYAN_500: Rgb = Rgb(0x06, 0xb6, 0xd4);
    pub const CYAN_600: Rgb = Rgb(0x08, 0x91, 0xb2);
    pub const CYAN_900: Rgb = Rgb(0x16, 0x4e, 0x63);
    pub const VOID: Rgb = Rgb(0x05, 0x05, 0x0a);
}

pub fn style(family: FontFamily, size: f32, weight: FontWeight, color: Rgb) -> TextStyle {
    TextStyle::new(FontSpec::new(family, size, weight), color)
}

pub fn sans(size: f32, weight: FontWeight, color: Rgb) -> TextStyle {
    style(FontFamily::Sans, size, weight, color)
}

pub fn mono(size: f32, weight: FontWeight, color: Rgb) -> TextStyle {
    style(FontFamily::Mono, size, weight, color)
}

// ────────────────────────────────────────────────────────────────────────────
// Section presence
// ────────────────────────────────────────────────────────────────────────────

/// A section with nothing to show renders nothing, header included.
pub fn has_content(data: &ResumeData, id: SectionId) -> bool {
    match id {
        SectionId::About => !data.about.trim().is_empty(),
        SectionId::Skills => !data.skill_list().is_empty(),
        SectionId::Experience => !data.experiences.is_empty(),
        SectionId::Projects => !data.projects.is_empty(),
        SectionId::Education => !data.education.is_empty(),
    }
}

/// Wraps a header and body into a tagged section block.
pub fn section(id: SectionId, header: Option<Node>, body: Node, gap: f32) -> Node {
    let mut children = Vec::with_capacity(2);
    if let Some(h) = header {
        children.push(h.tag(Tag::SectionHeader(id)));
    }
    children.push(body);
    Node::column(gap, children).tag(Tag::Section(id))
}

/// Label with an optional leading icon, vertically centred.
pub fn header_row(icon: Option<Node>, label: &str, text: TextStyle, gap: f32) -> Node {
    let label = Node::text(label.to_uppercase(), text, TextMode::Line);
    match icon {
        Some(icon) => Node::row(gap, vec![Track::Auto, Track::Fraction(1.0)], vec![icon, label])
            .align(Align::Center),
        None => label,
    }
}

/// Icon on a filled rounded square, as used next to section titles.
pub fn icon_badge(glyph: Glyph, size: f32, color: Rgb, fill: Paint, pad: f32, radius: f32) -> Node {
    Node::icon(glyph, size, color)
        .padding(Insets::all(pad))
        .fill(fill)
        .radius(radius)
}

pub fn section_glyph(id: SectionId) -> Glyph {
    match id {
        SectionId::About => Glyph::User,
        SectionId::Experience => Glyph::Briefcase,
        SectionId::Projects => Glyph::Folder,
        SectionId::Skills => Glyph::Cpu,
        SectionId::Education => Glyph::GraduationCap,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Avatar
// ────────────────────────────────────────────────────────────────────────────

/// The profile photo, or a neutral placeholder when there is none.
pub fn avatar(data: &ResumeData, width: f32, height: f32, round: bool) -> Node {
    let source = match data.profile_image.as_deref().map(str::trim) {
        Some(uri) if uri.starts_with("data:") => ImageSource::Embedded(uri.to_string()),
        Some(uri) if !uri.is_empty() => ImageSource::Remote(uri.to_string()),
        _ => ImageSource::Placeholder,
    };
    Node::image(source, width, height, round).tag(Tag::Avatar)
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// How one skill chip looks. The token text itself carries the tag.
pub struct ChipStyle {
    pub text: TextStyle,
    pub padding: Insets,
    pub fill: Option<Paint>,
    pub radius: f32,
    pub underline: Option<(f32, Paint)>,
    /// Draw `[token]`.
    pub brackets: bool,
}

pub fn skill_chips(data: &ResumeData, chip: &ChipStyle, gap: f32) -> Node {
    let chips = data
        .skill_list()
        .into_iter()
        .map(|token| {
            let token = Node::text(token, chip.text, TextMode::Line).tag(Tag::SkillToken);
            let mut node = if chip.brackets {
                Node::row(
                    0.0,
                    vec![Track::Auto, Track::Auto, Track::Auto],
                    vec![
                        Node::text("[", chip.text, TextMode::Line),
                        token,
                        Node::text("]", chip.text, TextMode::Line),
                    ],
                )
            } else {
                Node::row(0.0, vec![Track::Auto], vec![token])
            };
            node = node.padding(chip.padding).radius(chip.radius);
            if let Some(fill) = chip.fill {
                node = node.fill(fill);
            }
            if let Some((width, paint)) = chip.underline {
                node = node.border(BorderSide::Bottom, width, paint);
            }
            node
        })
        .collect();
    Node::flow(gap, chips)
}

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

/// Colours and faces for entry text.
#[derive(Debug, Clone, Copy)]
pub struct EntryPalette {
    pub heading: Rgb,
    pub body: Rgb,
    pub muted: Rgb,
    pub highlight: Rgb,
    pub date: Rgb,
    pub body_family: FontFamily,
}

pub fn role_line(heading: &str, date: &str, p: &EntryPalette) -> Node {
    Node::row(
        8.0,
        vec![Track::Fraction(1.0), Track::Auto],
        vec![
            Node::text(heading, sans(16.0, FontWeight::Bold, p.heading), TextMode::Wrap),
            Node::text(date, mono(12.0, FontWeight::Bold, p.date), TextMode::Line),
        ],
    )
}

pub fn experience_entry(exp: &Experience, p: &EntryPalette) -> Node {
    let mut children = vec![
        role_line(&exp.role, &exp.duration, p),
        Node::text(
            exp.company.to_uppercase(),
            sans(12.0, FontWeight::Bold, p.highlight),
            TextMode::Wrap,
        ),
    ];
    if !exp.description.trim().is_empty() {
        children.push(Node::text(
            exp.description.trim_end(),
            style(p.body_family, 14.0, FontWeight::Regular, p.body).line_height(1.6),
            TextMode::Wrap,
        ));
    }
    Node::column(4.0, children).tag(Tag::Entry)
}

pub fn project_entry(project: &Project, p: &EntryPalette) -> Node {
    let mut children = vec![Node::text(
        &project.name,
        sans(16.0, FontWeight::Bold, p.heading),
        TextMode::Wrap,
    )];
    if !project.description.trim().is_empty() {
        children.push(Node::text(
            &project.description,
            style(p.body_family, 14.0, FontWeight::Regular, p.body).line_height(1.6),
            TextMode::Wrap,
        ));
    }
    if !project.technologies.trim().is_empty() {
        children.push(Node::text(
            project.technologies.to_uppercase(),
            sans(10.0, FontWeight::Bold, p.highlight),
            TextMode::Wrap,
        ));
    }
    Node::column(4.0, children).tag(Tag::Entry)
}

pub fn education_entry(edu: &Education, p: &EntryPalette) -> Node {
    Node::column(
        2.0,
        vec![
            Node::text(&edu.degree, sans(14.0, FontWeight::Bold, p.heading), TextMode::Wrap),
            Node::text(&edu.institution, sans(12.0, FontWeight::Regular, p.muted), TextMode::Wrap),
            Node::text(&edu.year, mono(12.0, FontWeight::Bold, p.date), TextMode::Line),
        ],
    )
    .tag(Tag::Entry)
}

/// Lays entries out two per row, in stored order.
pub fn two_up(entries: Vec<Node>, gap: f32) -> Node {
    let mut rows = Vec::new();
    let mut it = entries.into_iter();
    while let Some(first) = it.next() {
        let second = it.next().unwrap_or_else(|| Node::spacer(0.0));
        rows.push(Node::row(
            gap,
            vec![Track::Fraction(1.0), Track::Fraction(1.0)],
            vec![first, second],
        ));
    }
    Node::column(gap, rows)
}

// ────────────────────────────────────────────────────────────────────────────
// Links
// ────────────────────────────────────────────────────────────────────────────

/// Icon chosen by case-insensitive substring of the platform label.
pub fn link_glyph(platform: &str) -> Glyph {
    let p = platform.to_lowercase();
    if p.contains("linkedin") {
        Glyph::Linkedin
    } else if p.contains("github") {
        Glyph::Github
    } else if p.contains("twitter") || p.contains("x.com") {
        Glyph::Twitter
    } else if p.contains("facebook") {
        Glyph::Facebook
    } else if p.contains("instagram") {
        Glyph::Instagram
    } else {
        Glyph::Globe
    }
}

/// The URL without its `http://` or `https://` prefix.
pub fn display_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// The image URL of a scannable code for `link`, or `None` when the link has
/// no URL. Scheme-less URLs are assumed to be `https://`.
pub fn scan_code_url(service: &str, link: &LinkItem) -> Option<String> {
    let target = link.url.trim();
    if target.is_empty() {
        return None;
    }
    let target = if target.starts_with("http") {
        target.to_string()
    } else {
        format!("https://{target}")
    };
    reqwest::Url::parse_with_params(service, &[("size", "120x120"), ("data", target.as_str())])
        .ok()
        .map(String::from)
}

pub fn scan_caption(link: &LinkItem) -> &str {
    if link.platform.trim().is_empty() {
        "Portfolio"
    } else {
        link.platform.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(platform: &str, url: &str) -> LinkItem {
        LinkItem {
            id: "l".into(),
            platform: platform.into(),
            url: url.into(),
        }
    }

    #[test]
    fn test_link_glyph_by_substring() {
        assert_eq!(link_glyph("My LinkedIn"), Glyph::Linkedin);
        assert_eq!(link_glyph("GITHUB"), Glyph::Github);
        assert_eq!(link_glyph("x.com"), Glyph::Twitter);
        assert_eq!(link_glyph("Twitter"), Glyph::Twitter);
        assert_eq!(link_glyph("facebook page"), Glyph::Facebook);
        assert_eq!(link_glyph("Instagram"), Glyph::Instagram);
        assert_eq!(link_glyph("Blog"), Glyph::Globe);
        assert_eq!(link_glyph(""), Glyph::Globe);
    }

    #[test]
    fn test_display_url_strips_scheme_only() {
        assert_eq!(display_url("https://github.com/a"), "github.com/a");
        assert_eq!(display_url("http://a.dev"), "a.dev");
        assert_eq!(display_url("ftp://a.dev"), "ftp://a.dev");
        assert_eq!(display_url("a.dev"), "a.dev");
    }

    #[test]
    fn test_scan_code_url_prefixes_scheme_and_encodes() {
        let base = "https://api.qrserver.com/v1/create-qr-code/";
        let url = scan_code_url(base, &link("GitHub", "github.com/a b")).unwrap();
        assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=120x120&data="));
        assert!(url.contains("https%3A%2F%2Fgithub.com%2Fa"), "got {url}");
        assert!(!url.contains(' '));

        let kept = scan_code_url(base, &link("Site", "http://a.dev")).unwrap();
        assert!(kept.contains("data=http%3A%2F%2Fa.dev"), "got {kept}");
        assert_eq!(scan_code_url(base, &link("Site", "  ")), None);
    }

    #[test]
    fn test_scan_caption_falls_back_to_portfolio() {
        assert_eq!(scan_caption(&link("", "a.dev")), "Portfolio");
        assert_eq!(scan_caption(&link("GitHub", "a.dev")), "GitHub");
    }

    #[test]
    fn test_avatar_placeholder_when_missing_or_blank() {
        let mut data = ResumeData::example();
        data.profile_image = None;
        let node = avatar(&data, 10.0, 10.0, true);
        assert!(matches!(
            node.kind,
            crate::layout::node::NodeKind::Image(ref i) if i.source == ImageSource::Placeholder
        ));
        data.profile_image = Some(" ".into());
        let node = avatar(&data, 10.0, 10.0, true);
        assert!(matches!(
            node.kind,
            crate::layout::node::NodeKind::Image(ref i) if i.source == ImageSource::Placeholder
        ));
    }

    #[test]
    fn test_has_content_ignores_blank_about_and_empty_skills() {
        let mut data = ResumeData::example();
        data.about = "   ".into();
        data.skills = " , ,".into();
        assert!(!has_content(&data, SectionId::About));
        assert!(!has_content(&data, SectionId::Skills));
        assert!(has_content(&data, SectionId::Experience));
    }
}
