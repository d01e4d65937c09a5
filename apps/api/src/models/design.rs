//! Design-side state: section order, size/spacing multipliers, theme and accent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::resume::MoveDirection;

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// The fixed section vocabulary every theme shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    About,
    Experience,
    Projects,
    Skills,
    Education,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::About,
        SectionId::Experience,
        SectionId::Projects,
        SectionId::Skills,
        SectionId::Education,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "about" => Some(SectionId::About),
            "experience" => Some(SectionId::Experience),
            "projects" => Some(SectionId::Projects),
            "skills" => Some(SectionId::Skills),
            "education" => Some(SectionId::Education),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout configuration
// ────────────────────────────────────────────────────────────────────────────

pub const SCALE_MIN: f32 = 0.8;
pub const SCALE_MAX: f32 = 1.2;
pub const SPACING_MIN: f32 = 1.0;
pub const SPACING_MAX: f32 = 4.0;

/// User-controlled ordering and density. The model clamps both multipliers,
/// so a renderer never sees an out-of-range value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutConfig {
    pub order: Vec<SectionId>,
    pub scale: f32,
    pub spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            order: vec![
                SectionId::About,
                SectionId::Experience,
                SectionId::Projects,
                SectionId::Skills,
                SectionId::Education,
            ],
            scale: 1.0,
            spacing: 1.5,
        }
    }
}

impl LayoutConfig {
    pub fn new(order: Vec<SectionId>, scale: f32, spacing: f32) -> Self {
        Self {
            order: dedup_order(order),
            scale: clamp_or(scale, SCALE_MIN, SCALE_MAX, 1.0),
            spacing: clamp_or(spacing, SPACING_MIN, SPACING_MAX, 1.5),
        }
    }

    pub fn with_scale(&self, scale: f32) -> Self {
        Self::new(self.order.clone(), scale, self.spacing)
    }

    pub fn with_spacing(&self, spacing: f32) -> Self {
        Self::new(self.order.clone(), self.scale, spacing)
    }

    /// Swaps the section at `index` with its neighbour. Out-of-range moves are no-ops.
    pub fn move_section(&self, index: usize, direction: MoveDirection) -> Self {
        let mut order = self.order.clone();
        match direction {
            MoveDirection::Up if index > 0 && index < order.len() => order.swap(index, index - 1),
            MoveDirection::Down if index + 1 < order.len() => order.swap(index, index + 1),
            _ => {}
        }
        Self { order, ..self.clone() }
    }

    pub fn includes(&self, section: SectionId) -> bool {
        self.order.contains(&section)
    }
}

fn dedup_order(order: Vec<SectionId>) -> Vec<SectionId> {
    let mut out = Vec::with_capacity(order.len());
    for id in order {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[derive(Deserialize)]
struct RawLayoutConfig {
    #[serde(default)]
    order: Option<Vec<String>>,
    #[serde(default)]
    scale: Option<f32>,
    #[serde(default)]
    spacing: Option<f32>,
}

impl<'de> Deserialize<'de> for LayoutConfig {
    /// Unknown section ids are dropped, duplicates collapse, multipliers clamp.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawLayoutConfig::deserialize(deserializer)?;
        let defaults = LayoutConfig::default();
        let order = match raw.order {
            Some(ids) => ids.iter().filter_map(|s| SectionId::parse(s)).collect(),
            None => defaults.order,
        };
        Ok(LayoutConfig::new(
            order,
            raw.scale.unwrap_or(defaults.scale),
            raw.spacing.unwrap_or(defaults.spacing),
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Theme selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Modern,
    Minimal,
    Creative,
    Cyber,
}

impl ThemeKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(ThemeKind::Modern),
            "minimal" => Some(ThemeKind::Minimal),
            "creative" => Some(ThemeKind::Creative),
            "cyber" => Some(ThemeKind::Cyber),
            _ => None,
        }
    }
}

/// An opaque RGB colour. Parsed from and written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Accepts `#rrggbb` or `rrggbb`, any case.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("'{s}' is not a #rrggbb colour")))
    }
}

/// The accent palette offered next to the free colour picker.
pub const PRESET_ACCENTS: [Rgb; 7] = [
    Rgb(0x06, 0xb6, 0xd4), // cyan (default)
    Rgb(0x25, 0x63, 0xeb),
    Rgb(0x7c, 0x3a, 0xed),
    Rgb(0xe1, 0x1d, 0x48),
    Rgb(0x10, 0xb9, 0x81),
    Rgb(0xd9, 0x77, 0x06),
    Rgb(0x0f, 0x17, 0x2a),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSelection {
    pub theme: ThemeKind,
    pub accent: Rgb,
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Modern,
            accent: PRESET_ACCENTS[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_spacing_are_clamped() {
        let cfg = LayoutConfig::default().with_scale(3.0).with_spacing(0.1);
        assert_eq!(cfg.scale, SCALE_MAX);
        assert_eq!(cfg.spacing, SPACING_MIN);
        assert_eq!(LayoutConfig::default().with_scale(f32::NAN).scale, 1.0);
    }

    #[test]
    fn test_deserialize_drops_unknown_and_duplicate_sections() {
        let cfg: LayoutConfig = serde_json::from_str(
            r#"{"order":["skills","bogus","about","skills"],"scale":0.5,"spacing":2}"#,
        )
        .unwrap();
        assert_eq!(cfg.order, vec![SectionId::Skills, SectionId::About]);
        assert_eq!(cfg.scale, SCALE_MIN);
        assert_eq!(cfg.spacing, 2.0);
    }

    #[test]
    fn test_move_section_swaps_and_ignores_edges() {
        let cfg = LayoutConfig::default();
        let moved = cfg.move_section(0, MoveDirection::Down);
        assert_eq!(moved.order[0], SectionId::Experience);
        assert_eq!(moved.order[1], SectionId::About);
        assert_eq!(cfg.move_section(0, MoveDirection::Up), cfg);
        assert_eq!(cfg.move_section(4, MoveDirection::Down), cfg);
        assert_eq!(cfg.move_section(99, MoveDirection::Up), cfg);
    }

    #[test]
    fn test_rgb_hex_parsing() {
        assert_eq!(Rgb::parse_hex("#06B6D4"), Some(Rgb(6, 182, 212)));
        assert_eq!(Rgb::parse_hex("ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#gg0000"), None);
        assert_eq!(Rgb(6, 182, 212).to_hex(), "#06b6d4");
    }

    #[test]
    fn test_theme_selection_json_shape() {
        let json = serde_json::to_string(&ThemeSelection::default()).unwrap();
        assert_eq!(json, r##"{"theme":"modern","accent":"#06b6d4"}"##);
    }
}
