pub mod design;
pub mod language;
pub mod presets;
pub mod resume;

pub use design::{LayoutConfig, Rgb, SectionId, ThemeKind, ThemeSelection};
pub use language::Language;
pub use resume::ResumeData;
