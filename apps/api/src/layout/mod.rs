// Page layout: text measurement, single-line fitting, the node tree themes
// build, and the engine that positions it on an A4 page.

pub mod engine;
pub mod font_metrics;
pub mod node;
pub mod text_fit;

pub use engine::{compose, Composition, LayoutBox, Placed, Rect};
pub use font_metrics::{FontFamily, FontSpec, FontWeight, StaticMetrics, TextMeasurer};
pub use text_fit::FitCache;
