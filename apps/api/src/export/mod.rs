//! Export pipeline: the last composed preview → PNG or paged PDF.
//!
//! Either complete file bytes come back or an [`ExportError`]; nothing partial
//! is ever handed to the caller and no session state is touched here.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::layout::Composition;
use crate::models::{Rgb, ThemeKind};
use crate::render::sections::color::VOID;
use crate::render::svg::{to_svg, AssetMap};

pub mod assets;
pub mod pdf;
pub mod raster;

pub use assets::{AssetFetcher, HttpAssetFetcher};
pub use raster::{Rasterizer, ResvgRasterizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Png,
    Pdf,
}

impl ExportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Some(ExportKind::Png),
            "pdf" => Some(ExportKind::Pdf),
            _ => None,
        }
    }

    /// Device pixels per logical pixel.
    pub fn pixel_ratio(self) -> f32 {
        match self {
            ExportKind::Png => 2.0,
            ExportKind::Pdf => 2.5,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportKind::Png => "image/png",
            ExportKind::Pdf => "application/pdf",
        }
    }

    /// `Somsri Jai-dee` → `Somsri_Jai-dee_Portfolio.png`.
    /// Each whitespace run becomes one `_`; leading and trailing runs are kept.
    pub fn filename(self, full_name: &str) -> String {
        let mut stem = String::with_capacity(full_name.len());
        let mut in_space = false;
        for c in full_name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    stem.push('_');
                }
                in_space = true;
            } else {
                stem.push(c);
                in_space = false;
            }
        }
        match self {
            ExportKind::Png => format!("{stem}_Portfolio.png"),
            ExportKind::Pdf => format!("{stem}_Resume.pdf"),
        }
    }
}

/// Fill behind transparent regions of the raster.
pub fn background_for(theme: ThemeKind) -> Rgb {
    match theme {
        ThemeKind::Cyber => VOID,
        _ => Rgb::WHITE,
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the document preview has not been rendered yet")]
    TargetMissing,

    #[error(
        "Could not embed remote image {url} ({reason}). Cross-origin images such as \
         scan codes can block export; check the link and try again"
    )]
    RemoteAsset { url: String, reason: String },

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("Encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct Exporter {
    fetcher: Arc<dyn AssetFetcher>,
    rasterizer: Arc<dyn Rasterizer>,
}

impl Exporter {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { fetcher, rasterizer }
    }

    pub async fn export(
        &self,
        target: Option<&Composition>,
        kind: ExportKind,
        full_name: &str,
    ) -> Result<ExportedFile, ExportError> {
        let result = self.run(target, kind, full_name).await;
        match &result {
            Ok(file) => info!(
                kind = ?kind,
                filename = %file.filename,
                bytes = file.bytes.len(),
                "Export finished"
            ),
            Err(e) => warn!(kind = ?kind, "Export failed: {e}"),
        }
        result
    }

    async fn run(
        &self,
        target: Option<&Composition>,
        kind: ExportKind,
        full_name: &str,
    ) -> Result<ExportedFile, ExportError> {
        let composition = target.ok_or(ExportError::TargetMissing)?;

        let mut inlined = AssetMap::new();
        for url in composition.remote_images() {
            let bytes = self.fetcher.fetch(&url).await?;
            let uri = assets::image_data_uri(&bytes).map_err(|e| ExportError::RemoteAsset {
                url: url.clone(),
                reason: e.to_string(),
            })?;
            inlined.insert(url, uri);
        }

        let svg = to_svg(composition, &inlined);
        let background = background_for(composition.theme);
        let rasterizer = Arc::clone(&self.rasterizer);

        // Rasterizing and encoding are CPU-bound.
        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ExportError> {
            let image = rasterizer.rasterize(&svg, kind.pixel_ratio(), background)?;
            match kind {
                ExportKind::Png => raster::encode_png(&image),
                ExportKind::Pdf => pdf::paginate(&image),
            }
        })
        .await
        .map_err(|e| ExportError::Rasterize(format!("render task failed: {e}")))??;

        Ok(ExportedFile {
            filename: kind.filename(full_name),
            content_type: kind.content_type(),
            bytes: Bytes::from(bytes),
        })
    }
}
