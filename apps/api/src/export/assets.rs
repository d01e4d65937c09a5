use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::ImageFormat;
use reqwest::Client;
use tracing::debug;

use super::ExportError;

/// Loads remote images referenced by the document so they can be inlined
/// before rasterizing.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError>;
}

pub struct HttpAssetFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpAssetFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError> {
        let remote = |reason: String| ExportError::RemoteAsset {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote(format!("status {status}")));
        }

        let body = response.bytes().await.map_err(|e| remote(e.to_string()))?;
        debug!(url, bytes = body.len(), "Fetched remote asset");
        Ok(body.to_vec())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageDataError {
    #[error("unsupported image format")]
    Unsupported,
    #[error("image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

/// Sniffs and decodes `bytes`, then wraps them as a `data:` URI. Only PNG,
/// JPEG and WebP are accepted.
pub fn image_data_uri(bytes: &[u8]) -> Result<String, ImageDataError> {
    let format = image::guess_format(bytes).map_err(|_| ImageDataError::Unsupported)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP) {
        return Err(ImageDataError::Unsupported);
    }
    image::load_from_memory_with_format(bytes, format)?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        BASE64.encode(bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::raster::{encode_png, RasterImage};

    fn tiny_png() -> Vec<u8> {
        encode_png(&RasterImage {
            width: 2,
            height: 2,
            rgba: vec![255; 16],
        })
        .unwrap()
    }

    #[test]
    fn test_png_becomes_data_uri() {
        let uri = image_data_uri(&tiny_png()).unwrap();
        assert!(uri.starts_with("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            image_data_uri(b"definitely not an image"),
            Err(ImageDataError::Unsupported)
        ));
    }

    #[test]
    fn test_truncated_png_fails_to_decode() {
        let png = tiny_png();
        assert!(matches!(
            image_data_uri(&png[..20]),
            Err(ImageDataError::Decode(_))
        ));
    }
}
