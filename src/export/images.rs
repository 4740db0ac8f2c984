//! Making sure embedded images are usable before the page is rasterised.
//!
//! Every `<img>` in the rendered tree is decoded on a worker thread and given a
//! bounded amount of time. An image that fails or times out is logged and skipped;
//! it never fails the export.

use crate::render::Element;
use base64::Engine;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Not a base64 data URI")]
    NotADataUri,
    #[error("Invalid base64 payload")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to decode image")]
    Decode(#[from] image::ImageError),
    #[error("Failed to read image file")]
    Io(#[from] std::io::Error),
}

/// What happened to the images in one tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageReport {
    pub loaded: usize,
    pub failed: usize,
    pub timed_out: usize,
}

/// Waits, up to `timeout` per image, for each image in `root` to decode.
pub fn prepare_images(root: &Element, timeout: Duration) -> ImageReport {
    let sources: Vec<String> = root
        .find_all(|e| e.tag == "img")
        .into_iter()
        .filter_map(|img| img.get_attr("src"))
        .map(ToString::to_string)
        .collect();

    let mut report = ImageReport::default();
    for src in sources {
        let label = describe_source(&src);
        let (tx, rx) = mpsc::channel();
        let worker_src = src.clone();
        thread::spawn(move || {
            // the receiver may have given up already
            let _ = tx.send(load_image(&worker_src));
        });

        match rx.recv_timeout(timeout) {
            Ok(Ok((width, height))) => {
                tracing::debug!(image = %label, width, height, "image ready");
                report.loaded += 1;
            }
            Ok(Err(e)) => {
                tracing::warn!(image = %label, error = %e, "an image failed to load for PDF generation");
                report.failed += 1;
            }
            Err(_) => {
                tracing::warn!(image = %label, ?timeout, "image loading timed out for PDF generation");
                report.timed_out += 1;
            }
        }
    }
    report
}

/// Decodes an image source, returning its pixel dimensions.
///
/// `data:` URIs are decoded in place; anything else is treated as a file path.
pub fn load_image(src: &str) -> Result<(u32, u32), ImageError> {
    let bytes = if src.starts_with("data:") {
        decode_data_uri(src)?
    } else {
        std::fs::read(src)?
    };
    let image = image::load_from_memory(&bytes)?;
    Ok((image.width(), image.height()))
}

/// Payload of a `data:<mime>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ImageError> {
    let rest = uri.strip_prefix("data:").ok_or(ImageError::NotADataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(ImageError::NotADataUri)?;
    if !header.split(';').any(|part| part == "base64") {
        return Err(ImageError::NotADataUri);
    }
    Ok(base64::engine::general_purpose::STANDARD.decode(payload.trim())?)
}

/// Data URIs are long; log the media type only.
fn describe_source(src: &str) -> String {
    match src.strip_prefix("data:") {
        Some(rest) => format!("data:{}", rest.split([';', ',']).next().unwrap_or_default()),
        None => src.to_string(),
    }
}
