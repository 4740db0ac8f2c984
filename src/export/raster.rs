//! The rasterisation seam.
//!
//! Turning HTML into pixels is not done in-process. A [`Rasterizer`] takes the
//! standalone page produced by the renderer and hands back an opaque RGB bitmap.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Rasterizer command is empty")]
    EmptyCommand,
    #[error("Failed to run rasterizer `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Rasterizer `{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("Failed to stage rasterizer files")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode raster {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// An opaque 8-bit RGB bitmap, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl RasterImage {
    /// Flattens any decoded image onto a white background.
    pub fn from_dynamic(image: &image::DynamicImage) -> RasterImage {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.push(over_white(r, a));
            rgb.push(over_white(g, a));
            rgb.push(over_white(b, a));
        }

        RasterImage { width, height, rgb }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<RasterImage, RasterError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| RasterError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(RasterImage::from_dynamic(&image))
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

pub trait Rasterizer {
    /// Renders a complete HTML document at `scale` device pixels per CSS pixel.
    fn rasterize(&self, html: &str, scale: f32) -> Result<RasterImage, RasterError>;
}

/// Runs an external program to do the rasterising.
///
/// The argv is a template: `{input}` is replaced with the path of the HTML file,
/// `{output}` with the PNG path the program must write and `{scale}` with the
/// pixel ratio.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    argv: Vec<String>,
}

impl CommandRasterizer {
    pub fn new(argv: Vec<String>) -> CommandRasterizer {
        CommandRasterizer { argv }
    }

    fn expand(&self, input: &Path, output: &Path, scale: f32) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        let scale = scale.to_string();
        self.argv
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input)
                    .replace("{output}", &output)
                    .replace("{scale}", &scale)
            })
            .collect()
    }
}

impl Rasterizer for CommandRasterizer {
    fn rasterize(&self, html: &str, scale: f32) -> Result<RasterImage, RasterError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.png");
        std::fs::write(&input, html)?;

        let argv = self.expand(&input, &output, scale);
        let (program, args) = argv.split_first().ok_or(RasterError::EmptyCommand)?;
        tracing::debug!(%program, ?args, "running rasterizer");

        let result = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| RasterError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !result.status.success() {
            return Err(RasterError::Failed {
                program: program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        RasterImage::load(&output)
    }
}

/// Uses an image that was rasterised ahead of time, ignoring the HTML.
#[derive(Debug, Clone)]
pub struct PngFileRasterizer {
    path: PathBuf,
}

impl PngFileRasterizer {
    pub fn new<P: AsRef<Path>>(path: P) -> PngFileRasterizer {
        PngFileRasterizer {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Rasterizer for PngFileRasterizer {
    fn rasterize(&self, _html: &str, _scale: f32) -> Result<RasterImage, RasterError> {
        RasterImage::load(&self.path)
    }
}
