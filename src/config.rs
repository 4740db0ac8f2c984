//! `resume-builder.toml`.
//!
//! Every field has a default, so a missing file, a missing section or a missing key
//! all mean "use the default". The `config` command writes a full file.

use crate::export::{
    CommandRasterizer, ExportSettings, PageGeometry, PngFileRasterizer, Rasterizer,
};
use crate::themes::ThemeRegistry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "resume-builder.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub store: StoreConfig,
    pub export: ExportConfig,
    pub rasterizer: RasterizerConfig,
    pub themes: ThemesConfig,
}

impl Configuration {
    /// Reads the configuration at `path`, or the defaults if there is no file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Configuration::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Failed to convert configuration to TOML")
    }

    /// The theme catalog, including any custom themes.
    pub fn theme_registry(&self) -> Result<ThemeRegistry> {
        match &self.themes.dir {
            Some(dir) => ThemeRegistry::with_custom_themes(dir),
            None => Ok(ThemeRegistry::builtin().clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the saved resume and preferences
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("resume-builder.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_store_path(),
        }
    }
}

/// PDF export settings. Lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_page_width")]
    pub page_width_mm: f32,
    #[serde(default = "default_page_height")]
    pub page_height_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_top_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_right_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_bottom_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_left_mm: f32,
    /// Device pixels per CSS pixel when rasterising
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f32,
    /// How long to wait for each embedded image
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,
    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,
    /// Refuse to write PDFs longer than this
    #[serde(default)]
    pub max_pages: Option<usize>,
    /// Keep the raster out of the page margins
    #[serde(default)]
    pub clip_margins: bool,
}

fn default_page_width() -> f32 {
    210.0
}
fn default_page_height() -> f32 {
    297.0
}
fn default_margin() -> f32 {
    10.0
}
fn default_pixel_ratio() -> f32 {
    2.0
}
fn default_image_timeout_secs() -> u64 {
    7
}
fn default_outdir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            page_width_mm: default_page_width(),
            page_height_mm: default_page_height(),
            margin_top_mm: default_margin(),
            margin_right_mm: default_margin(),
            margin_bottom_mm: default_margin(),
            margin_left_mm: default_margin(),
            pixel_ratio: default_pixel_ratio(),
            image_timeout_secs: default_image_timeout_secs(),
            outdir: default_outdir(),
            max_pages: None,
            clip_margins: false,
        }
    }
}

impl ExportConfig {
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            page_width: self.page_width_mm,
            page_height: self.page_height_mm,
            margin_top: self.margin_top_mm,
            margin_right: self.margin_right_mm,
            margin_bottom: self.margin_bottom_mm,
            margin_left: self.margin_left_mm,
        }
    }

    pub fn settings(&self) -> ExportSettings {
        ExportSettings {
            geometry: self.geometry(),
            pixel_ratio: self.pixel_ratio,
            image_timeout: Duration::from_secs(self.image_timeout_secs),
            max_pages: self.max_pages,
            clip_margins: self.clip_margins,
            outdir: self.outdir.clone(),
        }
    }
}

/// How HTML becomes pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterizerConfig {
    /// Program and arguments; `{input}`, `{output}` and `{scale}` are substituted
    #[serde(default = "default_rasterizer_command")]
    pub command: Vec<String>,
    /// Use this pre-rendered image instead of running the command
    #[serde(default)]
    pub image: Option<PathBuf>,
}

fn default_rasterizer_command() -> Vec<String> {
    [
        "wkhtmltoimage",
        "--quiet",
        "--format",
        "png",
        "--width",
        "794",
        "--zoom",
        "{scale}",
        "{input}",
        "{output}",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        RasterizerConfig {
            command: default_rasterizer_command(),
            image: None,
        }
    }
}

impl RasterizerConfig {
    /// `image` overrides both the configured image and the command.
    pub fn build(&self, image: Option<&Path>) -> Box<dyn Rasterizer> {
        match image.or(self.image.as_deref()) {
            Some(path) => Box::new(PngFileRasterizer::new(path)),
            None => Box::new(CommandRasterizer::new(self.command.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemesConfig {
    /// Directory of extra `*.toml` themes
    #[serde(default)]
    pub dir: Option<PathBuf>,
}
