//! Exporting a rendered resume as a paginated PDF.
//!
//! The pipeline is: render the document, wrap it in a standalone page, wait for its
//! images, rasterise it, slice the raster into pages and write the PDF. The whole
//! file is assembled in memory, so a failure at any step leaves nothing on disk.
//!
//! Only one export runs at a time. While it runs a loading notification is shown;
//! it is torn down however the export ends.

mod filename;
mod images;
mod pagination;
mod pdf;
mod raster;

pub use filename::*;
pub use images::*;
pub use pagination::*;
pub use pdf::*;
pub use raster::*;

use crate::document::ResumeDocument;
use crate::notification::NotificationCenter;
use crate::render::{to_html_page, Renderer};
use crate::themes::Theme;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Shown while an export is in flight.
pub const LOADING_MESSAGE: &str = "Generating PDF...";
/// Shown when an export fails for any reason. Details go to the log.
pub const FAILURE_MESSAGE: &str = "Failed to generate PDF. Please check the console for details.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,
    #[error(transparent)]
    Paginate(#[from] PaginateError),
    #[error("Failed to rasterise the resume")]
    Raster(#[from] RasterError),
    #[error("Resume needs {pages} pages but at most {max} are allowed")]
    TooManyPages { pages: usize, max: usize },
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything about an export that isn't the document or theme.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub geometry: PageGeometry,
    /// Device pixels per CSS pixel for the raster
    pub pixel_ratio: f32,
    pub image_timeout: Duration,
    pub max_pages: Option<usize>,
    pub clip_margins: bool,
    pub outdir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            geometry: PageGeometry::a4(),
            pixel_ratio: 2.0,
            image_timeout: Duration::from_secs(7),
            max_pages: None,
            clip_margins: false,
            outdir: PathBuf::from("."),
        }
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub page_count: usize,
    pub size_bytes: u64,
    pub images: ImageReport,
    /// `false` for dry runs
    pub written: bool,
}

/// `<outdir>/<sanitised full name>.pdf`
pub fn output_path(outdir: &Path, full_name: &str) -> PathBuf {
    outdir.join(format!("{}.pdf", sanitize_filename(full_name)))
}

pub struct Exporter<'a> {
    rasterizer: &'a dyn Rasterizer,
    notifications: &'a NotificationCenter,
    settings: ExportSettings,
    busy: AtomicBool,
}

/// Clears the busy flag when an export finishes.
struct BusyGuard<'b>(&'b AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<'a> Exporter<'a> {
    pub fn new(
        rasterizer: &'a dyn Rasterizer,
        notifications: &'a NotificationCenter,
        settings: ExportSettings,
    ) -> Exporter<'a> {
        Exporter {
            rasterizer,
            notifications,
            settings,
            busy: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, ExportError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::Busy)?;
        Ok(BusyGuard(&self.busy))
    }

    /// Exports `document` to `out`, or to the default path derived from the
    /// document's full name.
    pub fn export(
        &self,
        document: &ResumeDocument,
        theme: &Theme,
        out: Option<&Path>,
        dry_run: bool,
    ) -> Result<ExportOutcome, ExportError> {
        let _busy = self.acquire()?;

        let path = match out {
            Some(path) => path.to_path_buf(),
            None => output_path(&self.settings.outdir, &document.personal_info.full_name),
        };

        let result = {
            let _loading = self.notifications.loading(LOADING_MESSAGE);
            self.run(document, theme, path, dry_run)
        };

        match &result {
            Ok(outcome) if outcome.written => {
                self.notifications
                    .success(format!("Saved {}", outcome.path.display()));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = ?e, "error generating PDF");
                self.notifications.error(FAILURE_MESSAGE);
            }
        }
        result
    }

    fn run(
        &self,
        document: &ResumeDocument,
        theme: &Theme,
        path: PathBuf,
        dry_run: bool,
    ) -> Result<ExportOutcome, ExportError> {
        let settings = &self.settings;

        let root = Renderer::new(theme).render(document);
        let title = match document.personal_info.full_name.trim() {
            "" => "Resume",
            name => name,
        };
        let html = to_html_page(&root, title, theme);

        let images = prepare_images(&root, settings.image_timeout);
        tracing::debug!(?images, "images prepared");

        let raster = self.rasterizer.rasterize(&html, settings.pixel_ratio)?;
        tracing::debug!(width = raster.width, height = raster.height, "rasterised resume");

        let pages = page_count(raster.width, raster.height, &settings.geometry)?;
        if let Some(max) = settings.max_pages {
            if pages > max {
                return Err(ExportError::TooManyPages { pages, max });
            }
        }
        let placements = paginate(raster.width, raster.height, &settings.geometry)?;

        let bytes = write_pdf(
            &raster,
            &placements,
            &settings.geometry,
            &PdfOptions {
                title: Some(title.to_string()),
                clip_margins: settings.clip_margins,
            },
        );

        if !dry_run {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| ExportError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&path, &bytes).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), pages = placements.len(), "wrote PDF");
        }

        Ok(ExportOutcome {
            path,
            page_count: placements.len(),
            size_bytes: bytes.len() as u64,
            images,
            written: !dry_run,
        })
    }
}
