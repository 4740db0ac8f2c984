//! Slicing one tall raster into fixed-size pages.
//!
//! The rendered document is rasterised as a single image. That image is scaled to
//! the content width of a page and then drawn, whole, onto every page, shifted up by
//! one content height per page. The page frame does the clipping, so nothing here
//! ever crops pixels: `draw_height` is always the full scaled height.
//!
//! ```text
//!   page 0            page 1
//!  +--------+        +--------+
//!  | +----+ |        | |    | |   <- drawn above the page, clipped
//!  | |img | |        | +----+ |
//!  | |    | |        |        |
//!  +--------+        +--------+
//! ```
//!
//! All lengths are millimetres.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PaginateError {
    #[error("Page geometry leaves no content area ({width}mm x {height}mm)")]
    InvalidGeometry { width: f32, height: f32 },
    #[error("Raster has no area ({width}px x {height}px)")]
    InvalidImage { width: u32, height: u32 },
}

/// Page size and margins, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

impl PageGeometry {
    /// A4 portrait with 10mm margins on every side.
    pub fn a4() -> PageGeometry {
        PageGeometry {
            page_width: 210.0,
            page_height: 297.0,
            margin_top: 10.0,
            margin_right: 10.0,
            margin_bottom: 10.0,
            margin_left: 10.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }
}

/// Where the raster goes on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub page_index: usize,
    /// How far down the scaled raster this page starts
    pub source_y_offset: f32,
    pub draw_x: f32,
    /// Top edge of the raster, measured down from the top of the page. Negative for
    /// every page after the first.
    pub draw_y: f32,
    pub draw_width: f32,
    pub draw_height: f32,
}

/// How many pages a `width` x `height` pixel raster needs, without laying them out.
///
/// Fails for the same inputs [`paginate`] does, so a caller can cap the page count
/// before anything is allocated.
pub fn page_count(
    width: u32,
    height: u32,
    geometry: &PageGeometry,
) -> Result<usize, PaginateError> {
    let (_, content_height, scaled_height) = measure(width, height, geometry)?;
    Ok(pages_needed(scaled_height, content_height))
}

/// Lays out a `width` x `height` pixel raster across as many pages as it needs.
///
/// Always returns at least one placement, in page order.
pub fn paginate(
    width: u32,
    height: u32,
    geometry: &PageGeometry,
) -> Result<Vec<PagePlacement>, PaginateError> {
    let (content_width, content_height, scaled_height) = measure(width, height, geometry)?;
    let page_count = pages_needed(scaled_height, content_height);

    let placements = (0..page_count)
        .map(|i| {
            let offset = i as f32 * content_height;
            PagePlacement {
                page_index: i,
                source_y_offset: offset,
                draw_x: geometry.margin_left,
                draw_y: geometry.margin_top - offset,
                draw_width: content_width,
                draw_height: scaled_height,
            }
        })
        .collect();

    Ok(placements)
}

/// Content width, content height and scaled raster height, all finite and positive.
fn measure(
    width: u32,
    height: u32,
    geometry: &PageGeometry,
) -> Result<(f32, f32, f32), PaginateError> {
    let content_width = geometry.content_width();
    let content_height = geometry.content_height();
    let usable = |len: f32| len.is_finite() && len > 0.0;
    // NaN fails both checks, so non-finite margins are caught here too
    if !usable(content_width) || !usable(content_height) {
        return Err(PaginateError::InvalidGeometry {
            width: content_width,
            height: content_height,
        });
    }
    if width == 0 || height == 0 {
        return Err(PaginateError::InvalidImage { width, height });
    }

    let scaled_height = scaled_height(width, height, content_width);
    if !usable(scaled_height) {
        return Err(PaginateError::InvalidGeometry {
            width: content_width,
            height: content_height,
        });
    }
    Ok((content_width, content_height, scaled_height))
}

fn scaled_height(width: u32, height: u32, content_width: f32) -> f32 {
    // f64 so very tall rasters don't drift before the ceil
    (height as f64 * (content_width as f64 / width as f64)) as f32
}

fn pages_needed(scaled_height: f32, content_height: f32) -> usize {
    let pages = (scaled_height as f64 / content_height as f64).ceil();
    (pages as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    #[test]
    fn a4_content_area() {
        let g = PageGeometry::a4();
        assert_eq!(g.content_width(), 190.0);
        assert_eq!(g.content_height(), 277.0);
    }

    #[test]
    fn tall_raster_spans_two_pages() {
        // 3000px tall at 2000px wide scales to 285mm, just over one 277mm page
        let placements = paginate(2000, 3000, &PageGeometry::a4()).expect("can paginate");
        assert_eq!(placements.len(), 2);

        let first = &placements[0];
        assert_eq!(first.page_index, 0);
        assert_close(first.draw_x, 10.0);
        assert_close(first.draw_y, 10.0);
        assert_close(first.draw_width, 190.0);
        assert_close(first.draw_height, 285.0);
        assert_close(first.source_y_offset, 0.0);

        let second = &placements[1];
        assert_eq!(second.page_index, 1);
        assert_close(second.draw_y, 10.0 - 277.0);
        assert_close(second.draw_height, 285.0);
        assert_close(second.source_y_offset, 277.0);
    }

    #[test]
    fn short_raster_fits_one_page() {
        let placements = paginate(2000, 500, &PageGeometry::a4()).unwrap();
        assert_eq!(placements.len(), 1);
        assert_close(placements[0].draw_height, 47.5);
    }

    #[test]
    fn exact_fit_does_not_add_a_page() {
        // 277mm exactly: 190 wide, 277 tall
        let placements = paginate(190, 277, &PageGeometry::a4()).unwrap();
        assert_eq!(placements.len(), 1);
    }

    #[test]
    fn page_count_matches_formula() {
        let g = PageGeometry::a4();
        for height in [1u32, 100, 2915, 2916, 5000, 8748, 20_000] {
            let placements = paginate(2000, height, &g).unwrap();
            let scaled = height as f64 * 190.0 / 2000.0;
            let expected = ((scaled / 277.0).ceil() as usize).max(1);
            assert_eq!(placements.len(), expected, "height {height}");

            for (i, p) in placements.iter().enumerate() {
                assert_eq!(p.page_index, i);
            }
        }
    }

    #[test]
    fn rejects_margins_that_consume_the_page() {
        let mut g = PageGeometry::a4();
        g.margin_left = 105.0;
        g.margin_right = 105.0;
        assert!(matches!(
            paginate(100, 100, &g),
            Err(PaginateError::InvalidGeometry { .. })
        ));

        let mut g = PageGeometry::a4();
        g.margin_top = 200.0;
        g.margin_bottom = 100.0;
        assert!(matches!(
            paginate(100, 100, &g),
            Err(PaginateError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_empty_raster() {
        let g = PageGeometry::a4();
        assert_eq!(
            paginate(0, 100, &g),
            Err(PaginateError::InvalidImage { width: 0, height: 100 })
        );
        assert_eq!(
            paginate(100, 0, &g),
            Err(PaginateError::InvalidImage { width: 100, height: 0 })
        );
    }

    #[test]
    fn rejects_non_finite_geometry() {
        let mut g = PageGeometry::a4();
        g.margin_top = f32::NAN;
        assert!(matches!(
            paginate(2000, 3000, &g),
            Err(PaginateError::InvalidGeometry { .. })
        ));

        let mut g = PageGeometry::a4();
        g.page_width = f32::INFINITY;
        assert!(matches!(
            paginate(2000, 3000, &g),
            Err(PaginateError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            page_count(2000, 3000, &g),
            Err(PaginateError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_raster_too_tall_to_scale() {
        // scaling a very tall raster to f32::MAX mm wide overflows f32
        let mut g = PageGeometry::a4();
        g.page_width = f32::MAX;
        g.margin_left = 0.0;
        g.margin_right = 0.0;
        assert!(matches!(
            paginate(1, u32::MAX, &g),
            Err(PaginateError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn page_count_agrees_with_paginate() {
        let g = PageGeometry::a4();
        for height in [1u32, 2916, 8748] {
            let placements = paginate(2000, height, &g).unwrap();
            assert_eq!(page_count(2000, height, &g), Ok(placements.len()));
        }
    }

    #[test]
    fn page_count_is_cheap_for_tiny_content_height() {
        let mut g = PageGeometry::a4();
        g.page_height = 20.001;
        let pages = page_count(10, 50, &g).expect("geometry is valid");
        assert!(pages > 10_000, "{pages}");
    }
}
