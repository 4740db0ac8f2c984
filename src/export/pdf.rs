//! Writing placed rasters out as a PDF.
//!
//! The raster is embedded once as a Flate-compressed image XObject and every page
//! draws it at its own placement. Page coordinates in a [`PagePlacement`] are
//! millimetres measured down from the top-left corner; PDF user space is points
//! measured up from the bottom-left, so everything is flipped and scaled here.

use super::pagination::{PageGeometry, PagePlacement};
use super::raster::RasterImage;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

/// zlib level for the embedded raster
const COMPRESSION_LEVEL: u8 = 6;

const IMAGE_NAME: Name<'static> = Name(b"Im0");

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Options that don't affect pagination.
#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    pub title: Option<String>,
    /// Clip each page's drawing to the content box so the raster never bleeds into
    /// the margins.
    pub clip_margins: bool,
}

/// Builds a complete PDF document.
pub fn write_pdf(
    raster: &RasterImage,
    placements: &[PagePlacement],
    geometry: &PageGeometry,
    options: &PdfOptions,
) -> Vec<u8> {
    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let page_tree_id = alloc();
    let image_id = alloc();
    let info_id = alloc();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);

    if let Some(title) = &options.title {
        pdf.document_info(info_id)
            .title(TextStr(title))
            .creator(TextStr(env!("CARGO_PKG_NAME")));
    }

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raster.rgb, COMPRESSION_LEVEL);
    {
        let mut image = pdf.image_xobject(image_id, &compressed);
        image.filter(Filter::FlateDecode);
        image.width(raster.width as i32);
        image.height(raster.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
    }

    let page_width = mm_to_pt(geometry.page_width);
    let page_height = mm_to_pt(geometry.page_height);

    let mut page_ids = Vec::with_capacity(placements.len());
    for placement in placements {
        let page_id = alloc();
        let content_id = alloc();
        page_ids.push(page_id);

        let content = page_content(placement, geometry, options.clip_margins);
        pdf.stream(content_id, &content);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(IMAGE_NAME, image_id);
        page.finish();
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    pdf.finish()
}

/// The image transform for one page: `[w 0 0 h x y]` in points, y flipped.
fn image_transform(placement: &PagePlacement, geometry: &PageGeometry) -> [f32; 6] {
    let width = mm_to_pt(placement.draw_width);
    let height = mm_to_pt(placement.draw_height);
    let x = mm_to_pt(placement.draw_x);
    let y = mm_to_pt(geometry.page_height - placement.draw_y - placement.draw_height);
    [width, 0.0, 0.0, height, x, y]
}

fn page_content(placement: &PagePlacement, geometry: &PageGeometry, clip: bool) -> Vec<u8> {
    let mut content = Content::new();
    content.save_state();

    if clip {
        content
            .rect(
                mm_to_pt(geometry.margin_left),
                mm_to_pt(geometry.margin_bottom),
                mm_to_pt(geometry.content_width()),
                mm_to_pt(geometry.content_height()),
            )
            .clip_nonzero()
            .end_path();
    }

    content.transform(image_transform(placement, geometry));
    content.x_object(IMAGE_NAME);
    content.restore_state();
    content.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::pagination::paginate;

    fn raster(width: u32, height: u32) -> RasterImage {
        RasterImage {
            width,
            height,
            rgb: vec![255; (width * height * 3) as usize],
        }
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn a4_is_595_by_842_points() {
        assert!((mm_to_pt(210.0) - 595.2756).abs() < 1e-3);
        assert!((mm_to_pt(297.0) - 841.8898).abs() < 1e-3);
    }

    #[test]
    fn first_page_image_sits_below_top_margin() {
        let geometry = PageGeometry::a4();
        let placements = paginate(2000, 3000, &geometry).unwrap();

        let [w, _, _, h, x, y] = image_transform(&placements[0], &geometry);
        assert!((w - mm_to_pt(190.0)).abs() < 1e-2);
        assert!((h - mm_to_pt(285.0)).abs() < 1e-2);
        assert!((x - mm_to_pt(10.0)).abs() < 1e-2);
        // top of the image is 10mm below the top of the page
        assert!((y + h - mm_to_pt(287.0)).abs() < 1e-2);

        // second page is shifted up by one content height
        let [_, _, _, _, _, y2] = image_transform(&placements[1], &geometry);
        assert!((y2 - y - mm_to_pt(277.0)).abs() < 1e-2);
    }

    #[test]
    fn writes_one_page_per_placement_and_one_image() {
        let geometry = PageGeometry::a4();
        let placements = paginate(20, 30, &geometry).unwrap();
        assert_eq!(placements.len(), 2);

        let bytes = write_pdf(
            &raster(20, 30),
            &placements,
            &geometry,
            &PdfOptions {
                title: Some("Jane Doe".to_string()),
                clip_margins: false,
            },
        );
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, b"/Type /Page\n"), 2);
        assert_eq!(count(&bytes, b"/Subtype /Image"), 1);
        assert_eq!(count(&bytes, b"/Count 2"), 1);
        assert_eq!(count(&bytes, b"/FlateDecode"), 1);
    }

    #[test]
    fn clipping_adds_a_clip_path() {
        let geometry = PageGeometry::a4();
        let placements = paginate(10, 10, &geometry).unwrap();
        let clipped = page_content(&placements[0], &geometry, true);
        let plain = page_content(&placements[0], &geometry, false);
        assert_eq!(count(&clipped, b"W\nn\n"), 1);
        assert_eq!(count(&plain, b"W\nn\n"), 0);
    }
}
