//! Picture compositing tests for gridpage
//!
//! End-to-end tests over render_canvas: a decodable image lands at the
//! anchor-resolved rect, a broken one is skipped and reported, and the
//! grid underneath keeps rendering either way.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::io::Cursor;

use gridpage::render::{render_canvas, Rgba};
use gridpage::{
    AnchorPoint, Cell, FontStore, GridDocument, Picture, PictureAnchor, RenderConfig, StyleTable,
};

/// Solid-color PNG built in memory.
fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn render(doc: &GridDocument) -> (gridpage::render::Canvas, gridpage::RenderReport) {
    render_canvas(
        doc,
        &StyleTable::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap()
}

#[test]
fn fixed_scale_picture_is_drawn_at_its_anchor() {
    let mut doc = GridDocument::new(5, 5);
    // Anchor at cell (1, 1): x = 64, y = 20, plus a 10px offset each way
    doc.add_picture(Picture::new(
        solid_png(20, 10, [0, 0, 255, 255]),
        PictureAnchor::FixedScale {
            from: AnchorPoint::new(1, 1, 10.0, 10.0),
            scale: 2.0,
        },
    ));

    let (canvas, report) = render(&doc);
    assert_eq!(report.pictures.len(), 1);
    assert!(report.pictures[0].ok);

    // Native 20x10 at scale 2 gives a 40x20 rect at (74, 30)
    assert_eq!(canvas.pixel(75, 31), Some(Rgba::opaque(0, 0, 255)));
    assert_eq!(canvas.pixel(112, 48), Some(Rgba::opaque(0, 0, 255)));
    // Just outside the rect stays white
    assert_eq!(canvas.pixel(73, 29), Some(Rgba::WHITE));
    assert_eq!(canvas.pixel(120, 55), Some(Rgba::WHITE));
}

#[test]
fn stretch_to_box_fills_the_corner_span() {
    let mut doc = GridDocument::new(4, 4);
    doc.add_picture(Picture::new(
        solid_png(4, 4, [255, 0, 0, 255]),
        PictureAnchor::StretchToBox {
            from: AnchorPoint::new(0, 0, 0.0, 0.0),
            to: AnchorPoint::new(2, 2, 0.0, 0.0),
        },
    ));

    let (canvas, report) = render(&doc);
    assert!(report.pictures[0].ok);
    // Box spans (0,0)..(128,40); sample well inside
    assert_eq!(canvas.pixel(64, 20), Some(Rgba::opaque(255, 0, 0)));
    assert_eq!(canvas.pixel(2, 2), Some(Rgba::opaque(255, 0, 0)));
    assert_eq!(canvas.pixel(130, 42), Some(Rgba::WHITE));
}

#[test]
fn undecodable_picture_is_skipped_and_reported() {
    let mut doc = GridDocument::new(3, 3);
    doc.set_cell(0, 0, Cell::text("still here")).unwrap();
    doc.add_picture(Picture::new(
        vec![0xDE, 0xAD, 0xBE, 0xEF],
        PictureAnchor::FixedScale {
            from: AnchorPoint::new(0, 0, 0.0, 0.0),
            scale: 1.0,
        },
    ));

    let (_, report) = render(&doc);
    assert_eq!(report.pictures.len(), 1);
    assert!(!report.pictures[0].ok);
    assert!(report.pictures[0].note.is_some());
    assert!(!report.is_clean());
    // The grid itself still painted
    assert_eq!(report.cells.len(), 1);
    assert!(report.cells[0].ok);
}

#[test]
fn one_bad_picture_does_not_block_the_next() {
    let mut doc = GridDocument::new(4, 4);
    doc.add_picture(Picture::new(
        vec![1, 2, 3],
        PictureAnchor::FixedScale {
            from: AnchorPoint::new(0, 0, 0.0, 0.0),
            scale: 1.0,
        },
    ));
    doc.add_picture(Picture::new(
        solid_png(8, 8, [0, 255, 0, 255]),
        PictureAnchor::FixedScale {
            from: AnchorPoint::new(1, 0, 0.0, 0.0),
            scale: 1.0,
        },
    ));

    let (canvas, report) = render(&doc);
    assert_eq!(report.pictures.len(), 2);
    assert!(!report.pictures[0].ok);
    assert!(report.pictures[1].ok);
    assert_eq!(canvas.pixel(3, 23), Some(Rgba::opaque(0, 255, 0)));
}

#[test]
fn pictures_draw_over_cell_content() {
    let mut doc = GridDocument::new(2, 2);
    doc.set_cell(0, 0, Cell::text("covered")).unwrap();
    doc.add_picture(Picture::new(
        solid_png(16, 16, [255, 0, 255, 255]),
        PictureAnchor::FixedScale {
            from: AnchorPoint::new(0, 0, 2.0, 2.0),
            scale: 1.0,
        },
    ));

    let (canvas, _) = render(&doc);
    assert_eq!(canvas.pixel(8, 8), Some(Rgba::opaque(255, 0, 255)));
}
