mod common;

use common::{FakeApi, FakeSource};
use matchview_core::controller::MatchViewController;
use matchview_core::geometry::{Point2, Size2};
use matchview_core::model::{MatchClass, Panel};
use matchview_core::raster::{rasterize, BACKGROUND};

fn rendered(show_lines: bool) -> (MatchViewController, image::RgbaImage) {
    let mut source = FakeSource::with_images(2, Size2::new(100.0, 100.0), 10);
    source.add_matches(1, 2, MatchClass::Inlier, &[(0, 9)]);
    let api = FakeApi::single(source);

    let mut c = MatchViewController::default();
    c.layout_panel(Panel::A, Point2::ZERO, Size2::new(100.0, 100.0));
    c.layout_panel(Panel::B, Point2::new(100.0, 0.0), Size2::new(100.0, 100.0));
    c.start();
    c.run_until_idle(&api);
    c.select_a(Some(1));
    c.run_until_idle(&api);
    c.select_b(Some(2));
    c.run_until_idle(&api);
    if show_lines {
        c.set_show_lines(true).unwrap();
        c.run_until_idle(&api);
    }

    let scene = c.scene();
    let a = c.pixels(Panel::A).map(|p| p.image.clone());
    let b = c.pixels(Panel::B).map(|p| p.image.clone());
    let img = rasterize(&scene, [a.as_deref(), b.as_deref()]).unwrap();
    (c, img)
}

#[test]
fn test_raster_covers_both_panels() {
    let (_, img) = rendered(false);
    assert_eq!(img.dimensions(), (200, 100));
}

#[test]
fn test_raster_draws_image_pixels() {
    let (_, img) = rendered(false);
    // Away from any marker the panel shows the served image colour.
    let p = img.get_pixel(90, 10).0;
    let expected = [200u8, 180, 160, 255];
    for (got, want) in p.iter().zip(expected) {
        assert!(got.abs_diff(want) <= 2, "got {p:?}");
    }
}

#[test]
fn test_raster_draws_markers_over_image() {
    let (c, img) = rendered(false);
    let scene = c.scene();
    let marker = scene.a.marker(4).unwrap();
    let p = img
        .get_pixel(marker.center.x as u32, marker.center.y as u32)
        .0;
    assert_ne!(p, [200, 180, 160, 255]);
    assert_ne!(p, [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 255]);
}

#[test]
fn test_raster_draws_green_inlier_line() {
    let (c, img) = rendered(true);
    let scene = c.scene();
    assert_eq!(scene.lines.len(), 1);
    let line = scene.lines[0];
    // Midpoint of A point 0 (5, 5) and B point 9 (195, 95), clear of markers.
    let mid = Point2::new((line.from.x + line.to.x) / 2.0, (line.from.y + line.to.y) / 2.0);
    let p = img.get_pixel(mid.x.round() as u32, mid.y.round() as u32).0;
    assert!(p[1] > p[0], "expected green tint, got {p:?}");
}

#[test]
fn test_raster_blank_scene_is_background() {
    let mut c = MatchViewController::default();
    c.layout_panel(Panel::A, Point2::ZERO, Size2::new(20.0, 10.0));
    c.layout_panel(Panel::B, Point2::new(20.0, 0.0), Size2::new(20.0, 10.0));
    let img = rasterize(&c.scene(), [None, None]).unwrap();
    assert_eq!(img.dimensions(), (40, 10));
    assert!(img
        .pixels()
        .all(|p| p.0 == [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 255]));
}
