//! Software rendering of a [`Scene`] into an RGBA image, for headless export.

use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::color::Rgba;
use crate::consts::LINE_WIDTH;
use crate::error::{MatchViewError, Result};
use crate::geometry::Point2;
use crate::model::Panel;
use crate::pixels::DecodedImage;
use crate::render::{PanelFrame, Scene};

pub const BACKGROUND: Rgba = Rgba::new(30, 30, 30, 255);

/// Paint both panels (image, then markers, clipped to each canvas) and then
/// the correspondence lines across the whole overlay.
///
/// `pixels` holds the decoded images of panel A and panel B.
pub fn rasterize(scene: &Scene, pixels: [Option<&DecodedImage>; 2]) -> Result<RgbaImage> {
    let size = scene.overlay_size();
    let width = size.width.ceil().max(1.0) as u32;
    let height = size.height.ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        MatchViewError::InvalidGeometry(format!("cannot allocate {width}x{height} pixmap"))
    })?;
    pixmap.fill(tiny_skia::Color::from_rgba8(
        BACKGROUND.r,
        BACKGROUND.g,
        BACKGROUND.b,
        BACKGROUND.a,
    ));

    for (panel, image) in Panel::BOTH.into_iter().zip(pixels) {
        draw_panel(&mut pixmap, scene.panel(panel), scene.origin(panel), image)?;
    }

    let stroke = Stroke {
        width: LINE_WIDTH as f32,
        ..Stroke::default()
    };
    for segment in &scene.lines {
        let mut pb = PathBuilder::new();
        pb.move_to(segment.from.x as f32, segment.from.y as f32);
        pb.line_to(segment.to.x as f32, segment.to.y as f32);
        let Some(path) = pb.finish() else {
            continue;
        };
        pixmap.stroke_path(&path, &paint(segment.color), &stroke, Transform::identity(), None);
    }

    to_rgba_image(&pixmap)
}

fn draw_panel(
    pixmap: &mut Pixmap,
    frame: &PanelFrame,
    origin: Point2,
    image: Option<&DecodedImage>,
) -> Result<()> {
    if !frame.canvas.is_valid() {
        return Ok(());
    }
    let Some(mask) = panel_mask(pixmap, origin, frame) else {
        return Ok(());
    };

    if let (Some(quad), Some(image)) = (&frame.image, image) {
        let source = to_pixmap(image)?;
        let sx = quad.rect.size.width / image.width() as f64;
        let sy = quad.rect.size.height / image.height() as f64;
        let transform = Transform::from_row(
            sx as f32,
            0.0,
            0.0,
            sy as f32,
            (origin.x + quad.rect.min.x) as f32,
            (origin.y + quad.rect.min.y) as f32,
        );
        let pixmap_paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, source.as_ref(), &pixmap_paint, transform, Some(&mask));
    }

    for marker in &frame.markers {
        let center = marker.center + origin;
        let Some(path) =
            PathBuilder::from_circle(center.x as f32, center.y as f32, marker.radius as f32)
        else {
            continue;
        };
        pixmap.fill_path(
            &path,
            &paint(marker.color),
            FillRule::Winding,
            Transform::identity(),
            Some(&mask),
        );
    }
    Ok(())
}

fn panel_mask(pixmap: &Pixmap, origin: Point2, frame: &PanelFrame) -> Option<Mask> {
    let rect = tiny_skia::Rect::from_xywh(
        origin.x as f32,
        origin.y as f32,
        frame.canvas.width as f32,
        frame.canvas.height as f32,
    )?;
    let path = PathBuilder::from_rect(rect);
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
    mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
    Some(mask)
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn to_pixmap(image: &DecodedImage) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        MatchViewError::InvalidGeometry(format!(
            "cannot allocate {}x{} pixmap",
            image.width(),
            image.height()
        ))
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

fn to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| MatchViewError::InvalidGeometry("pixmap size mismatch".to_string()))
}
