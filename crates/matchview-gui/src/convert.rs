use matchview_core::color::Rgba;
use matchview_core::geometry::Point2;
use matchview_core::pixels::DecodedImage;

pub fn decoded_to_color_image(image: &DecodedImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.rgba.as_raw())
}

pub fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Canvas-space point to screen position, given the canvas's top-left corner.
pub fn to_screen(origin: egui::Pos2, p: Point2) -> egui::Pos2 {
    origin + egui::vec2(p.x as f32, p.y as f32)
}

pub fn to_canvas(origin: egui::Pos2, pos: egui::Pos2) -> Point2 {
    let d = pos - origin;
    Point2::new(d.x as f64, d.y as f64)
}
