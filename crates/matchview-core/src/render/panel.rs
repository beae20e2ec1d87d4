use crate::color::{palette_color, Rgba};
use crate::matches::DerivedMatchIndices;
use crate::model::Panel;

use super::{DisplayFlags, ImageQuad, Marker, PanelFrame, PanelView};

/// Render one image panel: the image under its viewport transform, then the
/// filtered, colour-coded feature markers.
///
/// A panel without image data or decoded pixels renders blank.
pub fn render_panel(
    panel: Panel,
    view: &PanelView<'_>,
    flags: &DisplayFlags,
    derived: &DerivedMatchIndices,
) -> PanelFrame {
    let Some((image, pixel_size)) = view.loaded() else {
        return PanelFrame::blank(panel, view.canvas);
    };

    let mut frame = PanelFrame::blank(panel, view.canvas);
    frame.image = Some(ImageQuad {
        name: image.name.clone(),
        rect: view.viewport.image_rect(pixel_size),
    });

    if !flags.show_markers {
        return frame;
    }

    let scale = view.viewport.scale();
    let image_radius = flags.marker_size / scale;
    let matched = derived.matched(panel);

    frame.markers = image
        .points
        .iter()
        .enumerate()
        .filter(|(index, _)| !flags.only_matched || matched.contains(index))
        .map(|(index, point)| Marker {
            index,
            center: view.viewport.image_to_canvas(point.position),
            image_radius,
            radius: image_radius * scale,
            color: marker_color(panel, index, derived),
        })
        .collect();

    frame
}

/// Panel A uses the index palette. A matched panel B point borrows the colour
/// of its panel A counterpart so correspondences can be traced by eye.
pub fn marker_color(panel: Panel, index: usize, derived: &DerivedMatchIndices) -> Rgba {
    match panel {
        Panel::A => palette_color(index),
        Panel::B => match derived.b_to_a.get(&index) {
            Some(&a_index) => palette_color(a_index),
            None => palette_color(index),
        },
    }
}
