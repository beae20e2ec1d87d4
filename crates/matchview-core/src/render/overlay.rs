use crate::color::class_color;
use crate::matches::MatchSet;

use super::{DisplayFlags, PanelView, Segment};

/// Correspondence lines between the two panels in overlay space.
///
/// Nothing is drawn unless lines are enabled, both panels are loaded and at
/// least one match exists. A line is dropped when either endpoint falls
/// outside its own panel's canvas.
pub fn render_overlay(
    a: &PanelView<'_>,
    b: &PanelView<'_>,
    matches: &MatchSet,
    flags: &DisplayFlags,
) -> Vec<Segment> {
    if !flags.show_lines || matches.is_empty() {
        return Vec::new();
    }
    let (Some((image_a, _)), Some((image_b, _))) = (a.loaded(), b.loaded()) else {
        return Vec::new();
    };

    matches
        .iter()
        .filter_map(|m| {
            let pa = a.viewport.image_to_canvas(image_a.point(m.index_a)?);
            let pb = b.viewport.image_to_canvas(image_b.point(m.index_b)?);
            if !a.canvas.contains(pa) || !b.canvas.contains(pb) {
                return None;
            }
            Some(Segment {
                index_a: m.index_a,
                index_b: m.index_b,
                from: pa + a.origin,
                to: pb + b.origin,
                class: m.class,
                color: class_color(m.class),
            })
        })
        .collect()
}
