//! Headless renderers. They read immutable snapshots of viewer state and
//! produce draw lists in canvas / overlay pixel space; hosts paint them.

pub mod overlay;
pub mod panel;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::consts::DEFAULT_MARKER_SIZE;
use crate::geometry::{Point2, Rect, Size2};
use crate::model::{ImageData, MatchClass, Panel};
use crate::viewport::ViewportTransform;

pub use overlay::render_overlay;
pub use panel::render_panel;

/// Global display toggles shared by both panels and the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayFlags {
    pub show_markers: bool,
    pub show_lines: bool,
    pub only_matched: bool,
    /// On-screen marker radius in canvas pixels.
    pub marker_size: f64,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_markers: true,
            show_lines: false,
            only_matched: false,
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

/// Read-only view of one panel at render time.
#[derive(Clone, Copy, Debug)]
pub struct PanelView<'a> {
    pub image: Option<&'a ImageData>,
    /// Decoded pixel size; `None` until the image has loaded.
    pub pixel_size: Option<Size2>,
    pub viewport: &'a ViewportTransform,
    pub canvas: Size2,
    /// Top-left corner of this panel's canvas in overlay space.
    pub origin: Point2,
}

impl PanelView<'_> {
    /// The image and its pixel size, once both are known.
    pub fn loaded(&self) -> Option<(&ImageData, Size2)> {
        match (self.image, self.pixel_size) {
            (Some(image), Some(size)) if size.is_valid() => Some((image, size)),
            _ => None,
        }
    }
}

/// Where the image lands on the panel canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageQuad {
    pub name: String,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub index: usize,
    /// Centre in canvas pixels.
    pub center: Point2,
    /// Radius in image pixels (`marker_size / scale`).
    pub image_radius: f64,
    /// Radius in canvas pixels.
    pub radius: f64,
    pub color: Rgba,
}

/// Everything one panel paints, in its own canvas space.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelFrame {
    pub panel: Panel,
    pub canvas: Size2,
    pub image: Option<ImageQuad>,
    pub markers: Vec<Marker>,
}

impl PanelFrame {
    pub fn blank(panel: Panel, canvas: Size2) -> Self {
        Self {
            panel,
            canvas,
            image: None,
            markers: Vec::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.image.is_none() && self.markers.is_empty()
    }

    pub fn marker(&self, index: usize) -> Option<&Marker> {
        self.markers.iter().find(|m| m.index == index)
    }
}

/// A correspondence line in overlay space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub index_a: usize,
    pub index_b: usize,
    pub from: Point2,
    pub to: Point2,
    pub class: MatchClass,
    pub color: Rgba,
}

/// One full repaint: both panels and the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub a: PanelFrame,
    pub b: PanelFrame,
    /// Overlay-space origin of each panel canvas, A then B.
    pub origins: [Point2; 2],
    pub lines: Vec<Segment>,
}

impl Scene {
    pub fn panel(&self, panel: Panel) -> &PanelFrame {
        match panel {
            Panel::A => &self.a,
            Panel::B => &self.b,
        }
    }

    pub fn origin(&self, panel: Panel) -> Point2 {
        match panel {
            Panel::A => self.origins[0],
            Panel::B => self.origins[1],
        }
    }

    /// Bounding size of the overlay covering both panels.
    pub fn overlay_size(&self) -> Size2 {
        let width = (self.origins[0].x + self.a.canvas.width).max(self.origins[1].x + self.b.canvas.width);
        let height =
            (self.origins[0].y + self.a.canvas.height).max(self.origins[1].y + self.b.canvas.height);
        Size2::new(width, height)
    }
}
