//! Per-panel pan/zoom transform between image pixels and canvas pixels.
//!
//! `canvas = image * scale + translate`. Scale is always finite and positive;
//! translation is unbounded.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::WHEEL_ZOOM_FACTOR;
use crate::error::{MatchViewError, Result};
use crate::geometry::{Point2, Rect, Size2};

/// Optional clamp on the viewport scale. Unset means unbounded zoom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive wheel deltas (scrolling up / away from the user) zoom in.
    pub fn from_wheel_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(ZoomDirection::In)
        } else if delta < 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            ZoomDirection::In => WHEEL_ZOOM_FACTOR,
            ZoomDirection::Out => 1.0 / WHEEL_ZOOM_FACTOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportTransform {
    scale: f64,
    translate: Point2,
    dragging: bool,
    last_pointer: Option<Point2>,
    limits: Option<ZoomLimits>,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Point2::ZERO,
            dragging: false,
            last_pointer: None,
            limits: None,
        }
    }
}

impl ViewportTransform {
    pub fn new(scale: f64, translate: Point2) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) || !translate.is_finite() {
            return Err(MatchViewError::InvalidGeometry(format!(
                "scale {scale} / translate ({}, {})",
                translate.x, translate.y
            )));
        }
        Ok(Self {
            scale,
            translate,
            ..Self::default()
        })
    }

    pub fn with_limits(mut self, limits: Option<ZoomLimits>) -> Self {
        self.set_limits(limits);
        self
    }

    /// Invalid limits are ignored.
    pub fn set_limits(&mut self, limits: Option<ZoomLimits>) {
        self.limits = limits.filter(ZoomLimits::is_valid);
        if let Some(l) = self.limits {
            self.scale = l.clamp(self.scale);
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Point2 {
        self.translate
    }

    pub fn image_to_canvas(&self, p: Point2) -> Point2 {
        p * self.scale + self.translate
    }

    pub fn canvas_to_image(&self, p: Point2) -> Point2 {
        (p - self.translate) * (1.0 / self.scale)
    }

    /// Canvas-space rectangle covered by an image of `image_size` pixels.
    pub fn image_rect(&self, image_size: Size2) -> Rect {
        Rect::new(
            self.translate,
            Size2::new(
                image_size.width * self.scale,
                image_size.height * self.scale,
            ),
        )
    }

    /// Uniform "fit" scale with the scaled image centred on the canvas.
    pub fn fit_to_canvas(&mut self, image_size: Size2, canvas_size: Size2) -> Result<()> {
        if !image_size.is_valid() || !canvas_size.is_valid() {
            return Err(MatchViewError::InvalidGeometry(format!(
                "cannot fit {}x{} image into {}x{} canvas",
                image_size.width, image_size.height, canvas_size.width, canvas_size.height
            )));
        }

        let fit = (canvas_size.width / image_size.width).min(canvas_size.height / image_size.height);
        let scale = match self.limits {
            Some(l) => l.clamp(fit),
            None => fit,
        };
        self.scale = scale;
        self.translate = Point2::new(
            (canvas_size.width - image_size.width * scale) / 2.0,
            (canvas_size.height - image_size.height * scale) / 2.0,
        );
        Ok(())
    }

    /// One wheel notch of zoom keeping the point under `cursor` fixed.
    pub fn zoom_at(&mut self, cursor: Point2, direction: ZoomDirection) -> bool {
        self.zoom_by(cursor, direction.factor())
    }

    /// Multiply the scale by `factor` around `cursor`. Returns false and leaves
    /// the transform untouched if the result would not be a finite positive scale.
    pub fn zoom_by(&mut self, cursor: Point2, factor: f64) -> bool {
        if !cursor.is_finite() {
            return false;
        }
        let mut new_scale = self.scale * factor;
        if let Some(l) = self.limits {
            new_scale = l.clamp(new_scale);
        }
        if !(new_scale.is_finite() && new_scale > 0.0) {
            debug!(scale = self.scale, factor, "zoom rejected");
            return false;
        }

        let ratio = new_scale / self.scale;
        let translate = cursor - (cursor - self.translate) * ratio;
        if !translate.is_finite() {
            return false;
        }
        self.scale = new_scale;
        self.translate = translate;
        true
    }

    pub fn pan(&mut self, delta: Point2) {
        if delta.is_finite() {
            self.translate += delta;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self, pointer: Point2) {
        self.dragging = true;
        self.last_pointer = Some(pointer);
    }

    /// Pan by the pointer movement since the last drag event. Returns whether
    /// the transform changed.
    pub fn drag_to(&mut self, pointer: Point2) -> bool {
        if !self.dragging {
            return false;
        }
        let moved = match self.last_pointer {
            Some(last) => {
                let delta = pointer - last;
                self.pan(delta);
                delta != Point2::ZERO
            }
            None => false,
        };
        self.last_pointer = Some(pointer);
        moved
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.last_pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_mapping() {
        let vt = ViewportTransform::new(2.5, Point2::new(-10.0, 4.0)).unwrap();
        let p = Point2::new(13.0, 7.5);
        let back = vt.canvas_to_image(vt.image_to_canvas(p));
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_fit() {
        let mut vt = ViewportTransform::default();
        assert!(vt.fit_to_canvas(Size2::new(0.0, 10.0), Size2::new(100.0, 100.0)).is_err());
        assert_eq!(vt.scale(), 1.0);
    }

    #[test]
    fn drag_only_pans_while_dragging() {
        let mut vt = ViewportTransform::default();
        assert!(!vt.drag_to(Point2::new(5.0, 5.0)));
        vt.begin_drag(Point2::new(10.0, 10.0));
        assert!(vt.drag_to(Point2::new(15.0, 7.0)));
        assert_eq!(vt.translate(), Point2::new(5.0, -3.0));
        vt.end_drag();
        assert!(!vt.drag_to(Point2::new(100.0, 100.0)));
        assert_eq!(vt.translate(), Point2::new(5.0, -3.0));
    }

    #[test]
    fn limits_clamp_zoom() {
        let mut vt = ViewportTransform::default().with_limits(Some(ZoomLimits { min: 0.5, max: 1.2 }));
        assert!(vt.zoom_by(Point2::ZERO, 10.0));
        assert_eq!(vt.scale(), 1.2);
    }
}
