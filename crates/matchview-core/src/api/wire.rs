//! JSON payloads as served by the reconstruction backend.

use serde::Deserialize;

use crate::geometry::Size2;
use crate::model::{FeaturePoint, ImageData, ImageId, Match, MatchClass};

#[derive(Debug, Deserialize)]
pub struct WirePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, rename = "point3D_id")]
    pub point3d_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct WireImageData {
    #[serde(default)]
    pub id: Option<ImageId>,
    pub name: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(rename = "points2D")]
    pub points2d: Vec<WirePoint>,
}

impl WireImageData {
    /// `requested` is used when the payload omits its own id.
    pub fn into_image(self, requested: ImageId) -> ImageData {
        let reported_size = match (self.width, self.height) {
            (Some(w), Some(h)) => Some(Size2::new(w as f64, h as f64)),
            _ => None,
        };
        ImageData {
            id: self.id.unwrap_or(requested),
            name: self.name,
            reported_size,
            points: self
                .points2d
                .into_iter()
                .map(|p| FeaturePoint {
                    position: crate::geometry::Point2::new(p.x, p.y),
                    point3d_id: p.point3d_id,
                })
                .collect(),
        }
    }
}

/// `[index_in_image1, index_in_image2]` pairs.
pub type WireMatches = Vec<(usize, usize)>;

pub fn tag_matches(pairs: WireMatches, class: MatchClass) -> Vec<Match> {
    pairs
        .into_iter()
        .map(|(a, b)| Match::new(a, b, class))
        .collect()
}
