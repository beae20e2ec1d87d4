use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point2, Size2};

/// Backend image identifier.
pub type ImageId = u32;

/// One of the two side-by-side image panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    A,
    B,
}

impl Panel {
    pub const BOTH: [Panel; 2] = [Panel::A, Panel::B];
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::A => write!(f, "Image A"),
            Panel::B => write!(f, "Image B"),
        }
    }
}

/// An image as listed by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub id: ImageId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A 2D feature point in the native pixel space of its image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeaturePoint {
    pub position: Point2,
    /// Id of the triangulated 3D point, if any.
    pub point3d_id: Option<u64>,
}

impl FeaturePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            point3d_id: None,
        }
    }
}

/// A single image with its feature points. Immutable once fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub id: ImageId,
    pub name: String,
    /// Native size as reported by the backend (the decoded pixels are authoritative).
    pub reported_size: Option<Size2>,
    pub points: Vec<FeaturePoint>,
}

impl ImageData {
    pub fn point(&self, index: usize) -> Option<Point2> {
        self.points.get(index).map(|p| p.position)
    }

    pub fn triangulated_count(&self) -> usize {
        self.points.iter().filter(|p| p.point3d_id.is_some()).count()
    }
}

/// Geometric verification class of a correspondence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchClass {
    Inlier,
    Outlier,
}

impl MatchClass {
    pub const ALL: [MatchClass; 2] = [MatchClass::Inlier, MatchClass::Outlier];

    /// Value of the `match_type` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            MatchClass::Inlier => "inlier",
            MatchClass::Outlier => "outlier",
        }
    }
}

impl fmt::Display for MatchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchClass::Inlier => write!(f, "Inlier"),
            MatchClass::Outlier => write!(f, "Outlier"),
        }
    }
}

/// A correspondence between point `index_a` of image A and point `index_b` of image B.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub index_a: usize,
    pub index_b: usize,
    pub class: MatchClass,
}

impl Match {
    pub fn new(index_a: usize, index_b: usize, class: MatchClass) -> Self {
        Self {
            index_a,
            index_b,
            class,
        }
    }
}

/// Which match classes the user asked to see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClassFilter {
    pub inliers: bool,
    pub outliers: bool,
}

impl Default for MatchClassFilter {
    fn default() -> Self {
        Self {
            inliers: true,
            outliers: false,
        }
    }
}

impl MatchClassFilter {
    pub fn contains(&self, class: MatchClass) -> bool {
        match class {
            MatchClass::Inlier => self.inliers,
            MatchClass::Outlier => self.outliers,
        }
    }

    pub fn set(&mut self, class: MatchClass, enabled: bool) {
        match class {
            MatchClass::Inlier => self.inliers = enabled,
            MatchClass::Outlier => self.outliers = enabled,
        }
    }

    pub fn active(&self) -> Vec<MatchClass> {
        MatchClass::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }
}

/// Aggregate match statistics and two-view geometry for an image pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_matches: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlier_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlier_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_view_geometry_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_view_configuration: Option<String>,
}
