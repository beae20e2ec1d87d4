#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use matchview_core::api::ReconstructionApi;
use matchview_core::error::{MatchViewError, Result};
use matchview_core::geometry::Size2;
use matchview_core::model::{
    FeaturePoint, ImageData, ImageEntry, ImageId, Match, MatchClass, MatchSummary,
};

/// Encode a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 180, 160, 255]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

/// An image with `n` points laid out on a diagonal: point i at (10i + 5, 10i + 5).
pub fn diagonal_image(id: ImageId, name: &str, n: usize) -> ImageData {
    ImageData {
        id,
        name: name.to_string(),
        reported_size: None,
        points: (0..n)
            .map(|i| FeaturePoint::new(10.0 * i as f64 + 5.0, 10.0 * i as f64 + 5.0))
            .collect(),
    }
}

#[derive(Clone, Default)]
pub struct FakeSource {
    pub images: Vec<(ImageData, Size2)>,
    pub matches: HashMap<(ImageId, ImageId), Vec<Match>>,
    pub summaries: HashMap<(ImageId, ImageId), MatchSummary>,
}

impl FakeSource {
    /// Images 1..=count, each `size` pixels with `points` diagonal features.
    pub fn with_images(count: u32, size: Size2, points: usize) -> Self {
        let images = (1..=count)
            .map(|id| (diagonal_image(id, &format!("img_{id}.png"), points), size))
            .collect();
        Self {
            images,
            ..Self::default()
        }
    }

    pub fn add_matches(&mut self, a: ImageId, b: ImageId, class: MatchClass, pairs: &[(usize, usize)]) {
        let list = self.matches.entry((a, b)).or_default();
        list.extend(pairs.iter().map(|&(ia, ib)| Match::new(ia, ib, class)));
    }

    fn pair_matches(&self, a: ImageId, b: ImageId) -> Vec<Match> {
        if let Some(list) = self.matches.get(&(a, b)) {
            return list.clone();
        }
        self.matches
            .get(&(b, a))
            .map(|list| {
                list.iter()
                    .map(|m| Match::new(m.index_b, m.index_a, m.class))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// In-memory backend with switchable sources, failure injection and a call log.
pub struct FakeApi {
    pub sources: Vec<(String, FakeSource)>,
    pub active: Cell<usize>,
    pub fail_matches: Cell<bool>,
    pub fail_summary: Cell<bool>,
    pub fail_images: Cell<bool>,
    pub fail_set_source: Cell<bool>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn single(source: FakeSource) -> Self {
        Self::multi(vec![("SfM Model".to_string(), source)])
    }

    pub fn multi(sources: Vec<(String, FakeSource)>) -> Self {
        Self {
            sources,
            active: Cell::new(0),
            fail_matches: Cell::new(false),
            fail_summary: Cell::new(false),
            fail_images: Cell::new(false),
            fail_set_source: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn source(&self) -> &FakeSource {
        &self.sources[self.active.get()].1
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn unavailable(&self, path: &str) -> MatchViewError {
        MatchViewError::Status {
            url: path.to_string(),
            code: 500,
        }
    }
}

impl ReconstructionApi for FakeApi {
    fn sources(&self) -> Result<Vec<String>> {
        self.log("sources".into());
        Ok(self.sources.iter().map(|(n, _)| n.clone()).collect())
    }

    fn set_source(&self, name: &str) -> Result<()> {
        self.log(format!("set_source {name}"));
        if self.fail_set_source.get() {
            return Err(self.unavailable("/api/set_source"));
        }
        let index = self
            .sources
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| MatchViewError::UnknownSource(name.to_string()))?;
        self.active.set(index);
        Ok(())
    }

    fn images(&self) -> Result<Vec<ImageEntry>> {
        self.log("images".into());
        if self.fail_images.get() {
            return Err(self.unavailable("/api/images"));
        }
        Ok(self
            .source()
            .images
            .iter()
            .map(|(d, _)| ImageEntry {
                id: d.id,
                name: d.name.clone(),
                width: None,
                height: None,
            })
            .collect())
    }

    fn image_data(&self, id: ImageId) -> Result<ImageData> {
        self.log(format!("image_data {id}"));
        self.source()
            .images
            .iter()
            .find(|(d, _)| d.id == id)
            .map(|(d, _)| d.clone())
            .ok_or_else(|| MatchViewError::Status {
                url: format!("/api/image_data/{id}"),
                code: 404,
            })
    }

    fn matches_for_image(&self, id: ImageId) -> Result<Vec<ImageId>> {
        self.log(format!("matches_for_image {id}"));
        let source = self.source();
        Ok(source
            .images
            .iter()
            .map(|(d, _)| d.id)
            .filter(|&other| other != id && !source.pair_matches(id, other).is_empty())
            .collect())
    }

    fn matches(
        &self,
        id1: ImageId,
        id2: ImageId,
        class: Option<MatchClass>,
    ) -> Result<Vec<(usize, usize)>> {
        let label = class.map_or("all", |c| c.as_query());
        self.log(format!("matches {id1} {id2} {label}"));
        if self.fail_matches.get() {
            return Err(self.unavailable("/api/matches"));
        }
        Ok(self
            .source()
            .pair_matches(id1, id2)
            .into_iter()
            .filter(|m| class.map_or(true, |c| m.class == c))
            .map(|m| (m.index_a, m.index_b))
            .collect())
    }

    fn match_summary(&self, id1: ImageId, id2: ImageId) -> Result<MatchSummary> {
        self.log(format!("match_summary {id1} {id2}"));
        if self.fail_summary.get() {
            return Err(self.unavailable("/api/match_summary"));
        }
        let source = self.source();
        if let Some(summary) = source.summaries.get(&(id1, id2)) {
            return Ok(summary.clone());
        }
        let all = source.pair_matches(id1, id2);
        let inliers = all.iter().filter(|m| m.class == MatchClass::Inlier).count() as u64;
        Ok(MatchSummary {
            available: true,
            reason: None,
            total_matches: Some(all.len() as u64),
            inlier_count: Some(inliers),
            outlier_count: Some(all.len() as u64 - inliers),
            two_view_geometry_available: Some(true),
            two_view_configuration: Some("CALIBRATED".to_string()),
        })
    }

    fn image_bytes(&self, name: &str) -> Result<Vec<u8>> {
        self.log(format!("image_bytes {name}"));
        let (_, size) = self
            .source()
            .images
            .iter()
            .find(|(d, _)| d.name == name)
            .ok_or_else(|| MatchViewError::Status {
                url: format!("/serve_image/{name}"),
                code: 404,
            })?;
        Ok(png_bytes(size.width as u32, size.height as u32))
    }
}
