//! The read-only reconstruction backend the viewer consumes.

pub mod http;
pub mod wire;

use crate::controller::{Payload, Request};
use crate::error::Result;
use crate::model::{ImageData, ImageEntry, ImageId, MatchClass, MatchSummary};
use crate::pixels::DecodedImage;

pub use http::HttpApi;

pub trait ReconstructionApi {
    /// Names of the available data sources, in backend order.
    fn sources(&self) -> Result<Vec<String>>;

    /// Make `name` the active source for all subsequent reads.
    fn set_source(&self, name: &str) -> Result<()>;

    fn images(&self) -> Result<Vec<ImageEntry>>;

    fn image_data(&self, id: ImageId) -> Result<ImageData>;

    /// Ids of images with at least one match against `id`.
    fn matches_for_image(&self, id: ImageId) -> Result<Vec<ImageId>>;

    /// Raw `(index1, index2)` pairs, optionally restricted to one class.
    fn matches(
        &self,
        id1: ImageId,
        id2: ImageId,
        class: Option<MatchClass>,
    ) -> Result<Vec<(usize, usize)>>;

    fn match_summary(&self, id1: ImageId, id2: ImageId) -> Result<MatchSummary>;

    /// Encoded image file as served under the image's name.
    fn image_bytes(&self, name: &str) -> Result<Vec<u8>>;

    /// Run one controller request against this backend.
    fn execute(&self, request: &Request) -> Result<Payload> {
        match request {
            Request::Sources => self.sources().map(Payload::Sources),
            Request::SetSource { name } => self.set_source(name).map(|_| Payload::SourceSet),
            Request::Images => self.images().map(Payload::Images),
            Request::ImageData { id, .. } => self.image_data(*id).map(Payload::ImageData),
            Request::ImagePixels { name, .. } => {
                let bytes = self.image_bytes(name)?;
                DecodedImage::decode(&bytes).map(Payload::Pixels)
            }
            Request::Candidates { image } => {
                self.matches_for_image(*image).map(Payload::Candidates)
            }
            Request::Matches { a, b, class } => self
                .matches(*a, *b, Some(*class))
                .map(|pairs| Payload::Matches(wire::tag_matches(pairs, *class))),
            Request::Summary { a, b } => self.match_summary(*a, *b).map(Payload::Summary),
        }
    }
}
