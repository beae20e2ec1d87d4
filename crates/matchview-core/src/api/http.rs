use std::io::Read;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{MatchViewError, Result};
use crate::model::{ImageData, ImageEntry, ImageId, MatchClass, MatchSummary};
use crate::pixels::MAX_IMAGE_BYTES;

use super::wire::{WireImageData, WireMatches};
use super::ReconstructionApi;

/// Blocking JSON-over-HTTP client for the reconstruction backend.
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: Option<(&str, &str)>) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let mut req = self.agent.get(&url);
        if let Some((key, value)) = query {
            req = req.query(key, value);
        }
        let response = req.call().map_err(|e| map_error(&url, e))?;
        response
            .into_json::<T>()
            .map_err(|e| MatchViewError::Decode(format!("{url}: {e}")))
    }
}

fn map_error(url: &str, err: ureq::Error) -> MatchViewError {
    match err {
        ureq::Error::Status(code, _) => MatchViewError::Status {
            url: url.to_string(),
            code,
        },
        ureq::Error::Transport(t) => MatchViewError::Transport {
            url: url.to_string(),
            message: t.to_string(),
        },
    }
}

/// Percent-encode one path segment (RFC 3986 unreserved characters pass through).
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Encode a relative file path, keeping `/` separators.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

impl ReconstructionApi for HttpApi {
    fn sources(&self) -> Result<Vec<String>> {
        self.get_json("/api/sources", None)
    }

    fn set_source(&self, name: &str) -> Result<()> {
        let url = self.url(&format!("/api/set_source/{}", encode_segment(name)));
        debug!(%url, "POST");
        self.agent
            .post(&url)
            .call()
            .map(|_| ())
            .map_err(|e| map_error(&url, e))
    }

    fn images(&self) -> Result<Vec<ImageEntry>> {
        self.get_json("/api/images", None)
    }

    fn image_data(&self, id: ImageId) -> Result<ImageData> {
        let wire: WireImageData = self.get_json(&format!("/api/image_data/{id}"), None)?;
        Ok(wire.into_image(id))
    }

    fn matches_for_image(&self, id: ImageId) -> Result<Vec<ImageId>> {
        self.get_json(&format!("/api/matches_for_image/{id}"), None)
    }

    fn matches(
        &self,
        id1: ImageId,
        id2: ImageId,
        class: Option<MatchClass>,
    ) -> Result<Vec<(usize, usize)>> {
        let path = format!("/api/matches/{id1}/{id2}");
        let pairs: WireMatches =
            self.get_json(&path, class.map(|c| ("match_type", c.as_query())))?;
        Ok(pairs)
    }

    fn match_summary(&self, id1: ImageId, id2: ImageId) -> Result<MatchSummary> {
        self.get_json(&format!("/api/match_summary/{id1}/{id2}"), None)
    }

    fn image_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let url = self.url(&format!("/serve_image/{}", encode_path(name)));
        debug!(%url, "GET image");
        let response = self.agent.get(&url).call().map_err(|e| map_error(&url, e))?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_IMAGE_BYTES)
            .read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
