use std::fmt;

use crate::error::Result;
use crate::model::{ImageData, ImageEntry, ImageId, Match, MatchClass, MatchSummary, Panel};
use crate::pixels::DecodedImage;

/// Monotonically increasing stamp on every issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A backend fetch the controller wants performed.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Sources,
    SetSource { name: String },
    Images,
    ImageData { panel: Panel, id: ImageId },
    ImagePixels { panel: Panel, id: ImageId, name: String },
    Candidates { image: ImageId },
    Matches { a: ImageId, b: ImageId, class: MatchClass },
    Summary { a: ImageId, b: ImageId },
}

/// Requests on the same channel supersede each other; only a reply carrying
/// the channel's latest token is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Sources,
    SetSource,
    Images,
    Panel(Panel),
    Candidates,
    Matches,
    Summary,
}

impl Request {
    pub fn channel(&self) -> Channel {
        match self {
            Request::Sources => Channel::Sources,
            Request::SetSource { .. } => Channel::SetSource,
            Request::Images => Channel::Images,
            Request::ImageData { panel, .. } | Request::ImagePixels { panel, .. } => {
                Channel::Panel(*panel)
            }
            Request::Candidates { .. } => Channel::Candidates,
            Request::Matches { .. } => Channel::Matches,
            Request::Summary { .. } => Channel::Summary,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Sources => write!(f, "sources"),
            Request::SetSource { name } => write!(f, "set source {name}"),
            Request::Images => write!(f, "image list"),
            Request::ImageData { panel, id } => write!(f, "{panel} data (image {id})"),
            Request::ImagePixels { panel, name, .. } => write!(f, "{panel} pixels ({name})"),
            Request::Candidates { image } => write!(f, "match candidates for image {image}"),
            Request::Matches { a, b, class } => write!(f, "{class} matches {a}/{b}"),
            Request::Summary { a, b } => write!(f, "match summary {a}/{b}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ticket {
    pub token: RequestToken,
    pub request: Request,
}

/// Successful result of executing a [`Request`].
#[derive(Clone, Debug)]
pub enum Payload {
    Sources(Vec<String>),
    SourceSet,
    Images(Vec<ImageEntry>),
    ImageData(ImageData),
    Pixels(DecodedImage),
    Candidates(Vec<ImageId>),
    Matches(Vec<Match>),
    Summary(MatchSummary),
}

/// A finished request handed back to the controller.
#[derive(Debug)]
pub struct Reply {
    pub ticket: Ticket,
    pub result: Result<Payload>,
}

impl Reply {
    pub fn new(ticket: Ticket, result: Result<Payload>) -> Self {
        Self { ticket, result }
    }
}
