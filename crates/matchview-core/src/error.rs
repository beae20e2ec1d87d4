use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned status {code}")]
    Status { url: String, code: u16 },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Select two images first")]
    MissingPair,

    #[error("Unknown data source: {0}")]
    UnknownSource(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, MatchViewError>;
