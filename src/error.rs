use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while splitting a composite.
///
/// A composite without a recognisable grid is not an error; it surfaces as an
/// unsuccessful [`crate::AutoExtractResult`] instead.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid grid geometry: {0}")]
    Geometry(String),
    #[error("invalid output format: {0}")]
    Format(String),
    #[error("failed to encode frame: {0}")]
    Encode(#[source] image::ImageError),
    #[error("unsupported pixel layout: {channels} channel(s), need RGB or RGBA")]
    UnsupportedLayout { channels: usize },
}
