//! Error type shared by the audio, asset and rendering layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("audio: {0}")]
    Audio(String),

    #[error("failed to load clip {path}: {source}")]
    Asset {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("render: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
