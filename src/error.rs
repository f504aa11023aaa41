use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpinError {
    #[error("No frame sources provided")]
    NoSources,

    #[error("Failed to load frame {frame_source} after {attempts} attempts: {reason}")]
    LoadFailed {
        frame_source: String,
        attempts: u32,
        reason: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpinError>;
