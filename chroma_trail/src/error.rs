use thiserror::Error;

/// Errors surfaced by the tracking pipeline and its helpers.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("opencv operation failed: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to encode mask snapshot: {0}")]
    Snapshot(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
