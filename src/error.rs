//! Error types for the mtpgallery library.

use thiserror::Error;

/// Main error type for gallery operations.
///
/// Only conditions fatal to the whole run appear here. Per-object
/// problems (missing info, failed payload fetch, malformed JPEG data)
/// are skips counted in [`WalkStats`](crate::WalkStats) and never
/// surface as errors.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The responder rejected MTP session initiation.
    #[error("device rejected session open: {0}")]
    SessionRejected(String),

    /// The background worker task did not run to completion.
    #[error("worker task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type alias for gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
