use std::path::PathBuf;
use thiserror::Error;

use ensemble_vote::AggregateError;

/// Errors from loading, compositing and writing a raster group.
///
/// Input problems (empty group, undecodable file, mismatched dimensions)
/// are fatal for the run; a partial composite would be misleading, so no
/// group is ever rendered from a subset of its images.
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("no PNG images in {}", .0.display())]
    EmptyGroup(PathBuf),

    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error(
        "image {} dimensions ({found_width}x{found_height}) differ from base ({base_width}x{base_height})",
        .path.display()
    )]
    DimensionMismatch {
        path: PathBuf,
        base_width: u32,
        base_height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
