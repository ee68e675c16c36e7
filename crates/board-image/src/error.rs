use std::path::PathBuf;

use crate::card::Card;
use crate::stage::BoardStage;

/// Unified error type for the board-image crate.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("invalid card count: {0} (a board has 3, 4 or 5 cards)")]
    InvalidCardCount(usize),

    #[error("invalid card identifier: {0:?}")]
    InvalidCard(String),

    #[error("card {0} appears more than once on the board")]
    DuplicateCard(Card),

    #[error("{stage} needs {expected} input images, got {got}")]
    StageInputs {
        stage: BoardStage,
        expected: usize,
        got: usize,
    },

    #[error("failed to open image {}: {source}", path.display())]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image heights differ: {left}px vs {right}px")]
    DimensionMismatch { left: u32, right: u32 },

    #[error("failed to paste {width}x{height} image at ({x}, {y}): {reason}")]
    Paste {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upload failed: {0}")]
    Upload(#[from] image_host::UploadError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
