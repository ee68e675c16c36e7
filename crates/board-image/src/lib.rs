//! Poker board image composition.
//!
//! Loads per-card JPEG assets, concatenates them left to right into a
//! flop, turn or river strip, and persists the strip to a fixed path in
//! the output directory. The persisted JPEG can be handed to an
//! [`image_host::ImageHost`] for publishing.

pub mod card;
pub mod codec;
pub mod compose;
pub mod composer;
pub mod error;
pub mod stage;

// Re-exports for convenience
pub use card::{Card, Rank, Suit, parse_cards};
pub use composer::{BoardArtifact, BoardComposer, PublishedBoard};
pub use error::BoardError;
pub use stage::{BoardStage, validate_board};

/// Default JPEG quality for written artifacts.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Canvas fill used before any card is pasted.
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];
