//! Board composition: turns a list of cards into a flop, turn or river
//! strip on disk.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use image_host::ImageHost;
use tracing::{debug, info};

use crate::card::Card;
use crate::codec;
use crate::compose;
use crate::error::BoardError;
use crate::stage::{BoardStage, validate_board};
use crate::{DEFAULT_BACKGROUND, DEFAULT_JPEG_QUALITY};

/// A composite written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardArtifact {
    pub stage: BoardStage,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl BoardArtifact {
    /// Read the persisted JPEG back as raw bytes.
    pub async fn read_bytes(&self) -> Result<Vec<u8>, BoardError> {
        codec::read_bytes(&self.path).await
    }
}

/// An artifact together with the public URL the image host returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedBoard {
    pub artifact: BoardArtifact,
    pub url: String,
}

/// Composes board strips from per-card JPEG assets.
///
/// Artifacts are written to fixed names (`flop.jpeg`, `turn.jpeg`,
/// `river.jpeg`) inside the output directory. Calls targeting the same
/// output directory must not run concurrently; give independent boards
/// their own directory with [`BoardComposer::with_output_dir`].
#[derive(Debug, Clone)]
pub struct BoardComposer {
    resources_dir: PathBuf,
    output_dir: PathBuf,
    quality: u8,
    background: Rgb<u8>,
}

impl BoardComposer {
    pub fn new(resources_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
            output_dir: output_dir.into(),
            quality: DEFAULT_JPEG_QUALITY,
            background: Rgb(DEFAULT_BACKGROUND),
        }
    }

    /// JPEG quality for written artifacts, clamped to 1..=100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = Rgb(rgb);
        self
    }

    /// Same settings, different output directory.
    pub fn with_output_dir(&self, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..self.clone()
        }
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn asset_path(&self, card: &Card) -> PathBuf {
        self.resources_dir.join(card.asset_name())
    }

    pub fn artifact_path(&self, stage: BoardStage) -> PathBuf {
        self.output_dir.join(stage.file_name())
    }

    /// Compose the strip for the board's current stage.
    ///
    /// Three cards build the flop from assets. Four cards extend the
    /// existing `flop.jpeg` with the turn card; five extend the existing
    /// `turn.jpeg`. Every input is decoded before anything is written, so
    /// a missing asset leaves no new artifact behind.
    pub async fn compose_board(&self, cards: &[Card]) -> Result<BoardArtifact, BoardError> {
        let stage = validate_board(cards)?;
        codec::ensure_dir(&self.output_dir).await?;

        let previous = match stage.previous() {
            Some(prev) => Some(codec::open_image(self.artifact_path(prev)).await?),
            None => None,
        };
        let new = self.open_cards(stage.new_cards(cards)).await?;

        let composite = self.combine_stage(stage, previous.as_ref(), &new)?;
        let artifact = self.persist(stage, composite).await?;
        info!(
            stage = %stage,
            path = %artifact.path.display(),
            w = artifact.width,
            h = artifact.height,
            "Board composed"
        );
        Ok(artifact)
    }

    /// Compose flop, turn and river for a full five-card board.
    ///
    /// Each stage builds on the previous composite in memory; all three
    /// artifacts are still written.
    pub async fn compose_progression(&self, cards: &[Card]) -> Result<[BoardArtifact; 3], BoardError> {
        if validate_board(cards)? != BoardStage::River {
            return Err(BoardError::InvalidCardCount(cards.len()));
        }
        codec::ensure_dir(&self.output_dir).await?;

        let images = self.open_cards(cards).await?;

        let flop = BoardStage::Flop;
        let composite = self.combine_stage(flop, None, flop.new_cards(&images))?;
        let (flop_artifact, composite) = self.persist_keep(flop, composite).await?;

        let turn = BoardStage::Turn;
        let composite = self.combine_stage(turn, Some(&composite), turn.new_cards(&images))?;
        let (turn_artifact, composite) = self.persist_keep(turn, composite).await?;

        let river = BoardStage::River;
        let composite = self.combine_stage(river, Some(&composite), river.new_cards(&images))?;
        let river_artifact = self.persist(river, composite).await?;

        info!(
            output = %self.output_dir.display(),
            w = river_artifact.width,
            "Board progression composed"
        );
        Ok([flop_artifact, turn_artifact, river_artifact])
    }

    /// Build the strip for the board's stage from assets alone and return
    /// it as JPEG bytes, without touching the output directory.
    pub async fn encode_board(&self, cards: &[Card]) -> Result<(BoardStage, Vec<u8>), BoardError> {
        let stage = validate_board(cards)?;
        let images = self.open_cards(cards).await?;

        let flop = BoardStage::Flop;
        let mut composite = self.combine_stage(flop, None, flop.new_cards(&images))?;
        for next in [BoardStage::Turn, BoardStage::River] {
            if next > stage {
                break;
            }
            composite = self.combine_stage(next, Some(&composite), next.new_cards(&images))?;
        }

        let (img, bytes) = codec::encode(composite, self.quality).await?;
        debug!(stage = %stage, w = img.width(), h = img.height(), len = bytes.len(), "Board encoded");
        Ok((stage, bytes))
    }

    /// Compose the board, then upload the written artifact.
    pub async fn publish_board<H: ImageHost>(
        &self,
        cards: &[Card],
        host: &H,
    ) -> Result<PublishedBoard, BoardError> {
        let artifact = self.compose_board(cards).await?;
        self.publish_artifact(artifact, host).await
    }

    /// Upload an already written artifact.
    pub async fn publish_artifact<H: ImageHost>(
        &self,
        artifact: BoardArtifact,
        host: &H,
    ) -> Result<PublishedBoard, BoardError> {
        let bytes = artifact.read_bytes().await?;
        let file_name = artifact.stage.file_name();
        let url = host.upload(bytes, &file_name).await?;
        info!(stage = %artifact.stage, url = %url, "Board uploaded");
        Ok(PublishedBoard { artifact, url })
    }

    async fn open_cards(&self, cards: &[Card]) -> Result<Vec<RgbImage>, BoardError> {
        let mut images = Vec::with_capacity(cards.len());
        // Sequential, so the paste order follows the card order.
        for card in cards {
            images.push(codec::open_image(self.asset_path(card)).await?);
        }
        Ok(images)
    }

    fn combine_stage(
        &self,
        stage: BoardStage,
        previous: Option<&RgbImage>,
        new: &[RgbImage],
    ) -> Result<RgbImage, BoardError> {
        let bg = self.background;
        match (stage, previous, new) {
            (BoardStage::Flop, None, [a, b, c]) => compose::combine_three(a, b, c, bg),
            (BoardStage::Turn, Some(flop), [turn]) => compose::combine_two(flop, turn, bg),
            (BoardStage::River, Some(turn), [a, b]) => compose::combine_three(turn, a, b, bg),
            _ => Err(BoardError::StageInputs {
                stage,
                expected: stage.input_count(),
                got: new.len() + usize::from(previous.is_some()),
            }),
        }
    }

    async fn persist(&self, stage: BoardStage, composite: RgbImage) -> Result<BoardArtifact, BoardError> {
        Ok(self.persist_keep(stage, composite).await?.0)
    }

    async fn persist_keep(
        &self,
        stage: BoardStage,
        composite: RgbImage,
    ) -> Result<(BoardArtifact, RgbImage), BoardError> {
        let path = self.artifact_path(stage);
        let img = codec::write_jpeg(composite, path.clone(), self.quality).await?;
        let artifact = BoardArtifact {
            stage,
            path,
            width: img.width(),
            height: img.height(),
        };
        Ok((artifact, img))
    }
}
