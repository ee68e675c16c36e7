//! Command-line interface.

use std::path::PathBuf;

use anyhow::Context;
use board_image::{BoardComposer, PublishedBoard, parse_cards};
use clap::{Parser, Subcommand};
use image_host::HttpImageHost;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(author, version, about = "Compose poker board images from card assets", long_about = None)]
pub struct Cli {
    /// Directory holding <card>.jpeg assets (overrides BOARD_RESOURCES_DIR)
    #[arg(long, global = true)]
    pub resources: Option<PathBuf>,

    /// Directory receiving flop/turn/river.jpeg (overrides BOARD_OUTPUT_DIR)
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(
        about = "Compose the flop (3 cards), turn (4) or river (5) strip",
        alias = "c"
    )]
    Compose {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// Upload the result and print its URL
        #[arg(long)]
        upload: bool,
    },
    #[command(
        about = "Compose flop, turn and river for a full five-card board",
        alias = "d"
    )]
    Deal {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// Upload the river strip and print its URL
        #[arg(long)]
        upload: bool,
    },
    #[command(
        about = "Write the strip for a board to a file without touching the output directory",
        alias = "p"
    )]
    Preview {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// JPEG file to write (must end in .jpg or .jpeg)
        #[arg(long, required = true, value_parser = parse_jpeg_path)]
        out: PathBuf,
    },
}

impl Cli {
    pub async fn run(self, mut config: AppConfig) -> anyhow::Result<()> {
        if let Some(dir) = self.resources {
            config.resources_dir = dir;
        }
        if let Some(dir) = self.output {
            config.output_dir = dir;
        }

        let composer = BoardComposer::new(&config.resources_dir, &config.output_dir)
            .with_quality(config.jpeg_quality)
            .with_background(config.background);

        match self.command {
            Command::Compose { cards, upload } => {
                let cards = parse_cards(&cards)?;
                if upload || config.upload_enabled {
                    let host = image_host(&config)?;
                    let published = composer.publish_board(&cards, &host).await?;
                    print_published(&published);
                } else {
                    let artifact = composer.compose_board(&cards).await?;
                    println!("{}", artifact.path.display());
                }
            }
            Command::Deal { cards, upload } => {
                let cards = parse_cards(&cards)?;
                let [flop, turn, river] = composer.compose_progression(&cards).await?;
                println!("{}", flop.path.display());
                println!("{}", turn.path.display());
                if upload || config.upload_enabled {
                    let host = image_host(&config)?;
                    let published = composer.publish_artifact(river, &host).await?;
                    print_published(&published);
                } else {
                    println!("{}", river.path.display());
                }
            }
            Command::Preview { cards, out } => {
                let cards = parse_cards(&cards)?;
                let (stage, bytes) = composer.encode_board(&cards).await?;
                board_image::codec::write_bytes(bytes, out.clone()).await?;
                tracing::info!(stage = %stage, path = %out.display(), "Preview written");
                println!("{}", out.display());
            }
        }
        Ok(())
    }
}

/// Preview bytes are always JPEG, so the file name has to say so.
fn parse_jpeg_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
    if is_jpeg {
        Ok(path)
    } else {
        Err(format!("{value:?} must end in .jpg or .jpeg"))
    }
}

fn image_host(config: &AppConfig) -> anyhow::Result<HttpImageHost> {
    if config.image_host_url.is_empty() {
        anyhow::bail!("upload requested but IMAGE_HOST_URL is not configured");
    }
    HttpImageHost::new(&config.image_host_url).context("IMAGE_HOST_URL")
}

fn print_published(published: &PublishedBoard) {
    tracing::info!(path = %published.artifact.path.display(), "Artifact kept on disk");
    println!("{}", published.url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compose_with_globals() {
        let cli = Cli::try_parse_from([
            "poker-board",
            "compose",
            "2h",
            "9s",
            "Kd",
            "--upload",
            "--output",
            "/tmp/board",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(PathBuf::from("/tmp/board")));
        match cli.command {
            Command::Compose { cards, upload } => {
                assert_eq!(cards, ["2h", "9s", "Kd"]);
                assert!(upload);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_preview_requires_out() {
        assert!(Cli::try_parse_from(["poker-board", "preview", "2h", "9s", "Kd"]).is_err());
        assert!(
            Cli::try_parse_from(["poker-board", "preview", "2h", "9s", "Kd", "--out", "b.jpeg"])
                .is_ok()
        );
    }

    #[test]
    fn test_preview_rejects_non_jpeg_names() {
        for out in ["board.png", "board", "board.jpeg.bak"] {
            assert!(
                Cli::try_parse_from(["poker-board", "preview", "2h", "9s", "Kd", "--out", out])
                    .is_err(),
                "{out} should be rejected"
            );
        }
        let cli =
            Cli::try_parse_from(["poker-board", "preview", "2h", "9s", "Kd", "--out", "b.JPG"])
                .unwrap();
        match cli.command {
            Command::Preview { out, .. } => assert_eq!(out, PathBuf::from("b.JPG")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cards_are_required() {
        assert!(Cli::try_parse_from(["poker-board", "deal"]).is_err());
    }

    #[test]
    fn test_upload_without_endpoint_fails() {
        let err = image_host(&AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("IMAGE_HOST_URL"));
    }
}
