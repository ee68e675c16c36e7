//! Async wrappers around the blocking JPEG codec and file I/O.
//!
//! Each operation runs on tokio's blocking pool and resolves to exactly one
//! `Ok` or one `Err`.

use std::io;
use std::path::{Path, PathBuf};

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::{debug, warn};

use crate::error::BoardError;

/// Decode an image file into an RGB bitmap.
pub async fn open_image(path: PathBuf) -> Result<RgbImage, BoardError> {
    let target = path.clone();
    let decoded = tokio::task::spawn_blocking(move || image::open(&target)).await?;
    let img = decoded.map_err(|source| BoardError::ImageOpen { path: path.clone(), source })?;
    debug!(path = %path.display(), w = img.width(), h = img.height(), "Opened image");
    Ok(img.to_rgb8())
}

/// Encode a bitmap as JPEG bytes.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(img)?;
    Ok(bytes)
}

/// Encode a bitmap as JPEG bytes on the blocking pool.
///
/// Gives the bitmap back alongside the bytes.
pub async fn encode(img: RgbImage, quality: u8) -> Result<(RgbImage, Vec<u8>), BoardError> {
    let result = tokio::task::spawn_blocking(move || {
        let bytes = encode_jpeg(&img, quality);
        (img, bytes)
    })
    .await?;

    let (img, bytes) = result;
    Ok((img, bytes.map_err(BoardError::Encode)?))
}

/// Encode a bitmap as JPEG and atomically replace `path` with it.
///
/// Gives the bitmap back so a later stage can build on it without
/// re-decoding the file.
pub async fn write_jpeg(img: RgbImage, path: PathBuf, quality: u8) -> Result<RgbImage, BoardError> {
    let target = path.clone();
    let (img, written) = tokio::task::spawn_blocking(move || {
        let written = encode_jpeg(&img, quality)
            .map_err(io::Error::other)
            .and_then(|bytes| persist_atomically(&target, &bytes));
        (img, written)
    })
    .await?;

    written.map_err(|source| BoardError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), w = img.width(), h = img.height(), "Wrote JPEG");
    Ok(img)
}

/// Write bytes to `path` via a sibling temporary file so readers never
/// observe a partially written artifact.
pub async fn write_bytes(bytes: Vec<u8>, path: PathBuf) -> Result<(), BoardError> {
    let target = path.clone();
    tokio::task::spawn_blocking(move || persist_atomically(&target, &bytes))
        .await?
        .map_err(|source| BoardError::Write { path, source })
}

/// Create `dir` and its parents. Succeeds if it already exists.
pub async fn ensure_dir(dir: &Path) -> Result<(), BoardError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| BoardError::Write {
            path: dir.to_path_buf(),
            source,
        })
}

/// Read a previously written artifact back as raw bytes.
pub async fn read_bytes(path: &Path) -> Result<Vec<u8>, BoardError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| BoardError::ImageOpen {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })
}

fn persist_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = partial_path(path);
    let result = std::fs::write(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, path));
    if result.is_err() && tmp.exists() {
        if let Err(e) = std::fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), "Failed to remove partial file: {e}");
        }
    }
    result
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([40, 120, 200]))
    }

    #[test]
    fn test_partial_path_is_hidden_sibling() {
        let p = partial_path(Path::new("/tmp/output/flop.jpeg"));
        assert_eq!(p, PathBuf::from("/tmp/output/.flop.jpeg.partial"));
    }

    #[test]
    fn test_encode_jpeg_is_deterministic() {
        let img = solid(16, 8);
        let a = encode_jpeg(&img, 90).unwrap();
        let b = encode_jpeg(&img, 90).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..2], &[0xFF, 0xD8]); // JPEG SOI marker
    }

    #[tokio::test]
    async fn test_write_then_open_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.jpeg");

        let img = write_jpeg(solid(33, 17), path.clone(), 90).await.unwrap();
        assert_eq!(img.dimensions(), (33, 17));

        let reopened = open_image(path.clone()).await.unwrap();
        assert_eq!(reopened.dimensions(), (33, 17));
        assert!(!partial_path(&path).exists());
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.jpeg");

        write_jpeg(solid(10, 10), path.clone(), 90).await.unwrap();
        write_jpeg(solid(20, 10), path.clone(), 90).await.unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (20, 10));
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("strip.jpeg");

        let err = write_jpeg(solid(4, 4), path.clone(), 90).await.unwrap_err();
        assert!(matches!(err, BoardError::Write { path: ref p, .. } if *p == path));
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[tokio::test]
    async fn test_write_bytes_round_trip_leaves_no_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.jpeg");
        let bytes = encode_jpeg(&solid(12, 6), 80).unwrap();

        write_bytes(bytes.clone(), path.clone()).await.unwrap();
        assert_eq!(read_bytes(&path).await.unwrap(), bytes);
        assert!(!partial_path(&path).exists());

        // Overwrites in place
        write_bytes(vec![1, 2, 3], path.clone()).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), [1, 2, 3]);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[tokio::test]
    async fn test_write_bytes_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("preview.jpeg");
        let err = write_bytes(vec![0], path.clone()).await.unwrap_err();
        assert!(matches!(err, BoardError::Write { path: ref p, .. } if *p == path));
    }

    #[tokio::test]
    async fn test_open_missing_file_is_image_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.jpeg");
        let err = open_image(path.clone()).await.unwrap_err();
        assert!(matches!(err, BoardError::ImageOpen { path: ref p, .. } if *p == path));
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        ensure_dir(&out).await.unwrap();
        ensure_dir(&out).await.unwrap();
        assert!(out.is_dir());
    }
}
