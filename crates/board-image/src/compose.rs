//! Image composition primitives: blank canvases, pasting, and
//! side-by-side concatenation of equally tall images.

use image::{GenericImage, Rgb, RgbImage};
use tracing::debug;

use crate::error::BoardError;

/// Allocate a canvas filled with `fill`.
pub fn blank_canvas(width: u32, height: u32, fill: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, fill)
}

/// Copy `top` onto `canvas` with its top-left corner at `(x, y)`.
///
/// Fails if `top` does not fit entirely inside the canvas.
pub fn paste(canvas: &mut RgbImage, top: &RgbImage, x: u32, y: u32) -> Result<(), BoardError> {
    let (width, height) = top.dimensions();
    canvas
        .copy_from(top, x, y)
        .map_err(|e| BoardError::Paste {
            x,
            y,
            width,
            height,
            reason: e.to_string(),
        })
}

/// Concatenate two images horizontally: `left` at the origin, `right`
/// immediately after it.
///
/// Both images must have the same height.
pub fn combine_two(left: &RgbImage, right: &RgbImage, fill: Rgb<u8>) -> Result<RgbImage, BoardError> {
    if left.height() != right.height() {
        return Err(BoardError::DimensionMismatch {
            left: left.height(),
            right: right.height(),
        });
    }

    let width = left.width() + right.width();
    let height = left.height();
    debug!(
        left_w = left.width(),
        right_w = right.width(),
        width,
        height,
        "Combining two images"
    );

    let mut canvas = blank_canvas(width, height, fill);
    paste(&mut canvas, left, 0, 0)?;
    paste(&mut canvas, right, left.width(), 0)?;
    Ok(canvas)
}

/// Concatenate three images horizontally as two successive pairwise merges.
pub fn combine_three(
    first: &RgbImage,
    second: &RgbImage,
    third: &RgbImage,
    fill: Rgb<u8>,
) -> Result<RgbImage, BoardError> {
    let pair = combine_two(first, second, fill)?;
    combine_two(&pair, third, fill)
}
