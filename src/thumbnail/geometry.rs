//! Pure geometry for the two thumbnail modes.
//!
//! Nothing here touches pixels, so every function is testable on plain numbers.

/// Side of the square canvas used by pad mode.
///
/// Large enough to hold both the target edge and the unscaled source.
///
/// # Examples
/// ```
/// # use thumbnailer::thumbnail::pad_canvas_size;
/// assert_eq!(pad_canvas_size(400, 300, 200), 400);
/// assert_eq!(pad_canvas_size(50, 80, 200), 200);
/// ```
pub fn pad_canvas_size(width: u32, height: u32, target_edge: u32) -> u32 {
    target_edge.max(width).max(height)
}

/// Top-left position that centers a `width`x`height` image on a square
/// canvas. Odd remainders round toward the top-left.
pub fn pad_offset(width: u32, height: u32, canvas: u32) -> (u32, u32) {
    (
        canvas.saturating_sub(width) / 2,
        canvas.saturating_sub(height) / 2,
    )
}

/// Centered square window of a source image: `(x, y, side)` where `side` is
/// the shorter edge. Odd overhang rounds toward the top-left.
/// Resampling this window to the target edge frames the same content as
/// scaling the image to cover the target and cutting its middle.
///
/// # Examples
/// ```
/// # use thumbnailer::thumbnail::center_square;
/// assert_eq!(center_square(400, 300), (50, 0, 300));
/// assert_eq!(center_square(100, 301), (0, 100, 100));
/// ```
pub fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}
