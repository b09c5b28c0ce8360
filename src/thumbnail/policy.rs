use std::fmt;
use std::str::FromStr;

use image::Rgb;

use crate::error::ThumbnailerError;

/// Default thumbnail edge length in pixels
pub const DEFAULT_TARGET_EDGE: u32 = 200;

/// Default padding color (white)
pub const DEFAULT_FILL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// How a non-square image is made square
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThumbnailMode {
    /// Letterbox the whole image inside a filled square
    #[default]
    Pad,
    /// Scale to cover the square and cut off the overhang
    Crop,
}

impl FromStr for ThumbnailMode {
    type Err = ThumbnailerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pad") {
            Ok(ThumbnailMode::Pad)
        } else if s.eq_ignore_ascii_case("crop") {
            Ok(ThumbnailMode::Crop)
        } else {
            Err(ThumbnailerError::InvalidPolicy(format!(
                "thumbnail mode '{}' is invalid, expected 'pad' or 'crop'",
                s
            )))
        }
    }
}

impl fmt::Display for ThumbnailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThumbnailMode::Pad => f.write_str("pad"),
            ThumbnailMode::Crop => f.write_str("crop"),
        }
    }
}

/// Mode and geometry of the thumbnails to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailPolicy {
    pub mode: ThumbnailMode,
    /// Width and height of every thumbnail
    pub target_edge: u32,
    /// Canvas color for pad mode (unused by crop)
    pub fill_color: Rgb<u8>,
}

impl ThumbnailPolicy {
    pub fn new(mode: ThumbnailMode, target_edge: u32) -> Self {
        Self {
            mode,
            target_edge,
            fill_color: DEFAULT_FILL_COLOR,
        }
    }

    pub fn pad(target_edge: u32) -> Self {
        Self::new(ThumbnailMode::Pad, target_edge)
    }

    pub fn crop(target_edge: u32) -> Self {
        Self::new(ThumbnailMode::Crop, target_edge)
    }

    /// Parse the mode name and build a validated policy.
    pub fn from_mode_str(mode: &str, target_edge: u32) -> Result<Self, ThumbnailerError> {
        let policy = Self::new(mode.parse()?, target_edge);
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_fill_color(mut self, fill_color: Rgb<u8>) -> Self {
        self.fill_color = fill_color;
        self
    }

    pub fn validate(&self) -> Result<(), ThumbnailerError> {
        if self.target_edge == 0 {
            return Err(ThumbnailerError::InvalidPolicy(
                "target edge must be a positive number of pixels".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ThumbnailPolicy {
    fn default() -> Self {
        Self::pad(DEFAULT_TARGET_EDGE)
    }
}
