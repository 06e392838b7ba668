use std::{io, path::PathBuf};

/// Error that can happen while converting a font table or an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {}", .path.display(), .source)]
    Write { path: PathBuf, source: io::Error },

    /// The glyph table is not valid JSON.
    #[error("malformed glyph table in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The glyph table is valid JSON, but not an object keyed by code point.
    #[error("glyph table in {} is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("failed to decode image {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(
        "image is {width}x{height} pixels, expected {expected_width}x{expected_height}"
    )]
    Dimensions {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
}
