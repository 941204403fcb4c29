use thiserror::Error;

/// Result type alias for operations that may fail with [`PixtraceError`].
pub type PixtraceResult<T> = std::result::Result<T, PixtraceError>;

/// Error types that can occur while converting an image to SVG.
///
/// Decoding and tracing failures name their stage in the message so callers
/// can surface them as actionable text.
#[derive(Debug, Error)]
pub enum PixtraceError {
    /// The image could not be decoded into pixels.
    #[error("Image decoding failed: {0}")]
    Decode(#[from] image::ImageError),
    /// The image file contains no bytes.
    #[error("Image decoding failed: file is empty")]
    EmptyImage,
    /// Pixel buffer length does not match `width * height * 4`.
    #[error("Pixel buffer of {found} bytes does not match a {width}x{height} RGBA grid")]
    PixelLength { width: u32, height: u32, found: usize },
    /// The tracing engine rejected the input or failed while tracing.
    #[error("Tracing failed: {0}")]
    Trace(String),
    /// No preset bundle exists under the requested name.
    #[error("Unknown trace preset `{0}`")]
    UnknownPreset(String),
    /// An options record could not be parsed.
    #[error("Invalid trace options: {0}")]
    Options(String),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
