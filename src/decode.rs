use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use crate::pixel::PixelGrid;
use crate::{PixtraceError, PixtraceResult};

/// An image file as handed over by the caller: raw bytes plus the declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    bytes: Vec<u8>,
    mime: String,
}

impl ImageFile {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    /// Read a file from disk, declaring its MIME type from the file extension.
    pub fn open(path: impl AsRef<Path>) -> PixtraceResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        Ok(Self::new(bytes, mime.essence_str()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decode an image file into an RGBA pixel grid at its natural size.
///
/// The content decides the decoder; the declared MIME type is only used when
/// the bytes carry no recognizable signature. Animated formats yield their
/// first frame.
pub fn decode_image(file: &ImageFile) -> PixtraceResult<PixelGrid> {
    if file.is_empty() {
        return Err(PixtraceError::EmptyImage);
    }

    let mut reader = ImageReader::new(Cursor::new(file.bytes()));
    if let Some(format) = ImageFormat::from_mime_type(file.mime()) {
        reader.set_format(format);
    }
    let reader = reader.with_guessed_format()?;
    if reader.format() != ImageFormat::from_mime_type(file.mime()) {
        tracing::debug!(
            mime = file.mime(),
            detected = ?reader.format(),
            "Declared MIME type does not match the file contents"
        );
    }

    let image = reader.decode()?;
    tracing::debug!(
        mime = file.mime(),
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );
    Ok(PixelGrid::from_rgba_image(image.into_rgba8()))
}
