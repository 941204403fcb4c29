//! Frame counting for GIF byte streams.
//!
//! Walks the block structure just far enough to see whether a second image
//! descriptor exists. Pixel data is skipped, never decompressed.

use thiserror::Error;

pub const GIF_MIME: &str = "image/gif";

const HEADER_LEN: usize = 6;
const SCREEN_DESCRIPTOR_LEN: usize = 7;
/// Offset of the packed flag byte in the logical screen descriptor.
const SCREEN_FLAGS_OFFSET: usize = HEADER_LEN + 4;

const EXTENSION_INTRODUCER: u8 = 0x21;
const IMAGE_SEPARATOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
const APPLICATION_LABEL: u8 = 0xFF;
const COMMENT_LABEL: u8 = 0xFE;
/// Introducer, label, block size, four data bytes and the terminator.
const GRAPHIC_CONTROL_LEN: usize = 8;

/// Left, top, width and height of an image descriptor.
const IMAGE_POSITION_LEN: usize = 8;

const COLOR_TABLE_FLAG: u8 = 0x80;
const COLOR_TABLE_SIZE_MASK: u8 = 0x07;

/// Structural problems found while walking a GIF stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GifParseError {
    #[error("GIF stream truncated at byte {offset}")]
    Truncated { offset: usize },
    #[error("missing GIF87a/GIF89a signature")]
    Signature,
    #[error("unsupported extension label {label:#04x} at byte {offset}")]
    UnexpectedExtension { label: u8, offset: usize },
    #[error("unexpected block byte {byte:#04x} at byte {offset}")]
    UnexpectedByte { byte: u8, offset: usize },
}

/// Report whether a file declared as `mime` holds an animated GIF.
///
/// Non-GIF types answer `false` without looking at the bytes. Parse errors
/// are logged and also answer `false`.
pub fn is_animated_gif(mime: &str, bytes: &[u8]) -> bool {
    if mime != GIF_MIME {
        return false;
    }

    match has_multiple_frames(bytes) {
        Ok(animated) => animated,
        Err(err) => {
            tracing::warn!(error = %err, "Error checking if GIF is animated, assuming a single frame");
            false
        }
    }
}

/// Walk the GIF block structure and stop as soon as a second frame appears.
pub fn has_multiple_frames(bytes: &[u8]) -> Result<bool, GifParseError> {
    if !bytes.starts_with(b"GIF87a") && !bytes.starts_with(b"GIF89a") {
        return Err(GifParseError::Signature);
    }

    let mut cursor = ByteCursor::new(bytes);
    let screen_flags = cursor.byte_at(SCREEN_FLAGS_OFFSET)?;
    cursor.skip(HEADER_LEN + SCREEN_DESCRIPTOR_LEN);
    cursor.skip_color_table(screen_flags);

    let mut frames = 0usize;
    while !cursor.at_end() {
        let offset = cursor.pos;
        match cursor.next_byte()? {
            EXTENSION_INTRODUCER => match cursor.next_byte()? {
                GRAPHIC_CONTROL_LABEL => cursor.skip(GRAPHIC_CONTROL_LEN - 2),
                APPLICATION_LABEL | COMMENT_LABEL => cursor.skip_sub_blocks()?,
                label => {
                    return Err(GifParseError::UnexpectedExtension {
                        label,
                        offset: offset + 1,
                    });
                }
            },
            IMAGE_SEPARATOR => {
                frames += 1;
                if frames > 1 {
                    return Ok(true);
                }
                cursor.skip(IMAGE_POSITION_LEN);
                let image_flags = cursor.next_byte()?;
                cursor.skip_color_table(image_flags);
                // LZW minimum code size
                cursor.skip(1);
                cursor.skip_sub_blocks()?;
            }
            TRAILER => break,
            byte => return Err(GifParseError::UnexpectedByte { byte, offset }),
        }
    }

    Ok(false)
}

/// Size in bytes of the color table announced by a packed flag byte.
fn color_table_len(flags: u8) -> usize {
    3 * (1usize << ((flags & COLOR_TABLE_SIZE_MASK) + 1))
}

struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn byte_at(&self, offset: usize) -> Result<u8, GifParseError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(GifParseError::Truncated { offset })
    }

    fn next_byte(&mut self) -> Result<u8, GifParseError> {
        let byte = self.byte_at(self.pos)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Skipping may run past the end; the next read reports truncation.
    fn skip(&mut self, len: usize) {
        self.pos = self.pos.saturating_add(len);
    }

    fn skip_color_table(&mut self, flags: u8) {
        if flags & COLOR_TABLE_FLAG != 0 {
            self.skip(color_table_len(flags));
        }
    }

    /// Skip length-prefixed sub-blocks up to and including the zero terminator.
    fn skip_sub_blocks(&mut self) -> Result<(), GifParseError> {
        loop {
            let len = self.next_byte()?;
            if len == 0 {
                return Ok(());
            }
            self.skip(len as usize);
        }
    }
}
