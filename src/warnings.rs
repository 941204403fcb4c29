use std::fmt;

use crate::decode::ImageFile;
use crate::gif::{GIF_MIME, is_animated_gif};

pub const BMP_MIME: &str = "image/bmp";

/// Size above which any image is reported as large.
pub const RECOMMENDED_MAX_MB: u64 = 5;
/// Lower limit for BMP files, which are uncompressed.
pub const RECOMMENDED_MAX_BMP_MB: u64 = 2;

const SUPPORTED_FORMATS: &[(&str, &str)] = &[
    ("image/png", "PNG"),
    ("image/jpeg", "JPEG"),
    ("image/webp", "WebP"),
    (GIF_MIME, "GIF"),
    (BMP_MIME, "BMP"),
];

/// Informational notices about an input file. None of them stop a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageWarning {
    AnimatedGif,
    LargeFile,
    LargeBmp,
    UnsupportedFormat,
}

impl fmt::Display for ImageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageWarning::AnimatedGif => write!(
                f,
                "This appears to be an animated GIF. Only the first frame will be traced."
            ),
            ImageWarning::LargeFile => write!(
                f,
                "This image is larger than {RECOMMENDED_MAX_MB}MB. Processing may be slow and result in a complex SVG."
            ),
            ImageWarning::LargeBmp => write!(
                f,
                "BMP files can result in complex SVGs. Consider converting to PNG first for better results."
            ),
            ImageWarning::UnsupportedFormat => write!(
                f,
                "This file type is not PNG, JPEG, WebP, GIF or BMP. Decoding relies on the file contents."
            ),
        }
    }
}

/// Collect the warnings that apply to a file.
pub fn image_warnings(file: &ImageFile) -> Vec<ImageWarning> {
    let mut warnings = Vec::new();

    if is_animated_gif(file.mime(), file.bytes()) {
        warnings.push(ImageWarning::AnimatedGif);
    }
    if exceeds_recommended_size(file.len(), RECOMMENDED_MAX_MB) {
        warnings.push(ImageWarning::LargeFile);
    }
    if file.mime() == BMP_MIME && exceeds_recommended_size(file.len(), RECOMMENDED_MAX_BMP_MB) {
        warnings.push(ImageWarning::LargeBmp);
    }
    if !is_supported_mime(file.mime()) {
        warnings.push(ImageWarning::UnsupportedFormat);
    }

    warnings
}

pub fn exceeds_recommended_size(len: u64, max_mb: u64) -> bool {
    len > max_mb * 1024 * 1024
}

/// Display name for a MIME type, `Unknown` for anything unsupported.
pub fn format_name(mime: &str) -> &'static str {
    SUPPORTED_FORMATS
        .iter()
        .find(|(m, _)| *m == mime)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

/// Whether the MIME type is one of the accepted input formats.
pub fn is_supported_mime(mime: &str) -> bool {
    SUPPORTED_FORMATS.iter().any(|(m, _)| *m == mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gif::tests::{single_frame_gif, two_frame_gif};

    const MB: usize = 1024 * 1024;

    #[test]
    fn animated_gif_is_flagged() {
        let file = ImageFile::new(two_frame_gif(), GIF_MIME);
        assert_eq!(image_warnings(&file), vec![ImageWarning::AnimatedGif]);
    }

    #[test]
    fn still_gif_has_no_warnings() {
        let file = ImageFile::new(single_frame_gif(), GIF_MIME);
        assert!(image_warnings(&file).is_empty());
    }

    #[test]
    fn large_bmp_gets_both_size_warnings() {
        let file = ImageFile::new(vec![0; 6 * MB], BMP_MIME);
        assert_eq!(
            image_warnings(&file),
            vec![ImageWarning::LargeFile, ImageWarning::LargeBmp]
        );
    }

    #[test]
    fn medium_bmp_only_gets_bmp_warning() {
        let file = ImageFile::new(vec![0; 3 * MB], BMP_MIME);
        assert_eq!(image_warnings(&file), vec![ImageWarning::LargeBmp]);
        let png = ImageFile::new(vec![0; 3 * MB], "image/png");
        assert!(image_warnings(&png).is_empty());
    }

    #[test]
    fn unsupported_mime_is_flagged() {
        let file = ImageFile::new(vec![0; 16], "application/octet-stream");
        assert_eq!(image_warnings(&file), vec![ImageWarning::UnsupportedFormat]);
        let tiff = ImageFile::new(vec![0; 16], "image/tiff");
        assert_eq!(image_warnings(&tiff), vec![ImageWarning::UnsupportedFormat]);
    }

    #[test]
    fn size_limit_is_exclusive() {
        assert!(!exceeds_recommended_size(5 * MB as u64, 5));
        assert!(exceeds_recommended_size(5 * MB as u64 + 1, 5));
    }

    #[test]
    fn format_names() {
        assert_eq!(format_name("image/png"), "PNG");
        assert_eq!(format_name("image/webp"), "WebP");
        assert_eq!(format_name("image/tiff"), "Unknown");
        assert!(is_supported_mime("image/bmp"));
        assert!(!is_supported_mime("image/svg+xml"));
    }

    #[test]
    fn messages_mention_limits() {
        assert!(ImageWarning::LargeFile.to_string().contains("5MB"));
        assert!(ImageWarning::AnimatedGif.to_string().contains("first frame"));
    }
}
