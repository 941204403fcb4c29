pub mod blur;
pub mod config;
pub mod decode;
pub mod error;
pub mod gif;
pub mod markup;
pub mod optimize;
pub mod palette;
pub mod pixel;
pub mod preset;
pub mod stats;
pub mod trace;
pub mod vectorizer;
pub mod warnings;

pub use config::{CUSTOM_PRESET, TraceConfiguration, TraceOptions};
pub use decode::{ImageFile, decode_image};
pub use error::{PixtraceError, PixtraceResult};
pub use gif::is_animated_gif;
pub use optimize::optimize_svg;
pub use pixel::PixelGrid;
pub use preset::{preset, preset_names};
pub use stats::{SvgStats, extract_svg_stats};
#[cfg(feature = "async")]
pub use trace::trace_image_async;
pub use trace::{VectorDocument, trace_image};
pub use vectorizer::Vectorizer;
#[cfg(feature = "vectorizer-vtracer")]
pub use vectorizer::vtracer::{VtracerVectorizer, trace_to_svg_string};
pub use warnings::{ImageWarning, format_name, image_warnings};

use std::path::Path;
use std::sync::Arc;

/// Shared handle to the engine used for tracing.
pub type SharedVectorizer = Arc<dyn Vectorizer + Send + Sync>;

/// Entry point for configuring and running image conversions.
#[derive(Clone)]
pub struct Pixtrace {
    vectorizer: SharedVectorizer,
    /// Used when a trace is requested without explicit options.
    default_options: TraceOptions,
}

impl Pixtrace {
    pub fn new(vectorizer: SharedVectorizer) -> Self {
        Self {
            vectorizer,
            default_options: TraceOptions::default(),
        }
    }

    /// Set the options used when none are passed to [`DecodedImage::trace`].
    pub fn with_default_options(mut self, options: TraceOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Get a reference to the default trace options.
    pub fn default_options(&self) -> &TraceOptions {
        &self.default_options
    }

    /// Read and decode an image file from disk.
    pub fn open(&self, path: impl AsRef<Path>) -> PixtraceResult<DecodedImage> {
        self.for_file(ImageFile::open(path)?)
    }

    /// Decode an in-memory image file, collecting its warnings along the way.
    pub fn for_file(&self, file: ImageFile) -> PixtraceResult<DecodedImage> {
        let warnings = image_warnings(&file);
        let grid = decode_image(&file)?;
        Ok(DecodedImage {
            mime: file.mime().to_string(),
            file_len: file.len(),
            grid: Arc::new(grid),
            warnings,
            vectorizer: Arc::clone(&self.vectorizer),
            default_options: self.default_options.clone(),
        })
    }
}

#[cfg(feature = "vectorizer-vtracer")]
impl Default for Pixtrace {
    fn default() -> Self {
        Self::new(Arc::new(VtracerVectorizer))
    }
}

impl std::fmt::Debug for Pixtrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixtrace")
            .field("default_options", &self.default_options)
            .finish_non_exhaustive()
    }
}

/// A decoded image ready to be traced, from which any number of SVGs can be derived.
#[derive(Clone)]
pub struct DecodedImage {
    mime: String,
    file_len: u64,
    grid: Arc<PixelGrid>,
    warnings: Vec<ImageWarning>,
    vectorizer: SharedVectorizer,
    default_options: TraceOptions,
}

impl DecodedImage {
    /// Get a reference to the decoded pixels.
    pub fn pixels(&self) -> &PixelGrid {
        self.grid.as_ref()
    }

    /// The declared MIME type of the source file.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Display name of the source format.
    pub fn format_name(&self) -> &'static str {
        format_name(&self.mime)
    }

    /// Size of the source file in bytes.
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    pub fn warnings(&self) -> &[ImageWarning] {
        &self.warnings
    }

    /// Whether the source holds more than one frame; only the first is traced.
    pub fn is_animated(&self) -> bool {
        self.warnings.contains(&ImageWarning::AnimatedGif)
    }

    /// Trace the image with the given options, or the defaults when `None`.
    pub fn trace(&self, options: Option<&TraceOptions>) -> PixtraceResult<VectorDocument> {
        let options = options.unwrap_or(&self.default_options);
        trace_image(self.grid.as_ref(), options, &self.vectorizer)
    }

    /// Trace the image with a different vectorizer.
    pub fn trace_with<V>(&self, vectorizer: &V, options: &TraceOptions) -> PixtraceResult<VectorDocument>
    where
        V: Vectorizer + ?Sized,
    {
        trace_image(self.grid.as_ref(), options, vectorizer)
    }
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("mime", &self.mime)
            .field("file_len", &self.file_len)
            .field("dimensions", &self.grid.dimensions())
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}
