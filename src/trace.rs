use crate::PixtraceResult;
use crate::config::TraceOptions;
use crate::optimize::optimize_svg;
use crate::pixel::PixelGrid;
use crate::stats::{SvgStats, extract_svg_stats};
use crate::vectorizer::Vectorizer;

/// SVG markup produced by a trace, with its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    markup: String,
    stats: SvgStats,
}

impl VectorDocument {
    /// Wrap markup, computing its statistics against the source dimensions.
    pub fn new(markup: String, width: u32, height: u32) -> Self {
        let stats = extract_svg_stats(&markup, width, height);
        Self { markup, stats }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn stats(&self) -> &SvgStats {
        &self.stats
    }

    /// Consume the document and return the markup.
    pub fn into_markup(self) -> String {
        self.markup
    }

    /// A compacted copy of this document; statistics are recomputed.
    pub fn optimized(&self) -> VectorDocument {
        VectorDocument::new(
            optimize_svg(&self.markup),
            self.stats.width,
            self.stats.height,
        )
    }
}

/// Resolve the options, run the vectorizer and measure its output.
///
/// Vectorizer errors are logged and returned unchanged; nothing is retried.
pub fn trace_image<V>(
    grid: &PixelGrid,
    options: &TraceOptions,
    vectorizer: &V,
) -> PixtraceResult<VectorDocument>
where
    V: Vectorizer + ?Sized,
{
    let config = options.resolve()?;
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        preset = options.preset.as_deref().unwrap_or("custom"),
        "Tracing image"
    );

    let markup = vectorizer
        .vectorize(grid, &config)
        .inspect_err(|err| tracing::error!(error = %err, "Error tracing image"))?;

    let document = VectorDocument::new(markup, grid.width(), grid.height());
    tracing::debug!(
        paths = document.stats.paths,
        nodes = document.stats.nodes,
        size = %document.stats.size,
        "Traced image"
    );
    Ok(document)
}

/// Run [`trace_image`] on tokio's blocking pool.
///
/// Each call owns its grid and options; concurrent calls share nothing but
/// the vectorizer.
#[cfg(feature = "async")]
pub async fn trace_image_async<V>(
    grid: PixelGrid,
    options: TraceOptions,
    vectorizer: std::sync::Arc<V>,
) -> PixtraceResult<VectorDocument>
where
    V: Vectorizer + Send + Sync + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || trace_image(&grid, &options, vectorizer.as_ref()))
        .await
        .map_err(|e| crate::PixtraceError::Trace(format!("trace task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::PixtraceError;
    use crate::config::TraceConfiguration;
    use crate::preset::preset;

    /// Records the configuration it was called with and returns canned markup.
    struct RecordingVectorizer {
        seen: Mutex<Vec<TraceConfiguration>>,
        markup: String,
    }

    impl RecordingVectorizer {
        fn new(markup: &str) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                markup: markup.to_string(),
            }
        }
    }

    impl Vectorizer for RecordingVectorizer {
        fn vectorize(
            &self,
            _grid: &PixelGrid,
            config: &TraceConfiguration,
        ) -> PixtraceResult<String> {
            self.seen.lock().unwrap().push(config.clone());
            Ok(self.markup.clone())
        }
    }

    struct FailingVectorizer;

    impl Vectorizer for FailingVectorizer {
        fn vectorize(&self, _: &PixelGrid, _: &TraceConfiguration) -> PixtraceResult<String> {
            Err(PixtraceError::Trace("engine exploded".to_string()))
        }
    }

    const MARKUP: &str = "<svg width=\"3\" height=\"2\">\n  <path d=\"M0 0 L3 0 Z\"/>\n</svg>\n";

    #[test]
    fn passes_resolved_configuration_to_vectorizer() {
        let vectorizer = RecordingVectorizer::new(MARKUP);
        let options = TraceOptions::default().with_number_of_colors(4);
        trace_image(&PixelGrid::filled(3, 2, [0; 4]), &options, &vectorizer).unwrap();

        let seen = vectorizer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].number_of_colors, 4);
        assert_eq!(seen[0].path_omit, 8);
    }

    #[test]
    fn named_preset_reaches_vectorizer_verbatim() {
        let vectorizer = RecordingVectorizer::new(MARKUP);
        let options = TraceOptions::preset("artistic2").with_path_omit(99);
        trace_image(&PixelGrid::filled(3, 2, [0; 4]), &options, &vectorizer).unwrap();

        assert_eq!(
            &vectorizer.seen.lock().unwrap()[0],
            preset("artistic2").unwrap()
        );
    }

    #[test]
    fn stats_use_grid_dimensions() {
        let vectorizer = RecordingVectorizer::new(MARKUP);
        let doc = trace_image(
            &PixelGrid::filled(3, 2, [0; 4]),
            &TraceOptions::default(),
            &vectorizer,
        )
        .unwrap();

        assert_eq!(doc.markup(), MARKUP);
        let stats = doc.stats();
        assert_eq!((stats.width, stats.height), (3, 2));
        assert_eq!(stats.paths, 1);
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.bytes, MARKUP.len());
    }

    #[test]
    fn vectorizer_errors_propagate() {
        let err = trace_image(
            &PixelGrid::filled(1, 1, [0; 4]),
            &TraceOptions::default(),
            &FailingVectorizer,
        )
        .unwrap_err();
        match err {
            PixtraceError::Trace(msg) => assert_eq!(msg, "engine exploded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_preset_fails_before_tracing() {
        let vectorizer = RecordingVectorizer::new(MARKUP);
        let result = trace_image(
            &PixelGrid::filled(1, 1, [0; 4]),
            &TraceOptions::preset("nope"),
            &vectorizer,
        );
        assert!(matches!(result, Err(PixtraceError::UnknownPreset(_))));
        assert!(vectorizer.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn works_through_trait_objects() {
        let vectorizer: Box<dyn Vectorizer> = Box::new(RecordingVectorizer::new(MARKUP));
        let doc = trace_image(
            &PixelGrid::filled(3, 2, [0; 4]),
            &TraceOptions::default(),
            &vectorizer,
        )
        .unwrap();
        assert_eq!(doc.stats().paths, 1);
    }

    #[test]
    fn optimized_returns_new_document() {
        let vectorizer = RecordingVectorizer::new(MARKUP);
        let doc = trace_image(
            &PixelGrid::filled(3, 2, [0; 4]),
            &TraceOptions::default(),
            &vectorizer,
        )
        .unwrap();

        let optimized = doc.optimized();
        assert_eq!(doc.markup(), MARKUP);
        assert_eq!(
            optimized.markup(),
            "<svg width=\"3\" height=\"2\"><path d=\"M0 0 L3 0 Z\"/></svg>"
        );
        assert_eq!(optimized.stats().paths, doc.stats().paths);
        assert_eq!(optimized.stats().nodes, doc.stats().nodes);
        assert!(optimized.stats().bytes < doc.stats().bytes);
        assert_eq!(optimized.optimized(), optimized);
    }

    #[cfg(feature = "async")]
    mod concurrent {
        use std::sync::Arc;

        use super::*;

        #[tokio::test]
        async fn independent_invocations() {
            let vectorizer = Arc::new(RecordingVectorizer::new(MARKUP));
            let small = trace_image_async(
                PixelGrid::filled(3, 2, [0; 4]),
                TraceOptions::default(),
                Arc::clone(&vectorizer),
            );
            let large = trace_image_async(
                PixelGrid::filled(30, 20, [0; 4]),
                TraceOptions::preset("detailed"),
                Arc::clone(&vectorizer),
            );
            let (small, large) = tokio::join!(small, large);

            assert_eq!(small.unwrap().stats().width, 3);
            assert_eq!(large.unwrap().stats().width, 30);
            assert_eq!(vectorizer.seen.lock().unwrap().len(), 2);
        }

        #[tokio::test]
        async fn errors_propagate() {
            let result = trace_image_async(
                PixelGrid::filled(1, 1, [0; 4]),
                TraceOptions::default(),
                Arc::new(FailingVectorizer),
            )
            .await;
            assert!(matches!(result, Err(PixtraceError::Trace(_))));
        }
    }
}
