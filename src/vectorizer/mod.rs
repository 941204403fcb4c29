use std::sync::Arc;

use crate::PixtraceResult;
use crate::config::TraceConfiguration;
use crate::pixel::PixelGrid;

/// A tracing engine that turns a pixel grid into SVG markup.
///
/// The orchestration code only talks to this trait, so engines can be
/// swapped or mocked.
pub trait Vectorizer {
    fn vectorize(&self, grid: &PixelGrid, config: &TraceConfiguration) -> PixtraceResult<String>;
}

impl<V: Vectorizer + ?Sized> Vectorizer for &V {
    fn vectorize(&self, grid: &PixelGrid, config: &TraceConfiguration) -> PixtraceResult<String> {
        (**self).vectorize(grid, config)
    }
}

impl<V: Vectorizer + ?Sized> Vectorizer for Box<V> {
    fn vectorize(&self, grid: &PixelGrid, config: &TraceConfiguration) -> PixtraceResult<String> {
        (**self).vectorize(grid, config)
    }
}

impl<V: Vectorizer + ?Sized> Vectorizer for Arc<V> {
    fn vectorize(&self, grid: &PixelGrid, config: &TraceConfiguration) -> PixtraceResult<String> {
        (**self).vectorize(grid, config)
    }
}

#[cfg(feature = "vectorizer-vtracer")]
pub mod vtracer;
