//! The engine that drives markup through tokenize, interpret, quote,
//! align and render

// this_file: crates/glyphmark/src/pipeline.rs

use glyphmark_core::error::{GlyphmarkError, Result};
use glyphmark_core::types::Alignment;
use glyphmark_core::{Measurer, MetricsConfig, MetricsProvider, MetricsStats, Surface, TextStyle};
use glyphmark_layout::RenderStats;
use glyphmark_markup::{CommandRegistry, InterpretOptions, Interpreter};
use parking_lot::Mutex;

use crate::text::TextRenderer;

/// Where and how a block of text is laid out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub alignment: Alignment,
    pub x_start: f32,
    pub x_end: f32,
    pub y_start: f32,
    /// Wrap the visible text in straight double quotes before aligning
    pub quote: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            x_start: 0.0,
            x_end: 0.0,
            y_start: 0.0,
            quote: false,
        }
    }
}

impl LayoutParams {
    /// Lines placed in a box `width` wide starting at the origin
    pub fn boxed(alignment: Alignment, width: f32) -> Self {
        Self {
            alignment,
            x_end: width,
            ..Self::default()
        }
    }
}

/// Markup in, positioned items and draw calls out
///
/// The pipeline owns one [`MetricsProvider`] behind a mutex, so its
/// caches survive across calls and a pipeline can be shared between
/// threads. Each call holds the lock while it interprets and quotes.
///
/// ```
/// use glyphmark::prelude::*;
/// use glyphmark::measure_none::NoneMeasurer;
/// use glyphmark::render_json::JsonSurface;
///
/// let pipeline = Pipeline::builder().measurer(NoneMeasurer::new()).build()?;
/// let mut surface = JsonSurface::new();
/// let (text, stats) = pipeline.process(
///     "Hel<b>lo</b>",
///     &TextStyle::default(),
///     &LayoutParams::boxed(Alignment::Center, 300.0),
///     &mut surface,
/// )?;
/// assert_eq!(stats.fills, 5);
/// assert!(text.bounds().is_some());
/// # Ok::<(), glyphmark::error::GlyphmarkError>(())
/// ```
pub struct Pipeline {
    metrics: Mutex<MetricsProvider>,
    registry: Option<CommandRegistry>,
    options: InterpretOptions,
}

impl Pipeline {
    /// Start building a new pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    fn registry(&self) -> &CommandRegistry {
        match self.registry {
            Some(ref registry) => registry,
            None => CommandRegistry::global(),
        }
    }

    pub fn measurer_name(&self) -> &'static str {
        self.metrics.lock().measurer_name()
    }

    pub fn commands(&self) -> Vec<&str> {
        self.registry().names()
    }

    /// Interpret, optionally quote, and align `markup`
    pub fn layout(&self, markup: &str, base: &TextStyle, params: &LayoutParams) -> Result<TextRenderer> {
        let interpreter = Interpreter::new(self.registry()).with_options(self.options);

        let mut text = {
            let mut metrics = self.metrics.lock();
            let mut text = TextRenderer::parse_with(&interpreter, markup, base, &mut metrics)?;
            if params.quote {
                text.quote(&mut metrics);
            }
            text
        };

        text.align(params.alignment, params.x_start, params.x_end, params.y_start);
        log::debug!(
            "Pipeline: {} chars in {} lines via {}",
            text.char_count(),
            text.lines().len(),
            self.measurer_name()
        );
        Ok(text)
    }

    /// Lay out `markup` and draw it onto `surface`
    pub fn process<S: Surface + ?Sized>(
        &self,
        markup: &str,
        base: &TextStyle,
        params: &LayoutParams,
        surface: &mut S,
    ) -> Result<(TextRenderer, RenderStats)> {
        let text = self.layout(markup, base, params)?;
        let stats = text.render(surface);
        Ok((text, stats))
    }

    /// Counters of the shared metrics provider
    pub fn metrics_stats(&self) -> MetricsStats {
        self.metrics.lock().stats()
    }

    /// Forget cached widths and heights
    pub fn clear_caches(&self) {
        self.metrics.lock().clear();
    }
}

/// Builder for [`Pipeline`]
///
/// ```ignore
/// let pipeline = Pipeline::builder()
///     .measurer(NoneMeasurer::new())
///     .allow_unclosed(true)
///     .build()?;
/// ```
pub struct PipelineBuilder {
    measurer: Option<Box<dyn Measurer>>,
    registry: Option<CommandRegistry>,
    options: InterpretOptions,
    metrics_config: Option<MetricsConfig>,
}

impl PipelineBuilder {
    /// Start with a clean slate
    pub fn new() -> Self {
        Self {
            measurer: None,
            registry: None,
            options: InterpretOptions::default(),
            metrics_config: None,
        }
    }

    /// Choose who measures characters and lines
    pub fn measurer(mut self, measurer: impl Measurer + 'static) -> Self {
        self.measurer = Some(Box::new(measurer));
        self
    }

    /// Use these commands instead of the built-in set
    pub fn registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Accept markup that ends with open tags (default: rejected)
    pub fn allow_unclosed(mut self, allow: bool) -> Self {
        self.options.allow_unclosed = allow;
        self
    }

    /// Cache settings; defaults to [`MetricsConfig::from_env`]
    pub fn metrics_config(mut self, config: MetricsConfig) -> Self {
        self.metrics_config = Some(config);
        self
    }

    /// Create the pipeline, ready to run
    pub fn build(self) -> Result<Pipeline> {
        let measurer = self
            .measurer
            .ok_or_else(|| GlyphmarkError::ConfigError("No measurer configured".into()))?;
        let config = self.metrics_config.unwrap_or_else(MetricsConfig::from_env);

        Ok(Pipeline {
            metrics: Mutex::new(MetricsProvider::with_config(measurer, config)),
            registry: self.registry,
            options: self.options,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
