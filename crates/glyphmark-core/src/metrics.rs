//! Glyph widths and line heights, measured once and remembered
//!
//! Two caches sit in front of the [`Measurer`]:
//!
//! - **Width**: reconfiguring a measurement context is the expensive part,
//!   so the provider remembers which style it configured last and skips
//!   the reconfiguration while the same style instance keeps asking.
//! - **Height**: keyed by [`FontDescriptor::height_key`] (size + family).
//!   The style's line-spacing multiplier is applied after the lookup, so
//!   changing only line spacing never triggers a new measurement.
//!
//! Both caches belong to one provider instance, not to the process.

use crate::cache::{BoundedCache, CacheMetrics};
use crate::metrics_config::MetricsConfig;
use crate::style::{FontDescriptor, StyleId, TextStyle};
use crate::traits::Measurer;

/// Counters describing how much work the measurer actually did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsStats {
    /// Times the measurer was pointed at a new font
    pub reconfigurations: u64,
    /// Width queries answered
    pub width_queries: u64,
    /// Times the measurer was asked for a line height
    pub height_measurements: u64,
    pub height_cache: CacheMetrics,
}

/// Answers width and height queries for styled characters
pub struct MetricsProvider {
    measurer: Box<dyn Measurer>,
    config: MetricsConfig,
    last_style: Option<StyleId>,
    heights: BoundedCache<String, f32>,
    reconfigurations: u64,
    width_queries: u64,
    height_measurements: u64,
}

impl MetricsProvider {
    /// Wrap a measurer, configured from the environment
    pub fn new(measurer: impl Measurer + 'static) -> Self {
        Self::with_config(measurer, MetricsConfig::from_env())
    }

    pub fn with_config(measurer: impl Measurer + 'static, config: MetricsConfig) -> Self {
        log::debug!(
            "MetricsProvider: {} measurer, height cache {}, reuse last style {}",
            measurer.name(),
            config.height_cache_capacity,
            config.reuse_last_style
        );
        Self {
            measurer: Box::new(measurer),
            config,
            last_style: None,
            heights: BoundedCache::new(config.height_cache_capacity),
            reconfigurations: 0,
            width_queries: 0,
            height_measurements: 0,
        }
    }

    pub fn measurer_name(&self) -> &'static str {
        self.measurer.name()
    }

    pub fn config(&self) -> MetricsConfig {
        self.config
    }

    /// Advance width of `ch` in `style`
    pub fn width(&mut self, style: &TextStyle, ch: char) -> f32 {
        self.width_queries += 1;
        let cached = self.config.reuse_last_style && self.last_style == Some(style.id());
        if !cached {
            self.measurer.configure(&style.font());
            self.last_style = Some(style.id());
            self.reconfigurations += 1;
        }
        self.measurer.measure_char(ch)
    }

    /// Line height of `style`, line spacing included
    pub fn height(&mut self, style: &TextStyle) -> f32 {
        self.base_height(&style.font()) * style.line_spacing
    }

    /// Line height of a font before any line-spacing multiplier
    pub fn base_height(&mut self, font: &FontDescriptor) -> f32 {
        let key = font.height_key();
        if let Some(height) = self.heights.get(&key) {
            return height;
        }

        let height = self.measurer.line_height(font.size, &font.family);
        self.height_measurements += 1;
        log::debug!("MetricsProvider: measured line height {} for {}", height, key);
        self.heights.insert(key, height);
        height
    }

    /// Forget every cached measurement
    ///
    /// Call this when the measurer's fonts change underneath it.
    pub fn clear(&mut self) {
        self.last_style = None;
        self.heights.clear();
    }

    pub fn stats(&self) -> MetricsStats {
        MetricsStats {
            reconfigurations: self.reconfigurations,
            width_queries: self.width_queries,
            height_measurements: self.height_measurements,
            height_cache: self.heights.metrics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counters {
        configure: AtomicUsize,
        line_height: AtomicUsize,
    }

    struct CountingMeasurer {
        counters: Arc<Counters>,
        size: f32,
    }

    impl Measurer for CountingMeasurer {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn configure(&mut self, font: &FontDescriptor) {
            self.counters.configure.fetch_add(1, Ordering::SeqCst);
            self.size = font.size;
        }

        fn measure_char(&mut self, _ch: char) -> f32 {
            self.size / 2.0
        }

        fn line_height(&mut self, size: f32, _family: &str) -> f32 {
            self.counters.line_height.fetch_add(1, Ordering::SeqCst);
            size * 1.25
        }
    }

    fn provider(config: MetricsConfig) -> (MetricsProvider, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let measurer = CountingMeasurer {
            counters: counters.clone(),
            size: 0.0,
        };
        (MetricsProvider::with_config(measurer, config), counters)
    }

    #[test]
    fn reconfigures_once_per_consecutive_style() {
        let (mut metrics, counters) = provider(MetricsConfig::default());
        let plain = TextStyle::with_font("serif", 10.0);
        let bold = plain.derive(|p| p.bold = true);

        for ch in "abc".chars() {
            assert_eq!(metrics.width(&plain, ch), 5.0);
        }
        for ch in "de".chars() {
            metrics.width(&bold, ch);
        }
        metrics.width(&plain, 'f');

        assert_eq!(counters.configure.load(Ordering::SeqCst), 3);
        assert_eq!(metrics.stats().reconfigurations, 3);
        assert_eq!(metrics.stats().width_queries, 6);
    }

    #[test]
    fn equal_but_distinct_styles_still_reconfigure() {
        let (mut metrics, counters) = provider(MetricsConfig::default());
        let a = TextStyle::with_font("serif", 10.0);
        let b = a.derive(|_| {});

        metrics.width(&a, 'x');
        metrics.width(&b, 'x');
        assert_eq!(counters.configure.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn widths_are_identical_without_the_style_cache() {
        let config = MetricsConfig {
            reuse_last_style: false,
            ..MetricsConfig::default()
        };
        let (mut uncached, counters) = provider(config);
        let (mut cached, _) = provider(MetricsConfig::default());
        let style = TextStyle::with_font("serif", 12.0);

        for ch in "hello".chars() {
            assert_eq!(uncached.width(&style, ch), cached.width(&style, ch));
        }
        assert_eq!(counters.configure.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn line_spacing_does_not_remeasure() {
        let (mut metrics, counters) = provider(MetricsConfig::default());
        let base = TextStyle::with_font("serif", 20.0);
        let loose = base.derive(|p| p.line_spacing = 2.0);

        assert_eq!(metrics.height(&base), 25.0);
        assert_eq!(metrics.height(&loose), 50.0);
        assert_eq!(counters.line_height.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn height_key_ignores_weight_and_slant() {
        let (mut metrics, counters) = provider(MetricsConfig::default());
        let base = TextStyle::with_font("serif", 20.0);
        let bold_italic = base.derive(|p| {
            p.bold = true;
            p.italic = true;
            p.stroke_width = 3.0;
        });
        let bigger = base.derive(|p| p.font_size = 30.0);

        metrics.height(&base);
        metrics.height(&bold_italic);
        assert_eq!(counters.line_height.load(Ordering::SeqCst), 1);

        metrics.height(&bigger);
        assert_eq!(counters.line_height.load(Ordering::SeqCst), 2);
        assert_eq!(metrics.stats().height_cache.hits, 1);
    }

    #[test]
    fn clear_forces_fresh_measurements() {
        let (mut metrics, counters) = provider(MetricsConfig::default());
        let style = TextStyle::with_font("serif", 20.0);

        metrics.width(&style, 'a');
        metrics.height(&style);
        metrics.clear();
        metrics.width(&style, 'a');
        metrics.height(&style);

        assert_eq!(counters.configure.load(Ordering::SeqCst), 2);
        assert_eq!(counters.line_height.load(Ordering::SeqCst), 2);
    }
}
