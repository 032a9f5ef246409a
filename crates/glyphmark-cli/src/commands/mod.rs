//! Command implementations

pub mod check;
pub mod info;
pub mod render;

use glyphmark::error::GlyphmarkError;

/// Turn a pipeline error into a CLI error, pointing at the markup when
/// the markup itself is at fault
pub(crate) fn explain(err: GlyphmarkError, source: &str) -> anyhow::Error {
    match err {
        GlyphmarkError::Markup(markup) => anyhow::anyhow!("{}", markup.diagnostic(source)),
        other => other.into(),
    }
}
