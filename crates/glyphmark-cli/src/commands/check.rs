//! Check command implementation
//!
//! Runs the markup through tokenizing and interpretation without drawing
//! anything, and reports the first problem with a caret under it.

use crate::cli::CheckArgs;
use crate::commands::explain;
use crate::input::read_markup;
use anyhow::Result;
use glyphmark::measure_none::NoneMeasurer;
use glyphmark::{LayoutParams, Pipeline, TextStyle};

pub fn run(args: &CheckArgs) -> Result<()> {
    let markup = read_markup(&args.input)?;

    let pipeline = Pipeline::builder()
        .measurer(NoneMeasurer::new())
        .allow_unclosed(args.input.allow_unclosed)
        .build()?;
    let text = pipeline
        .layout(&markup, &TextStyle::default(), &LayoutParams::default())
        .map_err(|err| explain(err, &markup))?;

    println!(
        "✓ Markup is valid: {} characters on {} lines",
        text.char_count(),
        text.lines().len()
    );
    Ok(())
}
