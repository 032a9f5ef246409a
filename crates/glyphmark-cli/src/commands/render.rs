//! Render command implementation
//!
//! Lays markup out in a box and writes it as an SVG document or as the
//! recorded draw calls in JSON.

use crate::cli::{OutputFormat, RenderArgs};
use crate::commands::explain;
use crate::input::read_markup;
use anyhow::{anyhow, Context, Result};
use glyphmark::measure_font::{FontFile, FontMeasurer};
use glyphmark::measure_none::NoneMeasurer;
use glyphmark::render_json::JsonSurface;
use glyphmark::render_svg::SvgSurface;
use glyphmark::types::Rect;
use glyphmark::{Color, CommandRegistry, LayoutParams, Pipeline, PipelineBuilder, TextStyle};
use std::fs::File;
use std::io::{self, Write};
use std::str::FromStr;

pub fn run(args: &RenderArgs) -> Result<()> {
    // 1. Get input markup
    let markup = read_markup(&args.input)?;

    if !args.quiet {
        eprintln!("Glyphmark v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Rendering markup...");
    }

    // 2. Base style and layout box
    let base = base_style(args)?;
    let params = LayoutParams {
        alignment: args.align.into(),
        x_start: 0.0,
        x_end: args.width,
        y_start: args.y_start,
        quote: args.quote,
    };

    // 3. Pick the measurer
    let pipeline = build_pipeline(args)?;
    log::info!("Measuring with {}", pipeline.measurer_name());

    // 4. Lay out, draw and encode
    let output = match args.format {
        OutputFormat::Svg => {
            let mut surface = SvgSurface::new().with_padding(args.margin);
            let (text, stats) = pipeline
                .process(&markup, &base, &params, &mut surface)
                .map_err(|err| explain(err, &markup))?;
            log::debug!("{stats:?}");
            let layout_box = Rect {
                x: 0.0,
                y: 0.0,
                width: args.width,
                height: 0.0,
            };
            // Lines wider than the box overflow it; keep them on the canvas
            let area = text
                .bounds()
                .map_or(layout_box, |rect| layout_box.union(&rect));
            surface.finish_area(area)?
        },
        OutputFormat::Json => {
            let mut surface = JsonSurface::new();
            let (text, stats) = pipeline
                .process(&markup, &base, &params, &mut surface)
                .map_err(|err| explain(err, &markup))?;
            log::debug!("{stats:?}");
            surface.to_json(text.bounds())?
        },
    };

    // 5. Write output
    write_output(args, output.as_bytes())?;

    if !args.quiet {
        if let Some(ref path) = args.output_file {
            eprintln!("✓ Successfully rendered to {}", path.display());
        } else {
            eprintln!("✓ Successfully rendered to stdout");
        }
        eprintln!("  Format: {}", args.format.as_str().to_uppercase());
        eprintln!("  Size: {} bytes", output.len());
    }

    Ok(())
}

fn build_pipeline(args: &RenderArgs) -> Result<Pipeline> {
    let builder = PipelineBuilder::new().allow_unclosed(args.input.allow_unclosed);

    let builder = match args.font_file {
        Some(ref path) => {
            let font = FontFile::from_file_index(path, args.face_index)
                .with_context(|| format!("Failed to load font {}", path.display()))?;
            builder.measurer(FontMeasurer::with_default(font))
        },
        None => builder.measurer(NoneMeasurer::new()),
    };

    Ok(builder.build()?)
}

/// The style the markup starts from, built from the command-line options
pub fn base_style(args: &RenderArgs) -> Result<TextStyle> {
    if !(args.font_size.is_finite() && args.font_size > 0.0) {
        return Err(anyhow!("Font size must be positive, got {}", args.font_size));
    }
    let fill = Color::from_str(&args.color).context("Invalid --color")?;

    let style = TextStyle::with_font(args.font_family.clone(), args.font_size).derive(|p| {
        p.fill = fill;
    });

    match args.stroke {
        Some(ref stroke) => apply_stroke(&style, stroke),
        None => Ok(style),
    }
}

/// `--stroke` takes the same argument as the `<stroke=…>` tag
fn apply_stroke(style: &TextStyle, arg: &str) -> Result<TextStyle> {
    let transform = CommandRegistry::global()
        .get("stroke")
        .ok_or_else(|| anyhow!("stroke command is not available"))?;
    transform(style, Some(arg)).with_context(|| format!("Invalid --stroke {arg:?}"))
}

fn write_output(args: &RenderArgs, data: &[u8]) -> Result<()> {
    if let Some(ref path) = args.output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        file.write_all(data)?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn render_args(extra: &[&str]) -> RenderArgs {
        let mut argv = vec!["glyphmark", "render"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Render(args) => *args,
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn test_base_style_from_options() {
        let args = render_args(&["-F", "serif", "-s", "30", "-c", "red", "x"]);
        let style = base_style(&args).unwrap();
        assert_eq!(style.font_family, "serif");
        assert_eq!(style.font_size, 30.0);
        assert_eq!(style.fill, Color::rgb(255, 0, 0));
        assert!(!style.has_stroke());
    }

    #[test]
    fn test_stroke_option() {
        let args = render_args(&["--stroke", "2,white", "x"]);
        let style = base_style(&args).unwrap();
        assert_eq!(style.stroke_width, 2.0);
        assert_eq!(style.stroke_color, Some(Color::white()));
    }

    #[test]
    fn test_bad_options_are_rejected() {
        assert!(base_style(&render_args(&["-c", "nope", "x"])).is_err());
        assert!(base_style(&render_args(&["-s", "0", "x"])).is_err());
        assert!(base_style(&render_args(&["--stroke=-1", "x"])).is_err());
    }

    #[test]
    fn test_missing_font_file_is_reported() {
        let args = render_args(&["-f", "/no/such/font.ttf", "x"]);
        let err = build_pipeline(&args).err().unwrap();
        assert!(format!("{err:#}").contains("/no/such/font.ttf"));
    }
}
