//! End-to-end behavior of the glyphmark pipeline

use glyphmark::measure_none::NoneMeasurer;
use glyphmark::prelude::*;
use glyphmark::render_json::{DrawCommand, JsonSurface};
use glyphmark::render_svg::SvgSurface;
use glyphmark::{MetricsConfig, RenderStats};

fn pipeline() -> Pipeline {
    Pipeline::builder()
        .measurer(NoneMeasurer::new())
        .metrics_config(MetricsConfig::default())
        .build()
        .unwrap()
}

fn base() -> TextStyle {
    TextStyle::with_font("sans-serif", 20.0)
}

#[test]
fn test_hello_world() {
    let text = pipeline()
        .layout("Hel<b>lo</b>\nWorld", &base(), &LayoutParams::boxed(Alignment::Left, 500.0))
        .unwrap();

    assert_eq!(text.char_count(), 10);
    let items = text.items();
    assert!(items[5].is_newline());

    let bold: Vec<usize> = items
        .iter()
        .filter_map(RenderItem::as_char)
        .enumerate()
        .filter(|(_, c)| c.style.bold)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(bold, vec![3, 4]);

    // Second line starts at the left edge, one line height down
    assert_eq!(items[6].x(), 0.0);
    assert_eq!(items[6].y(), 25.0);
}

#[test]
fn test_line_spacing_only_does_not_remeasure() {
    let pipeline = pipeline();
    pipeline
        .layout("a<leading=2>b</leading><leading=3>c</leading>", &base(), &LayoutParams::default())
        .unwrap();
    assert_eq!(pipeline.metrics_stats().height_measurements, 1);

    let text = pipeline
        .layout("a<leading=2>b\n</leading>c", &base(), &LayoutParams::default())
        .unwrap();
    assert_eq!(text.items()[2].height(), 50.0);
    assert_eq!(text.lines()[0].height, 50.0);
}

#[test]
fn test_reconfigurations_follow_style_runs() {
    let pipeline = pipeline();
    pipeline
        .layout("ab<i>cd<b>ef</b></i>gh", &base(), &LayoutParams::default())
        .unwrap();
    // ab, cd, ef and gh each switch the measurer once
    assert_eq!(pipeline.metrics_stats().reconfigurations, 4);
}

#[test]
fn test_markup_errors_come_back_with_positions() {
    let source = "ok\n<b><i>x</b></i>";
    let err = pipeline()
        .layout(source, &base(), &LayoutParams::default())
        .unwrap_err();

    let markup = match err {
        GlyphmarkError::Markup(markup) => markup,
        other => panic!("expected a markup error, got {other:?}"),
    };
    assert!(matches!(markup, MarkupError::MismatchedClose { .. }));
    assert_eq!(markup.position(), 10);
    let diagnostic = markup.diagnostic(source);
    assert!(diagnostic.starts_with("line 2, column 8"));
    assert!(diagnostic.ends_with("^"));
}

#[test]
fn test_json_replay_matches_layout() {
    let mut surface = JsonSurface::new();
    let (text, stats) = pipeline()
        .process(
            "<color=red>a</color>b",
            &base(),
            &LayoutParams::boxed(Alignment::Right, 100.0),
            &mut surface,
        )
        .unwrap();

    assert_eq!(
        stats,
        RenderStats {
            style_changes: 2,
            strokes: 0,
            fills: 2,
            rules: 0
        }
    );
    let fills: Vec<(char, f32)> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Fill { ch, x, .. } => Some((*ch, *x)),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![('a', 80.0), ('b', 90.0)]);
    assert!(surface.to_json(text.bounds()).unwrap().contains("#ff0000"));
}

#[test]
fn test_svg_document() {
    let mut surface = SvgSurface::new();
    let (text, _) = pipeline()
        .process(
            "<u>Tom & Jerry</u>",
            &base(),
            &LayoutParams::boxed(Alignment::Center, 300.0),
            &mut surface,
        )
        .unwrap();
    let rect = text.bounds().unwrap();
    let svg = surface.finish(300.0, rect.bottom()).unwrap();
    assert!(svg.contains("&amp;"));
    assert_eq!(svg.matches("<rect").count(), text.char_count());
}

#[test]
fn test_realigning_gives_the_same_positions() {
    let pipeline = pipeline();
    let mut text = pipeline
        .layout(
            "<spacing=3>spaced</spacing> out",
            &base(),
            &LayoutParams::boxed(Alignment::Center, 200.0),
        )
        .unwrap();
    let first: Vec<(f32, f32)> = text.items().iter().map(|i| (i.x(), i.width())).collect();

    text.align(Alignment::Right, 0.0, 200.0, 0.0);
    text.align(Alignment::Center, 0.0, 200.0, 0.0);
    let again: Vec<(f32, f32)> = text.items().iter().map(|i| (i.x(), i.width())).collect();
    assert_eq!(first, again);
}
