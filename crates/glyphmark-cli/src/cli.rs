//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand, ValueEnum};
use glyphmark::types::Alignment;
use std::path::PathBuf;

/// Glyphmark - lay out and render rich-text markup from the command line
#[derive(Parser, Debug)]
#[command(name = "glyphmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log pipeline decisions (same as RUST_LOG=debug)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display the built-in commands, alignments and output formats
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Lay out markup and write it as SVG or JSON draw calls
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Validate markup and point at the first problem
    #[command(alias = "c")]
    Check(CheckArgs),
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// List markup commands
    #[arg(long)]
    pub commands: bool,

    /// List alignment modes
    #[arg(long)]
    pub alignments: bool,

    /// List output formats
    #[arg(long)]
    pub formats: bool,
}

/// Where the markup comes from
#[derive(Parser, Debug, Default)]
pub struct InputArgs {
    /// Markup to process (reads from stdin if omitted)
    pub text: Option<String>,

    /// Markup (alternative to positional argument)
    #[arg(short = 't', long = "text", conflicts_with = "text_file")]
    pub text_arg: Option<String>,

    /// Read markup from file
    #[arg(short = 'T', long = "text-file", conflicts_with = "text_arg")]
    pub text_file: Option<PathBuf>,

    /// Accept markup that ends with tags still open
    #[arg(long = "allow-unclosed")]
    pub allow_unclosed: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    // Font Options
    /// Font file used to measure every family (.ttf, .otf, .ttc)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// Base font family
    #[arg(short = 'F', long = "font-family", default_value = "sans-serif")]
    pub font_family: String,

    /// Base font size in pixels
    #[arg(short = 's', long = "font-size", default_value = "24")]
    pub font_size: f32,

    // Color Options
    /// Base text color (#rgb, #rrggbb, #rrggbbaa or a CSS name)
    #[arg(short = 'c', long = "color", default_value = "#000000")]
    pub color: String,

    /// Base outline as <width>[,<color>], e.g. 2,#ffffff
    #[arg(long = "stroke")]
    pub stroke: Option<String>,

    // Layout Options
    /// Line alignment
    #[arg(short = 'a', long = "align", default_value = "left")]
    pub align: AlignArg,

    /// Width of the layout box in pixels
    #[arg(short = 'W', long = "width", default_value = "800")]
    pub width: f32,

    /// Top of the first line
    #[arg(long = "y-start", default_value = "0")]
    pub y_start: f32,

    /// Wrap the visible text in quotation marks
    #[arg(long = "quote")]
    pub quote: bool,

    /// Margin around the SVG canvas in pixels
    #[arg(short = 'm', long = "margin", default_value = "10")]
    pub margin: f32,

    // Output Options
    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'O', long = "format", default_value = "svg")]
    pub format: OutputFormat,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Alignment as accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for Alignment {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Left => Alignment::Left,
            AlignArg::Center => Alignment::Center,
            AlignArg::Right => Alignment::Right,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SVG document, one <text> element per character
    Svg,
    /// Recorded draw calls as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}
