//! Error types for glyphmark

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlyphmarkError>;

/// Main error type for glyphmark
#[derive(Debug, Error)]
pub enum GlyphmarkError {
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    #[error("Measurement failed: {0}")]
    Measure(#[from] MeasureError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Markup that could not be tokenized or interpreted
///
/// Every variant carries the character offset (not byte offset) of the
/// construct that failed, counted from the start of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("syntax error at {position}: {message}")]
    Syntax { message: String, position: usize },

    #[error("unknown command <{name}> at {position}")]
    UnknownCommand { name: String, position: usize },

    #[error("closing </{name}> at {position} has no open tag")]
    UnmatchedClose { name: String, position: usize },

    #[error("closing </{closed}> at {position} does not match <{expected}> opened at {open_position}")]
    MismatchedClose {
        closed: String,
        expected: String,
        open_position: usize,
        position: usize,
    },

    #[error("<{name}> opened at {position} is never closed")]
    UnclosedTag { name: String, position: usize },

    #[error("invalid argument for <{name}> at {position}: {reason}")]
    InvalidArgument {
        name: String,
        argument: Option<String>,
        reason: String,
        position: usize,
    },
}

impl MarkupError {
    /// Character offset the error points at
    pub fn position(&self) -> usize {
        match self {
            Self::Syntax { position, .. }
            | Self::UnknownCommand { position, .. }
            | Self::UnmatchedClose { position, .. }
            | Self::MismatchedClose { position, .. }
            | Self::UnclosedTag { position, .. }
            | Self::InvalidArgument { position, .. } => *position,
        }
    }

    /// Human-readable report: message, offending source line, caret
    ///
    /// ```text
    /// line 1, column 6: closing </i> at 5 has no open tag
    ///   Hello</i>
    ///        ^
    /// ```
    pub fn diagnostic(&self, source: &str) -> String {
        let position = self.position();
        let mut line_no = 1;
        let mut line_start = 0;
        let mut chars = source.chars().enumerate().peekable();

        // `\n`, `\r\n` and a lone `\r` each end a line
        while let Some((index, ch)) = chars.next() {
            if index >= position {
                break;
            }
            let end = match ch {
                '\r' if matches!(chars.peek(), Some((_, '\n'))) => match chars.next() {
                    Some((lf, _)) if lf < position => lf,
                    _ => break,
                },
                '\r' | '\n' => index,
                _ => continue,
            };
            line_no += 1;
            line_start = end + 1;
        }

        let line: String = source
            .chars()
            .skip(line_start)
            .take_while(|&c| c != '\n' && c != '\r')
            .collect();
        let column = position - line_start;

        format!(
            "line {}, column {}: {}\n  {}\n  {}^",
            line_no,
            column + 1,
            self,
            line,
            " ".repeat(column)
        )
    }
}

/// Returned by a style transform that cannot use its argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ArgumentError(pub String);

impl ArgumentError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Measurement backend errors
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("No font registered for family: {0}")]
    UnknownFamily(String),
}

/// Drawing surface errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
