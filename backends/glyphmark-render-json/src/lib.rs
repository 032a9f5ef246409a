//! JSON Surface - see exactly what the renderer asked for
//!
//! Records every draw call in order instead of drawing anything. The
//! recording can be inspected directly (tests, golden files) or
//! serialized to JSON for other tools to replay.

use glyphmark_core::error::{RenderError, Result};
use glyphmark_core::types::Rect;
use glyphmark_core::{Surface, TextStyle};
use serde::{Deserialize, Serialize};

/// Schema version for JSON output format
pub const JSON_SCHEMA_VERSION: &str = "1.0";

/// One call made on the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetStyle {
        style: u64,
        /// CSS font shorthand
        font: String,
        fill: String,
        stroke: Option<String>,
        stroke_width: f32,
        alpha: f32,
    },
    Stroke { ch: char, x: f32, y: f32 },
    Fill { ch: char, x: f32, y: f32 },
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
    },
}

/// Everything needed to replay a render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Schema version for forward compatibility
    pub schema_version: String,
    pub bounds: Option<Rect>,
    pub commands: Vec<DrawCommand>,
}

/// A [`Surface`] that remembers instead of drawing
#[derive(Debug, Default)]
pub struct JsonSurface {
    commands: Vec<DrawCommand>,
}

impl JsonSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Package the recording together with the layout bounds
    pub fn output(&self, bounds: Option<Rect>) -> JsonOutput {
        JsonOutput {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            bounds,
            commands: self.commands.clone(),
        }
    }

    /// Pretty-printed JSON of [`JsonSurface::output`]
    pub fn to_json(&self, bounds: Option<Rect>) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.output(bounds))
            .map_err(|e| RenderError::EncodingFailed(e.to_string()))?;
        log::debug!("JsonSurface: {} commands, {} bytes", self.commands.len(), json.len());
        Ok(json)
    }
}

impl Surface for JsonSurface {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn apply_style(&mut self, style: &TextStyle) {
        self.commands.push(DrawCommand::SetStyle {
            style: style.id().get(),
            font: style.font().to_string(),
            fill: style.fill.to_hex(),
            stroke: style.stroke_color.filter(|_| style.has_stroke()).map(|c| c.to_hex()),
            stroke_width: style.stroke_width,
            alpha: style.alpha,
        });
    }

    fn stroke_char(&mut self, ch: char, x: f32, y: f32) {
        self.commands.push(DrawCommand::Stroke { ch, x, y });
    }

    fn fill_char(&mut self, ch: char, x: f32, y: f32) {
        self.commands.push(DrawCommand::Fill { ch, x, y });
    }

    fn fill_rule(&mut self, x: f32, y: f32, width: f32, thickness: f32) {
        self.commands.push(DrawCommand::Rule {
            x,
            y,
            width,
            thickness,
        });
    }
}
