//! Commands: named, pure style transforms
//!
//! A command maps the style active at its opening tag to the style used
//! inside it. Transforms never mutate their input and always return a new
//! style instance, so the style identity changes at every tag.
//!
//! The built-in set lives in a process-wide registry created on first use
//! and never modified afterwards. Hosts add their own commands by building
//! a registry of their own:
//!
//! ```
//! use glyphmark_markup::CommandRegistry;
//! use glyphmark_core::Color;
//!
//! let registry = CommandRegistry::builtin().with("alert", |style, _arg| {
//!     Ok(style.derive(|p| {
//!         p.bold = true;
//!         p.fill = Color::rgb(200, 0, 0);
//!     }))
//! });
//! assert!(registry.has("alert"));
//! assert!(registry.has("b"));
//! ```

use glyphmark_core::error::ArgumentError;
use glyphmark_core::{Color, TextStyle};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// `(current style, argument) -> new style`
pub type StyleTransform =
    Arc<dyn Fn(&TextStyle, Option<&str>) -> Result<TextStyle, ArgumentError> + Send + Sync>;

/// A command shipped with glyphmark
pub struct Builtin {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    transform: fn(&TextStyle, Option<&str>) -> Result<TextStyle, ArgumentError>,
}

/// Every built-in command, in display order
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "b",
        usage: "<b>…</b>",
        summary: "bold",
        transform: bold,
    },
    Builtin {
        name: "i",
        usage: "<i>…</i>",
        summary: "italic",
        transform: italic,
    },
    Builtin {
        name: "u",
        usage: "<u>…</u>",
        summary: "underline",
        transform: underline,
    },
    Builtin {
        name: "s",
        usage: "<s>…</s>",
        summary: "strikethrough",
        transform: strikethrough,
    },
    Builtin {
        name: "color",
        usage: "<color=#rrggbb>…</color>",
        summary: "fill color (#rgb, #rrggbb, #rrggbbaa or a CSS name)",
        transform: color,
    },
    Builtin {
        name: "size",
        usage: "<size=24>…</size>",
        summary: "font size in pixels",
        transform: size,
    },
    Builtin {
        name: "font",
        usage: "<font=serif>…</font>",
        summary: "font family",
        transform: font,
    },
    Builtin {
        name: "stroke",
        usage: "<stroke=2,#000>…</stroke>",
        summary: "outline width and optional color",
        transform: stroke,
    },
    Builtin {
        name: "spacing",
        usage: "<spacing=1.5>…</spacing>",
        summary: "letter spacing in pixels",
        transform: spacing,
    },
    Builtin {
        name: "leading",
        usage: "<leading=1.2>…</leading>",
        summary: "line spacing multiplier",
        transform: leading,
    },
    Builtin {
        name: "alpha",
        usage: "<alpha=0.5>…</alpha>",
        summary: "opacity between 0 and 1",
        transform: alpha,
    },
    Builtin {
        name: "plain",
        usage: "<plain>…</plain>",
        summary: "clear bold, italic, underline, strikethrough and stroke",
        transform: plain,
    },
];

static GLOBAL: OnceLock<CommandRegistry> = OnceLock::new();

/// Command name to style transform
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, StyleTransform>,
}

impl CommandRegistry {
    /// A registry with no commands at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh registry holding the built-in commands
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for builtin in BUILTINS {
            registry.register(builtin.name, builtin.transform);
        }
        registry
    }

    /// The shared, read-only built-in registry
    pub fn global() -> &'static CommandRegistry {
        GLOBAL.get_or_init(|| {
            log::debug!("Initializing built-in command registry ({} commands)", BUILTINS.len());
            Self::builtin()
        })
    }

    /// Add or replace a command
    pub fn register<F>(&mut self, name: impl Into<String>, transform: F)
    where
        F: Fn(&TextStyle, Option<&str>) -> Result<TextStyle, ArgumentError> + Send + Sync + 'static,
    {
        self.commands.insert(name.into(), Arc::new(transform));
    }

    /// Builder-style [`CommandRegistry::register`]
    pub fn with<F>(mut self, name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&TextStyle, Option<&str>) -> Result<TextStyle, ArgumentError> + Send + Sync + 'static,
    {
        self.register(name, transform);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StyleTransform> {
        self.commands.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

fn no_argument(arg: Option<&str>) -> Result<(), ArgumentError> {
    match arg {
        None => Ok(()),
        Some(_) => Err(ArgumentError::new("takes no argument")),
    }
}

fn required(arg: Option<&str>) -> Result<&str, ArgumentError> {
    match arg.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ArgumentError::new("requires an argument")),
    }
}

fn number(value: &str) -> Result<f32, ArgumentError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ArgumentError::new(format!("not a number: {:?}", value)))
}

fn bold(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    no_argument(arg)?;
    Ok(style.derive(|p| p.bold = true))
}

fn italic(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    no_argument(arg)?;
    Ok(style.derive(|p| p.italic = true))
}

fn underline(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    no_argument(arg)?;
    Ok(style.derive(|p| p.underline = true))
}

fn strikethrough(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    no_argument(arg)?;
    Ok(style.derive(|p| p.strikethrough = true))
}

fn color(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    let fill: Color = required(arg)?.parse()?;
    Ok(style.derive(|p| p.fill = fill))
}

fn size(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    let size = number(required(arg)?)?;
    if size <= 0.0 {
        return Err(ArgumentError::new("size must be positive"));
    }
    Ok(style.derive(|p| p.font_size = size))
}

fn font(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    let family = required(arg)?.to_string();
    Ok(style.derive(|p| p.font_family = family))
}

fn stroke(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    let value = required(arg)?;
    let (width, color) = match value.split_once(',') {
        Some((width, color)) => (width, Some(color.parse::<Color>()?)),
        None => (value, None),
    };
    let width = number(width)?;
    if width < 0.0 {
        return Err(ArgumentError::new("stroke width cannot be negative"));
    }
    Ok(style.derive(|p| {
        p.stroke_width = width;
        p.stroke_color = color.or(p.stroke_color).or(Some(Color::black()));
    }))
}

fn spacing(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    let spacing = number(required(arg)?)?;
    Ok(style.derive(|p| p.letter_spacing = spacing))
}

fn leading(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    let multiplier = number(required(arg)?)?;
    if multiplier <= 0.0 {
        return Err(ArgumentError::new("line spacing must be positive"));
    }
    Ok(style.derive(|p| p.line_spacing = multiplier))
}

fn alpha(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    let alpha = number(required(arg)?)?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ArgumentError::new("alpha must be between 0 and 1"));
    }
    Ok(style.derive(|p| p.alpha = alpha))
}

fn plain(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle, ArgumentError> {
    no_argument(arg)?;
    Ok(style.derive(|p| {
        p.bold = false;
        p.italic = false;
        p.underline = false;
        p.strikethrough = false;
        p.stroke_width = 0.0;
        p.stroke_color = None;
    }))
}
