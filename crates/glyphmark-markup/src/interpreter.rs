//! Style-stack interpreter: tokens in, render items out
//!
//! Walks the token sequence once, keeping the active style and the tag
//! that opened it, plus two parallel stacks holding what was active
//! before. Every character becomes one [`RenderItem::Character`], every
//! newline one [`RenderItem::Newline`]. Nesting is strictly LIFO: a
//! closing tag must name the innermost open tag.

use crate::commands::CommandRegistry;
use crate::tokenizer::{tokenize, Token};
use glyphmark_core::error::MarkupError;
use glyphmark_core::types::RenderItem;
use glyphmark_core::{MetricsProvider, TextStyle};
use std::sync::Arc;

/// Knobs for one interpretation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpretOptions {
    /// Accept input that ends with tags still open instead of failing
    pub allow_unclosed: bool,
}

/// An opening tag waiting for its close
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenTag {
    name: String,
    position: usize,
}

/// Turns tokens into unpositioned render items
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'r> {
    registry: &'r CommandRegistry,
    options: InterpretOptions,
}

impl Default for Interpreter<'static> {
    fn default() -> Self {
        Self::new(CommandRegistry::global())
    }
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self {
            registry,
            options: InterpretOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InterpretOptions) -> Self {
        self.options = options;
        self
    }

    /// Interpret `tokens` starting from `base`
    ///
    /// Either every token is consumed and the complete item sequence is
    /// returned, or the first violation is returned and nothing else.
    pub fn interpret(
        &self,
        tokens: &[Token],
        base: &TextStyle,
        metrics: &mut MetricsProvider,
    ) -> Result<Vec<RenderItem>, MarkupError> {
        let mut items = Vec::new();
        let mut current_style = Arc::new(base.clone());
        let mut current_tag: Option<OpenTag> = None;
        let mut style_stack: Vec<Arc<TextStyle>> = Vec::new();
        let mut tag_stack: Vec<Option<OpenTag>> = Vec::new();
        let mut line_height = metrics.height(&current_style);

        for token in tokens {
            match token {
                Token::Command {
                    name,
                    argument,
                    position,
                } => {
                    let transform =
                        self.registry
                            .get(name)
                            .ok_or_else(|| MarkupError::UnknownCommand {
                                name: name.clone(),
                                position: *position,
                            })?;

                    let next = transform(current_style.as_ref(), argument.as_deref()).map_err(|err| {
                        MarkupError::InvalidArgument {
                            name: name.clone(),
                            argument: argument.clone(),
                            reason: err.to_string(),
                            position: *position,
                        }
                    })?;

                    style_stack.push(std::mem::replace(&mut current_style, Arc::new(next)));
                    tag_stack.push(current_tag.replace(OpenTag {
                        name: name.clone(),
                        position: *position,
                    }));
                    line_height = metrics.height(&current_style);
                },
                Token::CommandClose { name, position } => {
                    let open = current_tag.as_ref().ok_or_else(|| MarkupError::UnmatchedClose {
                        name: name.clone(),
                        position: *position,
                    })?;

                    if open.name != *name {
                        return Err(MarkupError::MismatchedClose {
                            closed: name.clone(),
                            expected: open.name.clone(),
                            open_position: open.position,
                            position: *position,
                        });
                    }

                    // Both stacks grow together, so a matched tag always has a saved style
                    if let (Some(style), Some(tag)) = (style_stack.pop(), tag_stack.pop()) {
                        current_style = style;
                        current_tag = tag;
                        line_height = metrics.height(&current_style);
                    }
                },
                Token::Newline { .. } => items.push(RenderItem::newline(line_height)),
                Token::Text { content, .. } => {
                    for ch in content.chars() {
                        let width = metrics.width(&current_style, ch);
                        items.push(RenderItem::character(
                            ch,
                            width,
                            line_height,
                            current_style.clone(),
                        ));
                    }
                },
            }
        }

        if let Some(open) = current_tag {
            if !self.options.allow_unclosed {
                return Err(MarkupError::UnclosedTag {
                    name: open.name,
                    position: open.position,
                });
            }
            log::debug!(
                "Interpreter: ignoring {} unclosed tag(s), innermost <{}> at {}",
                style_stack.len(),
                open.name,
                open.position
            );
        }

        log::debug!("Interpreter: {} tokens -> {} items", tokens.len(), items.len());
        Ok(items)
    }

    /// Tokenize and interpret in one step
    pub fn parse(
        &self,
        markup: &str,
        base: &TextStyle,
        metrics: &mut MetricsProvider,
    ) -> Result<Vec<RenderItem>, MarkupError> {
        let tokens = tokenize(markup)?;
        self.interpret(&tokens, base, metrics)
    }
}

/// Interpret with the built-in commands and strict tag checking
pub fn interpret(
    tokens: &[Token],
    base: &TextStyle,
    metrics: &mut MetricsProvider,
) -> Result<Vec<RenderItem>, MarkupError> {
    Interpreter::default().interpret(tokens, base, metrics)
}

/// Tokenize and interpret with the built-in commands
pub fn parse(
    markup: &str,
    base: &TextStyle,
    metrics: &mut MetricsProvider,
) -> Result<Vec<RenderItem>, MarkupError> {
    Interpreter::default().parse(markup, base, metrics)
}
