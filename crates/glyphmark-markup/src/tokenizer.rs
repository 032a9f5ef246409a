//! Markup tokenizer: one left-to-right pass, no backtracking
//!
//! ## Grammar
//!
//! | Input            | Token                                      |
//! |------------------|--------------------------------------------|
//! | `<name>`         | [`Token::Command`] without argument        |
//! | `<name=arg>`     | [`Token::Command`] with argument `arg`     |
//! | `</name>`        | [`Token::CommandClose`]                    |
//! | `\n`, `\r\n`, `\r` | [`Token::Newline`]                       |
//! | anything else    | coalesced into [`Token::Text`]             |
//!
//! Names are ASCII alphanumerics, `-` and `_`. In text and arguments,
//! `\<`, `\>` and `\\` stand for the literal characters. Positions are
//! counted in characters, so they can be shown to users as-is.

use glyphmark_core::error::MarkupError;
use std::iter::Peekable;
use std::str::Chars;

/// One unit of markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of literal characters, escapes resolved
    Text { content: String, position: usize },
    /// A line break in the source
    Newline { position: usize },
    /// `<name>` or `<name=argument>`
    Command {
        name: String,
        argument: Option<String>,
        position: usize,
    },
    /// `</name>`
    CommandClose { name: String, position: usize },
}

impl Token {
    /// Character offset where the token starts
    pub fn position(&self) -> usize {
        match self {
            Self::Text { position, .. }
            | Self::Newline { position }
            | Self::Command { position, .. }
            | Self::CommandClose { position, .. } => *position,
        }
    }
}

/// Split markup into tokens
///
/// ```
/// use glyphmark_markup::{tokenize, Token};
///
/// let tokens = tokenize("a<b>c</b>").unwrap();
/// assert_eq!(tokens.len(), 4);
/// assert!(matches!(&tokens[1], Token::Command { name, .. } if name == "b"));
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, MarkupError> {
    Tokenizer::new(input).run()
}

struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Index of the next character to be read
    position: usize,
    tokens: Vec<Token>,
    text: String,
    text_start: usize,
}

fn syntax(message: impl Into<String>, position: usize) -> MarkupError {
    MarkupError::Syntax {
        message: message.into(),
        position,
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            tokens: Vec::new(),
            text: String::new(),
            text_start: 0,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let ch = self.chars.next()?;
        let at = self.position;
        self.position += 1;
        Some((at, ch))
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn push_text(&mut self, at: usize, ch: char) {
        if self.text.is_empty() {
            self.text_start = at;
        }
        self.text.push(ch);
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.tokens.push(Token::Text {
                content: std::mem::take(&mut self.text),
                position: self.text_start,
            });
        }
    }

    fn run(mut self) -> Result<Vec<Token>, MarkupError> {
        while let Some((at, ch)) = self.bump() {
            match ch {
                '\\' => {
                    let literal = self.escape(at)?;
                    self.push_text(at, literal);
                },
                '\r' => {
                    if self.peek() == Some('\n') {
                        self.bump();
                    }
                    self.flush_text();
                    self.tokens.push(Token::Newline { position: at });
                },
                '\n' => {
                    self.flush_text();
                    self.tokens.push(Token::Newline { position: at });
                },
                '<' => {
                    self.flush_text();
                    let tag = self.tag(at)?;
                    self.tokens.push(tag);
                },
                _ => self.push_text(at, ch),
            }
        }
        self.flush_text();
        Ok(self.tokens)
    }

    /// Resolve the character after a backslash at `at`
    fn escape(&mut self, at: usize) -> Result<char, MarkupError> {
        match self.bump() {
            Some((_, c @ ('<' | '>' | '\\'))) => Ok(c),
            Some((_, other)) => Err(syntax(format!("unknown escape '\\{}'", other), at)),
            None => Err(syntax("trailing backslash", at)),
        }
    }

    /// Parse a tag whose `<` sits at `start`
    fn tag(&mut self, start: usize) -> Result<Token, MarkupError> {
        let closing = self.peek() == Some('/');
        if closing {
            self.bump();
        }

        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.bump();
        }

        let argument = match self.bump() {
            None => return Err(syntax("unterminated tag", start)),
            Some((at, _)) if name.is_empty() => {
                return Err(syntax("expected a command name", at));
            },
            Some((_, '>')) => None,
            Some((at, '=')) if closing => {
                return Err(syntax("closing tag cannot take an argument", at));
            },
            Some((_, '=')) => Some(self.argument(start)?),
            Some((at, '\n' | '\r')) => return Err(syntax("newline inside tag", at)),
            Some((at, other)) => {
                return Err(syntax(format!("invalid character {:?} in command name", other), at));
            },
        };

        Ok(if closing {
            Token::CommandClose {
                name,
                position: start,
            }
        } else {
            Token::Command {
                name,
                argument,
                position: start,
            }
        })
    }

    /// Read an argument up to and including the closing `>`
    fn argument(&mut self, start: usize) -> Result<String, MarkupError> {
        let mut argument = String::new();
        loop {
            match self.bump() {
                None => return Err(syntax("unterminated tag", start)),
                Some((_, '>')) => return Ok(argument),
                Some((at, '\\')) => argument.push(self.escape(at)?),
                Some((at, '<')) => return Err(syntax("unexpected '<' inside tag", at)),
                Some((at, '\n' | '\r')) => return Err(syntax("newline inside tag", at)),
                Some((_, c)) => argument.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str, position: usize) -> Token {
        Token::Text {
            content: content.to_string(),
            position,
        }
    }

    fn open(name: &str, argument: Option<&str>, position: usize) -> Token {
        Token::Command {
            name: name.to_string(),
            argument: argument.map(str::to_string),
            position,
        }
    }

    fn close(name: &str, position: usize) -> Token {
        Token::CommandClose {
            name: name.to_string(),
            position,
        }
    }

    fn error_position(input: &str) -> usize {
        match tokenize(input) {
            Err(err @ MarkupError::Syntax { .. }) => err.position(),
            other => panic!("expected a syntax error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_is_one_token() {
        assert_eq!(tokenize("Hello").unwrap(), vec![text("Hello", 0)]);
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_commands_and_newlines() {
        let tokens = tokenize("Hel<b>lo</b>\nWorld").unwrap();
        assert_eq!(
            tokens,
            vec![
                text("Hel", 0),
                open("b", None, 3),
                text("lo", 6),
                close("b", 8),
                Token::Newline { position: 12 },
                text("World", 13),
            ]
        );
    }

    #[test]
    fn test_arguments() {
        let tokens = tokenize("<color=#ff0000>x</color>").unwrap();
        assert_eq!(tokens[0], open("color", Some("#ff0000"), 0));

        let tokens = tokenize(r"<font=a\>b>x</font>").unwrap();
        assert_eq!(tokens[0], open("font", Some("a>b"), 0));

        let tokens = tokenize("<font=>x</font>").unwrap();
        assert_eq!(tokens[0], open("font", Some(""), 0));
    }

    #[test]
    fn test_escapes_become_text() {
        let tokens = tokenize(r"a\<b\>\\c").unwrap();
        assert_eq!(tokens, vec![text(r"a<b>\c", 0)]);
    }

    #[test]
    fn test_crlf_is_a_single_newline() {
        let tokens = tokenize("a\r\nb\rc").unwrap();
        assert_eq!(
            tokens,
            vec![
                text("a", 0),
                Token::Newline { position: 1 },
                text("b", 3),
                Token::Newline { position: 4 },
                text("c", 5),
            ]
        );
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let tokens = tokenize("日本<b>語</b>").unwrap();
        assert_eq!(tokens[1].position(), 2);
        assert_eq!(tokens[2], text("語", 5));
        assert_eq!(tokens[3].position(), 6);
        // An emoji is one character even though it is four bytes
        assert_eq!(error_position("😀<"), 1);
    }

    #[test]
    fn test_syntax_errors_report_positions() {
        assert_eq!(error_position("ab<b"), 2);
        assert_eq!(error_position("ab<>"), 3);
        assert_eq!(error_position("<b x>"), 2);
        assert_eq!(error_position("x</b=1>"), 4);
        assert_eq!(error_position("<b\n>"), 2);
        assert_eq!(error_position("<color=a<b>"), 8);
        assert_eq!(error_position(r"abc\q"), 3);
        assert_eq!(error_position("abc\\"), 3);
        assert_eq!(error_position("<color=red"), 0);
    }

    #[test]
    fn test_stray_closing_bracket_is_literal() {
        assert_eq!(tokenize("a > b").unwrap(), vec![text("a > b", 0)]);
    }
}
