//! Reading markup from arguments, files or stdin

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};

use crate::cli::InputArgs;

/// Priority: positional text > --text > --text-file > stdin
///
/// Text given on the command line has `\u{...}` and `\uXXXX` escapes
/// decoded; file and stdin input is taken as-is.
pub fn read_markup(args: &InputArgs) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(decode_unicode_escapes(text));
    }

    if let Some(ref text) = args.text_arg {
        return Ok(decode_unicode_escapes(text));
    }

    if let Some(ref path) = args.text_file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read markup from {}", path.display()));
    }

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read markup from stdin")?;
    Ok(text)
}

/// Replace `\u{1F600}` and `\u00E9` style escapes with their characters
///
/// Anything that is not a well-formed escape, including markup escapes
/// like `\<`, is left untouched for the tokenizer.
pub fn decode_unicode_escapes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("\\u") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match parse_escape(after) {
            Some((ch, consumed)) => {
                result.push(ch);
                rest = &after[consumed..];
            },
            None => {
                result.push_str("\\u");
                rest = after;
            },
        }
    }
    result.push_str(rest);
    result
}

/// Parse what follows `\u`; returns the character and bytes consumed
fn parse_escape(after: &str) -> Option<(char, usize)> {
    if let Some(braced) = after.strip_prefix('{') {
        let end = braced.find('}')?;
        let code = u32::from_str_radix(&braced[..end], 16).ok()?;
        return char::from_u32(code).map(|ch| (ch, end + 2));
    }

    let hex = after.get(..4)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(code).map(|ch| (ch, 4))
}
