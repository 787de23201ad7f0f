//! `.strings` file parser using winnow.
//!
//! Accepts the old-style property list subset used by localization tables:
//! - `"key" = "value";` pairs, with quoted or bare keys
//! - `"key";` shorthand, whose value is the key itself
//! - `/* block */` and `// line` comments
//! - escapes `\" \\ \n \t \r \0 \UXXXX` (UTF-16 surrogate pairs combined)

use winnow::combinator::{alt, opt, preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::{any, take_until, take_while};

use super::error::{ParseError, syntax_error};

/// Parse `.strings` text into key/value pairs in file order.
///
/// Duplicate keys are returned as-is; the caller decides which one wins.
pub fn parse_strings(input: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut remaining = input;
    match strings_file(&mut remaining) {
        Ok(pairs) => {
            if remaining.is_empty() {
                Ok(pairs)
            } else {
                Err(syntax_error(
                    input,
                    remaining,
                    format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                ))
            }
        }
        Err(e) => Err(syntax_error(input, remaining, format!("parse error: {e}"))),
    }
}

fn strings_file(input: &mut &str) -> ModalResult<Vec<(String, String)>> {
    skip_trivia(input)?;
    repeat(0.., terminated(pair, skip_trivia)).parse_next(input)
}

/// Skip whitespace and comments.
fn skip_trivia(input: &mut &str) -> ModalResult<()> {
    let _: Vec<()> = repeat(
        0..,
        alt((
            take_while(1.., char::is_whitespace).void(),
            block_comment.void(),
            line_comment.void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

fn block_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded("/*", terminated(take_until(0.., "*/"), "*/")).parse_next(input)
}

fn line_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded("//", take_while(0.., |c| c != '\n')).parse_next(input)
}

/// Parse `key = value;` or `key;`.
fn pair(input: &mut &str) -> ModalResult<(String, String)> {
    let key = token(input)?;
    skip_trivia(input)?;
    let value = opt(preceded(('=', skip_trivia), terminated(token, skip_trivia)))
        .parse_next(input)?;
    ';'.parse_next(input)?;
    let value = value.unwrap_or_else(|| key.clone());
    Ok((key, value))
}

/// A quoted string or a bare word.
fn token(input: &mut &str) -> ModalResult<String> {
    alt((quoted, bare)).parse_next(input)
}

fn bare(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '$' | ':' | '/')
    })
    .map(ToString::to_string)
    .parse_next(input)
}

fn quoted(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut out = String::new();
    loop {
        let chunk: &str = take_while(0.., |c: char| c != '"' && c != '\\').parse_next(input)?;
        out.push_str(chunk);
        if any.parse_next(input)? == '"' {
            return Ok(out);
        }
        escape(input, &mut out)?;
    }
}

/// Decode one escape sequence after its backslash.
fn escape(input: &mut &str, out: &mut String) -> ModalResult<()> {
    match any.parse_next(input)? {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        '0' => out.push('\0'),
        'U' | 'u' => {
            let unit = hex_unit(input)?;
            if (0xD800..0xDC00).contains(&unit) {
                // The next escape is consumed only when it completes the pair.
                let low_unit = hex_unit.verify(|low: &u16| (0xDC00..0xE000).contains(low));
                let low = opt(preceded(('\\', alt(('U', 'u'))), low_unit)).parse_next(input)?;
                let decoded = low
                    .and_then(|low| char::decode_utf16([unit, low]).next())
                    .and_then(Result::ok)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                out.push(decoded);
            } else {
                out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
        other => out.push(other),
    }
    Ok(())
}

/// Four hex digits as a UTF-16 code unit.
fn hex_unit(input: &mut &str) -> ModalResult<u16> {
    take_while(4, |c: char| c.is_ascii_hexdigit())
        .try_map(|digits: &str| u16::from_str_radix(digits, 16))
        .parse_next(input)
}
