//! Format string tokenizer using winnow.
//!
//! Splits a format string into literal runs, specifiers and plural
//! references in a single left-to-right pass. Handles:
//! - `%%` escapes (kept as literal text)
//! - `%<pos$><flags><width><.precision><length><conversion>` specifiers
//! - `%#@name@` and `%<pos$>#@name@` plural references
//!
//! Tokenization never fails. Malformed specifiers (unknown conversion,
//! unterminated `%`, `*` widths) come out as [`SpecifierKind::Unknown`].

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::ast::{Dialect, FormatPart, FormatSpecifier, FormatString, LengthModifier, SpecifierKind};

/// Tokenize a Foundation-style format string.
pub fn tokenize(input: &str) -> FormatString {
    tokenize_with(input, Dialect::Apple)
}

/// Tokenize a format string using the conversion rules of `dialect`.
pub fn tokenize_with(input: &str, dialect: Dialect) -> FormatString {
    let mut remaining = input;
    let mut parts = Vec::new();

    while !remaining.is_empty() {
        match part(&mut remaining, dialect) {
            Ok(part) => push_part(&mut parts, part),
            Err(_) => {
                // Every branch of `part` accepts a leading '%' or literal char,
                // so this only triggers if that stops holding.
                push_part(&mut parts, FormatPart::Literal(remaining.to_string()));
                break;
            }
        }
    }

    FormatString { parts }
}

/// Append a part, merging adjacent literals.
fn push_part(parts: &mut Vec<FormatPart>, part: FormatPart) {
    match part {
        FormatPart::Literal(text) => {
            if let Some(FormatPart::Literal(prev)) = parts.last_mut() {
                prev.push_str(&text);
            } else {
                parts.push(FormatPart::Literal(text));
            }
        }
        other => parts.push(other),
    }
}

/// Parse a single part (literal run, reference, or specifier).
fn part(input: &mut &str, dialect: Dialect) -> ModalResult<FormatPart> {
    alt((
        literal_run,
        reference,
        |input: &mut &str| specifier(input, dialect),
    ))
    .parse_next(input)
}

/// Parse a run of text containing no '%'.
fn literal_run(input: &mut &str) -> ModalResult<FormatPart> {
    take_while(1.., |c: char| c != '%')
        .map(|text: &str| FormatPart::Literal(text.to_string()))
        .parse_next(input)
}

/// Parse a plural reference: `%#@name@` or `%N$#@name@`.
fn reference(input: &mut &str) -> ModalResult<FormatPart> {
    (
        '%',
        opt(explicit_position.verify(|position: &usize| *position > 0)),
        "#@",
        take_while(1.., |c: char| c != '@'),
        '@',
    )
        .map(|(_, position, _, name, _): (char, Option<usize>, &str, &str, char)| {
            FormatPart::Reference {
                name: name.to_string(),
                position,
            }
        })
        .parse_next(input)
}

/// Parse `N$`.
fn explicit_position(input: &mut &str) -> ModalResult<usize> {
    terminated(digit1.try_map(str::parse::<usize>), '$').parse_next(input)
}

/// Specifier components before classification.
struct RawSpecifier {
    position: Option<usize>,
    uses_star: bool,
    length: Option<LengthModifier>,
    conversion: Option<char>,
}

/// Parse a specifier starting at '%'. Always succeeds on a leading '%'.
fn specifier(input: &mut &str, dialect: Dialect) -> ModalResult<FormatPart> {
    let (raw, text) = raw_specifier.with_taken().parse_next(input)?;

    let kind = match raw.conversion {
        Some(conversion) => SpecifierKind::classify(raw.length, conversion, dialect),
        None => SpecifierKind::Unknown,
    };

    if kind == SpecifierKind::Percent {
        return Ok(FormatPart::Literal(text.to_string()));
    }

    let kind = if raw.uses_star || raw.position == Some(0) {
        SpecifierKind::Unknown
    } else {
        kind
    };

    Ok(FormatPart::Spec(FormatSpecifier {
        position: raw.position.filter(|position| *position > 0),
        kind,
    }))
}

fn raw_specifier(input: &mut &str) -> ModalResult<RawSpecifier> {
    '%'.parse_next(input)?;
    let position = opt(explicit_position).parse_next(input)?;
    let _: &str = take_while(0.., ['-', '+', ' ', '#', '0', '\'']).parse_next(input)?;
    let width_star = count_or_star(input)?;
    let precision_star = opt(preceded('.', count_or_star))
        .parse_next(input)?
        .unwrap_or(false);
    let length = opt(length_modifier).parse_next(input)?;
    let conversion = opt(any).parse_next(input)?;

    Ok(RawSpecifier {
        position,
        uses_star: width_star || precision_star,
        length,
        conversion,
    })
}

/// Parse a width or precision. Returns true if it was `*`.
fn count_or_star(input: &mut &str) -> ModalResult<bool> {
    alt((
        '*'.value(true),
        take_while(0.., |c: char| c.is_ascii_digit()).value(false),
    ))
    .parse_next(input)
}

fn length_modifier(input: &mut &str) -> ModalResult<LengthModifier> {
    alt((
        "hh".value(LengthModifier::Char),
        "h".value(LengthModifier::Short),
        "ll".value(LengthModifier::LongLong),
        "l".value(LengthModifier::Long),
        "q".value(LengthModifier::Quad),
        "L".value(LengthModifier::LongDouble),
        "z".value(LengthModifier::Size),
        "t".value(LengthModifier::PtrDiff),
        "j".value(LengthModifier::IntMax),
    ))
    .parse_next(input)
}
