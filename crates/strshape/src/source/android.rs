//! Android `strings.xml` reader.

use std::collections::BTreeMap;

use super::error::ParseError;
use super::{element_text, parse_xml};

/// Strings read from one resources file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndroidStrings {
    pub strings: BTreeMap<String, String>,
    /// Names defined more than once; the last definition wins.
    pub duplicate_keys: Vec<String>,
}

/// Parse the `<string>` resources of a `strings.xml` document.
///
/// Inner markup such as `<b>` or `<xliff:g>` is flattened to its text.
/// Strings marked `translatable="false"` are skipped.
pub fn parse_android_strings(input: &str) -> Result<AndroidStrings, ParseError> {
    let document = parse_xml(input)?;
    let root = document.root_element();
    if root.tag_name().name() != "resources" {
        return Err(ParseError::Structure {
            message: format!(
                "root element must be <resources>, found <{}>",
                root.tag_name().name()
            ),
        });
    }

    let mut result = AndroidStrings::default();
    let strings = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "string");
    for element in strings {
        if element.attribute("translatable") == Some("false") {
            continue;
        }
        let Some(name) = element.attribute("name") else {
            return Err(ParseError::Structure {
                message: "<string> without a name attribute".to_string(),
            });
        };
        let value = unescape(&element_text(element));
        if result.strings.insert(name.to_string(), value).is_some() {
            result.duplicate_keys.push(name.to_string());
        }
    }
    Ok(result)
}

/// Decode Android resource escapes and strip enclosing double quotes.
///
/// Unquoted runs of whitespace collapse to one space, as aapt does.
fn unescape(raw: &str) -> String {
    let trimmed = raw.trim();
    let (body, quoted) = match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) if !inner.ends_with('\\') || inner.ends_with("\\\\") => (inner, true),
        _ => (trimmed, false),
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(decoded) => out.push(decoded),
                        None => {
                            out.push_str("\\u");
                            out.push_str(&hex);
                        }
                    }
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            c if c.is_whitespace() && !quoted => {
                while chars.peek().is_some_and(|next| next.is_whitespace()) {
                    chars.next();
                }
                out.push(' ');
            }
            c => out.push(c),
        }
    }
    out
}
