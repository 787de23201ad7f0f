//! Public token types for tokenized format strings.
//!
//! These types are public so that tooling can inspect a format string without
//! resolving it into a parameter signature.

use std::fmt;

use serde::Serialize;

/// A tokenized format string: its parts in left-to-right source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatString {
    pub parts: Vec<FormatPart>,
}

impl FormatString {
    /// Iterate over the substitution sites (specifiers only).
    pub fn specifiers(&self) -> impl Iterator<Item = &FormatSpecifier> {
        self.parts.iter().filter_map(|part| match part {
            FormatPart::Spec(spec) => Some(spec),
            FormatPart::Literal(_) | FormatPart::Reference { .. } => None,
        })
    }

    /// Iterate over the names of all plural references, in source order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            FormatPart::Reference { name, .. } => Some(name.as_str()),
            FormatPart::Literal(_) | FormatPart::Spec(_) => None,
        })
    }

    /// Returns true if the string contains no specifiers and no references.
    pub fn is_literal(&self) -> bool {
        self.parts
            .iter()
            .all(|part| matches!(part, FormatPart::Literal(_)))
    }
}

impl fmt::Display for FormatString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// One part of a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatPart {
    /// Inert text, kept verbatim (escaped `%%` included).
    Literal(String),
    /// A substitution site.
    Spec(FormatSpecifier),
    /// A named plural reference: `%#@name@`, optionally positional (`%2$#@name@`).
    Reference {
        name: String,
        position: Option<usize>,
    },
}

impl fmt::Display for FormatPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatPart::Literal(text) => f.write_str(text),
            FormatPart::Spec(spec) => write!(f, "{spec}"),
            FormatPart::Reference {
                name,
                position: Some(position),
            } => write!(f, "%{position}$#@{name}@"),
            FormatPart::Reference {
                name,
                position: None,
            } => write!(f, "%#@{name}@"),
        }
    }
}

/// A classified substitution site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FormatSpecifier {
    /// Explicit 1-based position (`%2$d`), or the final position once a
    /// signature has been normalized.
    pub position: Option<usize>,
    pub kind: SpecifierKind,
}

impl FormatSpecifier {
    /// A specifier with no explicit position.
    pub fn implicit(kind: SpecifierKind) -> Self {
        Self {
            position: None,
            kind,
        }
    }

    /// A specifier at a fixed position.
    pub fn at(position: usize, kind: SpecifierKind) -> Self {
        Self {
            position: Some(position),
            kind,
        }
    }
}

impl fmt::Display for FormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("%")?;
        if let Some(position) = self.position {
            write!(f, "{position}$")?;
        }
        f.write_str(self.kind.conversion())
    }
}

/// The semantic type a specifier requires from its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SpecifierKind {
    SignedInt,
    UnsignedInt,
    Float,
    Double,
    ObjectOrString,
    CString,
    Char,
    Pointer,
    /// A literal `%%`. Never part of a signature.
    Percent,
    /// An unrecognized length/conversion combination or an unterminated `%`.
    Unknown,
}

impl SpecifierKind {
    /// Canonical conversion text used when rendering a specifier.
    pub fn conversion(self) -> &'static str {
        match self {
            SpecifierKind::SignedInt => "d",
            SpecifierKind::UnsignedInt => "u",
            SpecifierKind::Float => "hf",
            SpecifierKind::Double => "f",
            SpecifierKind::ObjectOrString => "@",
            SpecifierKind::CString => "s",
            SpecifierKind::Char => "c",
            SpecifierKind::Pointer => "p",
            SpecifierKind::Percent => "%",
            SpecifierKind::Unknown => "?",
        }
    }

    /// Returns true for the floating-point kinds.
    pub fn is_floating(self) -> bool {
        matches!(self, SpecifierKind::Float | SpecifierKind::Double)
    }

    /// Returns true for the integer kinds.
    pub fn is_integer(self) -> bool {
        matches!(self, SpecifierKind::SignedInt | SpecifierKind::UnsignedInt)
    }
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecifierKind::SignedInt => "signed int",
            SpecifierKind::UnsignedInt => "unsigned int",
            SpecifierKind::Float => "float",
            SpecifierKind::Double => "double",
            SpecifierKind::ObjectOrString => "object",
            SpecifierKind::CString => "C string",
            SpecifierKind::Char => "char",
            SpecifierKind::Pointer => "pointer",
            SpecifierKind::Percent => "percent",
            SpecifierKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A printf length modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthModifier {
    /// `hh`
    Char,
    /// `h`
    Short,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `q`
    Quad,
    /// `L`
    LongDouble,
    /// `z`
    Size,
    /// `t`
    PtrDiff,
    /// `j`
    IntMax,
}

/// Which platform's conversion conventions apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Foundation format strings: `%s` is a C string, `%@` an object.
    #[default]
    Apple,
    /// Android resources: `%s` formats any object via `toString()`.
    Android,
}
