use std::fmt;

use serde::Serialize;

use crate::format::{FormatSpecifier, SpecifierKind};

/// One parameter of a resolved signature.
///
/// `name` is set only for parameters that came from a plural variant and
/// holds the plural variable they were found in. It is diagnostic only and
/// never takes part in equality of kinds during unification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StringParam {
    pub name: Option<String>,
    pub spec: FormatSpecifier,
}

impl StringParam {
    /// An unnamed parameter.
    pub fn new(spec: FormatSpecifier) -> Self {
        Self { name: None, spec }
    }

    /// A parameter attributed to a plural variable.
    pub fn named(name: impl Into<String>, spec: FormatSpecifier) -> Self {
        Self {
            name: Some(name.into()),
            spec,
        }
    }

    /// Shorthand for an unnamed parameter at a fixed position.
    pub fn at(position: usize, kind: SpecifierKind) -> Self {
        Self::new(FormatSpecifier::at(position, kind))
    }

    /// The parameter's kind.
    pub fn kind(&self) -> SpecifierKind {
        self.spec.kind
    }

    /// The parameter's position, if assigned.
    pub fn position(&self) -> Option<usize> {
        self.spec.position
    }

    /// Return a copy placed at `position`.
    pub fn placed_at(&self, position: usize) -> Self {
        Self {
            name: self.name.clone(),
            spec: FormatSpecifier {
                position: Some(position),
                kind: self.spec.kind,
            },
        }
    }
}

impl fmt::Display for StringParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.spec.position) {
            (Some(name), Some(position)) => write!(f, "{position}: {} ({name})", self.spec.kind),
            (None, Some(position)) => write!(f, "{position}: {}", self.spec.kind),
            (Some(name), None) => write!(f, "{} ({name})", self.spec.kind),
            (None, None) => write!(f, "{}", self.spec.kind),
        }
    }
}
