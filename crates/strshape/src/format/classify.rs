//! Conversion table mapping length modifier + conversion letter to a kind.

use super::ast::{Dialect, LengthModifier, SpecifierKind};

impl SpecifierKind {
    /// Classify a conversion with its optional length modifier.
    ///
    /// The table is total: any combination not listed yields
    /// [`SpecifierKind::Unknown`].
    pub fn classify(
        length: Option<LengthModifier>,
        conversion: char,
        dialect: Dialect,
    ) -> SpecifierKind {
        match conversion {
            '%' if length.is_none() => SpecifierKind::Percent,
            'd' | 'i' | 'D' if accepts_integer_length(length) => SpecifierKind::SignedInt,
            'u' | 'o' | 'x' | 'X' | 'U' | 'O' if accepts_integer_length(length) => {
                SpecifierKind::UnsignedInt
            }
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'a' | 'A' => match length {
                None | Some(LengthModifier::Long | LengthModifier::LongDouble) => {
                    SpecifierKind::Double
                }
                Some(LengthModifier::Short) => SpecifierKind::Float,
                Some(_) => SpecifierKind::Unknown,
            },
            '@' if length.is_none() => SpecifierKind::ObjectOrString,
            's' | 'S' if matches!(length, None | Some(LengthModifier::Long)) => match dialect {
                Dialect::Apple => SpecifierKind::CString,
                Dialect::Android => SpecifierKind::ObjectOrString,
            },
            'c' | 'C' if matches!(length, None | Some(LengthModifier::Long)) => SpecifierKind::Char,
            'p' if length.is_none() => SpecifierKind::Pointer,
            _ => SpecifierKind::Unknown,
        }
    }
}

fn accepts_integer_length(length: Option<LengthModifier>) -> bool {
    !matches!(length, Some(LengthModifier::LongDouble))
}
