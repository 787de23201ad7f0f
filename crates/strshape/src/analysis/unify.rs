//! Position-wise unification of parameter lists.
//!
//! Compatibility rules:
//! - identical kinds unify to themselves
//! - an integer kind with a floating kind widens to the floating kind
//! - everything else is a conflict
//!
//! The rule is commutative. It is not associative once both integer kinds
//! meet a floating kind, so callers fold in a fixed order.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::format::SpecifierKind;
use crate::types::StringParam;

/// The first position at which two lists disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnifyConflict {
    pub position: usize,
    pub left: SpecifierKind,
    pub right: SpecifierKind,
}

impl SpecifierKind {
    /// Unify two kinds, returning the merged kind or `None` if incompatible.
    pub fn unify(self, other: SpecifierKind) -> Option<SpecifierKind> {
        if self == other {
            return Some(self);
        }
        if self.is_integer() && other.is_floating() {
            return Some(other);
        }
        if self.is_floating() && other.is_integer() {
            return Some(self);
        }
        None
    }
}

/// Unify two parameter lists by position.
///
/// Positions present on only one side are carried through. The first
/// non-`None` name wins. Returns `None` on any incompatible position.
///
/// # Example
///
/// ```
/// use strshape::format::SpecifierKind;
/// use strshape::{StringParam, unify};
///
/// let a = vec![StringParam::at(1, SpecifierKind::SignedInt)];
/// let b = vec![
///     StringParam::at(1, SpecifierKind::Double),
///     StringParam::at(2, SpecifierKind::ObjectOrString),
/// ];
///
/// let unified = unify(&a, &b).unwrap();
/// assert_eq!(unified[0].kind(), SpecifierKind::Double);
/// assert_eq!(unified.len(), 2);
/// ```
pub fn unify(a: &[StringParam], b: &[StringParam]) -> Option<Vec<StringParam>> {
    unify_params(a, b).ok()
}

/// Like [`unify`], but reports where unification failed.
pub fn unify_params(
    a: &[StringParam],
    b: &[StringParam],
) -> Result<Vec<StringParam>, UnifyConflict> {
    let mut slots: BTreeMap<usize, StringParam> = by_position(a).collect();

    for (position, param) in by_position(b) {
        match slots.entry(position) {
            Entry::Vacant(slot) => {
                slot.insert(param);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                let kind = existing
                    .kind()
                    .unify(param.kind())
                    .ok_or(UnifyConflict {
                        position,
                        left: existing.kind(),
                        right: param.kind(),
                    })?;
                existing.spec.kind = kind;
                if existing.name.is_none() {
                    existing.name = param.name;
                }
            }
        }
    }

    Ok(slots.into_values().collect())
}

/// Key parameters by explicit position, falling back to list order.
fn by_position(params: &[StringParam]) -> impl Iterator<Item = (usize, StringParam)> + '_ {
    params.iter().enumerate().map(|(index, param)| {
        let position = param.position().unwrap_or(index + 1);
        (position, param.placed_at(position))
    })
}
