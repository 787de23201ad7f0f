//! Position assignment for the parameters of one format string.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::analysis::error::{AnalysisError, PositionProblem};
use crate::types::StringParam;

/// Collects parameters by final position.
///
/// Implicit sites take the lowest free position. A position may be claimed
/// once; [`SignatureBuilder::finish`] rejects gaps.
#[derive(Debug, Default)]
pub(crate) struct SignatureBuilder {
    slots: BTreeMap<usize, StringParam>,
}

impl SignatureBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The lowest position not used so far.
    pub(crate) fn next_free(&self) -> usize {
        let mut position = 1;
        while self.slots.contains_key(&position) {
            position += 1;
        }
        position
    }

    /// Place a parameter at `position`.
    pub(crate) fn place(
        &mut self,
        position: usize,
        param: StringParam,
    ) -> Result<(), AnalysisError> {
        let param = param.placed_at(position);
        match self.slots.entry(position) {
            Entry::Vacant(slot) => {
                slot.insert(param);
            }
            Entry::Occupied(slot) => {
                return Err(AnalysisError::PositionConflict {
                    position,
                    problem: PositionProblem::Duplicate {
                        existing: slot.get().kind(),
                        found: param.kind(),
                    },
                });
            }
        }
        Ok(())
    }

    /// Place a resolved sub-signature so that its position 1 lands on `start`.
    pub(crate) fn place_run(
        &mut self,
        start: usize,
        params: &[StringParam],
    ) -> Result<(), AnalysisError> {
        for (index, param) in params.iter().enumerate() {
            let local = param.position().unwrap_or(index + 1).max(1);
            self.place(start.saturating_add(local - 1), param.clone())?;
        }
        Ok(())
    }

    /// Finish, checking that positions are exactly `1..=N`.
    pub(crate) fn finish(self) -> Result<Vec<StringParam>, AnalysisError> {
        for (expected, position) in (1..).zip(self.slots.keys()) {
            if *position != expected {
                return Err(AnalysisError::PositionConflict {
                    position: expected,
                    problem: PositionProblem::Unused,
                });
            }
        }
        Ok(self.slots.into_values().collect())
    }
}
