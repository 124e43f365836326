use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::core::types::{ExclusionPair, Participant};
use crate::matching::engine::Matching;

/// The matching does not give every participant a giver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Incomplete matching: '{recipient}' has no assigned giver ({matched} of {expected} participants matched)"
)]
pub struct IncompleteMatchingError {
    pub recipient: Participant,
    pub matched: usize,
    pub expected: usize,
}

/// Reasons a matching cannot be used as a gift assignment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Incomplete(#[from] IncompleteMatchingError),

    /// Cycle of length 1; the graph builder never produces self edges
    #[error("Internal error: '{0}' is assigned to themselves")]
    SelfAssignment(Participant),

    /// A chain ran into an already-consumed participant, so some giver
    /// serves two recipients
    #[error("Internal error: '{0}' is the giver for more than one recipient")]
    ReusedGiver(Participant),

    #[error("Matching references '{0}', who is not a participant")]
    UnknownParticipant(Participant),

    #[error("Excluded pair assigned: '{giver}' gives to '{recipient}'")]
    ExcludedPairAssigned {
        recipient: Participant,
        giver: Participant,
    },
}

/// One closed gift chain, in the order the validator walked it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub members: Vec<Participant>,
}

impl Cycle {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Two participants exchanging gifts directly
    #[must_use]
    pub fn is_swap(&self) -> bool {
        self.members.len() == 2
    }
}

/// Disjoint cycle decomposition of a complete matching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub cycles: Vec<Cycle>,
}

impl CycleReport {
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        self.cycles.iter().map(Cycle::len).collect()
    }

    /// Participants covered by all cycles
    #[must_use]
    pub fn total(&self) -> usize {
        self.cycles.iter().map(Cycle::len).sum()
    }

    #[must_use]
    pub fn swap_count(&self) -> usize {
        self.cycles.iter().filter(|c| c.is_swap()).count()
    }

    #[must_use]
    pub fn longest(&self) -> usize {
        self.cycles.iter().map(Cycle::len).max().unwrap_or(0)
    }
}

/// Confirm `matching` covers every participant and split it into cycles.
///
/// Starting from each unvisited participant (in the given order), follow
/// recipient -> giver links until the chain returns to its start.
///
/// # Errors
///
/// - `ValidationError::Incomplete` if some participant on a chain has no giver
/// - `ValidationError::UnknownParticipant` if the matching names someone not in `participants`
/// - `ValidationError::SelfAssignment` / `ReusedGiver` if the matching is not a derangement
pub fn validate(
    matching: &Matching,
    participants: &[Participant],
) -> Result<CycleReport, ValidationError> {
    let known: HashSet<&Participant> = participants.iter().collect();
    for (recipient, giver) in matching.pairs() {
        for p in [recipient, giver] {
            if !known.contains(p) {
                return Err(ValidationError::UnknownParticipant(p.clone()));
            }
        }
    }

    let mut visited: HashSet<&Participant> = HashSet::with_capacity(participants.len());
    let mut report = CycleReport::default();

    for start in participants {
        if visited.contains(start) {
            continue;
        }
        visited.insert(start);
        let mut members = vec![start.clone()];
        let mut current = start;

        loop {
            let giver = matching
                .giver_of(current)
                .ok_or_else(|| IncompleteMatchingError {
                    recipient: current.clone(),
                    matched: matching.len(),
                    expected: participants.len(),
                })?;

            if giver == start {
                if members.len() == 1 {
                    return Err(ValidationError::SelfAssignment(start.clone()));
                }
                break;
            }
            if !visited.insert(giver) {
                return Err(ValidationError::ReusedGiver(giver.clone()));
            }
            members.push(giver.clone());
            current = giver;
        }

        debug!(length = members.len(), "Cycle closed");
        report.cycles.push(Cycle { members });
    }

    Ok(report)
}

/// Confirm no exclusion pair was matched in either direction
///
/// # Errors
///
/// Returns `ValidationError::ExcludedPairAssigned` for the first violating pair.
pub fn check_exclusions(
    matching: &Matching,
    exclusions: &[ExclusionPair],
) -> Result<(), ValidationError> {
    for (recipient, giver) in matching.pairs() {
        if exclusions.iter().any(|pair| pair.forbids(recipient, giver)) {
            return Err(ValidationError::ExcludedPairAssigned {
                recipient: recipient.clone(),
                giver: giver.clone(),
            });
        }
    }
    Ok(())
}
