use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::core::types::{ExclusionPair, Participant};
use crate::utils::validation::{is_valid_address, is_valid_name, MAX_PARTICIPANTS};

/// Problems with the roster or exclusion list that make a draw meaningless
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("At least 2 participants are required, found {0}")]
    TooFewParticipants(usize),

    #[error("Too many participants: {0} exceeds maximum of {MAX_PARTICIPANTS}")]
    TooManyParticipants(usize),

    #[error("Participant '{0}' appears more than once")]
    DuplicateParticipant(Participant),

    #[error("Exclusion pair {pair} references unknown participant '{participant}'")]
    UnknownParticipant {
        pair: ExclusionPair,
        participant: Participant,
    },

    #[error("Invalid participant name: {0:?}")]
    InvalidName(Participant),

    #[error("Participant '{participant}' has an invalid address: '{address}'")]
    InvalidAddress {
        participant: Participant,
        address: String,
    },
}

/// A roster entry: who takes part and where their notification goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "name")]
    pub participant: Participant,

    #[serde(rename = "email")]
    pub address: String,
}

impl Member {
    pub fn new(participant: impl Into<Participant>, address: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            address: address.into(),
        }
    }
}

/// The full input to a draw: members in roster order plus exclusion pairs.
///
/// Loaded once at startup and never mutated while the draw runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(rename = "participants")]
    pub members: Vec<Member>,

    #[serde(default)]
    pub exclusions: Vec<ExclusionPair>,
}

impl Roster {
    #[must_use]
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members,
            exclusions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_exclusions(mut self, exclusions: impl IntoIterator<Item = ExclusionPair>) -> Self {
        for pair in exclusions {
            if !self.exclusions.contains(&pair) {
                self.exclusions.push(pair);
            }
        }
        self
    }

    /// Participants in roster order
    #[must_use]
    pub fn participants(&self) -> Vec<Participant> {
        self.members.iter().map(|m| m.participant.clone()).collect()
    }

    #[must_use]
    pub fn address_of(&self, participant: &Participant) -> Option<&str> {
        self.members
            .iter()
            .find(|m| &m.participant == participant)
            .map(|m| m.address.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check the roster is usable for a draw.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigurationError` found: participant count out of
    /// range, duplicate or malformed names, malformed addresses, or exclusions naming
    /// someone who is not on the roster.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.members.len() < 2 {
            return Err(ConfigurationError::TooFewParticipants(self.members.len()));
        }
        if self.members.len() > MAX_PARTICIPANTS {
            return Err(ConfigurationError::TooManyParticipants(self.members.len()));
        }

        let mut seen = HashSet::with_capacity(self.members.len());
        for member in &self.members {
            if !seen.insert(&member.participant) {
                return Err(ConfigurationError::DuplicateParticipant(
                    member.participant.clone(),
                ));
            }
            if !is_valid_name(member.participant.as_str()) {
                return Err(ConfigurationError::InvalidName(member.participant.clone()));
            }
            if !is_valid_address(&member.address) {
                return Err(ConfigurationError::InvalidAddress {
                    participant: member.participant.clone(),
                    address: member.address.clone(),
                });
            }
        }

        check_exclusions_known(&seen, &self.exclusions)
    }
}

/// Verify every exclusion pair only names known participants
pub(crate) fn check_exclusions_known(
    known: &HashSet<&Participant>,
    exclusions: &[ExclusionPair],
) -> Result<(), ConfigurationError> {
    for pair in exclusions {
        let (a, b) = pair.members();
        for participant in [a, b] {
            if !known.contains(participant) {
                return Err(ConfigurationError::UnknownParticipant {
                    pair: pair.clone(),
                    participant: participant.clone(),
                });
            }
        }
    }
    Ok(())
}
