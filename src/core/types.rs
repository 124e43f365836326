use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a member of the gift exchange.
///
/// Participants compare by value: two identifiers with the same text are the
/// same participant, regardless of where the strings came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(pub String);

impl Participant {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Participant {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Participant {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Exclusion pair must name two different participants, got '{0}' twice")]
pub struct SelfExclusion(pub Participant);

/// Two participants who must never be matched to each other, in either direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Participant, Participant)", into = "(Participant, Participant)")]
pub struct ExclusionPair {
    first: Participant,
    second: Participant,
}

impl ExclusionPair {
    /// Create an exclusion pair. The pair is unordered; `(a, b)` and `(b, a)`
    /// describe the same constraint.
    ///
    /// # Errors
    ///
    /// Returns `SelfExclusion` if both sides name the same participant.
    pub fn new(a: impl Into<Participant>, b: impl Into<Participant>) -> Result<Self, SelfExclusion> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(SelfExclusion(a));
        }
        // Normalized so derived equality and hashing ignore orientation
        if a <= b {
            Ok(Self { first: a, second: b })
        } else {
            Ok(Self { first: b, second: a })
        }
    }

    #[must_use]
    pub fn members(&self) -> (&Participant, &Participant) {
        (&self.first, &self.second)
    }

    /// True if this pair forbids matching `a` with `b` (in either direction)
    #[must_use]
    pub fn forbids(&self, a: &Participant, b: &Participant) -> bool {
        (&self.first == a && &self.second == b) || (&self.first == b && &self.second == a)
    }

    #[must_use]
    pub fn involves(&self, p: &Participant) -> bool {
        &self.first == p || &self.second == p
    }
}

impl std::fmt::Display for ExclusionPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

impl TryFrom<(Participant, Participant)> for ExclusionPair {
    type Error = SelfExclusion;

    fn try_from((a, b): (Participant, Participant)) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

impl From<ExclusionPair> for (Participant, Participant) {
    fn from(pair: ExclusionPair) -> Self {
        (pair.first, pair.second)
    }
}
