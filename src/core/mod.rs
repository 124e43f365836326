//! Core data types for the gift exchange.
//!
//! - [`Participant`]: an opaque identifier, compared by value
//! - [`ExclusionPair`]: two participants who must never be matched together
//! - [`Roster`]: members with contact addresses plus the exclusion list
//!
//! Identity is always value equality on the participant name. Two rosters
//! loaded from different files that both list `"tom"` refer to the same
//! person, and an exclusion `("tom", "julia")` matches regardless of which
//! string instance produced it.

pub mod roster;
pub mod types;

pub use roster::{ConfigurationError, Member, Roster};
pub use types::{ExclusionPair, Participant, SelfExclusion};
