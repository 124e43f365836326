//! # secret-santa
//!
//! A library for drawing secret santa assignments.
//!
//! Every participant is assigned exactly one other participant, nobody draws
//! themselves, and the members of each exclusion pair (couples, usually)
//! never draw each other in either direction.
//!
//! Rather than shuffling and retrying until a valid permutation turns up,
//! `secret-santa` treats the draw as a maximum-cardinality bipartite
//! matching between givers and recipients. If any valid assignment exists
//! the matching finds one; if none exists it says so instead of looping.
//!
//! ## Features
//!
//! - **Hopcroft-Karp matching**: O(E sqrt(V)) phased augmentation
//! - **Exclusion pairs**: forbid matches between specific participants
//! - **Reproducible draws**: candidate order comes from an injected, seedable RNG
//! - **Cycle validation**: confirms full coverage and reports gift cycles
//! - **Notification**: sendmail delivery, or a dry-run preview
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use secret_santa::{draw, EngineConfig, ExclusionPair, Member, Roster};
//!
//! let roster = Roster::new(vec![
//!     Member::new("claude", "claude@example.org"),
//!     Member::new("johan", "johan@example.org"),
//!     Member::new("louise", "louise@example.org"),
//!     Member::new("morgane", "morgane@example.org"),
//! ])
//! .with_exclusions([ExclusionPair::new("johan", "louise").unwrap()]);
//!
//! let mut rng = StdRng::seed_from_u64(25);
//! let result = draw(&roster, EngineConfig::default(), &mut rng).unwrap();
//!
//! for cycle in &result.report.cycles {
//!     println!("Cycle with {} people", cycle.len());
//! }
//! assert_eq!(result.report.total(), 4);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Participants, exclusion pairs, and rosters
//! - [`matching`]: Candidate graph, matching engine, and cycle validator
//! - [`notify`]: Message composition and delivery
//! - [`parsing`]: Roster loaders for JSON, TSV, and CSV files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod notify;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::roster::{ConfigurationError, Member, Roster};
pub use core::types::{ExclusionPair, Participant};
pub use matching::engine::{EngineConfig, Matching, MatchingEngine};
pub use matching::pipeline::{draw, Draw, DrawError};
