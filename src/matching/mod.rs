//! Gift assignment: candidate graph, matching engine, and cycle validation.
//!
//! The pipeline runs in three steps:
//!
//! 1. [`CandidateGraph::build`]: every participant may give to every other
//!    participant except themselves and their exclusion partners
//! 2. [`MatchingEngine`]: Hopcroft-Karp maximum-cardinality matching over
//!    that graph
//! 3. [`cycles::validate`]: confirm the matching covers everyone and split it
//!    into gift cycles
//!
//! The engine never fails. When exclusions make a complete assignment
//! impossible it returns the largest matching it can, and validation reports
//! [`IncompleteMatchingError`].
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use secret_santa::matching::{cycles, CandidateGraph, MatchingEngine};
//! use secret_santa::{ExclusionPair, Participant};
//!
//! let participants: Vec<Participant> =
//!     ["babeth", "johan", "louise", "tom"].into_iter().map(Participant::from).collect();
//! let exclusions = vec![ExclusionPair::new("johan", "louise").unwrap()];
//!
//! let mut rng = StdRng::seed_from_u64(2002);
//! let graph = CandidateGraph::build(&participants, &exclusions, &mut rng).unwrap();
//! let matching = MatchingEngine::new().compute_maximum_matching(&graph);
//!
//! let report = cycles::validate(&matching, &participants).unwrap();
//! assert_eq!(report.total(), 4);
//! ```

pub mod cycles;
pub mod engine;
pub mod graph;
pub mod pipeline;

pub use cycles::{Cycle, CycleReport, IncompleteMatchingError, ValidationError};
pub use engine::{EngineConfig, EngineOutcome, IndependentSet, Matching, MatchingEngine};
pub use graph::CandidateGraph;
pub use pipeline::{draw, solve_roster, Draw, DrawError};
