use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::core::roster::{ConfigurationError, Roster};
use crate::matching::cycles::{self, CycleReport, ValidationError};
use crate::matching::engine::{EngineConfig, EngineOutcome, Matching, MatchingEngine};
use crate::matching::graph::CandidateGraph;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A finished, validated assignment
#[derive(Debug, Clone)]
pub struct Draw {
    pub outcome: EngineOutcome,
    pub report: CycleReport,
}

impl Draw {
    #[must_use]
    pub fn matching(&self) -> &Matching {
        &self.outcome.matching
    }
}

/// Validate the roster, build its candidate graph and run the engine.
///
/// The outcome may be partial; callers that need a complete assignment
/// should use [`draw`].
///
/// # Errors
///
/// Returns `ConfigurationError` if the roster is unusable.
pub fn solve_roster<R: Rng + ?Sized>(
    roster: &Roster,
    config: EngineConfig,
    rng: &mut R,
) -> Result<EngineOutcome, ConfigurationError> {
    roster.validate()?;

    let graph = CandidateGraph::build(&roster.participants(), &roster.exclusions, rng)?;
    info!(
        participants = graph.len(),
        exclusions = roster.exclusions.len(),
        candidates = graph.edge_count(),
        "Candidate graph built"
    );

    Ok(MatchingEngine::with_config(config).solve(&graph))
}

/// Run a complete draw: graph builder, matching engine, then cycle validator.
///
/// # Errors
///
/// Returns `DrawError::Configuration` for an unusable roster and
/// `DrawError::Validation` if no complete assignment could be found.
pub fn draw<R: Rng + ?Sized>(
    roster: &Roster,
    config: EngineConfig,
    rng: &mut R,
) -> Result<Draw, DrawError> {
    let outcome = solve_roster(roster, config, rng)?;

    let report = cycles::validate(&outcome.matching, &roster.participants())?;
    cycles::check_exclusions(&outcome.matching, &roster.exclusions)?;

    for cycle in &report.cycles {
        info!("Cycle with {} people", cycle.len());
    }

    Ok(Draw { outcome, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::roster::Member;
    use crate::core::types::ExclusionPair;
    use crate::matching::cycles::IncompleteMatchingError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_roster(names: &[&str]) -> Roster {
        Roster::new(
            names
                .iter()
                .map(|&n| Member::new(n, format!("{n}@example.org")))
                .collect(),
        )
    }

    #[test]
    fn test_four_without_exclusions() {
        let roster = make_roster(&["A", "B", "C", "D"]);
        let result = draw(&roster, EngineConfig::default(), &mut StdRng::seed_from_u64(11)).unwrap();

        assert_eq!(result.matching().len(), 4);
        assert_eq!(result.report.total(), 4);
        assert!(result.report.lengths().iter().all(|&len| len > 1));
    }

    #[test]
    fn test_excluded_pair_of_two_is_incomplete() {
        let roster = make_roster(&["A", "B"])
            .with_exclusions([ExclusionPair::new("A", "B").unwrap()]);
        let err = draw(&roster, EngineConfig::default(), &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(
            err,
            DrawError::Validation(ValidationError::Incomplete(IncompleteMatchingError {
                matched: 0,
                expected: 2,
                ..
            }))
        ));
    }

    #[test]
    fn test_three_without_exclusions_is_one_cycle() {
        let roster = make_roster(&["A", "B", "C"]);
        for seed in 0..8 {
            let result =
                draw(&roster, EngineConfig::default(), &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(result.report.lengths(), vec![3]);
        }
    }

    #[test]
    fn test_three_with_exclusion_is_incomplete() {
        let roster = make_roster(&["A", "B", "C"])
            .with_exclusions([ExclusionPair::new("A", "B").unwrap()]);
        let err = draw(&roster, EngineConfig::default(), &mut StdRng::seed_from_u64(5)).unwrap_err();
        assert!(matches!(
            err,
            DrawError::Validation(ValidationError::Incomplete(_))
        ));
    }

    #[test]
    fn test_configuration_error_surfaces() {
        let roster = make_roster(&["A"]);
        let err = draw(&roster, EngineConfig::default(), &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(
            err,
            DrawError::Configuration(ConfigurationError::TooFewParticipants(1))
        );
    }

    #[test]
    fn test_solve_roster_returns_partial() {
        let roster = make_roster(&["A", "B", "C"])
            .with_exclusions([ExclusionPair::new("A", "B").unwrap()]);
        let outcome =
            solve_roster(&roster, EngineConfig::default(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(outcome.matching.len(), 2);
        assert!(outcome.independent_set.is_some());
    }
}
