//! Property tests for the candidate graph and matching engine.
//!
//! Rosters of up to 8 participants with random exclusion sets are small
//! enough to compute the true maximum matching exhaustively.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::matching::{cycles, CandidateGraph, MatchingEngine};
use secret_santa::{ExclusionPair, Participant};

fn participants(n: usize) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(format!("p{i}"))).collect()
}

/// Pick exclusion pairs out of all unordered pairs according to `mask`
fn exclusions(people: &[Participant], mask: u32) -> Vec<ExclusionPair> {
    let mut pairs = Vec::new();
    let mut bit = 0;
    for i in 0..people.len() {
        for j in (i + 1)..people.len() {
            if mask & (1 << bit) != 0 {
                pairs.push(ExclusionPair::new(people[i].clone(), people[j].clone()).unwrap());
            }
            bit += 1;
        }
    }
    pairs
}

/// Exhaustive maximum matching size over the graph's candidate lists
fn brute_force_size(graph: &CandidateGraph) -> usize {
    let people = graph.participants();
    let adjacency: Vec<Vec<usize>> = people
        .iter()
        .map(|giver| {
            graph
                .candidates(giver)
                .unwrap()
                .map(|r| people.iter().position(|p| p == r).unwrap())
                .collect()
        })
        .collect();

    fn best(giver: usize, used: u32, adjacency: &[Vec<usize>]) -> usize {
        if giver == adjacency.len() {
            return 0;
        }
        let mut result = best(giver + 1, used, adjacency);
        for &r in &adjacency[giver] {
            if used & (1 << r) == 0 {
                result = result.max(1 + best(giver + 1, used | (1 << r), adjacency));
            }
        }
        result
    }

    best(0, 0, &adjacency)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_engine_matches_brute_force(n in 2usize..=8, mask in any::<u32>(), seed in any::<u64>()) {
        let people = participants(n);
        let excluded = exclusions(&people, mask);
        let graph = CandidateGraph::build(&people, &excluded, &mut StdRng::seed_from_u64(seed)).unwrap();

        let matching = MatchingEngine::new().compute_maximum_matching(&graph);
        prop_assert_eq!(matching.len(), brute_force_size(&graph));
    }

    #[test]
    fn prop_no_self_or_excluded_assignment(n in 2usize..=8, mask in any::<u32>(), seed in any::<u64>()) {
        let people = participants(n);
        let excluded = exclusions(&people, mask);
        let graph = CandidateGraph::build(&people, &excluded, &mut StdRng::seed_from_u64(seed)).unwrap();

        for giver in &people {
            prop_assert!(graph.candidates(giver).unwrap().all(|r| r != giver));
        }

        let matching = MatchingEngine::new().compute_maximum_matching(&graph);
        let mut givers_seen = std::collections::HashSet::new();
        for (recipient, giver) in matching.pairs() {
            prop_assert_ne!(recipient, giver);
            prop_assert!(excluded.iter().all(|pair| !pair.forbids(recipient, giver)));
            prop_assert!(givers_seen.insert(giver.clone()), "giver used twice");
        }
        prop_assert!(cycles::check_exclusions(&matching, &excluded).is_ok());
    }

    #[test]
    fn prop_complete_matchings_validate(n in 2usize..=8, mask in any::<u32>(), seed in any::<u64>()) {
        let people = participants(n);
        let excluded = exclusions(&people, mask);
        let graph = CandidateGraph::build(&people, &excluded, &mut StdRng::seed_from_u64(seed)).unwrap();
        let matching = MatchingEngine::new().compute_maximum_matching(&graph);

        match cycles::validate(&matching, &people) {
            Ok(report) => {
                prop_assert_eq!(matching.len(), n);
                prop_assert_eq!(report.total(), n);
                prop_assert!(report.lengths().iter().all(|&len| len >= 2));
            }
            Err(_) => prop_assert!(matching.len() < n),
        }
    }

    #[test]
    fn prop_same_seed_same_matching(n in 2usize..=8, mask in any::<u32>(), seed in any::<u64>()) {
        let people = participants(n);
        let excluded = exclusions(&people, mask);
        let engine = MatchingEngine::new();

        let first = CandidateGraph::build(&people, &excluded, &mut StdRng::seed_from_u64(seed)).unwrap();
        let second = CandidateGraph::build(&people, &excluded, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(
            engine.compute_maximum_matching(&first),
            engine.compute_maximum_matching(&second)
        );
    }

    #[test]
    fn prop_independent_set_size(n in 2usize..=8, mask in any::<u32>(), seed in any::<u64>()) {
        let people = participants(n);
        let excluded = exclusions(&people, mask);
        let graph = CandidateGraph::build(&people, &excluded, &mut StdRng::seed_from_u64(seed)).unwrap();
        let outcome = MatchingEngine::new().solve(&graph);

        let set = outcome.independent_set.unwrap();
        for giver in &set.givers {
            for recipient in &set.recipients {
                prop_assert!(!graph.contains_edge(giver, recipient));
            }
        }
    }
}
