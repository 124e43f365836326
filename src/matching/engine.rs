use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::core::types::Participant;
use crate::matching::graph::CandidateGraph;

/// An assignment of givers to recipients.
///
/// Stored as recipient -> giver; the inverse is derived on demand. A complete
/// matching is a bijection over the participant set, but the engine may return
/// fewer entries when exclusions make full coverage impossible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matching {
    givers: BTreeMap<Participant, Participant>,
}

impl Matching {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matching from `(recipient, giver)` pairs. A later pair for the
    /// same recipient replaces an earlier one.
    pub fn from_pairs<I, R, G>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, G)>,
        R: Into<Participant>,
        G: Into<Participant>,
    {
        Self {
            givers: pairs
                .into_iter()
                .map(|(r, g)| (r.into(), g.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn giver_of(&self, recipient: &Participant) -> Option<&Participant> {
        self.givers.get(recipient)
    }

    #[must_use]
    pub fn recipient_of(&self, giver: &Participant) -> Option<&Participant> {
        self.givers
            .iter()
            .find(|(_, g)| *g == giver)
            .map(|(r, _)| r)
    }

    /// `(recipient, giver)` pairs, ordered by recipient
    pub fn pairs(&self) -> impl Iterator<Item = (&Participant, &Participant)> {
        self.givers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.givers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.givers.is_empty()
    }
}

/// Vertices left unreached by the final layering.
///
/// Together they form a maximum independent set of the candidate graph:
/// no edge joins any giver here to any recipient here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndependentSet {
    pub givers: Vec<Participant>,
    pub recipients: Vec<Participant>,
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Stop after this many augmentation phases even if longer augmenting
    /// paths may still exist. `None` runs to completion.
    pub max_phases: Option<usize>,
}

/// Everything the engine learned while matching
#[derive(Debug, Clone)]
pub struct EngineOutcome {
    pub matching: Matching,

    /// Number of phases that performed augmentation
    pub phases: usize,

    /// Total augmenting paths applied across all phases
    pub augmentations: usize,

    /// Size of the greedy seed before any augmentation
    pub seed_size: usize,

    /// True if `max_phases` stopped the search while augmenting paths remained
    pub truncated: bool,

    /// Only available when the search ran to completion
    pub independent_set: Option<IndependentSet>,
}

impl EngineOutcome {
    /// True if every participant of `graph` received a giver
    #[must_use]
    pub fn is_complete(&self, graph: &CandidateGraph) -> bool {
        self.matching.len() == graph.len()
    }
}

/// Maximum-cardinality bipartite matching (Hopcroft-Karp).
///
/// Each phase layers the residual graph breadth-first from every unmatched
/// giver, then walks backward from each free recipient reached in the last
/// layer to flip a vertex-disjoint set of shortest augmenting paths. Each
/// phase costs O(E) and at most O(sqrt(V)) phases run, so the total is
/// O(E sqrt(V)).
pub struct MatchingEngine {
    config: EngineConfig,
}

impl MatchingEngine {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Compute a maximum matching over `graph`.
    ///
    /// Never fails: if exclusions make a complete assignment impossible the
    /// result simply has fewer entries than there are participants.
    #[must_use]
    pub fn compute_maximum_matching(&self, graph: &CandidateGraph) -> Matching {
        self.solve(graph).matching
    }

    /// Like [`compute_maximum_matching`](Self::compute_maximum_matching), but
    /// also returns phase statistics and the independent-set byproduct.
    #[must_use]
    pub fn solve(&self, graph: &CandidateGraph) -> EngineOutcome {
        let mut search = Search::new(graph.adjacency(), graph.len());
        let stats = search.run(self.config.max_phases);

        let matching = Matching {
            givers: search
                .mate
                .iter()
                .enumerate()
                .filter_map(|(recipient, giver)| {
                    giver.map(|g| {
                        (
                            graph.participant(recipient).clone(),
                            graph.participant(g).clone(),
                        )
                    })
                })
                .collect(),
        };

        let independent_set = stats.unreached.map(|(givers, recipients)| IndependentSet {
            givers: givers.into_iter().map(|i| graph.participant(i).clone()).collect(),
            recipients: recipients
                .into_iter()
                .map(|i| graph.participant(i).clone())
                .collect(),
        });

        if matching.len() < graph.len() && !stats.truncated {
            warn!(
                matched = matching.len(),
                participants = graph.len(),
                "No complete assignment exists for these exclusions"
            );
        }

        EngineOutcome {
            matching,
            phases: stats.phases,
            augmentations: stats.augmentations,
            seed_size: stats.seed_size,
            truncated: stats.truncated,
            independent_set,
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Layer membership of a giver during one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    /// Not reached, or already consumed by an augmenting search
    Unreached,
    /// Unmatched giver in the first layer
    Root,
    /// Matched giver reached through its own recipient
    Via(usize),
}

/// One pending recipient on the backward search stack
struct Frame {
    recipient: usize,
    preds: Vec<usize>,
    next: usize,
}

#[derive(Debug)]
struct SearchStats {
    phases: usize,
    augmentations: usize,
    seed_size: usize,
    truncated: bool,
    unreached: Option<(Vec<usize>, Vec<usize>)>,
}

/// Index-based working state for one run of the algorithm
struct Search<'g> {
    adjacency: &'g [Vec<usize>],
    /// mate[recipient] = matched giver
    mate: Vec<Option<usize>>,
    /// Per giver, its position in the current layering
    layer: Vec<Layer>,
    /// Per recipient, the givers in the previous layer that reached it.
    /// Taken (set to `None`) once explored so no edge is reused within a phase.
    preds: Vec<Option<Vec<usize>>>,
}

impl<'g> Search<'g> {
    fn new(adjacency: &'g [Vec<usize>], recipients: usize) -> Self {
        Self {
            adjacency,
            mate: vec![None; recipients],
            layer: vec![Layer::Unreached; adjacency.len()],
            preds: vec![None; recipients],
        }
    }

    fn run(&mut self, max_phases: Option<usize>) -> SearchStats {
        let seed_size = self.greedy_seed();
        debug!(seed_size, "Greedy seed matching built");

        let mut stats = SearchStats {
            phases: 0,
            augmentations: 0,
            seed_size,
            truncated: false,
            unreached: None,
        };

        loop {
            let free = self.build_layers();
            if free.is_empty() {
                stats.unreached = Some(self.unreached());
                break;
            }
            if max_phases.is_some_and(|cap| stats.phases >= cap) {
                warn!(
                    phases = stats.phases,
                    "Phase limit reached before matching was maximum"
                );
                stats.truncated = true;
                break;
            }

            stats.phases += 1;
            let mut found = 0;
            for recipient in free.iter().copied() {
                if self.augment(recipient) {
                    found += 1;
                }
            }
            stats.augmentations += found;
            debug!(
                phase = stats.phases,
                free_recipients = free.len(),
                augmented = found,
                "Augmentation phase complete"
            );
        }

        stats
    }

    /// Give each giver the first unclaimed recipient in its candidate list
    fn greedy_seed(&mut self) -> usize {
        let mut size = 0;
        for (giver, candidates) in self.adjacency.iter().enumerate() {
            if let Some(&recipient) = candidates.iter().find(|&&r| self.mate[r].is_none()) {
                self.mate[recipient] = Some(giver);
                size += 1;
            }
        }
        size
    }

    /// Breadth-first layering from all unmatched givers.
    ///
    /// Returns the free recipients reached in the final layer. An empty
    /// result means no augmenting path exists.
    fn build_layers(&mut self) -> Vec<usize> {
        self.layer.fill(Layer::Root);
        for giver in self.mate.iter().flatten() {
            self.layer[*giver] = Layer::Unreached;
        }
        self.preds.fill(None);

        let mut frontier: Vec<usize> = (0..self.adjacency.len())
            .filter(|&g| self.layer[g] == Layer::Root)
            .collect();
        let mut free = Vec::new();
        let mut reached: Vec<Option<Vec<usize>>> = vec![None; self.mate.len()];
        let mut order = Vec::new();

        while !frontier.is_empty() && free.is_empty() {
            for &giver in &frontier {
                for &recipient in &self.adjacency[giver] {
                    if self.preds[recipient].is_some() {
                        continue;
                    }
                    if let Some(list) = reached[recipient].as_mut() {
                        list.push(giver);
                    } else {
                        reached[recipient] = Some(vec![giver]);
                        order.push(recipient);
                    }
                }
            }

            let mut next = Vec::new();
            for recipient in order.drain(..) {
                self.preds[recipient] = reached[recipient].take();
                match self.mate[recipient] {
                    Some(giver) => {
                        self.layer[giver] = Layer::Via(recipient);
                        next.push(giver);
                    }
                    None => free.push(recipient),
                }
            }
            frontier = next;
        }

        free
    }

    /// Search backward from a free recipient for an alternating path to an
    /// unmatched giver and flip it.
    ///
    /// Uses an explicit stack so path length is bounded only by memory.
    /// Predecessor lists and giver layer entries are consumed as they are
    /// explored, even on failed branches.
    fn augment(&mut self, free: usize) -> bool {
        let Some(preds) = self.preds[free].take() else {
            return false;
        };
        let mut stack = vec![Frame {
            recipient: free,
            preds,
            next: 0,
        }];
        // Result of the frame most recently popped
        let mut outcome: Option<bool> = None;

        while let Some(frame) = stack.last_mut() {
            if outcome.take() == Some(true) {
                // The child path succeeded through the giver we descended via
                let giver = frame.preds[frame.next - 1];
                self.mate[frame.recipient] = Some(giver);
                stack.pop();
                outcome = Some(true);
                continue;
            }

            let Some(&giver) = frame.preds.get(frame.next) else {
                stack.pop();
                outcome = Some(false);
                continue;
            };
            frame.next += 1;

            match std::mem::replace(&mut self.layer[giver], Layer::Unreached) {
                Layer::Unreached => {}
                Layer::Root => {
                    self.mate[frame.recipient] = Some(giver);
                    stack.pop();
                    outcome = Some(true);
                }
                Layer::Via(previous) => {
                    if let Some(preds) = self.preds[previous].take() {
                        stack.push(Frame {
                            recipient: previous,
                            preds,
                            next: 0,
                        });
                    }
                }
            }
        }

        outcome == Some(true)
    }

    /// Givers still layered and recipients never layered after the last phase
    fn unreached(&self) -> (Vec<usize>, Vec<usize>) {
        let givers = (0..self.adjacency.len())
            .filter(|&g| self.layer[g] != Layer::Unreached)
            .collect();

        let mut adjacent = vec![false; self.mate.len()];
        for candidates in self.adjacency {
            for &recipient in candidates {
                adjacent[recipient] = true;
            }
        }
        let recipients = (0..self.mate.len())
            .filter(|&r| adjacent[r] && self.preds[r].is_none())
            .collect();

        (givers, recipients)
    }
}
