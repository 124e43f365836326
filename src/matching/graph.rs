use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

use crate::core::roster::{check_exclusions_known, ConfigurationError};
use crate::core::types::{ExclusionPair, Participant};

/// Who may give to whom.
///
/// Givers and recipients are the same participant set viewed from the two
/// sides of a bipartite graph. Vertices are stored as indices into
/// `participants`; the candidate lists of every giver share one randomized
/// ordering so the greedy seed in the engine does not favour roster order.
#[derive(Debug, Clone)]
pub struct CandidateGraph {
    participants: Vec<Participant>,
    index: HashMap<Participant, usize>,
    /// adjacency[giver] = recipient indices, in candidate order
    adjacency: Vec<Vec<usize>>,
}

impl CandidateGraph {
    /// Build the candidate graph for a roster.
    ///
    /// Every participant may give to every other participant unless the two
    /// form an exclusion pair. Candidate order comes from `rng`; pass a seeded
    /// generator for reproducible draws.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::TooFewParticipants` for fewer than two
    /// participants, `DuplicateParticipant` if a name repeats, and
    /// `UnknownParticipant` if an exclusion names someone not in the set.
    pub fn build<R: Rng + ?Sized>(
        participants: &[Participant],
        exclusions: &[ExclusionPair],
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if participants.len() < 2 {
            return Err(ConfigurationError::TooFewParticipants(participants.len()));
        }

        let mut index = HashMap::with_capacity(participants.len());
        for (i, p) in participants.iter().enumerate() {
            if index.insert(p.clone(), i).is_some() {
                return Err(ConfigurationError::DuplicateParticipant(p.clone()));
            }
        }

        let known: HashSet<&Participant> = participants.iter().collect();
        check_exclusions_known(&known, exclusions)?;

        let forbidden: HashSet<(usize, usize)> = exclusions
            .iter()
            .map(|pair| {
                let (a, b) = pair.members();
                (index[a], index[b])
            })
            .flat_map(|(a, b)| [(a, b), (b, a)])
            .collect();

        let mut order: Vec<usize> = (0..participants.len()).collect();
        order.shuffle(rng);

        let adjacency = (0..participants.len())
            .map(|giver| {
                order
                    .iter()
                    .copied()
                    .filter(|&recipient| {
                        recipient != giver && !forbidden.contains(&(giver, recipient))
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            participants: participants.to_vec(),
            index,
            adjacency,
        })
    }

    /// All participants, in roster order
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Permissible recipients for a giver, in candidate order
    pub fn candidates(&self, giver: &Participant) -> Option<impl Iterator<Item = &Participant>> {
        let &i = self.index.get(giver)?;
        Some(self.adjacency[i].iter().map(|&r| &self.participants[r]))
    }

    #[must_use]
    pub fn contains_edge(&self, giver: &Participant, recipient: &Participant) -> bool {
        match (self.index.get(giver), self.index.get(recipient)) {
            (Some(&g), Some(&r)) => self.adjacency[g].contains(&r),
            _ => false,
        }
    }

    /// Number of participants (vertices on each side)
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub(crate) fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    pub(crate) fn participant(&self, index: usize) -> &Participant {
        &self.participants[index]
    }
}
