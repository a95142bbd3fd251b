use crate::model::{Participant, Preference, Topping};
use std::collections::{BTreeMap, BTreeSet};

/// Weight of a DISLIKE when no administrator override is configured.
pub const CANONICAL_DISLIKE_WEIGHT: f64 = Preference::Dislike.value() as f64;

/// Position of a (participant, topping) pair in the ordered order inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairIndex {
    pub participant: usize,
    pub topping: usize,
}

impl PairIndex {
    pub const fn new(participant: usize, topping: usize) -> Self {
        Self {
            participant,
            topping,
        }
    }
}

/// Resolved preferences of one order.
///
/// Allergy pairs are kept apart from the scores; pairs scoring exactly zero
/// (NEUTRAL, or DISLIKE under a zero weight) are absent from both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceMatrix {
    allergies: BTreeSet<PairIndex>,
    scores: BTreeMap<PairIndex, f64>,
}

impl PreferenceMatrix {
    pub fn allergies(&self) -> impl Iterator<Item = PairIndex> + '_ {
        self.allergies.iter().copied()
    }

    pub fn is_allergic(&self, pair: PairIndex) -> bool {
        self.allergies.contains(&pair)
    }

    /// Nonzero scores in (participant, topping) order.
    pub fn scores(&self) -> impl Iterator<Item = (PairIndex, f64)> + '_ {
        self.scores.iter().map(|(pair, score)| (*pair, *score))
    }

    pub fn score(&self, pair: PairIndex) -> f64 {
        self.scores.get(&pair).copied().unwrap_or(0.0)
    }

    pub fn allergy_count(&self) -> usize {
        self.allergies.len()
    }

    pub fn scorable_count(&self) -> usize {
        self.scores.len()
    }
}

/// Resolves every (participant, topping) preference of an order into a
/// [`PreferenceMatrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceMatrixBuilder {
    dislike_weight: f64,
}

impl Default for PreferenceMatrixBuilder {
    fn default() -> Self {
        Self::new(CANONICAL_DISLIKE_WEIGHT)
    }
}

impl PreferenceMatrixBuilder {
    pub fn new(dislike_weight: f64) -> Self {
        Self { dislike_weight }
    }

    pub fn dislike_weight(&self) -> f64 {
        self.dislike_weight
    }

    pub fn build(&self, participants: &[Participant], toppings: &[Topping]) -> PreferenceMatrix {
        let mut matrix = PreferenceMatrix::default();
        let override_dislike = self.dislike_weight != CANONICAL_DISLIKE_WEIGHT;

        for (p_idx, participant) in participants.iter().enumerate() {
            for (t_idx, topping) in toppings.iter().enumerate() {
                let pair = PairIndex::new(p_idx, t_idx);
                let score = match participant.preference_for(topping.id) {
                    Preference::Allergy => {
                        matrix.allergies.insert(pair);
                        continue;
                    }
                    Preference::Dislike if override_dislike => self.dislike_weight,
                    preference => f64::from(preference.value()),
                };
                // NEUTRAL contributes nothing and stays out of the model.
                if score != 0.0 {
                    matrix.scores.insert(pair, score);
                }
            }
        }

        tracing::debug!(
            participant_count = participants.len(),
            topping_count = toppings.len(),
            allergy_pairs = matrix.allergy_count(),
            scorable_pairs = matrix.scorable_count(),
            dislike_weight = self.dislike_weight,
            "Preference matrix built"
        );

        matrix
    }
}
