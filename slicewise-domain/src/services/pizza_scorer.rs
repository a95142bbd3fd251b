use crate::model::{Participant, ParticipantId, Pizza, Preference};
use fxhash::FxHashMap;

/// Satisfaction report for produced pizzas.
///
/// Scores use the raw preference codes: every LIKE on the pizza counts +1 and
/// every DISLIKE -1 for each diner, regardless of any configured dislike weight.
pub struct PizzaScorer<'a> {
    participants: FxHashMap<ParticipantId, &'a Participant>,
}

impl<'a> PizzaScorer<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        Self {
            participants: participants.iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Participants unknown to the scorer contribute nothing.
    pub fn score(&self, pizza: &Pizza) -> i64 {
        pizza
            .participants
            .iter()
            .filter_map(|id| self.participants.get(id))
            .flat_map(|participant| {
                pizza
                    .toppings
                    .iter()
                    .map(move |topping| participant.preference_for(*topping))
            })
            .filter(|preference| !matches!(preference, Preference::Neutral | Preference::Allergy))
            .map(|preference| i64::from(preference.value()))
            .sum()
    }

    pub fn scores(&self, pizzas: &[Pizza]) -> Vec<i64> {
        pizzas.iter().map(|pizza| self.score(pizza)).collect()
    }
}
