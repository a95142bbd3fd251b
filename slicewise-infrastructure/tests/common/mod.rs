#![allow(dead_code)]

use slicewise_domain::{
    OptimizationMode, OrderContext, Participant, ParticipantId, Pizza, Preference, Topping,
    ToppingId,
};
use std::collections::HashMap;

pub fn topping(id: u64, name: &str) -> Topping {
    Topping::new(ToppingId(id), name)
}

pub fn person(id: u64, name: &str, preferences: &[(u64, Preference)]) -> Participant {
    let mut participant = Participant::new(ParticipantId(id), name);
    for (topping, preference) in preferences {
        participant = participant.with_preference(ToppingId(*topping), *preference);
    }
    participant
}

/// A deterministic table with a mix of every preference level, split
/// across four pizzas.
pub fn crowd(participants: u64, toppings: u64, mode: OptimizationMode) -> OrderContext {
    let preference = |p: u64, t: u64| match (p * 7 + t * 3) % 11 {
        0 => Preference::Allergy,
        1..=3 => Preference::Dislike,
        4..=6 => Preference::Neutral,
        _ => Preference::Like,
    };
    OrderContext {
        participants: (1..=participants)
            .map(|p| {
                let ratings: Vec<(u64, Preference)> =
                    (1..=toppings).map(|t| (t, preference(p, t))).collect();
                person(p, &format!("P{p}"), &ratings)
            })
            .collect(),
        toppings: (1..=toppings).map(|t| topping(t, &format!("T{t}"))).collect(),
        num_pizzas: 4,
        optimization_mode: mode,
        shareability_weight: 0.2,
    }
}

/// Checks every invariant an accepted plan must satisfy.
pub fn assert_plan_invariants(order: &OrderContext, max_toppings: usize, pizzas: &[Pizza]) {
    assert_eq!(
        pizzas.len(),
        order.num_pizzas,
        "one pizza per requested pizza"
    );

    let mut seen: HashMap<ParticipantId, usize> = HashMap::new();
    for pizza in pizzas {
        for participant in &pizza.participants {
            *seen.entry(*participant).or_insert(0) += 1;
        }
    }
    for participant in &order.participants {
        assert_eq!(
            seen.get(&participant.id).copied(),
            Some(1),
            "{} must be on exactly one pizza",
            participant.id
        );
    }
    assert_eq!(
        seen.len(),
        order.participants.len(),
        "no unknown participants"
    );

    for pizza in pizzas {
        assert!(!pizza.participants.is_empty(), "pizzas are never empty");
        assert!(pizza.toppings.len() <= max_toppings, "topping cap exceeded");
        for id in &pizza.participants {
            let participant = order
                .participants
                .iter()
                .find(|participant| participant.id == *id)
                .expect("participant should come from the order");
            for topping in &pizza.toppings {
                assert_ne!(
                    participant.preference_for(*topping),
                    Preference::Allergy,
                    "{} shares a pizza with allergen {}",
                    participant.id,
                    topping
                );
            }
        }
    }

    let sizes: Vec<usize> = pizzas
        .iter()
        .map(|pizza| pizza.participants.len())
        .collect();
    let max = sizes.iter().copied().max().unwrap_or(0);
    let min = sizes.iter().copied().min().unwrap_or(0);
    assert!(max - min <= 1, "unbalanced pizza sizes {sizes:?}");
}
