use std::{borrow::Cow, collections::HashMap, fmt::Write as _};

use slicewise_domain::{Participant, ParticipantId, Pizza, PizzaScorer, Topping, ToppingId};

pub struct PlanPresenter;

impl PlanPresenter {
    /// Renders one block per pizza: its satisfaction score, who eats it and
    /// what goes on it. Unknown ids fall back to their numeric form.
    pub fn render(pizzas: &[Pizza], participants: &[Participant], toppings: &[Topping]) -> String {
        let mut reply = String::with_capacity(128 * pizzas.len().max(1));

        if pizzas.is_empty() {
            reply.push_str("No pizzas.\n");
            return reply;
        }

        let people: HashMap<ParticipantId, &str> = participants
            .iter()
            .map(|p| (p.id, p.name.as_str()))
            .collect();
        let catalog: HashMap<ToppingId, &str> =
            toppings.iter().map(|t| (t.id, t.name.as_str())).collect();
        let scorer = PizzaScorer::new(participants);

        for (idx, pizza) in pizzas.iter().enumerate() {
            let score = scorer.score(pizza);
            let sign = if score >= 0 { "+" } else { "" };
            let _ = writeln!(&mut reply, "Pizza {} (score {sign}{score})", idx + 1);

            let eaters = pizza
                .participants
                .iter()
                .map(|id| label(people.get(id).copied(), id.0))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(&mut reply, "  people:   {eaters}");

            let tmp;
            let listing = if pizza.toppings.is_empty() {
                "(plain)"
            } else {
                tmp = pizza
                    .toppings
                    .iter()
                    .map(|id| label(catalog.get(id).copied(), id.0))
                    .collect::<Vec<_>>()
                    .join(", ");
                &tmp
            };
            let _ = writeln!(&mut reply, "  toppings: {listing}");
        }

        reply
    }
}

fn label(name: Option<&str>, raw_id: u64) -> Cow<'_, str> {
    match name {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("#{raw_id}")),
    }
}
