use crate::services::{constraint_model::PizzaModel, solver_invoker::SolvedValues};
use slicewise_domain::{Participant, Pizza, Topping};

/// Binary variables at or above this value count as set; engines report them
/// with floating-point noise.
pub const ACTIVE_THRESHOLD: f64 = 0.5;

pub struct SolutionExtractor;

impl SolutionExtractor {
    /// Materializes one [`Pizza`] per pizza index, keeping input order for
    /// participants and toppings.
    pub fn extract(
        model: &PizzaModel,
        solved: &SolvedValues,
        participants: &[Participant],
        toppings: &[Topping],
    ) -> Vec<Pizza> {
        (0..model.shape().pizzas)
            .map(|k| Pizza {
                participants: participants
                    .iter()
                    .enumerate()
                    .filter(|(p, _)| solved.value(model.assign(*p, k)) >= ACTIVE_THRESHOLD)
                    .map(|(_, participant)| participant.id)
                    .collect(),
                toppings: toppings
                    .iter()
                    .enumerate()
                    .filter(|(t, _)| solved.value(model.topping_on(*t, k)) >= ACTIVE_THRESHOLD)
                    .map(|(_, topping)| topping.id)
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ports::{EngineOutcome, SolveBudget, SolveStatus},
        services::{
            constraint_model::{ConstraintModelBuilder, ModelShape},
            objective::ObjectiveStrategy,
            solver_invoker::SolverInvoker,
        },
        test_utils::ScriptedEngine,
    };
    use slicewise_domain::{OptimizationMode, ParticipantId, PreferenceMatrixBuilder, ToppingId};
    use std::time::Duration;

    #[test]
    fn reads_noisy_binaries_into_pizzas() {
        let participants: Vec<Participant> = (1..=3)
            .map(|id| Participant::new(ParticipantId(id), format!("P{id}")))
            .collect();
        let toppings = vec![
            Topping::new(ToppingId(10), "Pepperoni"),
            Topping::new(ToppingId(11), "Mushroom"),
        ];
        let matrix = PreferenceMatrixBuilder::default().build(&participants, &toppings);
        let model = ConstraintModelBuilder::new(3)
            .build(
                ModelShape {
                    participants: 3,
                    toppings: 2,
                    pizzas: 2,
                },
                &matrix,
                &ObjectiveStrategy::new(OptimizationMode::MaximizeLikes, 0.0),
            )
            .expect("model should build");

        let mut values = vec![0.0; model.milp().variable_count()];
        values[model.assign(0, 0).index()] = 1.0;
        values[model.assign(1, 1).index()] = 0.999_999;
        values[model.assign(2, 0).index()] = 1.000_001;
        values[model.assign(2, 1).index()] = 1e-7;
        values[model.topping_on(1, 0).index()] = 0.999_8;
        values[model.topping_on(0, 1).index()] = 1.0;
        values[model.topping_on(1, 1).index()] = 0.49;

        let engine = ScriptedEngine::new(EngineOutcome::solved(SolveStatus::Optimal, values));
        let budget = SolveBudget {
            time_limit: Duration::from_secs(1),
            threads: 1,
        };
        let solved = SolverInvoker::new(&engine, budget)
            .invoke(model.milp())
            .expect("scripted solution");

        let pizzas = SolutionExtractor::extract(&model, &solved, &participants, &toppings);

        assert_eq!(
            pizzas,
            vec![
                Pizza {
                    participants: vec![ParticipantId(1), ParticipantId(3)],
                    toppings: vec![ToppingId(11)],
                },
                Pizza {
                    participants: vec![ParticipantId(2)],
                    toppings: vec![ToppingId(10)],
                },
            ]
        );
    }
}
