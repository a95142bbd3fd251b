use crate::{
    error::OptimizeError,
    ports::MilpEngine,
    services::{
        ConstraintModelBuilder, ModelShape, ObjectiveStrategy, SolutionExtractor, SolverInvoker,
        validate_pizza_count,
    },
    settings::OptimizerSettings,
};
use slicewise_domain::{OrderContext, Pizza, PizzaScorer, PreferenceMatrixBuilder};

/// Runs one order through preference resolution, model construction, the
/// MILP engine and solution extraction.
///
/// Either all `num_pizzas` pizzas are returned or an error; nothing partial.
#[derive(Clone, Copy)]
pub struct PizzaOptimizer<'a> {
    engine: &'a dyn MilpEngine,
    settings: OptimizerSettings,
}

impl<'a> PizzaOptimizer<'a> {
    pub fn new(engine: &'a dyn MilpEngine, settings: OptimizerSettings) -> Self {
        Self { engine, settings }
    }

    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    pub fn optimize(&self, order: &OrderContext) -> Result<Vec<Pizza>, OptimizeError> {
        validate_pizza_count(order.num_pizzas, order.participants.len())?;
        let objective = ObjectiveStrategy::new(order.optimization_mode, order.shareability_weight);
        objective.validate()?;

        let matrix = PreferenceMatrixBuilder::new(self.settings.dislike_weight)
            .build(&order.participants, &order.toppings);
        let shape = ModelShape {
            participants: order.participants.len(),
            toppings: order.toppings.len(),
            pizzas: order.num_pizzas,
        };
        let model = ConstraintModelBuilder::from_settings(&self.settings)
            .build(shape, &matrix, &objective)?;

        let solved = SolverInvoker::new(self.engine, self.settings.budget()).invoke(model.milp())?;
        let pizzas = SolutionExtractor::extract(
            &model,
            &solved,
            &order.participants,
            &order.toppings,
        );

        tracing::info!(
            mode = %order.optimization_mode,
            status = %solved.status(),
            objective = model.milp().objective().evaluate(solved.values()),
            pizza_scores = ?PizzaScorer::new(&order.participants).scores(&pizzas),
            participants = shape.participants,
            pizzas = shape.pizzas,
            "Pizza assignment solved"
        );

        Ok(pizzas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ConfigurationError,
        milp::MilpModel,
        ports::{EngineOutcome, SolveStatus},
        test_utils::ScriptedEngine,
    };
    use rstest::{fixture, rstest};
    use slicewise_domain::{
        OptimizationMode, Participant, ParticipantId, Preference, Topping, ToppingId,
    };
    use std::time::Duration;

    fn everyone_on_first_pizza(model: &MilpModel) -> EngineOutcome {
        let values = model
            .variables()
            .iter()
            .map(|var| {
                if var.name.starts_with("assign_") && var.name.ends_with("_0") {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        EngineOutcome::solved(SolveStatus::Optimal, values)
    }

    #[fixture]
    fn order() -> OrderContext {
        OrderContext {
            participants: vec![
                Participant::new(ParticipantId(1), "Alice")
                    .with_preference(ToppingId(1), Preference::Dislike),
                Participant::new(ParticipantId(2), "Bob")
                    .with_preference(ToppingId(1), Preference::Like),
            ],
            toppings: vec![Topping::new(ToppingId(1), "Pepperoni")],
            num_pizzas: 1,
            optimization_mode: OptimizationMode::MaximizeLikes,
            shareability_weight: 0.0,
        }
    }

    #[rstest]
    #[case::no_pizzas(0)]
    #[case::more_pizzas_than_people(3)]
    fn invalid_pizza_count_never_reaches_engine(mut order: OrderContext, #[case] pizzas: usize) {
        order.num_pizzas = pizzas;
        let engine = ScriptedEngine::with_responder(everyone_on_first_pizza);

        let result = PizzaOptimizer::new(&engine, OptimizerSettings::default()).optimize(&order);

        assert_eq!(
            result,
            Err(OptimizeError::InvalidConfiguration(
                ConfigurationError::PizzaCount {
                    num_pizzas: pizzas,
                    num_participants: 2,
                }
            ))
        );
        assert_eq!(engine.calls(), 0);
    }

    #[rstest]
    fn empty_order_is_invalid(mut order: OrderContext) {
        order.participants.clear();
        let engine = ScriptedEngine::with_responder(everyone_on_first_pizza);

        let result = PizzaOptimizer::new(&engine, OptimizerSettings::default()).optimize(&order);

        assert!(matches!(
            result,
            Err(OptimizeError::InvalidConfiguration(_))
        ));
        assert_eq!(engine.calls(), 0);
    }

    #[rstest]
    fn out_of_range_shareability_never_reaches_engine(mut order: OrderContext) {
        order.shareability_weight = 1.2;
        let engine = ScriptedEngine::with_responder(everyone_on_first_pizza);

        let result = PizzaOptimizer::new(&engine, OptimizerSettings::default()).optimize(&order);

        assert_eq!(
            result,
            Err(OptimizeError::InvalidConfiguration(
                ConfigurationError::ShareabilityWeight(1.2)
            ))
        );
        assert_eq!(engine.calls(), 0);
    }

    #[rstest]
    fn single_pizza_with_shareability_holds_everyone(mut order: OrderContext) {
        order.shareability_weight = 0.8;
        let engine = ScriptedEngine::with_responder(everyone_on_first_pizza);
        let settings = OptimizerSettings {
            time_limit: Duration::from_secs(3),
            threads: 1,
            ..OptimizerSettings::default()
        };

        let pizzas = PizzaOptimizer::new(&engine, settings)
            .optimize(&order)
            .expect("scripted solve should succeed");

        assert_eq!(
            pizzas,
            vec![Pizza {
                participants: vec![ParticipantId(1), ParticipantId(2)],
                toppings: vec![],
            }]
        );
        assert_eq!(engine.last_budget(), Some(settings.budget()));
    }

    #[rstest]
    fn dislike_weight_reaches_the_objective(order: OrderContext) {
        let engine = ScriptedEngine::with_responder(everyone_on_first_pizza);
        let settings = OptimizerSettings {
            dislike_weight: -3.0,
            ..OptimizerSettings::default()
        };

        PizzaOptimizer::new(&engine, settings)
            .optimize(&order)
            .expect("scripted solve should succeed");

        let model = engine.last_model().expect("engine should see the model");
        let coefficient_of = |name: &str| {
            let idx = model
                .variables()
                .iter()
                .position(|var| var.name == name)
                .expect("variable should exist");
            model
                .objective()
                .terms()
                .find(|(var, _)| var.index() == idx)
                .map_or(0.0, |(_, coefficient)| coefficient)
        };
        assert_eq!(coefficient_of("pref_active_0_0_0"), -3.0);
        assert_eq!(coefficient_of("pref_active_1_0_0"), 1.0);
    }

    #[rstest]
    #[case::infeasible(SolveStatus::Infeasible)]
    #[case::timed_out(SolveStatus::TimeLimitReached)]
    fn engine_failure_yields_no_pizzas(order: OrderContext, #[case] status: SolveStatus) {
        let engine = ScriptedEngine::new(EngineOutcome::failed(status.clone()));

        let result = PizzaOptimizer::new(&engine, OptimizerSettings::default()).optimize(&order);

        assert_eq!(result, Err(OptimizeError::SolveFailure(status)));
        assert_eq!(engine.calls(), 1);
    }
}
