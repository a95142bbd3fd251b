use crate::{
    error::ConfigurationError,
    milp::{LinearExpr, MilpModel, Relation, VarId, VarKind},
    services::objective::ObjectiveStrategy,
    settings::OptimizerSettings,
};
use slicewise_domain::{PairIndex, PreferenceMatrix};
use std::collections::BTreeMap;

/// Sizes of the order being modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelShape {
    pub participants: usize,
    pub toppings: usize,
    pub pizzas: usize,
}

impl ModelShape {
    /// Smallest and largest admissible pizza group. Requires `pizzas >= 1`.
    pub fn group_size_bounds(&self) -> (usize, usize) {
        (
            self.participants / self.pizzas,
            self.participants.div_ceil(self.pizzas),
        )
    }
}

/// Fails unless `1 <= num_pizzas <= num_participants`.
pub fn validate_pizza_count(
    num_pizzas: usize,
    num_participants: usize,
) -> Result<(), ConfigurationError> {
    if num_pizzas == 0 || num_pizzas > num_participants {
        return Err(ConfigurationError::PizzaCount {
            num_pizzas,
            num_participants,
        });
    }
    Ok(())
}

/// Built assignment model together with the handles of its decision variables.
#[derive(Debug, Clone)]
pub struct PizzaModel {
    pub(crate) milp: MilpModel,
    shape: ModelShape,
    assign: Vec<VarId>,
    topping_on: Vec<VarId>,
    pref_active: BTreeMap<(PairIndex, usize), VarId>,
    pub(crate) min_pizza_score: Option<VarId>,
}

impl PizzaModel {
    pub fn milp(&self) -> &MilpModel {
        &self.milp
    }

    pub fn shape(&self) -> ModelShape {
        self.shape
    }

    /// `assign[p,k]`: participant `p` eats pizza `k`.
    pub fn assign(&self, participant: usize, pizza: usize) -> VarId {
        self.assign[participant * self.shape.pizzas + pizza]
    }

    /// `topping_on[t,k]`: topping `t` is on pizza `k`.
    pub fn topping_on(&self, topping: usize, pizza: usize) -> VarId {
        self.topping_on[topping * self.shape.pizzas + pizza]
    }

    /// `pref_active[p,t,k]`, only present for scorable pairs.
    pub fn pref_active(&self, pair: PairIndex, pizza: usize) -> Option<VarId> {
        self.pref_active.get(&(pair, pizza)).copied()
    }

    pub fn min_pizza_score(&self) -> Option<VarId> {
        self.min_pizza_score
    }
}

/// Declares the decision variables and hard constraints of the assignment
/// problem, then lets an [`ObjectiveStrategy`] attach the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintModelBuilder {
    max_toppings_per_pizza: usize,
    symmetry_breaking: bool,
}

impl ConstraintModelBuilder {
    pub fn new(max_toppings_per_pizza: usize) -> Self {
        Self {
            max_toppings_per_pizza,
            symmetry_breaking: true,
        }
    }

    pub fn from_settings(settings: &OptimizerSettings) -> Self {
        Self::new(settings.max_toppings_per_pizza)
            .with_symmetry_breaking(settings.symmetry_breaking)
    }

    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    pub fn build(
        &self,
        shape: ModelShape,
        matrix: &PreferenceMatrix,
        objective: &ObjectiveStrategy,
    ) -> Result<PizzaModel, ConfigurationError> {
        validate_pizza_count(shape.pizzas, shape.participants)?;

        let mut model = self.declare_variables(shape, matrix);
        self.add_assignment_constraints(&mut model);
        self.add_allergy_constraints(&mut model, matrix);
        self.add_topping_caps(&mut model);
        self.add_balance_constraints(&mut model);
        if self.symmetry_breaking {
            self.add_symmetry_breaking(&mut model);
        }
        self.add_linearization(&mut model, matrix);
        objective.apply(&mut model, matrix);

        tracing::debug!(
            participants = shape.participants,
            toppings = shape.toppings,
            pizzas = shape.pizzas,
            variables = model.milp.variable_count(),
            constraints = model.milp.constraints().len(),
            symmetry_breaking = self.symmetry_breaking,
            "Pizza assignment model built"
        );

        Ok(model)
    }

    fn declare_variables(&self, shape: ModelShape, matrix: &PreferenceMatrix) -> PizzaModel {
        let mut milp = MilpModel::default();

        let mut assign = Vec::with_capacity(shape.participants * shape.pizzas);
        for p in 0..shape.participants {
            for k in 0..shape.pizzas {
                let var = milp.add_variable(format!("assign_{p}_{k}"), VarKind::Binary);
                assign.push(var);
            }
        }

        let mut topping_on = Vec::with_capacity(shape.toppings * shape.pizzas);
        for t in 0..shape.toppings {
            for k in 0..shape.pizzas {
                let var = milp.add_variable(format!("topping_on_{t}_{k}"), VarKind::Binary);
                topping_on.push(var);
            }
        }

        let mut pref_active = BTreeMap::new();
        for (pair, _) in matrix.scores() {
            for k in 0..shape.pizzas {
                let var = milp.add_variable(
                    format!("pref_active_{}_{}_{k}", pair.participant, pair.topping),
                    VarKind::Binary,
                );
                pref_active.insert((pair, k), var);
            }
        }

        PizzaModel {
            milp,
            shape,
            assign,
            topping_on,
            pref_active,
            min_pizza_score: None,
        }
    }

    fn add_assignment_constraints(&self, model: &mut PizzaModel) {
        let shape = model.shape;
        for p in 0..shape.participants {
            let expr = LinearExpr::sum((0..shape.pizzas).map(|k| model.assign(p, k)));
            model
                .milp
                .add_constraint(format!("person_{p}_once"), expr, Relation::Equal, 1.0);
        }
    }

    fn add_allergy_constraints(&self, model: &mut PizzaModel, matrix: &PreferenceMatrix) {
        for pair in matrix.allergies() {
            for k in 0..model.shape.pizzas {
                let assign = model.assign(pair.participant, k);
                let topping = model.topping_on(pair.topping, k);
                let expr = LinearExpr::sum([assign, topping]);
                model.milp.add_constraint(
                    format!("allergy_{}_{}_{k}", pair.participant, pair.topping),
                    expr,
                    Relation::LessOrEqual,
                    1.0,
                );
            }
        }
    }

    fn add_topping_caps(&self, model: &mut PizzaModel) {
        let shape = model.shape;
        if shape.toppings == 0 {
            return;
        }
        for k in 0..shape.pizzas {
            let expr = LinearExpr::sum((0..shape.toppings).map(|t| model.topping_on(t, k)));
            model.milp.add_constraint(
                format!("topping_cap_{k}"),
                expr,
                Relation::LessOrEqual,
                self.max_toppings_per_pizza as f64,
            );
        }
    }

    fn add_balance_constraints(&self, model: &mut PizzaModel) {
        let shape = model.shape;
        let (min_per_pizza, max_per_pizza) = shape.group_size_bounds();
        for k in 0..shape.pizzas {
            let expr = LinearExpr::sum((0..shape.participants).map(|p| model.assign(p, k)));
            model.milp.add_constraint(
                format!("pizza_{k}_lo"),
                expr.clone(),
                Relation::GreaterOrEqual,
                min_per_pizza as f64,
            );
            model.milp.add_constraint(
                format!("pizza_{k}_hi"),
                expr,
                Relation::LessOrEqual,
                max_per_pizza as f64,
            );
        }
    }

    // Participant p < K may only sit on pizzas 0..=p.
    fn add_symmetry_breaking(&self, model: &mut PizzaModel) {
        let pizzas = model.shape.pizzas;
        for p in 0..pizzas {
            for k in (p + 1)..pizzas {
                let expr = LinearExpr::sum([model.assign(p, k)]);
                model
                    .milp
                    .add_constraint(format!("sym_{p}_{k}"), expr, Relation::Equal, 0.0);
            }
        }
    }

    // pref_active[p,t,k] == assign[p,k] AND topping_on[t,k], via the three
    // McCormick inequalities for binaries.
    fn add_linearization(&self, model: &mut PizzaModel, matrix: &PreferenceMatrix) {
        for (pair, _) in matrix.scores() {
            let (p, t) = (pair.participant, pair.topping);
            for k in 0..model.shape.pizzas {
                let Some(active) = model.pref_active(pair, k) else {
                    continue;
                };
                let assign = model.assign(p, k);
                let topping = model.topping_on(t, k);

                let mut le_assign = LinearExpr::default();
                le_assign.add_mul(1.0, active);
                le_assign.add_mul(-1.0, assign);
                model.milp.add_constraint(
                    format!("pref_le_assign_{p}_{t}_{k}"),
                    le_assign,
                    Relation::LessOrEqual,
                    0.0,
                );

                let mut le_topping = LinearExpr::default();
                le_topping.add_mul(1.0, active);
                le_topping.add_mul(-1.0, topping);
                model.milp.add_constraint(
                    format!("pref_le_topping_{p}_{t}_{k}"),
                    le_topping,
                    Relation::LessOrEqual,
                    0.0,
                );

                let mut ge_both = LinearExpr::default();
                ge_both.add_mul(1.0, active);
                ge_both.add_mul(-1.0, assign);
                ge_both.add_mul(-1.0, topping);
                model.milp.add_constraint(
                    format!("pref_ge_{p}_{t}_{k}"),
                    ge_both,
                    Relation::GreaterOrEqual,
                    -1.0,
                );
            }
        }
    }
}
