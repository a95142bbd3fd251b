use crate::{
    error::ConfigurationError,
    milp::{LinearExpr, Relation, Sense, VarKind},
    services::constraint_model::PizzaModel,
};
use slicewise_domain::{OptimizationMode, PreferenceMatrix};

/// Scores pizzas and picks what the model maximizes.
///
/// A pizza's score blends two views of every scorable (participant, topping)
/// pair: the assigned-only view (`pref_active`, the participant eats the
/// topping) and the whole-group view (`topping_on`, the topping is on the
/// pizza at all). The shareability weight moves between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveStrategy {
    mode: OptimizationMode,
    shareability_weight: f64,
}

impl ObjectiveStrategy {
    pub fn new(mode: OptimizationMode, shareability_weight: f64) -> Self {
        Self {
            mode,
            shareability_weight,
        }
    }

    pub fn mode(&self) -> OptimizationMode {
        self.mode
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.shareability_weight) {
            return Err(ConfigurationError::ShareabilityWeight(
                self.shareability_weight,
            ));
        }
        Ok(())
    }

    /// Per-pizza share weight `w`. With a single pizza there is nobody to share
    /// with, so it is zero.
    pub fn share_weight(&self, num_pizzas: usize) -> f64 {
        if num_pizzas > 1 {
            self.shareability_weight / (num_pizzas - 1) as f64
        } else {
            0.0
        }
    }

    pub fn pizza_score(
        &self,
        model: &PizzaModel,
        matrix: &PreferenceMatrix,
        pizza: usize,
    ) -> LinearExpr {
        let w = self.share_weight(model.shape().pizzas);
        let mut score = LinearExpr::default();
        for (pair, pref) in matrix.scores() {
            if let Some(active) = model.pref_active(pair, pizza) {
                score.add_mul(pref * (1.0 - w), active);
            }
            score.add_mul(pref * w, model.topping_on(pair.topping, pizza));
        }
        score
    }

    pub(crate) fn apply(&self, model: &mut PizzaModel, matrix: &PreferenceMatrix) {
        let scores: Vec<LinearExpr> = (0..model.shape().pizzas)
            .map(|k| self.pizza_score(model, matrix, k))
            .collect();

        match self.mode {
            OptimizationMode::MaximizeLikes => {
                let mut total = LinearExpr::default();
                for score in &scores {
                    total.add_expr(score);
                }
                model.milp.set_objective(Sense::Maximize, total);
            }
            OptimizationMode::MinimizeDislikes => {
                let min_score = model
                    .milp
                    .add_variable("min_pizza_score", VarKind::Continuous);
                for (k, score) in scores.into_iter().enumerate() {
                    let mut expr = score;
                    expr.add_mul(-1.0, min_score);
                    model.milp.add_constraint(
                        format!("min_score_{k}"),
                        expr,
                        Relation::GreaterOrEqual,
                        0.0,
                    );
                }
                model.min_pizza_score = Some(min_score);
                model
                    .milp
                    .set_objective(Sense::Maximize, LinearExpr::sum([min_score]));
            }
        }
    }
}
