use crate::ports::SolveStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Cannot split {num_participants} participants onto {num_pizzas} pizzas")]
    PizzaCount {
        num_pizzas: usize,
        num_participants: usize,
    },
    #[error("Shareability weight must be a number within [0, 1] (found {0})")]
    ShareabilityWeight(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("Invalid order configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("MILP engine could not find a solution (status: {0})")]
    SolveFailure(SolveStatus),
}
