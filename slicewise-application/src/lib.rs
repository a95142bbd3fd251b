#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod milp;
pub mod optimizer;
pub mod ports;
pub mod services;
pub mod settings;

#[cfg(test)]
mod test_utils;

pub use error::{ConfigurationError, OptimizeError};
pub use milp::{LinearConstraint, LinearExpr, MilpModel, Relation, Sense, VarId, VarKind, VarSpec};
pub use optimizer::PizzaOptimizer;
pub use ports::{EngineOutcome, MilpEngine, SolveBudget, SolveStatus};
pub use services::{
    ConstraintModelBuilder, ModelShape, ObjectiveStrategy, PizzaModel, SolutionExtractor,
    SolvedValues, SolverInvoker,
};
pub use settings::OptimizerSettings;
