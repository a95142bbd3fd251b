pub mod constraint_model;
pub mod objective;
pub mod solution_extractor;
pub mod solver_invoker;

pub use constraint_model::{ConstraintModelBuilder, ModelShape, PizzaModel, validate_pizza_count};
pub use objective::ObjectiveStrategy;
pub use solution_extractor::{ACTIVE_THRESHOLD, SolutionExtractor};
pub use solver_invoker::{SolvedValues, SolverInvoker};
