pub mod pizza_scorer;
pub mod preference_matrix;

pub use pizza_scorer::PizzaScorer;
pub use preference_matrix::{
    CANONICAL_DISLIKE_WEIGHT, PairIndex, PreferenceMatrix, PreferenceMatrixBuilder,
};
