#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    OptimizationMode, OrderContext, Participant, ParticipantId, Pizza, Preference, Topping,
    ToppingId,
};
pub use services::{
    CANONICAL_DISLIKE_WEIGHT, PairIndex, PizzaScorer, PreferenceMatrix, PreferenceMatrixBuilder,
};
