use crate::ports::SolveBudget;
use slicewise_domain::CANONICAL_DISLIKE_WEIGHT;
use std::time::Duration;

pub const DEFAULT_MAX_TOPPINGS_PER_PIZZA: usize = 3;
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(20);
pub const DEFAULT_THREADS: u32 = 4;

/// Administrator-level knobs shared by every order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerSettings {
    pub max_toppings_per_pizza: usize,
    pub dislike_weight: f64,
    pub time_limit: Duration,
    pub threads: u32,
    /// Anchor the first K participants to pizza indices no larger than their own.
    pub symmetry_breaking: bool,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            max_toppings_per_pizza: DEFAULT_MAX_TOPPINGS_PER_PIZZA,
            dislike_weight: CANONICAL_DISLIKE_WEIGHT,
            time_limit: DEFAULT_TIME_LIMIT,
            threads: DEFAULT_THREADS,
            symmetry_breaking: true,
        }
    }
}

impl OptimizerSettings {
    pub fn budget(&self) -> SolveBudget {
        SolveBudget {
            time_limit: self.time_limit,
            threads: self.threads,
        }
    }
}
