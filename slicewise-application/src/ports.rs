use crate::milp::MilpModel;
use std::{fmt, time::Duration};

/// Resources granted to one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveBudget {
    pub time_limit: Duration,
    pub threads: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    /// Time limit hit, but the engine holds a feasible incumbent.
    TimeLimitWithIncumbent,
    /// Time limit hit before any feasible assignment was found.
    TimeLimitReached,
    Infeasible,
    Unbounded,
    Error(String),
}

impl SolveStatus {
    pub fn has_incumbent(&self) -> bool {
        matches!(
            self,
            SolveStatus::Optimal | SolveStatus::TimeLimitWithIncumbent
        )
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => f.write_str("optimal"),
            SolveStatus::TimeLimitWithIncumbent => f.write_str("time limit reached (feasible)"),
            SolveStatus::TimeLimitReached => f.write_str("time limit reached"),
            SolveStatus::Infeasible => f.write_str("infeasible"),
            SolveStatus::Unbounded => f.write_str("unbounded"),
            SolveStatus::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Raw engine answer. `values` is indexed by [`crate::milp::VarId::index`] and
/// may be empty when `status` carries no incumbent.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutcome {
    pub status: SolveStatus,
    pub values: Vec<f64>,
}

impl EngineOutcome {
    pub fn solved(status: SolveStatus, values: Vec<f64>) -> Self {
        Self { status, values }
    }

    pub fn failed(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
        }
    }
}

/// Mixed-integer solving service. Implementations block until the model is
/// solved or the budget's time limit elapses.
pub trait MilpEngine: Send + Sync {
    fn solve(&self, model: &MilpModel, budget: SolveBudget) -> EngineOutcome;
}
