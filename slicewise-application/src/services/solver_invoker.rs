use crate::{
    error::OptimizeError,
    milp::{MilpModel, VarId},
    ports::{MilpEngine, SolveBudget, SolveStatus},
};
use std::time::Instant;

/// Variable values of a solve that produced an incumbent.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedValues {
    status: SolveStatus,
    values: Vec<f64>,
}

impl SolvedValues {
    pub fn status(&self) -> &SolveStatus {
        &self.status
    }

    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.index()]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

pub struct SolverInvoker<'a> {
    engine: &'a dyn MilpEngine,
    budget: SolveBudget,
}

impl<'a> SolverInvoker<'a> {
    pub fn new(engine: &'a dyn MilpEngine, budget: SolveBudget) -> Self {
        Self { engine, budget }
    }

    pub fn invoke(&self, model: &MilpModel) -> Result<SolvedValues, OptimizeError> {
        let started = Instant::now();
        let outcome = self.engine.solve(model, self.budget);
        let elapsed_ms = started.elapsed().as_millis();

        if !outcome.status.has_incumbent() {
            tracing::warn!(
                status = %outcome.status,
                elapsed_ms,
                time_limit_ms = self.budget.time_limit.as_millis(),
                variables = model.variable_count(),
                "MILP engine returned no usable solution"
            );
            return Err(OptimizeError::SolveFailure(outcome.status));
        }

        if outcome.values.len() != model.variable_count() {
            tracing::error!(
                status = %outcome.status,
                value_count = outcome.values.len(),
                variables = model.variable_count(),
                "MILP engine returned an incomplete assignment"
            );
            return Err(OptimizeError::SolveFailure(SolveStatus::Error(format!(
                "engine returned {} values for {} variables",
                outcome.values.len(),
                model.variable_count()
            ))));
        }

        tracing::debug!(
            status = %outcome.status,
            elapsed_ms,
            threads = self.budget.threads,
            "MILP engine finished"
        );

        Ok(SolvedValues {
            status: outcome.status,
            values: outcome.values,
        })
    }
}
