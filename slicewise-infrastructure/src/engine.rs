#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as default_solver;
#[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
use good_lp::solvers::microlp::microlp as default_solver;
use good_lp::{
    Expression, ResolutionError, Solution, SolutionStatus, SolverModel, Variable, variable,
    variables,
};
use slicewise_application::{
    EngineOutcome, LinearExpr, MilpEngine, MilpModel, Relation, Sense, SolveBudget, SolveStatus,
    VarKind,
};
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    time::Instant,
};

#[cfg(not(any(feature = "solver-highs", feature = "solver-microlp")))]
compile_error!("enable the `solver-highs` or `solver-microlp` feature");

/// Tolerance used when accepting an incumbent reported at the time limit.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// [`MilpEngine`] backed by `good_lp`.
///
/// With `solver-highs` (default) the budget's time limit and thread count are
/// handed to HiGHS, which stops on its own and reports its best incumbent.
/// The `solver-microlp` fallback is pure Rust but single-threaded and has no
/// time limit, so it always runs to optimality.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoodLpEngine;

impl MilpEngine for GoodLpEngine {
    fn solve(&self, model: &MilpModel, budget: SolveBudget) -> EngineOutcome {
        let started = Instant::now();
        let result = catch_unwind(AssertUnwindSafe(|| solve_blocking(model, budget)));
        let outcome = result.unwrap_or_else(|_| {
            tracing::error!("MILP backend panicked");
            EngineOutcome::failed(SolveStatus::Error("MILP backend panicked".into()))
        });

        tracing::debug!(
            status = %outcome.status,
            elapsed_ms = started.elapsed().as_millis(),
            time_limit_ms = budget.time_limit.as_millis(),
            threads = budget.threads,
            variables = model.variable_count(),
            "MILP backend returned"
        );

        outcome
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut expression = Expression::default();
    for (var, coefficient) in expr.terms() {
        expression.add_mul(coefficient, handles[var.index()]);
    }
    expression
}

fn solve_blocking(model: &MilpModel, budget: SolveBudget) -> EngineOutcome {
    let started = Instant::now();
    let mut vars = variables!();
    let handles: Vec<Variable> = model
        .variables()
        .iter()
        .map(|spec| {
            let definition = match spec.kind {
                VarKind::Binary => variable().binary(),
                VarKind::Continuous => variable(),
            };
            vars.add(definition.name(spec.name.clone()))
        })
        .collect();

    let objective = to_expression(model.objective(), &handles);
    let unsolved = match model.sense() {
        Sense::Maximize => vars.maximise(objective),
        Sense::Minimize => vars.minimise(objective),
    };

    #[cfg(feature = "solver-highs")]
    let mut problem = unsolved
        .using(default_solver)
        .set_option("output_flag", false)
        .set_option("time_limit", budget.time_limit.as_secs_f64())
        .set_option("threads", i32::try_from(budget.threads).unwrap_or(i32::MAX));
    #[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
    let mut problem = {
        tracing::debug!(
            time_limit_ms = budget.time_limit.as_millis(),
            threads = budget.threads,
            "microlp ignores the solve budget"
        );
        unsolved.using(default_solver)
    };

    for constraint in model.constraints() {
        let lhs = to_expression(&constraint.expr, &handles);
        problem = problem.with(match constraint.relation {
            Relation::LessOrEqual => lhs.leq(constraint.rhs),
            Relation::GreaterOrEqual => lhs.geq(constraint.rhs),
            Relation::Equal => lhs.eq(constraint.rhs),
        });
    }

    match problem.solve() {
        Ok(solution) => {
            let values: Vec<f64> = handles.iter().map(|var| solution.value(*var)).collect();
            match solution.status() {
                SolutionStatus::Optimal => EngineOutcome::solved(SolveStatus::Optimal, values),
                _ if model.is_feasible(&values, FEASIBILITY_TOLERANCE) => {
                    EngineOutcome::solved(SolveStatus::TimeLimitWithIncumbent, values)
                }
                _ => EngineOutcome::failed(SolveStatus::TimeLimitReached),
            }
        }
        Err(ResolutionError::Infeasible) => EngineOutcome::failed(SolveStatus::Infeasible),
        Err(ResolutionError::Unbounded) => EngineOutcome::failed(SolveStatus::Unbounded),
        Err(err) if started.elapsed() >= budget.time_limit => {
            tracing::debug!(error = %err, "MILP backend stopped at the time limit");
            EngineOutcome::failed(SolveStatus::TimeLimitReached)
        }
        Err(err) => EngineOutcome::failed(SolveStatus::Error(err.to_string())),
    }
}
