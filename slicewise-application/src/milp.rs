//! Engine-neutral mixed-integer linear model.
//!
//! The optimizer describes its problem with these types and hands the result
//! to a [`crate::ports::MilpEngine`]; engines translate it into whatever
//! their backend expects.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Binary,
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    pub name: String,
    pub kind: VarKind,
}

/// Sum of `coefficient * variable` terms. Terms on the same variable merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: BTreeMap<VarId, f64>,
}

impl LinearExpr {
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        let mut expr = Self::default();
        for var in vars {
            expr.add_mul(1.0, var);
        }
        expr
    }

    pub fn add_mul(&mut self, coefficient: f64, var: VarId) {
        if coefficient == 0.0 {
            return;
        }
        *self.terms.entry(var).or_insert(0.0) += coefficient;
    }

    pub fn add_expr(&mut self, other: &LinearExpr) {
        for (var, coefficient) in other.terms() {
            self.add_mul(coefficient, var);
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.terms
            .iter()
            .map(|(var, coefficient)| (*var, *coefficient))
    }

    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms.get(&var).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under a full assignment indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coefficient)| {
                coefficient * values.get(var.index()).copied().unwrap_or(0.0)
            })
            .sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessOrEqual => f.write_str("<="),
            Relation::GreaterOrEqual => f.write_str(">="),
            Relation::Equal => f.write_str("=="),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::LessOrEqual => lhs <= self.rhs + tolerance,
            Relation::GreaterOrEqual => lhs >= self.rhs - tolerance,
            Relation::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sense {
    #[default]
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpModel {
    variables: Vec<VarSpec>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
    sense: Sense,
}

impl MilpModel {
    pub fn add_variable(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(VarSpec {
            name: name.into(),
            kind,
        });
        id
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            expr,
            relation,
            rhs,
        });
    }

    pub fn set_objective(&mut self, sense: Sense, objective: LinearExpr) {
        self.sense = sense;
        self.objective = objective;
    }

    pub fn variables(&self) -> &[VarSpec] {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints
            .iter()
            .find(|constraint| constraint.name == name)
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Whether `values` is a complete assignment that keeps binaries integral
    /// and satisfies every constraint within `tolerance`.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        for (spec, value) in self.variables.iter().zip(values) {
            let integral = match spec.kind {
                VarKind::Binary => value.abs() <= tolerance || (value - 1.0).abs() <= tolerance,
                VarKind::Continuous => true,
            };
            if !value.is_finite() || !integral {
                return false;
            }
        }
        self.constraints
            .iter()
            .all(|constraint| constraint.is_satisfied(values, tolerance))
    }
}
