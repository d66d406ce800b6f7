//! Assignments, aka. a (partial) function from variable ids to truth values.
//!
//! A model returned by a solver is an assignment which satisfies every clause of a formula.
//! Assignments are also built by hand, e.g. to check an encoding rejects some state of affairs.
//!
//! ```rust
//! # use satplan::structures::{assignment::Assignment, clause::Cnf};
//! let mut cnf = Cnf::new(2);
//! cnf.add_clause(vec![-1, -2]);
//!
//! let model = Assignment::from_literals([1, -2]);
//! assert!(model.satisfies(&cnf));
//!
//! let violation = Assignment::from_literals([1, 2]);
//! assert!(!violation.satisfies(&cnf));
//! ```

use crate::structures::clause::{Clause, Cnf, Literal};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    /// Values indexed by variable id, with index 0 unused.
    values: Vec<Option<bool>>,
}

impl Assignment {
    /// An assignment of no values to variables 1 through `var_count`.
    pub fn new(var_count: usize) -> Self {
        Assignment {
            values: vec![None; var_count + 1],
        }
    }

    /// An assignment valuing each literal true, with any `0` ignored.
    pub fn from_literals(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut assignment = Assignment::default();
        for literal in literals {
            if literal != 0 {
                assignment.set(literal.unsigned_abs(), literal.is_positive());
            }
        }
        assignment
    }

    pub fn set(&mut self, id: u32, value: bool) {
        let index = id as usize;
        if self.values.len() <= index {
            self.values.resize(index + 1, None);
        }
        self.values[index] = Some(value);
    }

    pub fn value_of(&self, id: u32) -> Option<bool> {
        self.values.get(id as usize).copied().flatten()
    }

    /// Whether the variable is valued true, with unvalued variables read as false.
    pub fn is_true(&self, id: u32) -> bool {
        self.value_of(id) == Some(true)
    }

    /// The largest variable id the assignment has room for.
    pub fn var_count(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// The assignment as literals, one for each valued variable, in order of variable id.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(id, value)| {
                value.map(|v| match v {
                    true => id as Literal,
                    false => -(id as Literal),
                })
            })
    }

    /// Whether some literal of the clause is true on the assignment.
    pub fn satisfies_clause(&self, clause: &[Literal]) -> bool {
        clause
            .iter()
            .any(|literal| self.value_of(literal.unsigned_abs()) == Some(literal.is_positive()))
    }

    /// Whether every clause of the formula is satisfied.
    pub fn satisfies(&self, cnf: &Cnf) -> bool {
        cnf.clauses
            .iter()
            .all(|clause| self.satisfies_clause(clause))
    }

    /// The clauses of the formula which are not satisfied.
    pub fn unsatisfied<'c>(&'c self, cnf: &'c Cnf) -> impl Iterator<Item = &'c Clause> + 'c {
        cnf.clauses
            .iter()
            .filter(|clause| !self.satisfies_clause(clause))
    }
}
