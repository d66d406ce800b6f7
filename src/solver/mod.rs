/*!
The boundary between an encoding and a SAT solver.

A [Solver] takes a formula and reports either a model or unsatisfiability.
Anything else, such as reaching a time limit or a crashed process, is a [SolverError], and is never reported as unsatisfiability.

Two solvers are provided:
- [Otter], the [otter_sat] solver, run in process.
- [External], which runs a solver binary over a DIMACS file and reads its result.

```rust
# use satplan::solver::{Otter, SolveReport, Solver};
# use satplan::structures::clause::Cnf;
let mut cnf = Cnf::new(2);
cnf.add_clause(vec![1, 2]);
cnf.add_clause(vec![-1]);

let SolveReport::Satisfiable(model) = Otter::default().solve(&cnf).unwrap() else {
    panic!("satisfiable");
};
assert!(model.satisfies(&cnf));

cnf.add_clause(vec![-2]);
assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));
```
*/

mod external;
mod otter;

pub use external::External;
pub use otter::Otter;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    structures::{assignment::Assignment, clause::Cnf},
    types::err::SolverError,
};

/// The result of a completed solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveReport {
    /// The formula is satisfiable, with the given model.
    Satisfiable(Assignment),

    /// The formula is unsatisfiable.
    Unsatisfiable,
}

impl std::fmt::Display for SolveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable(_) => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
        }
    }
}

pub trait Solver {
    fn solve(&mut self, cnf: &Cnf) -> Result<SolveReport, SolverError>;

    /// Stops any later solve with [SolverError::Cancelled] once the token is cancelled.
    fn set_cancel_token(&mut self, token: CancelToken);
}

/// A flag shared between a solve and whatever may wish to stop it early.
///
/// Clones share the flag, and a cancelled token stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
