/*!
The default solver, by [otter_sat].

# Overview

Each solve builds a fresh otter_sat [Context]:
- One atom is taken for each variable of the formula, in order of variable id.
- Each clause is added as a clause of [CLiteral]s.
- The context is solved, and on a satisfiable report the valuation of each atom is read back as the value of the matching variable.

Before anything is handed to the context, each clause is normalised: repeated literals are dropped, tautologies are skipped, and the units of the formula are checked against each other.
So, an empty clause or a pair of conflicting units is reported as unsatisfiable without building a context, and any error raised by the context while adding clauses is a [SolverError].

# Configuration

[Config::polarity_lean](crate::config::Config::polarity_lean) and [Config::time_limit](crate::config::Config::time_limit) are passed through to the context, and the source of randomness of the context is seeded with [Config::random_seed](crate::config::Config::random_seed).
So, a fixed config gives a fixed model.

Cancellation, and the time limit once more, are checked through the terminate callback of the context.
*/

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use otter_sat::{
    context::Context,
    generic::minimal_pcg::MinimalPCG32,
    reports::Report,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal as _},
    },
};
use rand::SeedableRng;

use crate::{
    config::{Config, PolarityLean},
    misc::log::targets::{self},
    solver::{CancelToken, SolveReport, Solver},
    structures::{
        assignment::Assignment,
        clause::{Cnf, Literal},
    },
    types::err::SolverError,
};

/// A solver backed by an otter_sat context.
#[derive(Clone, Debug)]
pub struct Otter {
    polarity_lean: PolarityLean,
    random_seed: u64,
    time_limit: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl Default for Otter {
    fn default() -> Self {
        Otter::from_config(&Config::default())
    }
}

impl Otter {
    pub fn from_config(config: &Config) -> Self {
        Otter {
            polarity_lean: config.polarity_lean.value,
            random_seed: config.random_seed.value,
            time_limit: config.time_limit(),
            cancel: None,
        }
    }

    /// Stops a solve with [SolverError::Cancelled] once the token is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn context(&self) -> Context {
        let mut otter_config = otter_sat::config::Config::default();
        otter_config.polarity_lean.value = self.polarity_lean;
        if let Some(limit) = self.time_limit {
            otter_config.time_limit.value = limit;
        }

        let mut context = Context::from_config(otter_config);
        context.rng = MinimalPCG32::from_seed(self.random_seed.to_le_bytes());
        context
    }

    /// Why a solve which ended without a report stopped.
    fn interruption(&self, deadline: Option<Instant>) -> SolverError {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            SolverError::Cancelled
        } else if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            SolverError::TimedOut
        } else {
            SolverError::Crashed("solve ended without a report".to_string())
        }
    }
}

/// The clauses of a formula with repeated literals removed and tautologies skipped.
///
/// None if the formula is unsatisfiable on its face, i.e. contains an empty clause or conflicting units.
fn normalise(cnf: &Cnf) -> Option<Vec<Vec<Literal>>> {
    let mut clauses = Vec::with_capacity(cnf.clauses.len());
    let mut units = HashSet::new();

    'clause_loop: for clause in &cnf.clauses {
        let mut literals: Vec<Literal> = Vec::with_capacity(clause.len());
        for literal in clause {
            if literals.contains(&-literal) {
                continue 'clause_loop;
            }
            if !literals.contains(literal) {
                literals.push(*literal);
            }
        }

        match literals[..] {
            [] => return None,
            [unit] => {
                if units.contains(&-unit) {
                    return None;
                }
                units.insert(unit);
            }
            _ => {}
        }
        clauses.push(literals);
    }

    Some(clauses)
}

impl Solver for Otter {
    fn solve(&mut self, cnf: &Cnf) -> Result<SolveReport, SolverError> {
        let started = Instant::now();
        let deadline = self.time_limit.map(|limit| started + limit);

        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::info!(target: targets::SOLVER, "Cancelled before solve");
            return Err(SolverError::Cancelled);
        }

        let Some(clauses) = normalise(cnf) else {
            log::info!(target: targets::SOLVER, "Unsatisfiable before solve");
            return Ok(SolveReport::Unsatisfiable);
        };

        let mut context = self.context();

        // Index 0 is unused, to match variable ids.
        let mut atoms: Vec<Atom> = Vec::with_capacity(cnf.var_count + 1);
        atoms.push(0);
        for _ in 0..cnf.var_count {
            atoms.push(context.fresh_or_max_atom());
        }

        for clause in clauses {
            let mut otter_clause = Vec::with_capacity(clause.len());
            for literal in clause {
                let Some(atom) = atoms.get(literal.unsigned_abs() as usize) else {
                    return Err(SolverError::Crashed(format!(
                        "literal {literal} outside of {} variables",
                        cnf.var_count
                    )));
                };
                otter_clause.push(CLiteral::new(*atom, literal.is_positive()));
            }

            if let Err(error) = context.add_clause(otter_clause) {
                return Err(SolverError::Crashed(format!("{error:?}")));
            }
        }

        let cancel = self.cancel.clone();
        context.set_callback_terminate_solve(Box::new(move || {
            cancel.as_ref().is_some_and(CancelToken::is_cancelled)
                || deadline.is_some_and(|deadline| Instant::now() >= deadline)
        }));

        if let Err(error) = context.solve() {
            return Err(SolverError::Crashed(format!("{error:?}")));
        }

        let report = context.report();
        log::info!(target: targets::SOLVER, "{report} in {:.2?}", started.elapsed());

        match report {
            Report::Satisfiable => {
                let valuation = context.atom_db.valuation_canonical();
                let mut model = Assignment::new(cnf.var_count);
                for (id, atom) in atoms.iter().enumerate().skip(1) {
                    if let Some(Some(value)) = valuation.get(*atom as usize) {
                        model.set(id as u32, *value);
                    }
                }
                Ok(SolveReport::Satisfiable(model))
            }

            Report::Unsatisfiable => Ok(SolveReport::Unsatisfiable),

            Report::Unknown => Err(self.interruption(deadline)),
        }
    }

    fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnf(var_count: usize, clauses: &[&[Literal]]) -> Cnf {
        Cnf {
            var_count,
            clauses: clauses.iter().map(|clause| clause.to_vec()).collect(),
        }
    }

    /// Each of `pigeons` pigeons in one of `holes` holes, with no two pigeons sharing a hole.
    fn pigeonhole(pigeons: usize, holes: usize) -> Cnf {
        let variable = |pigeon: usize, hole: usize| (pigeon * holes + hole + 1) as Literal;
        let mut cnf = Cnf::new(pigeons * holes);
        for pigeon in 0..pigeons {
            cnf.add_clause((0..holes).map(|hole| variable(pigeon, hole)).collect::<Vec<_>>());
        }
        for hole in 0..holes {
            for a in 0..pigeons {
                for b in a + 1..pigeons {
                    cnf.add_clause(vec![-variable(a, hole), -variable(b, hole)]);
                }
            }
        }
        cnf
    }

    #[test]
    fn normalised_clauses() {
        let formula = cnf(3, &[&[1, 1, 2], &[1, -1, 3], &[-3]]);
        assert_eq!(normalise(&formula), Some(vec![vec![1, 2], vec![-3]]));

        assert_eq!(normalise(&cnf(1, &[&[1], &[]])), None);
        assert_eq!(normalise(&cnf(1, &[&[1, 1], &[-1]])), None);
    }

    #[test]
    fn models_satisfy() {
        let formula = cnf(
            4,
            &[&[1, 2], &[1, -2], &[-1, 3, 4], &[-3, -4], &[-4, 2], &[1, 1, -1]],
        );
        let SolveReport::Satisfiable(model) = Otter::default().solve(&formula).unwrap() else {
            panic!("satisfiable");
        };
        assert!(model.satisfies(&formula));
        assert_eq!(model.var_count(), 4);
    }

    #[test]
    fn unsatisfiable() {
        let formula = cnf(2, &[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]);
        assert_eq!(Otter::default().solve(&formula), Ok(SolveReport::Unsatisfiable));

        let conflicting_units = cnf(1, &[&[1], &[-1]]);
        assert_eq!(
            Otter::default().solve(&conflicting_units),
            Ok(SolveReport::Unsatisfiable)
        );

        let empty_clause = cnf(1, &[&[1], &[]]);
        assert_eq!(Otter::default().solve(&empty_clause), Ok(SolveReport::Unsatisfiable));

        assert_eq!(
            Otter::default().solve(&pigeonhole(4, 3)),
            Ok(SolveReport::Unsatisfiable)
        );
    }

    #[test]
    fn seeded_polarity_is_reproducible() {
        let formula = pigeonhole(5, 5);
        let mut config = Config::default();
        config.polarity_lean.value = 0.5;
        config.random_seed.value = 7;

        let first = Otter::from_config(&config).solve(&formula).unwrap();
        let second = Otter::from_config(&config).solve(&formula).unwrap();
        assert_eq!(first, second);

        let SolveReport::Satisfiable(model) = first else {
            panic!("satisfiable");
        };
        assert!(model.satisfies(&formula));
    }

    #[test]
    fn cancelled() {
        let token = CancelToken::default();
        token.cancel();
        let mut solver = Otter::default().with_cancel_token(token);
        assert_eq!(solver.solve(&pigeonhole(3, 3)), Err(SolverError::Cancelled));
    }

    #[test]
    fn cancel_token_by_trait() {
        let token = CancelToken::default();
        let mut solver = Otter::default();
        solver.set_cancel_token(token.clone());
        token.cancel();
        assert_eq!(solver.solve(&pigeonhole(3, 3)), Err(SolverError::Cancelled));
    }
}
