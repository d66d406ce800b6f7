/*!
Planning, by encoding a problem to a horizon and solving the formula.

# Overview

A [Planner] holds a domain, a problem, and a [Config].
For a single horizon, [plan_at](Planner::plan_at) builds an [Encoding], solves it, and validates any plan decoded from the model.

As a plan found at some horizon may be padded with idle timesteps, a plan exists at every horizon above the shortest horizon with a plan.
So, a [search](Planner::search) tries horizons in increasing order, from 1 to [Config::max_horizon], and stops at the first satisfiable horizon.

A [parallel search](Planner::search_parallel) tries every horizon at once, each on its own thread with its own encoding and solver.
The result is the same as that of a sequential search: the smallest satisfiable horizon, or the first failure at or below it.
As nothing above a satisfiable horizon contributes to the result, those solves are cancelled as soon as the satisfiable horizon is found.

# Example

```rust
# use satplan::config::Config;
# use satplan::gripper::Gripper;
# use satplan::planner::{Planner, SearchReport};
# use satplan::solver::Otter;
# use satplan::structures::problem::Problem;
let gripper = Gripper::two_rooms();
let domain = gripper.domain().unwrap();
let problem = Problem::from_spec(&domain, &gripper.transfer_problem()).unwrap();

let planner = Planner::new(&domain, &problem, Config::default());
let SearchReport::Found { horizon, plan, .. } = planner.search(&mut Otter::default()).unwrap() else {
    panic!("no plan");
};

assert_eq!(horizon, 3);
assert_eq!(plan.identifiers(), ["pick-up(ball,A)", "move(A,B)", "drop(ball,B)"]);
```
*/

mod encoding;
pub use encoding::Encoding;

use crate::{
    config::Config,
    misc::log::targets::{self},
    procedures::validate,
    solver::{CancelToken, Solver},
    structures::{assignment::Assignment, domain::Domain, plan::Plan, problem::Problem},
    types::err::{self, ErrorKind},
};

/// The result of solving an encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Satisfiable { plan: Plan, model: Assignment },
    Unsatisfiable,
}

impl Outcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Satisfiable { plan, .. } => Some(plan),
            Self::Unsatisfiable => None,
        }
    }
}

/// The result of a search over horizons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchReport {
    /// A plan at the smallest satisfiable horizon.
    Found {
        horizon: usize,
        plan: Plan,
        model: Assignment,
    },

    /// Every horizon up to the maximum is unsatisfiable.
    Exhausted { max_horizon: usize },
}

pub struct Planner<'p> {
    domain: &'p Domain,
    problem: &'p Problem,
    config: Config,
}

impl<'p> Planner<'p> {
    pub fn new(domain: &'p Domain, problem: &'p Problem, config: Config) -> Self {
        Planner {
            domain,
            problem,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn encode(&self, horizon: usize) -> Result<Encoding, ErrorKind> {
        Encoding::new(self.domain, self.problem, horizon)
    }

    /// Encodes and solves a single horizon.
    ///
    /// A decoded plan is validated by simulation, and a plan which fails validation is an error.
    pub fn plan_at(&self, horizon: usize, solver: &mut impl Solver) -> Result<Outcome, ErrorKind> {
        let encoding = self.encode(horizon)?;
        let outcome = encoding.solve(solver)?;

        if let Outcome::Satisfiable { plan, .. } = &outcome {
            validate::validate(self.domain, self.problem, plan, Some(horizon))?;
        }

        log::info!(target: targets::SEARCH, "Horizon {horizon}: {}", match &outcome {
            Outcome::Satisfiable { .. } => "satisfiable",
            Outcome::Unsatisfiable => "unsatisfiable",
        });
        Ok(outcome)
    }

    /// Tries each horizon in increasing order, with the same solver.
    pub fn search(&self, solver: &mut impl Solver) -> Result<SearchReport, ErrorKind> {
        let max_horizon = self.config.max_horizon.value;

        for horizon in 1..=max_horizon {
            match self.plan_at(horizon, solver)? {
                Outcome::Satisfiable { plan, model } => {
                    log::info!(target: targets::SEARCH, "Plan of {} steps at horizon {horizon}", plan.len());
                    return Ok(SearchReport::Found {
                        horizon,
                        plan,
                        model,
                    });
                }
                Outcome::Unsatisfiable => continue,
            }
        }

        log::info!(target: targets::SEARCH, "No plan up to horizon {max_horizon}");
        Ok(SearchReport::Exhausted { max_horizon })
    }

    /// Tries every horizon at once, each on a scoped thread with a solver from the given factory.
    ///
    /// Each solver is given a [CancelToken], and once some horizon is found satisfiable the solves of every larger horizon are cancelled.
    pub fn search_parallel<S, F>(&self, make_solver: F) -> Result<SearchReport, ErrorKind>
    where
        S: Solver,
        F: Fn() -> S + Sync,
    {
        let max_horizon = self.config.max_horizon.value;
        let (tx, rx) = crossbeam::channel::unbounded();

        // Indexed by horizon, with index 0 unused.
        let tokens = (0..=max_horizon).map(|_| CancelToken::default()).collect::<Vec<_>>();

        let scope_result = crossbeam::scope(|scope| {
            for horizon in 1..=max_horizon {
                let tx = tx.clone();
                let make_solver = &make_solver;
                let tokens = &tokens;
                scope.spawn(move |_| {
                    let mut solver = make_solver();
                    solver.set_cancel_token(tokens[horizon].clone());
                    let result = self.plan_at(horizon, &mut solver);

                    if let Ok(Outcome::Satisfiable { .. }) = &result {
                        log::info!(target: targets::SEARCH, "Cancelling horizons above {horizon}");
                        for token in &tokens[horizon + 1..] {
                            token.cancel();
                        }
                    }

                    // The receiver outlives the scope.
                    let _ = tx.send((horizon, result));
                });
            }
        });
        drop(tx);

        if scope_result.is_err() {
            log::error!(target: targets::SEARCH, "A search thread panicked");
            return Err(err::SolverError::Crashed("a search thread panicked".to_string()).into());
        }

        let mut results = rx.iter().collect::<Vec<_>>();
        results.sort_by_key(|(horizon, _)| *horizon);

        for (horizon, result) in results {
            match result? {
                Outcome::Satisfiable { plan, model } => {
                    return Ok(SearchReport::Found {
                        horizon,
                        plan,
                        model,
                    })
                }
                Outcome::Unsatisfiable => continue,
            }
        }

        Ok(SearchReport::Exhausted { max_horizon })
    }
}
