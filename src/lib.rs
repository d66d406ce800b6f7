//! A library for planning by satisfiability: bounded-horizon STRIPS problems are compiled to formulas in conjunctive normal form, and satisfying assignments are decoded into plans.
//!
//! A planning problem asks for a sequence of actions which takes some initial state to a state where a goal holds.
//! Fixing a horizon, i.e. a maximum number of steps, the problem becomes a boolean formula with a variable for each fact and each action at each timestep.
//! A model of the formula is a plan, and an unsatisfiable formula shows no plan exists within the horizon.
//!
//! # Orientation
//!
//! The library is built around a handful of stages:
//! - A [domain](structures::domain) and a [problem](structures::problem) are given as data, and validated.
//! - Variables are allocated to each fact and action at each timestep, and held in a [variable map](db::variable_map).
//! - [Clauses](procedures::encode) are emitted over those variables: the initial state, partition invariants, action semantics, frame axioms, action exclusion, and the goal.
//! - The formula is handed to a [solver](solver), either the otter_sat solver or an external binary by way of [DIMACS](io::dimacs).
//! - A model is [decoded](procedures::decode) into a [plan](structures::plan), which is [validated](procedures::validate) by simulation.
//!
//! A [planner](planner) combines these stages, and supports a search for the smallest horizon with a plan.
//!
//! Useful starting points, then, may be:
//! - The [gripper] domain, for a small complete domain.
//! - The [clause emitter](procedures::encode), for the shape of the formula.
//! - The [configuration](config), to see what may be adjusted.
//!
//! # Examples
//!
//! + Plan in the gripper domain, with the otter_sat solver.
//!
//! ```rust
//! # use satplan::config::Config;
//! # use satplan::gripper::Gripper;
//! # use satplan::planner::{Outcome, Planner};
//! # use satplan::solver::Otter;
//! # use satplan::structures::problem::Problem;
//! let gripper = Gripper::two_rooms();
//! let domain = gripper.domain().unwrap();
//! let problem = Problem::from_spec(&domain, &gripper.transfer_problem()).unwrap();
//!
//! let planner = Planner::new(&domain, &problem, Config::default());
//!
//! assert_eq!(planner.plan_at(2, &mut Otter::default()), Ok(Outcome::Unsatisfiable));
//!
//! let outcome = planner.plan_at(4, &mut Otter::default()).unwrap();
//! let plan = outcome.plan().unwrap();
//! assert_eq!(plan.identifiers(), ["pick-up(ball,A)", "move(A,B)", "drop(ball,B)"]);
//! assert_eq!(plan.makespan(), 3);
//! ```
//!
//! + Write a formula for some other solver, and decode its model.
//!
//! ```rust
//! # use satplan::gripper::Gripper;
//! # use satplan::io::{map, solution};
//! # use satplan::planner::Encoding;
//! # use satplan::procedures::decode::decode;
//! # use satplan::solver::{Otter, SolveReport, Solver};
//! # use satplan::structures::problem::Problem;
//! let gripper = Gripper::two_rooms();
//! let domain = gripper.domain().unwrap();
//! let problem = Problem::from_spec(&domain, &gripper.transfer_problem()).unwrap();
//!
//! let encoding = Encoding::new(&domain, &problem, 3).unwrap();
//!
//! let mut dimacs = Vec::default();
//! encoding.write_dimacs(&mut dimacs, true).unwrap();
//! let mut saved_map = Vec::default();
//! encoding.write_map(&mut saved_map).unwrap();
//!
//! // ... some solver writes its result ...
//! let mut result = Vec::default();
//! let report = Otter::default().solve(encoding.cnf()).unwrap();
//! solution::write_solution(&mut result, &report).unwrap();
//!
//! let map = map::read_map(saved_map.as_slice()).unwrap();
//! let SolveReport::Satisfiable(model) = solution::read_solution(result.as_slice()).unwrap() else {
//!     panic!("satisfiable");
//! };
//! assert_eq!(decode(&model, &map).unwrap().len(), 3);
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout, with targets listed in [misc::log].
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//!
//! ```sh
//! RUST_LOG=encoding=info,search=info satplan_cli plan
//! ```
//!
//! Clause by clause output is logged at the trace level, and is verbose.

pub mod config;
pub mod db;
pub mod gripper;
pub mod io;
pub mod misc;
pub mod planner;
pub mod procedures;
pub mod solver;
pub mod structures;
pub mod types;
