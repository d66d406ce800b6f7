//! The encoding of a problem to a single horizon.

use std::io::Write;

use crate::{
    db::variable_map::{Allocator, VariableMap},
    io::{dimacs, map},
    planner::Outcome,
    procedures::{
        decode,
        encode::{ClauseEmitter, EncodingStats},
    },
    solver::{SolveReport, Solver},
    structures::{clause::Cnf, domain::Domain, problem::Problem},
    types::err::ErrorKind,
};

/// A formula together with the map of its variables.
#[derive(Clone, Debug)]
pub struct Encoding {
    map: VariableMap,
    cnf: Cnf,
    stats: EncodingStats,
}

impl Encoding {
    /// Allocates variables to the horizon, and emits every clause over them.
    pub fn new(domain: &Domain, problem: &Problem, horizon: usize) -> Result<Self, ErrorKind> {
        let map = Allocator::for_domain(domain, horizon)?;
        let (cnf, stats) = ClauseEmitter::new(domain, problem, &map)?.emit()?;
        Ok(Encoding { map, cnf, stats })
    }

    pub fn horizon(&self) -> usize {
        self.map.horizon()
    }

    pub fn map(&self) -> &VariableMap {
        &self.map
    }

    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    pub fn stats(&self) -> &EncodingStats {
        &self.stats
    }

    /// Solves the formula, decoding a plan from any model found.
    pub fn solve(&self, solver: &mut impl Solver) -> Result<Outcome, ErrorKind> {
        match solver.solve(&self.cnf)? {
            SolveReport::Unsatisfiable => Ok(Outcome::Unsatisfiable),
            SolveReport::Satisfiable(model) => {
                let plan = decode::decode(&model, &self.map)?;
                Ok(Outcome::Satisfiable { plan, model })
            }
        }
    }

    /// The comment lines written before the formula.
    ///
    /// With a legend, each variable is named, e.g. `c 12 holding(ball)@1`.
    pub fn preamble(&self, legend: bool) -> Result<Vec<String>, ErrorKind> {
        let mut preamble = vec![
            format!("horizon {}", self.horizon()),
            format!("{}", self.stats),
        ];
        if legend {
            for (id, _) in self.map.keys() {
                preamble.push(format!("{id} {}", self.map.describe(id)?));
            }
        }
        Ok(preamble)
    }

    pub fn write_dimacs(&self, writer: &mut impl Write, legend: bool) -> Result<(), ErrorKind> {
        dimacs::write_dimacs(writer, &self.cnf, &self.preamble(legend)?)
    }

    pub fn write_map(&self, writer: impl Write) -> Result<(), ErrorKind> {
        map::write_map(writer, &self.map)
    }
}
