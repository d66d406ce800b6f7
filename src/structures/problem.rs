//! Problems, aka. an initial state and a goal over the facts of some domain.
//!
//! The initial state is read under the closed world assumption: facts listed in the descriptor are true, and every other fact is false.
//! So, the initial state always values every fact of the domain.

use serde::{Deserialize, Serialize};

use crate::{
    structures::domain::{Domain, FactId},
    types::err::{self, ErrorKind},
};

/// Descriptor of a problem, with facts referred to by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSpec {
    /// The facts true in the initial state.
    pub initial: Vec<String>,

    /// The facts required true at the horizon.
    pub goal: Vec<String>,
}

/// A validated problem, relative to some domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    initial: Vec<bool>,
    goal: Vec<FactId>,
}

impl Problem {
    pub fn from_spec(domain: &Domain, spec: &ProblemSpec) -> Result<Self, ErrorKind> {
        let lookup = |name: &String| {
            domain
                .fact(name)
                .ok_or_else(|| ErrorKind::from(err::DomainError::UnknownFact(name.clone())))
        };

        let mut initial = vec![false; domain.fact_count()];
        for name in &spec.initial {
            initial[lookup(name)?.index()] = true;
        }

        let mut goal = Vec::with_capacity(spec.goal.len());
        for name in &spec.goal {
            let fact = lookup(name)?;
            if !goal.contains(&fact) {
                goal.push(fact);
            }
        }

        for (group, members) in domain.partitions().iter().enumerate() {
            if members.iter().filter(|fact| initial[fact.index()]).count() != 1 {
                return Err(err::DomainError::InitialStateViolatesPartition { group }.into());
            }
        }

        Ok(Problem { initial, goal })
    }

    /// Checks the problem was built over the facts of the domain.
    ///
    /// A problem is only ever read by [FactId], so this is a check that every id the problem holds is an id of the domain, and that the initial state values every fact of the domain.
    pub fn check_domain(&self, domain: &Domain) -> Result<(), ErrorKind> {
        let domain_facts = domain.fact_count();
        let goal_facts = self.goal.iter().map(|fact| fact.index() + 1).max().unwrap_or(0);

        if self.initial.len() == domain_facts && goal_facts <= domain_facts {
            return Ok(());
        }

        Err(err::DomainError::ProblemMismatch {
            problem_facts: self.initial.len().max(goal_facts),
            domain_facts,
        }
        .into())
    }

    /// The value of a fact in the initial state.
    pub fn initial_value(&self, fact: FactId) -> bool {
        self.initial[fact.index()]
    }

    /// The initial value of every fact, indexed by fact.
    pub fn initial(&self) -> &[bool] {
        &self.initial
    }

    pub fn goal(&self) -> &[FactId] {
        &self.goal
    }
}
