/*!
Emission of the clauses which encode a planning problem to a horizon.

# Overview

Each family of clauses is a fixed template, instantiated over timesteps.
Written with `f@t` for the variable of fact `f` at timestep `t`, and `a@t` for the variable of action `a` at timestep `t`:

| Family | Timesteps | Clauses |
|---|---|---|
| Initial state | 0 | `f@0` or `-f@0`, for each fact, as given by the problem |
| Invariants | 0..=horizon | For each partition group: `-f@t ∨ -g@t` for each pair, and `f₁@t ∨ … ∨ fₙ@t` |
| Actions | 0..horizon | `-a@t ∨ p@t` for each precondition, `-a@t ∨ f@t+1` for each add, `-a@t ∨ -f@t+1` for each delete |
| Frame axioms | 0..horizon | `f@t ∨ -f@t+1 ∨ adders@t`, and `-f@t ∨ f@t+1 ∨ deleters@t`, for each fact |
| Exclusion | 0..horizon | `-a@t ∨ -b@t` for each pair of distinct actions |
| Contiguity | 1..horizon | `-b@t ∨ a₁@t-1 ∨ … ∨ aₙ@t-1`, for each action `b` |
| Halting | 0..horizon | `-g₁@t ∨ … ∨ -gₖ@t ∨ -a@t`, for each action `a` |
| Goal | horizon | `g@horizon` for each goal fact |

The frame axioms are explanatory: if a fact changes value, some action which makes that change occurred.
The adders and deleters of a fact are read from an [AffectsIndex], and a clause names every action which can make the change.
For a fact no action changes, the axioms reduce to `f@t ↔ f@t+1`.

Contiguity and halting fix where idle timesteps fall.
An action occurs only if some action occurred at the previous timestep, and no action occurs once every goal fact holds.
So, the actions of a plan occupy a prefix of the timesteps, and the plan stops as soon as the goal is reached, with any spare timesteps idle at the end.
Neither family removes a plan from a horizon: any plan can be cut at the first timestep the goal holds, and padded at the end.

Clauses are emitted family by family, in the order of the table, and within a family by timestep, then in declaration order.
So, emission is deterministic.

# Example

```rust
# use satplan::db::variable_map::Allocator;
# use satplan::gripper::Gripper;
# use satplan::procedures::encode::ClauseEmitter;
# use satplan::structures::problem::Problem;
let gripper = Gripper::two_rooms();
let domain = gripper.domain().unwrap();
let problem = Problem::from_spec(&domain, &gripper.transfer_problem()).unwrap();

let map = Allocator::for_domain(&domain, 4).unwrap();
let (cnf, stats) = ClauseEmitter::new(&domain, &problem, &map).unwrap().emit().unwrap();

assert_eq!(cnf.var_count, map.var_count());
assert_eq!(cnf.len(), stats.clauses());
```
*/

use crate::{
    db::{affects::AffectsIndex, variable_map::VariableMap},
    misc::log::targets::{self},
    structures::{
        clause::{Clause, Cnf, Literal},
        domain::{ActionId, Domain, FactId},
        key::VariableKey,
        problem::Problem,
    },
    types::err::{self, ErrorKind},
};

/// Counts of emitted clauses, by family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodingStats {
    pub variables: usize,
    pub initial: usize,
    pub invariant: usize,
    pub action: usize,
    pub frame: usize,
    pub exclusion: usize,
    pub contiguity: usize,
    pub halting: usize,
    pub goal: usize,
}

impl EncodingStats {
    pub fn clauses(&self) -> usize {
        self.initial
            + self.invariant
            + self.action
            + self.frame
            + self.exclusion
            + self.contiguity
            + self.halting
            + self.goal
    }

    /// Clauses per variable.
    pub fn density(&self) -> f64 {
        match self.variables {
            0 => 0.0,
            variables => self.clauses() as f64 / variables as f64,
        }
    }
}

impl std::fmt::Display for EncodingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} variables, {} clauses (initial {}, invariant {}, action {}, frame {}, exclusion {}, contiguity {}, halting {}, goal {}), density {:.3}",
            self.variables,
            self.clauses(),
            self.initial,
            self.invariant,
            self.action,
            self.frame,
            self.exclusion,
            self.contiguity,
            self.halting,
            self.goal,
            self.density()
        )
    }
}

/// Emits the clauses of a problem over the variables of a map.
///
/// The emitter owns the formula until [emit](ClauseEmitter::emit) hands it off.
pub struct ClauseEmitter<'e> {
    domain: &'e Domain,
    problem: &'e Problem,
    map: &'e VariableMap,
    affects: AffectsIndex,
    cnf: Cnf,
    stats: EncodingStats,
}

impl<'e> ClauseEmitter<'e> {
    /// An emitter, given the map was allocated for the domain and the problem was built over the domain.
    ///
    /// A map whose facts or actions differ from those of the domain is rejected, rather than read with misaligned ids.
    /// Likewise for a problem over some other set of facts.
    pub fn new(
        domain: &'e Domain,
        problem: &'e Problem,
        map: &'e VariableMap,
    ) -> Result<Self, ErrorKind> {
        problem.check_domain(domain)?;

        if let Some(fact) = domain
            .fact_names()
            .iter()
            .enumerate()
            .find(|(index, name)| map.fact_names().get(*index) != Some(*name))
            .map(|(_, name)| name)
        {
            return Err(err::DomainError::UnknownFact(fact.clone()).into());
        }

        let identifiers = domain.action_identifiers();
        if let Some(action) = identifiers
            .iter()
            .enumerate()
            .find(|(index, identifier)| map.action_identifiers().get(*index) != Some(*identifier))
            .map(|(_, identifier)| identifier)
        {
            return Err(err::DomainError::UnknownAction(action.clone()).into());
        }

        Ok(ClauseEmitter {
            domain,
            problem,
            map,
            affects: AffectsIndex::new(domain),
            cnf: Cnf::new(map.var_count()),
            stats: EncodingStats {
                variables: map.var_count(),
                ..Default::default()
            },
        })
    }

    /// Emits every family of clauses, and returns the formula with counts of the clauses emitted.
    pub fn emit(mut self) -> Result<(Cnf, EncodingStats), ErrorKind> {
        let horizon = self.map.horizon();

        self.initial_state()?;

        for timestep in 0..=horizon {
            self.invariants(timestep)?;
        }

        for timestep in 0..horizon {
            self.action_semantics(timestep)?;
            self.frame_axioms(timestep)?;
            self.exclusion(timestep)?;
            if timestep > 0 {
                self.contiguity(timestep)?;
            }
            self.halting(timestep)?;
        }

        self.goal(horizon)?;

        log::info!(target: targets::ENCODING, "Horizon {horizon}: {}", self.stats);
        Ok((self.cnf, self.stats))
    }

    fn fact(&self, fact: FactId, timestep: usize, polarity: bool) -> Result<Literal, ErrorKind> {
        self.map
            .literal(VariableKey::fact(fact, timestep), polarity)
    }

    fn action(
        &self,
        action: ActionId,
        timestep: usize,
        polarity: bool,
    ) -> Result<Literal, ErrorKind> {
        self.map
            .literal(VariableKey::action(action, timestep), polarity)
    }

    fn push(&mut self, clause: Clause) {
        log::trace!(target: targets::ENCODING, "Clause {clause:?}");
        self.cnf.add_clause(clause);
    }

    /// A unit clause for each fact, fixing its value at the first timestep.
    fn initial_state(&mut self) -> Result<(), ErrorKind> {
        let domain = self.domain;
        for fact in domain.fact_ids() {
            let literal = self.fact(fact, 0, self.problem.initial_value(fact))?;
            self.push(vec![literal]);
            self.stats.initial += 1;
        }
        Ok(())
    }

    /// For each partition group, at most one and at least one member is true.
    fn invariants(&mut self, timestep: usize) -> Result<(), ErrorKind> {
        let domain = self.domain;
        for group in domain.partitions() {
            for (index, first) in group.iter().enumerate() {
                for second in &group[index + 1..] {
                    let clause = vec![
                        self.fact(*first, timestep, false)?,
                        self.fact(*second, timestep, false)?,
                    ];
                    self.push(clause);
                    self.stats.invariant += 1;
                }
            }

            let mut at_least_one = Vec::with_capacity(group.len());
            for fact in group {
                at_least_one.push(self.fact(*fact, timestep, true)?);
            }
            self.push(at_least_one);
            self.stats.invariant += 1;
        }
        Ok(())
    }

    /// Each action implies its preconditions now and its effects at the next timestep.
    fn action_semantics(&mut self, timestep: usize) -> Result<(), ErrorKind> {
        let domain = self.domain;
        for (id, action) in domain.actions() {
            let not_action = self.action(id, timestep, false)?;

            for fact in &action.preconditions {
                let clause = vec![not_action, self.fact(*fact, timestep, true)?];
                self.push(clause);
                self.stats.action += 1;
            }

            for fact in &action.add {
                let clause = vec![not_action, self.fact(*fact, timestep + 1, true)?];
                self.push(clause);
                self.stats.action += 1;
            }

            for fact in &action.delete {
                let clause = vec![not_action, self.fact(*fact, timestep + 1, false)?];
                self.push(clause);
                self.stats.action += 1;
            }
        }
        Ok(())
    }

    /// A change in the value of a fact is explained by some action which makes the change.
    fn frame_axioms(&mut self, timestep: usize) -> Result<(), ErrorKind> {
        if timestep == 0 {
            let domain = self.domain;
            let static_facts = domain
                .fact_ids()
                .filter(|fact| self.affects.is_static(*fact))
                .map(|fact| domain.fact_name(fact))
                .collect::<Vec<_>>();
            log::trace!(target: targets::ENCODING, "Static facts {static_facts:?}");
        }

        for fact in self.domain.fact_ids() {
            // false at t, true at t+1, so some adder occurred
            let mut becomes_true = vec![
                self.fact(fact, timestep, true)?,
                self.fact(fact, timestep + 1, false)?,
            ];
            for adder in self.affects.adders(fact) {
                becomes_true.push(self.action(*adder, timestep, true)?);
            }

            // true at t, false at t+1, so some deleter occurred
            let mut becomes_false = vec![
                self.fact(fact, timestep, false)?,
                self.fact(fact, timestep + 1, true)?,
            ];
            for deleter in self.affects.deleters(fact) {
                becomes_false.push(self.action(*deleter, timestep, true)?);
            }

            self.push(becomes_true);
            self.push(becomes_false);
            self.stats.frame += 2;
        }
        Ok(())
    }

    /// At most one action at each timestep.
    fn exclusion(&mut self, timestep: usize) -> Result<(), ErrorKind> {
        let actions = self.domain.action_ids().collect::<Vec<_>>();
        for (index, first) in actions.iter().enumerate() {
            for second in &actions[index + 1..] {
                let clause = vec![
                    self.action(*first, timestep, false)?,
                    self.action(*second, timestep, false)?,
                ];
                self.push(clause);
                self.stats.exclusion += 1;
            }
        }
        Ok(())
    }

    /// An action at the timestep only if some action occurred at the previous timestep.
    fn contiguity(&mut self, timestep: usize) -> Result<(), ErrorKind> {
        let actions = self.domain.action_ids().collect::<Vec<_>>();

        let mut previous = Vec::with_capacity(actions.len() + 1);
        for action in &actions {
            previous.push(self.action(*action, timestep - 1, true)?);
        }

        for action in &actions {
            let mut clause = Vec::with_capacity(previous.len() + 1);
            clause.push(self.action(*action, timestep, false)?);
            clause.extend_from_slice(&previous);
            self.push(clause);
            self.stats.contiguity += 1;
        }
        Ok(())
    }

    /// No action at the timestep if every goal fact holds.
    fn halting(&mut self, timestep: usize) -> Result<(), ErrorKind> {
        let problem = self.problem;
        let mut goal_unmet = Vec::with_capacity(problem.goal().len() + 1);
        for fact in problem.goal() {
            goal_unmet.push(self.fact(*fact, timestep, false)?);
        }

        let actions = self.domain.action_ids().collect::<Vec<_>>();
        for action in actions {
            let mut clause = goal_unmet.clone();
            clause.push(self.action(action, timestep, false)?);
            self.push(clause);
            self.stats.halting += 1;
        }
        Ok(())
    }

    /// A unit clause for each goal fact at the horizon.
    fn goal(&mut self, horizon: usize) -> Result<(), ErrorKind> {
        let problem = self.problem;
        for fact in problem.goal() {
            let literal = self.fact(*fact, horizon, true)?;
            self.push(vec![literal]);
            self.stats.goal += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::variable_map::Allocator,
        structures::{
            domain::{ActionSpec, DomainSpec},
            problem::ProblemSpec,
        },
    };

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// A light with two positions, and a fact no action touches.
    fn light() -> (Domain, Problem) {
        let domain = DomainSpec {
            facts: strings(&["on", "off", "painted"]),
            partitions: vec![strings(&["on", "off"])],
            actions: vec![
                ActionSpec {
                    name: "switch-on".to_string(),
                    preconditions: strings(&["off"]),
                    add: strings(&["on"]),
                    delete: strings(&["off"]),
                    ..Default::default()
                },
                ActionSpec {
                    name: "switch-off".to_string(),
                    preconditions: strings(&["on"]),
                    add: strings(&["off"]),
                    delete: strings(&["on"]),
                    ..Default::default()
                },
            ],
        }
        .build()
        .unwrap();

        let problem = Problem::from_spec(
            &domain,
            &ProblemSpec {
                initial: strings(&["off"]),
                goal: strings(&["on"]),
            },
        )
        .unwrap();

        (domain, problem)
    }

    #[test]
    fn family_counts() {
        let (domain, problem) = light();
        let map = Allocator::for_domain(&domain, 2).unwrap();
        let (cnf, stats) = ClauseEmitter::new(&domain, &problem, &map)
            .unwrap()
            .emit()
            .unwrap();

        assert_eq!(stats.variables, 3 * 3 + 2 * 2);
        assert_eq!(stats.initial, 3);
        // one pair and one disjunction, at three timesteps
        assert_eq!(stats.invariant, 2 * 3);
        // three clauses per action, two actions, two timesteps
        assert_eq!(stats.action, 3 * 2 * 2);
        assert_eq!(stats.frame, 2 * 3 * 2);
        assert_eq!(stats.exclusion, 2);
        // two actions at timestep 1
        assert_eq!(stats.contiguity, 2);
        // two actions at two timesteps
        assert_eq!(stats.halting, 2 * 2);
        assert_eq!(stats.goal, 1);
        assert_eq!(cnf.len(), stats.clauses());
    }

    #[test]
    fn frame_axioms_name_every_adder_and_deleter() {
        let (domain, problem) = light();
        let map = Allocator::for_domain(&domain, 1).unwrap();
        let (cnf, _) = ClauseEmitter::new(&domain, &problem, &map)
            .unwrap()
            .emit()
            .unwrap();

        let on_0 = map.fact("on", 0).unwrap() as Literal;
        let on_1 = map.fact("on", 1).unwrap() as Literal;
        let switch_on = map.action("switch-on()", 0).unwrap() as Literal;
        let switch_off = map.action("switch-off()", 0).unwrap() as Literal;

        assert!(cnf.clauses.contains(&vec![on_0, -on_1, switch_on]));
        assert!(cnf.clauses.contains(&vec![-on_0, on_1, switch_off]));

        // A fact no action touches keeps its value.
        let painted_0 = map.fact("painted", 0).unwrap() as Literal;
        let painted_1 = map.fact("painted", 1).unwrap() as Literal;
        assert!(cnf.clauses.contains(&vec![painted_0, -painted_1]));
        assert!(cnf.clauses.contains(&vec![-painted_0, painted_1]));
    }

    #[test]
    fn idle_timesteps_trail_the_plan() {
        let (domain, problem) = light();
        let map = Allocator::for_domain(&domain, 2).unwrap();
        let (cnf, _) = ClauseEmitter::new(&domain, &problem, &map)
            .unwrap()
            .emit()
            .unwrap();

        let switch_on = |t| map.action("switch-on()", t).unwrap() as Literal;
        let switch_off = |t| map.action("switch-off()", t).unwrap() as Literal;
        let on = |t| map.fact("on", t).unwrap() as Literal;

        assert!(cnf.clauses.contains(&vec![-switch_on(1), switch_on(0), switch_off(0)]));
        assert!(cnf.clauses.contains(&vec![-switch_off(1), switch_on(0), switch_off(0)]));

        for timestep in 0..2 {
            assert!(cnf.clauses.contains(&vec![-on(timestep), -switch_on(timestep)]));
            assert!(cnf.clauses.contains(&vec![-on(timestep), -switch_off(timestep)]));
        }
    }

    #[test]
    fn empty_goal_halts_at_once() {
        let (domain, _) = light();
        let problem = Problem::from_spec(
            &domain,
            &ProblemSpec {
                initial: strings(&["off"]),
                goal: Vec::default(),
            },
        )
        .unwrap();
        let map = Allocator::for_domain(&domain, 1).unwrap();
        let (cnf, stats) = ClauseEmitter::new(&domain, &problem, &map)
            .unwrap()
            .emit()
            .unwrap();

        assert_eq!(stats.halting, 2);
        let switch_on = map.action("switch-on()", 0).unwrap() as Literal;
        assert!(cnf.clauses.contains(&vec![-switch_on]));
    }

    #[test]
    fn deterministic_emission() {
        let (domain, problem) = light();
        let emit = || {
            let map = Allocator::for_domain(&domain, 3).unwrap();
            ClauseEmitter::new(&domain, &problem, &map)
                .unwrap()
                .emit()
                .unwrap()
                .0
        };
        assert_eq!(emit(), emit());
    }

    #[test]
    fn problem_for_another_domain() {
        let (domain, _) = light();
        let (smaller, smaller_problem) = {
            let spec = DomainSpec {
                facts: strings(&["on", "off"]),
                partitions: vec![strings(&["on", "off"])],
                actions: Vec::default(),
            };
            let smaller = spec.build().unwrap();
            let problem = Problem::from_spec(
                &smaller,
                &ProblemSpec {
                    initial: strings(&["on"]),
                    goal: strings(&["off"]),
                },
            )
            .unwrap();
            (smaller, problem)
        };
        assert_eq!(smaller.fact_count(), 2);

        let map = Allocator::for_domain(&domain, 1).unwrap();
        assert!(matches!(
            ClauseEmitter::new(&domain, &smaller_problem, &map),
            Err(ErrorKind::Domain(err::DomainError::ProblemMismatch {
                problem_facts: 2,
                domain_facts: 3
            }))
        ));
    }

    #[test]
    fn misaligned_map() {
        let (domain, problem) = light();
        let mut allocator = Allocator::new();
        allocator.declare_facts(&strings(&["off", "on", "painted"]), 1).unwrap();
        allocator
            .declare_actions(&domain.action_identifiers(), 1)
            .unwrap();
        let map = allocator.finish();

        assert!(matches!(
            ClauseEmitter::new(&domain, &problem, &map),
            Err(ErrorKind::Domain(err::DomainError::UnknownFact(_)))
        ));
    }
}
