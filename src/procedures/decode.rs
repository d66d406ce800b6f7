/*!
Reading a plan, and the states it passes through, from a model.

# Overview

For each timestep below the horizon, in ascending order, the action variables of the timestep are read in action order.
The action whose variable is true, if any, is the step of the plan at that timestep.
A timestep with no true action is skipped, so a plan may be shorter than the horizon.

Any model of an encoding has at most one true action per timestep, and a model with more is an [InconsistentModelError](err::InconsistentModelError).
This is not masked by picking one of the actions, as a model with concurrent actions was not produced from the encoding the map describes.

Decoding depends only on an assignment and a [VariableMap], and so a model returned by some external solver may be decoded given the map saved alongside the formula.

```rust
# use satplan::db::variable_map::Allocator;
# use satplan::procedures::decode::decode;
# use satplan::structures::assignment::Assignment;
let mut allocator = Allocator::new();
allocator.declare_facts(&["p".to_string()], 2).unwrap();
allocator.declare_actions(&["go(A,B)".to_string()], 2).unwrap();
let map = allocator.finish();

let go_1 = map.action("go(A,B)", 1).unwrap();
let model = Assignment::from_literals([go_1 as i32]);

let plan = decode(&model, &map).unwrap();
assert_eq!(plan.to_string(), "1: (go A B)\n");
```
*/

use std::collections::BTreeSet;

use crate::{
    db::variable_map::VariableMap,
    misc::log::targets::{self},
    structures::{
        assignment::Assignment,
        domain::{self, FactId},
        key::VariableKey,
        plan::{Plan, PlanStep},
    },
    types::err::{self, ErrorKind},
};

/// The plan of a model.
pub fn decode(model: &Assignment, map: &VariableMap) -> Result<Plan, ErrorKind> {
    let mut steps = Vec::default();

    for timestep in 0..map.horizon() {
        let Some(ids) = map.action_ids_at(timestep) else {
            continue;
        };

        let true_actions = ids
            .iter()
            .enumerate()
            .filter(|(_, id)| model.is_true(**id))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        match true_actions.as_slice() {
            [] => {}

            [index] => {
                let identifier = &map.action_identifiers()[*index];
                log::trace!(target: targets::DECODING, "{identifier} at {timestep}");
                let (name, parameters) = domain::split_identifier(identifier);
                steps.push(PlanStep {
                    timestep,
                    action: name,
                    parameters,
                });
            }

            indices => {
                let actions = indices
                    .iter()
                    .map(|index| map.action_identifiers()[*index].clone())
                    .collect::<Vec<_>>();
                log::error!(target: targets::DECODING, "Concurrent actions at {timestep}: {actions:?}");
                return Err(err::InconsistentModelError::ConcurrentActions { timestep, actions }.into());
            }
        }
    }

    let plan = Plan::new(steps);
    log::info!(target: targets::DECODING, "Decoded a plan of {} steps", plan.len());
    Ok(plan)
}

/// The facts true at a timestep of a model, by name.
///
/// A timestep past the horizon has no variables, and is an error.
pub fn fact_state<'m>(
    model: &Assignment,
    map: &'m VariableMap,
    timestep: usize,
) -> Result<BTreeSet<&'m str>, ErrorKind> {
    let Some(ids) = map.fact_ids_at(timestep) else {
        return Err(ErrorKind::KeyNotFound(VariableKey::fact(FactId(0), timestep)));
    };

    Ok(ids
        .iter()
        .enumerate()
        .filter(|(_, id)| model.is_true(**id))
        .map(|(index, _)| map.fact_names()[index].as_str())
        .collect())
}

/// The facts true at each timestep of a model, from the first timestep to the horizon.
pub fn trace<'m>(
    model: &Assignment,
    map: &'m VariableMap,
) -> Result<Vec<BTreeSet<&'m str>>, ErrorKind> {
    (0..=map.horizon())
        .map(|timestep| fact_state(model, map, timestep))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::variable_map::Allocator;

    fn map() -> VariableMap {
        let mut allocator = Allocator::new();
        allocator
            .declare_facts(&["here".to_string(), "there".to_string()], 3)
            .unwrap();
        allocator
            .declare_actions(&["go(here,there)".to_string(), "rest()".to_string()], 3)
            .unwrap();
        allocator.finish()
    }

    #[test]
    fn idle_timesteps_are_skipped() {
        let map = map();
        let model = Assignment::from_literals([
            map.action("rest()", 0).unwrap() as i32,
            map.action("go(here,there)", 2).unwrap() as i32,
        ]);

        let plan = decode(&model, &map).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps()[0], PlanStep::new::<&str>(0, "rest", []));
        assert_eq!(plan.steps()[1], PlanStep::new(2, "go", ["here", "there"]));
    }

    #[test]
    fn concurrent_actions() {
        let map = map();
        let model = Assignment::from_literals([
            map.action("go(here,there)", 1).unwrap() as i32,
            map.action("rest()", 1).unwrap() as i32,
        ]);

        assert_eq!(
            decode(&model, &map),
            Err(ErrorKind::InconsistentModel(
                err::InconsistentModelError::ConcurrentActions {
                    timestep: 1,
                    actions: vec!["go(here,there)".to_string(), "rest()".to_string()]
                }
            ))
        );
    }

    #[test]
    fn states() {
        let map = map();
        let model = Assignment::from_literals([
            map.fact("here", 0).unwrap() as i32,
            map.fact("there", 3).unwrap() as i32,
        ]);

        let states = trace(&model, &map).unwrap();
        assert_eq!(states.len(), 4);
        assert_eq!(states[0], BTreeSet::from(["here"]));
        assert!(states[1].is_empty());
        assert_eq!(states[3], BTreeSet::from(["there"]));

        assert!(matches!(
            fact_state(&model, &map, 4),
            Err(ErrorKind::KeyNotFound(_))
        ));
    }
}
