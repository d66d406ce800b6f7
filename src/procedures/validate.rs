//! Validation of a plan by simulation, independent of any encoding.
//!
//! The initial state of the problem is updated step by step.
//! At each step the preconditions of the action must hold, and then the delete effects and add effects of the action are applied, in that order.
//! After the final step every goal fact must hold.
//!
//! A plan decoded from a model should always validate, and so validation is a check on the encoding as much as on a plan read from a file.

use crate::{
    misc::log::targets::{self},
    structures::{domain::Domain, plan::Plan, problem::Problem},
    types::err::{self, ErrorKind},
};

/// The states a plan passes through, from the initial state to the state after the final step.
///
/// Each state is the value of each fact, indexed by [FactId](crate::structures::domain::FactId).
/// If a horizon is given, every step must occur before the horizon.
/// A problem built over some other domain is an error.
pub fn simulate(
    domain: &Domain,
    problem: &Problem,
    plan: &Plan,
    horizon: Option<usize>,
) -> Result<Vec<Vec<bool>>, ErrorKind> {
    problem.check_domain(domain)?;

    let mut states = vec![problem.initial().to_vec()];
    let mut previous_timestep = None;

    for (step, plan_step) in plan.steps().iter().enumerate() {
        let out_of_order = previous_timestep.is_some_and(|previous| plan_step.timestep <= previous);
        let past_horizon = horizon.is_some_and(|horizon| plan_step.timestep >= horizon);
        if out_of_order || past_horizon {
            return Err(err::PlanError::Timestep { step }.into());
        }
        previous_timestep = Some(plan_step.timestep);

        let identifier = plan_step.identifier();
        let Some(action_id) = domain.action_id(&identifier) else {
            return Err(err::PlanError::UnknownAction {
                step,
                action: identifier,
            }
            .into());
        };
        let action = domain.action(action_id);

        let mut state = states[states.len() - 1].clone();

        if let Some(unmet) = action.preconditions.iter().find(|fact| !state[fact.index()]) {
            log::info!(target: targets::VALIDATION, "Step {step} ({identifier}) fails on {}", domain.fact_name(*unmet));
            return Err(err::PlanError::Precondition {
                step,
                fact: domain.fact_name(*unmet).to_string(),
            }
            .into());
        }

        for fact in &action.delete {
            state[fact.index()] = false;
        }
        for fact in &action.add {
            state[fact.index()] = true;
        }

        states.push(state);
    }

    Ok(states)
}

/// Validates a plan, returning the final state.
pub fn validate(
    domain: &Domain,
    problem: &Problem,
    plan: &Plan,
    horizon: Option<usize>,
) -> Result<Vec<bool>, ErrorKind> {
    let mut states = simulate(domain, problem, plan, horizon)?;
    let final_state = states.pop().unwrap_or_else(|| problem.initial().to_vec());

    if let Some(unmet) = problem.goal().iter().find(|fact| !final_state[fact.index()]) {
        return Err(err::PlanError::GoalUnmet {
            fact: domain.fact_name(*unmet).to_string(),
        }
        .into());
    }

    log::info!(target: targets::VALIDATION, "Plan of {} steps is valid", plan.len());
    Ok(final_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gripper::Gripper,
        structures::{plan::PlanStep, problem::Problem},
    };

    fn setup() -> (Domain, Problem) {
        let gripper = Gripper::two_rooms();
        let domain = gripper.domain().unwrap();
        let problem = Problem::from_spec(&domain, &gripper.transfer_problem()).unwrap();
        (domain, problem)
    }

    #[test]
    fn transfer() {
        let (domain, problem) = setup();
        let plan = Plan::new(vec![
            PlanStep::new(0, "pick-up", ["ball", "A"]),
            PlanStep::new(1, "move", ["A", "B"]),
            PlanStep::new(3, "drop", ["ball", "B"]),
        ]);

        let final_state = validate(&domain, &problem, &plan, Some(4)).unwrap();
        let ball_in_b = domain.fact("at(ball,B)").unwrap();
        assert!(final_state[ball_in_b.index()]);

        assert_eq!(
            validate(&domain, &problem, &plan, Some(3)),
            Err(ErrorKind::Plan(err::PlanError::Timestep { step: 2 }))
        );
    }

    #[test]
    fn failures() {
        let (domain, problem) = setup();

        let early_drop = Plan::new(vec![PlanStep::new(0, "drop", ["ball", "B"])]);
        assert_eq!(
            validate(&domain, &problem, &early_drop, None),
            Err(ErrorKind::Plan(err::PlanError::Precondition {
                step: 0,
                fact: "at-robot(B)".to_string()
            }))
        );

        let unknown = Plan::new(vec![PlanStep::new(0, "jump", ["A"])]);
        assert!(matches!(
            validate(&domain, &problem, &unknown, None),
            Err(ErrorKind::Plan(err::PlanError::UnknownAction { step: 0, .. }))
        ));

        let short = Plan::new(vec![PlanStep::new(0, "pick-up", ["ball", "A"])]);
        assert_eq!(
            validate(&domain, &problem, &short, None),
            Err(ErrorKind::Plan(err::PlanError::GoalUnmet {
                fact: "at(ball,B)".to_string()
            }))
        );
    }

    #[test]
    fn problem_for_another_domain() {
        let (_, problem) = setup();
        let three_rooms = Gripper::new(["A", "B", "C"], ["ball"]).domain().unwrap();
        let plan = Plan::new(vec![PlanStep::new(0, "pick-up", ["ball", "A"])]);

        assert!(matches!(
            validate(&three_rooms, &problem, &plan, None),
            Err(ErrorKind::Domain(err::DomainError::ProblemMismatch { .. }))
        ));
    }
}
