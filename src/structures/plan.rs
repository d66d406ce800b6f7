//! Plans, aka. the actions of a model ordered by timestep.
//!
//! A plan has a line-oriented text form, with one step per line:
//!
//! ```text
//! ; comments and blank lines are skipped
//! 0: (pick-up ball A)
//! 1: (move A B)
//! 2: (drop ball B)
//! ```
//!
//! The form is close to the plan files read by validation tools such as VAL, and reads back to the same plan.
//!
//! ```rust
//! # use satplan::structures::plan::{Plan, PlanStep};
//! let plan = Plan::new(vec![
//!     PlanStep::new(1, "move", ["A", "B"]),
//!     PlanStep::new(0, "pick-up", ["ball", "A"]),
//! ]);
//!
//! assert_eq!(plan.to_string(), "0: (pick-up ball A)\n1: (move A B)\n");
//! assert_eq!(plan.to_string().parse::<Plan>(), Ok(plan));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{structures::domain, types::err};

/// An action executed between some timestep and the next.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanStep {
    pub timestep: usize,
    pub action: String,
    pub parameters: Vec<String>,
}

impl PlanStep {
    pub fn new<S: Into<String>>(
        timestep: usize,
        action: &str,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        PlanStep {
            timestep,
            action: action.to_string(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// The identifier of the action of the step, as used by a [Domain](domain::Domain).
    pub fn identifier(&self) -> String {
        domain::identifier(&self.action, &self.parameters)
    }
}

impl std::fmt::Display for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ({}", self.timestep, self.action)?;
        for parameter in &self.parameters {
            write!(f, " {parameter}")?;
        }
        write!(f, ")")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    /// A plan of the given steps, sorted by timestep.
    pub fn new(mut steps: Vec<PlanStep>) -> Self {
        steps.sort_by_key(|step| step.timestep);
        Plan { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The number of timesteps occupied by the plan.
    /// As execution is serial, this is the number of actions.
    pub fn makespan(&self) -> usize {
        self.steps.len()
    }

    /// The identifiers of the actions of the plan, in order.
    pub fn identifiers(&self) -> Vec<String> {
        self.steps.iter().map(PlanStep::identifier).collect()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        Ok(())
    }
}

impl FromStr for Plan {
    type Err = err::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::default();

        for (index, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let malformed = err::ParseError::PlanLine(index + 1);

            let Some((timestep, action)) = line.split_once(':') else {
                return Err(malformed);
            };
            let Ok(timestep) = timestep.trim().parse::<usize>() else {
                return Err(malformed);
            };
            let Some(inner) = action
                .trim()
                .strip_prefix('(')
                .and_then(|rest| rest.strip_suffix(')'))
            else {
                return Err(malformed);
            };

            let mut words = inner.split_whitespace();
            let Some(name) = words.next() else {
                return Err(malformed);
            };
            steps.push(PlanStep::new(timestep, name, words));
        }

        Ok(Plan::new(steps))
    }
}
