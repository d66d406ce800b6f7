/*!
The gripper domain: a robot with a single hand carries balls between rooms.

# Facts

For rooms `R`, balls `b`:
- `at-robot(R)`: the robot is in room `R`.
- `at(b,R)`: ball `b` lies in room `R`.
- `holding(b)`: the robot holds ball `b`.
- `free-hand`: the robot holds nothing.

The robot is in exactly one room, each ball is either in exactly one room or held, and the hand is either free or holds exactly one ball.
Each of these is a partition group.

# Actions

Actions are declared in the order:
- `pick-up(b,R)`, for each ball and room, requiring the robot and the ball in `R` with a free hand.
- `move(R,S)`, for each pair of distinct rooms, requiring the robot in `R`.
- `drop(b,R)`, for each ball and room, requiring the robot in `R` and holding `b`.

# Example

```rust
# use satplan::gripper::Gripper;
let gripper = Gripper::two_rooms();
let domain = gripper.domain().unwrap();

assert_eq!(domain.fact_count(), 6);
assert_eq!(
    domain.action_identifiers(),
    ["pick-up(ball,A)", "pick-up(ball,B)", "move(A,B)", "move(B,A)", "drop(ball,A)", "drop(ball,B)"]
);
```
*/

use crate::{
    structures::{
        domain::{ActionSpec, Domain, DomainSpec},
        problem::ProblemSpec,
    },
    types::err::ErrorKind,
};

pub const FREE_HAND: &str = "free-hand";

pub fn at_robot(room: &str) -> String {
    format!("at-robot({room})")
}

pub fn at(ball: &str, room: &str) -> String {
    format!("at({ball},{room})")
}

pub fn holding(ball: &str) -> String {
    format!("holding({ball})")
}

/// A gripper domain over the given rooms and balls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gripper {
    rooms: Vec<String>,
    balls: Vec<String>,
}

impl Gripper {
    pub fn new(
        rooms: impl IntoIterator<Item = impl Into<String>>,
        balls: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Gripper {
            rooms: rooms.into_iter().map(Into::into).collect(),
            balls: balls.into_iter().map(Into::into).collect(),
        }
    }

    /// Rooms `A` and `B`, and a single ball `ball`.
    pub fn two_rooms() -> Self {
        Gripper::new(["A", "B"], ["ball"])
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn balls(&self) -> &[String] {
        &self.balls
    }

    pub fn domain_spec(&self) -> DomainSpec {
        let mut facts = Vec::default();
        for ball in &self.balls {
            for room in &self.rooms {
                facts.push(at(ball, room));
            }
        }
        for room in &self.rooms {
            facts.push(at_robot(room));
        }
        facts.push(FREE_HAND.to_string());
        for ball in &self.balls {
            facts.push(holding(ball));
        }

        let mut partitions: Vec<Vec<String>> = vec![self.rooms.iter().map(|room| at_robot(room)).collect()];
        for ball in &self.balls {
            let mut group = self
                .rooms
                .iter()
                .map(|room| at(ball, room))
                .collect::<Vec<_>>();
            group.push(holding(ball));
            partitions.push(group);
        }
        let mut hand = vec![FREE_HAND.to_string()];
        hand.extend(self.balls.iter().map(|ball| holding(ball)));
        partitions.push(hand);

        let mut actions = Vec::default();

        for ball in &self.balls {
            for room in &self.rooms {
                actions.push(ActionSpec {
                    name: "pick-up".to_string(),
                    parameters: vec![ball.clone(), room.clone()],
                    preconditions: vec![at_robot(room), at(ball, room), FREE_HAND.to_string()],
                    add: vec![holding(ball)],
                    delete: vec![at(ball, room), FREE_HAND.to_string()],
                });
            }
        }

        for from in &self.rooms {
            for to in self.rooms.iter().filter(|to| *to != from) {
                actions.push(ActionSpec {
                    name: "move".to_string(),
                    parameters: vec![from.clone(), to.clone()],
                    preconditions: vec![at_robot(from)],
                    add: vec![at_robot(to)],
                    delete: vec![at_robot(from)],
                });
            }
        }

        for ball in &self.balls {
            for room in &self.rooms {
                actions.push(ActionSpec {
                    name: "drop".to_string(),
                    parameters: vec![ball.clone(), room.clone()],
                    preconditions: vec![at_robot(room), holding(ball)],
                    add: vec![at(ball, room), FREE_HAND.to_string()],
                    delete: vec![holding(ball)],
                });
            }
        }

        DomainSpec {
            facts,
            partitions,
            actions,
        }
    }

    pub fn domain(&self) -> Result<Domain, ErrorKind> {
        self.domain_spec().build()
    }

    /// A problem with the robot in the given room with a free hand, and balls placed as given.
    pub fn problem_spec(
        &self,
        robot: &str,
        initial: &[(&str, &str)],
        goal: &[(&str, &str)],
    ) -> ProblemSpec {
        let mut initial_facts = vec![at_robot(robot), FREE_HAND.to_string()];
        initial_facts.extend(initial.iter().map(|(ball, room)| at(ball, room)));

        ProblemSpec {
            initial: initial_facts,
            goal: goal.iter().map(|(ball, room)| at(ball, room)).collect(),
        }
    }

    /// Every ball, and the robot, start in the first room, and every ball is to be moved to the last room.
    pub fn transfer_problem(&self) -> ProblemSpec {
        let first = self.rooms.first().map(String::as_str).unwrap_or_default();
        let last = self.rooms.last().map(String::as_str).unwrap_or_default();

        let initial = self
            .balls
            .iter()
            .map(|ball| (ball.as_str(), first))
            .collect::<Vec<_>>();
        let goal = self
            .balls
            .iter()
            .map(|ball| (ball.as_str(), last))
            .collect::<Vec<_>>();

        self.problem_spec(first, &initial, &goal)
    }
}
