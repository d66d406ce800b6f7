use satplan::{
    gripper::Gripper,
    planner::{Encoding, Outcome},
    procedures::decode::decode,
    solver::{Otter, SolveReport, Solver},
    structures::{
        assignment::Assignment,
        clause::{Cnf, Literal},
        domain::{ActionSpec, Domain},
        problem::Problem,
    },
    types::err::{self, ErrorKind},
};

fn transfer() -> (Domain, Problem) {
    let gripper = Gripper::two_rooms();
    let domain = gripper.domain().unwrap();
    let problem = Problem::from_spec(&domain, &gripper.transfer_problem()).unwrap();
    (domain, problem)
}

/// The formula of the encoding, together with the given unit clauses.
fn with_units(encoding: &Encoding, units: &[u32]) -> Cnf {
    let mut cnf = encoding.cnf().clone();
    for unit in units {
        cnf.add_clause(vec![*unit as Literal]);
    }
    cnf
}

fn model_of(encoding: &Encoding) -> Assignment {
    match encoding.solve(&mut Otter::default()).unwrap() {
        Outcome::Satisfiable { model, .. } => model,
        Outcome::Unsatisfiable => panic!("satisfiable"),
    }
}

mod encoding {
    use super::*;

    #[test]
    fn counts() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let stats = encoding.stats();

        // six facts at five timesteps, six actions at four timesteps
        assert_eq!(stats.variables, 6 * 5 + 6 * 4);
        assert_eq!(encoding.cnf().var_count, 54);

        assert_eq!(stats.initial, 6);
        // robot: one pair and a disjunction, ball: three pairs and a disjunction, hand: one pair and a disjunction
        assert_eq!(stats.invariant, (2 + 4 + 2) * 5);
        // pick-up: 3 + 1 + 2, move: 1 + 1 + 1, drop: 2 + 2 + 1
        assert_eq!(stats.action, (2 * 6 + 2 * 3 + 2 * 5) * 4);
        assert_eq!(stats.frame, 2 * 6 * 4);
        assert_eq!(stats.exclusion, 15 * 4);
        // six actions at timesteps 1 to 3
        assert_eq!(stats.contiguity, 6 * 3);
        // six actions at timesteps 0 to 3
        assert_eq!(stats.halting, 6 * 4);
        assert_eq!(stats.goal, 1);

        assert_eq!(stats.clauses(), 309);
        assert_eq!(encoding.cnf().len(), 309);
    }

    #[test]
    fn deterministic() {
        let (domain, problem) = transfer();
        let first = Encoding::new(&domain, &problem, 3).unwrap();
        let second = Encoding::new(&domain, &problem, 3).unwrap();
        assert_eq!(first.cnf(), second.cnf());

        let mut first_bytes = Vec::default();
        let mut second_bytes = Vec::default();
        first.write_dimacs(&mut first_bytes, true).unwrap();
        second.write_dimacs(&mut second_bytes, true).unwrap();
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn initial_state_is_forced() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let map = encoding.map();

        let model = model_of(&encoding);
        assert!(model.is_true(map.fact("at(ball,A)", 0).unwrap()));
        assert!(model.is_true(map.fact("at-robot(A)", 0).unwrap()));
        assert!(model.is_true(map.fact("free-hand", 0).unwrap()));
        assert!(!model.is_true(map.fact("holding(ball)", 0).unwrap()));

        let cnf = with_units(&encoding, &[map.fact("holding(ball)", 0).unwrap()]);
        assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));
    }

    #[test]
    fn robot_in_two_rooms_is_rejected() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let map = encoding.map();

        let in_a = map.fact("at-robot(A)", 2).unwrap();
        let in_b = map.fact("at-robot(B)", 2).unwrap();

        let mut forged = model_of(&encoding);
        forged.set(in_a, true);
        forged.set(in_b, true);

        let unsatisfied = forged.unsatisfied(encoding.cnf()).collect::<Vec<_>>();
        assert!(unsatisfied.contains(&&vec![-(in_a as Literal), -(in_b as Literal)]));

        let cnf = with_units(&encoding, &[in_a, in_b]);
        assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));
    }

    #[test]
    fn one_action_per_timestep() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let map = encoding.map();

        let pick_up = map.action("pick-up(ball,A)", 0).unwrap();
        let move_a_b = map.action("move(A,B)", 0).unwrap();

        let cnf = with_units(&encoding, &[pick_up, move_a_b]);
        assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));

        let mut forged = model_of(&encoding);
        for id in map.action_ids_at(0).unwrap() {
            forged.set(*id, false);
        }
        forged.set(pick_up, true);
        forged.set(move_a_b, true);
        assert_eq!(
            decode(&forged, map),
            Err(ErrorKind::InconsistentModel(
                err::InconsistentModelError::ConcurrentActions {
                    timestep: 0,
                    actions: vec!["pick-up(ball,A)".to_string(), "move(A,B)".to_string()]
                }
            ))
        );
    }

    #[test]
    fn actions_require_preconditions() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let map = encoding.map();

        // The robot starts in A, so cannot move from B.
        let cnf = with_units(&encoding, &[map.action("move(B,A)", 0).unwrap()]);
        assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));
    }

    #[test]
    fn facts_persist_without_actions() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let map = encoding.map();

        // With no pick-up at 0, the ball is still in A at 1.
        let mut cnf = encoding.cnf().clone();
        cnf.add_clause(vec![-(map.action("pick-up(ball,A)", 0).unwrap() as Literal)]);
        cnf.add_clause(vec![-(map.fact("at(ball,A)", 1).unwrap() as Literal)]);
        assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));
    }

    #[test]
    fn no_idle_timestep_before_an_action() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let map = encoding.map();

        // Idle at 0, so nothing at 1 either.
        let mut cnf = encoding.cnf().clone();
        for id in map.action_ids_at(0).unwrap() {
            cnf.add_clause(vec![-(*id as Literal)]);
        }
        cnf.add_clause(vec![map.action("pick-up(ball,A)", 1).unwrap() as Literal]);
        assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));
    }

    #[test]
    fn no_action_once_the_goal_holds() {
        let (domain, problem) = transfer();
        let encoding = Encoding::new(&domain, &problem, 4).unwrap();
        let map = encoding.map();

        // The goal holds at 3, after pick-up, move, and drop, so the robot cannot move back.
        let cnf = with_units(&encoding, &[map.action("move(B,A)", 3).unwrap()]);
        assert_eq!(Otter::default().solve(&cnf), Ok(SolveReport::Unsatisfiable));
    }

    #[test]
    fn problem_for_another_domain() {
        let (_, problem) = transfer();
        let three_rooms = Gripper::new(["A", "B", "C"], ["ball"]).domain().unwrap();

        assert_eq!(
            Encoding::new(&three_rooms, &problem, 4).err(),
            Some(ErrorKind::Domain(err::DomainError::ProblemMismatch {
                problem_facts: 6,
                domain_facts: three_rooms.fact_count(),
            }))
        );
    }

    #[test]
    fn undeclared_fact() {
        let mut spec = Gripper::two_rooms().domain_spec();
        spec.actions.push(ActionSpec {
            name: "jump".to_string(),
            parameters: vec!["A".to_string()],
            preconditions: vec!["at-robot(A)".to_string()],
            add: vec!["airborne".to_string()],
            delete: vec![],
        });

        assert_eq!(
            spec.build().err(),
            Some(ErrorKind::Domain(err::DomainError::UndeclaredFact {
                action: "jump(A)".to_string(),
                fact: "airborne".to_string()
            }))
        );
    }

    #[test]
    fn zero_horizon() {
        let (domain, problem) = transfer();
        assert_eq!(
            Encoding::new(&domain, &problem, 0).err(),
            Some(ErrorKind::Allocation(err::AllocationError::ZeroHorizon))
        );
    }
}
