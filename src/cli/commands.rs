use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use clap::ArgMatches;

use satplan::{
    db::variable_map::VariableMap,
    gripper::Gripper,
    io::{descriptor, map, solution},
    planner::{Encoding, Outcome, Planner, SearchReport},
    procedures::{decode, validate},
    solver::{External, Otter, SolveReport, Solver},
    structures::{assignment::Assignment, domain::Domain, plan::Plan, problem::Problem},
    types::err::ErrorKind,
};

use crate::config::config_from_args;

fn open(path: &Path) -> Result<BufReader<File>, ErrorKind> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| ErrorKind::Io(format!("{}: {e}", path.display())))
}

fn create(path: &Path) -> Result<File, ErrorKind> {
    File::create(path).map_err(|e| ErrorKind::Io(format!("{}: {e}", path.display())))
}

/// The domain and problem given by descriptor files, or else a gripper transfer problem.
fn load_instance(args: &ArgMatches) -> Result<(Domain, Problem), ErrorKind> {
    match (
        args.get_one::<PathBuf>("domain"),
        args.get_one::<PathBuf>("problem"),
    ) {
        (Some(domain_path), Some(problem_path)) => {
            println!("c Reading domain from {domain_path:?}");
            let domain = descriptor::read_domain(open(domain_path)?)?;
            println!("c Reading problem from {problem_path:?}");
            let problem = descriptor::read_problem(open(problem_path)?, &domain)?;
            Ok((domain, problem))
        }

        _ => {
            let names = |id: &str| -> Vec<String> {
                args.get_many::<String>(id)
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default()
            };
            let gripper = Gripper::new(names("rooms"), names("balls"));
            println!(
                "c Gripper with rooms {:?} and balls {:?}",
                gripper.rooms(),
                gripper.balls()
            );
            let domain = gripper.domain()?;
            let problem = Problem::from_spec(&domain, &gripper.transfer_problem())?;
            Ok((domain, problem))
        }
    }
}

fn print_plan(plan: &Plan) {
    for step in plan.steps() {
        println!("{step}");
    }
    println!("c {} steps, makespan {}", plan.len(), plan.makespan());
}

fn print_trace(model: &Assignment, map: &VariableMap) -> Result<(), ErrorKind> {
    for (timestep, state) in decode::trace(model, map)?.iter().enumerate() {
        println!("c {timestep}: {}", state.iter().copied().collect::<Vec<_>>().join(" "));
    }
    Ok(())
}

fn write_plan(args: &ArgMatches, plan: &Plan, horizon: usize) -> Result<(), ErrorKind> {
    if let Some(path) = args.get_one::<PathBuf>("plan_out") {
        let mut file = create(path)?;
        writeln!(file, "; horizon {horizon}")?;
        write!(file, "{plan}")?;
        println!("c Plan written to {path:?}");
    }
    Ok(())
}

pub fn encode(args: &ArgMatches) -> Result<(), ErrorKind> {
    let config = config_from_args(args);
    let (domain, problem) = load_instance(args)?;

    let horizon = args.get_one::<usize>("horizon").copied().unwrap_or(1);
    let encoding = Encoding::new(&domain, &problem, horizon)?;
    println!("c {}", encoding.stats());

    if let Some(path) = args.get_one::<PathBuf>("cnf") {
        encoding.write_dimacs(&mut create(path)?, config.dimacs_comments.value)?;
        println!("c Formula written to {path:?}");
    }

    if let Some(path) = args.get_one::<PathBuf>("map") {
        encoding.write_map(create(path)?)?;
        println!("c Variable map written to {path:?}");
    }

    Ok(())
}

pub fn decode_model(args: &ArgMatches) -> Result<(), ErrorKind> {
    let Some(map_path) = args.get_one::<PathBuf>("map") else {
        return Err(ErrorKind::Io("a variable map is required".to_string()));
    };
    let Some(model_path) = args.get_one::<PathBuf>("model") else {
        return Err(ErrorKind::Io("solver output is required".to_string()));
    };

    let map = map::read_map(open(map_path)?)?;
    let report = solution::read_solution(open(model_path)?)?;
    println!("s {report}");

    if let SolveReport::Satisfiable(model) = report {
        let plan = decode::decode(&model, &map)?;
        print_plan(&plan);
        if args.get_flag("trace") {
            print_trace(&model, &map)?;
        }
        write_plan(args, &plan, map.horizon())?;
    }

    Ok(())
}

/// Solves with a solver from the factory, for a single horizon or by search.
fn run_plan<S: Solver>(
    planner: &Planner,
    args: &ArgMatches,
    make_solver: impl Fn() -> S + Sync,
) -> Result<(), ErrorKind> {
    let report = match args.get_one::<usize>("horizon") {
        Some(&horizon) => match planner.plan_at(horizon, &mut make_solver())? {
            Outcome::Satisfiable { plan, model } => SearchReport::Found {
                horizon,
                plan,
                model,
            },
            Outcome::Unsatisfiable => SearchReport::Exhausted {
                max_horizon: horizon,
            },
        },

        None => match args.get_flag("parallel") {
            true => planner.search_parallel(make_solver)?,
            false => planner.search(&mut make_solver())?,
        },
    };

    match report {
        SearchReport::Found {
            horizon,
            plan,
            model,
        } => {
            println!("s SATISFIABLE");
            println!("c horizon {horizon}");
            print_plan(&plan);
            if args.get_flag("trace") {
                print_trace(&model, planner.encode(horizon)?.map())?;
            }
            write_plan(args, &plan, horizon)?;
        }

        SearchReport::Exhausted { max_horizon } => {
            println!("s UNSATISFIABLE");
            println!("c No plan within horizon {max_horizon}");
        }
    }

    Ok(())
}

pub fn plan(args: &ArgMatches) -> Result<(), ErrorKind> {
    let config = config_from_args(args);
    let (domain, problem) = load_instance(args)?;
    let planner = Planner::new(&domain, &problem, config.clone());

    match args.get_one::<PathBuf>("external") {
        Some(program) => {
            let external_args = args
                .get_many::<String>("external_args")
                .map(|values| values.cloned().collect::<Vec<_>>())
                .unwrap_or_default();
            let solver = External::new(program)
                .with_args(external_args)
                .with_time_limit(config.time_limit());
            run_plan(&planner, args, || solver.clone())
        }

        None => run_plan(&planner, args, || Otter::from_config(&config)),
    }
}

pub fn validate_plan(args: &ArgMatches) -> Result<(), ErrorKind> {
    let (domain, problem) = load_instance(args)?;

    let Some(plan_path) = args.get_one::<PathBuf>("plan") else {
        return Err(ErrorKind::Io("a plan is required".to_string()));
    };
    let text = std::fs::read_to_string(plan_path)
        .map_err(|e| ErrorKind::Io(format!("{}: {e}", plan_path.display())))?;
    let plan = text.parse::<Plan>()?;

    validate::validate(&domain, &problem, &plan, None)?;
    println!("c Plan of {} steps is valid", plan.len());
    Ok(())
}

/// The exit code for an error: 2 for a failure of a solver, and 1 otherwise.
pub fn exit_code(error: &ErrorKind) -> i32 {
    match error {
        ErrorKind::Solver(_) => 2,
        _ => 1,
    }
}
