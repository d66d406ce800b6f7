use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

fn problem_args(command: Command) -> Command {
    command
        .arg(Arg::new("domain")
            .long("domain")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .requires("problem")
            .num_args(1)
            .help("A domain descriptor, as JSON.
Default: the gripper domain, over --rooms and --balls"))

        .arg(Arg::new("problem")
            .long("problem")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .requires("domain")
            .num_args(1)
            .help("A problem descriptor, as JSON.
Default: move every ball from the first room to the last room"))

        .arg(Arg::new("rooms")
            .long("rooms")
            .value_name("ROOMS")
            .value_delimiter(',')
            .default_value("A,B")
            .conflicts_with("domain")
            .help("Rooms of the gripper domain, comma separated."))

        .arg(Arg::new("balls")
            .long("balls")
            .value_name("BALLS")
            .value_delimiter(',')
            .default_value("ball")
            .conflicts_with("domain")
            .help("Balls of the gripper domain, comma separated."))
}

fn solver_args(command: Command) -> Command {
    command
        .arg(Arg::new("polarity_lean")
            .long("polarity-lean")
            .value_name("LEAN")
            .value_parser(value_parser!(f64))
            .num_args(1)
            .help("The chance of valuing a variable true when the otter_sat solver makes a decision.
Default: 0"))

        .arg(Arg::new("random_seed")
            .long("seed")
            .value_name("SEED")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help("Seed for the otter_sat solver.
Default: 0"))

        .arg(Arg::new("time_limit")
            .long("time-limit")
            .short('t')
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help("Time limit for each solve in seconds.
Default: No limit"))

        .arg(Arg::new("external")
            .long("external")
            .value_name("SOLVER")
            .value_parser(value_parser!(PathBuf))
            .num_args(1)
            .help("Run an external solver which reads DIMACS from standard input and writes a result in the competition format, e.g. kissat."))

        .arg(Arg::new("external_args")
            .long("external-arg")
            .value_name("ARG")
            .allow_hyphen_values(true)
            .action(ArgAction::Append)
            .requires("external")
            .help("An argument passed to the external solver, may be repeated."))
}

pub fn cli() -> Command {
    Command::new("satplan")
        .about("Plans by satisfiability: encodes a planning problem to CNF, and decodes models into plans")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)

        .subcommand(problem_args(Command::new("encode")
            .about("Writes the formula of a horizon as DIMACS, with the variable map alongside.")
            .arg(Arg::new("horizon")
                .long("horizon")
                .short('H')
                .value_parser(value_parser!(usize))
                .required(true)
                .num_args(1)
                .help("The number of transitions encoded."))
            .arg(Arg::new("cnf")
                .long("cnf")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .num_args(1)
                .help("Where to write the formula."))
            .arg(Arg::new("map")
                .long("map")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .num_args(1)
                .help("Where to write the variable map, as JSON."))
            .arg(Arg::new("no_comments")
                .long("no-comments")
                .action(ArgAction::SetTrue)
                .help("Omit the legend of variables from the DIMACS comments."))))

        .subcommand(Command::new("decode")
            .about("Decodes the output of a solver into a plan, given the variable map written by encode.")
            .arg(Arg::new("map")
                .long("map")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .num_args(1)
                .help("The variable map of the formula."))
            .arg(Arg::new("model")
                .long("model")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .num_args(1)
                .help("The output of a solver, in the competition or MiniSat format."))
            .arg(Arg::new("trace")
                .long("trace")
                .action(ArgAction::SetTrue)
                .help("Print the facts true at each timestep."))
            .arg(Arg::new("plan_out")
                .long("plan-out")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .num_args(1)
                .help("Where to write the plan.")))

        .subcommand(solver_args(problem_args(Command::new("plan")
            .about("Searches for a plan at increasing horizons.")
            .arg(Arg::new("horizon")
                .long("horizon")
                .short('H')
                .value_parser(value_parser!(usize))
                .conflicts_with("max_horizon")
                .num_args(1)
                .help("Solve a single horizon, rather than search."))
            .arg(Arg::new("max_horizon")
                .long("max-horizon")
                .value_parser(value_parser!(usize))
                .num_args(1)
                .help("The largest horizon searched.
Default: 8"))
            .arg(Arg::new("parallel")
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("Solve every horizon of the search at once."))
            .arg(Arg::new("trace")
                .long("trace")
                .action(ArgAction::SetTrue)
                .help("Print the facts true at each timestep."))
            .arg(Arg::new("plan_out")
                .long("plan-out")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .num_args(1)
                .help("Where to write the plan.")))))

        .subcommand(problem_args(Command::new("validate")
            .about("Validates a plan by simulation.")
            .arg(Arg::new("plan")
                .long("plan")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .num_args(1)
                .help("The plan, one step per line."))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }
}
