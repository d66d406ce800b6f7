use clap::ArgMatches;

use satplan::config::{Config, ConfigOption, PolarityLean};

/// Sets an option from a value given on the command line, or exits if the value is out of bounds.
fn set_or_exit<T: Copy + PartialOrd + std::fmt::Display>(option: &mut ConfigOption<T>, value: T) {
    let (min, max) = option.min_max();
    match option.set(value) {
        Ok(()) => println!("c {} set to: {value}", option.name),
        Err(_) => {
            println!("c {} requires a value between {min} and {max}", option.name);
            std::process::exit(1);
        }
    }
}

pub fn config_from_args(args: &ArgMatches) -> Config {
    let mut the_config = Config::default();

    if let Ok(Some(lean)) = args.try_get_one::<PolarityLean>("polarity_lean") {
        set_or_exit(&mut the_config.polarity_lean, *lean);
    };

    if let Ok(Some(seed)) = args.try_get_one::<u64>("random_seed") {
        set_or_exit(&mut the_config.random_seed, *seed);
    };

    if let Ok(Some(secs)) = args.try_get_one::<u64>("time_limit") {
        the_config.time_limit.value = std::time::Duration::from_secs(*secs);
    };

    if let Ok(Some(horizon)) = args.try_get_one::<usize>("max_horizon") {
        set_or_exit(&mut the_config.max_horizon, *horizon);
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_comments") {
        the_config.dimacs_comments.value = false;
    };

    the_config
}
