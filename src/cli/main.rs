use commands::exit_code;

mod commands;
mod config;
mod parse;

fn main() {
    env_logger::init();

    let matches = parse::cli().get_matches();

    let result = match matches.subcommand() {
        Some(("encode", args)) => commands::encode(args),
        Some(("decode", args)) => commands::decode_model(args),
        Some(("plan", args)) => commands::plan(args),
        Some(("validate", args)) => commands::validate_plan(args),
        _ => {
            println!("c A subcommand is required");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        println!("c Error: {e}");
        std::process::exit(exit_code(&e));
    }
}
