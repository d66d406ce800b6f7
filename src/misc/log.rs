/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, to trace how a domain becomes a formula and how a model becomes a plan.

Note, the library provides no log implementation.
The CLI installs [env_logger](https://docs.rs/env_logger/latest/env_logger/), so output can be narrowed with e.g. `RUST_LOG=encoding=info`.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [variable map](crate::db::variable_map)
    pub const ALLOCATION: &str = "allocation";

    /// Logs related to [clause emission](crate::procedures::encode)
    pub const ENCODING: &str = "encoding";

    /// Logs related to reading and writing [DIMACS](crate::io::dimacs)
    pub const DIMACS: &str = "dimacs";

    /// Logs related to [decoding](crate::procedures::decode) a model
    pub const DECODING: &str = "decoding";

    /// Logs related to a [solver](crate::solver)
    pub const SOLVER: &str = "solver";

    /// Logs related to a [horizon search](crate::planner::Planner::search)
    pub const SEARCH: &str = "search";

    /// Logs related to [plan validation](crate::procedures::validate)
    pub const VALIDATION: &str = "validation";
}
