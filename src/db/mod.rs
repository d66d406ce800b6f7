//! Databases built once from a domain and read throughout an encoding.
//!
//! - The [variable map](variable_map) holds the bijection between keys and variable ids.
//! - The [affects index](affects) holds, for each fact, the actions which change the value of the fact.
//!
//! Neither is mutated after construction, and so several encodings may be built at once, each with its own databases.

pub mod affects;
pub mod variable_map;
