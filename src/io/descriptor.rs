//! Domain and problem descriptors, as JSON.
//!
//! A domain descriptor lists facts, partition groups, and grounded actions with their preconditions and effects:
//!
//! ```json
//! {
//!   "facts": ["on", "off"],
//!   "partitions": [["on", "off"]],
//!   "actions": [
//!     { "name": "switch", "parameters": ["up"], "preconditions": ["off"], "add": ["on"], "delete": ["off"] }
//!   ]
//! }
//! ```
//!
//! A problem descriptor lists the facts true initially and the goal facts:
//!
//! ```json
//! { "initial": ["off"], "goal": ["on"] }
//! ```

use std::io::Read;

use serde::de::DeserializeOwned;

use crate::{
    structures::{
        domain::{Domain, DomainSpec},
        problem::{Problem, ProblemSpec},
    },
    types::err::{self, ErrorKind},
};

fn read_json<T: DeserializeOwned>(reader: impl Read) -> Result<T, ErrorKind> {
    serde_json::from_reader(reader)
        .map_err(|e| ErrorKind::from(err::ParseError::Descriptor(e.to_string())))
}

pub fn read_domain(reader: impl Read) -> Result<Domain, ErrorKind> {
    read_json::<DomainSpec>(reader)?.build()
}

pub fn read_problem(reader: impl Read, domain: &Domain) -> Result<Problem, ErrorKind> {
    Problem::from_spec(domain, &read_json::<ProblemSpec>(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = r#"{
        "facts": ["on", "off"],
        "partitions": [["on", "off"]],
        "actions": [
            { "name": "switch", "parameters": ["up"], "preconditions": ["off"], "add": ["on"], "delete": ["off"] }
        ]
    }"#;

    #[test]
    fn descriptors() {
        let domain = read_domain(DOMAIN.as_bytes()).unwrap();
        assert_eq!(domain.action_identifiers(), ["switch(up)"]);

        let problem = read_problem(r#"{ "initial": ["off"], "goal": ["on"] }"#.as_bytes(), &domain).unwrap();
        assert_eq!(problem.goal(), [domain.fact("on").unwrap()]);
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            read_domain(r#"{ "facts": ["on"] }"#.as_bytes()),
            Err(ErrorKind::Parse(err::ParseError::Descriptor(_)))
        ));

        let domain = read_domain(DOMAIN.as_bytes()).unwrap();
        assert_eq!(
            read_problem(r#"{ "initial": ["on", "off"], "goal": [] }"#.as_bytes(), &domain).err(),
            Some(ErrorKind::Domain(err::DomainError::InitialStateViolatesPartition { group: 0 }))
        );
    }
}
