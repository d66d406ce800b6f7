//! Key structures, such as domains, keys, clauses, and plans.
//!
//! # Domains and problems
//!
//! A [domain](domain) is a set of facts, a set of groups of facts of which exactly one is true at any time, and a set of grounded actions.
//! A [problem](problem) fixes the value of every fact at the first timestep, and requires some facts to be true at the last.
//!
//! Both are data, and the library makes no assumption about the world they describe.
//!
//! # Formulas
//!
//! A formula is a [set of clauses](clause::Cnf), each over literals whose variables are addressed by [keys](key).
//! An [assignment](assignment) values those variables, and a [plan](plan) is read from an assignment which satisfies the formula.

pub mod assignment;
pub mod clause;
pub mod domain;
pub mod key;
pub mod plan;
pub mod problem;
