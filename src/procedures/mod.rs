//! Procedures over a domain, a problem, and the variables of an encoding.
//!
//! - [encode] emits the clauses of a problem to some horizon.
//! - [decode] reads a plan, and the states it passes through, from a model.
//! - [validate] checks a plan by simulation, without reference to any formula.
//!
//! Each procedure is a pure function of its inputs, aside from logging.

pub mod decode;
pub mod encode;
pub mod validate;
