//! Error types used in the library.
//!
//! - Domain errors are raised while validating a domain or problem, before any variable is allocated.
//! - Lookup errors (`KeyNotFound`, `UnknownVariable`) point to a mismatch between an encoding and the map it is read against.
//! - An inconsistent model is a model which breaks a guarantee of the encoding, e.g. two actions at the same timestep.
//!   This follows from a broken formula or a tampered assignment, and is never recovered from.
//! - Solver errors are failures of the solver, as opposed to the solver reporting the formula is unsatisfiable.
//!
//! Unsatisfiability is not an error.
//! It is a [report](crate::solver::SolveReport) of the solver, and an [outcome](crate::planner::Outcome) of planning at a horizon.
//!
//! Names of the error enums overlap with the structures they relate to.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::key::VariableKey;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Allocation(AllocationError),
    Domain(DomainError),
    InconsistentModel(InconsistentModelError),
    Parse(ParseError),
    Plan(PlanError),
    Solver(SolverError),

    /// A lookup of a key which was never declared.
    KeyNotFound(VariableKey),

    /// A lookup of a variable id outside the allocated range.
    UnknownVariable(u32),

    /// Some failure to read or write an external resource.
    Io(String),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allocation(e) => write!(f, "allocation error: {e}"),
            Self::Domain(e) => write!(f, "domain error: {e}"),
            Self::InconsistentModel(e) => write!(f, "inconsistent model: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Plan(e) => write!(f, "invalid plan: {e}"),
            Self::Solver(e) => write!(f, "solver failure: {e}"),
            Self::KeyNotFound(key) => write!(f, "no variable declared for {key}"),
            Self::UnknownVariable(id) => write!(f, "no key allocated for variable {id}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e.to_string())
    }
}

/// Errors while declaring variables.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AllocationError {
    /// A horizon of zero was requested, though every encoding requires at least one transition.
    ZeroHorizon,

    /// A declaration requested a horizon other than the horizon of earlier declarations.
    HorizonConflict { declared: usize, requested: usize },

    /// All ids representable as a DIMACS literal have been used.
    ExhaustedIds,
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroHorizon => write!(f, "the horizon must be at least one"),
            Self::HorizonConflict {
                declared,
                requested,
            } => write!(
                f,
                "declaration with horizon {requested} conflicts with the declared horizon {declared}"
            ),
            Self::ExhaustedIds => write!(f, "variable ids exhausted"),
        }
    }
}

impl From<AllocationError> for ErrorKind {
    fn from(e: AllocationError) -> Self {
        ErrorKind::Allocation(e)
    }
}

/// Noted issues with a domain or problem descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DomainError {
    /// An action refers to a fact which was never declared.
    UndeclaredFact { action: String, fact: String },

    /// A partition group, initial state, or goal refers to a fact which was never declared.
    UnknownFact(String),

    /// A plan or lookup refers to an action which was never declared.
    UnknownAction(String),

    /// A fact was declared twice.
    DuplicateFact(String),

    /// An action (with the same parameters) was declared twice.
    DuplicateAction(String),

    /// A partition group without members, which can never hold exactly one true fact.
    EmptyPartition(usize),

    /// A fact appears twice in the same partition group.
    RepeatedPartitionMember { group: usize, fact: String },

    /// The initial state does not have exactly one true fact in some partition group.
    InitialStateViolatesPartition { group: usize },

    /// A problem refers to more facts than the domain it is used with, or fewer.
    ProblemMismatch { problem_facts: usize, domain_facts: usize },

    /// An action name or parameter which could not be read back from the text form of a plan.
    MalformedName(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndeclaredFact { action, fact } => {
                write!(f, "action {action} refers to undeclared fact {fact}")
            }
            Self::UnknownFact(fact) => write!(f, "unknown fact {fact}"),
            Self::UnknownAction(action) => write!(f, "unknown action {action}"),
            Self::DuplicateFact(fact) => write!(f, "fact {fact} declared twice"),
            Self::DuplicateAction(action) => write!(f, "action {action} declared twice"),
            Self::EmptyPartition(group) => write!(f, "partition group {group} is empty"),
            Self::RepeatedPartitionMember { group, fact } => {
                write!(f, "fact {fact} repeated in partition group {group}")
            }
            Self::InitialStateViolatesPartition { group } => write!(
                f,
                "initial state does not make exactly one fact of partition group {group} true"
            ),
            Self::ProblemMismatch {
                problem_facts,
                domain_facts,
            } => write!(
                f,
                "problem over {problem_facts} facts used with a domain of {domain_facts} facts"
            ),
            Self::MalformedName(name) => {
                write!(f, "name {name:?} contains whitespace, a parenthesis, or a comma")
            }
        }
    }
}

impl From<DomainError> for ErrorKind {
    fn from(e: DomainError) -> Self {
        ErrorKind::Domain(e)
    }
}

/// A model which breaks a guarantee of the encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InconsistentModelError {
    /// More than one action is true at a single timestep.
    ConcurrentActions {
        timestep: usize,
        actions: Vec<String>,
    },
}

impl std::fmt::Display for InconsistentModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConcurrentActions { timestep, actions } => write!(
                f,
                "{} actions true at timestep {timestep}: {}",
                actions.len(),
                actions.join(", ")
            ),
        }
    }
}

impl From<InconsistentModelError> for ErrorKind {
    fn from(e: InconsistentModelError) -> Self {
        ErrorKind::InconsistentModel(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// A token which is not a literal, at some line.
    Literal(usize),

    /// A literal whose variable exceeds the variable count of the problem line, at some line.
    VariableBound(usize),

    /// The input ended inside a clause, i.e. without a terminating `0`.
    UnterminatedClause,

    /// Solver output without a status line, or with an unrecognised status.
    SolutionStatus,

    /// A domain or problem descriptor which is not valid JSON, or lacks some field.
    Descriptor(String),

    /// A line of a plan which is not of the form `t: (name params…)`.
    PlanLine(usize),

    /// A variable map written by an unsupported version.
    MapVersion(u32),

    /// A variable map which does not describe the variable space it claims to.
    MapSchema(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProblemSpecification => write!(f, "malformed problem line"),
            Self::Literal(line) => write!(f, "malformed literal on line {line}"),
            Self::VariableBound(line) => {
                write!(f, "literal on line {line} exceeds the declared variable count")
            }
            Self::UnterminatedClause => write!(f, "clause without terminating 0"),
            Self::SolutionStatus => write!(f, "missing or unrecognised status line"),
            Self::Descriptor(msg) => write!(f, "malformed descriptor: {msg}"),
            Self::PlanLine(line) => write!(f, "malformed plan step on line {line}"),
            Self::MapVersion(version) => write!(f, "unsupported variable map version {version}"),
            Self::MapSchema(msg) => write!(f, "variable map schema violation: {msg}"),
        }
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Reasons a plan fails validation against a domain and problem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlanError {
    /// A step names an action which is not part of the domain.
    UnknownAction { step: usize, action: String },

    /// A precondition of the action at some step does not hold.
    Precondition { step: usize, fact: String },

    /// Some goal literal does not hold after the final step.
    GoalUnmet { fact: String },

    /// Steps are not strictly increasing in timestep, or exceed the horizon.
    Timestep { step: usize },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction { step, action } => write!(f, "step {step}: unknown action {action}"),
            Self::Precondition { step, fact } => {
                write!(f, "step {step}: precondition {fact} does not hold")
            }
            Self::GoalUnmet { fact } => write!(f, "goal {fact} does not hold"),
            Self::Timestep { step } => write!(f, "step {step}: timestep out of order"),
        }
    }
}

impl From<PlanError> for ErrorKind {
    fn from(e: PlanError) -> Self {
        ErrorKind::Plan(e)
    }
}

/// Failures of a solver.
///
/// These are distinct from a report of unsatisfiability, and are never masked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolverError {
    /// The configured time limit passed before the solve completed.
    TimedOut,

    /// The solve was cancelled through a [CancelToken](crate::solver::CancelToken).
    Cancelled,

    /// The solver stopped unexpectedly, e.g. a worker thread panicked.
    Crashed(String),

    /// An external solver process could not be run, or exited without a result.
    Process(String),
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimedOut => write!(f, "time limit reached"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Crashed(msg) => write!(f, "crashed: {msg}"),
            Self::Process(msg) => write!(f, "process: {msg}"),
        }
    }
}

impl From<SolverError> for ErrorKind {
    fn from(e: SolverError) -> Self {
        ErrorKind::Solver(e)
    }
}
