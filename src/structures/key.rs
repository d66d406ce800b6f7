//! Keys, the sole addressing scheme into the variable space of an encoding.
//!
//! A key pairs a fact or an action with a timestep.
//! Facts are keyed at every timestep from 0 to the horizon, actions from 0 to one less than the horizon.

use crate::structures::domain::{ActionId, FactId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariableKey {
    /// The fact holds at the timestep.
    Fact { fact: FactId, timestep: usize },

    /// The action executes between the timestep and the next.
    Action { action: ActionId, timestep: usize },
}

impl VariableKey {
    pub fn fact(fact: FactId, timestep: usize) -> Self {
        VariableKey::Fact { fact, timestep }
    }

    pub fn action(action: ActionId, timestep: usize) -> Self {
        VariableKey::Action { action, timestep }
    }
}

impl std::fmt::Display for VariableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fact { fact, timestep } => write!(f, "fact {}@{timestep}", fact.index()),
            Self::Action { action, timestep } => write!(f, "action {}@{timestep}", action.index()),
        }
    }
}
