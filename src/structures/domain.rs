//! Domains, aka. the facts which describe a world, how those facts are grouped, and the actions which change them.
//!
//! A domain is given as data through a [DomainSpec], which is validated into a [Domain].
//! Validation resolves every fact name to a [FactId], and fails fast with a [DomainError](err::DomainError) on any dangling reference.
//!
//! ```rust
//! # use satplan::structures::domain::{ActionSpec, DomainSpec};
//! let spec = DomainSpec {
//!     facts: vec!["light_on".to_string(), "light_off".to_string()],
//!     partitions: vec![vec!["light_on".to_string(), "light_off".to_string()]],
//!     actions: vec![ActionSpec {
//!         name: "switch".to_string(),
//!         parameters: vec!["on".to_string()],
//!         preconditions: vec!["light_off".to_string()],
//!         add: vec!["light_on".to_string()],
//!         delete: vec!["light_off".to_string()],
//!     }],
//! };
//!
//! let domain = spec.build().unwrap();
//! assert_eq!(domain.fact_count(), 2);
//! assert_eq!(domain.action(domain.action_id("switch(on)").unwrap()).name, "switch");
//! ```
//!
//! # Effects
//!
//! If an action both adds and deletes a fact, the add effect is kept and the delete effect dropped.
//! Otherwise the action could never be applied, as the fact would be required both true and false after the action.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::err::{self, ErrorKind};

/// The index of a fact within a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactId(pub(crate) usize);

impl FactId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The index of a (grounded) action within a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub(crate) usize);

impl ActionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A grounded action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub parameters: Vec<String>,
    pub preconditions: Vec<FactId>,
    pub add: Vec<FactId>,
    pub delete: Vec<FactId>,
}

impl Action {
    /// The name of the action applied to its parameters, e.g. `move(A,B)`.
    pub fn identifier(&self) -> String {
        identifier(&self.name, &self.parameters)
    }
}

/// The identifier of an action with the given name and parameters.
pub fn identifier(name: &str, parameters: &[String]) -> String {
    format!("{name}({})", parameters.join(","))
}

/// The name and parameters of an identifier.
///
/// An identifier without a parenthesised parameter list is read as a name without parameters.
pub fn split_identifier(identifier: &str) -> (String, Vec<String>) {
    let parts = identifier
        .strip_suffix(')')
        .and_then(|prefix| prefix.split_once('('));

    match parts {
        Some((name, parameters)) => (
            name.to_string(),
            parameters
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        None => (identifier.to_string(), Vec::default()),
    }
}

/// Whether a name, or parameter, of an action reads back unchanged from an identifier or the text form of a plan.
fn is_well_formed(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ','))
}

/// Descriptor of a grounded action, with facts referred to by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub preconditions: Vec<String>,
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub delete: Vec<String>,
}

/// Descriptor of a domain, with facts referred to by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSpec {
    pub facts: Vec<String>,

    /// Groups of facts of which exactly one is true at every timestep.
    #[serde(default)]
    pub partitions: Vec<Vec<String>>,

    pub actions: Vec<ActionSpec>,
}

impl DomainSpec {
    /// Validates the descriptor into a domain.
    pub fn build(self) -> Result<Domain, ErrorKind> {
        Domain::from_spec(self)
    }
}

/// A validated domain.
#[derive(Clone, Debug)]
pub struct Domain {
    facts: Vec<String>,
    fact_index: HashMap<String, FactId>,
    partitions: Vec<Vec<FactId>>,
    actions: Vec<Action>,
    action_index: HashMap<String, ActionId>,
}

impl Domain {
    pub fn from_spec(spec: DomainSpec) -> Result<Self, ErrorKind> {
        let mut fact_index = HashMap::with_capacity(spec.facts.len());
        for (index, name) in spec.facts.iter().enumerate() {
            if fact_index.insert(name.clone(), FactId(index)).is_some() {
                return Err(err::DomainError::DuplicateFact(name.clone()).into());
            }
        }

        let mut partitions = Vec::with_capacity(spec.partitions.len());
        for (group, members) in spec.partitions.iter().enumerate() {
            if members.is_empty() {
                return Err(err::DomainError::EmptyPartition(group).into());
            }
            let mut ids: Vec<FactId> = Vec::with_capacity(members.len());
            for name in members {
                let Some(&id) = fact_index.get(name) else {
                    return Err(err::DomainError::UnknownFact(name.clone()).into());
                };
                if ids.contains(&id) {
                    return Err(err::DomainError::RepeatedPartitionMember {
                        group,
                        fact: name.clone(),
                    }
                    .into());
                }
                ids.push(id);
            }
            partitions.push(ids);
        }

        let mut actions = Vec::with_capacity(spec.actions.len());
        let mut action_index = HashMap::with_capacity(spec.actions.len());
        for action_spec in spec.actions {
            if let Some(malformed) = std::iter::once(&action_spec.name)
                .chain(&action_spec.parameters)
                .find(|name| !is_well_formed(name))
            {
                return Err(err::DomainError::MalformedName(malformed.clone()).into());
            }

            let action_identifier = identifier(&action_spec.name, &action_spec.parameters);

            let resolve = |names: &[String]| -> Result<Vec<FactId>, ErrorKind> {
                let mut ids = Vec::with_capacity(names.len());
                for name in names {
                    match fact_index.get(name) {
                        Some(id) if ids.contains(id) => {}
                        Some(id) => ids.push(*id),
                        None => {
                            return Err(err::DomainError::UndeclaredFact {
                                action: action_identifier.clone(),
                                fact: name.clone(),
                            }
                            .into())
                        }
                    }
                }
                Ok(ids)
            };

            let preconditions = resolve(&action_spec.preconditions)?;
            let add = resolve(&action_spec.add)?;
            let mut delete = resolve(&action_spec.delete)?;
            delete.retain(|fact| !add.contains(fact));

            let id = ActionId(actions.len());
            if action_index.insert(action_identifier.clone(), id).is_some() {
                return Err(err::DomainError::DuplicateAction(action_identifier).into());
            }

            actions.push(Action {
                name: action_spec.name,
                parameters: action_spec.parameters,
                preconditions,
                add,
                delete,
            });
        }

        Ok(Domain {
            facts: spec.facts,
            fact_index,
            partitions,
            actions,
            action_index,
        })
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// The names of all facts, in declaration order.
    pub fn fact_names(&self) -> &[String] {
        &self.facts
    }

    /// The identifiers of all actions, in declaration order.
    pub fn action_identifiers(&self) -> Vec<String> {
        self.actions.iter().map(Action::identifier).collect()
    }

    pub fn fact_ids(&self) -> impl Iterator<Item = FactId> {
        (0..self.facts.len()).map(FactId)
    }

    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> {
        (0..self.actions.len()).map(ActionId)
    }

    pub fn fact(&self, name: &str) -> Option<FactId> {
        self.fact_index.get(name).copied()
    }

    pub fn fact_name(&self, fact: FactId) -> &str {
        &self.facts[fact.0]
    }

    pub fn action_id(&self, identifier: &str) -> Option<ActionId> {
        self.action_index.get(identifier).copied()
    }

    pub fn action(&self, action: ActionId) -> &Action {
        &self.actions[action.0]
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions
            .iter()
            .enumerate()
            .map(|(index, action)| (ActionId(index), action))
    }

    pub fn partitions(&self) -> &[Vec<FactId>] {
        &self.partitions
    }
}
