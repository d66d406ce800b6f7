/*!
The bijection between keys and variable ids.

# Overview

Variables are declared through an [Allocator], and once all declarations are made the allocator is [finished](Allocator::finish) into a [VariableMap].
The map is read-only, and is shared by reference between clause emission, serialization, and decoding.

Ids are dense, start at 1, and are assigned in declaration order.
Within a declaration ids are assigned timestep by timestep, and within a timestep in the order of the declared names.
So, with facts `p`, `q` declared to horizon 1 and then action `a`:

```none
id  key
1   p@0
2   q@0
3   p@1
4   q@1
5   a@0
```

Repeated runs with identical declarations produce identical numbering.

# Arenas

Facts and actions are stored in two separate arenas, each a table of ids indexed by timestep and then by fact (or action).
A reverse table from id to key is built once, when the allocator is finished.

# Declarations

Declaring a name twice is a no-op.
All declarations share a horizon, and a declaration with some other horizon is an [error](err::AllocationError::HorizonConflict).
*/

use std::collections::HashMap;

use crate::{
    misc::log::targets::{self},
    structures::{
        clause::Literal,
        domain::{ActionId, Domain, FactId},
        key::VariableKey,
    },
    types::err::{self, ErrorKind},
};

/// Declares variables, and assigns each an id.
#[derive(Debug)]
pub struct Allocator {
    horizon: Option<usize>,
    next_id: u32,

    facts: Vec<String>,
    fact_index: HashMap<String, FactId>,
    /// Ids of fact variables, indexed by timestep and then by fact.
    fact_ids: Vec<Vec<u32>>,

    actions: Vec<String>,
    action_index: HashMap<String, ActionId>,
    /// Ids of action variables, indexed by timestep and then by action.
    action_ids: Vec<Vec<u32>>,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator {
    pub fn new() -> Self {
        Allocator {
            horizon: None,
            next_id: 1,
            facts: Vec::default(),
            fact_index: HashMap::default(),
            fact_ids: Vec::default(),
            actions: Vec::default(),
            action_index: HashMap::default(),
            action_ids: Vec::default(),
        }
    }

    /// Declares and finishes the variables of a domain to the given horizon.
    pub fn for_domain(domain: &Domain, horizon: usize) -> Result<VariableMap, ErrorKind> {
        let mut allocator = Allocator::new();
        allocator.declare_facts(domain.fact_names(), horizon)?;
        allocator.declare_actions(&domain.action_identifiers(), horizon)?;
        Ok(allocator.finish())
    }

    fn check_horizon(&mut self, horizon: usize) -> Result<(), ErrorKind> {
        if horizon == 0 {
            return Err(err::AllocationError::ZeroHorizon.into());
        }
        match self.horizon {
            Some(declared) if declared != horizon => Err(err::AllocationError::HorizonConflict {
                declared,
                requested: horizon,
            }
            .into()),
            _ => {
                self.horizon = Some(horizon);
                Ok(())
            }
        }
    }

    fn fresh_id(&mut self) -> Result<u32, ErrorKind> {
        if self.next_id > Literal::MAX as u32 {
            return Err(err::AllocationError::ExhaustedIds.into());
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }

    /// Declares each fact at every timestep from 0 to the horizon, inclusive.
    pub fn declare_facts(&mut self, names: &[String], horizon: usize) -> Result<(), ErrorKind> {
        self.check_horizon(horizon)?;

        let first_fresh = self.facts.len();
        for name in names {
            if !self.fact_index.contains_key(name) {
                self.fact_index.insert(name.clone(), FactId(self.facts.len()));
                self.facts.push(name.clone());
            }
        }
        let fresh = self.facts.len() - first_fresh;

        self.fact_ids.resize(horizon + 1, Vec::default());
        for timestep in 0..=horizon {
            for _ in 0..fresh {
                let id = self.fresh_id()?;
                self.fact_ids[timestep].push(id);
            }
        }

        log::debug!(target: targets::ALLOCATION, "Declared {fresh} facts to horizon {horizon}");
        Ok(())
    }

    /// Declares each action at every timestep from 0 to one less than the horizon.
    pub fn declare_actions(&mut self, names: &[String], horizon: usize) -> Result<(), ErrorKind> {
        self.check_horizon(horizon)?;

        let first_fresh = self.actions.len();
        for name in names {
            if !self.action_index.contains_key(name) {
                self.action_index
                    .insert(name.clone(), ActionId(self.actions.len()));
                self.actions.push(name.clone());
            }
        }
        let fresh = self.actions.len() - first_fresh;

        self.action_ids.resize(horizon, Vec::default());
        for timestep in 0..horizon {
            for _ in 0..fresh {
                let id = self.fresh_id()?;
                self.action_ids[timestep].push(id);
            }
        }

        log::debug!(target: targets::ALLOCATION, "Declared {fresh} actions to horizon {horizon}");
        Ok(())
    }

    /// Freezes the declarations into a map, building the reverse table from ids to keys.
    pub fn finish(self) -> VariableMap {
        let var_count = (self.next_id - 1) as usize;
        let placeholder = VariableKey::fact(FactId(0), 0);
        let mut keys = vec![placeholder; var_count];

        for (timestep, ids) in self.fact_ids.iter().enumerate() {
            for (index, id) in ids.iter().enumerate() {
                keys[(*id - 1) as usize] = VariableKey::fact(FactId(index), timestep);
            }
        }
        for (timestep, ids) in self.action_ids.iter().enumerate() {
            for (index, id) in ids.iter().enumerate() {
                keys[(*id - 1) as usize] = VariableKey::action(ActionId(index), timestep);
            }
        }

        log::info!(target: targets::ALLOCATION, "Allocated {var_count} variables");

        VariableMap {
            horizon: self.horizon.unwrap_or(0),
            facts: self.facts,
            fact_index: self.fact_index,
            fact_ids: self.fact_ids,
            actions: self.actions,
            action_index: self.action_index,
            action_ids: self.action_ids,
            keys,
        }
    }
}

/// The read-only bijection between keys and variable ids.
#[derive(Clone, Debug)]
pub struct VariableMap {
    horizon: usize,

    facts: Vec<String>,
    fact_index: HashMap<String, FactId>,
    fact_ids: Vec<Vec<u32>>,

    actions: Vec<String>,
    action_index: HashMap<String, ActionId>,
    action_ids: Vec<Vec<u32>>,

    /// Keys indexed by id, less one.
    keys: Vec<VariableKey>,
}

impl VariableMap {
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// The number of variables, which is also the largest id.
    pub fn var_count(&self) -> usize {
        self.keys.len()
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn fact_names(&self) -> &[String] {
        &self.facts
    }

    pub fn action_identifiers(&self) -> &[String] {
        &self.actions
    }

    pub fn fact_name(&self, fact: FactId) -> &str {
        &self.facts[fact.index()]
    }

    pub fn action_identifier(&self, action: ActionId) -> &str {
        &self.actions[action.index()]
    }

    pub fn fact_id(&self, name: &str) -> Option<FactId> {
        self.fact_index.get(name).copied()
    }

    pub fn action_id(&self, identifier: &str) -> Option<ActionId> {
        self.action_index.get(identifier).copied()
    }

    /// The id of a key.
    pub fn id_of(&self, key: &VariableKey) -> Result<u32, ErrorKind> {
        let found = match *key {
            VariableKey::Fact { fact, timestep } => self
                .fact_ids
                .get(timestep)
                .and_then(|ids| ids.get(fact.index())),
            VariableKey::Action { action, timestep } => self
                .action_ids
                .get(timestep)
                .and_then(|ids| ids.get(action.index())),
        };
        found.copied().ok_or(ErrorKind::KeyNotFound(*key))
    }

    /// The key of an id.
    pub fn key_of(&self, id: u32) -> Result<VariableKey, ErrorKind> {
        match id {
            0 => Err(ErrorKind::UnknownVariable(id)),
            _ => self
                .keys
                .get((id - 1) as usize)
                .copied()
                .ok_or(ErrorKind::UnknownVariable(id)),
        }
    }

    /// The literal of a key with the given polarity.
    pub fn literal(&self, key: VariableKey, polarity: bool) -> Result<Literal, ErrorKind> {
        let id = self.id_of(&key)? as Literal;
        match polarity {
            true => Ok(id),
            false => Ok(-id),
        }
    }

    /// The id of the named fact at a timestep.
    pub fn fact(&self, name: &str, timestep: usize) -> Result<u32, ErrorKind> {
        let Some(fact) = self.fact_id(name) else {
            return Err(err::DomainError::UnknownFact(name.to_string()).into());
        };
        self.id_of(&VariableKey::fact(fact, timestep))
    }

    /// The id of the identified action at a timestep.
    pub fn action(&self, identifier: &str, timestep: usize) -> Result<u32, ErrorKind> {
        let Some(action) = self.action_id(identifier) else {
            return Err(err::DomainError::UnknownAction(identifier.to_string()).into());
        };
        self.id_of(&VariableKey::action(action, timestep))
    }

    /// Ids of every fact at a timestep, in fact order.
    pub fn fact_ids_at(&self, timestep: usize) -> Option<&[u32]> {
        self.fact_ids.get(timestep).map(Vec::as_slice)
    }

    /// Ids of every action at a timestep, in action order.
    pub fn action_ids_at(&self, timestep: usize) -> Option<&[u32]> {
        self.action_ids.get(timestep).map(Vec::as_slice)
    }

    /// Every id paired with its key, in order of id.
    pub fn keys(&self) -> impl Iterator<Item = (u32, VariableKey)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, key)| (index as u32 + 1, *key))
    }

    /// A readable name for the key of an id, e.g. `holding(ball)@2`.
    pub fn describe(&self, id: u32) -> Result<String, ErrorKind> {
        Ok(match self.key_of(id)? {
            VariableKey::Fact { fact, timestep } => format!("{}@{timestep}", self.fact_name(fact)),
            VariableKey::Action { action, timestep } => {
                format!("{}@{timestep}", self.action_identifier(action))
            }
        })
    }
}
