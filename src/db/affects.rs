//! For each fact, the actions which make the fact true and the actions which make the fact false.
//!
//! The index is built once from a domain, and read when emitting frame axioms.
//! A fact with no adders and no deleters is static: no action changes its value.

use crate::structures::domain::{ActionId, Domain, FactId};

#[derive(Clone, Debug)]
pub struct AffectsIndex {
    adders: Vec<Vec<ActionId>>,
    deleters: Vec<Vec<ActionId>>,
}

impl AffectsIndex {
    pub fn new(domain: &Domain) -> Self {
        let mut adders = vec![Vec::default(); domain.fact_count()];
        let mut deleters = vec![Vec::default(); domain.fact_count()];

        for (id, action) in domain.actions() {
            for fact in &action.add {
                adders[fact.index()].push(id);
            }
            for fact in &action.delete {
                deleters[fact.index()].push(id);
            }
        }

        AffectsIndex { adders, deleters }
    }

    /// Actions which make the fact true, in action order.
    pub fn adders(&self, fact: FactId) -> &[ActionId] {
        &self.adders[fact.index()]
    }

    /// Actions which make the fact false, in action order.
    pub fn deleters(&self, fact: FactId) -> &[ActionId] {
        &self.deleters[fact.index()]
    }

    pub fn is_static(&self, fact: FactId) -> bool {
        self.adders[fact.index()].is_empty() && self.deleters[fact.index()].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::domain::{ActionSpec, DomainSpec};

    #[test]
    fn adders_deleters_and_static_facts() {
        let strings = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        let domain = DomainSpec {
            facts: strings(&["on", "off", "painted"]),
            partitions: Vec::default(),
            actions: vec![ActionSpec {
                name: "switch-on".to_string(),
                preconditions: strings(&["off"]),
                add: strings(&["on"]),
                delete: strings(&["off"]),
                ..Default::default()
            }],
        }
        .build()
        .unwrap();

        let affects = AffectsIndex::new(&domain);
        let [on, off, painted] = ["on", "off", "painted"].map(|name| domain.fact(name).unwrap());
        let switch_on = domain.action_id("switch-on()").unwrap();

        assert_eq!(affects.adders(on), [switch_on]);
        assert!(affects.deleters(on).is_empty());
        assert_eq!(affects.deleters(off), [switch_on]);

        assert!(!affects.is_static(on));
        assert!(!affects.is_static(off));
        assert!(affects.is_static(painted));
    }
}
