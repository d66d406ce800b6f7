use proptest::prelude::*;

use satplan::{db::variable_map::Allocator, structures::key::VariableKey};

fn names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|index| format!("{prefix}{index}")).collect()
}

proptest! {
    #[test]
    fn ids_and_keys_are_a_bijection(facts in 1usize..8, actions in 0usize..6, horizon in 1usize..7) {
        let mut allocator = Allocator::new();
        allocator.declare_facts(&names("f", facts), horizon).unwrap();
        allocator.declare_actions(&names("a", actions), horizon).unwrap();
        let map = allocator.finish();

        prop_assert_eq!(map.var_count(), facts * (horizon + 1) + actions * horizon);

        let mut expected_id = 1;
        for (id, key) in map.keys() {
            prop_assert_eq!(id, expected_id);
            prop_assert_eq!(map.id_of(&key), Ok(id));
            prop_assert_eq!(map.key_of(id), Ok(key));
            expected_id += 1;
        }
        prop_assert!(map.key_of(expected_id).is_err());
    }

    #[test]
    fn facts_precede_actions(facts in 1usize..8, actions in 1usize..6, horizon in 1usize..7) {
        let mut allocator = Allocator::new();
        allocator.declare_facts(&names("f", facts), horizon).unwrap();
        allocator.declare_actions(&names("a", actions), horizon).unwrap();
        let map = allocator.finish();

        let fact_ids = facts * (horizon + 1);
        for (id, key) in map.keys() {
            match key {
                VariableKey::Fact { fact, timestep } => {
                    prop_assert!(id as usize <= fact_ids);
                    prop_assert_eq!(id as usize, timestep * facts + fact.index() + 1);
                }
                VariableKey::Action { action, timestep } => {
                    prop_assert!(id as usize > fact_ids);
                    prop_assert_eq!(id as usize, fact_ids + timestep * actions + action.index() + 1);
                }
            }
        }
    }
}
