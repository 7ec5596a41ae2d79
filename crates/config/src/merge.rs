//! First-source-wins merging of per-source value sets

use hotparam_core::ParamValues;

/// Merge value sets ordered by priority, index 0 first.
///
/// For every parameter the value from the first set that has one wins.
pub fn merge(sets: &[ParamValues]) -> ParamValues {
    let mut merged = ParamValues::new();
    for values in sets {
        for (set_name, param_name, value) in values.iter() {
            if !merged.contains(set_name, param_name) {
                merged.insert(set_name, param_name, value);
            }
        }
    }
    merged
}

/// Value of one parameter from the highest priority set that has it
pub fn desired_value<'a>(
    sets: &'a [ParamValues],
    set_name: &str,
    param_name: &str,
) -> Option<&'a str> {
    sets.iter()
        .find_map(|values| values.get(set_name, param_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotparam_core::param_values;
    use proptest::prelude::*;

    #[test]
    fn test_first_source_wins() {
        let flags = param_values! { "" => { "port" => "9090" } };
        let env = param_values! { "" => { "port" => "9091", "server" => "x" } };

        let merged = merge(&[flags.clone(), env.clone()]);
        assert_eq!(merged.get("", "port"), Some("9090"));
        assert_eq!(merged.get("", "server"), Some("x"));

        let sets = [flags, env];
        assert_eq!(desired_value(&sets, "", "port"), Some("9090"));
        assert_eq!(desired_value(&sets, "", "server"), Some("x"));
        assert_eq!(desired_value(&sets, "", "missing"), None);
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        assert!(merge(&[]).is_empty());
        assert!(merge(&[ParamValues::new(), ParamValues::new()]).is_empty());
    }

    fn arb_values() -> impl Strategy<Value = ParamValues> {
        prop::collection::vec(("(|db)", "[a-d]", "[a-z0-9]{0,4}"), 0..8)
            .prop_map(|triples| triples.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_merge_priority(a in arb_values(), b in arb_values()) {
            let merged = merge(&[a.clone(), b.clone()]);
            for (set_name, param_name, value) in merged.iter() {
                let expected = a.get(set_name, param_name).or_else(|| b.get(set_name, param_name));
                prop_assert_eq!(Some(value), expected);
            }
            for (set_name, param_name, _) in a.iter().chain(b.iter()) {
                prop_assert!(merged.contains(set_name, param_name));
            }
        }

        #[test]
        fn prop_merge_is_idempotent(sets in prop::collection::vec(arb_values(), 0..4)) {
            prop_assert_eq!(merge(&sets), merge(&sets));
            prop_assert_eq!(merge(&[merge(&sets)]), merge(&sets));
        }
    }
}
