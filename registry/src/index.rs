//! Lazily built per-type, per-group-set validation rule index.

use std::collections::HashMap;

use entity_ref_core::{TypeKey, ValidationRule, ValidationRuleStore, group_key};

/// Cache of validation rules bucketed by property name.
///
/// Keyed by `(canonical type, canonical group key)`, so permutations of the
/// same group set share one entry. Built at most once per key and never
/// invalidated: canonical rules are assumed immutable once declared.
#[derive(Debug, Default)]
pub(crate) struct ValidationIndexCache {
    indexes: HashMap<(TypeKey, String), HashMap<String, Vec<ValidationRule>>>,
}

impl ValidationIndexCache {
    /// Rules declared on `canonical` for `property`, applicable under
    /// `groups`. Builds the index for the `(canonical, groups)` pair on
    /// first use.
    pub(crate) fn rules_for(
        &mut self,
        store: &ValidationRuleStore,
        canonical: TypeKey,
        groups: &[String],
        property: &str,
    ) -> Vec<ValidationRule> {
        let key = (canonical, group_key(groups));
        let index = self.indexes.entry(key).or_insert_with(|| {
            let mut by_property: HashMap<String, Vec<ValidationRule>> = HashMap::new();
            for rule in store.rules_for(canonical, groups) {
                by_property
                    .entry(rule.property.clone())
                    .or_default()
                    .push(rule.clone());
            }
            by_property
        });
        index.get(property).cloned().unwrap_or_default()
    }

    /// Number of indexes built so far.
    pub(crate) fn built_count(&self) -> usize {
        self.indexes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_ref_core::RuleKind;

    struct Entity;

    fn entity() -> TypeKey {
        TypeKey::of::<Entity>()
    }

    #[test]
    fn test_permuted_groups_share_one_index() {
        let mut store = ValidationRuleStore::new();
        store.add(
            ValidationRule::new(entity(), "role", RuleKind::IsString)
                .with_groups(["admin", "beta"]),
        );

        let mut cache = ValidationIndexCache::default();
        let g1 = vec!["admin".to_string(), "beta".to_string()];
        let g2 = vec!["beta".to_string(), "admin".to_string()];

        let r1 = cache.rules_for(&store, entity(), &g1, "role");
        let r2 = cache.rules_for(&store, entity(), &g2, "role");

        assert_eq!(r1, r2);
        assert_eq!(cache.built_count(), 1);
    }

    #[test]
    fn test_index_is_not_rebuilt_after_store_changes() {
        let mut store = ValidationRuleStore::new();
        store.add(ValidationRule::new(entity(), "name", RuleKind::IsString));

        let mut cache = ValidationIndexCache::default();
        assert_eq!(cache.rules_for(&store, entity(), &[], "name").len(), 1);

        // Rules added after the index is built are not picked up.
        store.add(ValidationRule::new(entity(), "name", RuleKind::MinLength(2)));
        assert_eq!(cache.rules_for(&store, entity(), &[], "name").len(), 1);
    }

    #[test]
    fn test_unknown_property_yields_no_rules() {
        let store = ValidationRuleStore::new();
        let mut cache = ValidationIndexCache::default();
        assert!(cache.rules_for(&store, entity(), &[], "ghost").is_empty());
    }
}
