//! Copy directives: the per-property copy instructions registered on a
//! declaring type.
//!
//! A directive is created once per annotated property and is immutable from
//! then on. It carries two operations, applied during propagation:
//! [`copy_schema`](CopyDirective::copy_schema) merges schema metadata onto
//! the reference type, and
//! [`copy_validators`](CopyDirective::copy_validators) re-derives the
//! canonical property's validation rules for it.

use entity_ref_core::{
    MergePolicy, PropertySchema, SchemaMetadataStore, TypeKey, ValidationRule,
    ValidationRuleStore, merge_property_schema,
};

use crate::index::ValidationIndexCache;

/// Options controlling how one property inherits canonical metadata.
///
/// # Examples
///
/// ```
/// use entity_ref_registry::CopyOptions;
///
/// let defaults = CopyOptions::default();
/// assert!(defaults.override_existing);
/// assert!(defaults.entity_property_key.is_none());
///
/// let renamed = CopyOptions::default().from_entity_property("contact_email");
/// assert_eq!(renamed.entity_property_key.as_deref(), Some("contact_email"));
/// ```
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Canonical property to read from; defaults to the property's own name.
    pub entity_property_key: Option<String>,
    /// Whether the directive's own options win over inherited metadata on
    /// field conflicts. Defaults to `true`.
    pub override_existing: bool,
}

impl CopyOptions {
    /// Default options: read from the same-named canonical property,
    /// directive options override inherited values.
    pub fn new() -> Self {
        Self {
            entity_property_key: None,
            override_existing: true,
        }
    }

    /// Reads canonical metadata from a differently named property.
    pub fn from_entity_property(mut self, key: &str) -> Self {
        self.entity_property_key = Some(key.to_string());
        self
    }

    /// Sets the override policy.
    pub fn with_override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    fn normalized(self, property: &str) -> (String, bool) {
        let source = self
            .entity_property_key
            .unwrap_or_else(|| property.to_string());
        (source, self.override_existing)
    }
}

// Not derived: `override_existing` defaults to true.
impl Default for CopyOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// One annotated property's copy instructions.
///
/// Owned by the declaring type's descriptor entry; applied by the
/// propagation driver against a `(canonical, reference)` pair.
#[derive(Debug, Clone)]
pub struct CopyDirective {
    property: String,
    source_property: String,
    schema: PropertySchema,
    override_existing: bool,
}

impl CopyDirective {
    pub(crate) fn new(property: String, schema: PropertySchema, options: CopyOptions) -> Self {
        let (source_property, override_existing) = options.normalized(&property);
        Self {
            property,
            source_property,
            schema,
            override_existing,
        }
    }

    /// The annotated property on the declaring type.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The canonical property the directive reads from.
    pub fn source_property(&self) -> &str {
        &self.source_property
    }

    /// Whether directive options win over inherited metadata.
    pub fn override_existing(&self) -> bool {
        self.override_existing
    }

    /// Copies schema metadata from `canonical` onto `target`.
    ///
    /// With no canonical metadata for the source property, non-empty local
    /// options become the target's metadata outright (pure declaration);
    /// empty options make this a no-op. With canonical metadata present,
    /// the merge base is whatever is already on the target (an earlier
    /// directive's result or a local override), falling back to the
    /// canonical record, and the directive's options are overlaid per the
    /// override policy.
    pub(crate) fn copy_schema(
        &self,
        store: &mut SchemaMetadataStore,
        canonical: TypeKey,
        target: TypeKey,
    ) {
        let Some(canonical_meta) = store.get(canonical, &self.source_property).cloned() else {
            if !self.schema.is_empty() {
                store.put(target, &self.property, self.schema.clone());
                store.register_property_key(target, &format!(":{}", self.property));
            }
            return;
        };

        let base = store
            .get(target, &self.property)
            .cloned()
            .unwrap_or(canonical_meta);
        let policy = if self.override_existing {
            MergePolicy::OverrideExisting
        } else {
            MergePolicy::PreserveExisting
        };
        let merged = merge_property_schema(&base, &self.schema, policy);

        store.put(target, &self.property, merged);
        store.register_property_key(target, &format!(":{}", self.property));
    }

    /// Re-derives the canonical property's validation rules for
    /// `real_target`, adjusting group restrictions.
    ///
    /// For each canonical rule, the groups already satisfied by the request
    /// are subtracted. An empty remainder means the rule applies
    /// unconditionally on the copy: its group restriction and `always` flag
    /// are cleared. A non-empty remainder becomes the copy's new group
    /// restriction, `always` kept as declared. Canonical rules are never
    /// mutated.
    ///
    /// Returns the number of rules copied.
    pub(crate) fn copy_validators(
        &self,
        rule_store: &mut ValidationRuleStore,
        index: &mut ValidationIndexCache,
        canonical: TypeKey,
        real_target: TypeKey,
        groups: &[String],
    ) -> usize {
        let rules = index.rules_for(rule_store, canonical, groups, &self.source_property);

        for rule in &rules {
            let groups_diff: Vec<String> = rule
                .groups
                .iter()
                .filter(|g| !groups.contains(*g))
                .cloned()
                .collect();

            let mut copied = ValidationRule {
                target: real_target,
                property: self.property.clone(),
                ..rule.clone()
            };
            if groups_diff.is_empty() {
                copied.groups = Vec::new();
                copied.always = false;
            } else {
                copied.groups = groups_diff;
            }
            rule_store.add(copied);
        }

        rules.len()
    }
}
