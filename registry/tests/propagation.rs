//! End-to-end propagation tests through the public API: canonical types
//! declare metadata once, reference types inherit it via the registry.

use entity_ref_core::{
    PropertyKey, PropertySchema, RuleKind, SchemaMetadataStore, TypeKey, ValidationRule,
    ValidationRuleStore,
};
use entity_ref_registry::{
    CopyOptions, PARENTS_LIMIT, RefError, RefRegistry, ReferenceLink,
};

struct User;
struct UserSummary;
struct AdminUserSummary;

fn user() -> TypeKey {
    TypeKey::of::<User>()
}

fn summary() -> TypeKey {
    TypeKey::of::<UserSummary>()
}

fn canonical_stores() -> (SchemaMetadataStore, ValidationRuleStore) {
    let mut schemas = SchemaMetadataStore::new();
    schemas.annotate(
        user(),
        "email",
        PropertySchema::new()
            .with_description("User email address")
            .with_format("email"),
    );
    schemas.annotate(
        user(),
        "name",
        PropertySchema::new()
            .with_description("Display name")
            .with_min_length(1),
    );

    let mut rules = ValidationRuleStore::new();
    rules.add(ValidationRule::new(user(), "email", RuleKind::IsEmail));
    rules.add(ValidationRule::new(user(), "name", RuleKind::MinLength(1)));
    rules.add(
        ValidationRule::new(user(), "name", RuleKind::MaxLength(80))
            .with_groups(["admin", "beta"]),
    );

    (schemas, rules)
}

#[test]
fn test_every_directive_applies_once_in_registration_order() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry
        .property::<UserSummary>("name", PropertySchema::new(), CopyOptions::default())
        .unwrap();
    registry
        .property::<UserSummary>("email", PropertySchema::new(), CopyOptions::default())
        .unwrap();

    let report = registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap();

    assert_eq!(report.schema_copies, 2);
    // email carries one rule, name two; with no groups requested every
    // canonical rule applies.
    assert_eq!(report.validator_copies, 3);
    // Ordered key registry reflects registration order.
    assert_eq!(schemas.property_keys(summary()), &[":name", ":email"]);
}

#[test]
fn test_linking_twice_is_idempotent_for_schema_metadata() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry
        .property::<UserSummary>(
            "email",
            PropertySchema::new().with_description("Contact email"),
            CopyOptions::default(),
        )
        .unwrap();

    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap();
    let first = schemas.get(summary(), "email").cloned().unwrap();

    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap();
    let second = schemas.get(summary(), "email").cloned().unwrap();

    assert_eq!(first, second);
    assert_eq!(schemas.property_keys(summary()), &[":email"]);
}

#[test]
fn test_override_policy_merge_semantics() {
    // canonical = {description, format}; directive = {format, example}.
    let mut schemas = SchemaMetadataStore::new();
    schemas.annotate(
        user(),
        "email",
        PropertySchema::new()
            .with_description("canonical description")
            .with_format("email"),
    );
    let mut rules = ValidationRuleStore::new();

    let directive_schema = PropertySchema::new()
        .with_format("idn-email")
        .with_example(serde_json::json!("a@b.example"));

    // overrideExisting = true: directive wins on format, canonical fills the rest.
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry
        .property::<UserSummary>("email", directive_schema.clone(), CopyOptions::default())
        .unwrap();
    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap();
    let merged = schemas.get(summary(), "email").unwrap();
    assert_eq!(merged.description.as_deref(), Some("canonical description"));
    assert_eq!(merged.format.as_deref(), Some("idn-email"));
    assert_eq!(merged.example, Some(serde_json::json!("a@b.example")));

    // overrideExisting = false: canonical wins on format, directive only fills gaps.
    let mut registry = RefRegistry::new();
    registry.declare::<AdminUserSummary>();
    registry
        .property::<AdminUserSummary>(
            "email",
            directive_schema,
            CopyOptions::default().with_override_existing(false),
        )
        .unwrap();
    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<AdminUserSummary, User>(),
        )
        .unwrap();
    let merged = schemas
        .get(TypeKey::of::<AdminUserSummary>(), "email")
        .unwrap();
    assert_eq!(merged.description.as_deref(), Some("canonical description"));
    assert_eq!(merged.format.as_deref(), Some("email"));
    assert_eq!(merged.example, Some(serde_json::json!("a@b.example")));
}

#[test]
fn test_group_diff_rewrites_copied_rule_restrictions() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry
        .property::<UserSummary>("name", PropertySchema::new(), CopyOptions::default())
        .unwrap();

    // Requesting {admin}: the {admin,beta} rule is copied restricted to {beta}.
    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>().with_groups(["admin"]),
        )
        .unwrap();
    let copied: Vec<_> = rules
        .rules_of(summary())
        .into_iter()
        .filter(|r| matches!(r.kind, RuleKind::MaxLength(_)))
        .cloned()
        .collect();
    assert_eq!(copied.len(), 1);
    assert_eq!(copied[0].groups, vec!["beta".to_string()]);

    // Requesting {admin,beta}: the copy is unrestricted.
    let mut registry = RefRegistry::new();
    registry.declare::<AdminUserSummary>();
    registry
        .property::<AdminUserSummary>("name", PropertySchema::new(), CopyOptions::default())
        .unwrap();
    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<AdminUserSummary, User>().with_groups(["admin", "beta"]),
        )
        .unwrap();
    let copied: Vec<_> = rules
        .rules_of(TypeKey::of::<AdminUserSummary>())
        .into_iter()
        .filter(|r| matches!(r.kind, RuleKind::MaxLength(_)))
        .cloned()
        .collect();
    assert_eq!(copied.len(), 1);
    assert!(copied[0].groups.is_empty());
    assert!(!copied[0].always);

    // Canonical rules were never mutated.
    let canonical: Vec<_> = rules
        .rules_of(user())
        .into_iter()
        .filter(|r| matches!(r.kind, RuleKind::MaxLength(_)))
        .collect();
    assert_eq!(canonical[0].groups, vec!["admin".to_string(), "beta".to_string()]);
}

#[test]
fn test_permuted_group_sets_share_one_validation_index() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry.declare::<AdminUserSummary>();
    registry
        .property::<UserSummary>("name", PropertySchema::new(), CopyOptions::default())
        .unwrap();
    registry
        .property::<AdminUserSummary>("name", PropertySchema::new(), CopyOptions::default())
        .unwrap();

    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>().with_groups(["admin", "beta"]),
        )
        .unwrap();
    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<AdminUserSummary, User>().with_groups(["beta", "admin"]),
        )
        .unwrap();

    assert_eq!(registry.validation_index_count(), 1);
}

#[test]
fn test_ancestor_directives_are_inherited() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry
        .property::<UserSummary>("email", PropertySchema::new(), CopyOptions::default())
        .unwrap();
    registry.declare_with_parent::<AdminUserSummary, UserSummary>();
    registry
        .property::<AdminUserSummary>("name", PropertySchema::new(), CopyOptions::default())
        .unwrap();

    let report = registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<AdminUserSummary, User>(),
        )
        .unwrap();

    // Own directive plus the inherited one.
    assert_eq!(report.schema_copies, 2);
    assert_eq!(report.ancestors_visited, 2);
    let admin = TypeKey::of::<AdminUserSummary>();
    assert!(schemas.get(admin, "email").is_some());
    assert!(schemas.get(admin, "name").is_some());
    // Most-derived ancestor's directives apply first.
    assert_eq!(schemas.property_keys(admin), &[":name", ":email"]);
}

#[test]
fn test_farther_ancestor_can_overwrite_per_its_override_flag() {
    // Parent and child both declare a directive for the same property. The
    // child's applies first; the parent's, applied afterward with
    // override_existing = true, overwrites the conflicting field.
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry
        .property::<UserSummary>(
            "email",
            PropertySchema::new().with_description("parent description"),
            CopyOptions::default(),
        )
        .unwrap();
    registry.declare_with_parent::<AdminUserSummary, UserSummary>();
    registry
        .property::<AdminUserSummary>(
            "email",
            PropertySchema::new().with_description("child description"),
            CopyOptions::default(),
        )
        .unwrap();

    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<AdminUserSummary, User>(),
        )
        .unwrap();

    let merged = schemas
        .get(TypeKey::of::<AdminUserSummary>(), "email")
        .unwrap();
    assert_eq!(merged.description.as_deref(), Some("parent description"));
    assert_eq!(merged.format.as_deref(), Some("email"));
}

#[test]
fn test_entity_property_key_renames_the_source() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    registry
        .property::<UserSummary>(
            "contact",
            PropertySchema::new(),
            CopyOptions::default().from_entity_property("email"),
        )
        .unwrap();

    registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap();

    let copied = schemas.get(summary(), "contact").unwrap();
    assert_eq!(copied.format.as_deref(), Some("email"));
    // The copied rule is re-keyed to the reference property name.
    let copied_rules = rules.rules_of(summary());
    assert_eq!(copied_rules.len(), 1);
    assert_eq!(copied_rules[0].property, "contact");
    assert_eq!(copied_rules[0].kind, RuleKind::IsEmail);
}

#[test]
fn test_missing_canonical_metadata_is_not_an_error() {
    let mut schemas = SchemaMetadataStore::new();
    let mut rules = ValidationRuleStore::new();
    let mut registry = RefRegistry::new();
    registry.declare::<UserSummary>();
    // Empty local options: nothing to write at all.
    registry
        .property::<UserSummary>("ghost", PropertySchema::new(), CopyOptions::default())
        .unwrap();
    // Non-empty local options: pure declaration on the target.
    registry
        .property::<UserSummary>(
            "local",
            PropertySchema::new().with_description("local only"),
            CopyOptions::default(),
        )
        .unwrap();

    let report = registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap();

    assert_eq!(report.schema_copies, 2);
    assert_eq!(report.validator_copies, 0);
    assert!(schemas.get(summary(), "ghost").is_none());
    assert_eq!(
        schemas
            .get(summary(), "local")
            .and_then(|s| s.description.as_deref()),
        Some("local only")
    );
    assert_eq!(schemas.property_keys(summary()), &[":local"]);
}

#[test]
fn test_cyclic_ancestry_terminates_with_one_warning() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();
    // Two-type cycle: UserSummary -> AdminUserSummary -> UserSummary -> ...
    let a = registry.declare::<UserSummary>();
    let b = registry.declare::<AdminUserSummary>();
    registry.set_parent(a, b);
    registry.set_parent(b, a);
    registry
        .property::<UserSummary>("email", PropertySchema::new(), CopyOptions::default())
        .unwrap();

    let report = registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap();

    assert!(report.ancestry_limit_hit);
    assert_eq!(report.ancestors_visited, PARENTS_LIMIT);
    assert_eq!(report.warnings.len(), 1);
    // Each visit of UserSummary applied its single directive.
    assert_eq!(report.schema_copies, PARENTS_LIMIT / 2);
    // Propagation still produced metadata.
    assert!(schemas.get(summary(), "email").is_some());
}

#[test]
fn test_opaque_property_key_is_rejected() {
    let mut registry = RefRegistry::new();
    let declaring = TypeKey::of::<UserSummary>();

    let err = registry
        .register_property(
            declaring,
            PropertyKey::Opaque(99),
            PropertySchema::new(),
            CopyOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, RefError::InvalidPropertyKind { .. }));
    assert!(err.to_string().contains("UserSummary"));
    assert_eq!(registry.directive_count(declaring), 0);
}

#[test]
fn test_linking_an_undeclared_type_is_rejected() {
    let (mut schemas, mut rules) = canonical_stores();
    let mut registry = RefRegistry::new();

    let err = registry
        .link_reference(
            &mut schemas,
            &mut rules,
            ReferenceLink::new::<UserSummary, User>(),
        )
        .unwrap_err();

    assert!(matches!(err, RefError::InvalidTargetKind { .. }));
    assert!(rules.rules_of(summary()).is_empty());
}
