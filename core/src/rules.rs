//! Validation rules and the rule store.
//!
//! A [`ValidationRule`] declares one constraint on one property of a type,
//! optionally restricted to named validation groups. Rules live in a
//! [`ValidationRuleStore`], an append-only registry queried by type and by
//! active groups. Rule *evaluation* is the validation engine's business and
//! out of scope here; this crate only moves the declarations around.
//!
//! # Example
//!
//! ```
//! use entity_ref_core::{RuleKind, TypeKey, ValidationRule, ValidationRuleStore};
//!
//! struct User;
//!
//! let mut store = ValidationRuleStore::new();
//! let user = TypeKey::of::<User>();
//!
//! store.add(ValidationRule::new(user, "email", RuleKind::IsEmail));
//! store.add(
//!     ValidationRule::new(user, "role", RuleKind::IsString)
//!         .with_groups(["admin"]),
//! );
//!
//! // No groups requested: every rule of the type.
//! assert_eq!(store.rules_for(user, &[]).len(), 2);
//! // Groups requested: only matching (or always-on) rules.
//! let admin = vec!["admin".to_string()];
//! assert_eq!(store.rules_for(user, &admin).len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::TypeKey;

/// The constraint a validation rule enforces.
///
/// The propagation engine treats this value opaquely — it is copied, never
/// interpreted. The variants cover common declarative constraints;
/// [`RuleKind::Custom`] names anything else by its validator identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleKind {
    /// Value must be a string.
    IsString,
    /// Value must be a number.
    IsNumber,
    /// Value must be a boolean.
    IsBoolean,
    /// Value must be a well-formed email address.
    IsEmail,
    /// Value must be a well-formed URL.
    IsUrl,
    /// Value must be a UUID.
    IsUuid,
    /// String length must be at least this many characters.
    MinLength(u64),
    /// String length must be at most this many characters.
    MaxLength(u64),
    /// Numeric value must be at least this.
    Min(f64),
    /// Numeric value must be at most this.
    Max(f64),
    /// Value must be one of the listed options.
    IsIn(Vec<String>),
    /// Value must match this regular expression pattern.
    Matches(String),
    /// Property may be absent; other rules are skipped when it is.
    IsOptional,
    /// Any other constraint, named by its validator identifier.
    Custom(String),
}

/// One validation constraint declared on one property of one type.
///
/// `groups` restricts the rule to named validation contexts; an empty list
/// means the rule is unconditional. `always` forces the rule to apply even
/// when groups are requested that it does not belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRule {
    /// The type the rule is declared on.
    pub target: TypeKey,
    /// The property the rule constrains.
    pub property: String,
    /// The constraint itself.
    pub kind: RuleKind,
    /// Validation groups the rule is restricted to; empty = unrestricted.
    pub groups: Vec<String>,
    /// Apply even when the requested groups do not include this rule's.
    pub always: bool,
    /// Custom failure message, if declared.
    pub message: Option<String>,
}

impl ValidationRule {
    /// Creates an unrestricted rule.
    pub fn new(target: TypeKey, property: &str, kind: RuleKind) -> Self {
        Self {
            target,
            property: property.to_string(),
            kind,
            groups: Vec::new(),
            always: false,
            message: None,
        }
    }

    /// Restricts the rule to the given groups.
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the rule as always applying, regardless of requested groups.
    pub fn always(mut self) -> Self {
        self.always = true;
        self
    }

    /// Attaches a custom failure message.
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Whether the rule applies under the requested groups.
    ///
    /// No requested groups → every rule applies. Otherwise a rule applies
    /// if it is `always` or shares at least one group with the request.
    pub fn applies_to_groups(&self, requested: &[String]) -> bool {
        if requested.is_empty() {
            return true;
        }
        self.always || self.groups.iter().any(|g| requested.contains(g))
    }
}

/// Append-only registry of validation rules.
///
/// Rules are never mutated or removed once added; copies derived for
/// reference types are registered as new rules.
#[derive(Debug, Default)]
pub struct ValidationRuleStore {
    rules: Vec<ValidationRule>,
}

impl ValidationRuleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    pub fn add(&mut self, rule: ValidationRule) {
        self.rules.push(rule);
    }

    /// Rules declared on `target` that apply under `groups`, in
    /// registration order.
    pub fn rules_for(&self, target: TypeKey, groups: &[String]) -> Vec<&ValidationRule> {
        self.rules
            .iter()
            .filter(|r| r.target == target && r.applies_to_groups(groups))
            .collect()
    }

    /// All rules declared on `target`, in registration order.
    pub fn rules_of(&self, target: TypeKey) -> Vec<&ValidationRule> {
        self.rules.iter().filter(|r| r.target == target).collect()
    }

    /// Total number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Canonical key for a set of validation groups: sorted, deduplicated,
/// comma-joined. Permutations of the same set map to the same key.
///
/// # Examples
///
/// ```
/// use entity_ref_core::group_key;
///
/// let ab = vec!["b".to_string(), "a".to_string(), "a".to_string()];
/// let ba = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(group_key(&ab), "a,b");
/// assert_eq!(group_key(&ab), group_key(&ba));
/// assert_eq!(group_key(&[]), "");
/// ```
pub fn group_key(groups: &[String]) -> String {
    let mut sorted: Vec<&str> = groups.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.join(",")
}
