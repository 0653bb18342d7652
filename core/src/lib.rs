//! Core metadata model for entity reference propagation.
//!
//! This crate defines the data the propagation engine moves around:
//!
//! - [`TypeKey`] / [`PropertyKey`] — identity of declared types and their
//!   properties.
//! - [`PropertySchema`] — structured schema metadata for one property, with
//!   a documented field-wise merge ([`merge_property_schema`],
//!   [`MergePolicy`]).
//! - [`SchemaMetadataStore`] — per-type schema metadata plus the ordered
//!   registry of annotated property keys.
//! - [`ValidationRule`] / [`ValidationRuleStore`] — declarative validation
//!   constraints, queryable by type and validation groups.
//!
//! The propagation engine itself lives in the `entity-ref-registry` crate;
//! downstream schema and validation consumers read these stores directly.
//!
//! # Example
//!
//! ```
//! use entity_ref_core::*;
//!
//! struct User;
//! let user = TypeKey::of::<User>();
//!
//! // Declare canonical schema metadata and validation rules once.
//! let mut schemas = SchemaMetadataStore::new();
//! schemas.annotate(
//!     user,
//!     "email",
//!     PropertySchema::new()
//!         .with_description("User email address")
//!         .with_format("email"),
//! );
//!
//! let mut rules = ValidationRuleStore::new();
//! rules.add(ValidationRule::new(user, "email", RuleKind::IsEmail));
//!
//! assert_eq!(schemas.property_keys(user), &[":email"]);
//! assert_eq!(rules.rules_for(user, &[]).len(), 1);
//! ```

mod rules;
mod schema;
mod store;
mod types;

pub use rules::{RuleKind, ValidationRule, ValidationRuleStore, group_key};
pub use schema::{MergePolicy, PropertySchema, merge_property_schema};
pub use store::SchemaMetadataStore;
pub use types::{PropertyKey, TypeKey};
