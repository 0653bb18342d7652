//! Metadata propagation engine for reference types.
//!
//! A *canonical* type declares its properties once — schema metadata in a
//! [`SchemaMetadataStore`](entity_ref_core::SchemaMetadataStore), validation
//! rules in a [`ValidationRuleStore`](entity_ref_core::ValidationRuleStore).
//! A *reference* type (a projection such as a DTO) registers per-property
//! copy directives with a [`RefRegistry`] and is then linked to the
//! canonical type; linking walks the reference type's declared ancestry,
//! collects every inherited directive, and copies the canonical metadata
//! over — merging schema options per directive and rewriting validation
//! groups for the link's context.
//!
//! Only declarative metadata moves; runtime values are never touched.
//!
//! # Example
//!
//! ```
//! use entity_ref_core::*;
//! use entity_ref_registry::*;
//!
//! struct User;
//! struct UserSummary;
//!
//! let user = TypeKey::of::<User>();
//!
//! // Canonical declarations, made once.
//! let mut schemas = SchemaMetadataStore::new();
//! schemas.annotate(
//!     user,
//!     "email",
//!     PropertySchema::new()
//!         .with_description("User email address")
//!         .with_format("email"),
//! );
//! let mut rules = ValidationRuleStore::new();
//! rules.add(ValidationRule::new(user, "email", RuleKind::IsEmail));
//!
//! // The reference type inherits the property, overriding the description.
//! let mut registry = RefRegistry::new();
//! registry.declare::<UserSummary>();
//! registry
//!     .property::<UserSummary>(
//!         "email",
//!         PropertySchema::new().with_description("Contact email"),
//!         CopyOptions::default(),
//!     )
//!     .unwrap();
//!
//! let report = registry
//!     .link_reference(&mut schemas, &mut rules, ReferenceLink::new::<UserSummary, User>())
//!     .unwrap();
//! assert_eq!(report.schema_copies, 1);
//! assert_eq!(report.validator_copies, 1);
//!
//! let summary = TypeKey::of::<UserSummary>();
//! let copied = schemas.get(summary, "email").unwrap();
//! assert_eq!(copied.description.as_deref(), Some("Contact email"));
//! assert_eq!(copied.format.as_deref(), Some("email"));
//! assert_eq!(rules.rules_of(summary).len(), 1);
//! ```

mod directive;
mod error;
mod index;
mod registry;
mod propagate;

pub use directive::{CopyDirective, CopyOptions};
pub use error::{RefError, Result};
pub use propagate::{PARENTS_LIMIT, PropagationReport, ReferenceLink};
pub use registry::RefRegistry;
