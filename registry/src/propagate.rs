//! The propagation driver: ancestry walk and directive application.

use entity_ref_core::{SchemaMetadataStore, TypeKey, ValidationRuleStore};
use tracing::{debug, warn};

use crate::error::{RefError, Result};
use crate::registry::RefRegistry;

/// Maximum number of ancestors visited during one propagation, the
/// reference type included. Guards against unbounded or cyclic ancestry
/// chains.
pub const PARENTS_LIMIT: usize = 16;

/// A one-shot association between a reference type and its canonical type.
///
/// Built once and handed to [`RefRegistry::link_reference`]; not retained
/// beyond the propagation it drives (only the canonical back-link is kept).
///
/// # Examples
///
/// ```
/// use entity_ref_registry::ReferenceLink;
///
/// struct User;
/// struct UserSummary;
///
/// let link = ReferenceLink::new::<UserSummary, User>().with_groups(["admin"]);
/// assert_eq!(link.groups, vec!["admin".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceLink {
    /// The reference type receiving metadata.
    pub reference: TypeKey,
    /// The canonical type metadata is read from.
    pub canonical: TypeKey,
    /// Validation groups active for this link.
    pub groups: Vec<String>,
}

impl ReferenceLink {
    /// Links reference type `R` to canonical type `C`, with no groups.
    pub fn new<R: 'static, C: 'static>() -> Self {
        Self {
            reference: TypeKey::of::<R>(),
            canonical: TypeKey::of::<C>(),
            groups: Vec::new(),
        }
    }

    /// Sets the validation groups active for this link.
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }
}

/// What one propagation did.
#[derive(Debug, Clone, Default)]
pub struct PropagationReport {
    /// Ancestors visited, the reference type included.
    pub ancestors_visited: usize,
    /// Schema copies applied (one per directive).
    pub schema_copies: usize,
    /// Validation rules copied onto the reference type.
    pub validator_copies: usize,
    /// The ancestry walk hit [`PARENTS_LIMIT`] with ancestors remaining.
    pub ancestry_limit_hit: bool,
    /// Human-readable warnings (currently only the ancestry-limit case).
    pub warnings: Vec<String>,
}

impl RefRegistry {
    /// Propagates inherited metadata onto the link's reference type.
    ///
    /// Walks the reference type and its declared ancestors, most-derived
    /// first, visiting at most [`PARENTS_LIMIT`] types. At every visited
    /// type owning a descriptor entry, each directive is applied in
    /// registration order: schema copy against the canonical type, then
    /// validator copy against `(canonical, reference, groups)`.
    ///
    /// Exhausting the depth limit with ancestors remaining is recoverable:
    /// propagation completes with the directives collected so far and the
    /// report carries one warning. Repeating a call with identical
    /// arguments and unchanged canonical metadata leaves the reference
    /// type's schema metadata unchanged.
    ///
    /// # Errors
    ///
    /// [`RefError::InvalidTargetKind`] if the reference type was never
    /// declared; nothing is propagated.
    pub fn link_reference(
        &mut self,
        schema_store: &mut SchemaMetadataStore,
        rule_store: &mut ValidationRuleStore,
        link: ReferenceLink,
    ) -> Result<PropagationReport> {
        if !self.types.contains_key(&link.reference) {
            return Err(RefError::InvalidTargetKind {
                type_name: link.reference.name().to_string(),
            });
        }

        debug!(
            reference = link.reference.name(),
            canonical = link.canonical.name(),
            groups = ?link.groups,
            "Linking reference type"
        );

        self.canonical_links.insert(link.reference, link.canonical);

        let mut report = PropagationReport::default();
        let mut current = Some(link.reference);

        while let Some(ty) = current {
            if report.ancestors_visited == PARENTS_LIMIT {
                report.ancestry_limit_hit = true;
                report.warnings.push(format!(
                    "ancestry limit ({PARENTS_LIMIT}) reached while linking {}; \
                     remaining ancestors skipped (possible ancestry cycle)",
                    link.reference.name()
                ));
                warn!(
                    reference = link.reference.name(),
                    limit = PARENTS_LIMIT,
                    "Ancestry limit exceeded; propagation proceeds with directives collected so far"
                );
                break;
            }
            report.ancestors_visited += 1;

            let decl = self.types.get(&ty);
            if let Some(decl) = decl {
                for directive in &decl.directives {
                    directive.copy_schema(schema_store, link.canonical, link.reference);
                    report.schema_copies += 1;
                    report.validator_copies += directive.copy_validators(
                        rule_store,
                        &mut self.validation_index,
                        link.canonical,
                        link.reference,
                        &link.groups,
                    );
                }
            }
            current = decl.and_then(|d| d.parent);
        }

        debug!(
            reference = link.reference.name(),
            ancestors = report.ancestors_visited,
            schema_copies = report.schema_copies,
            validator_copies = report.validator_copies,
            "Reference propagation complete"
        );

        Ok(report)
    }
}
