//! Property schema metadata and merging with configurable conflict resolution.
//!
//! A [`PropertySchema`] is the documentation/shape record attached to one
//! property of a type: description, type name, format, example value, value
//! bounds and so on. Every field is optional; an unset field means "nothing
//! declared here".
//!
//! When a reference type inherits metadata from a canonical type while also
//! declaring options of its own, [`merge_property_schema`] combines the two
//! records using a [`MergePolicy`] to resolve conflicts. Unset fields never
//! win a conflict, so a local record can never blank out inherited values.
//!
//! # Example
//!
//! ```
//! use entity_ref_core::{MergePolicy, PropertySchema, merge_property_schema};
//!
//! let canonical = PropertySchema::new()
//!     .with_description("User email address")
//!     .with_format("email");
//!
//! let local = PropertySchema::new().with_description("Contact email");
//!
//! let merged = merge_property_schema(&canonical, &local, MergePolicy::OverrideExisting);
//! assert_eq!(merged.description.as_deref(), Some("Contact email"));
//! assert_eq!(merged.format.as_deref(), Some("email")); // inherited
//! ```

use serde::{Deserialize, Serialize};

/// Conflict resolution for [`merge_property_schema`].
///
/// # Examples
///
/// ```
/// use entity_ref_core::{MergePolicy, PropertySchema, merge_property_schema};
///
/// let base = PropertySchema::new().with_description("base");
/// let incoming = PropertySchema::new().with_description("incoming");
///
/// let m1 = merge_property_schema(&base, &incoming, MergePolicy::OverrideExisting);
/// assert_eq!(m1.description.as_deref(), Some("incoming"));
///
/// let m2 = merge_property_schema(&base, &incoming, MergePolicy::PreserveExisting);
/// assert_eq!(m2.description.as_deref(), Some("base"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Incoming values win when both sides set the same field.
    OverrideExisting,
    /// Base values win when both sides set the same field.
    PreserveExisting,
}

/// Schema metadata for one property.
///
/// Explicit optional fields rather than a free-form option bag: downstream
/// schema generators read exactly these fields, and the merge function is
/// defined field by field.
///
/// Use [`new`](PropertySchema::new) plus the `with_*` builder methods.
///
/// # Examples
///
/// ```
/// use entity_ref_core::PropertySchema;
///
/// let schema = PropertySchema::new()
///     .with_description("Display name")
///     .with_type_name("string")
///     .with_min_length(1)
///     .with_max_length(80)
///     .with_required(true);
///
/// assert!(!schema.is_empty());
/// assert_eq!(schema.required, Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Logical type name (e.g. "string", "integer").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Format qualifier (e.g. "email", "uuid", "date-time").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    /// Whether the property must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Whether the property accepts null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Whether the property is deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Allowed values for enumerated properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive numeric upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

impl PropertySchema {
    /// Creates an empty record with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use entity_ref_core::PropertySchema;
    ///
    /// assert!(PropertySchema::new().is_empty());
    /// assert!(!PropertySchema::new().with_required(false).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the logical type name.
    pub fn with_type_name(mut self, type_name: &str) -> Self {
        self.type_name = Some(type_name.to_string());
        self
    }

    /// Sets the format qualifier.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Sets an example value.
    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Sets a default value.
    pub fn with_default_value(mut self, default_value: serde_json::Value) -> Self {
        self.default_value = Some(default_value);
        self
    }

    /// Marks the property required (or explicitly optional).
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Marks the property nullable.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Marks the property deprecated.
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = Some(deprecated);
        self
    }

    /// Sets the allowed values.
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the numeric lower bound.
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the numeric upper bound.
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Sets the minimum string length.
    pub fn with_min_length(mut self, min_length: u64) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Sets the maximum string length.
    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// Merges two property schema records into one.
///
/// The merge is field-wise: for each field, if both sides set it the
/// `policy` decides the winner; if only one side sets it, that value is
/// kept. Fields unset on both sides stay unset.
///
/// # Examples
///
/// ```
/// use entity_ref_core::{MergePolicy, PropertySchema, merge_property_schema};
///
/// // base = {description: "a", format: "b"}, incoming = {format: "c", required: true}
/// let base = PropertySchema::new().with_description("a").with_format("b");
/// let incoming = PropertySchema::new().with_format("c").with_required(true);
///
/// let merged = merge_property_schema(&base, &incoming, MergePolicy::OverrideExisting);
/// assert_eq!(merged.description.as_deref(), Some("a"));
/// assert_eq!(merged.format.as_deref(), Some("c"));
/// assert_eq!(merged.required, Some(true));
///
/// let merged = merge_property_schema(&base, &incoming, MergePolicy::PreserveExisting);
/// assert_eq!(merged.format.as_deref(), Some("b"));
/// assert_eq!(merged.required, Some(true)); // only incoming set it
/// ```
pub fn merge_property_schema(
    base: &PropertySchema,
    incoming: &PropertySchema,
    policy: MergePolicy,
) -> PropertySchema {
    match policy {
        MergePolicy::OverrideExisting => overlay(base, incoming),
        MergePolicy::PreserveExisting => overlay(incoming, base),
    }
}

/// Field-wise overlay: `over` wins wherever it is set, `under` fills the rest.
fn overlay(under: &PropertySchema, over: &PropertySchema) -> PropertySchema {
    PropertySchema {
        description: over
            .description
            .clone()
            .or_else(|| under.description.clone()),
        type_name: over.type_name.clone().or_else(|| under.type_name.clone()),
        format: over.format.clone().or_else(|| under.format.clone()),
        example: over.example.clone().or_else(|| under.example.clone()),
        default_value: over
            .default_value
            .clone()
            .or_else(|| under.default_value.clone()),
        required: over.required.or(under.required),
        nullable: over.nullable.or(under.nullable),
        deprecated: over.deprecated.or(under.deprecated),
        enum_values: over
            .enum_values
            .clone()
            .or_else(|| under.enum_values.clone()),
        minimum: over.minimum.or(under.minimum),
        maximum: over.maximum.or(under.maximum),
        min_length: over.min_length.or(under.min_length),
        max_length: over.max_length.or(under.max_length),
    }
}
