//! Field tables.
//!
//! Instead of inspecting types at runtime, a record lists its fields once in
//! [`Record::fields`], pairing each field's value with a [`FieldSpec`]: the
//! declared name, name tags, embedding flag, and permission specifier.
//! `FieldSpec` is built with `const fn`s, so tables can live in `const`
//! items when that reads better.
//!
//! ```rust
//! use fieldpex::{Field, FieldSpec, Record};
//!
//! struct Audit {
//!     created_by: String,
//! }
//!
//! struct Note {
//!     audit: Audit,
//!     text: String,
//!     internal: bool,
//! }
//!
//! const TEXT: FieldSpec = FieldSpec::new("Text").permission("133").rename("body,omitempty");
//!
//! impl Record for Note {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new(FieldSpec::new("Audit").embedded(), &self.audit),
//!             Field::new(TEXT, &self.text),
//!             Field::new(FieldSpec::private("internal"), &self.internal),
//!         ]
//!     }
//! }
//! # impl Record for Audit {
//! #     fn fields(&self) -> Vec<Field<'_>> {
//! #         vec![Field::new(FieldSpec::new("created_by"), &self.created_by)]
//! #     }
//! # }
//! # fieldpex::impl_record_extract!(Audit, Note);
//! ```

use crate::extract::Extract;
use fieldpex_core::{Action, resolve_field_name};
use std::fmt;

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    permission: &'static str,
    tag: Option<&'static str>,
    export_tag: Option<&'static str>,
    embedded: bool,
    exported: bool,
    derived: bool,
}

impl FieldSpec {
    /// A public field with unrestricted access.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            permission: "",
            tag: None,
            export_tag: None,
            embedded: false,
            exported: true,
            derived: false,
        }
    }

    /// A field that is never part of any extraction.
    pub const fn private(name: &'static str) -> Self {
        let mut spec = Self::new(name);
        spec.exported = false;
        spec
    }

    /// Sets the permission specifier (positional digits or keyed pairs).
    pub const fn permission(mut self, spec: &'static str) -> Self {
        self.permission = spec;
        self
    }

    /// Sets the serialized-name tag: `name`, `name,<modifier>`, or `-`.
    pub const fn rename(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Sets the name used under [`Action::Export`]; `-` omits the field from
    /// exports.
    pub const fn export_as(mut self, tag: &'static str) -> Self {
        self.export_tag = Some(tag);
        self
    }

    /// Hoists the field's own fields into the parent.
    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Marks the field as computed or not persisted: it never takes part in
    /// a write.
    pub const fn derived(mut self) -> Self {
        self.derived = true;
        self
    }

    /// Declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Permission specifier; empty means unrestricted.
    pub fn permission_spec(&self) -> &'static str {
        self.permission
    }

    /// Whether the field is visible to extraction at all.
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Whether the field is flattened into its parent.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Whether the field is excluded from writes.
    pub fn is_derived(&self) -> bool {
        self.derived
    }

    /// Output key for this field under `action`, or `None` when the name
    /// tag in effect is the omit sentinel.
    pub fn output_name(&self, action: Action) -> Option<&'static str> {
        let tag = match action {
            Action::Export => self.export_tag,
            Action::Read | Action::Write => self.tag,
        };
        resolve_field_name(tag, self.name)
    }
}

/// A field of a concrete record value: its spec plus a borrow of its value.
pub struct Field<'a> {
    spec: FieldSpec,
    value: &'a dyn Extract,
}

impl<'a> Field<'a> {
    /// Pairs a spec with the field's value.
    pub fn new(spec: FieldSpec, value: &'a dyn Extract) -> Self {
        Self { spec, value }
    }

    /// The field's spec.
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// The field's value.
    pub fn value(&self) -> &'a dyn Extract {
        self.value
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("spec", &self.spec).finish_non_exhaustive()
    }
}

/// A struct-like type with a field table.
///
/// Implementing `Record` describes the fields; to make the type extractable
/// also implement [`Extract`], normally through
/// [`impl_record_extract!`](crate::impl_record_extract).
pub trait Record {
    /// The record's fields, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}
