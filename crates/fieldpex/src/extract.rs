//! The extraction walk.
//!
//! [`Extract`] turns a value into a role-filtered [`Value`]. Scalars map to
//! scalar variants, collections to [`Value::Seq`], associative maps to
//! [`Value::Map`] with stringified keys, `Option` and pointer wrappers are
//! transparent (`None` becomes [`Value::Null`]), and records are walked field
//! by field through [`extract_record`]:
//!
//! 1. private fields are skipped
//! 2. derived fields are skipped for writes
//! 3. fields the role may not access for the action are skipped
//! 4. the output key comes from the field's name tag (or export tag)
//! 5. embedded fields whose value extracts to a map are merged into the
//!    parent; the parent's own keys win over embedded ones, and among
//!    embedded fields the one declared last wins
//!
//! Extraction has no error path.
//!
//! The same walk also backs reconstruction. [`Extract::clean_json`] produces
//! the JSON form of a value in which every field the walk would drop carries
//! its type's zero value instead ([`Extract::zero_json`]), at any depth:
//! inside optional records, sequences, and maps alike.

use crate::field::{FieldSpec, Record};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use fieldpex_core::{Action, ExportConfig, Role, Value, has_permission};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::{Display, Write};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// Call-scoped inputs to an extraction: who is asking, for what, and how to
/// format exports.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    role: &'a Role,
    action: Action,
    export: &'a ExportConfig,
}

impl<'a> Context<'a> {
    /// Creates a context.
    pub fn new(role: &'a Role, action: Action, export: &'a ExportConfig) -> Self {
        Self {
            role,
            action,
            export,
        }
    }

    /// The acting role.
    pub fn role(&self) -> &'a Role {
        self.role
    }

    /// The intended action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Export formatting.
    pub fn export(&self) -> &'a ExportConfig {
        self.export
    }

    /// Whether the action is [`Action::Export`].
    pub fn is_export(&self) -> bool {
        self.action == Action::Export
    }

    /// Renders a temporal value with the export date format.
    ///
    /// Falls back to `fallback` when the configured format cannot render
    /// the value.
    fn format_date<T: Display>(&self, formatted: T, fallback: impl FnOnce() -> String) -> Value {
        let mut out = String::new();
        match write!(out, "{formatted}") {
            Ok(()) => Value::String(out),
            Err(_) => {
                log::warn!(
                    "Export date format '{}' failed, using ISO 8601",
                    self.export.date_format
                );
                Value::String(fallback())
            }
        }
    }
}

/// A value that can be projected into a role-filtered [`Value`].
pub trait Extract {
    /// Extracts `self` under `cx`.
    fn extract_with(&self, cx: &Context<'_>) -> Value;

    /// JSON for the zero value of `self`'s type: what a denied field of this
    /// type decodes from.
    fn zero_json(&self) -> serde_json::Value;

    /// JSON for `self` with every field `cx` denies set to its zero value.
    ///
    /// Leaves defer to [`extract_with`](Self::extract_with); containers and
    /// records override this so the zeroing reaches nested records.
    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        self.extract_with(cx).to_json()
    }
}

/// How one field of a record takes part in a walk.
enum Access {
    /// Not part of the output at all: omitted by its name tag.
    Omitted,
    /// Dropped from extraction, zeroed on reconstruction.
    Denied(&'static str),
    Granted(&'static str),
}

fn field_access(spec: &FieldSpec, cx: &Context<'_>) -> Access {
    let Some(name) = spec.output_name(cx.action()) else {
        log::trace!("Field '{}' is omitted by its name tag", spec.name());
        return Access::Omitted;
    };
    if !spec.is_exported() {
        return Access::Denied(name);
    }
    if spec.is_derived() && cx.action() == Action::Write {
        log::trace!("Skipping derived field '{}' for write", spec.name());
        return Access::Denied(name);
    }
    if !has_permission(spec.permission_spec(), cx.role(), cx.action()) {
        log::trace!(
            "Role {} denied {} on field '{}'",
            cx.role(),
            cx.action(),
            spec.name()
        );
        return Access::Denied(name);
    }
    Access::Granted(name)
}

/// Collects a record's output keys. Embedded entries go to their own map so
/// the parent's keys can be laid over them at the end.
struct RecordWriter<V> {
    own: BTreeMap<String, V>,
    embedded: BTreeMap<String, V>,
}

impl<V> RecordWriter<V> {
    fn new() -> Self {
        Self {
            own: BTreeMap::new(),
            embedded: BTreeMap::new(),
        }
    }

    fn own(&mut self, name: &str, value: V) {
        self.own.insert(name.to_string(), value);
    }

    fn embed(&mut self, entries: impl IntoIterator<Item = (String, V)>) {
        self.embedded.extend(entries);
    }

    fn finish(mut self) -> BTreeMap<String, V> {
        self.embedded.append(&mut self.own);
        self.embedded
    }
}

/// Walks a record's field table, keeping only the fields `cx` allows.
pub fn extract_record<R: Record + ?Sized>(record: &R, cx: &Context<'_>) -> Value {
    let mut out = RecordWriter::new();
    for field in record.fields() {
        let spec = field.spec();
        let Access::Granted(name) = field_access(spec, cx) else {
            continue;
        };
        match field.value().extract_with(cx) {
            Value::Map(inner) if spec.is_embedded() => out.embed(inner),
            value => out.own(name, value),
        }
    }
    Value::Map(out.finish())
}

/// Zero JSON for a record: every named field at its zero value, embedded
/// fields flattened.
pub fn zero_record<R: Record + ?Sized>(record: &R) -> serde_json::Value {
    let mut out = RecordWriter::new();
    for field in record.fields() {
        let spec = field.spec();
        let Some(name) = spec.output_name(Action::Read) else {
            continue;
        };
        match field.value().zero_json() {
            serde_json::Value::Object(inner) if spec.is_embedded() => out.embed(inner),
            value => out.own(name, value),
        }
    }
    serde_json::Value::Object(out.finish().into_iter().collect())
}

/// [`Extract::clean_json`] for a record: granted fields recurse, denied ones
/// are zeroed, omitted ones are left out.
pub fn clean_record<R: Record + ?Sized>(record: &R, cx: &Context<'_>) -> serde_json::Value {
    let mut out = RecordWriter::new();
    for field in record.fields() {
        let spec = field.spec();
        let (name, value) = match field_access(spec, cx) {
            Access::Omitted => continue,
            Access::Denied(name) => (name, field.value().zero_json()),
            Access::Granted(name) => (name, field.value().clean_json(cx)),
        };
        match value {
            serde_json::Value::Object(inner) if spec.is_embedded() => out.embed(inner),
            value => out.own(name, value),
        }
    }
    serde_json::Value::Object(out.finish().into_iter().collect())
}

/// Implements [`Extract`] for record types by delegating to
/// [`extract_record`], [`zero_record`], and [`clean_record`].
///
/// ```rust
/// use fieldpex::{Field, FieldSpec, Record};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![
///             Field::new(FieldSpec::new("x"), &self.x),
///             Field::new(FieldSpec::new("y"), &self.y),
///         ]
///     }
/// }
///
/// fieldpex::impl_record_extract!(Point);
/// ```
#[macro_export]
macro_rules! impl_record_extract {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Extract for $ty {
                fn extract_with(&self, cx: &$crate::Context<'_>) -> $crate::Value {
                    $crate::extract::extract_record(self, cx)
                }

                fn zero_json(&self) -> $crate::serde_json::Value {
                    $crate::extract::zero_record(self)
                }

                fn clean_json(&self, cx: &$crate::Context<'_>) -> $crate::serde_json::Value {
                    $crate::extract::clean_record(self, cx)
                }
            }
        )+
    };
}

// ============================================================================
// Scalars
// ============================================================================

macro_rules! extract_as_i64 {
    ($($ty:ty),+) => {
        $(
            impl Extract for $ty {
                fn extract_with(&self, _cx: &Context<'_>) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn zero_json(&self) -> serde_json::Value {
                    serde_json::Value::from(0)
                }
            }
        )+
    };
}

macro_rules! extract_as_u64 {
    ($($ty:ty),+) => {
        $(
            impl Extract for $ty {
                fn extract_with(&self, _cx: &Context<'_>) -> Value {
                    Value::UInt(u64::from(*self))
                }

                fn zero_json(&self) -> serde_json::Value {
                    serde_json::Value::from(0)
                }
            }
        )+
    };
}

extract_as_i64!(i8, i16, i32, i64, u8, u16, u32);
extract_as_u64!(u64);

impl Extract for isize {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        i64::try_from(*self).map_or_else(|_| Value::String(self.to_string()), Value::Int)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::from(0)
    }
}

impl Extract for usize {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        u64::try_from(*self).map_or_else(|_| Value::String(self.to_string()), Value::UInt)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::from(0)
    }
}

impl Extract for f32 {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        Value::Float(f64::from(*self))
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::from(0.0)
    }
}

impl Extract for f64 {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        Value::Float(*self)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::from(0.0)
    }
}

impl Extract for bool {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        if cx.is_export() {
            Value::String(cx.export().bool_label(*self).to_string())
        } else {
            Value::Bool(*self)
        }
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Bool(false)
    }
}

impl Extract for char {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        Value::String(self.to_string())
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::String(char::default().to_string())
    }
}

impl Extract for str {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        Value::String(self.to_string())
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::String(String::new())
    }
}

impl Extract for String {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        Value::String(self.clone())
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::String(String::new())
    }
}

impl Extract for () {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        Value::Null
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

impl Extract for Value {
    fn extract_with(&self, _cx: &Context<'_>) -> Value {
        self.clone()
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

// ============================================================================
// Temporal values
// ============================================================================

impl<Tz: TimeZone> Extract for DateTime<Tz> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        let utc = self.with_timezone(&Utc);
        if cx.is_export() {
            cx.format_date(utc.format(&cx.export().date_format), || {
                utc.date_naive().to_string()
            })
        } else {
            Value::Time(utc)
        }
    }

    fn zero_json(&self) -> serde_json::Value {
        Value::Time(DateTime::<Utc>::default()).to_json()
    }
}

impl Extract for NaiveDateTime {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        self.and_utc().extract_with(cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        naive_json(&NaiveDateTime::default())
    }

    // Serde reads a `NaiveDateTime` without the UTC designator
    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        if cx.is_export() {
            self.extract_with(cx).to_json()
        } else {
            naive_json(self)
        }
    }
}

fn naive_json(value: &NaiveDateTime) -> serde_json::Value {
    serde_json::Value::String(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

impl Extract for NaiveDate {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        if cx.is_export() {
            cx.format_date(self.format(&cx.export().date_format), || self.to_string())
        } else {
            Value::Date(*self)
        }
    }

    fn zero_json(&self) -> serde_json::Value {
        Value::Date(NaiveDate::default()).to_json()
    }
}

// ============================================================================
// Nullable and pointer-like wrappers
// ============================================================================

impl<T: Extract> Extract for Option<T> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        match self {
            Some(value) => value.extract_with(cx),
            None => Value::Null,
        }
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        match self {
            Some(value) => value.clean_json(cx),
            None => serde_json::Value::Null,
        }
    }
}

impl<T: Extract + ?Sized> Extract for &T {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        (**self).extract_with(cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        (**self).zero_json()
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        (**self).clean_json(cx)
    }
}

impl<T: Extract + ?Sized> Extract for Box<T> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        (**self).extract_with(cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        (**self).zero_json()
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        (**self).clean_json(cx)
    }
}

impl<T: Extract + ?Sized> Extract for Rc<T> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        (**self).extract_with(cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        (**self).zero_json()
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        (**self).clean_json(cx)
    }
}

impl<T: Extract + ?Sized> Extract for Arc<T> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        (**self).extract_with(cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        (**self).zero_json()
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        (**self).clean_json(cx)
    }
}

// ============================================================================
// Ordered collections
// ============================================================================

fn extract_seq<'a, T, I>(items: I, cx: &Context<'_>) -> Value
where
    T: Extract + 'a,
    I: IntoIterator<Item = &'a T>,
{
    Value::Seq(items.into_iter().map(|item| item.extract_with(cx)).collect())
}

fn clean_seq<'a, T, I>(items: I, cx: &Context<'_>) -> serde_json::Value
where
    T: Extract + 'a,
    I: IntoIterator<Item = &'a T>,
{
    serde_json::Value::Array(items.into_iter().map(|item| item.clean_json(cx)).collect())
}

impl<T: Extract> Extract for [T] {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        extract_seq(self, cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::new())
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        clean_seq(self, cx)
    }
}

impl<T: Extract, const N: usize> Extract for [T; N] {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        extract_seq(self, cx)
    }

    // Fixed-size arrays decode only from exactly `N` elements
    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.iter().map(Extract::zero_json).collect())
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        clean_seq(self, cx)
    }
}

impl<T: Extract> Extract for Vec<T> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        extract_seq(self, cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::new())
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        clean_seq(self, cx)
    }
}

impl<T: Extract> Extract for VecDeque<T> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        extract_seq(self, cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::new())
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        clean_seq(self, cx)
    }
}

// ============================================================================
// Associative containers
// ============================================================================

fn extract_entries<'a, K, V, I>(entries: I, cx: &Context<'_>) -> Value
where
    K: Display + 'a,
    V: Extract + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.extract_with(cx)))
            .collect(),
    )
}

fn clean_entries<'a, K, V, I>(entries: I, cx: &Context<'_>) -> serde_json::Value
where
    K: Display + 'a,
    V: Extract + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    serde_json::Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.clean_json(cx)))
            .collect(),
    )
}

impl<K: Display, V: Extract, S: BuildHasher> Extract for HashMap<K, V, S> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        extract_entries(self, cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        clean_entries(self, cx)
    }
}

impl<K: Display, V: Extract> Extract for BTreeMap<K, V> {
    fn extract_with(&self, cx: &Context<'_>) -> Value {
        extract_entries(self, cx)
    }

    fn zero_json(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }

    fn clean_json(&self, cx: &Context<'_>) -> serde_json::Value {
        clean_entries(self, cx)
    }
}
