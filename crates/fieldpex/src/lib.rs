//! fieldpex — field-level access control for structured records.
//!
//! Given a value, the caller's [`Role`], and an [`Action`], fieldpex produces
//! a projection holding only the fields that role may read, write, or export.
//! It is meant to sit between a data layer and a serialization boundary.
//!
//! # Modules
//!
//! - [`extract`]: The [`Extract`] trait and the record walk
//! - [`field`]: Field tables ([`FieldSpec`], [`Field`], [`Record`])
//! - [`filter`]: The [`Filter`] facade and default-config entrypoints
//! - [`reconstruct`]: Rebuilding typed values from extracted ones
//! - [`error`]: Error types and Result alias
//!
//! Roles, actions, permission lookup, and the [`Value`] tree come from
//! `fieldpex-core` and are re-exported here.

#![doc = include_str!("../README.md")]

pub mod error;
pub mod extract;
pub mod field;
pub mod filter;
pub mod reconstruct;

mod proptests;

#[doc(hidden)]
pub use serde_json;

pub use error::{Error, Result};
pub use extract::{Context, Extract, clean_record, extract_record, zero_record};
pub use field::{Field, FieldSpec, Record};
pub use filter::{Filter, clean_object, clean_slice, extract, try_clean_object};

// Re-exports from fieldpex-core
pub use fieldpex_core::{
    Action, ExportConfig, FilterConfig, Permission, PermissionSpec, Role, Value, ValueMap,
    field_display_name, has_permission,
};
