//! fieldpex Core — roles, actions, permission specifiers, and the extracted
//! value tree.
//!
//! This crate provides the foundational types used by the `fieldpex` field
//! filter. It has no internal fieldpex dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`action`]: `Action` and `Permission`
//! - [`config`]: TOML-loadable role table and export formatting
//! - [`error`]: Error types and Result alias
//! - [`names`]: Serialized-name tag resolution
//! - [`permission`]: Permission specifier parsing and lookup
//! - [`role`]: Caller roles
//! - [`value`]: The `Value` tree produced by extraction

#![doc = include_str!("../README.md")]

pub mod action;
pub mod config;
pub mod error;
pub mod names;
pub mod permission;
pub mod role;
pub mod value;

mod proptests;

// Re-export key types at crate root for convenience
pub use action::{Action, Permission};
pub use config::{ExportConfig, FilterConfig};
pub use error::{Error, Result};
pub use names::{OMIT_SENTINEL, field_display_name, resolve_field_name};
pub use permission::{PermissionSpec, has_permission};
pub use role::Role;
pub use value::{Value, ValueMap};
