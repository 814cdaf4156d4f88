//! Permission specifiers and lookup.
//!
//! A field's permission specifier is a short string stored in its field
//! table. Two encodings are accepted and told apart by shape:
//!
//! - **Positional** (canonical): one digit per role index, e.g. `"0133"`.
//!   Role 0 has no access, role 1 may read, roles 2 and 3 may read and write.
//!   Digits: `0` none, `1` read, `2` write, `3` read/write.
//! - **Keyed**: comma-separated `role:flags` pairs, e.g. `"admin:rw,user:r"`.
//!   Flags are a subset of `r` and `w`. Roles that are not listed have no
//!   access. Any specifier containing a `:` is keyed.
//!
//! An empty specifier grants every role every action. Anything malformed
//! (an out-of-range index, a non-digit, a role without a name under the keyed
//! encoding) denies.
//!
//! # Usage
//!
//! ```rust
//! use fieldpex_core::{has_permission, Action, Role};
//!
//! let user = Role::named(1, "user");
//!
//! assert!(has_permission("", &user, Action::Write));
//! assert!(has_permission("01", &user, Action::Read));
//! assert!(!has_permission("01", &user, Action::Write));
//! assert!(has_permission("admin:rw,user:r", &user, Action::Export));
//! ```

use crate::action::{Action, Permission};
use crate::role::Role;

/// A parsed view over a permission specifier string.
///
/// Borrowing, so parsing on every field visit does not allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSpec<'a> {
    /// Empty specifier: everything is allowed.
    Unrestricted,
    /// One digit per role index.
    Positional(&'a str),
    /// `role:flags` pairs.
    Keyed(&'a str),
}

impl<'a> PermissionSpec<'a> {
    /// Classifies a specifier string.
    pub fn parse(spec: &'a str) -> Self {
        let spec = spec.trim();
        if spec.is_empty() {
            PermissionSpec::Unrestricted
        } else if spec.contains(':') {
            PermissionSpec::Keyed(spec)
        } else {
            PermissionSpec::Positional(spec)
        }
    }

    /// Returns `true` for the empty specifier.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, PermissionSpec::Unrestricted)
    }

    /// The permission level `role` holds under this specifier.
    ///
    /// `Unrestricted` reports `ReadWrite`. Unknown roles report `None`.
    pub fn level(&self, role: &Role) -> Permission {
        match self {
            PermissionSpec::Unrestricted => Permission::ReadWrite,
            PermissionSpec::Positional(digits) => digits
                .chars()
                .nth(role.index())
                .and_then(Permission::from_digit)
                .unwrap_or(Permission::None),
            PermissionSpec::Keyed(pairs) => {
                let Some(name) = role.name() else {
                    return Permission::None;
                };
                pairs
                    .split(',')
                    .filter_map(|pair| pair.split_once(':'))
                    .find(|(key, _)| key.trim() == name)
                    .map(|(_, flags)| Permission::from_flags(flags.trim()))
                    .unwrap_or(Permission::None)
            }
        }
    }

    /// Whether `role` may perform `action`.
    pub fn allows(&self, role: &Role, action: Action) -> bool {
        self.level(role).allows(action)
    }
}

/// Decide whether `role` may perform `action` on a field tagged with `spec`.
///
/// Pure and total: never panics, never errors.
pub fn has_permission(spec: &str, role: &Role, action: Action) -> bool {
    PermissionSpec::parse(spec).allows(role, action)
}
