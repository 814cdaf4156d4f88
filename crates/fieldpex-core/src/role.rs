//! Caller roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity class of a caller (guest, user, admin, ...).
///
/// A role always carries its positional index, which selects a digit in a
/// positional permission specifier. It may also carry a name, which is what
/// keyed specifiers (`admin:rw,user:r`) match against. Roles are normally
/// resolved once from a [`FilterConfig`](crate::FilterConfig) role table and
/// then passed to every filter call.
///
/// # Examples
///
/// ```
/// use fieldpex_core::Role;
///
/// let admin = Role::named(2, "admin");
/// assert_eq!(admin.index(), 2);
/// assert_eq!(admin.name(), Some("admin"));
///
/// let anonymous = Role::new(0);
/// assert_eq!(anonymous.name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    index: u8,
    name: Option<String>,
}

impl Role {
    /// Creates an unnamed role with the given positional index.
    pub fn new(index: u8) -> Self {
        Self { index, name: None }
    }

    /// Creates a role with both a positional index and a name.
    pub fn named(index: u8, name: impl Into<String>) -> Self {
        Self {
            index,
            name: Some(name.into()),
        }
    }

    /// Positional index into a digit specifier.
    pub fn index(&self) -> usize {
        usize::from(self.index)
    }

    /// Role name, if one was assigned.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<u8> for Role {
    fn from(index: u8) -> Self {
        Self::new(index)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}#{}", self.index),
            None => write!(f, "#{}", self.index),
        }
    }
}
