//! Actions and permission levels.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The operation a caller intends to perform on a record.
///
/// `Export` is permission-checked exactly like `Read`; it differs only in
/// which name tag is used and how dates and booleans are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Reading a field.
    Read,
    /// Writing a field.
    Write,
    /// Reading a field for a human-facing export.
    Export,
}

impl Action {
    /// All actions, in code order.
    pub const ALL: [Action; 3] = [Action::Read, Action::Write, Action::Export];

    /// Numeric code used by older callers: 0 read, 1 write, 2 export.
    pub fn code(self) -> u8 {
        match self {
            Action::Read => 0,
            Action::Write => 1,
            Action::Export => 2,
        }
    }

    /// Looks up an action by its numeric code.
    ///
    /// Unknown codes are rejected rather than treated as "allow".
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Action::Read),
            1 => Ok(Action::Write),
            2 => Ok(Action::Export),
            other => Err(Error::InvalidAction(other.to_string())),
        }
    }

    /// Returns `true` for actions that read field values (Read, Export).
    pub fn is_read_like(self) -> bool {
        matches!(self, Action::Read | Action::Export)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Write => write!(f, "write"),
            Action::Export => write!(f, "export"),
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Action::from_code(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "read" => Ok(Action::Read),
            "write" => Ok(Action::Write),
            "export" => Ok(Action::Export),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// Permission level a role holds on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Permission {
    /// No access.
    #[default]
    None,
    /// Read (and export) only.
    Read,
    /// Write only.
    Write,
    /// Read, write and export.
    ReadWrite,
}

impl Permission {
    /// Decodes a positional digit: `'0'`..=`'3'`.
    ///
    /// Any other character yields `None`, which the lookup treats as no
    /// access.
    pub fn from_digit(c: char) -> Option<Self> {
        match (c as u32).checked_sub('0' as u32)? {
            0 => Some(Permission::None),
            1 => Some(Permission::Read),
            2 => Some(Permission::Write),
            3 => Some(Permission::ReadWrite),
            _ => None,
        }
    }

    /// The positional digit for this level.
    pub fn as_digit(self) -> char {
        match self {
            Permission::None => '0',
            Permission::Read => '1',
            Permission::Write => '2',
            Permission::ReadWrite => '3',
        }
    }

    /// Builds a level from keyed flags such as `"r"`, `"w"` or `"rw"`.
    pub fn from_flags(flags: &str) -> Self {
        let read = flags.contains('r');
        let write = flags.contains('w');
        match (read, write) {
            (true, true) => Permission::ReadWrite,
            (true, false) => Permission::Read,
            (false, true) => Permission::Write,
            (false, false) => Permission::None,
        }
    }

    /// Whether this level permits `action`.
    pub fn allows(self, action: Action) -> bool {
        match action {
            Action::Read | Action::Export => {
                matches!(self, Permission::Read | Permission::ReadWrite)
            }
            Action::Write => matches!(self, Permission::Write | Permission::ReadWrite),
        }
    }
}
