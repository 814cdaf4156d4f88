//! The `Filter` facade.
//!
//! A [`Filter`] owns a [`FilterConfig`] and exposes the three operations:
//! extraction, reconstruction, and permission lookup through the role table.
//! It is immutable after construction, so one instance can be shared across
//! threads.
//!
//! # Usage
//!
//! ```rust
//! use fieldpex::{Action, Filter, FilterConfig};
//!
//! let config = FilterConfig::from_toml_str("[roles]\nguest = 0\nadmin = 1\n").unwrap();
//! let filter = Filter::new(config);
//!
//! let admin = filter.role("admin").unwrap();
//! let value = filter.extract(&vec![1, 2, 3], &admin, Action::Read);
//! assert_eq!(value.as_seq().map(<[_]>::len), Some(3));
//! ```

use crate::error::Result;
use crate::extract::{Context, Extract};
use crate::reconstruct::rebuild;
use fieldpex_core::{Action, FilterConfig, Role, Value};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Field filter bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    config: FilterConfig,
}

impl Filter {
    /// Creates a filter from a configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Creates a filter from a TOML configuration file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(FilterConfig::load(path)?))
    }

    /// The filter's configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Resolves a role name through the configured role table.
    pub fn role(&self, name: &str) -> Result<Role> {
        Ok(self.config.role(name)?)
    }

    /// Builds an extraction context for one call.
    pub fn context<'a>(&'a self, role: &'a Role, action: Action) -> Context<'a> {
        Context::new(role, action, &self.config.export)
    }

    /// Extracts the fields of `value` that `role` may access for `action`.
    pub fn extract<T: Extract + ?Sized>(&self, value: &T, role: &Role, action: Action) -> Value {
        value.extract_with(&self.context(role, action))
    }

    /// Rebuilds `value` as a fresh `T` holding only the fields `role` may
    /// access for `action`; every other field is zeroed, including fields of
    /// records nested in options, sequences, and maps.
    ///
    /// The input is never modified.
    pub fn try_clean_object<T>(&self, value: &T, role: &Role, action: Action) -> Result<T>
    where
        T: Extract + Serialize + DeserializeOwned + Default,
    {
        rebuild(value.clean_json(&self.context(role, action)))
    }

    /// Like [`try_clean_object`](Self::try_clean_object), but yields `None`
    /// instead of an error when the filtered value cannot be rebuilt.
    pub fn clean_object<T>(&self, value: &T, role: &Role, action: Action) -> Option<T>
    where
        T: Extract + Serialize + DeserializeOwned + Default,
    {
        match self.try_clean_object(value, role, action) {
            Ok(cleaned) => Some(cleaned),
            Err(e) => {
                log::warn!("Dropping filtered value: {e}");
                None
            }
        }
    }

    /// Rebuilds every element of `values`; `None` if any element fails.
    pub fn clean_slice<T>(&self, values: &[T], role: &Role, action: Action) -> Option<Vec<T>>
    where
        T: Extract + Serialize + DeserializeOwned + Default,
    {
        log::debug!(
            "Cleaning {} values for role {role} ({action})",
            values.len()
        );
        values
            .iter()
            .map(|value| self.clean_object(value, role, action))
            .collect()
    }
}

/// Extracts `value` using the default configuration.
pub fn extract<T: Extract + ?Sized>(value: &T, role: &Role, action: Action) -> Value {
    Filter::default().extract(value, role, action)
}

/// Rebuilds `value` using the default configuration, `None` on failure.
pub fn clean_object<T>(value: &T, role: &Role, action: Action) -> Option<T>
where
    T: Extract + Serialize + DeserializeOwned + Default,
{
    Filter::default().clean_object(value, role, action)
}

/// Rebuilds `value` using the default configuration.
pub fn try_clean_object<T>(value: &T, role: &Role, action: Action) -> Result<T>
where
    T: Extract + Serialize + DeserializeOwned + Default,
{
    Filter::default().try_clean_object(value, role, action)
}

/// Rebuilds each element of `values` using the default configuration.
pub fn clean_slice<T>(values: &[T], role: &Role, action: Action) -> Option<Vec<T>>
where
    T: Extract + Serialize + DeserializeOwned + Default,
{
    Filter::default().clean_slice(values, role, action)
}
