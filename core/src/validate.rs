//! Registry validation.
//!
//! Parsing resolves colliding names silently in favour of the first
//! registration; [`FlagSet::validate`] is the opt-in registration-time
//! check that surfaces such collisions, along with descriptors that carry
//! no name at all.
//!
//! # Examples
//!
//! ```
//! use cliflag_core::{FlagSet, RegistryError};
//!
//! let mut flags = FlagSet::new("prog");
//! flags.switch(Some('v'), Some("verbose"), "verbose output");
//! assert!(flags.validate().is_empty());
//!
//! flags.switch(Some('v'), None, "a second -v");
//! let errors = flags.validate();
//! assert_eq!(errors, vec![RegistryError::DuplicateShortFlag('v')]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::FlagSet;

/// Structural problem in a flag registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A non-group descriptor has neither a short nor a long name.
    #[error("flag must define a short or long name")]
    MissingFlagName,
    /// Two descriptors share a short name; only the first ever matches.
    #[error("duplicate short flag: -{0}")]
    DuplicateShortFlag(char),
    /// Two descriptors share a long name; only the first ever matches.
    #[error("duplicate long flag: --{0}")]
    DuplicateLongFlag(String),
}

impl FlagSet {
    /// Checks the registry for unnamed descriptors and duplicate names.
    ///
    /// Returns every problem found, in registration order. An empty vector
    /// means the registry is unambiguous.
    pub fn validate(&self) -> Vec<RegistryError> {
        let mut errors = Vec::new();
        let mut seen_short: HashSet<char> = HashSet::new();
        let mut seen_long: HashSet<&str> = HashSet::new();

        for spec in self.flags() {
            if spec.is_group() {
                continue;
            }
            if spec.short.is_none() && spec.long.is_none() {
                errors.push(RegistryError::MissingFlagName);
                continue;
            }
            if let Some(short) = spec.short {
                if !seen_short.insert(short) {
                    errors.push(RegistryError::DuplicateShortFlag(short));
                }
            }
            if let Some(long) = spec.long.as_deref() {
                if !seen_long.insert(long) {
                    errors.push(RegistryError::DuplicateLongFlag(long.to_string()));
                }
            }
        }

        errors
    }
}
