//! The register store: single-letter named cells holding the most recently
//! assigned value.
//!
//! One store belongs to one parsing session and persists across the
//! session's statements; independent sessions use independent stores, so no
//! synchronization is needed. Entries are created or overwritten by
//! assignment and never deleted.

use indexmap::IndexMap;
use thiserror::Error;

/// Errors that can occur when operating on [`Registers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The register has never been assigned. The grammar cannot rule this
    /// read out, and silently defaulting the value would hide the mistake,
    /// so it is a defined failure instead.
    #[error("register '{name}' read before assignment")]
    ReadBeforeWrite {
        /// The register's single-letter name.
        name: char,
    },
}

/// Mapping from register name to its last-assigned value.
///
/// # Example
/// ```rust
/// # use shiftred_calc::Registers;
/// let mut regs = Registers::new();
/// regs.set('a', 7);
/// assert_eq!(regs.get('a').unwrap(), 7);
/// regs.set('a', 2);
/// assert_eq!(regs.get('a').unwrap(), 2);
/// assert!(regs.get('b').is_err());
/// ```
#[derive(Debug, Default)]
pub struct Registers {
    regs: IndexMap<char, i64>,
}

impl Registers {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            regs: IndexMap::new(),
        }
    }

    /// Number of registers that have been assigned at least once.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Stores `value` under `name`, creating the register or overwriting
    /// its previous value. Last write wins; no history is retained.
    pub fn set(&mut self, name: char, value: i64) {
        self.regs.insert(name, value);
    }

    /// Returns the value last assigned to `name`.
    pub fn get(&self, name: char) -> Result<i64, RegisterError> {
        self.regs
            .get(&name)
            .copied()
            .ok_or(RegisterError::ReadBeforeWrite { name })
    }
}
