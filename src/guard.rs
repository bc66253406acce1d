//! Re-entrancy fence for programmatic buffer writes
//!
//! Writing text or color into the host is itself observable as a change
//! notification. While a `Suppressed` token is alive, the change handler
//! of the owning editor ignores notifications. The flag belongs to one
//! editor instance; clones share it so the host's event dispatch can
//! consult the same flag.

use std::cell::Cell;
use std::rc::Rc;

/// Per-editor suppression flag
#[derive(Debug, Clone, Default)]
pub struct SuppressionGuard {
    flag: Rc<Cell<bool>>,
}

impl SuppressionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether derived-state writes are in progress
    pub fn is_suppressed(&self) -> bool {
        self.flag.get()
    }

    /// Raise the flag until the returned token is dropped
    ///
    /// Nested tokens restore the state they found, so the flag only
    /// drops back to false when the outermost token goes away.
    #[must_use = "the flag is lowered as soon as the token is dropped"]
    pub fn suppress(&self) -> Suppressed {
        let previous = self.flag.replace(true);
        Suppressed {
            flag: Rc::clone(&self.flag),
            previous,
        }
    }

    /// Whether two handles share the same flag
    pub fn same_flag(&self, other: &SuppressionGuard) -> bool {
        Rc::ptr_eq(&self.flag, &other.flag)
    }
}

/// Token holding a `SuppressionGuard` raised
#[derive(Debug)]
pub struct Suppressed {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for Suppressed {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
