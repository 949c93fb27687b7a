//! Compute-once cell backing every lazily derived array.

use std::cell::OnceCell;
use std::fmt;

/// Cell that moves from unpopulated to populated exactly once.
///
/// Failed initializations leave the cell unpopulated, so a later call retries the
/// computation. The cell is `!Sync`: one accessor belongs to one thread at a
/// time.
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_populated(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns the cached value, running `init` first if the cell is still empty.
    ///
    /// # Arguments
    ///
    /// * `init` - Fallible computation producing the value.
    ///
    /// # Returns
    ///
    /// A reference to the cached value, or the error returned by `init`.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        let value = init()?;
        Ok(self.cell.get_or_init(|| value))
    }

    pub fn into_inner(self) -> Option<T> {
        self.cell.into_inner()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<unpopulated>)"),
        }
    }
}
