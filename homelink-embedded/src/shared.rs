use core::cell::RefCell;

use critical_section::Mutex;

use crate::error::{Error, Result};

/// A node controller shared between interrupt handlers.
///
/// Meant to live in a `static`; `main` installs the node once peripherals
/// are configured and every handler reaches it through [`SharedNode::with`].
pub struct SharedNode<N> {
    inner: Mutex<RefCell<Option<N>>>,
}

impl<N> SharedNode<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Stores the node, returning any previously installed one.
    pub fn install(&self, node: N) -> Option<N> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(node))
    }

    pub fn take(&self) -> Option<N> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Runs `f` on the node inside a critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut N) -> R) -> Result<R> {
        critical_section::with(|cs| {
            let mut node = self.inner.borrow_ref_mut(cs);
            node.as_mut().map(f).ok_or(Error::NotStarted)
        })
    }
}

impl<N> Default for SharedNode<N> {
    fn default() -> Self {
        Self::new()
    }
}
