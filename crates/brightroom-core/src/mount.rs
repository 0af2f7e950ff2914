//! Registry of containers that currently host an editor.
//!
//! A container may host at most one editor. Claims are RAII guards: the
//! container is released when the [`Claim`] is dropped, on every exit path,
//! so a skipped `unmount` cannot leak a claim past the editor's lifetime.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{EditorError, Result};

/// Shared set of claimed container keys.
///
/// Keys are compared with `PartialEq`; for DOM elements that is object
/// identity. Cloning the registry shares the same underlying set.
pub struct ClaimRegistry<K> {
    claimed: Rc<RefCell<Vec<K>>>,
}

impl<K> Clone for ClaimRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            claimed: Rc::clone(&self.claimed),
        }
    }
}

impl<K> Default for ClaimRegistry<K> {
    fn default() -> Self {
        Self {
            claimed: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<K: PartialEq + Clone> ClaimRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for the caller.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::AlreadyMounted` if another claim holds `key`.
    pub fn claim(&self, key: K) -> Result<Claim<K>> {
        let mut claimed = self.claimed.borrow_mut();
        if claimed.contains(&key) {
            return Err(EditorError::AlreadyMounted);
        }
        claimed.push(key.clone());
        Ok(Claim {
            key,
            registry: self.clone(),
        })
    }

    pub fn is_claimed(&self, key: &K) -> bool {
        self.claimed.borrow().contains(key)
    }

    pub fn len(&self) -> usize {
        self.claimed.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.borrow().is_empty()
    }

    fn release(&self, key: &K) {
        self.claimed.borrow_mut().retain(|k| k != key);
    }
}

/// Proof that a container is held; releases it on drop.
pub struct Claim<K: PartialEq + Clone> {
    key: K,
    registry: ClaimRegistry<K>,
}

impl<K: PartialEq + Clone> Claim<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Whether this claim is for `key`.
    pub fn holds(&self, key: &K) -> bool {
        self.key == *key
    }
}

impl<K: PartialEq + Clone> Drop for Claim<K> {
    fn drop(&mut self) {
        self.registry.release(&self.key);
    }
}

impl<K: PartialEq + Clone + fmt::Debug> fmt::Debug for Claim<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claim").field("key", &self.key).finish()
    }
}
