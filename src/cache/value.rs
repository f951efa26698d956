//! Value Module
//!
//! Defines the size capability every cached value must expose.

use std::rc::Rc;
use std::sync::Arc;

// == Value Trait ==
/// A value whose footprint can be accounted against the cache ceiling.
///
/// `size` must be deterministic for the lifetime of the value. A value that
/// reports different sizes on insert and on removal breaks the cache's byte
/// accounting; this is not detected.
pub trait Value {
    /// Size of the value in abstract units (bytes for the built-in impls).
    fn size(&self) -> usize;
}

impl Value for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for &str {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Box<str> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Rc<str> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Arc<str> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Box<[u8]> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Arc<[u8]> {
    fn size(&self) -> usize {
        self.len()
    }
}
