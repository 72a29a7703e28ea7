#![forbid(unsafe_code)]

//! Ingestion errors for item collections.

use std::fmt;

use crate::item::ItemKey;

/// A collection could not be accepted.
///
/// Raised once at ingestion; the caller keeps its previous collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidItemError {
    /// Two distinct positions carry the same key.
    DuplicateKey {
        key: ItemKey,
        first: usize,
        second: usize,
    },
}

impl InvalidItemError {
    /// The offending key.
    #[must_use]
    pub const fn key(&self) -> ItemKey {
        match self {
            Self::DuplicateKey { key, .. } => *key,
        }
    }
}

impl fmt::Display for InvalidItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key, first, second } => write!(
                f,
                "duplicate item key {key} at positions {first} and {second}"
            ),
        }
    }
}

impl std::error::Error for InvalidItemError {}
