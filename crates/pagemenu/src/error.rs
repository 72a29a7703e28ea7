#![forbid(unsafe_code)]

//! Errors reported by the paging machine.

use std::fmt;

use pagemenu_core::{InvalidItemError, ItemKey};
use pagemenu_layout::OptionsError;

/// A rejected paging operation.
///
/// Every variant leaves the machine exactly as it was before the call.
#[derive(Debug, Clone, PartialEq)]
pub enum PagingError {
    /// The replacement collection failed validation.
    InvalidItem(InvalidItemError),
    /// The selection target is not in the current collection.
    OutOfRangeSelection { key: ItemKey },
    /// The replacement options failed validation.
    InvalidOptions(OptionsError),
}

impl fmt::Display for PagingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItem(err) => write!(f, "invalid item collection: {err}"),
            Self::OutOfRangeSelection { key } => {
                write!(f, "cannot select item {key}: not in the current collection")
            }
            Self::InvalidOptions(err) => write!(f, "invalid paging options: {err}"),
        }
    }
}

impl std::error::Error for PagingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidItem(err) => Some(err),
            Self::InvalidOptions(err) => Some(err),
            Self::OutOfRangeSelection { .. } => None,
        }
    }
}

impl From<InvalidItemError> for PagingError {
    fn from(err: InvalidItemError) -> Self {
        Self::InvalidItem(err)
    }
}

impl From<OptionsError> for PagingError {
    fn from(err: OptionsError) -> Self {
        Self::InvalidOptions(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_and_source() {
        let inner = InvalidItemError::DuplicateKey {
            key: ItemKey::new(3),
            first: 0,
            second: 2,
        };
        let err = PagingError::from(inner);
        assert!(err.to_string().starts_with("invalid item collection: "));
        assert!(err.source().is_some());

        let err = PagingError::OutOfRangeSelection {
            key: ItemKey::new(9),
        };
        assert_eq!(
            err.to_string(),
            "cannot select item #9: not in the current collection"
        );
        assert!(err.source().is_none());
    }
}
