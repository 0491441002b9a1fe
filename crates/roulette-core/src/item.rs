//! Item model and list validation.
//!
//! An [`Item`] is one selectable choice: a label and a positive integer
//! weight controlling its relative selection probability. Identity is
//! positional; the store assigns a surrogate row id used only for
//! ordering, which is never exposed on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single weighted choice on the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display label for the item. Must be non-blank.
    pub label: String,

    /// Relative selection weight. Must be >= 1; the type already rules
    /// out negative values.
    pub weight: u32,
}

impl Item {
    /// Creates a new item.
    #[must_use]
    pub fn new(label: impl Into<String>, weight: u32) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

/// Errors for a rejected replacement list.
///
/// These map to HTTP 400 at the server boundary: the client sent a list
/// that can never be stored, so nothing is written.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The replacement list is empty.
    #[error("items list must not be empty")]
    Empty,

    /// An item has a blank label.
    #[error("item at index {index} has a blank label")]
    BlankLabel {
        /// Zero-based position of the offending item.
        index: usize,
    },

    /// An item has weight zero.
    #[error("item '{label}' at index {index} has weight 0 (must be >= 1)")]
    ZeroWeight {
        /// Zero-based position of the offending item.
        index: usize,
        /// Label of the offending item.
        label: String,
    },
}

/// Validates a replacement list against the store invariants.
///
/// The list must be non-empty, every label non-blank, and every weight
/// >= 1. The first violation found (in list order) is reported.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing the first invalid entry.
pub fn validate_items(items: &[Item]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::Empty);
    }

    for (index, item) in items.iter().enumerate() {
        if item.label.trim().is_empty() {
            return Err(ValidationError::BlankLabel { index });
        }
        if item.weight < 1 {
            return Err(ValidationError::ZeroWeight {
                index,
                label: item.label.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_list_passes() {
        let items = vec![Item::new("hotpot", 30), Item::new("salad", 15)];
        assert!(validate_items(&items).is_ok());
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(validate_items(&[]), Err(ValidationError::Empty));
    }

    #[test]
    fn zero_weight_is_rejected_with_position() {
        let items = vec![Item::new("hotpot", 30), Item::new("salad", 0)];
        assert_eq!(
            validate_items(&items),
            Err(ValidationError::ZeroWeight {
                index: 1,
                label: "salad".to_string(),
            })
        );
    }

    #[test]
    fn blank_label_is_rejected() {
        let items = vec![Item::new("   ", 5)];
        assert_eq!(
            validate_items(&items),
            Err(ValidationError::BlankLabel { index: 0 })
        );
    }

    #[test]
    fn item_wire_format_uses_label_and_weight_fields() {
        let json = serde_json::to_string(&Item::new("noodles", 20)).unwrap();
        assert_eq!(json, r#"{"label":"noodles","weight":20}"#);

        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Item::new("noodles", 20));
    }
}
