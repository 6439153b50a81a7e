//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: two value objects with the same values are
//! considered equal. An item code is one: `"AB12"` and `"ab12"` normalize to the
//! same value and are therefore the same code.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ItemCode(String);
///
/// impl ValueObject for ItemCode {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
