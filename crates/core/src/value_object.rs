//! Value object trait: equality by value, not identity.
//!
//! Query parameters, price ranges and pages are value objects: they are built
//! fresh per request and compared by their contents.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. That keeps them safe to hand across threads and to reuse as
/// cache keys on the caller side.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct PriceRange { min: f64, max: f64 }
///
/// impl ValueObject for PriceRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
