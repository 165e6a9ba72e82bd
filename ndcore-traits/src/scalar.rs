//! Scalar type bounds for array storage.

/// Anything an array can hold.
///
/// Elements are plain values: copied in and out of shared buffers, never
/// borrowed across a mutation. `Default` stands in for the unspecified
/// contents of `empty` arrays.
pub trait Element: Copy + Default + std::fmt::Debug + 'static {}

impl<T> Element for T where T: Copy + Default + std::fmt::Debug + 'static {}
