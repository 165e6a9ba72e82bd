//! Axis permutation and contiguous copies.
//!
//! This crate sits between `ndcore-view` (data structures) and
//! `ndcore-kernel` (map/reduce over arrays). Every function here produces a
//! freshly allocated row-major array or writes into a caller-provided one;
//! for a zero-copy permutation use [`NdArray::permuted`](ndcore_view::NdArray::permuted).
//!
//! # Dependency graph
//!
//! ```text
//! ndcore-view -> ndcore-perm -> ndcore-kernel -> ndcore
//! ```
//!
//! # Example
//!
//! ```rust
//! use ndcore_perm::transpose_axes;
//! use ndcore_view::NdArray;
//!
//! let a = NdArray::from_shape_vec([2, 3, 4], (0..24).collect()).unwrap();
//! let t = transpose_axes(&a, &[2, 0, 1]).unwrap();
//! assert_eq!(t.dims(), &[4, 2, 3]);
//! assert_eq!(t.get(&[3, 1, 2]), a.get(&[1, 2, 3]));
//! ```

pub mod copy;
pub mod transpose;

pub use copy::{ascontiguous, copy_into, flatten};
pub use transpose::{transpose, transpose_axes};
