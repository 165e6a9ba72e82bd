//! Shared-buffer strided N-dimensional arrays.
//!
//! `ndcore` is the runtime array engine for code translated from an
//! array-oriented language: dense, possibly shared, possibly strided
//! multidimensional data with NumPy-flavored constructors, broadcasting
//! elementwise operations, axis reductions and transposes.
//!
//! # Core Types
//!
//! - [`NdArray`]: a view into a [`SharedBuffer`] described by a [`Layout`]
//!   (dims + strides) and a base offset. Cloning is shallow; writes through
//!   any view are visible through all views of the buffer.
//! - [`FlatIter`]: row-major logical traversal of any view
//! - [`OpTable`] / [`HasOpTable`]: name → scalar function tables
//!
//! # Primary API
//!
//! ## Constructors
//!
//! - [`zeros`], [`ones`], [`empty`], [`full`] and their `*_like` forms
//! - [`arange`], [`arange_to`], [`from_range`], [`linspace`], [`linspace_default`]
//! - [`array`]: from nested `Vec`s, arrays or slices
//!
//! ## Shape
//!
//! - [`reshape`] (zero-copy), [`flatten`], [`ascontiguous`] (copies)
//! - [`transpose`], [`transpose_axes`] (copies), [`NdArray::permuted`] (zero-copy)
//!
//! ## Map and reduce
//!
//! - [`map`], [`zip_map2`], [`zip_map3`] with broadcasting; [`apply_unary`],
//!   [`apply_binary`], [`apply_compare`] by operation name
//! - [`sum`], [`prod`], [`min`], [`max`], [`all`], [`any`], [`mean`], [`cumsum`]
//! - [`sum_axis`], [`min_axis`], [`max_axis`], [`cumsum_axis`], [`reduce_axis`],
//!   [`fold_axis`], [`scan_axis`]
//!
//! # Example
//!
//! ```rust
//! use ndcore::{array, cumsum_axis, sum_axis, transpose};
//!
//! let a = array(&vec![vec![1, 2], vec![3, 4]]).unwrap();
//! assert_eq!(sum_axis(&a, 1).unwrap().to_vec(), vec![3, 7]);
//! assert_eq!(cumsum_axis(&a, 0).unwrap().to_vec(), vec![1, 2, 4, 6]);
//! assert_eq!(transpose(&a).to_vec(), vec![1, 3, 2, 4]);
//! ```

pub mod construct;

pub use construct::{
    arange, arange_to, array, empty, empty_like, from_range, full, full_like, linspace,
    linspace_default, ones, ones_like, zeros, zeros_like, ArangeElement, ArrayLike,
    NestedSequence, LINSPACE_DEFAULT_NUM,
};

pub use ndcore_kernel::{
    add, all, any, apply_binary, apply_compare, apply_unary, cumprod_axis, cumsum, cumsum_axis,
    div, fold_axis, map, map_into, map_scalar, max, max_axis, maximum, mean, min, min_axis,
    minimum, mul, prod, prod_axis, reduce, reduce_axis, reduce_axis_with, reduce_with, scan_axis,
    sub, sum, sum_axis, zip_map2, zip_map2_into, zip_map3,
};
pub use ndcore_perm::{ascontiguous, copy_into, flatten, transpose, transpose_axes};
pub use ndcore_traits::{
    BinaryFn, CompareFn, Element, HasOpTable, Max, Min, OpTable, Prod, ReduceOp, Sum, UnaryFn,
};
pub use ndcore_view::{
    broadcast_shape, row_major_strides, Dims, FlatIter, IndexedIter, IntoShape, Layout, NdArray,
    NdError, Offsets, Result, SharedBuffer, Slabs, Strides, MAX_INLINE_RANK,
};

/// Re-describe `a` with new extents, sharing its buffer.
///
/// Fails with [`NdError::ShapeMismatch`] if the element count changes and
/// with [`NdError::NotContiguous`] for a strided source.
pub fn reshape<T: Copy>(a: &NdArray<T>, shape: impl IntoShape) -> Result<NdArray<T>> {
    a.reshape(shape)
}
