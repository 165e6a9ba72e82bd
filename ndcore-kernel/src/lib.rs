//! Map and reduce operations over ndcore arrays.
//!
//! # Modules
//!
//! - [`map`]: lift scalar closures over one, two or three arrays, with
//!   NumPy broadcasting for the multi-operand forms
//! - [`ops`]: named operations looked up in the element type's
//!   [`OpTable`](ndcore_traits::OpTable), plus `add`/`sub`/`mul`/`div`
//! - [`reduce`]: full reductions to a single value
//! - [`axis`]: reductions and scans along one axis
//!
//! All functions read their inputs in row-major logical order, so they work
//! on any view (transposed, sliced, broadcast) without copying it first.
//!
//! # Example
//!
//! ```rust
//! use ndcore_kernel::{cumsum_axis, sum, zip_map2};
//! use ndcore_view::NdArray;
//!
//! let a = NdArray::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
//! let b = NdArray::from_vec(vec![10, 20]);
//! let c = zip_map2(&a, &b, |x, y| x + y).unwrap();
//! assert_eq!(c.to_vec(), vec![11, 22, 13, 24]);
//! assert_eq!(sum(&c), 70);
//! assert_eq!(cumsum_axis(&a, 0).unwrap().to_vec(), vec![1, 2, 4, 6]);
//! ```

pub mod axis;
pub mod map;
pub mod ops;
pub mod reduce;

pub use axis::{
    cumprod_axis, cumsum_axis, fold_axis, max_axis, min_axis, prod_axis, reduce_axis,
    reduce_axis_with, scan_axis, sum_axis,
};
pub use map::{map, map_into, map_scalar, zip_map2, zip_map2_into, zip_map3};
pub use ops::{add, apply_binary, apply_compare, apply_unary, div, maximum, minimum, mul, sub};
pub use reduce::{all, any, cumsum, max, mean, min, prod, reduce, reduce_with, sum};
