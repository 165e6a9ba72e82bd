//! Shared-buffer strided N-dimensional arrays.
//!
//! This crate provides the array value used by every other ndcore crate:
//!
//! - [`SharedBuffer`]: reference-counted element storage, shared by views
//! - [`Layout`]: the shape/stride descriptor (dims + strides, rank fixed at
//!   construction)
//! - [`NdArray`]: buffer handle + layout + base offset
//! - [`FlatIter`]: row-major logical traversal of any array, contiguous or not
//!
//! # View operations
//!
//! These touch only dims/strides/offset and never copy element data:
//! - `slab` / `slabs` / `slab_along`: fix one coordinate
//! - `permuted`: reorder axes
//! - `broadcast_to`: stretch size-1 axes with stride 0
//! - `reshape`: re-describe a contiguous array with new extents
//!
//! # Example
//!
//! ```rust
//! use ndcore_view::NdArray;
//!
//! let a = NdArray::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
//! let b = a.reshape([3, 2]).unwrap();
//! b.set(&[0, 0], 10);
//! assert_eq!(a.get(&[0, 0]), 10); // same buffer
//!
//! let row = a.slab(1).unwrap();
//! assert_eq!(row.to_vec(), vec![4, 5, 6]);
//! ```

mod array;
mod buffer;
mod iter;
pub mod layout;

pub use array::NdArray;
pub use buffer::SharedBuffer;
pub use iter::{FlatIter, IndexedIter, Offsets, Slabs};
pub use layout::{
    broadcast_shape, row_major_strides, validate_permutation, Dims, IntoShape, Layout, Strides,
};

/// Inline capacity of shape and stride vectors.
///
/// Arrays of up to this rank keep their descriptor on the stack; higher
/// ranks spill to the heap and keep working.
pub const MAX_INLINE_RANK: usize = 6;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array operations.
///
/// Every operation validates its arguments before allocating or writing, so
/// an error never leaves a partial result behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdError {
    /// Array ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Array shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Invalid axis index for the given array rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// An axis appears twice in a permutation.
    #[error("axis {axis} repeated in permutation")]
    DuplicateAxis { axis: usize },

    /// Multi-index outside the array extents.
    #[error("index {index:?} out of bounds for dims {dims:?}")]
    IndexOutOfBounds { index: Vec<usize>, dims: Vec<usize> },

    /// Flat data length does not match the requested extents.
    #[error("expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A view would address memory outside its buffer.
    #[error("view addresses elements outside its buffer of length {len}")]
    OutOfBuffer { len: usize },

    /// Integer overflow while computing an offset.
    #[error("offset overflow while computing element address")]
    OffsetOverflow,

    /// The operation needs a row-major contiguous array.
    #[error("array is not contiguous")]
    NotContiguous,

    /// Nested sequence whose siblings have different lengths.
    #[error("ragged nested sequence at depth {depth}")]
    RaggedSequence { depth: usize },

    /// Stacking needs at least one array to infer the element shape.
    #[error("cannot stack an empty list of arrays")]
    EmptyStack,

    /// A reduction without an identity was applied to zero elements.
    #[error("{op} of an empty sequence has no identity")]
    EmptyReduction { op: &'static str },

    /// `arange` with a zero step.
    #[error("arange step must be nonzero")]
    ZeroStep,

    /// A range whose length is not a number, e.g. spanning two infinities.
    #[error("range length is not a finite number")]
    NonFiniteRange,

    /// The requested element count cannot be allocated.
    #[error("{len} elements exceed the addressable size")]
    TooLarge { len: usize },

    /// A scalar was requested from an array holding more than one element.
    #[error("only size-1 arrays convert to a scalar, got size {size}")]
    NotAScalar { size: usize },

    /// No operation of that name (and arity) exists for the element type.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, NdError>;
