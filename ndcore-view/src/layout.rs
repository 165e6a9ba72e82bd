//! Shape/stride descriptors.
//!
//! A [`Layout`] holds the extents of each axis and the number of buffer
//! elements to skip per unit step along it. Arrays built by constructors are
//! row-major contiguous (`strides[N-1] == 1`, `strides[i] == strides[i+1] *
//! dims[i+1]`); views may carry any strides, including 0 for broadcast axes.

use smallvec::SmallVec;

use crate::{NdError, Result, MAX_INLINE_RANK};

/// Extents, outer to inner.
pub type Dims = SmallVec<[usize; MAX_INLINE_RANK]>;

/// Strides in elements, one per axis.
pub type Strides = SmallVec<[isize; MAX_INLINE_RANK]>;

// ============================================================================
// Stride helpers
// ============================================================================

/// Compute row-major strides (C default: last index varies fastest).
pub fn row_major_strides(dims: &[usize]) -> Strides {
    let rank = dims.len();
    if rank == 0 {
        return Strides::new();
    }
    let mut strides: Strides = SmallVec::from_elem(1isize, rank);
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1] as isize;
    }
    strides
}

/// Check that `perm` is a bijection on `0..rank`.
pub fn validate_permutation(perm: &[usize], rank: usize) -> Result<()> {
    if perm.len() != rank {
        return Err(NdError::RankMismatch(perm.len(), rank));
    }
    let mut seen: SmallVec<[bool; MAX_INLINE_RANK]> = SmallVec::from_elem(false, rank);
    for &p in perm {
        if p >= rank {
            return Err(NdError::InvalidAxis { axis: p, rank });
        }
        if seen[p] {
            return Err(NdError::DuplicateAxis { axis: p });
        }
        seen[p] = true;
    }
    Ok(())
}

/// Broadcast two shapes following NumPy rules.
///
/// Shapes are right-aligned; along each axis the extents must agree or one
/// of them must be 1.
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> Result<Dims> {
    let rank = a.len().max(b.len());
    let mut out: Dims = SmallVec::from_elem(1, rank);
    for i in 0..rank {
        let da = if i < rank - a.len() { 1 } else { a[i - (rank - a.len())] };
        let db = if i < rank - b.len() { 1 } else { b[i - (rank - b.len())] };
        out[i] = if da == db || db == 1 {
            da
        } else if da == 1 {
            db
        } else {
            return Err(NdError::ShapeMismatch(a.to_vec(), b.to_vec()));
        };
    }
    Ok(out)
}

/// Validate that every offset a view can reach stays within `[0, len)`.
pub(crate) fn validate_bounds(
    len: usize,
    dims: &[usize],
    strides: &[isize],
    offset: usize,
) -> Result<()> {
    if dims.len() != strides.len() {
        return Err(NdError::RankMismatch(dims.len(), strides.len()));
    }
    // Empty array - no access needed
    if dims.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let offset = isize::try_from(offset).map_err(|_| NdError::OffsetOverflow)?;
    let mut min_offset = offset;
    let mut max_offset = offset;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(NdError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(NdError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(NdError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 || max_offset as usize >= len {
        return Err(NdError::OutOfBuffer { len });
    }
    Ok(())
}

// ============================================================================
// Layout
// ============================================================================

/// Dims and strides of an array. The rank never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    dims: Dims,
    strides: Strides,
}

impl Layout {
    /// Row-major contiguous layout for `dims`.
    pub fn row_major(dims: &[usize]) -> Self {
        Self {
            dims: Dims::from_slice(dims),
            strides: row_major_strides(dims),
        }
    }

    /// Layout with explicit strides.
    pub fn new(dims: &[usize], strides: &[isize]) -> Result<Self> {
        if dims.len() != strides.len() {
            return Err(NdError::RankMismatch(dims.len(), strides.len()));
        }
        Ok(Self {
            dims: Dims::from_slice(dims),
            strides: Strides::from_slice(strides),
        })
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of logical elements (1 for rank 0).
    #[inline]
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    /// Whether the layout is row-major contiguous.
    ///
    /// Axes of extent 1 never move the address, so their strides are ignored.
    pub fn is_contiguous(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut expected = 1isize;
        for (&d, &s) in self.dims.iter().rev().zip(self.strides.iter().rev()) {
            if d <= 1 {
                continue;
            }
            if s != expected {
                return false;
            }
            expected = expected.saturating_mul(d as isize);
        }
        true
    }

    /// Offset of `index` relative to the array's base offset. No bounds check.
    #[inline]
    pub fn offset_of(&self, index: &[usize]) -> isize {
        index
            .iter()
            .zip(self.strides.iter())
            .map(|(&i, &s)| i as isize * s)
            .sum()
    }

    /// Offset of `index`, checked against rank and extents.
    pub fn checked_offset_of(&self, index: &[usize]) -> Result<isize> {
        if index.len() != self.dims.len() {
            return Err(NdError::RankMismatch(index.len(), self.dims.len()));
        }
        if index.iter().zip(self.dims.iter()).any(|(&i, &d)| i >= d) {
            return Err(NdError::IndexOutOfBounds {
                index: index.to_vec(),
                dims: self.dims.to_vec(),
            });
        }
        Ok(self.offset_of(index))
    }

    /// Permute axes: axis `k` of the result is axis `perm[k]` of `self`.
    pub fn permuted(&self, perm: &[usize]) -> Result<Self> {
        validate_permutation(perm, self.ndim())?;
        Ok(Self {
            dims: perm.iter().map(|&p| self.dims[p]).collect(),
            strides: perm.iter().map(|&p| self.strides[p]).collect(),
        })
    }

    /// Drop `axis`, keeping the remaining axes in order.
    pub fn without_axis(&self, axis: usize) -> Result<Self> {
        let rank = self.ndim();
        if axis >= rank {
            return Err(NdError::InvalidAxis { axis, rank });
        }
        Ok(self.drop_axis(axis))
    }

    /// [`Layout::without_axis`] for an `axis` already known to be in range.
    pub(crate) fn drop_axis(&self, axis: usize) -> Self {
        let mut dims = self.dims.clone();
        let mut strides = self.strides.clone();
        dims.remove(axis);
        strides.remove(axis);
        Self { dims, strides }
    }

    /// Stretch to `target` dims: missing leading axes and size-1 axes get
    /// stride 0.
    pub fn broadcast_to(&self, target: &[usize]) -> Result<Self> {
        let rank = target.len();
        if self.ndim() > rank {
            return Err(NdError::ShapeMismatch(self.dims.to_vec(), target.to_vec()));
        }
        let lead = rank - self.ndim();
        let mut strides: Strides = SmallVec::from_elem(0, rank);
        for i in 0..self.ndim() {
            let d = self.dims[i];
            if d == target[lead + i] {
                strides[lead + i] = self.strides[i];
            } else if d != 1 {
                return Err(NdError::ShapeMismatch(self.dims.to_vec(), target.to_vec()));
            }
        }
        Ok(Self {
            dims: Dims::from_slice(target),
            strides,
        })
    }
}

// ============================================================================
// Shape arguments
// ============================================================================

/// Anything that names the extents of a new array.
///
/// A single `usize` is a 1-D shape; fixed-size arrays, tuples, slices and
/// vectors give one extent per element; `()` is the rank-0 shape.
pub trait IntoShape {
    fn into_shape(self) -> Dims;
}

impl IntoShape for usize {
    fn into_shape(self) -> Dims {
        smallvec::smallvec![self]
    }
}

impl IntoShape for () {
    fn into_shape(self) -> Dims {
        Dims::new()
    }
}

impl<const K: usize> IntoShape for [usize; K] {
    fn into_shape(self) -> Dims {
        Dims::from_slice(&self)
    }
}

impl<const K: usize> IntoShape for &[usize; K] {
    fn into_shape(self) -> Dims {
        Dims::from_slice(self)
    }
}

impl IntoShape for &[usize] {
    fn into_shape(self) -> Dims {
        Dims::from_slice(self)
    }
}

impl IntoShape for Vec<usize> {
    fn into_shape(self) -> Dims {
        Dims::from_vec(self)
    }
}

impl IntoShape for &Vec<usize> {
    fn into_shape(self) -> Dims {
        Dims::from_slice(self)
    }
}

impl IntoShape for Dims {
    fn into_shape(self) -> Dims {
        self
    }
}

macro_rules! impl_into_shape_tuple {
    ($($name:ident),+) => {
        impl IntoShape for ($(impl_into_shape_tuple!(@usize $name),)+) {
            #[allow(non_snake_case)]
            fn into_shape(self) -> Dims {
                let ($($name,)+) = self;
                smallvec::smallvec![$($name),+]
            }
        }
    };
    (@usize $name:ident) => { usize };
}

impl_into_shape_tuple!(A);
impl_into_shape_tuple!(A, B);
impl_into_shape_tuple!(A, B, C);
impl_into_shape_tuple!(A, B, C, D);
impl_into_shape_tuple!(A, B, C, D, E);
impl_into_shape_tuple!(A, B, C, D, E, F);
