//! The strided array value.

use ndcore_traits::Element;
use smallvec::SmallVec;

use crate::buffer::SharedBuffer;
use crate::iter::{FlatIter, IndexedIter, Offsets, Slabs};
use crate::layout::{validate_bounds, Dims, IntoShape, Layout};
use crate::{NdError, Result};

/// An N-dimensional view into a [`SharedBuffer`].
///
/// Element `(i0, .., iN-1)` lives at `buffer[offset + Σ ik * strides[k]]`.
/// Cloning is shallow: the clone shares the buffer and sees every write made
/// through the original.
pub struct NdArray<T> {
    buffer: SharedBuffer<T>,
    layout: Layout,
    offset: usize,
}

impl<T> Clone for NdArray<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            layout: self.layout.clone(),
            offset: self.offset,
        }
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<T: Copy> NdArray<T> {
    /// A fresh row-major array with every element set to `value`.
    pub fn from_elem(shape: impl IntoShape, value: T) -> Self {
        let dims = shape.into_shape();
        let layout = Layout::row_major(&dims);
        let buffer = SharedBuffer::filled(layout.size(), value);
        Self {
            buffer,
            layout,
            offset: 0,
        }
    }

    /// A fresh row-major array from data in row-major order.
    pub fn from_shape_vec(shape: impl IntoShape, data: Vec<T>) -> Result<Self> {
        let dims = shape.into_shape();
        let layout = Layout::row_major(&dims);
        if layout.size() != data.len() {
            return Err(NdError::LengthMismatch {
                expected: layout.size(),
                actual: data.len(),
            });
        }
        Ok(Self {
            buffer: SharedBuffer::from_vec(data),
            layout,
            offset: 0,
        })
    }

    /// A 1-D array owning `data`.
    pub fn from_vec(data: Vec<T>) -> Self {
        let layout = Layout::row_major(&[data.len()]);
        Self {
            buffer: SharedBuffer::from_vec(data),
            layout,
            offset: 0,
        }
    }

    /// A rank-0 array holding `value`.
    pub fn scalar(value: T) -> Self {
        Self::from_elem((), value)
    }

    /// A fresh row-major array whose element at each multi-index is `f(index)`.
    pub fn from_fn(shape: impl IntoShape, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let dims = shape.into_shape();
        let layout = Layout::row_major(&dims);
        let mut index: Dims = SmallVec::from_elem(0, dims.len());
        let mut data = Vec::with_capacity(layout.size());
        for _ in 0..layout.size() {
            data.push(f(&index));
            for k in (0..dims.len()).rev() {
                index[k] += 1;
                if index[k] < dims[k] {
                    break;
                }
                index[k] = 0;
            }
        }
        Self {
            buffer: SharedBuffer::from_vec(data),
            layout,
            offset: 0,
        }
    }

    /// A view over an existing buffer with explicit dims, strides and offset.
    ///
    /// Fails with [`NdError::OutOfBuffer`] if any reachable address falls
    /// outside the buffer. No elements are copied.
    pub fn from_buffer(
        buffer: SharedBuffer<T>,
        dims: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self> {
        let layout = Layout::new(dims, strides)?;
        validate_bounds(buffer.len(), dims, strides, offset)?;
        Ok(Self {
            buffer,
            layout,
            offset,
        })
    }
}

impl<T: Element> NdArray<T> {
    /// A fresh array whose contents are unspecified.
    ///
    /// Callers must write every element before reading; in practice the
    /// contents are `T::default()`.
    pub fn uninit(shape: impl IntoShape) -> Self {
        Self::from_elem(shape, T::default())
    }
}

impl<T: Copy> FromIterator<T> for NdArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl<T> NdArray<T> {
    #[inline]
    pub fn buffer(&self) -> &SharedBuffer<T> {
        &self.buffer
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.layout.dims()
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Number of logical elements: the product of the extents (1 for rank 0).
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Whether both arrays view the same allocation.
    #[inline]
    pub fn shares_buffer_with(&self, other: &Self) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }

    #[inline]
    fn physical(&self, relative: isize) -> usize {
        (self.offset as isize + relative) as usize
    }
}

// ============================================================================
// Element access
// ============================================================================

impl<T: Copy> NdArray<T> {
    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index has the wrong rank or lies outside the extents.
    #[inline]
    pub fn get(&self, index: &[usize]) -> T {
        match self.try_get(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Element at `index`, or an error for a bad index.
    pub fn try_get(&self, index: &[usize]) -> Result<T> {
        let rel = self.layout.checked_offset_of(index)?;
        Ok(self.buffer.get(self.physical(rel)))
    }

    /// Overwrite the element at `index`; every alias of the buffer sees it.
    ///
    /// # Panics
    ///
    /// Panics if the index has the wrong rank or lies outside the extents.
    #[inline]
    pub fn set(&self, index: &[usize], value: T) {
        if let Err(e) = self.try_set(index, value) {
            panic!("{e}");
        }
    }

    pub fn try_set(&self, index: &[usize], value: T) -> Result<()> {
        let rel = self.layout.checked_offset_of(index)?;
        self.buffer.set(self.physical(rel), value);
        Ok(())
    }

    /// Set every element reachable through this view to `value`.
    pub fn fill(&self, value: T) {
        for pos in self.offsets() {
            self.buffer.set(pos, value);
        }
    }

    /// The single element of a size-1 array (any rank).
    pub fn item(&self) -> Result<T> {
        if self.size() != 1 {
            return Err(NdError::NotAScalar { size: self.size() });
        }
        Ok(self.buffer.get(self.offset))
    }

    /// Values in row-major logical order.
    pub fn iter(&self) -> FlatIter<'_, T> {
        FlatIter::new(self.buffer.cells(), &self.layout, self.offset)
    }

    /// `(multi-index, value)` pairs in row-major logical order.
    pub fn indexed_iter(&self) -> IndexedIter<'_, T> {
        self.iter().indexed()
    }

    /// Buffer positions of the elements, in row-major logical order.
    pub fn offsets(&self) -> Offsets {
        Offsets::new(&self.layout, self.offset)
    }

    /// Copy the logical contents out in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// A fresh row-major copy that shares nothing with `self`.
    pub fn deep_copy(&self) -> Self {
        Self {
            buffer: SharedBuffer::from_vec(self.to_vec()),
            layout: Layout::row_major(self.dims()),
            offset: 0,
        }
    }

    /// Overwrite the elements in row-major logical order from `values`.
    ///
    /// The length is checked before anything is written.
    pub fn assign_iter<I>(&self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let values = values.into_iter();
        if values.len() != self.size() {
            return Err(NdError::LengthMismatch {
                expected: self.size(),
                actual: values.len(),
            });
        }
        for (pos, v) in self.offsets().zip(values) {
            self.buffer.set(pos, v);
        }
        Ok(())
    }
}

// ============================================================================
// Views
// ============================================================================

impl<T: Copy> NdArray<T> {
    fn slab_with_layout(&self, layout: Layout, axis: usize, i: usize) -> Self {
        let stride = self.layout.strides()[axis];
        Self {
            buffer: self.buffer.clone(),
            layout,
            offset: self.physical(i as isize * stride),
        }
    }

    // `axis < ndim()` and `i < dims()[axis]` are the caller's obligation.
    pub(crate) fn slab_unchecked(&self, axis: usize, i: usize) -> Self {
        self.slab_with_layout(self.layout.drop_axis(axis), axis, i)
    }

    /// View with the first coordinate fixed to `i`: rank N-1, same buffer.
    pub fn slab(&self, i: usize) -> Result<Self> {
        self.slab_along(0, i)
    }

    /// View with coordinate `axis` fixed to `i`.
    pub fn slab_along(&self, axis: usize, i: usize) -> Result<Self> {
        let layout = self.layout.without_axis(axis)?;
        if i >= self.dims()[axis] {
            let mut index = vec![0; self.ndim()];
            index[axis] = i;
            return Err(NdError::IndexOutOfBounds {
                index,
                dims: self.dims().to_vec(),
            });
        }
        Ok(self.slab_with_layout(layout, axis, i))
    }

    /// All slabs along the first axis. A rank-0 array has none.
    pub fn slabs(&self) -> Slabs<T> {
        Slabs::new(self.clone(), 0)
    }

    /// All slabs along `axis`.
    pub fn slabs_along(&self, axis: usize) -> Result<Slabs<T>> {
        let rank = self.ndim();
        if axis >= rank {
            return Err(NdError::InvalidAxis { axis, rank });
        }
        Ok(Slabs::new(self.clone(), axis))
    }

    /// Zero-copy axis permutation: axis `k` of the view is axis `perm[k]`.
    pub fn permuted(&self, perm: &[usize]) -> Result<Self> {
        Ok(Self {
            buffer: self.buffer.clone(),
            layout: self.layout.permuted(perm)?,
            offset: self.offset,
        })
    }

    /// Zero-copy broadcast to `shape` (stride 0 on stretched axes).
    pub fn broadcast_to(&self, shape: impl IntoShape) -> Result<Self> {
        let dims = shape.into_shape();
        Ok(Self {
            buffer: self.buffer.clone(),
            layout: self.layout.broadcast_to(&dims)?,
            offset: self.offset,
        })
    }

    /// Re-describe a contiguous array with new extents. Shares the buffer.
    pub fn reshape(&self, shape: impl IntoShape) -> Result<Self> {
        let dims = shape.into_shape();
        let layout = Layout::row_major(&dims);
        if layout.size() != self.size() {
            return Err(NdError::ShapeMismatch(self.dims().to_vec(), dims.to_vec()));
        }
        if !self.is_contiguous() {
            return Err(NdError::NotContiguous);
        }
        log::trace!("reshape {:?} -> {:?}", self.dims(), layout.dims());
        Ok(Self {
            buffer: self.buffer.clone(),
            layout,
            offset: self.offset,
        })
    }

    /// Join equal-shaped arrays along a new leading axis into a fresh array.
    pub fn stack(arrays: &[Self]) -> Result<Self> {
        let first = arrays.first().ok_or(NdError::EmptyStack)?;
        Self::stack_shaped(first.dims(), arrays)
    }

    /// Like [`NdArray::stack`], but with the item shape given explicitly so
    /// that an empty list yields an array of shape `[0, item_dims..]`.
    pub fn stack_shaped(item_dims: &[usize], arrays: &[Self]) -> Result<Self> {
        if let Some(bad) = arrays.iter().find(|a| a.dims() != item_dims) {
            return Err(NdError::ShapeMismatch(
                item_dims.to_vec(),
                bad.dims().to_vec(),
            ));
        }
        let mut dims: Dims = SmallVec::with_capacity(item_dims.len() + 1);
        dims.push(arrays.len());
        dims.extend_from_slice(item_dims);
        let item_size: usize = item_dims.iter().product();
        let mut data = Vec::with_capacity(arrays.len() * item_size);
        for a in arrays {
            data.extend(a.iter());
        }
        let layout = Layout::row_major(&dims);
        Ok(Self {
            buffer: SharedBuffer::from_vec(data),
            layout,
            offset: 0,
        })
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T: Copy + PartialEq> PartialEq for NdArray<T> {
    /// Same dims and same elements; layout and buffer identity are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.dims() == other.dims() && self.iter().eq(other.iter())
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for NdArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NdArray")
            .field("dims", &self.dims())
            .field("strides", &self.strides())
            .field("offset", &self.offset)
            .field("data", &self.to_vec())
            .finish()
    }
}
