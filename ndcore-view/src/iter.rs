//! Row-major traversal of strided arrays.

use std::cell::Cell;

use smallvec::SmallVec;

use crate::array::NdArray;
use crate::layout::{Dims, Layout, Strides};

// ============================================================================
// Offsets
// ============================================================================

/// Physical buffer positions of an array's elements, in row-major logical
/// order (last index varies fastest).
///
/// Contiguous arrays walk the buffer directly. Otherwise the position is
/// advanced incrementally: one stride add per step, plus a rewind for every
/// axis that wraps.
#[derive(Clone, Debug)]
pub struct Offsets {
    dims: Dims,
    strides: Strides,
    index: Dims,
    start: isize,
    pos: isize,
    remaining: usize,
    contiguous: bool,
}

impl Offsets {
    pub(crate) fn new(layout: &Layout, offset: usize) -> Self {
        let rank = layout.ndim();
        Self {
            dims: Dims::from_slice(layout.dims()),
            strides: Strides::from_slice(layout.strides()),
            index: SmallVec::from_elem(0, rank),
            start: offset as isize,
            pos: offset as isize,
            remaining: layout.size(),
            contiguous: layout.is_contiguous(),
        }
    }

    /// Multi-index of the next element to be yielded.
    pub fn index(&self) -> Dims {
        if !self.contiguous {
            return self.index.clone();
        }
        let mut flat = (self.pos - self.start) as usize;
        let mut index: Dims = SmallVec::from_elem(0, self.dims.len());
        for k in (0..self.dims.len()).rev() {
            let d = self.dims[k].max(1);
            index[k] = flat % d;
            flat /= d;
        }
        index
    }
}

impl Iterator for Offsets {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.pos as usize;
        self.remaining -= 1;
        if self.contiguous {
            self.pos += 1;
        } else if self.remaining > 0 {
            for k in (0..self.dims.len()).rev() {
                self.index[k] += 1;
                self.pos += self.strides[k];
                if self.index[k] < self.dims[k] {
                    break;
                }
                self.pos -= self.strides[k] * self.dims[k] as isize;
                self.index[k] = 0;
            }
        }
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets {}

// ============================================================================
// Element iterators
// ============================================================================

/// Iterator over element values in row-major logical order.
///
/// Works for any strides, including negative and zero (broadcast) strides.
/// A rank-0 array yields its single element; an empty array yields nothing.
pub struct FlatIter<'a, T> {
    cells: &'a [Cell<T>],
    offsets: Offsets,
}

impl<'a, T> FlatIter<'a, T> {
    pub(crate) fn new(cells: &'a [Cell<T>], layout: &Layout, offset: usize) -> Self {
        Self {
            cells,
            offsets: Offsets::new(layout, offset),
        }
    }

    /// Pair every value with its multi-index.
    pub fn indexed(self) -> IndexedIter<'a, T> {
        IndexedIter { inner: self }
    }
}

impl<T> Clone for FlatIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells,
            offsets: self.offsets.clone(),
        }
    }
}

impl<T: Copy> Iterator for FlatIter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.offsets.next().map(|p| self.cells[p].get())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl<T: Copy> ExactSizeIterator for FlatIter<'_, T> {}

/// Iterator that yields `(multi-index, value)` pairs.
pub struct IndexedIter<'a, T> {
    inner: FlatIter<'a, T>,
}

impl<T: Copy> Iterator for IndexedIter<'_, T> {
    type Item = (Dims, T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.inner.offsets.index();
        let value = self.inner.next()?;
        Some((index, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Copy> ExactSizeIterator for IndexedIter<'_, T> {}

// ============================================================================
// Slabs
// ============================================================================

/// Views obtained by fixing successive coordinates of one axis.
///
/// Every yielded slab shares the source buffer.
pub struct Slabs<T> {
    source: NdArray<T>,
    axis: usize,
    front: usize,
    back: usize,
}

impl<T: Copy> Slabs<T> {
    pub(crate) fn new(source: NdArray<T>, axis: usize) -> Self {
        let back = if source.ndim() == 0 {
            0
        } else {
            source.dims()[axis]
        };
        Self {
            source,
            axis,
            front: 0,
            back,
        }
    }
}

impl<T: Copy> Iterator for Slabs<T> {
    type Item = NdArray<T>;

    fn next(&mut self) -> Option<NdArray<T>> {
        if self.front >= self.back {
            return None;
        }
        let slab = self.source.slab_unchecked(self.axis, self.front);
        self.front += 1;
        Some(slab)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T: Copy> DoubleEndedIterator for Slabs<T> {
    fn next_back(&mut self) -> Option<NdArray<T>> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.source.slab_unchecked(self.axis, self.back))
    }
}

impl<T: Copy> ExactSizeIterator for Slabs<T> {}

#[cfg(test)]
mod tests {
    use crate::NdArray;

    #[test]
    fn test_iter_row_major() {
        let a = NdArray::from_shape_vec([2, 3], (0..6).collect()).unwrap();
        let v: Vec<i32> = a.iter().collect();
        assert_eq!(v, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_iter_permuted_view() {
        let a = NdArray::from_shape_vec([2, 3], (0..6).collect()).unwrap();
        let t = a.permuted(&[1, 0]).unwrap();
        let v: Vec<i32> = t.iter().collect();
        assert_eq!(v, vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_iter_size_hint() {
        let a = NdArray::from_elem([3, 4], 1.0f64);
        let mut it = a.iter();
        assert_eq!(it.size_hint(), (12, Some(12)));
        it.next();
        assert_eq!(it.len(), 11);
    }

    #[test]
    fn test_iter_rank0_and_empty() {
        let s = NdArray::scalar(9u8);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![9]);

        let e = NdArray::from_elem([0, 4], 1u8);
        assert_eq!(e.iter().count(), 0);
    }

    #[test]
    fn test_iter_clone_is_independent() {
        let a = NdArray::from_vec(vec![1, 2, 3]);
        let mut it = a.iter();
        it.next();
        let rest: Vec<i32> = it.clone().collect();
        assert_eq!(rest, vec![2, 3]);
        assert_eq!(it.count(), 2);
    }

    #[test]
    fn test_indexed() {
        let a = NdArray::from_shape_vec([2, 2], vec![10, 11, 12, 13]).unwrap();
        let pairs: Vec<(Vec<usize>, i32)> = a
            .iter()
            .indexed()
            .map(|(i, v)| (i.to_vec(), v))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (vec![0, 0], 10),
                (vec![0, 1], 11),
                (vec![1, 0], 12),
                (vec![1, 1], 13)
            ]
        );
    }

    #[test]
    fn test_slabs_double_ended() {
        let a = NdArray::from_shape_vec([3, 2], (0..6).collect()).unwrap();
        let rows: Vec<Vec<i32>> = a.slabs().rev().map(|s| s.to_vec()).collect();
        assert_eq!(rows, vec![vec![4, 5], vec![2, 3], vec![0, 1]]);
        assert_eq!(a.slabs().len(), 3);
    }

    #[test]
    fn test_slabs_rank0_is_empty() {
        assert_eq!(NdArray::scalar(1i64).slabs().count(), 0);
    }
}
