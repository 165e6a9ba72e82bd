//! Reference-counted element storage.

use std::cell::Cell;
use std::rc::Rc;

/// A fixed-length allocation shared by every array view that addresses it.
///
/// Cloning a buffer clones the handle, not the elements. The allocation is
/// never resized or moved and is freed when the last handle is dropped.
///
/// Elements are stored in `Cell`s: any handle may write an element and every
/// other handle observes the write. `Rc` keeps the buffer (and therefore
/// every array) on one thread.
pub struct SharedBuffer<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T> Clone for SharedBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T> std::fmt::Debug for SharedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("len", &self.cells.len())
            .field("refs", &Rc::strong_count(&self.cells))
            .finish()
    }
}

impl<T: Copy> SharedBuffer<T> {
    /// Take ownership of `data` as a new buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            cells: data.into_iter().map(Cell::new).collect(),
        }
    }

    /// A buffer of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self {
            cells: std::iter::repeat(value).take(len).map(Cell::new).collect(),
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.cells[index].get()
    }

    #[inline]
    pub fn set(&self, index: usize, value: T) {
        self.cells[index].set(value);
    }

    /// Copy out the whole allocation in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }
}

impl<T> SharedBuffer<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Number of live handles (arrays and buffers) sharing this allocation.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.cells)
    }

    /// Whether two handles refer to the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }
}
