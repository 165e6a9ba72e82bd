//! Reductions and scans along a single axis.
//!
//! Every operation here recurses on the axis index:
//!
//! - axis 0 of a vector is a plain linear fold (or prefix scan);
//! - axis 0 of a higher-rank array folds its slabs together elementwise,
//!   starting from a copy of the first slab;
//! - axis `k > 0` applies the same operation with axis `k - 1` to every
//!   slab along axis 0 and stacks the per-slab results.
//!
//! The axis is checked before anything is allocated.

use ndcore_traits::{Max, Min, Prod, ReduceOp, Sum};
use ndcore_view::{NdArray, NdError, Result};
use num_traits::{One, Zero};

fn check_axis<T>(src: &NdArray<T>, axis: usize) -> Result<()> {
    let rank = src.ndim();
    if axis >= rank {
        return Err(NdError::InvalidAxis { axis, rank });
    }
    Ok(())
}

fn dims_without(dims: &[usize], axis: usize) -> Vec<usize> {
    dims.iter()
        .enumerate()
        .filter(|&(i, _)| i != axis)
        .map(|(_, &d)| d)
        .collect()
}

// ============================================================================
// Reductions
// ============================================================================

fn fold_recursive<T: Copy, F>(
    src: &NdArray<T>,
    axis: usize,
    f: &F,
    identity: Option<T>,
    op: &'static str,
) -> Result<NdArray<T>>
where
    F: Fn(T, T) -> T,
{
    if axis > 0 {
        let item_dims = dims_without(&src.dims()[1..], axis - 1);
        let parts = src
            .slabs()
            .enumerate()
            .map(|(i, slab)| {
                log::trace!("{op}: slab {i} along axis {}", axis - 1);
                fold_recursive(&slab, axis - 1, f, identity, op)
            })
            .collect::<Result<Vec<_>>>()?;
        return NdArray::stack_shaped(&item_dims, &parts);
    }

    if src.ndim() == 1 {
        let mut it = src.iter();
        let init = match identity {
            Some(id) => id,
            None => it.next().ok_or(NdError::EmptyReduction { op })?,
        };
        return Ok(NdArray::scalar(it.fold(init, f)));
    }

    let mut slabs = src.slabs();
    let acc = match slabs.next() {
        Some(first) => match identity {
            Some(id) => {
                let acc = NdArray::from_elem(first.dims(), id);
                acc.assign_iter(first.iter().map(|x| f(id, x)))?;
                acc
            }
            None => first.deep_copy(),
        },
        None => match identity {
            Some(id) => return Ok(NdArray::from_elem(&src.dims()[1..], id)),
            None => return Err(NdError::EmptyReduction { op }),
        },
    };
    for slab in slabs {
        let folded: Vec<T> = acc.iter().zip(slab.iter()).map(|(a, x)| f(a, x)).collect();
        acc.assign_iter(folded)?;
    }
    Ok(acc)
}

fn fold_checked<T: Copy, F>(
    src: &NdArray<T>,
    axis: usize,
    f: &F,
    identity: Option<T>,
    op: &'static str,
) -> Result<NdArray<T>>
where
    F: Fn(T, T) -> T,
{
    check_axis(src, axis)?;
    if identity.is_none() && src.dims()[axis] == 0 {
        return Err(NdError::EmptyReduction { op });
    }
    log::debug!("{op} along axis {axis} of {:?}", src.dims());
    fold_recursive(src, axis, f, identity, op)
}

/// Reduce along `axis` with the associative reduction `R`.
///
/// The result has rank `N - 1`; reducing a vector gives a rank-0 array.
/// A zero-length axis yields `R`'s identity everywhere, or
/// [`NdError::EmptyReduction`] when `R` has none.
pub fn reduce_axis<T: Copy, R: ReduceOp<T>>(src: &NdArray<T>, axis: usize) -> Result<NdArray<T>> {
    fold_checked(src, axis, &R::combine, R::identity(), R::NAME)
}

/// Reduce along `axis` with an arbitrary associative `f` that has no
/// identity. A zero-length axis fails with [`NdError::EmptyReduction`].
pub fn reduce_axis_with<T: Copy, F>(src: &NdArray<T>, axis: usize, f: F) -> Result<NdArray<T>>
where
    F: Fn(T, T) -> T,
{
    fold_checked(src, axis, &f, None, "reduce")
}

/// Fold along `axis` starting from `init` at every output position.
pub fn fold_axis<T: Copy, F>(src: &NdArray<T>, axis: usize, init: T, f: F) -> Result<NdArray<T>>
where
    F: Fn(T, T) -> T,
{
    fold_checked(src, axis, &f, Some(init), "fold")
}

/// Sum along `axis`. A zero-length axis sums to zero.
///
/// ```
/// use ndcore_kernel::sum_axis;
/// use ndcore_view::NdArray;
///
/// let a = NdArray::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(sum_axis(&a, 1).unwrap().to_vec(), vec![3, 7]);
/// ```
pub fn sum_axis<T: Copy + Zero>(src: &NdArray<T>, axis: usize) -> Result<NdArray<T>> {
    reduce_axis::<T, Sum>(src, axis)
}

pub fn prod_axis<T: Copy + One>(src: &NdArray<T>, axis: usize) -> Result<NdArray<T>> {
    reduce_axis::<T, Prod>(src, axis)
}

/// Minimum along `axis`; NaN propagates.
pub fn min_axis<T: Copy + PartialOrd>(src: &NdArray<T>, axis: usize) -> Result<NdArray<T>> {
    reduce_axis::<T, Min>(src, axis)
}

/// Maximum along `axis`; NaN propagates.
pub fn max_axis<T: Copy + PartialOrd>(src: &NdArray<T>, axis: usize) -> Result<NdArray<T>> {
    reduce_axis::<T, Max>(src, axis)
}

// ============================================================================
// Scans
// ============================================================================

fn scan_recursive<T: Copy, F>(src: &NdArray<T>, axis: usize, f: &F) -> Result<NdArray<T>>
where
    F: Fn(T, T) -> T,
{
    let item_dims = &src.dims()[1..];
    if axis > 0 {
        let parts = src
            .slabs()
            .map(|slab| scan_recursive(&slab, axis - 1, f))
            .collect::<Result<Vec<_>>>()?;
        return NdArray::stack_shaped(item_dims, &parts);
    }

    if src.ndim() == 1 {
        let mut acc: Option<T> = None;
        let data: Vec<T> = src
            .iter()
            .map(|x| {
                let next = match acc {
                    Some(a) => f(a, x),
                    None => x,
                };
                acc = Some(next);
                next
            })
            .collect();
        return Ok(NdArray::from_vec(data));
    }

    let mut parts: Vec<NdArray<T>> = Vec::with_capacity(src.dims()[0]);
    for slab in src.slabs() {
        let next = match parts.last() {
            Some(prev) => {
                let data: Vec<T> = prev.iter().zip(slab.iter()).map(|(a, x)| f(a, x)).collect();
                NdArray::from_shape_vec(item_dims, data)?
            }
            None => slab.deep_copy(),
        };
        parts.push(next);
    }
    NdArray::stack_shaped(item_dims, &parts)
}

/// Inclusive scan along `axis` with `f`. The output has the input's shape;
/// its first slab along `axis` is the input's first slab.
pub fn scan_axis<T: Copy, F>(src: &NdArray<T>, axis: usize, f: F) -> Result<NdArray<T>>
where
    F: Fn(T, T) -> T,
{
    check_axis(src, axis)?;
    log::debug!("scan along axis {axis} of {:?}", src.dims());
    scan_recursive(src, axis, &f)
}

/// Running sum along `axis`.
///
/// `cumsum_axis(&a, k)` has `a`'s shape, and its last slab along `k` equals
/// `sum_axis(&a, k)`.
pub fn cumsum_axis<T: Copy + Zero>(src: &NdArray<T>, axis: usize) -> Result<NdArray<T>> {
    scan_axis(src, axis, <Sum as ReduceOp<T>>::combine)
}

/// Running product along `axis`.
pub fn cumprod_axis<T: Copy + One>(src: &NdArray<T>, axis: usize) -> Result<NdArray<T>> {
    scan_axis(src, axis, <Prod as ReduceOp<T>>::combine)
}
