//! Full reductions over every element of an array.

use ndcore_traits::{Element, Max, Min, Prod, ReduceOp, Sum};
use ndcore_view::{NdArray, NdError, Result};
use num_traits::{Float, One, Zero};

/// Full reduction with map function: `reduce(init, op, map.(src))`.
///
/// Elements are visited in row-major logical order.
pub fn reduce<T: Copy, U, M, R>(src: &NdArray<T>, map_fn: M, reduce_fn: R, init: U) -> U
where
    M: Fn(T) -> U,
    R: Fn(U, U) -> U,
{
    src.iter().fold(init, |acc, x| reduce_fn(acc, map_fn(x)))
}

/// Fold with the reduction `R`, starting from its identity or, when it has
/// none, from the first element.
pub fn reduce_with<T: Copy, R: ReduceOp<T>>(src: &NdArray<T>) -> Result<T> {
    let mut it = src.iter();
    let init = match R::identity() {
        Some(id) => id,
        None => it.next().ok_or(NdError::EmptyReduction { op: R::NAME })?,
    };
    Ok(it.fold(init, R::combine))
}

/// Sum of all elements; 0 for an empty array.
pub fn sum<T: Copy + Zero>(src: &NdArray<T>) -> T {
    src.iter().fold(T::zero(), <Sum as ReduceOp<T>>::combine)
}

/// Product of all elements; 1 for an empty array.
pub fn prod<T: Copy + One>(src: &NdArray<T>) -> T {
    src.iter().fold(T::one(), <Prod as ReduceOp<T>>::combine)
}

/// Smallest element. NaN propagates.
pub fn min<T: Copy + PartialOrd>(src: &NdArray<T>) -> Result<T> {
    reduce_with::<T, Min>(src)
}

/// Largest element. NaN propagates.
pub fn max<T: Copy + PartialOrd>(src: &NdArray<T>) -> Result<T> {
    reduce_with::<T, Max>(src)
}

/// Whether every element differs from `T::default()` (true for an empty array).
pub fn all<T: Element + PartialEq>(src: &NdArray<T>) -> bool {
    let zero = T::default();
    src.iter().all(|x| x != zero)
}

/// Whether any element differs from `T::default()` (false for an empty array).
pub fn any<T: Element + PartialEq>(src: &NdArray<T>) -> bool {
    let zero = T::default();
    src.iter().any(|x| x != zero)
}

/// Running sum over the flattened array, as a fresh 1-D array.
pub fn cumsum<T: Copy + Zero>(src: &NdArray<T>) -> NdArray<T> {
    let mut acc = T::zero();
    src.iter()
        .map(|x| {
            acc = acc + x;
            acc
        })
        .collect()
}

/// Arithmetic mean; NaN for an empty array.
pub fn mean<T: Float>(src: &NdArray<T>) -> T {
    if src.is_empty() {
        return T::nan();
    }
    match num_traits::cast::<usize, T>(src.size()) {
        Some(n) => sum(src) / n,
        None => T::nan(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> NdArray<f64> {
        NdArray::from_shape_vec([2, 3], vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0]).unwrap()
    }

    #[test]
    fn test_sum_prod() {
        assert_relative_eq!(sum(&sample()), 23.0);
        assert_relative_eq!(prod(&sample()), 540.0);
        assert_eq!(sum(&NdArray::<i32>::from_elem([0], 1)), 0);
        assert_eq!(prod(&NdArray::<i32>::from_elem([0], 2)), 1);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&sample()), Ok(1.0));
        assert_eq!(max(&sample()), Ok(9.0));
        assert_eq!(
            max(&NdArray::<f32>::from_elem([2, 0], 0.0)),
            Err(NdError::EmptyReduction { op: "max" })
        );
    }

    #[test]
    fn test_min_nan_propagates() {
        let a = NdArray::from_vec(vec![1.0f64, f64::NAN, -1.0]);
        assert!(min(&a).unwrap().is_nan());
    }

    #[test]
    fn test_reduce_strided_view() {
        let a = sample();
        let t = a.permuted(&[1, 0]).unwrap();
        let squares = reduce(&t, |x| x * x, |a, b| a + b, 0.0);
        assert_relative_eq!(squares, 9.0 + 1.0 + 16.0 + 1.0 + 25.0 + 81.0);
    }

    #[test]
    fn test_all_any() {
        let a = NdArray::from_vec(vec![1, 0, 2]);
        assert!(!all(&a));
        assert!(any(&a));
        let m = NdArray::from_vec(vec![true, true]);
        assert!(all(&m));
        let e = NdArray::<u8>::from_elem([0], 0);
        assert!(all(&e));
        assert!(!any(&e));
    }

    #[test]
    fn test_cumsum_flattened() {
        let a = NdArray::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let c = cumsum(&a);
        assert_eq!(c.dims(), &[4]);
        assert_eq!(c.to_vec(), vec![1, 3, 6, 10]);
    }

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&sample()), 23.0 / 6.0);
        assert!(mean(&NdArray::<f64>::from_elem([0], 0.0)).is_nan());
    }
}
