//! Named elementwise operations and arithmetic shorthands.

use std::ops::{Add, Div, Mul, Sub};

use ndcore_traits::{HasOpTable, Max, Min, ReduceOp};
use ndcore_view::{NdArray, NdError, Result};

use crate::map::{map, zip_map2};

fn unknown(name: &str) -> NdError {
    NdError::UnknownOperation(name.to_string())
}

/// Lift the unary table entry `name` over `a`.
///
/// ```
/// use ndcore_kernel::apply_unary;
/// use ndcore_view::NdArray;
///
/// let a = NdArray::from_vec(vec![1.0f64, 4.0, 9.0]);
/// assert_eq!(apply_unary("sqrt", &a).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
/// assert!(apply_unary("no_such_op", &a).is_err());
/// ```
pub fn apply_unary<T: HasOpTable + Copy>(name: &str, a: &NdArray<T>) -> Result<NdArray<T>> {
    let f = T::op_table().unary(name).ok_or_else(|| unknown(name))?;
    map(a, f)
}

/// Lift the binary table entry `name` over `a` and `b` with broadcasting.
pub fn apply_binary<T: HasOpTable + Copy>(
    name: &str,
    a: &NdArray<T>,
    b: &NdArray<T>,
) -> Result<NdArray<T>> {
    let f = T::op_table().binary(name).ok_or_else(|| unknown(name))?;
    zip_map2(a, b, f)
}

/// Lift the comparison `name` over `a` and `b`, producing a boolean mask.
pub fn apply_compare<T: HasOpTable + Copy>(
    name: &str,
    a: &NdArray<T>,
    b: &NdArray<T>,
) -> Result<NdArray<bool>> {
    let f = T::op_table().compare(name).ok_or_else(|| unknown(name))?;
    zip_map2(a, b, f)
}

pub fn add<T: Copy + Add<Output = T>>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map2(a, b, |x, y| x + y)
}

pub fn sub<T: Copy + Sub<Output = T>>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map2(a, b, |x, y| x - y)
}

pub fn mul<T: Copy + Mul<Output = T>>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map2(a, b, |x, y| x * y)
}

/// True division. Integer element types divide with Rust semantics and panic
/// on a zero divisor; use `apply_binary("floor_divide", ..)` for the
/// table's zero-safe integer division.
pub fn div<T: Copy + Div<Output = T>>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map2(a, b, |x, y| x / y)
}

/// Elementwise maximum; NaN in either operand propagates.
pub fn maximum<T: Copy + PartialOrd>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map2(a, b, <Max as ReduceOp<T>>::combine)
}

/// Elementwise minimum; NaN in either operand propagates.
pub fn minimum<T: Copy + PartialOrd>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map2(a, b, <Min as ReduceOp<T>>::combine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_apply_binary_by_name() {
        let a = NdArray::from_vec(vec![3.0f64, 5.0]);
        let b = NdArray::from_vec(vec![4.0f64, 12.0]);
        let h = apply_binary("hypot", &a, &b).unwrap();
        assert_relative_eq!(h.get(&[0]), 5.0);
        assert_relative_eq!(h.get(&[1]), 13.0);
    }

    #[test]
    fn test_apply_binary_integer_table() {
        let a = NdArray::from_vec(vec![7i32, -7]);
        let b = NdArray::scalar(2i32);
        assert_eq!(apply_binary("floor_divide", &a, &b).unwrap().to_vec(), vec![3, -4]);
        assert_eq!(apply_binary("mod", &a, &b).unwrap().to_vec(), vec![1, 1]);
    }

    #[test]
    fn test_apply_compare_mask() {
        let a = NdArray::from_vec(vec![1, 5, 3]);
        let b = NdArray::scalar(3);
        let m = apply_compare("greater_equal", &a, &b).unwrap();
        assert_eq!(m.to_vec(), vec![false, true, true]);
    }

    #[test]
    fn test_unknown_operation() {
        let a = NdArray::from_vec(vec![1u8]);
        assert_eq!(
            apply_unary("sqrt", &a).unwrap_err(),
            NdError::UnknownOperation("sqrt".to_string())
        );
        assert!(apply_compare("nearly", &a, &a).is_err());
    }

    #[test]
    fn test_arithmetic_shorthands() {
        let a = NdArray::from_shape_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = NdArray::from_vec(vec![10.0, 20.0]);
        assert_eq!(add(&a, &b).unwrap().to_vec(), vec![11.0, 22.0, 13.0, 24.0]);
        assert_eq!(sub(&b, &a).unwrap().to_vec(), vec![9.0, 18.0, 7.0, 16.0]);
        assert_eq!(mul(&a, &b).unwrap().to_vec(), vec![10.0, 40.0, 30.0, 80.0]);
        assert_eq!(div(&b, &a).unwrap().to_vec(), vec![10.0, 10.0, 10.0 / 3.0, 5.0]);
    }

    #[test]
    fn test_maximum_minimum_nan() {
        let a = NdArray::from_vec(vec![1.0f64, f64::NAN, 3.0]);
        let b = NdArray::from_vec(vec![2.0f64, 0.0, 1.0]);
        let mx = maximum(&a, &b).unwrap().to_vec();
        assert_eq!(mx[0], 2.0);
        assert!(mx[1].is_nan());
        assert_eq!(mx[2], 3.0);
        let mn = minimum(&a, &b).unwrap().to_vec();
        assert_eq!(mn[0], 1.0);
        assert!(mn[1].is_nan());
        assert_eq!(mn[2], 1.0);
    }
}
