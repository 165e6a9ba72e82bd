//! Binary reductions as type-level markers.
//!
//! The axis and full reduction kernels are generic over a [`ReduceOp`], so a
//! single recursive engine serves `sum`, `prod`, `min` and `max`. Only some
//! reductions have an identity element; those without one cannot reduce an
//! empty sequence.

use num_traits::{One, Zero};

/// An associative binary reduction over `T`.
pub trait ReduceOp<T>: Copy + Default + 'static {
    /// Name used in log output and error messages.
    const NAME: &'static str;

    /// Combine an accumulator with the next value.
    fn combine(acc: T, value: T) -> T;

    /// The identity element, if the reduction has one.
    fn identity() -> Option<T>;
}

/// Addition, identity `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum;

/// Multiplication, identity `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prod;

/// Minimum; no identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

/// Maximum; no identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

impl<T: Copy + Zero> ReduceOp<T> for Sum {
    const NAME: &'static str = "sum";

    #[inline(always)]
    fn combine(acc: T, value: T) -> T {
        acc + value
    }

    #[inline(always)]
    fn identity() -> Option<T> {
        Some(T::zero())
    }
}

impl<T: Copy + One> ReduceOp<T> for Prod {
    const NAME: &'static str = "prod";

    #[inline(always)]
    fn combine(acc: T, value: T) -> T {
        acc * value
    }

    #[inline(always)]
    fn identity() -> Option<T> {
        Some(T::one())
    }
}

// NaN propagates: once seen, every later comparison keeps it.
#[inline(always)]
#[allow(clippy::eq_op)]
fn is_unordered<T: PartialEq>(value: &T) -> bool {
    value != value
}

impl<T: Copy + PartialOrd> ReduceOp<T> for Min {
    const NAME: &'static str = "min";

    #[inline(always)]
    fn combine(acc: T, value: T) -> T {
        if value < acc || is_unordered(&value) {
            value
        } else {
            acc
        }
    }

    #[inline(always)]
    fn identity() -> Option<T> {
        None
    }
}

impl<T: Copy + PartialOrd> ReduceOp<T> for Max {
    const NAME: &'static str = "max";

    #[inline(always)]
    fn combine(acc: T, value: T) -> T {
        if value > acc || is_unordered(&value) {
            value
        } else {
            acc
        }
    }

    #[inline(always)]
    fn identity() -> Option<T> {
        None
    }
}
