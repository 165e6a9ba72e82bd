//! Name → scalar function tables.
//!
//! Elementwise array operations are instantiated from plain scalar functions
//! looked up by name. The array-lifting code never knows which function it
//! lifts; it only needs one of the three signatures below. Each supported
//! element type owns one table, built on first use and shared afterwards.
//!
//! ```
//! use ndcore_traits::HasOpTable;
//!
//! let hypot = f64::op_table().binary("hypot").unwrap();
//! assert_eq!(hypot(3.0, 4.0), 5.0);
//! assert!(i32::op_table().binary("hypot").is_none());
//! ```

use std::collections::HashMap;

use num_traits::{
    CheckedRem, Float, FloatConst, PrimInt, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub,
};
use once_cell::sync::Lazy;

/// `f(x)`
pub type UnaryFn<T> = fn(T) -> T;
/// `f(x, y)`
pub type BinaryFn<T> = fn(T, T) -> T;
/// `x ⋈ y`, producing a boolean mask element.
pub type CompareFn<T> = fn(T, T) -> bool;

/// Scalar operations available for one element type.
pub struct OpTable<T> {
    unary: HashMap<&'static str, UnaryFn<T>>,
    binary: HashMap<&'static str, BinaryFn<T>>,
    compare: HashMap<&'static str, CompareFn<T>>,
}

impl<T> Default for OpTable<T> {
    fn default() -> Self {
        Self {
            unary: HashMap::new(),
            binary: HashMap::new(),
            compare: HashMap::new(),
        }
    }
}

impl<T> std::fmt::Debug for OpTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut unary: Vec<_> = self.unary.keys().collect();
        let mut binary: Vec<_> = self.binary.keys().collect();
        let mut compare: Vec<_> = self.compare.keys().collect();
        unary.sort_unstable();
        binary.sort_unstable();
        compare.sort_unstable();
        f.debug_struct("OpTable")
            .field("unary", &unary)
            .field("binary", &binary)
            .field("compare", &compare)
            .finish()
    }
}

impl<T> OpTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a unary operation.
    pub fn with_unary(mut self, name: &'static str, f: UnaryFn<T>) -> Self {
        self.unary.insert(name, f);
        self
    }

    /// Register (or replace) a binary operation.
    pub fn with_binary(mut self, name: &'static str, f: BinaryFn<T>) -> Self {
        self.binary.insert(name, f);
        self
    }

    /// Register (or replace) a comparison.
    pub fn with_compare(mut self, name: &'static str, f: CompareFn<T>) -> Self {
        self.compare.insert(name, f);
        self
    }

    #[inline]
    pub fn unary(&self, name: &str) -> Option<UnaryFn<T>> {
        self.unary.get(name).copied()
    }

    #[inline]
    pub fn binary(&self, name: &str) -> Option<BinaryFn<T>> {
        self.binary.get(name).copied()
    }

    #[inline]
    pub fn compare(&self, name: &str) -> Option<CompareFn<T>> {
        self.compare.get(name).copied()
    }

    /// Whether `name` resolves to an operation of any arity.
    pub fn contains(&self, name: &str) -> bool {
        self.unary.contains_key(name)
            || self.binary.contains_key(name)
            || self.compare.contains_key(name)
    }

    /// Sorted names of all registered operations.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .unary
            .keys()
            .chain(self.binary.keys())
            .chain(self.compare.keys())
            .copied()
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl<T: Copy + PartialOrd + 'static> OpTable<T> {
    /// The six ordered comparisons.
    pub fn with_comparisons(self) -> Self {
        self.with_compare("equal", |a, b| a == b)
            .with_compare("not_equal", |a, b| a != b)
            .with_compare("less", |a, b| a < b)
            .with_compare("less_equal", |a, b| a <= b)
            .with_compare("greater", |a, b| a > b)
            .with_compare("greater_equal", |a, b| a >= b)
    }
}

/// Element types that own a built-in operation table.
pub trait HasOpTable: Sized + 'static {
    fn op_table() -> &'static OpTable<Self>;
}

// ============================================================================
// Floating point
// ============================================================================

fn log_add_exp<T: Float + FloatConst>(a: T, b: T) -> T {
    if a == b {
        return a + T::LN_2();
    }
    let m = a.max(b);
    m + (-(a - b).abs()).exp().ln_1p()
}

fn log_add_exp2<T: Float + FloatConst>(a: T, b: T) -> T {
    if a == b {
        return a + T::one();
    }
    let m = a.max(b);
    let two = T::one() + T::one();
    m + two.powf(-(a - b).abs()).ln_1p() / T::LN_2()
}

// Python-style remainder: the result takes the divisor's sign.
fn float_mod<T: Float>(a: T, b: T) -> T {
    let r = a % b;
    if r != T::zero() && (r < T::zero()) != (b < T::zero()) {
        r + b
    } else {
        r
    }
}

fn float_table<T: Float + FloatConst + 'static>(rint: UnaryFn<T>) -> OpTable<T> {
    OpTable::<T>::new()
        .with_binary("add", |a, b| a + b)
        .with_binary("subtract", |a, b| a - b)
        .with_binary("multiply", |a, b| a * b)
        .with_binary("divide", |a, b| a / b)
        .with_binary("floor_divide", |a, b| (a / b).floor())
        .with_binary("power", |a, b| a.powf(b))
        .with_binary("maximum", |a, b| {
            if a.is_nan() || b.is_nan() {
                T::nan()
            } else {
                a.max(b)
            }
        })
        .with_binary("minimum", |a, b| {
            if a.is_nan() || b.is_nan() {
                T::nan()
            } else {
                a.min(b)
            }
        })
        .with_binary("fmax", |a, b| a.max(b))
        .with_binary("fmin", |a, b| a.min(b))
        .with_binary("fmod", |a, b| a % b)
        .with_binary("mod", float_mod)
        .with_binary("hypot", |a, b| a.hypot(b))
        .with_binary("arctan2", |a, b| a.atan2(b))
        .with_binary("copysign", |a, b| a.copysign(b))
        .with_binary("logaddexp", log_add_exp)
        .with_binary("logaddexp2", log_add_exp2)
        .with_unary("absolute", |x| x.abs())
        .with_unary("fabs", |x| x.abs())
        .with_unary("negative", |x| -x)
        .with_unary("sin", |x| x.sin())
        .with_unary("cos", |x| x.cos())
        .with_unary("tan", |x| x.tan())
        .with_unary("arcsin", |x| x.asin())
        .with_unary("arccos", |x| x.acos())
        .with_unary("arctan", |x| x.atan())
        .with_unary("sinh", |x| x.sinh())
        .with_unary("cosh", |x| x.cosh())
        .with_unary("tanh", |x| x.tanh())
        .with_unary("arcsinh", |x| x.asinh())
        .with_unary("arccosh", |x| x.acosh())
        .with_unary("arctanh", |x| x.atanh())
        .with_unary("exp", |x| x.exp())
        .with_unary("expm1", |x| x.exp_m1())
        .with_unary("log", |x| x.ln())
        .with_unary("log2", |x| x.log2())
        .with_unary("log10", |x| x.log10())
        .with_unary("log1p", |x| x.ln_1p())
        .with_unary("sqrt", |x| x.sqrt())
        .with_unary("floor", |x| x.floor())
        .with_unary("ceil", |x| x.ceil())
        .with_unary("rint", rint)
        .with_unary("degrees", |x| x.to_degrees())
        .with_unary("rad2deg", |x| x.to_degrees())
        .with_unary("radians", |x| x.to_radians())
        .with_unary("deg2rad", |x| x.to_radians())
        .with_comparisons()
}

impl HasOpTable for f64 {
    fn op_table() -> &'static OpTable<f64> {
        static TABLE: Lazy<OpTable<f64>> = Lazy::new(|| float_table(f64::round_ties_even));
        &TABLE
    }
}

impl HasOpTable for f32 {
    fn op_table() -> &'static OpTable<f32> {
        static TABLE: Lazy<OpTable<f32>> = Lazy::new(|| float_table(f32::round_ties_even));
        &TABLE
    }
}

// ============================================================================
// Integers
// ============================================================================

// Floor division; division by zero yields 0 instead of trapping.
fn int_floor_divide<T: PrimInt + CheckedRem>(a: T, b: T) -> T {
    if b.is_zero() {
        return T::zero();
    }
    let q = a.checked_div(&b).unwrap_or_else(T::min_value);
    let r = a.checked_rem(&b).unwrap_or_else(T::zero);
    if !r.is_zero() && ((r < T::zero()) != (b < T::zero())) {
        q - T::one()
    } else {
        q
    }
}

fn int_mod<T: PrimInt + CheckedRem>(a: T, b: T) -> T {
    if b.is_zero() {
        return T::zero();
    }
    let r = a.checked_rem(&b).unwrap_or_else(T::zero);
    if !r.is_zero() && ((r < T::zero()) != (b < T::zero())) {
        r + b
    } else {
        r
    }
}

fn shift_amount<T: PrimInt>(b: T) -> Option<usize> {
    let bits = T::zero().count_zeros() as usize;
    b.to_usize().filter(|&s| s < bits)
}

fn int_left_shift<T: PrimInt>(a: T, b: T) -> T {
    match shift_amount(b) {
        Some(s) => a << s,
        None => T::zero(),
    }
}

fn int_right_shift<T: PrimInt>(a: T, b: T) -> T {
    match shift_amount(b) {
        Some(s) => a >> s,
        None if a < T::zero() => !T::zero(),
        None => T::zero(),
    }
}

fn int_table<T>(absolute: UnaryFn<T>) -> OpTable<T>
where
    T: PrimInt + CheckedRem + WrappingAdd + WrappingSub + WrappingMul + WrappingNeg + 'static,
{
    OpTable::<T>::new()
        .with_binary("add", |a, b| a.wrapping_add(&b))
        .with_binary("subtract", |a, b| a.wrapping_sub(&b))
        .with_binary("multiply", |a, b| a.wrapping_mul(&b))
        .with_binary("floor_divide", int_floor_divide)
        .with_binary("mod", int_mod)
        .with_binary("maximum", |a, b| a.max(b))
        .with_binary("minimum", |a, b| a.min(b))
        .with_binary("bitwise_and", |a, b| a & b)
        .with_binary("bitwise_or", |a, b| a | b)
        .with_binary("bitwise_xor", |a, b| a ^ b)
        .with_binary("left_shift", int_left_shift)
        .with_binary("right_shift", int_right_shift)
        .with_unary("negative", |x| x.wrapping_neg())
        .with_unary("absolute", absolute)
        .with_unary("bitwise_not", |x| !x)
        .with_unary("invert", |x| !x)
        .with_comparisons()
}

macro_rules! impl_signed_op_table {
    ($($t:ty),*) => {
        $(impl HasOpTable for $t {
            fn op_table() -> &'static OpTable<$t> {
                static TABLE: Lazy<OpTable<$t>> = Lazy::new(|| int_table(<$t>::wrapping_abs));
                &TABLE
            }
        })*
    };
}

macro_rules! impl_unsigned_op_table {
    ($($t:ty),*) => {
        $(impl HasOpTable for $t {
            fn op_table() -> &'static OpTable<$t> {
                static TABLE: Lazy<OpTable<$t>> = Lazy::new(|| int_table(|x| x));
                &TABLE
            }
        })*
    };
}

impl_signed_op_table!(i8, i16, i32, i64, isize);
impl_unsigned_op_table!(u8, u16, u32, u64, usize);

// ============================================================================
// Booleans
// ============================================================================

impl HasOpTable for bool {
    fn op_table() -> &'static OpTable<bool> {
        static TABLE: Lazy<OpTable<bool>> = Lazy::new(|| {
            OpTable::<bool>::new()
                .with_binary("logical_and", |a, b| a && b)
                .with_binary("logical_or", |a, b| a || b)
                .with_binary("logical_xor", |a, b| a ^ b)
                .with_binary("bitwise_and", |a, b| a & b)
                .with_binary("bitwise_or", |a, b| a | b)
                .with_binary("bitwise_xor", |a, b| a ^ b)
                .with_unary("logical_not", |x| !x)
                .with_unary("invert", |x| !x)
                .with_compare("equal", |a, b| a == b)
                .with_compare("not_equal", |a, b| a != b)
        });
        &TABLE
    }
}

// ============================================================================
// Complex
// ============================================================================

#[cfg(feature = "complex")]
mod complex_tables {
    use super::{HasOpTable, Lazy, OpTable};
    use num_complex::Complex;
    use num_traits::Float;

    fn complex_table<T: Float + 'static>() -> OpTable<Complex<T>> {
        OpTable::<Complex<T>>::new()
            .with_binary("add", |a, b| a + b)
            .with_binary("subtract", |a, b| a - b)
            .with_binary("multiply", |a, b| a * b)
            .with_binary("divide", |a, b| a / b)
            .with_binary("power", |a: Complex<T>, b| a.powc(b))
            .with_unary("negative", |x: Complex<T>| -x)
            .with_unary("conjugate", |x: Complex<T>| x.conj())
            .with_unary("exp", |x: Complex<T>| x.exp())
            .with_unary("log", |x: Complex<T>| x.ln())
            .with_unary("sqrt", |x: Complex<T>| x.sqrt())
            .with_unary("sin", |x: Complex<T>| x.sin())
            .with_unary("cos", |x: Complex<T>| x.cos())
            .with_compare("equal", |a, b| a == b)
            .with_compare("not_equal", |a, b| a != b)
    }

    impl HasOpTable for Complex<f64> {
        fn op_table() -> &'static OpTable<Complex<f64>> {
            static TABLE: Lazy<OpTable<Complex<f64>>> = Lazy::new(complex_table);
            &TABLE
        }
    }

    impl HasOpTable for Complex<f32> {
        fn op_table() -> &'static OpTable<Complex<f32>> {
            static TABLE: Lazy<OpTable<Complex<f32>>> = Lazy::new(complex_table);
            &TABLE
        }
    }
}
