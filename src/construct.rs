//! Array constructors.
//!
//! Every constructor allocates a fresh row-major buffer.

use ndcore_traits::Element;
use ndcore_view::{Dims, IntoShape, NdArray, NdError, Result};
use num_traits::{Float, Num, One, Zero};

/// Sample count used by [`linspace_default`].
pub const LINSPACE_DEFAULT_NUM: usize = 50;

// ============================================================================
// Filled arrays
// ============================================================================

pub fn zeros<T: Copy + Zero>(shape: impl IntoShape) -> NdArray<T> {
    let a = NdArray::from_elem(shape, T::zero());
    log::debug!("zeros {:?}", a.dims());
    a
}

pub fn ones<T: Copy + One>(shape: impl IntoShape) -> NdArray<T> {
    let a = NdArray::from_elem(shape, T::one());
    log::debug!("ones {:?}", a.dims());
    a
}

/// An array with unspecified contents. Write before reading.
pub fn empty<T: Element>(shape: impl IntoShape) -> NdArray<T> {
    let a = NdArray::uninit(shape);
    log::debug!("empty {:?}", a.dims());
    a
}

pub fn full<T: Copy>(shape: impl IntoShape, value: T) -> NdArray<T> {
    let a = NdArray::from_elem(shape, value);
    log::debug!("full {:?}", a.dims());
    a
}

// ============================================================================
// Ranges
// ============================================================================

/// Element types [`arange`] can count.
///
/// Integer counts are exact over the whole range of the type; float counts
/// are taken from the rounded-up quotient.
pub trait ArangeElement: Copy + Num {
    /// `max(0, ceil((end - begin) / step))` for a nonzero `step`.
    fn arange_len(begin: Self, end: Self, step: Self) -> Result<usize>;
}

macro_rules! impl_arange_int {
    ($($t:ty),*) => {
        $(impl ArangeElement for $t {
            fn arange_len(begin: $t, end: $t, step: $t) -> Result<usize> {
                let span = end as i128 - begin as i128;
                let step = step as i128;
                if span == 0 || (span > 0) != (step > 0) {
                    return Ok(0);
                }
                let (span, step) = (span.abs(), step.abs());
                let n = (span + step - 1) / step;
                usize::try_from(n).map_err(|_| NdError::TooLarge { len: usize::MAX })
            }
        })*
    };
}

impl_arange_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_arange_float {
    ($($t:ty),*) => {
        $(impl ArangeElement for $t {
            fn arange_len(begin: $t, end: $t, step: $t) -> Result<usize> {
                let ratio = ((end - begin) / step).ceil();
                if ratio.is_nan() {
                    return Err(NdError::NonFiniteRange);
                }
                if ratio <= 0.0 {
                    return Ok(0);
                }
                if ratio.is_infinite() || ratio >= usize::MAX as $t {
                    return Err(NdError::TooLarge { len: usize::MAX });
                }
                Ok(ratio as usize)
            }
        })*
    };
}

impl_arange_float!(f32, f64);

/// Values from `begin` (inclusive) towards `end` (exclusive) in steps of
/// `step`: `ceil((end - begin) / step)` elements, or none if that is not
/// positive.
///
/// Each element is the previous one plus `step`, so float steps accumulate
/// rounding the same way a running sum does. The length is checked before
/// anything is allocated.
///
/// ```
/// let a = ndcore::arange(0, 10, 2).unwrap();
/// assert_eq!(a.to_vec(), vec![0, 2, 4, 6, 8]);
/// ```
pub fn arange<T: ArangeElement>(begin: T, end: T, step: T) -> Result<NdArray<T>> {
    if step.is_zero() {
        return Err(NdError::ZeroStep);
    }
    let n = T::arange_len(begin, end, step)?;
    log::debug!("arange: {n} elements");

    let mut data = Vec::new();
    data.try_reserve_exact(n).map_err(|_| NdError::TooLarge { len: n })?;
    if n > 0 {
        let mut value = begin;
        data.push(value);
        for _ in 1..n {
            value = value + step;
            data.push(value);
        }
    }
    Ok(NdArray::from_vec(data))
}

/// `0, 1, .., end - 1` (empty when `end <= 0`).
pub fn arange_to(end: i64) -> NdArray<i64> {
    from_range(0..end)
}

/// A 1-D array holding the values of a finite range or iterator.
pub fn from_range<T: Copy, I: IntoIterator<Item = T>>(range: I) -> NdArray<T> {
    range.into_iter().collect()
}

/// `num` evenly spaced samples starting at `start`.
///
/// With `endpoint` the last sample is (up to accumulated rounding) `stop`;
/// without it the samples stop one step short. Samples are produced by
/// repeated addition of the step.
pub fn linspace<T: Float>(start: T, stop: T, num: usize, endpoint: bool) -> NdArray<T> {
    log::debug!("linspace: {num} samples, endpoint={endpoint}");
    if num == 0 {
        return NdArray::from_vec(Vec::new());
    }
    let divisions = num - usize::from(endpoint);
    let step = match num_traits::cast::<usize, T>(divisions) {
        Some(d) if divisions > 0 => (stop - start) / d,
        _ => T::zero(),
    };
    let mut data = Vec::with_capacity(num);
    let mut value = start;
    data.push(value);
    for _ in 1..num {
        value = value + step;
        data.push(value);
    }
    NdArray::from_vec(data)
}

/// [`linspace`] with [`LINSPACE_DEFAULT_NUM`] samples including `stop`.
pub fn linspace_default<T: Float>(start: T, stop: T) -> NdArray<T> {
    linspace(start, stop, LINSPACE_DEFAULT_NUM, true)
}

// ============================================================================
// Nested sequences
// ============================================================================

/// A scalar or an arbitrarily nested sequence of scalars.
///
/// The nesting depth is fixed by the type and becomes the rank of the array
/// built from it.
pub trait NestedSequence {
    type Elem: Copy;

    /// Number of sequence levels above the scalars.
    const DEPTH: usize;

    /// Extents read along the first element of every level.
    fn leading_shape(&self) -> Dims;

    /// Check that every level matches `dims`.
    fn check_shape(&self, dims: &[usize], depth: usize) -> Result<()>;

    /// Append the scalars in row-major order.
    fn push_leaves(&self, out: &mut Vec<Self::Elem>);
}

macro_rules! impl_nested_scalar {
    ($($t:ty),*) => {
        $(impl NestedSequence for $t {
            type Elem = $t;
            const DEPTH: usize = 0;

            fn leading_shape(&self) -> Dims {
                Dims::new()
            }

            fn check_shape(&self, _dims: &[usize], _depth: usize) -> Result<()> {
                Ok(())
            }

            fn push_leaves(&self, out: &mut Vec<$t>) {
                out.push(*self);
            }
        })*
    };
}

impl_nested_scalar!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool);

impl<S: NestedSequence> NestedSequence for [S] {
    type Elem = S::Elem;
    const DEPTH: usize = S::DEPTH + 1;

    fn leading_shape(&self) -> Dims {
        let mut dims = Dims::new();
        dims.push(self.len());
        match self.first() {
            Some(first) => dims.extend(first.leading_shape()),
            // no element to inspect: every inner extent is 0
            None => dims.extend(std::iter::repeat(0).take(S::DEPTH)),
        }
        dims
    }

    fn check_shape(&self, dims: &[usize], depth: usize) -> Result<()> {
        if dims.first() != Some(&self.len()) {
            return Err(NdError::RaggedSequence { depth });
        }
        self.iter()
            .try_for_each(|item| item.check_shape(&dims[1..], depth + 1))
    }

    fn push_leaves(&self, out: &mut Vec<S::Elem>) {
        for item in self {
            item.push_leaves(out);
        }
    }
}

impl<S: NestedSequence> NestedSequence for Vec<S> {
    type Elem = S::Elem;
    const DEPTH: usize = S::DEPTH + 1;

    fn leading_shape(&self) -> Dims {
        self.as_slice().leading_shape()
    }

    fn check_shape(&self, dims: &[usize], depth: usize) -> Result<()> {
        self.as_slice().check_shape(dims, depth)
    }

    fn push_leaves(&self, out: &mut Vec<S::Elem>) {
        self.as_slice().push_leaves(out)
    }
}

impl<S: NestedSequence, const K: usize> NestedSequence for [S; K] {
    type Elem = S::Elem;
    const DEPTH: usize = S::DEPTH + 1;

    fn leading_shape(&self) -> Dims {
        self.as_slice().leading_shape()
    }

    fn check_shape(&self, dims: &[usize], depth: usize) -> Result<()> {
        self.as_slice().check_shape(dims, depth)
    }

    fn push_leaves(&self, out: &mut Vec<S::Elem>) {
        self.as_slice().push_leaves(out)
    }
}

/// Build an array from nested sequences; the nesting depth is the rank.
///
/// ```
/// let a = ndcore::array(&vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// assert_eq!(a.dims(), &[2, 3]);
/// assert!(ndcore::array(&vec![vec![1, 2], vec![3]]).is_err());
/// ```
pub fn array<S: NestedSequence + ?Sized>(nested: &S) -> Result<NdArray<S::Elem>> {
    let dims = nested.leading_shape();
    nested.check_shape(&dims, 0)?;
    let mut data = Vec::with_capacity(dims.iter().product());
    nested.push_leaves(&mut data);
    log::debug!("array {:?} from nested sequence", dims);
    NdArray::from_shape_vec(dims, data)
}

// ============================================================================
// *_like
// ============================================================================

/// Anything with an element type and a shape to copy.
pub trait ArrayLike {
    type Elem: Copy;

    fn like_dims(&self) -> Result<Dims>;
}

impl<T: Copy> ArrayLike for NdArray<T> {
    type Elem = T;

    fn like_dims(&self) -> Result<Dims> {
        Ok(Dims::from_slice(self.dims()))
    }
}

impl<S: NestedSequence> ArrayLike for Vec<S> {
    type Elem = S::Elem;

    fn like_dims(&self) -> Result<Dims> {
        let dims = self.leading_shape();
        self.check_shape(&dims, 0)?;
        Ok(dims)
    }
}

impl<S: NestedSequence, const K: usize> ArrayLike for [S; K] {
    type Elem = S::Elem;

    fn like_dims(&self) -> Result<Dims> {
        let dims = self.leading_shape();
        self.check_shape(&dims, 0)?;
        Ok(dims)
    }
}

pub fn zeros_like<L>(like: &L) -> Result<NdArray<L::Elem>>
where
    L: ArrayLike,
    L::Elem: Zero,
{
    Ok(zeros(like.like_dims()?))
}

pub fn ones_like<L>(like: &L) -> Result<NdArray<L::Elem>>
where
    L: ArrayLike,
    L::Elem: One,
{
    Ok(ones(like.like_dims()?))
}

pub fn empty_like<L>(like: &L) -> Result<NdArray<L::Elem>>
where
    L: ArrayLike,
    L::Elem: Element,
{
    Ok(empty(like.like_dims()?))
}

pub fn full_like<L: ArrayLike>(like: &L, value: L::Elem) -> Result<NdArray<L::Elem>> {
    Ok(full(like.like_dims()?, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zeros_ones_full_shapes() {
        let z: NdArray<f64> = zeros((2, 3));
        assert_eq!(z.dims(), &[2, 3]);
        assert!(z.iter().all(|x| x == 0.0));

        let o: NdArray<i32> = ones(4);
        assert_eq!(o.to_vec(), vec![1; 4]);

        let f = full([2, 2], 7u8);
        assert_eq!(f.to_vec(), vec![7; 4]);

        let e: NdArray<f32> = empty(vec![3, 1]);
        assert_eq!(e.dims(), &[3, 1]);

        let s: NdArray<f64> = zeros(());
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.size(), 1);
    }

    #[test]
    fn test_arange_int() {
        assert_eq!(arange(0, 10, 2).unwrap().to_vec(), vec![0, 2, 4, 6, 8]);
        assert_eq!(arange(0, 9, 2).unwrap().to_vec(), vec![0, 2, 4, 6, 8]);
        assert_eq!(arange(5, 0, -2).unwrap().to_vec(), vec![5, 3, 1]);
        assert!(arange(3, 1, 1).unwrap().is_empty());
        assert_eq!(arange(0, 1, 0).unwrap_err(), NdError::ZeroStep);
        assert!(arange(5u32, 2, 1).unwrap().is_empty());
    }

    #[test]
    fn test_arange_int_counts_exactly_near_type_limits() {
        assert_eq!(
            arange(i64::MAX - 2, i64::MAX, 1).unwrap().to_vec(),
            vec![i64::MAX - 2, i64::MAX - 1]
        );
        let step = u64::MAX / 2;
        assert_eq!(
            arange(0u64, u64::MAX, step).unwrap().to_vec(),
            vec![0, step, 2 * step]
        );
        assert_eq!(
            arange(i64::MAX, i64::MIN, i64::MIN).unwrap().to_vec(),
            vec![i64::MAX, -1]
        );
        assert_eq!(arange(-128i8, 127, 100).unwrap().to_vec(), vec![-128, -28, 72]);
    }

    #[test]
    fn test_arange_rejects_unallocatable_lengths() {
        assert_eq!(
            arange(0.0f64, f64::INFINITY, 1.0).unwrap_err(),
            NdError::TooLarge { len: usize::MAX }
        );
        assert_eq!(
            arange(f64::NEG_INFINITY, f64::INFINITY, f64::INFINITY).unwrap_err(),
            NdError::NonFiniteRange
        );
        assert!(matches!(
            arange(0u64, u64::MAX, 1),
            Err(NdError::TooLarge { .. })
        ));
        assert!(arange(0.0, f64::NEG_INFINITY, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_arange_float() {
        let a = arange(0.0, 1.0, 0.25).unwrap();
        assert_eq!(a.size(), 4);
        assert_relative_eq!(a.get(&[3]), 0.75);
        assert_eq!(arange(0.0, 1.0, 0.3).unwrap().size(), 4);
    }

    #[test]
    fn test_arange_to() {
        assert_eq!(arange_to(4).to_vec(), vec![0, 1, 2, 3]);
        assert!(arange_to(-2).is_empty());
        assert_eq!(from_range(3u8..6).to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_linspace() {
        let l = linspace(0.0, 1.0, 5, true);
        let expected = [0.0, 0.25, 0.5, 0.75, 1.0];
        for (v, e) in l.iter().zip(expected) {
            assert_relative_eq!(v, e, epsilon = 1e-12);
        }

        let l = linspace(0.0f32, 1.0, 4, false);
        assert_relative_eq!(l.get(&[3]), 0.75, epsilon = 1e-6);

        assert!(linspace(0.0, 1.0, 0, true).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1, true).to_vec(), vec![2.0]);
        assert_eq!(linspace_default(0.0, 1.0).size(), LINSPACE_DEFAULT_NUM);
    }

    #[test]
    fn test_array_nested() {
        let a = array(&vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(a.dims(), &[3, 2]);
        assert_eq!(a.get(&[2, 1]), 6.0);

        let b = array(&[[[1u8, 2], [3, 4]], [[5, 6], [7, 8]]]).unwrap();
        assert_eq!(b.dims(), &[2, 2, 2]);
        assert_eq!(b.to_vec(), (1..=8).collect::<Vec<u8>>());

        let s = array(&3i64).unwrap();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.item(), Ok(3));

        let slice: &[i32] = &[4, 5];
        assert_eq!(array(slice).unwrap().to_vec(), vec![4, 5]);
    }

    #[test]
    fn test_array_empty_keeps_rank() {
        let e: Vec<Vec<f64>> = Vec::new();
        let a = array(&e).unwrap();
        assert_eq!(a.dims(), &[0, 0]);

        let a = array(&vec![Vec::<f64>::new(), Vec::new()]).unwrap();
        assert_eq!(a.dims(), &[2, 0]);
    }

    #[test]
    fn test_array_ragged() {
        let err = array(&vec![vec![vec![1], vec![2]], vec![vec![3]]]).unwrap_err();
        assert_eq!(err, NdError::RaggedSequence { depth: 1 });

        let err = array(&vec![vec![vec![1, 2]], vec![vec![3]]]).unwrap_err();
        assert_eq!(err, NdError::RaggedSequence { depth: 2 });
    }

    #[test]
    fn test_like_constructors() {
        let a = NdArray::from_shape_vec([2, 3], vec![1.5f64; 6]).unwrap();
        let z = zeros_like(&a).unwrap();
        assert_eq!(z.dims(), &[2, 3]);
        assert_eq!(z.to_vec(), vec![0.0; 6]);
        assert!(!z.shares_buffer_with(&a));

        let o = ones_like(&vec![vec![1i32, 2], vec![3, 4]]).unwrap();
        assert_eq!(o.to_vec(), vec![1; 4]);

        let f = full_like(&[1.0f32, 2.0, 3.0], 9.0).unwrap();
        assert_eq!(f.to_vec(), vec![9.0; 3]);

        assert_eq!(empty_like(&a).unwrap().dims(), &[2, 3]);
        assert!(zeros_like(&vec![vec![1], vec![2, 3]]).is_err());
    }
}
