//! Elementwise lifting of scalar functions over arrays.
//!
//! Binary and ternary forms broadcast their operands with NumPy rules before
//! walking them in row-major order.

use ndcore_view::{broadcast_shape, NdArray, NdError, Result};

pub(crate) fn ensure_same_shape(a: &[usize], b: &[usize]) -> Result<()> {
    if a.len() != b.len() {
        return Err(NdError::RankMismatch(a.len(), b.len()));
    }
    if a != b {
        return Err(NdError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

/// Whether two arrays (of any element types) view the same allocation.
fn aliases<A, B>(a: &NdArray<A>, b: &NdArray<B>) -> bool {
    std::ptr::addr_eq(a.buffer().cells().as_ptr(), b.buffer().cells().as_ptr())
}

/// `out[i] = f(src[i])` into a fresh array.
pub fn map<A: Copy, D: Copy>(src: &NdArray<A>, f: impl Fn(A) -> D) -> Result<NdArray<D>> {
    NdArray::from_shape_vec(src.dims(), src.iter().map(f).collect())
}

/// Apply a function element-wise from source to destination.
///
/// Source and destination may have different element types. `dest` may
/// alias `src`.
pub fn map_into<D: Copy, A: Copy>(
    dest: &NdArray<D>,
    src: &NdArray<A>,
    f: impl Fn(A) -> D,
) -> Result<()> {
    ensure_same_shape(dest.dims(), src.dims())?;
    let same_view = dest.layout() == src.layout() && dest.offset() == src.offset();
    if aliases(dest, src) && !same_view {
        let staged: Vec<D> = src.iter().map(f).collect();
        return dest.assign_iter(staged);
    }
    dest.assign_iter(src.iter().map(f))
}

/// Binary element-wise operation with broadcasting: `out[i] = f(a[i], b[i])`.
pub fn zip_map2<A: Copy, B: Copy, D: Copy>(
    a: &NdArray<A>,
    b: &NdArray<B>,
    f: impl Fn(A, B) -> D,
) -> Result<NdArray<D>> {
    let shape = broadcast_shape(a.dims(), b.dims())?;
    let av = a.broadcast_to(shape.clone())?;
    let bv = b.broadcast_to(shape.clone())?;
    let data = av.iter().zip(bv.iter()).map(|(x, y)| f(x, y)).collect();
    NdArray::from_shape_vec(shape, data)
}

/// Binary element-wise operation into `dest`; `a` and `b` are broadcast to
/// `dest`'s shape.
pub fn zip_map2_into<D: Copy, A: Copy, B: Copy>(
    dest: &NdArray<D>,
    a: &NdArray<A>,
    b: &NdArray<B>,
    f: impl Fn(A, B) -> D,
) -> Result<()> {
    let av = a.broadcast_to(dest.dims())?;
    let bv = b.broadcast_to(dest.dims())?;
    let values = av.iter().zip(bv.iter()).map(|(x, y)| f(x, y));
    if aliases(dest, a) || aliases(dest, b) {
        let staged: Vec<D> = values.collect();
        return dest.assign_iter(staged);
    }
    dest.assign_iter(values)
}

/// Ternary element-wise operation with broadcasting, e.g. a `where` select.
pub fn zip_map3<A: Copy, B: Copy, C: Copy, D: Copy>(
    a: &NdArray<A>,
    b: &NdArray<B>,
    c: &NdArray<C>,
    f: impl Fn(A, B, C) -> D,
) -> Result<NdArray<D>> {
    let shape = broadcast_shape(a.dims(), b.dims())?;
    let shape = broadcast_shape(&shape, c.dims())?;
    let av = a.broadcast_to(shape.clone())?;
    let bv = b.broadcast_to(shape.clone())?;
    let cv = c.broadcast_to(shape.clone())?;
    let data = av
        .iter()
        .zip(bv.iter())
        .zip(cv.iter())
        .map(|((x, y), z)| f(x, y, z))
        .collect();
    NdArray::from_shape_vec(shape, data)
}

/// `out[i] = f(a[i], scalar)`.
pub fn map_scalar<A: Copy, S: Copy, D: Copy>(
    a: &NdArray<A>,
    scalar: S,
    f: impl Fn(A, S) -> D,
) -> Result<NdArray<D>> {
    map(a, |x| f(x, scalar))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_changes_type() {
        let a = NdArray::from_shape_vec([2, 2], vec![1, -2, 3, -4]).unwrap();
        let m = map(&a, |x: i32| x > 0).unwrap();
        assert_eq!(m.dims(), &[2, 2]);
        assert_eq!(m.to_vec(), vec![true, false, true, false]);
    }

    #[test]
    fn test_map_into_in_place() {
        let a = NdArray::from_vec(vec![1.0f64, 2.0, 3.0]);
        map_into(&a, &a, |x| x * 2.0).unwrap();
        assert_eq!(a.to_vec(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_map_into_aliased_transpose() {
        let a = NdArray::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let t = a.permuted(&[1, 0]).unwrap();
        map_into(&t, &a, |x| x).unwrap();
        assert_eq!(a.to_vec(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_map_into_shape_mismatch() {
        let a = NdArray::from_elem([2, 3], 0i32);
        let b = NdArray::from_elem([3, 2], 0i32);
        assert!(matches!(
            map_into(&a, &b, |x| x),
            Err(NdError::ShapeMismatch(..))
        ));
    }

    #[test]
    fn test_zip_map2_broadcast() {
        let col = NdArray::from_shape_vec([3, 1], vec![0, 10, 20]).unwrap();
        let row = NdArray::from_vec(vec![1, 2]);
        let s = zip_map2(&col, &row, |x, y| x + y).unwrap();
        assert_eq!(s.dims(), &[3, 2]);
        assert_eq!(s.to_vec(), vec![1, 2, 11, 12, 21, 22]);
    }

    #[test]
    fn test_zip_map2_incompatible() {
        let a = NdArray::from_elem([3], 0i32);
        let b = NdArray::from_elem([4], 0i32);
        assert!(zip_map2(&a, &b, |x, y| x + y).is_err());
    }

    #[test]
    fn test_zip_map2_into_accumulate() {
        let acc = NdArray::from_vec(vec![1, 1, 1]);
        let inc = NdArray::from_vec(vec![1, 2, 3]);
        zip_map2_into(&acc, &acc, &inc, |x, y| x + y).unwrap();
        assert_eq!(acc.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_zip_map3_select() {
        let cond = NdArray::from_vec(vec![true, false, true]);
        let x = NdArray::from_vec(vec![1, 2, 3]);
        let y = NdArray::scalar(0);
        let r = zip_map3(&cond, &x, &y, |c, a, b| if c { a } else { b }).unwrap();
        assert_eq!(r.to_vec(), vec![1, 0, 3]);
    }

    #[test]
    fn test_map_scalar() {
        let a = NdArray::from_vec(vec![1.0f32, 2.0]);
        let r = map_scalar(&a, 0.5f32, |x, s| x * s).unwrap();
        assert_eq!(r.to_vec(), vec![0.5, 1.0]);
    }
}
