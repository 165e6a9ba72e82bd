//! Element copies between arrays of equal shape.

use ndcore_view::{NdArray, NdError, Result};

/// Copy elements from source to destination: `dest[i] = src[i]`.
///
/// Both arrays must have the same dims. Overlapping views of one buffer are
/// handled by staging the source first.
pub fn copy_into<T: Copy>(dest: &NdArray<T>, src: &NdArray<T>) -> Result<()> {
    let dst_dims = dest.dims();
    let src_dims = src.dims();
    if dst_dims.len() != src_dims.len() {
        return Err(NdError::RankMismatch(dst_dims.len(), src_dims.len()));
    }
    if dst_dims != src_dims {
        return Err(NdError::ShapeMismatch(
            dst_dims.to_vec(),
            src_dims.to_vec(),
        ));
    }

    if dest.shares_buffer_with(src) {
        return dest.assign_iter(src.to_vec());
    }

    // Fast path: both contiguous
    if dest.is_contiguous() && src.is_contiguous() {
        let (dst_buf, src_buf) = (dest.buffer(), src.buffer());
        let (d0, s0) = (dest.offset(), src.offset());
        for i in 0..dest.size() {
            dst_buf.set(d0 + i, src_buf.get(s0 + i));
        }
        return Ok(());
    }

    dest.assign_iter(src.iter())
}

/// A fresh 1-D array holding the elements of `a` in row-major order.
///
/// Always copies, even when `a` is already contiguous.
pub fn flatten<T: Copy>(a: &NdArray<T>) -> NdArray<T> {
    log::debug!("flatten {:?} ({} elements)", a.dims(), a.size());
    NdArray::from_vec(a.to_vec())
}

/// `a` itself if it is row-major contiguous, otherwise a contiguous copy.
pub fn ascontiguous<T: Copy>(a: &NdArray<T>) -> NdArray<T> {
    if a.is_contiguous() {
        a.clone()
    } else {
        log::debug!("ascontiguous: copying strided {:?}", a.dims());
        a.deep_copy()
    }
}
