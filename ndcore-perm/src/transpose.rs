//! Transpose into a freshly allocated array.
//!
//! The source is read once in row-major logical order. Each flat position `i`
//! is decomposed into source coordinates with `(i / stride[k]) % dims[k]`
//! over the source's row-major strides, the coordinates are permuted, and
//! the element is stored at the matching row-major position of the output.

use ndcore_view::{row_major_strides, validate_permutation, NdArray, Result};

/// Reverse the order of the axes. Rank 0 and 1 give a plain copy.
pub fn transpose<T: Copy>(a: &NdArray<T>) -> NdArray<T> {
    let perm: Vec<usize> = (0..a.ndim()).rev().collect();
    transpose_axes(a, &perm).expect("transpose: reversed axes form a valid permutation")
}

/// Output axis `k` is input axis `perm[k]`:
/// `out[i_perm[0], .., i_perm[N-1]] == a[i_0, .., i_N-1]`.
///
/// The permutation is validated before anything is allocated.
pub fn transpose_axes<T: Copy>(a: &NdArray<T>, perm: &[usize]) -> Result<NdArray<T>> {
    validate_permutation(perm, a.ndim())?;
    let dims = a.dims();
    let out_dims: Vec<usize> = perm.iter().map(|&p| dims[p]).collect();
    log::debug!("transpose {:?} by {:?} -> {:?}", dims, perm, out_dims);

    let src = a.to_vec();
    if src.is_empty() {
        return NdArray::from_shape_vec(out_dims, src);
    }
    let old_strides = row_major_strides(dims);
    let out_strides = row_major_strides(&out_dims);

    let mut out = src.clone();
    for (i, &value) in src.iter().enumerate() {
        let mut pos = 0usize;
        for (k, &p) in perm.iter().enumerate() {
            let coord = (i / old_strides[p] as usize) % dims[p];
            pos += coord * out_strides[k] as usize;
        }
        out[pos] = value;
    }
    NdArray::from_shape_vec(out_dims, out)
}
