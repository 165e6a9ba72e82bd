use approx::assert_relative_eq;
use ndcore_kernel::{
    cumsum_axis, fold_axis, map_into, max_axis, mean, min_axis, reduce, scan_axis, sum, sum_axis,
    zip_map2_into,
};
use ndcore_view::{NdArray, SharedBuffer};

fn make_matrix(rows: usize, cols: usize) -> NdArray<f64> {
    NdArray::from_fn([rows, cols], |idx| (idx[0] * cols + idx[1]) as f64)
}

#[test]
fn test_map_into_transposed() {
    let a = make_matrix(8, 5);
    let a_t = a.permuted(&[1, 0]).unwrap();
    let out = NdArray::from_elem([5, 8], 0.0);

    map_into(&out, &a_t, |x| x * 2.0).unwrap();

    for i in 0..5 {
        for j in 0..8 {
            assert_relative_eq!(out.get(&[i, j]), a.get(&[j, i]) * 2.0, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_zip_map2_into_broadcast_row() {
    let a = make_matrix(3, 4);
    let row = NdArray::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
    let out = NdArray::from_elem([3, 4], 0.0);
    zip_map2_into(&out, &a, &row, |x, y| x * y).unwrap();
    assert_relative_eq!(out.get(&[2, 3]), 11.0 * 4.0);
    assert_relative_eq!(out.get(&[1, 0]), 4.0);
}

#[test]
fn test_reduce_negative_stride_view() {
    let buf = SharedBuffer::from_vec((1..=6).map(f64::from).collect::<Vec<_>>());
    // rows reversed
    let v = NdArray::from_buffer(buf, &[2, 3], &[-3, 1], 3).unwrap();
    assert_eq!(v.to_vec(), vec![4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
    assert_relative_eq!(sum(&v), 21.0);
    assert_eq!(sum_axis(&v, 0).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(cumsum_axis(&v, 0).unwrap().to_vec(), vec![4.0, 5.0, 6.0, 5.0, 7.0, 9.0]);
}

#[test]
fn test_axis_reductions_of_broadcast_view() {
    let col = NdArray::from_shape_vec([3, 1], vec![1.0, 2.0, 3.0]).unwrap();
    let b = col.broadcast_to([3, 4]).unwrap();
    assert_eq!(sum_axis(&b, 1).unwrap().to_vec(), vec![4.0, 8.0, 12.0]);
    assert_eq!(max_axis(&b, 0).unwrap().to_vec(), vec![3.0; 4]);
    assert_eq!(min_axis(&b, 0).unwrap().to_vec(), vec![1.0; 4]);
}

#[test]
fn test_rank4_axis_sums_agree_with_full_sum() {
    let a = NdArray::from_fn([2, 3, 2, 2], |i| (i[0] + 2 * i[1] + 3 * i[2] + 5 * i[3]) as f64);
    let total = sum(&a);
    for axis in 0..4 {
        let r = sum_axis(&a, axis).unwrap();
        assert_eq!(r.ndim(), 3);
        assert_relative_eq!(sum(&r), total, epsilon = 1e-10);
    }
}

#[test]
fn test_fold_and_scan_custom_ops() {
    let a = NdArray::from_shape_vec([2, 3], vec![1.0, 5.0, 2.0, 4.0, 3.0, 6.0]).unwrap();
    let running_max = scan_axis(&a, 1, f64::max).unwrap();
    assert_eq!(running_max.to_vec(), vec![1.0, 5.0, 5.0, 4.0, 4.0, 6.0]);

    let sum_sq = fold_axis(&a, 0, 0.0, |acc, x| acc + x * x).unwrap();
    assert_eq!(sum_sq.to_vec(), vec![17.0, 34.0, 40.0]);
}

#[test]
fn test_reduce_and_mean() {
    let a = make_matrix(4, 4);
    let count_even = reduce(&a, |x| usize::from(x as i64 % 2 == 0), |p, q| p + q, 0);
    assert_eq!(count_even, 8);
    assert_relative_eq!(mean(&a), 7.5);
}
