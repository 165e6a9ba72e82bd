use ndcore_view::{NdArray, NdError, SharedBuffer};

#[test]
fn test_views_share_one_buffer() {
    let a = NdArray::from_shape_vec([2, 3, 4], (0..24).collect::<Vec<i32>>()).unwrap();
    let slab = a.slab(1).unwrap();
    let col = slab.slab_along(1, 2).unwrap();
    let t = a.permuted(&[2, 0, 1]).unwrap();
    let r = a.reshape([6, 4]).unwrap();

    assert_eq!(col.to_vec(), vec![14, 18, 22]);
    col.set(&[1], -1);
    assert_eq!(a.get(&[1, 1, 2]), -1);
    assert_eq!(t.get(&[2, 1, 1]), -1);
    assert_eq!(r.get(&[4, 2]), -1);
    assert_eq!(a.buffer().ref_count(), 5);

    drop((slab, col, t, r));
    assert_eq!(a.buffer().ref_count(), 1);
}

#[test]
fn test_buffer_outlives_original_array() {
    let view = {
        let a = NdArray::from_shape_vec([2, 2], vec![1.0f64, 2.0, 3.0, 4.0]).unwrap();
        a.slab(1).unwrap()
    };
    assert_eq!(view.to_vec(), vec![3.0, 4.0]);
    assert_eq!(view.offset(), 2);
}

#[test]
fn test_iter_visits_each_element_once() {
    let buf = SharedBuffer::from_vec((0..12).collect::<Vec<u32>>());
    let v = NdArray::from_buffer(buf, &[3, 2, 2], &[1, 6, 3], 0).unwrap();
    let mut seen = v.to_vec();
    assert_eq!(seen.len(), v.size());
    seen.sort_unstable();
    assert_eq!(seen, (0..12).collect::<Vec<u32>>());
}

#[test]
fn test_indexed_iter_matches_get() {
    let a = NdArray::from_fn([3, 4], |i| i[0] as i64 * 4 + i[1] as i64);
    let t = a.permuted(&[1, 0]).unwrap();
    for (idx, v) in t.indexed_iter() {
        assert_eq!(t.get(&idx), v);
    }
}

#[test]
fn test_from_buffer_rank_mismatch() {
    let buf = SharedBuffer::from_vec(vec![0u8; 4]);
    assert_eq!(
        NdArray::from_buffer(buf, &[2, 2], &[1], 0).unwrap_err(),
        NdError::RankMismatch(2, 1)
    );
}

#[test]
fn test_high_rank_spills_past_inline_capacity() {
    let dims = [1usize, 2, 1, 2, 1, 2, 1, 2];
    let a = NdArray::from_fn(dims, |i| i.iter().sum::<usize>());
    assert_eq!(a.ndim(), 8);
    assert_eq!(a.size(), 16);
    let t = a.permuted(&[7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
    assert_eq!(t.get(&[1, 0, 1, 0, 0, 0, 1, 0]), 3);
}
