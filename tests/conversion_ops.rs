//! Integration tests for construction and materialization
//!
//! Covers COO, CSC and dense conversions in both directions, the
//! round-trip guarantees, and the input-contract errors.

mod common;

use common::*;
use sparr::prelude::*;

// ---------------------------------------------------------------------------
// COO -> SVT
// ---------------------------------------------------------------------------

#[test]
fn test_coo_to_svt_2d() {
    let svt = example_3x2();
    assert_eq!(svt.nnz(), 3);
    assert_eq!(svt.kind(), Kind::Integer);
    // column-major dense: first column 5 0 6, second column 0 7 0
    assert_eq!(dense_of(&svt), vec![5, 0, 6, 0, 7, 0]);
    assert_invariants(&svt);
}

#[test]
fn test_coo_to_svt_1d() {
    let svt = svt(&[5], &[&[2], &[4]], ValueVec::from(vec![9, 8]));
    assert_eq!(svt.nnz(), 2);
    assert_eq!(dense_of(&svt), vec![0, 9, 0, 8, 0]);
    let leaf = svt.descend(&[]).unwrap().unwrap();
    assert_eq!(leaf.positions(), &[2, 4]);
}

#[test]
fn test_coo_to_svt_3d() {
    // dim (2, 3, 2): two nonzeros in the first outer slice, one in the second
    let svt = svt(
        &[2, 3, 2],
        &[&[1, 1, 1], &[2, 3, 1], &[1, 2, 2]],
        ValueVec::from(vec![1, 2, 3]),
    );
    assert_eq!(svt.nnz(), 3);
    assert_eq!(dense_of(&svt), vec![1, 0, 0, 0, 0, 2, 0, 0, 3, 0, 0, 0]);
    assert_invariants(&svt);
}

#[test]
fn test_coo_empty_is_empty_tree() {
    let arr = CooArray::new(
        vec![3, 2],
        IndexMatrix::new(Vec::new(), 0, 2).unwrap(),
        ValueVec::from(Vec::<i32>::new()),
    )
    .unwrap();
    let svt = arr.to_svt().unwrap();
    assert!(svt.is_empty());
    assert_eq!(svt.nnz(), 0);
    assert_eq!(dense_of(&svt), vec![0; 6]);
}

#[test]
fn test_coo_out_of_bounds() {
    let arr = coo(&[3, 2], &[&[4, 1]], ValueVec::from(vec![5]));
    assert!(matches!(arr.to_svt(), Err(Error::IndexOutOfBounds { .. })));
    let arr = coo(&[3, 2], &[&[1, 0]], ValueVec::from(vec![5]));
    assert!(matches!(arr.to_svt(), Err(Error::IndexOutOfBounds { .. })));
}

#[test]
fn test_coo_unsorted_rows_rejected() {
    // positions within the first column arrive out of order
    let arr = coo(&[3, 2], &[&[3, 1], &[1, 1]], ValueVec::from(vec![6, 5]));
    assert!(matches!(arr.to_svt(), Err(Error::InvalidIndex { .. })));
}

#[test]
fn test_coo_shape_contracts() {
    // row count differs from the data length
    let idx = IndexMatrix::from_rows(&[&[1, 1]]).unwrap();
    assert!(matches!(
        CooArray::new(vec![3, 2], idx, ValueVec::from(vec![1, 2])),
        Err(Error::ShapeMismatch { .. })
    ));
    // column count differs from the dimension count
    let idx = IndexMatrix::from_rows(&[&[1, 1]]).unwrap();
    assert!(matches!(
        CooArray::new(vec![3, 2, 2], idx, ValueVec::from(vec![1])),
        Err(Error::ShapeMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// SVT -> COO and round-trips
// ---------------------------------------------------------------------------

#[test]
fn test_svt_to_coo() {
    let svt = example_3x2();
    let coo = svt.to_coo().unwrap();
    assert_eq!(coo.nnz(), 3);
    assert_eq!(coo.nzindex().col(0), &[1, 3, 2]);
    assert_eq!(coo.nzindex().col(1), &[1, 1, 2]);
    assert_eq!(coo.nzdata().as_ints().unwrap(), &[5, 6, 7]);
}

#[test]
fn test_coo_roundtrip() {
    for svt in [
        example_3x2(),
        svt(&[5], &[&[1], &[5]], ValueVec::from(vec![-1, 1])),
        svt(
            &[2, 3, 2],
            &[&[1, 1, 1], &[2, 3, 1], &[1, 2, 2]],
            ValueVec::from(vec![1, 2, 3]),
        ),
    ] {
        let back = svt.to_coo().unwrap().to_svt().unwrap();
        assert_eq!(back, svt);
    }
}

// ---------------------------------------------------------------------------
// CSC
// ---------------------------------------------------------------------------

#[test]
fn test_svt_to_csc() {
    let csc = example_3x2().to_csc().unwrap();
    assert_eq!(csc.col_ptrs(), &[0, 2, 3]);
    assert_eq!(csc.row_indices(), &[0, 2, 1]);
    assert_eq!(csc.values().as_ints().unwrap(), &[5, 6, 7]);
}

#[test]
fn test_csc_to_svt() {
    let csc = CscMatrix::new(
        [3, 2],
        vec![0, 2, 3],
        vec![0, 2, 1],
        ValueVec::from(vec![5, 6, 7]),
    )
    .unwrap();
    assert_eq!(csc.to_svt().unwrap(), example_3x2());
}

#[test]
fn test_csc_roundtrip_with_empty_columns() {
    let svt = svt(
        &[4, 3],
        &[&[2, 2], &[4, 2]],
        ValueVec::from(vec![1.5, -2.5]),
    );
    let csc = svt.to_csc().unwrap();
    assert_eq!(csc.col_ptrs(), &[0, 0, 2, 2]);
    assert_eq!(csc.to_svt().unwrap(), svt);
}

#[test]
fn test_csc_requires_2d() {
    let svt = svt(&[2, 2, 2], &[&[1, 1, 1]], ValueVec::from(vec![1]));
    assert!(matches!(svt.to_csc(), Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_empty_svt_to_csc() {
    let svt = SvtArray::new(vec![3, 2], Kind::Double).unwrap();
    let csc = svt.to_csc().unwrap();
    assert_eq!(csc.col_ptrs(), &[0, 0, 0]);
    assert_eq!(csc.nnz(), 0);
    assert_eq!(csc.to_svt().unwrap(), svt);
}

// ---------------------------------------------------------------------------
// Dense
// ---------------------------------------------------------------------------

#[test]
fn test_dense_to_svt_suppresses_zeros() {
    let dense = dense_ints(&[3, 2], &[5, 0, 6, 0, 7, 0]);
    let svt = dense.to_svt().unwrap();
    assert_eq!(svt, example_3x2());
}

#[test]
fn test_dense_roundtrip_3d() {
    // dim (2, 3, 2), nonzeros at linear positions 1, 8 and 12
    let mut data = vec![0.0f64; 12];
    data[0] = -1.0;
    data[7] = 2.0;
    data[11] = 3.0;
    let dense = dense_doubles(&[2, 3, 2], &data);
    let svt = dense.to_svt().unwrap();
    assert_eq!(svt.nnz(), 3);
    assert_invariants(&svt);
    let back = svt.to_dense().unwrap();
    assert_eq!(back, dense);
    assert_eq!(back.data().as_doubles().unwrap(), &data[..]);
}

#[test]
fn test_dense_svt_dense_all_kinds() {
    // one nonzero and one zero per kind
    let cases = [
        ValueVec::from_bools(&[true, false]),
        ValueVec::from(vec![3, 0]),
        ValueVec::from(vec![0.5, 0.0]),
        ValueVec::from(vec![Complex128::new(0.0, 2.0), Complex128::ZERO]),
        ValueVec::from_strs(&["hi", ""]),
        ValueVec::from(vec![7u8, 0u8]),
        ValueVec::from(vec![Some(Opaque::new(1u8)), None]),
    ];
    for data in cases {
        let dense = DenseArray::new(vec![2], data).unwrap();
        let svt = dense.to_svt().unwrap();
        assert_eq!(svt.nnz(), 1);
        assert_eq!(svt.to_dense().unwrap(), dense);
    }
}

#[test]
fn test_dense_zero_extent() {
    let dense = DenseArray::zeros(vec![3, 0], Kind::Integer).unwrap();
    let svt = dense.to_svt().unwrap();
    assert!(svt.is_empty());
    assert_eq!(svt.to_dense().unwrap(), dense);
}

#[test]
fn test_dense_shape_contract() {
    assert!(matches!(
        DenseArray::new(vec![3, 2], ValueVec::from(vec![1, 2, 3])),
        Err(Error::ShapeMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// Registry and lookups
// ---------------------------------------------------------------------------

#[test]
fn test_kind_tokens() {
    assert_eq!(Kind::parse("double").unwrap(), Kind::Double);
    assert_eq!("logical".parse::<Kind>().unwrap(), Kind::Logical);
    assert!(matches!(
        Kind::parse("numeric"),
        Err(Error::UnsupportedKind { .. })
    ));
}

#[test]
fn test_get_matches_dense() {
    let svt = example_3x2();
    let dense = svt.to_dense().unwrap();
    for row in 1..=3i32 {
        for col in 1..=2i32 {
            assert_eq!(
                svt.get(&[row, col]).unwrap(),
                dense.get(&[row, col]).unwrap()
            );
        }
    }
}

#[test]
fn test_nnz_matches_dense_count() {
    let svt = svt(
        &[4, 2, 2],
        &[&[1, 1, 1], &[2, 1, 1], &[4, 2, 1], &[3, 1, 2]],
        ValueVec::from(vec![1.0, 2.0, 3.0, 4.0]),
    );
    assert_eq!(svt.nnz(), svt.to_dense().unwrap().count_nonzero());
}

#[test]
fn test_character_coo_roundtrip() {
    let svt = svt(
        &[3, 2],
        &[&[2, 1], &[1, 2]],
        ValueVec::from_strs(&["alpha", "beta"]),
    );
    assert_eq!(svt.nnz(), 2);
    let back = svt.to_coo().unwrap().to_svt().unwrap();
    assert_eq!(back, svt);
    assert_eq!(
        svt.get(&[2, 1]).unwrap(),
        Scalar::Character(std::sync::Arc::from("alpha"))
    );
}
