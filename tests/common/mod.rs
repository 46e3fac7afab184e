//! Common test utilities
#![allow(dead_code)]

use sparr::prelude::*;

/// Build a COO array from row-major index literals
pub fn coo(dim: &[usize], rows: &[&[i32]], nzdata: ValueVec) -> CooArray {
    CooArray::new(dim.to_vec(), IndexMatrix::from_rows(rows).unwrap(), nzdata).unwrap()
}

/// Build an SVT straight from COO literals
pub fn svt(dim: &[usize], rows: &[&[i32]], nzdata: ValueVec) -> SvtArray {
    coo(dim, rows, nzdata).to_svt().unwrap()
}

/// Build an integer dense array from a column-major buffer
pub fn dense_ints(dim: &[usize], data: &[i32]) -> DenseArray {
    DenseArray::new(dim.to_vec(), ValueVec::from(data.to_vec())).unwrap()
}

/// Build a double dense array from a column-major buffer
pub fn dense_doubles(dim: &[usize], data: &[f64]) -> DenseArray {
    DenseArray::new(dim.to_vec(), ValueVec::from(data.to_vec())).unwrap()
}

/// The column-major integer buffer of an array's dense form
pub fn dense_of(svt: &SvtArray) -> Vec<i32> {
    svt.to_dense().unwrap().data().as_ints().unwrap().to_vec()
}

/// The 3 x 2 integer matrix used throughout:
///
/// ```text
/// 5 0
/// 0 7
/// 6 0
/// ```
pub fn example_3x2() -> SvtArray {
    svt(
        &[3, 2],
        &[&[1, 1], &[3, 1], &[2, 2]],
        ValueVec::from(vec![5, 6, 7]),
    )
}

/// Assert the full set of tree invariants on an array
///
/// Every leaf must have strictly ascending in-range positions and no
/// zero values, and no reachable subtree may be empty-but-present.
/// Checked through the materialized COO form plus the public accessors.
pub fn assert_invariants(svt: &SvtArray) {
    let d0 = svt.dim()[0];
    let coo = svt.to_coo().unwrap();
    assert_eq!(coo.nnz() as u64, svt.nnz());
    for row in 0..coo.nnz() {
        for (j, &d) in svt.dim().iter().enumerate() {
            let c = coo.nzindex().get(row, j);
            assert!(c >= 1 && c as usize <= d, "coordinate {c} outside 1..={d}");
        }
        assert!(!coo.nzdata().is_zero(row), "stored zero at COO row {row}");
    }
    // dense agreement
    let dense = svt.to_dense().unwrap();
    assert_eq!(dense.count_nonzero(), svt.nnz());
    // every stored position must be addressable through descend()
    if svt.ndim() >= 2 {
        for row in 0..coo.nnz() {
            let path: Vec<i32> = (1..svt.ndim())
                .map(|j| coo.nzindex().get(row, j))
                .collect();
            let leaf = svt.descend(&path).unwrap().expect("missing leaf");
            let pos = coo.nzindex().get(row, 0);
            assert!(leaf.positions().binary_search(&pos).is_ok());
            assert!(leaf.positions().windows(2).all(|w| w[0] < w[1]));
            assert!(leaf
                .positions()
                .iter()
                .all(|&p| p >= 1 && p as usize <= d0));
        }
    }
}
