//! Index containers and dimension bookkeeping
//!
//! Coordinates are 1-based throughout: a multi-index coordinate for
//! dimension `j` lives in `[1, d_j]`, and a linear index over the whole
//! array lives in `[1, prod(dim)]` with the first dimension varying
//! fastest (column-major order).

use crate::error::{Error, Result};

/// A column-major matrix of 32-bit coordinates
///
/// Used both as the COO index matrix (one row per nonzero) and as the
/// multi-index of a scattered assignment (one row per write). Column
/// `j` holds the 1-based coordinates along dimension `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexMatrix {
    data: Vec<i32>,
    nrow: usize,
    ncol: usize,
}

impl IndexMatrix {
    /// Create an index matrix from column-major storage
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] when `data.len() != nrow * ncol`.
    pub fn new(data: Vec<i32>, nrow: usize, ncol: usize) -> Result<Self> {
        let expected = nrow
            .checked_mul(ncol)
            .ok_or(Error::InvariantViolated("index matrix size overflow"))?;
        if data.len() != expected {
            return Err(Error::shape_mismatch(&[expected], &[data.len()]));
        }
        Ok(Self { data, nrow, ncol })
    }

    /// Build an index matrix from row slices
    ///
    /// Convenient for literal inputs: each slice is one row, all rows
    /// must have the same length.
    pub fn from_rows(rows: &[&[i32]]) -> Result<Self> {
        let nrow = rows.len();
        let ncol = rows.first().map_or(0, |r| r.len());
        let mut data = vec![0; nrow * ncol];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncol {
                return Err(Error::shape_mismatch(&[ncol], &[row.len()]));
            }
            for (j, &v) in row.iter().enumerate() {
                data[j * nrow + i] = v;
            }
        }
        Self::new(data, nrow, ncol)
    }

    /// Number of rows
    pub fn nrow(&self) -> usize {
        self.nrow
    }

    /// Number of columns
    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Read the entry at `(row, col)`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[col * self.nrow + row]
    }

    /// Borrow column `col` as a contiguous slice
    pub fn col(&self, col: usize) -> &[i32] {
        &self.data[col * self.nrow..(col + 1) * self.nrow]
    }
}

/// A vector of 1-based linear indices
///
/// Linear indices come in two widths: 32-bit integers, or 64-bit
/// floats holding integer values for arrays whose total length exceeds
/// `i32::MAX`.
#[derive(Clone, Copy, Debug)]
pub enum LinearIndex<'a> {
    /// 32-bit integer indices
    Int(&'a [i32]),
    /// Float indices with integer values
    Double(&'a [f64]),
}

impl LinearIndex<'_> {
    /// Number of indices
    pub fn len(&self) -> usize {
        match self {
            LinearIndex::Int(v) => v.len(),
            LinearIndex::Double(v) => v.len(),
        }
    }

    /// True when the vector holds no indices
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read entry `k` as a validated 1-based linear index
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIndex`] for entries that are not positive
    /// integers: values below one, NaN or infinite floats, floats with
    /// a fractional part, and floats too large for a 64-bit index.
    pub fn get(&self, k: usize) -> Result<u64> {
        match self {
            LinearIndex::Int(v) => {
                let i = v[k];
                if i < 1 {
                    return Err(Error::invalid_index("linear index is not positive"));
                }
                Ok(i as u64)
            }
            LinearIndex::Double(v) => {
                let x = v[k];
                if !x.is_finite() || x < 1.0 {
                    return Err(Error::invalid_index("linear index is not a positive number"));
                }
                if x != x.trunc() {
                    return Err(Error::invalid_index("linear index has a fractional part"));
                }
                if x >= 9_223_372_036_854_775_808.0 {
                    return Err(Error::invalid_index("linear index exceeds the 64-bit range"));
                }
                Ok(x as u64)
            }
        }
    }
}

/// Validate a dimension descriptor
///
/// Dimensions are given inner-first, outer dimension last. Extents of
/// zero are allowed (the array then has no elements); every extent must
/// fit a 32-bit coordinate.
pub(crate) fn check_dim(dim: &[usize]) -> Result<()> {
    if dim.is_empty() {
        return Err(Error::shape_mismatch(&[1], &[0]));
    }
    for &d in dim {
        if d > i32::MAX as usize {
            return Err(Error::shape_mismatch(&[i32::MAX as usize], &[d]));
        }
    }
    Ok(())
}

/// Cumulative products of the extents, saturating on overflow
///
/// `cumprod(dim)[j]` is the number of elements in a slice spanning
/// dimensions `0..=j`; the last entry is the array's total length.
pub(crate) fn cumprod(dim: &[usize]) -> Vec<u64> {
    let mut acc: u64 = 1;
    dim.iter()
        .map(|&d| {
            acc = acc.saturating_mul(d as u64);
            acc
        })
        .collect()
}

/// Total number of elements described by `dim`, saturating on overflow
pub(crate) fn total_len(dim: &[usize]) -> u64 {
    dim.iter().fold(1u64, |acc, &d| acc.saturating_mul(d as u64))
}

/// Check a 1-based coordinate against its extent, returning the 0-based
/// slot index
#[inline]
pub(crate) fn coord_to_index(coord: i32, extent: usize) -> Result<usize> {
    if coord < 1 || coord as usize > extent {
        return Err(Error::out_of_bounds(coord as i64, extent as u64));
    }
    Ok(coord as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_layout() {
        let m = IndexMatrix::from_rows(&[&[1, 4], &[2, 5], &[3, 6]]).unwrap();
        assert_eq!((m.nrow(), m.ncol()), (3, 2));
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(2, 1), 6);
        assert_eq!(m.col(1), &[4, 5, 6]);
    }

    #[test]
    fn test_linear_index_validation() {
        let idx = LinearIndex::Int(&[3, 0]);
        assert_eq!(idx.get(0).unwrap(), 3);
        assert!(matches!(idx.get(1), Err(Error::InvalidIndex { .. })));

        let idx = LinearIndex::Double(&[2.0, 2.5, f64::NAN, -1.0, 1e300]);
        assert_eq!(idx.get(0).unwrap(), 2);
        for k in 1..5 {
            assert!(matches!(idx.get(k), Err(Error::InvalidIndex { .. })));
        }
    }

    #[test]
    fn test_cumprod() {
        assert_eq!(cumprod(&[2, 3, 2]), vec![2, 6, 12]);
        assert_eq!(total_len(&[4, 0, 2]), 0);
    }

    #[test]
    fn test_coord_to_index() {
        assert_eq!(coord_to_index(1, 3).unwrap(), 0);
        assert_eq!(coord_to_index(3, 3).unwrap(), 2);
        assert!(coord_to_index(0, 3).is_err());
        assert!(coord_to_index(4, 3).is_err());
    }
}
