use crate::error::{QuantumError, QuantumResult};

/// Row-major 0/1 matrix: one row per repetition, one column per measured qubit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitMatrix {
    cols: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            data: Vec::new(),
        }
    }

    pub fn from_rows(cols: usize, rows: &[Vec<u8>]) -> QuantumResult<Self> {
        let mut out = Self::new(cols);
        for row in rows {
            out.push_row(row)?;
        }
        Ok(out)
    }

    /// `times` copies of `row`.
    pub fn repeat_row(row: &[u8], times: usize) -> Self {
        let mut data = Vec::with_capacity(row.len() * times);
        for _ in 0..times {
            data.extend(row.iter().map(|b| b & 1));
        }
        Self {
            cols: row.len(),
            data,
        }
    }

    pub fn push_row(&mut self, row: &[u8]) -> QuantumResult<()> {
        if row.len() != self.cols {
            return Err(QuantumError::RaggedRow {
                expected: self.cols,
                got: row.len(),
            });
        }
        self.data.extend(row.iter().map(|b| b & 1));
        Ok(())
    }

    /// Append all rows of `other`.
    pub fn extend(&mut self, other: &BitMatrix) -> QuantumResult<()> {
        if other.cols != self.cols {
            return Err(QuantumError::RaggedRow {
                expected: self.cols,
                got: other.cols,
            });
        }
        self.data.extend_from_slice(&other.data);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.data.len() / self.cols
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, i: usize) -> &[u8] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks(self.cols.max(1))
    }

    /// New matrix made of the given columns, in that order.
    pub fn select_columns(&self, columns: &[usize]) -> BitMatrix {
        let mut data = Vec::with_capacity(self.rows() * columns.len());
        for row in self.iter_rows() {
            data.extend(columns.iter().map(|&c| row[c]));
        }
        BitMatrix {
            cols: columns.len(),
            data,
        }
    }

    /// Row-wise exclusive-or with `mask`; undoes a deliberate bit flip.
    pub fn xor_mask(&self, mask: &[bool]) -> QuantumResult<BitMatrix> {
        if mask.len() != self.cols {
            return Err(QuantumError::RaggedRow {
                expected: self.cols,
                got: mask.len(),
            });
        }
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, &b)| b ^ u8::from(mask[i % self.cols]))
            .collect();
        Ok(BitMatrix {
            cols: self.cols,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_mask_flips_selected_columns() {
        let m = BitMatrix::from_rows(3, &[vec![0, 1, 1], vec![1, 0, 0]]).unwrap();
        let f = m.xor_mask(&[true, false, true]).unwrap();
        assert_eq!(f.row(0), &[1, 1, 0]);
        assert_eq!(f.row(1), &[0, 0, 1]);
        assert_eq!(f.xor_mask(&[true, false, true]).unwrap(), m);
    }

    #[test]
    fn select_and_repeat() {
        let m = BitMatrix::repeat_row(&[1, 0, 1], 4);
        assert_eq!(m.rows(), 4);
        let s = m.select_columns(&[2, 1]);
        assert_eq!(s.cols(), 2);
        assert!(s.iter_rows().all(|r| r == [1, 0]));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut m = BitMatrix::new(2);
        assert!(m.push_row(&[0, 1]).is_ok());
        assert!(matches!(
            m.push_row(&[0, 1, 1]),
            Err(QuantumError::RaggedRow { expected: 2, got: 3 })
        ));
        assert_eq!(m.rows(), 1);
    }
}
