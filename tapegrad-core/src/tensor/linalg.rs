use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Tensor {
    /// Matrix product of two rank-2 tensors: `[m, k] x [k, n] -> [m, n]`.
    ///
    /// # Errors
    /// `RankMismatch` for non-matrices, `IncompatibleShapes` when the inner
    /// dimensions disagree.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, TapegradError> {
        let (m, k) = self.dims2("matmul")?;
        let (k2, n) = other.dims2("matmul")?;
        if k != k2 {
            return Err(TapegradError::IncompatibleShapes {
                shape1: self.shape.clone(),
                shape2: other.shape.clone(),
                operation: "matmul".to_string(),
            });
        }
        let mut out = vec![0.0; m * n];
        // i-p-j loop order keeps the inner loop contiguous in both `other` and `out`.
        for i in 0..m {
            let row = &mut out[i * n..(i + 1) * n];
            for p in 0..k {
                let a = self.data[i * k + p];
                if a == 0.0 {
                    continue;
                }
                let other_row = &other.data[p * n..(p + 1) * n];
                for (o, &b) in row.iter_mut().zip(other_row.iter()) {
                    *o += a * b;
                }
            }
        }
        Ok(Tensor {
            data: out,
            shape: vec![m, n],
        })
    }

    /// Transposes a rank-2 tensor.
    pub fn transpose(&self) -> Result<Tensor, TapegradError> {
        let (rows, cols) = self.dims2("transpose")?;
        let mut out = vec![0.0; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                out[c * rows + r] = self.data[r * cols + c];
            }
        }
        Ok(Tensor {
            data: out,
            shape: vec![cols, rows],
        })
    }
}
