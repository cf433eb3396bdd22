use crate::error::TapegradError;
use crate::tensor::Tensor;

impl Tensor {
    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Mean of all elements. `NaN` for an empty tensor.
    pub fn mean(&self) -> f64 {
        self.sum() / self.data.len() as f64
    }

    /// Column sums of a rank-2 tensor: `[rows, cols] -> [cols]`.
    pub fn sum_axis0(&self) -> Result<Tensor, TapegradError> {
        let (_, cols) = self.dims2("sum_axis0")?;
        let mut out = vec![0.0; cols];
        if cols > 0 {
            for row in self.data.chunks(cols) {
                for (o, &v) in out.iter_mut().zip(row.iter()) {
                    *o += v;
                }
            }
        }
        Ok(Tensor {
            data: out,
            shape: vec![cols],
        })
    }

    /// Number of elements along the last axis, and how many such rows there are.
    ///
    /// Rank-0 tensors count as a single row of one element.
    pub(crate) fn last_axis_rows(&self) -> (usize, usize) {
        let width = self.shape.last().copied().unwrap_or(1);
        let rows = if width == 0 { 0 } else { self.data.len() / width };
        (rows, width)
    }

    /// `log(sum(exp(x)))` over the last axis, computed with max subtraction.
    ///
    /// Returns one value per row. A row whose maximum is infinite returns that
    /// maximum unchanged (`+inf`, or `-inf` for an all `-inf` row).
    pub fn logsumexp_rows(&self) -> Vec<f64> {
        let (_, width) = self.last_axis_rows();
        if width == 0 {
            return Vec::new();
        }
        self.data
            .chunks(width)
            .map(|row| {
                let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if max.is_infinite() {
                    return max;
                }
                let sum: f64 = row.iter().map(|&x| (x - max).exp()).sum();
                max + sum.ln()
            })
            .collect()
    }

    /// Index of the largest element in each row (last axis). Ties keep the first index.
    pub fn argmax_rows(&self) -> Vec<usize> {
        let (_, width) = self.last_axis_rows();
        if width == 0 {
            return Vec::new();
        }
        self.data
            .chunks(width)
            .map(|row| {
                let mut best = 0;
                for (i, &v) in row.iter().enumerate() {
                    if v > row[best] {
                        best = i;
                    }
                }
                best
            })
            .collect()
    }
}
