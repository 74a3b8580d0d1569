use ndarray::{Array1, Array2};
use crate::drivers::ProbeError;
// Relative size below which a diagonal entry of R counts as zero.
const RANK_TOLERANCE: f64 = 1e-12;
/// Least-squares polynomial, coefficients highest degree first.
#[derive(Clone, Debug)]
pub struct PolyFit {
    pub degree: usize,
    pub coefficients: Array1<f64>,
}
impl PolyFit {
    pub fn label(&self) -> String {
        format!("polyfit: {}. order", self.degree)
    }
    pub fn evaluate(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| self.evaluate_at(v))
    }
    pub fn evaluate_at(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }
    pub fn rms_residual(&self, x: &Array1<f64>, y: &Array1<f64>) -> f64 {
        if x.is_empty() {
            return 0.0;
        }
        let residual = self.evaluate(x) - y;
        (residual.mapv(|r| r * r).sum() / x.len() as f64).sqrt()
    }
}
/// Fits `y ≈ p(x)` by Householder QR on a column-scaled Vandermonde matrix.
pub fn polyfit(x: &Array1<f64>, y: &Array1<f64>, degree: usize) -> Result<PolyFit, ProbeError> {
    let n = x.len();
    let m = degree + 1;
    if y.len() != n {
        return Err(ProbeError::Config(format!(
            "x and y lengths differ ({n} vs {})",
            y.len()
        )));
    }
    if n < m {
        return Err(ProbeError::InsufficientSamples { needed: m, got: n });
    }
    let mut a = Array2::<f64>::zeros((n, m));
    for (i, &xi) in x.iter().enumerate() {
        let mut power = 1.0;
        for j in (0..m).rev() {
            a[[i, j]] = power;
            power *= xi;
        }
    }
    // Scale each column to unit norm so high powers of large x stay comparable.
    let scale: Vec<f64> = (0..m)
        .map(|j| {
            let norm = a.column(j).mapv(|v| v * v).sum().sqrt();
            if norm > 0.0 {
                norm
            } else {
                1.0
            }
        })
        .collect();
    for (j, &s) in scale.iter().enumerate() {
        a.column_mut(j).mapv_inplace(|v| v / s);
    }
    let mut b = y.clone();
    householder_in_place(&mut a, &mut b);
    let max_diag = (0..m).map(|k| a[[k, k]].abs()).fold(0.0f64, f64::max);
    if max_diag == 0.0 {
        return Err(ProbeError::SingularFit);
    }
    let mut z = vec![0.0; m];
    for k in (0..m).rev() {
        let diag = a[[k, k]];
        if diag.abs() <= max_diag * RANK_TOLERANCE {
            return Err(ProbeError::SingularFit);
        }
        let tail: f64 = (k + 1..m).map(|j| a[[k, j]] * z[j]).sum();
        z[k] = (b[k] - tail) / diag;
    }
    let coefficients = z.iter().zip(&scale).map(|(zk, s)| zk / s).collect();
    Ok(PolyFit {
        degree,
        coefficients,
    })
}
// Reduces `a` to upper-triangular R, applying the same reflections to `b`.
fn householder_in_place(a: &mut Array2<f64>, b: &mut Array1<f64>) {
    let (n, m) = a.dim();
    for k in 0..m {
        let norm = (k..n).map(|i| a[[i, k]] * a[[i, k]]).sum::<f64>().sqrt();
        if norm == 0.0 {
            continue;
        }
        let alpha = if a[[k, k]] > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = (k..n).map(|i| a[[i, k]]).collect();
        v[0] -= alpha;
        let v_norm2: f64 = v.iter().map(|vi| vi * vi).sum();
        if v_norm2 == 0.0 {
            continue;
        }
        for j in k..m {
            let dot: f64 = v.iter().enumerate().map(|(i, vi)| vi * a[[k + i, j]]).sum();
            let factor = 2.0 * dot / v_norm2;
            for (i, vi) in v.iter().enumerate() {
                a[[k + i, j]] -= factor * vi;
            }
        }
        let dot: f64 = v.iter().enumerate().map(|(i, vi)| vi * b[k + i]).sum();
        let factor = 2.0 * dot / v_norm2;
        for (i, vi) in v.iter().enumerate() {
            b[k + i] -= factor * vi;
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < tol, "{actual:?} != {expected:?}");
        }
    }
    #[test]
    fn parabola_through_three_points() {
        let fit = polyfit(&array![-1.0, 0.0, 1.0], &array![1.0, 0.0, 1.0], 2).unwrap();
        assert_eq!(fit.coefficients.len(), 3);
        assert_close(&fit.coefficients.to_vec(), &[1.0, 0.0, 0.0], 1e-10);
        assert_eq!(fit.label(), "polyfit: 2. order");
    }
    #[test]
    fn overdetermined_line_recovers_slope_and_intercept() {
        let x = Array1::linspace(0.0, 9.0, 10);
        let y = x.mapv(|v| 2.0 * v + 1.0);
        let fit = polyfit(&x, &y, 1).unwrap();
        assert_close(&fit.coefficients.to_vec(), &[2.0, 1.0], 1e-9);
        assert!(fit.rms_residual(&x, &y) < 1e-9);
    }
    #[test]
    fn sixth_order_fit_tracks_slow_warmup_curve() {
        let x = Array1::linspace(0.0, 120.0, 121);
        let y = x.mapv(|t| 300.0 + 0.05 * t - 0.0002 * t * t);
        let fit = polyfit(&x, &y, 6).unwrap();
        assert_eq!(fit.coefficients.len(), 7);
        let fitted = fit.evaluate(&x);
        for (f, e) in fitted.iter().zip(y.iter()) {
            assert!((f - e).abs() < 1e-6, "{f} vs {e}");
        }
    }
    #[test]
    fn horner_evaluation_uses_highest_degree_first() {
        let fit = PolyFit {
            degree: 2,
            coefficients: array![3.0, -2.0, 1.0],
        };
        assert_eq!(fit.evaluate_at(2.0), 9.0);
        assert_eq!(fit.evaluate(&array![0.0, 1.0]).to_vec(), vec![1.0, 2.0]);
    }
    #[test]
    fn too_few_points_is_an_error() {
        let err = polyfit(&array![0.0, 1.0], &array![300.0, 301.0], 2).unwrap_err();
        assert!(matches!(
            err,
            ProbeError::InsufficientSamples { needed: 3, got: 2 }
        ));
    }
    #[test]
    fn repeated_abscissa_is_singular() {
        let err = polyfit(&array![2.0, 2.0, 2.0], &array![1.0, 2.0, 3.0], 1).unwrap_err();
        assert!(matches!(err, ProbeError::SingularFit));
    }
}
