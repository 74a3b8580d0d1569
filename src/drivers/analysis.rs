use ndarray::Array1;
use crate::drivers::buffer::{SampleSeries, SeriesArrays};
use crate::drivers::error::ProbeError;
use crate::drivers::fit::{polyfit, PolyFit};
/// Cleaned, normalized data plus its polynomial fit, ready to plot.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub data: SeriesArrays,
    pub fit: PolyFit,
    pub fitted_k: Array1<f64>,
}
impl Analysis {
    /// Drops the first sample, shifts time to start at zero and fits `degree`.
    /// A run too short for `degree` is fitted at the highest degree it supports.
    pub fn run(mut series: SampleSeries, degree: usize) -> Result<Self, ProbeError> {
        let dropped = series.drop_first()?;
        log::debug!(
            "dropped first sample ({:.3} s, {:.3} K)",
            dropped.elapsed_s,
            dropped.temperature_k
        );
        let data = series.to_arrays()?;
        let usable = data.len() - 1;
        let degree = if degree > usable {
            log::warn!(
                "only {} samples after cleanup; fitting order {usable} instead of {degree}",
                data.len()
            );
            usable
        } else {
            degree
        };
        let fit = polyfit(&data.times_s, &data.temperatures_k, degree)?;
        let fitted_k = fit.evaluate(&data.times_s);
        log::info!(
            "{} over {} samples ({:.1} s): coefficients {:?}, rms residual {:.4} K",
            fit.label(),
            data.len(),
            data.duration_seconds(),
            fit.coefficients.to_vec(),
            fit.rms_residual(&data.times_s, &data.temperatures_k)
        );
        Ok(Self {
            data,
            fit,
            fitted_k,
        })
    }
    pub fn raw_points(&self) -> Vec<[f64; 2]> {
        zip_points(&self.data.times_s, &self.data.temperatures_k)
    }
    pub fn fit_points(&self) -> Vec<[f64; 2]> {
        zip_points(&self.data.times_s, &self.fitted_k)
    }
}
fn zip_points(x: &Array1<f64>, y: &Array1<f64>) -> Vec<[f64; 2]> {
    x.iter().zip(y.iter()).map(|(&x, &y)| [x, y]).collect()
}
