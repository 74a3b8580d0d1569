use ndarray::Array1;
use crate::drivers::ProbeError;
use crate::types::Sample;
/// Analysis-ready arrays; times start at zero.
#[derive(Clone, Debug)]
pub struct SeriesArrays {
    pub times_s: Array1<f64>,
    pub temperatures_k: Array1<f64>,
}
impl SeriesArrays {
    pub fn len(&self) -> usize {
        self.times_s.len()
    }
    pub fn is_empty(&self) -> bool {
        self.times_s.is_empty()
    }
    pub fn duration_seconds(&self) -> f64 {
        self.times_s.iter().next_back().copied().unwrap_or(0.0)
    }
}
/// Parallel, index-aligned times and temperatures in arrival order.
#[derive(Clone, Debug, Default)]
pub struct SampleSeries {
    times_s: Vec<f64>,
    temperatures_k: Vec<f64>,
}
impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, sample: Sample) {
        self.times_s.push(sample.elapsed_s);
        self.temperatures_k.push(sample.temperature_k);
    }
    pub fn len(&self) -> usize {
        self.times_s.len()
    }
    pub fn is_empty(&self) -> bool {
        self.times_s.is_empty()
    }
    #[cfg(test)]
    pub fn times(&self) -> &[f64] {
        &self.times_s
    }
    #[cfg(test)]
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures_k
    }
    /// Drops the first reading; the probe's first line after connecting is
    /// often stale or truncated.
    pub fn drop_first(&mut self) -> Result<Sample, ProbeError> {
        if self.is_empty() {
            return Err(ProbeError::EmptySeries);
        }
        let elapsed_s = self.times_s.remove(0);
        let temperature_k = self.temperatures_k.remove(0);
        Ok(Sample {
            elapsed_s,
            temperature_k,
        })
    }
    /// Converts to arrays with the time axis shifted so the first sample sits at 0.
    pub fn to_arrays(&self) -> Result<SeriesArrays, ProbeError> {
        let Some(&t0) = self.times_s.first() else {
            return Err(ProbeError::EmptySeries);
        };
        let mut times_s = Array1::from(self.times_s.clone());
        times_s -= t0;
        Ok(SeriesArrays {
            times_s,
            temperatures_k: Array1::from(self.temperatures_k.clone()),
        })
    }
}
impl FromIterator<Sample> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let mut series = SampleSeries::new();
        for sample in iter {
            series.push(sample);
        }
        series
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn series(points: &[(f64, f64)]) -> SampleSeries {
        points
            .iter()
            .map(|&(elapsed_s, temperature_k)| Sample {
                elapsed_s,
                temperature_k,
            })
            .collect()
    }
    #[test]
    fn drop_first_removes_exactly_one_pair() {
        let mut s = series(&[(0.1, 280.0), (1.1, 300.0), (2.1, 301.0)]);
        let dropped = s.drop_first().unwrap();
        assert_eq!(dropped.temperature_k, 280.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s.times(), &[1.1, 2.1]);
        assert_eq!(s.temperatures(), &[300.0, 301.0]);
    }
    #[test]
    fn drop_first_on_single_sample_leaves_empty_series() {
        let mut s = series(&[(0.5, 300.0)]);
        s.drop_first().unwrap();
        assert!(s.is_empty());
        assert!(matches!(s.to_arrays(), Err(ProbeError::EmptySeries)));
    }
    #[test]
    fn drop_first_on_empty_series_fails() {
        let mut s = SampleSeries::new();
        assert!(matches!(s.drop_first(), Err(ProbeError::EmptySeries)));
    }
    #[test]
    fn arrays_start_at_zero_and_keep_spacing() {
        let s = series(&[(1.25, 300.0), (2.0, 301.0), (4.5, 302.0)]);
        let arrays = s.to_arrays().unwrap();
        assert_eq!(arrays.times_s[0], 0.0);
        assert!((arrays.times_s[1] - 0.75).abs() < 1e-12);
        assert!((arrays.times_s[2] - 3.25).abs() < 1e-12);
        assert_eq!(arrays.temperatures_k.to_vec(), vec![300.0, 301.0, 302.0]);
        assert!((arrays.duration_seconds() - 3.25).abs() < 1e-12);
    }
}
