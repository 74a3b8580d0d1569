use std::io;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to open serial device: {0}")]
    Serial(#[from] serialport::Error),
    #[error("serial stream fault: {0}")]
    Stream(#[source] io::Error),
    #[error("failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no samples recorded; nothing to clean up or analyze")]
    EmptySeries,
    #[error("polynomial fit needs at least {needed} samples, got {got}")]
    InsufficientSamples { needed: usize, got: usize },
    #[error("least-squares system is singular; samples do not span the requested degree")]
    SingularFit,
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ProbeError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ProbeError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ProbeError {
    fn from(value: image::ImageError) -> Self {
        ProbeError::Plot(value.to_string())
    }
}
