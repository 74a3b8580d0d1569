// src/drivers/mod.rs
pub mod analysis;
pub mod buffer;
pub mod error;
pub mod fit;
pub mod pipeline;
pub mod plot;
pub mod reading;
pub mod source;
pub use analysis::Analysis;
pub use error::ProbeError;
pub use pipeline::{Acquisition, MonotonicClock};
pub use plot::{write_fit_png, PlotStyle};
pub use source::SerialLineSource;
