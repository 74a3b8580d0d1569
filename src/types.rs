// src/types.rs

/// One accepted reading: seconds since the loop started, temperature in Kelvin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub elapsed_s: f64,
    pub temperature_k: f64,
}

// Acquisition loop states
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AcquisitionState {
    WaitingForLine,
    Parsing,
    Appending,
    Stopped,
}

// Why the loop left the WaitingForLine state for good
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StopReason {
    Interrupted,
    EndOfStream,
}
