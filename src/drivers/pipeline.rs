use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use crate::drivers::buffer::SampleSeries;
use crate::drivers::error::ProbeError;
use crate::drivers::reading::{parse_reading, Reading};
use crate::drivers::source::{LineEvent, LineSource};
use crate::recorder::DataRecorder;
use crate::types::{AcquisitionState, Sample, StopReason};
/// Time base for sample timestamps.
pub trait Clock {
    /// Marks the start of the acquisition loop; later calls keep the first origin.
    fn start(&mut self);
    /// Seconds since `start`.
    fn elapsed_s(&mut self) -> f64;
}
#[derive(Default)]
pub struct MonotonicClock {
    started: Option<Instant>,
}
impl Clock for MonotonicClock {
    fn start(&mut self) {
        self.started.get_or_insert_with(Instant::now);
    }
    fn elapsed_s(&mut self) -> f64 {
        self.started
            .get_or_insert_with(Instant::now)
            .elapsed()
            .as_secs_f64()
    }
}
/// What the loop hands to the analysis stage.
#[derive(Debug)]
pub struct AcquisitionOutcome {
    pub series: SampleSeries,
    pub stop_reason: StopReason,
    pub discarded: usize,
}
/// Blocking read → parse → append loop over one probe.
pub struct Acquisition<S: LineSource, C: Clock> {
    source: S,
    clock: C,
    recorder: DataRecorder,
    series: SampleSeries,
    state: AcquisitionState,
    stop_reason: Option<StopReason>,
    running: Arc<AtomicBool>,
    discarded: usize,
}
impl<S: LineSource, C: Clock> Acquisition<S, C> {
    pub fn new(source: S, clock: C, recorder: DataRecorder) -> Self {
        Self {
            source,
            clock,
            recorder,
            series: SampleSeries::new(),
            state: AcquisitionState::WaitingForLine,
            stop_reason: None,
            running: Arc::new(AtomicBool::new(true)),
            discarded: 0,
        }
    }
    /// Clearing this flag (e.g. from a Ctrl+C handler) stops the loop at the
    /// next read.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }
    #[cfg(test)]
    pub fn state(&self) -> AcquisitionState {
        self.state
    }
    #[cfg(test)]
    pub fn series(&self) -> &SampleSeries {
        &self.series
    }
    /// Runs until interrupted or the stream ends, then closes the output file.
    /// The file is closed on the error path too.
    pub fn run(mut self) -> Result<AcquisitionOutcome, ProbeError> {
        let result = loop {
            match self.step() {
                Ok(Some(reason)) => break Ok(reason),
                Ok(None) => {}
                Err(e) => break Err(e),
            }
        };
        let closed = self.recorder.stop();
        let stop_reason = match result {
            Ok(reason) => reason,
            Err(e) => {
                if let Err(close_err) = closed {
                    log::warn!("output file not closed cleanly: {close_err}");
                }
                return Err(e);
            }
        };
        closed?;
        Ok(AcquisitionOutcome {
            series: self.series,
            stop_reason,
            discarded: self.discarded,
        })
    }
    /// One pass through the state machine. Returns the stop reason once stopped.
    pub fn step(&mut self) -> Result<Option<StopReason>, ProbeError> {
        if self.state == AcquisitionState::Stopped {
            return Ok(self.stop_reason);
        }
        self.clock.start();
        self.state = AcquisitionState::WaitingForLine;
        if !self.running.load(Ordering::SeqCst) {
            return Ok(Some(self.stop(StopReason::Interrupted)));
        }
        let line = match self.source.read_line()? {
            LineEvent::Idle => return Ok(None),
            LineEvent::Closed => {
                log::warn!("probe stream closed; ending acquisition");
                return Ok(Some(self.stop(StopReason::EndOfStream)));
            }
            LineEvent::Line(line) => line,
        };
        // An interrupt that lands during the read drops the line.
        if !self.running.load(Ordering::SeqCst) {
            return Ok(Some(self.stop(StopReason::Interrupted)));
        }
        self.state = AcquisitionState::Parsing;
        let temperature_k = match parse_reading(&line) {
            Reading::Temperature(value) => value,
            Reading::Discarded(reason) => {
                log::trace!("discarding line {:?}: {reason}", line.trim_end());
                self.discarded += 1;
                self.state = AcquisitionState::WaitingForLine;
                return Ok(None);
            }
        };
        self.state = AcquisitionState::Appending;
        let sample = Sample {
            elapsed_s: self.clock.elapsed_s(),
            temperature_k,
        };
        self.series.push(sample);
        self.recorder.write_record(&sample)?;
        self.state = AcquisitionState::WaitingForLine;
        Ok(None)
    }
    fn stop(&mut self, reason: StopReason) -> StopReason {
        self.state = AcquisitionState::Stopped;
        self.stop_reason = Some(reason);
        reason
    }
}
