use std::io::{self, BufRead, BufReader, Read};
use std::time::Duration;
use serialport::SerialPort;
use crate::config::ProbeConfig;
use crate::drivers::ProbeError;
/// What a single read attempt on the probe stream produced.
#[derive(Clone, Debug, PartialEq)]
pub enum LineEvent {
    Line(String),
    /// Read timed out with no complete line; the caller may poll for interrupts.
    Idle,
    Closed,
}
/// Trait representing something that yields text lines on demand.
pub trait LineSource {
    fn read_line(&mut self) -> Result<LineEvent, ProbeError>;
}
/// Line splitter over any byte stream. Bytes received before a timeout are
/// kept until the rest of their line arrives.
pub struct StreamSource<R: Read> {
    reader: BufReader<R>,
    pending: Vec<u8>,
}
pub type SerialLineSource = StreamSource<Box<dyn SerialPort>>;
impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            pending: Vec::new(),
        }
    }
    fn take_pending(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        line
    }
}
impl SerialLineSource {
    /// Opens the probe's serial device at the configured rate.
    pub fn open(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let port = serialport::new(config.device_path.as_str(), config.baud_rate)
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .open()?;
        log::info!(
            "opened {} at {} baud",
            config.device_path,
            config.baud_rate
        );
        Ok(Self::new(port))
    }
}
impl<R: Read> LineSource for StreamSource<R> {
    fn read_line(&mut self) -> Result<LineEvent, ProbeError> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(LineEvent::Closed),
            // Either a full line, or the stream ended mid-line.
            Ok(_) => Ok(LineEvent::Line(self.take_pending())),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(LineEvent::Idle)
            }
            Err(e) => Err(ProbeError::Stream(e)),
        }
    }
}
/// In-memory source useful for tests and deterministic playback.
#[cfg(test)]
pub struct ManualSource {
    queue: std::collections::VecDeque<LineEvent>,
}
#[cfg(test)]
impl ManualSource {
    pub fn new(events: impl IntoIterator<Item = LineEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(lines.into_iter().map(|l| LineEvent::Line(l.to_owned())))
    }
}
#[cfg(test)]
impl LineSource for ManualSource {
    fn read_line(&mut self) -> Result<LineEvent, ProbeError> {
        Ok(self.queue.pop_front().unwrap_or(LineEvent::Closed))
    }
}
