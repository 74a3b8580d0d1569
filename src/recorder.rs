use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use crate::drivers::reading::format_record;
use crate::drivers::ProbeError;
use crate::types::Sample;

/// Appends accepted samples to the output file, one `%1.8e    %f` line each.
pub struct DataRecorder {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    records: usize,
}

impl DataRecorder {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| ProbeError::Output {
            path: path.clone(),
            source,
        })?;
        log::info!("logging samples to {}", path.display());
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
            records: 0,
        })
    }

    #[cfg(test)]
    pub fn records(&self) -> usize {
        self.records
    }

    #[cfg(test)]
    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }

    /// Writes and flushes one line, echoing it to stdout.
    pub fn write_record(&mut self, sample: &Sample) -> Result<(), ProbeError> {
        let Some(w) = &mut self.writer else {
            return Ok(());
        };
        let line = format_record(sample.elapsed_s, sample.temperature_k);
        writeln!(w, "{line}")
            .and_then(|_| w.flush())
            .map_err(|source| ProbeError::Output {
                path: self.path.clone(),
                source,
            })?;
        self.records += 1;
        println!("{line}");
        Ok(())
    }

    /// Flushes and closes the file. Later writes are ignored.
    pub fn stop(&mut self) -> Result<(), ProbeError> {
        if let Some(mut w) = self.writer.take() {
            w.flush().map_err(|source| ProbeError::Output {
                path: self.path.clone(),
                source,
            })?;
            log::info!("closed {} after {} records", self.path.display(), self.records);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn records_are_on_disk_before_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.dat");
        let mut recorder = DataRecorder::create(&path).unwrap();
        recorder
            .write_record(&Sample {
                elapsed_s: 0.5,
                temperature_k: 300.0,
            })
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "5.00000000e-01    300.000000\n");
        recorder.stop().unwrap();
        assert!(!recorder.is_recording());
        assert_eq!(recorder.records(), 1);
    }

    #[test]
    fn writes_after_stop_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.dat");
        let mut recorder = DataRecorder::create(&path).unwrap();
        recorder.stop().unwrap();
        recorder
            .write_record(&Sample {
                elapsed_s: 1.0,
                temperature_k: 301.0,
            })
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn unwritable_path_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("run.dat");
        assert!(matches!(
            DataRecorder::create(&path),
            Err(ProbeError::Output { .. })
        ));
    }
}
