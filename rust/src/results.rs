use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::monte_carlo::PiEstimate;

const SEPARATOR: &str = "________________________________________________________________________";

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to open results file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write results file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One finished run, as it gets recorded.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub estimate: PiEstimate,
    pub samples: u64,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn render(&self) -> String {
        format!(
            "\n\nPi approx   = {:.6} using {} darts\
             \n\nPi actually = {:.6} Error = {:.6}%\
             \n\nElapsed time = {:?}\
             \n{}",
            self.estimate.approx,
            self.samples,
            self.estimate.reference,
            self.estimate.error_pct,
            self.elapsed,
            SEPARATOR
        )
    }
}

/// Append-only log of run reports. Created on first use, never truncated.
pub struct ResultsFile {
    path: PathBuf,
    file: File,
}

impl ResultsFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ResultsError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ResultsError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(ResultsFile { path, file })
    }

    pub fn append(&mut self, report: &RunReport) -> Result<(), ResultsError> {
        self.file
            .write_all(report.render().as_bytes())
            .and_then(|_| self.file.sync_data())
            .map_err(|source| ResultsError::Write {
                path: self.path.clone(),
                source,
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dartboard-{}-{}.txt",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    fn report() -> RunReport {
        RunReport {
            estimate: PiEstimate::new(785, 1_000, 3.14159),
            samples: 1_000,
            elapsed: Duration::from_millis(12),
        }
    }

    #[test]
    fn render_lists_estimate_reference_and_time() {
        let text = report().render();
        assert!(text.starts_with("\n\nPi approx   = 3.140000 using 1000 darts"));
        assert!(text.contains("\n\nPi actually = 3.141590 Error = "));
        assert!(text.contains("\n\nElapsed time = 12ms"));
        assert!(text.ends_with(SEPARATOR));
    }

    #[test]
    fn appends_without_truncating() {
        let path = scratch_path("append");
        ResultsFile::open(&path).unwrap().append(&report()).unwrap();
        ResultsFile::open(&path).unwrap().append(&report()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches(SEPARATOR).count(), 2);
        assert_eq!(text, report().render().repeat(2));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_directory_fails_to_open() {
        let path = std::env::temp_dir()
            .join(format!("dartboard-missing-{}", std::process::id()))
            .join("PiResults.txt");
        match ResultsFile::open(&path) {
            Err(ResultsError::Open { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected open failure, got {:?}", other.map(|f| f.path().to_path_buf())),
        }
    }
}
