use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BetaError, Result};
use crate::mode::Mode;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `BETA-<mode>-<prefix>_<timestamp>.log`, or `BETA-<mode>_<timestamp>.log`
/// without a prefix.
pub fn log_file_name(mode: Mode, prefix: &str, started: DateTime<Local>) -> String {
    let stamp = started.format(TIMESTAMP_FORMAT);
    if prefix.is_empty() {
        format!("{}_{}.log", mode.log_name(), stamp)
    } else {
        format!("{}-{}_{}.log", mode.log_name(), prefix, stamp)
    }
}

/// Plain-text mirror of one run's relayed output.
pub struct RunLog {
    path: PathBuf,
    logger_name: String,
    writer: BufWriter<File>,
}

impl RunLog {
    pub fn create(dir: &Path, mode: Mode, prefix: &str, started: DateTime<Local>) -> Result<Self> {
        let path = dir.join(log_file_name(mode, prefix, started));
        let open = || -> std::io::Result<File> {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
            File::create(&path)
        };
        let file = open().map_err(|source| BetaError::RunLog {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            logger_name: mode.log_name(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush so the file tracks the window.
    pub fn append(&mut self, message: &str) -> Result<()> {
        writeln!(
            self.writer,
            "INFO : {} : {}",
            self.logger_name,
            message.trim()
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
