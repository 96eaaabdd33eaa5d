//! Append-only audit trail of reconciliation ticks.
//!
//! Each processed tick is written as one JSON line holding the full state the
//! strategy saw and the intents it produced, so a run can be replayed and
//! diffed offline (see [`crate::app::Backtest`]).

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::domain::strategy::OrderIntents;
use crate::domain::SportsStrategyState;
use crate::error::Result;

/// One processed tick.
///
/// Records are written after dispatch. If a write fails the manager stops
/// recording, so a trail is always a gap-free prefix of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Position of the tick within the run, starting at zero.
    pub sequence: u64,
    pub state: SportsStrategyState,
    pub intents: OrderIntents,
}

/// JSON Lines writer for [`TickRecord`]s.
pub struct AuditTrail {
    path: PathBuf,
    file: Mutex<File>,
}

impl AuditTrail {
    /// Open `path` for appending, creating it and its parent directory if
    /// needed.
    #[allow(clippy::result_large_err)]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush it.
    #[allow(clippy::result_large_err)]
    pub fn append(&self, record: &TickRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self.file.lock();
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Read every record of an audit file in order. Blank lines are skipped.
#[allow(clippy::result_large_err)]
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<TickRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
