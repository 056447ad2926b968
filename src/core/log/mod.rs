use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::buildcore::QueueKind;

/// One stress round: resize, fill, drain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEntry {
    pub round: u64,
    pub kind: QueueKind,
    pub capacity: usize,
    pub appended: u64,  // values accepted by the queue
    pub rejected: u64,  // values refused with BufferFull
    pub drained: u64,   // values read back by the drain
    pub elapsed_micros: u64,
}

impl RoundEntry {
    /// Values lost to overwriting during the round
    pub fn evicted(&self) -> u64 {
        self.appended.saturating_sub(self.drained)
    }
}

impl Display for RoundEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RoundEntry {{ round: {}, kind: {}, capacity: {}, appended: {}, rejected: {}, drained: {}, evicted: {}, elapsed_micros: {} }}",
            self.round,
            self.kind,
            self.capacity,
            self.appended,
            self.rejected,
            self.drained,
            self.evicted(),
            self.elapsed_micros,
        )
    }
}

#[derive(Clone, Debug, Default)]
/// Logger storing all round entries of a run
pub struct Logger {
    pub(crate) entries: Vec<RoundEntry>,
}

impl Logger {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Record a finished round
    pub fn log(&mut self, entry: RoundEntry) {
        // --- Negative-space assertion: a drain never yields more than was accepted ---
        assert!(entry.drained <= entry.appended, "Drained count must not exceed appended count");
        // --- Negative-space assertion: a drain never yields more than the capacity ---
        assert!(
            entry.drained <= entry.capacity as u64,
            "Drained count must not exceed the round capacity"
        );

        let before = self.entries.len();
        self.entries.push(entry);

        // --- Negative-space assertion: log length increased exactly by 1 ---
        assert_eq!(
            self.entries.len(),
            before + 1,
            "Logger must increase by exactly one entry"
        );
    }

    pub fn entries(&self) -> &[RoundEntry] {
        &self.entries
    }

    pub fn entries_for(&self, kind: QueueKind) -> impl Iterator<Item = &RoundEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }
}

/// Append entries to `path`, one JSON object per line
pub fn append_logs(log: &[RoundEntry], path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;

    for entry in log {
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{}", json)?; // one JSON object per line
    }
    Ok(())
}
