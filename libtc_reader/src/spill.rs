use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::constants::{SPILL_DURATION_SECS, TICK_TO_SEC};
use super::error::SpillError;

/// Tag applied to a candidate relative to the beam spill extraction windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpillMode {
    On,
    Off,
}

impl SpillMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// The beam spill extraction windows read from the accelerator CSV.
///
/// The CSV carries a header row naming a `Clock` column which holds the
/// extraction start time in milliseconds. A candidate timestamp is ON when
/// it falls within the spill duration of any extraction start, OFF otherwise.
#[derive(Debug, Clone, Default)]
pub struct SpillWindows {
    starts: Vec<f64>, // seconds
}

impl SpillWindows {
    /// Load the extraction windows from a spill CSV file
    pub fn new(path: &Path) -> Result<Self, SpillError> {
        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;
        Self::parse(&contents)
    }

    pub(crate) fn parse(contents: &str) -> Result<Self, SpillError> {
        let mut lines = contents.lines();
        let header = lines.next().ok_or(SpillError::BadFileFormat)?;
        let clock_column = header
            .split(',')
            .position(|name| name.trim() == "Clock")
            .ok_or(SpillError::BadFileFormat)?;

        let mut starts = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let entries: Vec<&str> = line.split(',').collect();
            if entries.len() <= clock_column {
                return Err(SpillError::BadFileFormat);
            }
            // Clock values are milliseconds
            starts.push(entries[clock_column].trim().parse::<f64>()? / 1000.0);
        }

        Ok(Self { starts })
    }

    /// Number of extraction windows loaded
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Spill mode of a candidate timestamp given in DTS ticks
    pub fn mode_at(&self, timestamp: u64) -> SpillMode {
        let time = timestamp as f64 * TICK_TO_SEC;
        for start in self.starts.iter() {
            if time >= *start && time <= *start + SPILL_DURATION_SECS {
                return SpillMode::On;
            }
        }
        SpillMode::Off
    }
}
