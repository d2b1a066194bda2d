use std::path::PathBuf;
use thiserror::Error;

use super::constants::*;
use super::worker_status::WorkerStatus;

#[derive(Debug, Clone, Error)]
pub enum CursorError {
    #[error("Read of {requested} bytes requested with only {remaining} remaining in the buffer")]
    OutOfBounds { requested: usize, remaining: usize },
}

#[derive(Debug, Clone, Error)]
pub enum TaDataError {
    #[error("Failed to read a TriggerActivity field: {0}")]
    OutOfBounds(#[from] CursorError),
    #[error("Unsupported TriggerActivity version {0} found; expected {exp}", exp=EXPECTED_TA_VERSION)]
    UnsupportedVersion(u16),
    #[error("Unknown TriggerActivity type code {0} found")]
    UnknownType(u8),
    #[error("Unknown TriggerActivity algorithm code {0} found")]
    UnknownAlgorithm(u8),
}

#[derive(Debug, Clone, Error)]
pub enum TcDataError {
    #[error("Failed to read a TriggerCandidate field: {0}")]
    OutOfBounds(#[from] CursorError),
    #[error("Unsupported TriggerCandidate version {0} found; expected {exp}", exp=EXPECTED_TC_VERSION)]
    UnsupportedVersion(u16),
    #[error("Unknown TriggerCandidate type code {0} found")]
    UnknownType(u8),
    #[error("Unknown TriggerCandidate algorithm code {0} found")]
    UnknownAlgorithm(u8),
    #[error("TriggerCandidate declares {0} activities, which is not representable on this platform")]
    BadActivityCount(u64),
    #[error("TriggerCandidate declares {declared} activities ({needed} bytes) with only {remaining} bytes remaining")]
    TruncatedRecord {
        declared: u64,
        needed: usize,
        remaining: usize,
    },
    #[error("Bad activity found in TriggerCandidate: {0}")]
    BadActivity(#[from] TaDataError),
    #[error("TriggerCandidate declared {expected} activities but {actual} were decoded; this is a decoder fault")]
    ActivityCountMismatch { expected: u64, actual: usize },
}

#[derive(Debug, Clone, Error)]
pub enum FragmentError {
    #[error("Failed to parse buffer into TriggerCandidate: {0}")]
    BadCandidate(#[from] TcDataError),
    #[error("Record at offset {offset} claims {consumed} bytes with only {size} in the fragment")]
    TruncatedRecord {
        offset: usize,
        consumed: usize,
        size: usize,
    },
    #[error("Fragment scan ran to offset {offset} past the fragment size {size}; this is a decoder fault")]
    OffsetOvershoot { offset: usize, size: usize },
}

#[derive(Debug, Error)]
pub enum TcFileError {
    #[error("Could not open raw file because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Raw file failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
    #[error("No trigger-candidate fragments found in raw file {0:?}")]
    NoFragments(PathBuf),
    #[error("Raw file failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config did not find any raw HDF5 files in the raw directory")]
    NoMatchingFiles,
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum SpillError {
    #[error("Spill file failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Spill file failed to parse a clock value: {0}")]
    ParsingError(#[from] std::num::ParseFloatError),
    #[error("Spill file was given with the incorrect format; most likely the Clock column is missing")]
    BadFileFormat,
}

#[derive(Debug, Error)]
pub enum CsvWriterError {
    #[error("CsvWriter failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to raw file error: {0}")]
    FileError(#[from] TcFileError),
    #[error("Processor failed due to configuration error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to spill file error: {0}")]
    SpillError(#[from] SpillError),
    #[error("Processor failed due to CsvWriter error: {0}")]
    CsvError(#[from] CsvWriterError),
    #[error("Processor failed due to Send error: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<WorkerStatus>),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}
