//! Constants of the trigger-candidate raw data layout.

/// Size in bytes of the DAQ fragment header preceding every fragment payload
pub const FRAGMENT_HEADER_SIZE: usize = 72;

/// Marker contained in the dataset path of every trigger-candidate fragment
pub const FRAGMENT_PATH_MARKER: &str = "Trigger_Candidate";

/// Format version of the candidate header this reader understands
pub const EXPECTED_TC_VERSION: u16 = 2;

/// Format version of the activity record this reader understands
pub const EXPECTED_TA_VERSION: u16 = 2;

/// Size in bytes of a version 2 candidate header
pub const TC_HEADER_SIZE: usize = 38;

/// Size in bytes of a version 2 activity record
pub const TA_RECORD_SIZE: usize = 66;

/// Seconds per DTS clock tick (62.5 MHz clock)
pub const TICK_TO_SEC: f64 = 16e-9;

/// Duration of one beam spill extraction in seconds
pub const SPILL_DURATION_SECS: f64 = 4.8;
