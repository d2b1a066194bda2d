use super::byte_cursor::ByteCursor;
use super::constants::{EXPECTED_TC_VERSION, TA_RECORD_SIZE, TC_HEADER_SIZE};
use super::error::TcDataError;
use super::trigger_activity::TriggerActivity;

/// Kind of trigger a candidate represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TcType {
    #[default]
    Unknown = 0,
    Timing = 1,
    TpcLowE = 2,
    Supernova = 3,
    Random = 4,
    Prescale = 5,
    AdcSimpleWindow = 6,
    HorizontalMuon = 7,
    MichelElectron = 8,
    PlaneCoincidence = 9,
}

impl TcType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Timing),
            2 => Some(Self::TpcLowE),
            3 => Some(Self::Supernova),
            4 => Some(Self::Random),
            5 => Some(Self::Prescale),
            6 => Some(Self::AdcSimpleWindow),
            7 => Some(Self::HorizontalMuon),
            8 => Some(Self::MichelElectron),
            9 => Some(Self::PlaneCoincidence),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Trigger algorithm which emitted a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TcAlgorithm {
    #[default]
    Unknown = 0,
    Supernova = 1,
    HsiEventToCandidate = 2,
    Prescale = 3,
    AdcSimpleWindow = 4,
    HorizontalMuon = 5,
    MichelElectron = 6,
    PlaneCoincidence = 7,
}

impl TcAlgorithm {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Supernova),
            2 => Some(Self::HsiEventToCandidate),
            3 => Some(Self::Prescale),
            4 => Some(Self::AdcSimpleWindow),
            5 => Some(Self::HorizontalMuon),
            6 => Some(Self::MichelElectron),
            7 => Some(Self::PlaneCoincidence),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One trigger candidate, the aggregation record heading a group of
/// activities.
///
/// The header declares how many activity records trail it; that count is
/// authoritative, and `num_tas` always equals the length of the activity
/// group decoded with this candidate. A decoded candidate is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerCandidate {
    pub version: u16,
    pub tc_type: TcType,
    pub algorithm: TcAlgorithm,
    pub detid: u16,
    pub time_start: u64,
    pub time_end: u64,
    pub time_candidate: u64,
    pub num_tas: u64,
}

impl TriggerCandidate {
    /// Decode one candidate header and the activity records trailing it.
    ///
    /// Returns the candidate, its activities in decode order, and the total
    /// number of bytes consumed (header plus `num_tas` activity records).
    /// The declared count is checked against the bytes remaining in the
    /// cursor before any activity is decoded, so a header whose group runs
    /// past the fragment is rejected without partial consumption.
    pub fn read(
        cursor: &mut ByteCursor,
        strict: bool,
    ) -> Result<(Self, Vec<TriggerActivity>, usize), TcDataError> {
        let version = cursor.read_u16()?;
        if version != EXPECTED_TC_VERSION {
            return Err(TcDataError::UnsupportedVersion(version));
        }

        let type_code = cursor.read_u8()?;
        let tc_type = match TcType::from_code(type_code) {
            Some(tc_type) => tc_type,
            None if strict => return Err(TcDataError::UnknownType(type_code)),
            None => {
                log::warn!("Unknown TriggerCandidate type code {type_code}, keeping record with type Unknown");
                TcType::Unknown
            }
        };

        let algorithm_code = cursor.read_u8()?;
        let algorithm = match TcAlgorithm::from_code(algorithm_code) {
            Some(algorithm) => algorithm,
            None if strict => return Err(TcDataError::UnknownAlgorithm(algorithm_code)),
            None => {
                log::warn!("Unknown TriggerCandidate algorithm code {algorithm_code}, keeping record with algorithm Unknown");
                TcAlgorithm::Unknown
            }
        };

        let detid = cursor.read_u16()?;
        let time_start = cursor.read_u64()?;
        let time_end = cursor.read_u64()?;
        let time_candidate = cursor.read_u64()?;
        let num_tas = cursor.read_u64()?;

        let count: usize = num_tas
            .try_into()
            .map_err(|_| TcDataError::BadActivityCount(num_tas))?;
        let group_size = count
            .checked_mul(TA_RECORD_SIZE)
            .ok_or(TcDataError::BadActivityCount(num_tas))?;
        if group_size > cursor.remaining() {
            return Err(TcDataError::TruncatedRecord {
                declared: num_tas,
                needed: group_size,
                remaining: cursor.remaining(),
            });
        }

        let mut activities = Vec::with_capacity(count);
        for _ in 0..count {
            activities.push(TriggerActivity::read(cursor, strict)?);
        }
        if activities.len() != count {
            return Err(TcDataError::ActivityCountMismatch {
                expected: num_tas,
                actual: activities.len(),
            });
        }

        let candidate = Self {
            version,
            tc_type,
            algorithm,
            detid,
            time_start,
            time_end,
            time_candidate,
            num_tas,
        };
        Ok((candidate, activities, TC_HEADER_SIZE + group_size))
    }
}
