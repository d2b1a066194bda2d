use super::byte_cursor::ByteCursor;
use super::constants::{EXPECTED_TA_VERSION, TA_RECORD_SIZE};
use super::error::TaDataError;

/// Detector subsystem an activity was formed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaType {
    #[default]
    Unknown = 0,
    Tpc = 1,
    Pds = 2,
}

impl TaType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Tpc),
            2 => Some(Self::Pds),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Trigger algorithm which emitted an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaAlgorithm {
    #[default]
    Unknown = 0,
    Supernova = 1,
    Prescale = 2,
    AdcSimpleWindow = 3,
    HorizontalMuon = 4,
    MichelElectron = 5,
    PlaneCoincidence = 6,
}

impl TaAlgorithm {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Supernova),
            2 => Some(Self::Prescale),
            3 => Some(Self::AdcSimpleWindow),
            4 => Some(Self::HorizontalMuon),
            5 => Some(Self::MichelElectron),
            6 => Some(Self::PlaneCoincidence),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One detected signal activity contributing to a trigger candidate.
///
/// Activities are fixed-width records trailing their candidate header in the
/// fragment payload. All timestamps are DTS ticks. A decoded activity is
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerActivity {
    pub version: u16,
    pub ta_type: TaType,
    pub algorithm: TaAlgorithm,
    pub detid: u16,
    pub channel_start: i32,
    pub channel_peak: i32,
    pub channel_end: i32,
    pub time_start: u64,
    pub time_peak: u64,
    pub time_end: u64,
    pub time_activity: u64,
    pub adc_integral: u64,
    pub adc_peak: u64,
}

impl TriggerActivity {
    /// Decode one activity record, advancing the cursor by exactly
    /// [`TA_RECORD_SIZE`] bytes on success.
    ///
    /// The version field leads the record; a version this reader does not
    /// know the layout of is rejected before any other field is read. Codes
    /// outside the known type/algorithm sets are kept as `Unknown` with a
    /// warning, or rejected when `strict` is set.
    pub fn read(cursor: &mut ByteCursor, strict: bool) -> Result<Self, TaDataError> {
        let start = cursor.position();

        let version = cursor.read_u16()?;
        if version != EXPECTED_TA_VERSION {
            return Err(TaDataError::UnsupportedVersion(version));
        }

        let type_code = cursor.read_u8()?;
        let ta_type = match TaType::from_code(type_code) {
            Some(ta_type) => ta_type,
            None if strict => return Err(TaDataError::UnknownType(type_code)),
            None => {
                log::warn!("Unknown TriggerActivity type code {type_code}, keeping record with type Unknown");
                TaType::Unknown
            }
        };

        let algorithm_code = cursor.read_u8()?;
        let algorithm = match TaAlgorithm::from_code(algorithm_code) {
            Some(algorithm) => algorithm,
            None if strict => return Err(TaDataError::UnknownAlgorithm(algorithm_code)),
            None => {
                log::warn!("Unknown TriggerActivity algorithm code {algorithm_code}, keeping record with algorithm Unknown");
                TaAlgorithm::Unknown
            }
        };

        let activity = Self {
            version,
            ta_type,
            algorithm,
            detid: cursor.read_u16()?,
            channel_start: cursor.read_i32()?,
            channel_peak: cursor.read_i32()?,
            channel_end: cursor.read_i32()?,
            time_start: cursor.read_u64()?,
            time_peak: cursor.read_u64()?,
            time_end: cursor.read_u64()?,
            time_activity: cursor.read_u64()?,
            adc_integral: cursor.read_u64()?,
            adc_peak: cursor.read_u64()?,
        };
        debug_assert_eq!(cursor.position() - start, TA_RECORD_SIZE);
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::push_ta;

    #[test]
    fn decodes_single_record() {
        let mut buffer = Vec::new();
        push_ta(&mut buffer, 3, 128, 1000, 4096);
        assert_eq!(buffer.len(), TA_RECORD_SIZE);

        let mut cursor = ByteCursor::new(&buffer);
        let activity = TriggerActivity::read(&mut cursor, false).unwrap();
        assert_eq!(cursor.position(), TA_RECORD_SIZE);
        assert_eq!(activity.version, EXPECTED_TA_VERSION);
        assert_eq!(activity.ta_type, TaType::Tpc);
        assert_eq!(activity.algorithm, TaAlgorithm::Prescale);
        assert_eq!(activity.detid, 3);
        assert_eq!(activity.channel_start, 128);
        assert_eq!(activity.channel_peak, 132);
        assert_eq!(activity.channel_end, 136);
        assert_eq!(activity.time_start, 1000);
        assert_eq!(activity.time_activity, 1005);
        assert_eq!(activity.adc_integral, 4096);
        assert_eq!(activity.adc_peak, 2048);
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut buffer = Vec::new();
        push_ta(&mut buffer, 0, 0, 0, 0);
        buffer[0] = 9;
        buffer[1] = 0;

        let mut cursor = ByteCursor::new(&buffer);
        match TriggerActivity::read(&mut cursor, false) {
            Err(TaDataError::UnsupportedVersion(version)) => assert_eq!(version, 9),
            other => panic!("Expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn short_record_is_out_of_bounds() {
        let mut buffer = Vec::new();
        push_ta(&mut buffer, 0, 0, 0, 0);
        buffer.truncate(TA_RECORD_SIZE - 1);

        let mut cursor = ByteCursor::new(&buffer);
        assert!(matches!(
            TriggerActivity::read(&mut cursor, false),
            Err(TaDataError::OutOfBounds(_))
        ));
    }

    #[test]
    fn unknown_algorithm_is_kept_unless_strict() {
        let mut buffer = Vec::new();
        push_ta(&mut buffer, 0, 0, 0, 0);
        buffer[3] = 200; // algorithm code outside the known set

        let mut cursor = ByteCursor::new(&buffer);
        let activity = TriggerActivity::read(&mut cursor, false).unwrap();
        assert_eq!(activity.algorithm, TaAlgorithm::Unknown);

        let mut cursor = ByteCursor::new(&buffer);
        match TriggerActivity::read(&mut cursor, true) {
            Err(TaDataError::UnknownAlgorithm(code)) => assert_eq!(code, 200),
            other => panic!("Expected UnknownAlgorithm, got {other:?}"),
        }
    }
}
