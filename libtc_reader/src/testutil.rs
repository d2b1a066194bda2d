//! Helpers for encoding raw record buffers in tests.

use byteorder::{LittleEndian, WriteBytesExt};

use super::constants::{EXPECTED_TA_VERSION, EXPECTED_TC_VERSION};

/// Append one well-formed activity record (type Tpc, algorithm Prescale).
/// Peak/end channels and times are derived from the start values.
pub(crate) fn push_ta(
    buffer: &mut Vec<u8>,
    detid: u16,
    channel_start: i32,
    time_start: u64,
    adc_integral: u64,
) {
    buffer.write_u16::<LittleEndian>(EXPECTED_TA_VERSION).unwrap();
    buffer.write_u8(1).unwrap(); // type: Tpc
    buffer.write_u8(2).unwrap(); // algorithm: Prescale
    buffer.write_u16::<LittleEndian>(detid).unwrap();
    buffer.write_i32::<LittleEndian>(channel_start).unwrap();
    buffer.write_i32::<LittleEndian>(channel_start + 4).unwrap();
    buffer.write_i32::<LittleEndian>(channel_start + 8).unwrap();
    buffer.write_u64::<LittleEndian>(time_start).unwrap();
    buffer.write_u64::<LittleEndian>(time_start + 10).unwrap();
    buffer.write_u64::<LittleEndian>(time_start + 20).unwrap();
    buffer.write_u64::<LittleEndian>(time_start + 5).unwrap();
    buffer.write_u64::<LittleEndian>(adc_integral).unwrap();
    buffer.write_u64::<LittleEndian>(adc_integral / 2).unwrap();
}

/// Append one candidate header (type Prescale, algorithm Prescale) declaring
/// `num_tas` trailing activities.
pub(crate) fn push_tc_header(buffer: &mut Vec<u8>, detid: u16, time_candidate: u64, num_tas: u64) {
    buffer.write_u16::<LittleEndian>(EXPECTED_TC_VERSION).unwrap();
    buffer.write_u8(5).unwrap(); // type: Prescale
    buffer.write_u8(3).unwrap(); // algorithm: Prescale
    buffer.write_u16::<LittleEndian>(detid).unwrap();
    buffer
        .write_u64::<LittleEndian>(time_candidate.saturating_sub(32))
        .unwrap();
    buffer.write_u64::<LittleEndian>(time_candidate + 32).unwrap();
    buffer.write_u64::<LittleEndian>(time_candidate).unwrap();
    buffer.write_u64::<LittleEndian>(num_tas).unwrap();
}

/// One complete candidate record with `num_tas` activities
pub(crate) fn make_candidate(detid: u16, time_candidate: u64, num_tas: u64) -> Vec<u8> {
    let mut buffer = Vec::new();
    push_tc_header(&mut buffer, detid, time_candidate, num_tas);
    for index in 0..num_tas {
        push_ta(
            &mut buffer,
            detid,
            100 + index as i32,
            time_candidate + index,
            4000 + index,
        );
    }
    buffer
}
