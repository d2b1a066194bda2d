use super::byte_cursor::ByteCursor;
use super::dataset::TcDataset;
use super::error::FragmentError;
use super::trigger_candidate::TriggerCandidate;

/// An opaque fragment payload as served by a fragment source.
///
/// A source exposes a byte length and a view of the bytes from a given
/// offset to the end. The scanner only reads through this interface.
pub trait FragmentBuffer {
    fn size(&self) -> usize;
    fn slice(&self, offset: usize) -> &[u8];
}

impl FragmentBuffer for [u8] {
    fn size(&self) -> usize {
        self.len()
    }

    fn slice(&self, offset: usize) -> &[u8] {
        &self[offset..]
    }
}

impl FragmentBuffer for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }

    fn slice(&self, offset: usize) -> &[u8] {
        &self[offset..]
    }
}

/// FragmentScanner drives the candidate decode loop over whole fragment
/// payloads.
///
/// Record boundaries inside a fragment are not stored anywhere: each record's
/// start is known only once the previous record reports how many bytes it
/// consumed, so a scan is strictly sequential. Candidate headers always
/// consume at least their fixed width, which guarantees forward progress.
#[derive(Debug, Clone)]
pub struct FragmentScanner {
    strict: bool,
}

impl FragmentScanner {
    /// Create a scanner. With `strict` set, unknown enumerated codes fail the
    /// fragment instead of being kept as `Unknown`.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Scan one fragment payload, appending each decoded candidate to `out`.
    ///
    /// The records must fill the payload exactly. Returns the number of
    /// candidates decoded from this fragment. A zero-length payload is
    /// counted as empty and is not an error.
    ///
    /// On failure, candidates appended from earlier in the payload stay in
    /// `out`; the failing record is never appended.
    pub fn scan<B: FragmentBuffer + ?Sized>(
        &self,
        buffer: &B,
        out: &mut TcDataset,
    ) -> Result<usize, FragmentError> {
        let size = buffer.size();
        if size == 0 {
            log::debug!("Empty fragment");
            out.tally_empty_fragment();
            return Ok(0);
        }

        let mut offset = 0;
        let mut count = 0;
        while offset < size {
            let mut cursor = ByteCursor::new(buffer.slice(offset));
            let (candidate, activities, consumed) = TriggerCandidate::read(&mut cursor, self.strict)?;
            if offset + consumed > size {
                return Err(FragmentError::TruncatedRecord {
                    offset,
                    consumed,
                    size,
                });
            }
            out.append(candidate, activities);
            offset += consumed;
            count += 1;
        }
        // The loop cannot pass `size` without tripping the check above; a hit
        // here means the decoder miscounted consumed bytes.
        if offset > size {
            return Err(FragmentError::OffsetOvershoot { offset, size });
        }

        out.tally_fragment();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{TA_RECORD_SIZE, TC_HEADER_SIZE};
    use crate::error::TcDataError;
    use crate::testutil::make_candidate;

    #[test]
    fn consumes_buffer_exactly() {
        // Two candidates back to back fill the payload with no slack
        let mut buffer = make_candidate(1, 1000, 2);
        buffer.extend_from_slice(&make_candidate(2, 2000, 0));
        assert_eq!(buffer.len(), 2 * TC_HEADER_SIZE + 2 * TA_RECORD_SIZE);

        let mut dataset = TcDataset::new();
        let count = FragmentScanner::new(false)
            .scan(buffer.as_slice(), &mut dataset)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.fragments_read(), 1);
        assert_eq!(dataset.candidate(0).unwrap().detid, 1);
        assert_eq!(dataset.candidate(1).unwrap().detid, 2);
        for (candidate, group) in dataset.iter() {
            assert_eq!(candidate.num_tas as usize, group.len());
        }
    }

    #[test]
    fn single_candidate_scenario() {
        // One header declaring two activities followed by exactly two records
        let buffer = make_candidate(7, 4000, 2);
        let size = buffer.len();
        assert_eq!(size, TC_HEADER_SIZE + 2 * TA_RECORD_SIZE);

        let mut dataset = TcDataset::new();
        FragmentScanner::new(false)
            .scan(buffer.as_slice(), &mut dataset)
            .unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.candidate(0).unwrap().num_tas, 2);
        assert_eq!(dataset.activities(0).unwrap().len(), 2);
    }

    #[test]
    fn empty_fragment_is_counted_not_failed() {
        let buffer: Vec<u8> = Vec::new();
        let mut dataset = TcDataset::new();
        let count = FragmentScanner::new(false)
            .scan(buffer.as_slice(), &mut dataset)
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(dataset.len(), 0);
        assert_eq!(dataset.total_activities(), 0);
        assert_eq!(dataset.fragments_empty(), 1);
        assert_eq!(dataset.fragments_read(), 0);
    }

    #[test]
    fn truncated_candidate_leaves_dataset_unchanged() {
        // A valid one-candidate payload with the final byte removed
        let mut buffer = make_candidate(1, 1000, 1);
        buffer.pop();

        let mut dataset = TcDataset::new();
        let result = FragmentScanner::new(false).scan(buffer.as_slice(), &mut dataset);
        assert!(matches!(
            result,
            Err(FragmentError::BadCandidate(TcDataError::TruncatedRecord { .. }))
        ));
        assert_eq!(dataset.len(), 0);
        assert_eq!(dataset.fragments_read(), 0);
    }

    #[test]
    fn earlier_candidates_survive_a_truncated_tail() {
        let mut buffer = make_candidate(1, 1000, 1);
        buffer.extend_from_slice(&make_candidate(2, 2000, 1));
        buffer.pop();

        let mut dataset = TcDataset::new();
        let result = FragmentScanner::new(false).scan(buffer.as_slice(), &mut dataset);
        assert!(result.is_err());
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.candidate(0).unwrap().detid, 1);
    }

    #[test]
    fn partial_header_fails_cleanly() {
        // Trailing zero bytes too short for a header decode as version 0
        let mut buffer = make_candidate(1, 1000, 0);
        buffer.extend_from_slice(&[0u8; 5]);

        let mut dataset = TcDataset::new();
        let result = FragmentScanner::new(false).scan(buffer.as_slice(), &mut dataset);
        assert!(matches!(
            result,
            Err(FragmentError::BadCandidate(TcDataError::UnsupportedVersion(0)))
        ));
        assert_eq!(dataset.len(), 1);
    }
}
