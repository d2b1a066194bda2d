use super::trigger_activity::TriggerActivity;
use super::trigger_candidate::TriggerCandidate;

/// The decoded trigger-candidate dataset.
///
/// Two parallel append-only sequences: `candidates[i]` is the i-th candidate
/// in decode order (within and across fragments) and `activity_groups[i]` is
/// the jagged group of activities decoded with it, so
/// `activity_groups[i].len() == candidates[i].num_tas` always holds. Records
/// are appended as complete pairs, never reordered or deduplicated, and only
/// an explicit [`TcDataset::reset`] empties the dataset.
///
/// The dataset also carries the per-run fragment diagnostics (read, empty,
/// failed) so a merged dataset reports totals for everything that fed it.
#[derive(Debug, Clone, Default)]
pub struct TcDataset {
    candidates: Vec<TriggerCandidate>,
    activity_groups: Vec<Vec<TriggerActivity>>,
    fragments_read: usize,
    fragments_empty: usize,
    fragments_failed: usize,
}

impl TcDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one candidate and its activity group as a single step
    pub fn append(&mut self, candidate: TriggerCandidate, activities: Vec<TriggerActivity>) {
        debug_assert_eq!(candidate.num_tas as usize, activities.len());
        self.candidates.push(candidate);
        self.activity_groups.push(activities);
    }

    /// Clear both sequences and the diagnostics counters
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.activity_groups.clear();
        self.fragments_read = 0;
        self.fragments_empty = 0;
        self.fragments_failed = 0;
    }

    /// Number of candidates decoded so far
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Total number of activities across all groups
    pub fn total_activities(&self) -> usize {
        self.activity_groups.iter().map(Vec::len).sum()
    }

    /// Candidate at `index` in decode order
    pub fn candidate(&self, index: usize) -> Option<&TriggerCandidate> {
        self.candidates.get(index)
    }

    /// Activity group of the candidate at `index`
    pub fn activities(&self, index: usize) -> Option<&[TriggerActivity]> {
        self.activity_groups.get(index).map(Vec::as_slice)
    }

    pub fn candidates(&self) -> &[TriggerCandidate] {
        &self.candidates
    }

    pub fn activity_groups(&self) -> &[Vec<TriggerActivity>] {
        &self.activity_groups
    }

    /// Iterate aligned (candidate, activity group) pairs in decode order
    pub fn iter(&self) -> impl Iterator<Item = (&TriggerCandidate, &[TriggerActivity])> {
        self.candidates
            .iter()
            .zip(self.activity_groups.iter().map(Vec::as_slice))
    }

    pub fn fragments_read(&self) -> usize {
        self.fragments_read
    }

    pub fn fragments_empty(&self) -> usize {
        self.fragments_empty
    }

    pub fn fragments_failed(&self) -> usize {
        self.fragments_failed
    }

    pub(crate) fn tally_fragment(&mut self) {
        self.fragments_read += 1;
    }

    pub(crate) fn tally_empty_fragment(&mut self) {
        self.fragments_empty += 1;
    }

    pub(crate) fn tally_failed_fragment(&mut self) {
        self.fragments_failed += 1;
    }

    /// Append another dataset produced from later fragments or files.
    ///
    /// Ordering is the caller's responsibility: datasets must be merged in
    /// fragment enumeration order, never worker completion order.
    pub fn merge(&mut self, other: TcDataset) {
        self.candidates.extend(other.candidates);
        self.activity_groups.extend(other.activity_groups);
        self.fragments_read += other.fragments_read;
        self.fragments_empty += other.fragments_empty;
        self.fragments_failed += other.fragments_failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_cursor::ByteCursor;
    use crate::testutil::make_candidate;
    use crate::trigger_candidate::TriggerCandidate;

    fn decode_one(buffer: &[u8]) -> (TriggerCandidate, Vec<TriggerActivity>) {
        let mut cursor = ByteCursor::new(buffer);
        let (candidate, activities, _) = TriggerCandidate::read(&mut cursor, false).unwrap();
        (candidate, activities)
    }

    #[test]
    fn append_keeps_sequences_aligned() {
        let mut dataset = TcDataset::new();
        for n in [0u64, 3, 1] {
            let (candidate, activities) = decode_one(&make_candidate(0, 1000, n));
            dataset.append(candidate, activities);
        }

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.activity_groups().len(), dataset.len());
        for (candidate, group) in dataset.iter() {
            assert_eq!(candidate.num_tas as usize, group.len());
        }
        assert_eq!(dataset.total_activities(), 4);
        assert_eq!(dataset.candidate(1).unwrap().num_tas, 3);
        assert_eq!(dataset.activities(1).unwrap().len(), 3);
        assert!(dataset.candidate(3).is_none());
    }

    #[test]
    fn merge_preserves_decode_order() {
        let first = make_candidate(1, 1000, 1);
        let second = make_candidate(2, 2000, 2);

        // Decoding both into one dataset...
        let mut combined = TcDataset::new();
        let (candidate, activities) = decode_one(&first);
        combined.append(candidate, activities);
        let (candidate, activities) = decode_one(&second);
        combined.append(candidate, activities);

        // ...must equal decoding each separately and merging in that order
        let mut merged = TcDataset::new();
        let mut a = TcDataset::new();
        let (candidate, activities) = decode_one(&first);
        a.append(candidate, activities);
        let mut b = TcDataset::new();
        let (candidate, activities) = decode_one(&second);
        b.append(candidate, activities);
        merged.merge(a);
        merged.merge(b);

        assert_eq!(merged.candidates(), combined.candidates());
        assert_eq!(merged.activity_groups(), combined.activity_groups());
    }

    #[test]
    fn merge_sums_diagnostics() {
        let mut a = TcDataset::new();
        a.tally_fragment();
        a.tally_empty_fragment();
        let mut b = TcDataset::new();
        b.tally_fragment();
        b.tally_failed_fragment();

        a.merge(b);
        assert_eq!(a.fragments_read(), 2);
        assert_eq!(a.fragments_empty(), 1);
        assert_eq!(a.fragments_failed(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut dataset = TcDataset::new();
        let (candidate, activities) = decode_one(&make_candidate(0, 1000, 2));
        dataset.append(candidate, activities);
        dataset.tally_fragment();

        dataset.reset();
        assert_eq!(dataset.len(), 0);
        assert_eq!(dataset.total_activities(), 0);
        assert_eq!(dataset.fragments_read(), 0);

        dataset.reset();
        assert_eq!(dataset.len(), 0);
    }
}
