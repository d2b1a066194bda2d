use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use super::config::Config;
use super::csv_writer::CsvWriter;
use super::dataset::TcDataset;
use super::error::{ConfigError, ProcessorError};
use super::fragment::FragmentScanner;
use super::spill::SpillWindows;
use super::tc_file::TcFile;
use super::worker_status::{BarColor, WorkerStatus};

/// Decode every trigger-candidate fragment of one raw file into a dataset
/// and write the CSV outputs for it.
///
/// Fragment failures abort only the failing fragment: candidates decoded
/// earlier in that fragment and everything from earlier fragments stay in
/// the dataset, the failure is logged and counted, and the scan moves on to
/// the next fragment path.
pub fn process_file(
    config: &Config,
    file_path: &Path,
    file_number: usize,
    spill: Option<&SpillWindows>,
    tx: &Sender<WorkerStatus>,
    worker_id: &usize,
) -> Result<TcDataset, ProcessorError> {
    let file = TcFile::new(file_path)?;
    log::info!(
        "Processing {} ({}, {} trigger-candidate fragments)...",
        file.get_filename().to_string_lossy(),
        human_bytes::human_bytes(file.get_size_bytes() as f64),
        file.fragment_paths().len()
    );

    let scanner = FragmentScanner::new(config.strict);
    let mut dataset = TcDataset::new();
    let total_fragments = file.fragment_paths().len();

    tx.send(WorkerStatus::new(
        0.0,
        file_number,
        *worker_id,
        BarColor::CYAN,
    ))?;
    for (fragment_number, fragment_path) in file.fragment_paths().iter().enumerate() {
        match file.read_fragment(fragment_path) {
            Ok(payload) => {
                if let Err(e) = scanner.scan(&payload, &mut dataset) {
                    dataset.tally_failed_fragment();
                    log::error!("Failed to decode fragment {fragment_path}: {e}");
                }
            }
            Err(e) => {
                dataset.tally_failed_fragment();
                log::error!("Failed to read fragment {fragment_path}: {e}");
            }
        }
        tx.send(WorkerStatus::new(
            (fragment_number + 1) as f32 / total_fragments as f32,
            file_number,
            *worker_id,
            BarColor::CYAN,
        ))?;
    }

    log::info!(
        "Decoded {} candidates and {} activities from {} fragments ({} empty, {} failed).",
        dataset.len(),
        dataset.total_activities(),
        dataset.fragments_read(),
        dataset.fragments_empty(),
        dataset.fragments_failed()
    );

    let writer = CsvWriter::new(
        &config.get_tc_output_path(file_path)?,
        &config.get_ta_output_path(file_path)?,
    );
    writer.write_candidates(&dataset, spill)?;
    writer.write_activities(&dataset)?;

    Ok(dataset)
}

/// The function to be called by a worker thread.
///
/// Processes the given (file number, path) subset in order and returns the
/// per-file datasets tagged with their file numbers, so the spawner can
/// restore enumeration order across workers. A file that cannot be opened is
/// logged and skipped; its slot simply produces no dataset.
pub fn process_subset(
    config: Config,
    subset: Vec<(usize, PathBuf)>,
    tx: Sender<WorkerStatus>,
    worker_id: usize,
) -> Result<Vec<(usize, TcDataset)>, ProcessorError> {
    let spill = match &config.spill_path {
        Some(path) => Some(SpillWindows::new(path)?),
        None => None,
    };

    let mut results = Vec::with_capacity(subset.len());
    for (file_number, file_path) in subset {
        match process_file(
            &config,
            &file_path,
            file_number,
            spill.as_ref(),
            &tx,
            &worker_id,
        ) {
            Ok(dataset) => results.push((file_number, dataset)),
            Err(ProcessorError::FileError(e)) => {
                log::warn!("Skipping {}: {e}", file_path.to_string_lossy());
                tx.send(WorkerStatus::new(1.0, file_number, worker_id, BarColor::RED))?;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(results)
}

/// Process every raw file in the configured directory on the calling thread.
///
/// Returns one dataset merged in file enumeration order.
pub fn process(
    config: Config,
    tx: Sender<WorkerStatus>,
    worker_id: usize,
) -> Result<TcDataset, ProcessorError> {
    let files = config.get_raw_files()?;
    let subset = files.into_iter().enumerate().collect();
    let results = process_subset(config, subset, tx, worker_id)?;
    Ok(merge_results(results))
}

/// Divide the raw file list into per-worker subsets, round-robin
pub fn create_subsets(config: &Config) -> Result<Vec<Vec<(usize, PathBuf)>>, ConfigError> {
    let files = config.get_raw_files()?;
    let mut subsets: Vec<Vec<(usize, PathBuf)>> = vec![Vec::new(); config.n_threads as usize];
    let n_subsets = subsets.len();

    for (idx, path) in files.into_iter().enumerate() {
        subsets[idx % n_subsets].push((idx, path))
    }

    Ok(subsets)
}

/// Merge per-file results from the workers back into one dataset.
///
/// Worker completion order is nondeterministic; sorting by file number
/// restores the deterministic enumeration-order dataset.
pub fn merge_results(mut results: Vec<(usize, TcDataset)>) -> TcDataset {
    results.sort_by_key(|(file_number, _)| *file_number);
    let mut merged = TcDataset::new();
    for (_, dataset) in results {
        merged.merge(dataset);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_cursor::ByteCursor;
    use crate::testutil::make_candidate;
    use crate::trigger_candidate::TriggerCandidate;

    fn dataset_with(detid: u16) -> TcDataset {
        let buffer = make_candidate(detid, 1000, 1);
        let mut cursor = ByteCursor::new(&buffer);
        let (candidate, activities, _) = TriggerCandidate::read(&mut cursor, false).unwrap();
        let mut dataset = TcDataset::new();
        dataset.append(candidate, activities);
        dataset
    }

    #[test]
    fn merge_results_restores_enumeration_order() {
        // Completion order 2, 0, 1
        let results = vec![
            (2, dataset_with(30)),
            (0, dataset_with(10)),
            (1, dataset_with(20)),
        ];
        let merged = merge_results(results);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.candidate(0).unwrap().detid, 10);
        assert_eq!(merged.candidate(1).unwrap().detid, 20);
        assert_eq!(merged.candidate(2).unwrap().detid, 30);
    }
}
