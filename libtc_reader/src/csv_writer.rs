use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::dataset::TcDataset;
use super::error::CsvWriterError;
use super::spill::SpillWindows;

/// Writes a decoded dataset as the trigger-record CSV pair consumed by the
/// downstream matching and plotting tools.
///
/// One row per candidate in the candidates file and one row per activity in
/// the activities file; activity rows carry the index of their candidate so
/// the jagged grouping can be rebuilt downstream. Enumerated fields are
/// written as their numeric codes. When spill windows are given, candidate
/// rows gain a `spill_mode` tag.
#[derive(Debug)]
pub struct CsvWriter {
    tc_path: PathBuf,
    ta_path: PathBuf,
}

impl CsvWriter {
    pub fn new(tc_path: &Path, ta_path: &Path) -> Self {
        Self {
            tc_path: tc_path.to_path_buf(),
            ta_path: ta_path.to_path_buf(),
        }
    }

    /// Write one row per candidate, in decode order
    pub fn write_candidates(
        &self,
        dataset: &TcDataset,
        spill: Option<&SpillWindows>,
    ) -> Result<(), CsvWriterError> {
        let mut writer = BufWriter::new(File::create(&self.tc_path)?);
        write!(
            writer,
            "Index,Algorithm,DetID,NumTAs,Timestamp,TimeStart,TimeEnd,Type,Version"
        )?;
        if spill.is_some() {
            write!(writer, ",spill_mode")?;
        }
        writeln!(writer)?;

        for (index, candidate) in dataset.candidates().iter().enumerate() {
            write!(
                writer,
                "{},{},{},{},{},{},{},{},{}",
                index,
                candidate.algorithm.code(),
                candidate.detid,
                candidate.num_tas,
                candidate.time_candidate,
                candidate.time_start,
                candidate.time_end,
                candidate.tc_type.code(),
                candidate.version
            )?;
            if let Some(windows) = spill {
                write!(writer, ",{}", windows.mode_at(candidate.time_candidate).as_str())?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Write one row per activity, keyed by the candidate index
    pub fn write_activities(&self, dataset: &TcDataset) -> Result<(), CsvWriterError> {
        let mut writer = BufWriter::new(File::create(&self.ta_path)?);
        writeln!(
            writer,
            "TCIndex,ADCIntegral,ADCPeak,Algorithm,ChannelEnd,ChannelPeak,ChannelStart,DetID,TimeActivity,TimeEnd,TimePeak,TimeStart,Type,Version"
        )?;

        for (index, group) in dataset.activity_groups().iter().enumerate() {
            for activity in group.iter() {
                writeln!(
                    writer,
                    "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                    index,
                    activity.adc_integral,
                    activity.adc_peak,
                    activity.algorithm.code(),
                    activity.channel_end,
                    activity.channel_peak,
                    activity.channel_start,
                    activity.detid,
                    activity.time_activity,
                    activity.time_end,
                    activity.time_peak,
                    activity.time_start,
                    activity.ta_type.code(),
                    activity.version
                )?;
            }
        }
        Ok(())
    }
}
